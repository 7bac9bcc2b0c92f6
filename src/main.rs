use anyhow::Result;

/// Main entry point
#[tokio::main]
async fn main() -> Result<()> {
    stormwatch::tui::run().await
}
