use crossterm::event::{KeyEvent, MouseEvent};

/// Events that can occur in the application
#[derive(Debug, Clone)]
pub enum Event {
    /// Terminal key press event
    Key(KeyEvent),
    /// Terminal mouse event (scroll moves the selection)
    Mouse(MouseEvent),
    /// Terminal resize event (layout adjusts on the next draw)
    Resize(u16, u16),
    /// Refresh timer fired: re-fetch all queries
    RefreshTick,
    /// Request to quit the application (reserved for future use)
    #[allow(dead_code)]
    Quit,
}

/// Result type for event handling
pub type EventResult<T> = anyhow::Result<T>;
