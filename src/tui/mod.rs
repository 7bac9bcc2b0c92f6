pub mod app;
pub mod input;

pub use app::App;
pub use input::InputWidget;

use crate::config;
use crate::dashboard::{Dashboard, RefreshTimer};
use crate::event::Event;
use crate::fetch::Fetcher;
use crate::logging;
use crate::search::providers::BraveSearchProvider;
use anyhow::Result;
use crossterm::{
    event::{EnableMouseCapture, DisableMouseCapture, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Set up the terminal, run the dashboard until quit, restore the terminal.
pub async fn run() -> Result<()> {
    let config = config::load_or_create_config()?;
    let _log_guard = logging::init(&config)?;

    let provider = Arc::new(BraveSearchProvider::new(&config.brave_api_key));
    let fetcher = Fetcher::new(provider);
    let mut app = App::new(Dashboard::new(&config));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = event_loop(&mut terminal, &mut app, &fetcher).await;

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

/// Single execution context: terminal events and refresh ticks are selected
/// on one task, and the fetch cycle runs inline. A rate-limited query's
/// backoff therefore delays everything behind it, which is the accepted
/// trade-off of the sequential model.
async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    fetcher: &Fetcher,
) -> Result<()> {
    let (mut timer, stop) = RefreshTimer::new(Duration::from_secs(
        app.dashboard().refresh_interval_secs(),
    ));
    let mut events = EventStream::new();

    loop {
        terminal.draw(|frame| app.render(frame))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(raw)) => {
                        if let Some(event) = map_terminal_event(raw) {
                            app.handle_event(event)?;
                        }
                    }
                    Some(Err(e)) => return Err(e.into()),
                    None => break,
                }
            }
            ticked = timer.tick() => {
                if ticked {
                    app.handle_event(Event::RefreshTick)?;
                }
            }
        }

        if let Some(secs) = app.take_interval_change() {
            timer.set_period(Duration::from_secs(secs));
        }

        if app.take_refresh_request() {
            app.set_refreshing();
            terminal.draw(|frame| app.render(frame))?;
            app.refresh(fetcher).await;
        }

        if app.should_quit() {
            stop.stop();
            break;
        }
    }

    Ok(())
}

fn map_terminal_event(raw: crossterm::event::Event) -> Option<Event> {
    match raw {
        crossterm::event::Event::Key(key) if key.kind == KeyEventKind::Press => {
            Some(Event::Key(key))
        }
        crossterm::event::Event::Mouse(mouse) => Some(Event::Mouse(mouse)),
        crossterm::event::Event::Resize(w, h) => Some(Event::Resize(w, h)),
        _ => None,
    }
}
