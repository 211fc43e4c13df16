//! BreezyBrief terminal UI.

pub mod app;
pub mod autocomplete;
pub mod event;
pub mod form;
pub mod keys;
pub mod theme;
pub mod ui;

#[cfg(test)]
mod test_support;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::ExecutableCommand;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::info;

use app::App;
use event::{AppEvent, EventHandler};

/// Run the full TUI application.
///
/// Must be called from inside a tokio runtime context: background searches
/// and the forecast request are spawned onto it.
pub fn run_tui(app: &mut App) -> Result<()> {
    let mouse = app.config.ui.mouse;

    // Install panic hook
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = std::io::stdout().execute(DisableMouseCapture);
        let _ = std::io::stdout().execute(crossterm::terminal::LeaveAlternateScreen);
        original_hook(info);
    }));

    // Setup terminal
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    if mouse {
        io::stdout().execute(EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    info!(base_url = %app.config.api.base_url, "tui started");
    let event_handler = EventHandler::new(Duration::from_millis(app.config.ui.tick_rate_ms.max(10)));

    // Main loop
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        match event_handler.next()? {
            AppEvent::Key(key) => keys::handle_key(app, key.code, key.modifiers),
            AppEvent::Mouse(event) if mouse => keys::handle_mouse(app, event),
            AppEvent::Mouse(_) | AppEvent::Resize(_, _) => {}
            AppEvent::Tick => app.on_tick(),
        }

        app.drain_async();

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    if mouse {
        io::stdout().execute(DisableMouseCapture)?;
    }
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    info!("tui stopped");
    Ok(())
}
