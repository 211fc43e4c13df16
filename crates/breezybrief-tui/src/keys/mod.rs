mod mouse;
#[cfg(test)]
mod tests;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::App;
use crate::form::{Focus, FormAction};

pub(crate) use mouse::handle_mouse;

/// Lines moved by PageUp / PageDown in the briefing panel.
const PAGE_SCROLL: i32 = 10;

pub(crate) fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) {
    if modifiers.contains(KeyModifiers::CONTROL) {
        match code {
            KeyCode::Char('c') | KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('o') => app.open_map(),
            _ => {}
        }
        return;
    }

    match code {
        KeyCode::PageDown => {
            app.scroll_briefing(PAGE_SCROLL);
            return;
        }
        KeyCode::PageUp => {
            app.scroll_briefing(-PAGE_SCROLL);
            return;
        }
        // Outside text inputs a bare `o` opens the map too.
        KeyCode::Char('o')
            if matches!(app.form.focus(), Focus::Calm | Focus::Submit)
                && app.map_url().is_some() =>
        {
            app.open_map();
            return;
        }
        _ => {}
    }

    if let FormAction::Submit(payload) = app.form.handle_key(KeyEvent::new(code, modifiers)) {
        app.handle_submit(payload);
    }
}
