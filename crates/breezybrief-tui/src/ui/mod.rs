mod dropdown;
mod form;
mod results;
mod statusbar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

use crate::app::{App, HitAreas};
use crate::autocomplete::FieldId;

/// Height of the form section: inputs, controls and the inline error line.
const FORM_HEIGHT: u16 = 7;

/// Render the entire UI and record clickable regions for the mouse handler.
pub fn render(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    app.hit_areas = HitAreas::default();

    frame.render_widget(Block::default().style(Style::default().bg(app.theme.bg())), size);

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),           // header
            Constraint::Length(FORM_HEIGHT), // form
            Constraint::Min(3),              // briefing / map
            Constraint::Length(1),           // status bar
        ])
        .split(size);

    render_header(frame, app, main_layout[0]);
    form::render(frame, app, main_layout[1]);
    results::render(frame, app, main_layout[2]);
    statusbar::render(frame, app, main_layout[3]);

    // Dropdowns overlay everything below their input.
    for id in [FieldId::Origin, FieldId::Destination] {
        dropdown::render(frame, app, id, size);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            " BreezyBrief ",
            Style::default()
                .fg(app.theme.frost_ice())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "· turbulence briefings for your route",
            Style::default().fg(app.theme.muted()),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

pub(crate) fn centered_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    Rect {
        x: r.x + (r.width - width) / 2,
        y: r.y + (r.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use ratatui::layout::Position;

    use super::*;
    use crate::app::PageStatus;
    use crate::test_support::{settle, test_app};

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        let mut text = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                text.push_str(buffer[(x, y)].symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_centered_rect_clamps() {
        let r = centered_rect(200, 5, Rect::new(0, 0, 80, 24));
        assert_eq!(r, Rect::new(0, 9, 80, 5));
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_screen() {
        let mut app = test_app();
        let screen = draw(&mut app);
        assert!(screen.contains("BreezyBrief"));
        assert!(screen.contains("Origin ICAO"));
        assert!(screen.contains("Destination ICAO"));
        assert!(screen.contains("Mode: Calm / passenger-friendly"));
        assert!(screen.contains("Generate Forecast"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropdown_rows_and_duplicate_hint() {
        let mut app = test_app();
        app.form.destination.set_text("KATL");
        app.form.destination.close();
        app.form.origin.set_text("KA");
        draw(&mut app);
        assert!(app.hit_areas.origin.dropdown.is_some());
        let screen = draw(&mut app);
        assert!(screen.contains("Searching…"));

        settle(&mut app).await;
        let screen = draw(&mut app);
        assert!(screen.contains("KATW"));
        assert!(screen.contains("(already selected)"));
        assert_eq!(app.hit_areas.origin.rows.len(), 2);

        let row = app.hit_areas.origin.rows[1];
        assert_eq!(
            app.hit_areas.origin.row_at(Position::new(row.x, row.y)),
            Some(1)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_loading_and_error_views() {
        let mut app = test_app();
        app.status = PageStatus::Loading;
        let screen = draw(&mut app);
        assert!(screen.contains("Generating your BreezyBrief…"));
        assert!(screen.contains("This usually takes a few seconds."));

        app.status = PageStatus::Error;
        app.error = Some("Network error. Check your connection.".into());
        let screen = draw(&mut app);
        assert!(screen.contains("⚠"));
        assert!(screen.contains("Network error. Check your connection."));
    }
}
