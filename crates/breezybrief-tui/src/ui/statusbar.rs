use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::{App, PageStatus};

pub(super) fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12), // page status
            Constraint::Min(10),    // message
            Constraint::Length(56), // key hints
        ])
        .split(area);

    let (label, color) = match app.status {
        PageStatus::Idle => ("READY", app.theme.frost_ice()),
        PageStatus::Loading => ("LOADING", app.theme.calm()),
        PageStatus::Success => ("BRIEFED", app.theme.success()),
        PageStatus::Error => ("ERROR", app.theme.danger()),
    };
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!(" {label} "),
            Style::default()
                .fg(app.theme.bg())
                .bg(color)
                .add_modifier(Modifier::BOLD),
        )),
        chunks[0],
    );

    frame.render_widget(
        Paragraph::new(Span::styled(
            app.status_message.as_str(),
            Style::default().fg(app.theme.fg()),
        ))
        .style(Style::default().bg(app.theme.bg_secondary())),
        chunks[1],
    );

    let hints = Line::from(vec![
        Span::styled("Tab", Style::default().fg(app.theme.frost_ice())),
        Span::styled(" next  ", Style::default().fg(app.theme.muted())),
        Span::styled("↑↓", Style::default().fg(app.theme.frost_ice())),
        Span::styled(" pick  ", Style::default().fg(app.theme.muted())),
        Span::styled("Enter", Style::default().fg(app.theme.frost_ice())),
        Span::styled(" submit  ", Style::default().fg(app.theme.muted())),
        Span::styled("^O", Style::default().fg(app.theme.frost_ice())),
        Span::styled(" map  ", Style::default().fg(app.theme.muted())),
        Span::styled("^Q", Style::default().fg(app.theme.frost_ice())),
        Span::styled(" quit ", Style::default().fg(app.theme.muted())),
    ]);
    frame.render_widget(
        Paragraph::new(hints)
            .right_aligned()
            .style(Style::default().bg(app.theme.bg_secondary())),
        chunks[2],
    );
}
