use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph, Wrap};

use crate::app::{App, ForecastView, PageStatus};

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

pub(super) fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    app.hit_areas.results = area;
    match app.status {
        PageStatus::Idle => render_idle(frame, app, area),
        PageStatus::Loading => render_loading(frame, app, area),
        PageStatus::Error => render_error(frame, app, area),
        PageStatus::Success => {
            if let Some(view) = &app.forecast {
                render_forecast(frame, app, view, area);
            }
        }
    }
}

fn render_idle(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "  Pick an origin and destination, then press Enter to get a turbulence briefing.",
            Style::default().fg(app.theme.muted()),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_loading(frame: &mut Frame, app: &App, area: Rect) {
    let spinner = SPINNER[app.tick % SPINNER.len()];
    let card = super::centered_rect(44, 5, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.frost_ice()));
    let lines = vec![
        Line::from(Span::styled(
            format!("{spinner} Generating your BreezyBrief…"),
            Style::default()
                .fg(app.theme.fg_bright())
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "This usually takes a few seconds.",
            Style::default().fg(app.theme.muted()),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).centered().block(block), card);
}

fn render_error(frame: &mut Frame, app: &App, area: Rect) {
    let Some(message) = app.error.as_deref() else {
        return;
    };
    let banner = Rect {
        height: area.height.min(3),
        ..area
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.danger()));
    frame.render_widget(
        Paragraph::new(Span::styled(
            format!("⚠ {message}"),
            Style::default().fg(app.theme.danger()),
        ))
        .wrap(Wrap { trim: true })
        .block(block),
        banner,
    );
}

fn render_forecast(frame: &mut Frame, app: &App, view: &ForecastView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let request = &view.request;
    let mode = if request.calm { "Calm" } else { "Standard" };
    let subtitle = format!(
        " {} → {} · {mode} · FL{} · {} ",
        request.origin,
        request.destination,
        request.cruise_fl,
        view.received_at.format("%H:%M"),
    );

    let briefing = Block::default()
        .title(Span::styled(
            " Route Briefing ",
            Style::default()
                .fg(app.theme.frost_ice())
                .add_modifier(Modifier::BOLD),
        ))
        .title_bottom(Line::from(Span::styled(subtitle, Style::default().fg(app.theme.muted()))))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.border()));
    frame.render_widget(
        Paragraph::new(view.response.briefing.as_str())
            .style(Style::default().fg(app.theme.fg()))
            .wrap(Wrap { trim: false })
            .scroll((app.briefing_scroll, 0))
            .block(briefing),
        chunks[0],
    );

    let map = Block::default()
        .title(Span::styled(
            " Route Map ",
            Style::default()
                .fg(app.theme.frost_ice())
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.border()));

    let lines = match view.map_url.as_deref() {
        Some(url) => vec![
            Line::from(Span::styled(
                url,
                Style::default()
                    .fg(app.theme.link())
                    .add_modifier(Modifier::UNDERLINED),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Ctrl-O: open in browser",
                Style::default().fg(app.theme.muted()),
            )),
        ],
        None => vec![Line::from(Span::styled(
            "No map URL returned from server.",
            Style::default().fg(app.theme.muted()),
        ))],
    };
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(map),
        chunks[1],
    );
}
