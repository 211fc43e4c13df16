use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};

use crate::app::App;
use crate::autocomplete::FieldId;
use crate::form::Focus;

pub(super) fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // route inputs
            Constraint::Length(3), // calm toggle + submit
            Constraint::Length(1), // inline error
        ])
        .split(area);

    let inputs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
        ])
        .split(rows[0]);

    render_field(frame, app, FieldId::Origin, inputs[0]);
    render_field(frame, app, FieldId::Destination, inputs[1]);
    render_cruise(frame, app, inputs[2]);

    let controls = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(24),
            Constraint::Length(22),
            Constraint::Min(10),
        ])
        .split(rows[1]);

    render_calm_toggle(frame, app, controls[0]);
    render_submit(frame, app, controls[1]);
    render_mode(frame, app, controls[2]);

    if let Some(err) = app.form.local_error() {
        let line = Line::from(Span::styled(
            format!(" {err}"),
            Style::default().fg(app.theme.danger()),
        ));
        frame.render_widget(Paragraph::new(line), rows[2]);
    }
}

fn control_block<'a>(app: &App, title: &'a str, focused: bool) -> Block<'a> {
    let color = if focused {
        app.theme.active_field()
    } else {
        app.theme.inactive_field()
    };
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn render_field(frame: &mut Frame, app: &mut App, id: FieldId, area: Rect) {
    let focused = app.form.focus() == Focus::from(id);
    let field = app.form.field(id);
    let block = control_block(app, id.label(), focused && !field.is_disabled());
    let inner = block.inner(area);

    let content = if field.text().is_empty() {
        Span::styled(id.placeholder(), Style::default().fg(app.theme.muted()))
    } else {
        let fg = if field.is_disabled() {
            app.theme.muted()
        } else {
            app.theme.fg_bright()
        };
        Span::styled(field.text().to_string(), Style::default().fg(fg))
    };

    if focused && !field.is_disabled() && !app.is_loading() {
        let width = field.text().chars().count() as u16;
        let x = (inner.x + width).min(inner.right().saturating_sub(1));
        frame.set_cursor_position(Position::new(x, inner.y));
    }

    frame.render_widget(Paragraph::new(Line::from(content)).block(block), area);
    app.hit_areas.field_mut(id).input = area;
}

fn render_cruise(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.form.focus() == Focus::CruiseLevel;
    let block = control_block(app, "Cruise FL", focused && !app.is_loading());
    let inner = block.inner(area);

    let content = if app.form.cruise_fl.is_empty() {
        Span::styled(
            format!("FL{} (default)", app.config.ui.default_cruise_fl),
            Style::default().fg(app.theme.muted()),
        )
    } else {
        Span::styled(
            app.form.cruise_fl.clone(),
            Style::default().fg(app.theme.fg_bright()),
        )
    };

    if focused && !app.is_loading() {
        let width = app.form.cruise_fl.chars().count() as u16;
        frame.set_cursor_position(Position::new(
            (inner.x + width).min(inner.right().saturating_sub(1)),
            inner.y,
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(content)).block(block), area);
    app.hit_areas.cruise = area;
}

fn render_calm_toggle(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.form.focus() == Focus::Calm;
    let block = control_block(app, "", focused);
    let mark = if app.form.calm { "[x]" } else { "[ ]" };
    let line = Line::from(vec![
        Span::styled(format!(" {mark} "), Style::default().fg(app.theme.calm())),
        Span::styled("Calm mode", Style::default().fg(app.theme.fg())),
    ]);
    frame.render_widget(Paragraph::new(line).block(block), area);
    app.hit_areas.calm = area;
}

fn render_submit(frame: &mut Frame, app: &mut App, area: Rect) {
    let focused = app.form.focus() == Focus::Submit;
    let (label, color) = if app.is_loading() {
        ("Generating…", app.theme.muted())
    } else {
        ("Generate Forecast", app.theme.frost_ice())
    };
    let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
    if focused && !app.is_loading() {
        style = style.bg(app.theme.highlight_bg()).fg(app.theme.fg_bright());
    }
    let block = control_block(app, "", focused);
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(format!(" {label} "), style)))
            .centered()
            .block(block),
        area,
    );
    app.hit_areas.submit = area;
}

fn render_mode(frame: &mut Frame, app: &App, area: Rect) {
    let (text, color) = if app.form.calm {
        ("Mode: Calm / passenger-friendly", app.theme.calm())
    } else {
        ("Mode: Standard", app.theme.frost_mint())
    };
    // Vertically aligned with the control boxes' text row.
    let row = Rect {
        y: area.y + 1,
        height: 1,
        ..area
    }
    .intersection(area);
    frame.render_widget(
        Paragraph::new(Span::styled(format!("  {text}"), Style::default().fg(color))),
        row,
    );
}
