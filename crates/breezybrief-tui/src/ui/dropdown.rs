use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};

use crate::app::App;
use crate::autocomplete::{DropdownPhase, FieldId};

/// Each suggestion takes two lines: code, then name and place.
const ROW_HEIGHT: u16 = 2;
const MIN_WIDTH: u16 = 30;

/// Draw the suggestion dropdown under the field's input, if open.
pub(super) fn render(frame: &mut Frame, app: &mut App, id: FieldId, screen: Rect) {
    let field = app.form.field(id);
    let phase = field.phase();
    if !phase.is_open() {
        return;
    }

    let input = app.hit_areas.field(id).input;
    let y = input.bottom();
    if y + 2 >= screen.bottom() {
        return;
    }

    let body_height = match phase {
        DropdownPhase::OpenResults => field.results().len() as u16 * ROW_HEIGHT,
        _ => 1,
    };
    let area = Rect {
        x: input.x,
        y,
        width: input.width.max(MIN_WIDTH).min(screen.right() - input.x),
        height: (body_height + 2).min(screen.bottom() - y),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(app.theme.active_field()))
        .style(Style::default().bg(app.theme.bg_secondary()));
    let inner = block.inner(area);

    frame.render_widget(Clear, area);
    frame.render_widget(block, area);

    let mut rows = Vec::new();
    match phase {
        DropdownPhase::OpenLoading => {
            frame.render_widget(
                Paragraph::new(Span::styled(" Searching…", Style::default().fg(app.theme.muted()))),
                inner,
            );
        }
        DropdownPhase::OpenEmpty => {
            frame.render_widget(
                Paragraph::new(Span::styled(" No matches.", Style::default().fg(app.theme.muted()))),
                inner,
            );
        }
        DropdownPhase::OpenResults => {
            let sibling = app.form.sibling_code(id);
            for (i, airport) in field.results().iter().enumerate() {
                let row_y = inner.y + i as u16 * ROW_HEIGHT;
                if row_y + ROW_HEIGHT > inner.bottom() {
                    break;
                }
                let row = Rect {
                    x: inner.x,
                    y: row_y,
                    width: inner.width,
                    height: ROW_HEIGHT,
                };

                let selected = field.highlight() == Some(i);
                let base = if selected {
                    Style::default().bg(app.theme.highlight_bg())
                } else {
                    Style::default()
                };

                let mut head = vec![Span::styled(
                    format!(" {}", airport.icao),
                    base.fg(app.theme.fg_bright()).add_modifier(Modifier::BOLD),
                )];
                if let Some(iata) = airport.iata.as_deref().filter(|s| !s.is_empty()) {
                    head.push(Span::styled(format!(" ({iata})"), base.fg(app.theme.frost_mint())));
                }
                if field.is_duplicate(i, sibling) {
                    head.push(Span::styled(
                        " (already selected)",
                        base.fg(app.theme.warning()),
                    ));
                }
                let detail = airport.detail_line().unwrap_or_default();
                let lines = vec![
                    Line::from(head),
                    Line::from(Span::styled(format!(" {detail}"), base.fg(app.theme.muted()))),
                ];

                frame.render_widget(Paragraph::new(lines).style(base), row);
                rows.push(row);
            }
        }
        DropdownPhase::Closed => {}
    }

    let hit = app.hit_areas.field_mut(id);
    hit.dropdown = Some(area);
    hit.rows = rows;
}
