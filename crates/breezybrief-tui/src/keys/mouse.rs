use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Position;

use crate::app::App;
use crate::autocomplete::FieldId;
use crate::form::{Focus, FormAction};

const FIELDS: [FieldId; 2] = [FieldId::Origin, FieldId::Destination];

pub(crate) fn handle_mouse(app: &mut App, event: MouseEvent) {
    let pos = Position::new(event.column, event.row);
    match event.kind {
        MouseEventKind::Moved => {
            for id in FIELDS {
                if let Some(index) = app.hit_areas.field(id).row_at(pos) {
                    app.form.field_mut(id).hover(index);
                }
            }
        }
        MouseEventKind::Down(MouseButton::Left) => handle_press(app, pos),
        MouseEventKind::ScrollDown if app.hit_areas.results.contains(pos) => app.scroll_briefing(1),
        MouseEventKind::ScrollUp if app.hit_areas.results.contains(pos) => app.scroll_briefing(-1),
        _ => {}
    }
}

/// Primary press. Items commit on press so the choice lands before any
/// focus change closes the dropdown.
fn handle_press(app: &mut App, pos: Position) {
    if app.form.is_disabled() {
        return;
    }

    for id in FIELDS {
        if let Some(index) = app.hit_areas.field(id).row_at(pos) {
            app.form.set_focus(Focus::from(id));
            app.form.field_mut(id).press_item(index);
            return;
        }
    }

    for id in FIELDS {
        if !app.hit_areas.field(id).contains(pos) {
            app.form.field_mut(id).press_outside();
        }
    }

    if let Some(id) = FIELDS
        .into_iter()
        .find(|id| app.hit_areas.field(*id).input.contains(pos))
    {
        app.form.set_focus(Focus::from(id));
    } else if app.hit_areas.cruise.contains(pos) {
        app.form.set_focus(Focus::CruiseLevel);
    } else if app.hit_areas.calm.contains(pos) {
        app.form.set_focus(Focus::Calm);
        app.form.toggle_calm();
    } else if app.hit_areas.submit.contains(pos) {
        app.form.set_focus(Focus::Submit);
        if let FormAction::Submit(payload) = app.form.submit() {
            app.handle_submit(payload);
        }
    }
}
