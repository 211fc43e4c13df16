use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;

use crate::app::{App, FieldHitArea, PageStatus};
use crate::autocomplete::DropdownPhase;
use crate::form::Focus;
use crate::keys::{handle_key, handle_mouse};
use crate::test_support::{settle, test_app};

fn press(app: &mut App, code: KeyCode) {
    handle_key(app, code, KeyModifiers::NONE);
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        press(app, KeyCode::Char(c));
    }
}

fn mouse(app: &mut App, kind: MouseEventKind, column: u16, row: u16) {
    handle_mouse(
        app,
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        },
    );
}

/// Origin input at rows 2..5, its dropdown below with two suggestion rows.
fn layout_origin(app: &mut App) {
    app.hit_areas.origin = FieldHitArea {
        input: Rect::new(0, 2, 40, 3),
        dropdown: Some(Rect::new(0, 5, 40, 6)),
        rows: vec![Rect::new(1, 6, 38, 2), Rect::new(1, 8, 38, 2)],
    };
    app.hit_areas.destination.input = Rect::new(40, 2, 40, 3);
    app.hit_areas.calm = Rect::new(0, 6, 24, 3);
    app.hit_areas.submit = Rect::new(24, 12, 22, 3);
}

#[tokio::test(start_paused = true)]
async fn test_ctrl_q_quits() {
    let mut app = test_app();
    handle_key(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
    assert!(app.should_quit);
}

#[tokio::test(start_paused = true)]
async fn test_ctrl_chars_do_not_type() {
    let mut app = test_app();
    handle_key(&mut app, KeyCode::Char('a'), KeyModifiers::CONTROL);
    assert_eq!(app.form.origin.text(), "");
}

#[tokio::test(start_paused = true)]
async fn test_keyboard_pick_and_submit() {
    let mut app = test_app();
    type_text(&mut app, "ka");
    assert_eq!(app.form.origin.text(), "KA");
    assert_eq!(app.form.origin.phase(), DropdownPhase::OpenLoading);

    settle(&mut app).await;
    assert_eq!(app.form.origin.phase(), DropdownPhase::OpenResults);
    press(&mut app, KeyCode::Down);
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.form.origin.text(), "KATW");
    assert_eq!(app.form.origin.phase(), DropdownPhase::Closed);
    assert_eq!(app.status, PageStatus::Idle);

    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "KATL");
    // Still searching: Enter falls through to the form.
    press(&mut app, KeyCode::Enter);
    assert_eq!(app.status, PageStatus::Loading);
    assert!(app.form.is_disabled());

    type_text(&mut app, "X");
    assert_eq!(app.form.destination.text(), "KATL");
}

#[tokio::test(start_paused = true)]
async fn test_invalid_submit_shows_inline_error() {
    let mut app = test_app();
    type_text(&mut app, "KATL");
    press(&mut app, KeyCode::Tab);
    type_text(&mut app, "KATL");
    press(&mut app, KeyCode::Tab);
    press(&mut app, KeyCode::Enter);
    assert_eq!(
        app.form.local_error(),
        Some("Origin and destination must be different.")
    );
    assert_eq!(app.status, PageStatus::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_bare_o_types_in_fields() {
    let mut app = test_app();
    press(&mut app, KeyCode::Char('o'));
    assert_eq!(app.form.origin.text(), "O");
}

#[tokio::test(start_paused = true)]
async fn test_mouse_hover_and_press_item() {
    let mut app = test_app();
    type_text(&mut app, "KA");
    settle(&mut app).await;
    layout_origin(&mut app);

    mouse(&mut app, MouseEventKind::Moved, 5, 8);
    assert_eq!(app.form.origin.highlight(), Some(1));

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 5, 9);
    assert_eq!(app.form.origin.text(), "KATW");
    assert_eq!(app.form.origin.phase(), DropdownPhase::Closed);
}

#[tokio::test(start_paused = true)]
async fn test_mouse_press_outside_closes() {
    let mut app = test_app();
    type_text(&mut app, "KA");
    settle(&mut app).await;
    layout_origin(&mut app);

    // Inside the container but not on a row: stays open.
    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 39, 5);
    assert!(app.form.origin.phase().is_open());

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 60, 20);
    assert_eq!(app.form.origin.phase(), DropdownPhase::Closed);
    assert_eq!(app.form.origin.text(), "KA");

    // ArrowDown brings the cached list back without searching again.
    press(&mut app, KeyCode::Down);
    assert_eq!(app.form.origin.phase(), DropdownPhase::OpenResults);
}

#[tokio::test(start_paused = true)]
async fn test_mouse_focus_and_toggle() {
    let mut app = test_app();
    layout_origin(&mut app);
    app.hit_areas.origin.dropdown = None;
    app.hit_areas.origin.rows.clear();

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 50, 3);
    assert_eq!(app.form.focus(), Focus::Destination);

    let calm = app.form.calm;
    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 3, 7);
    assert_eq!(app.form.focus(), Focus::Calm);
    assert_eq!(app.form.calm, !calm);

    mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 30, 13);
    assert_eq!(app.form.focus(), Focus::Submit);
    assert_eq!(
        app.form.local_error(),
        Some("Origin must be a valid 4-character ICAO (e.g., KATL).")
    );
}
