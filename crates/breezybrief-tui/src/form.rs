//! The route form: two autocomplete fields, cruise level, calm toggle.

use std::sync::Arc;

use breezybrief_api::AirportSearch;
use breezybrief_core::{FormInput, FormPayload};
use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc::UnboundedSender;

use crate::app::async_tasks::AsyncResult;
use crate::autocomplete::{AutocompleteField, FieldId, FieldSettings, KeyOutcome, SearchOutcome};

/// Longest text accepted by the cruise level input (`FL450`).
const MAX_CRUISE_INPUT: usize = 5;

/// Which form control has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Origin,
    Destination,
    CruiseLevel,
    Calm,
    Submit,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Origin => Self::Destination,
            Self::Destination => Self::CruiseLevel,
            Self::CruiseLevel => Self::Calm,
            Self::Calm => Self::Submit,
            Self::Submit => Self::Origin,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Origin => Self::Submit,
            Self::Destination => Self::Origin,
            Self::CruiseLevel => Self::Destination,
            Self::Calm => Self::CruiseLevel,
            Self::Submit => Self::Calm,
        }
    }

    pub fn field(self) -> Option<FieldId> {
        match self {
            Self::Origin => Some(FieldId::Origin),
            Self::Destination => Some(FieldId::Destination),
            _ => None,
        }
    }
}

impl From<FieldId> for Focus {
    fn from(id: FieldId) -> Self {
        match id {
            FieldId::Origin => Self::Origin,
            FieldId::Destination => Self::Destination,
        }
    }
}

/// What the page should do after the form handled an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit(FormPayload),
}

#[derive(Debug)]
pub struct RouteForm {
    pub origin: AutocompleteField,
    pub destination: AutocompleteField,
    /// Optional cruise level override; blank uses the configured default.
    pub cruise_fl: String,
    pub calm: bool,
    focus: Focus,
    local_error: Option<String>,
    disabled: bool,
}

impl RouteForm {
    pub fn new(
        search: Arc<dyn AirportSearch>,
        tx: UnboundedSender<AsyncResult>,
        settings: FieldSettings,
        default_calm: bool,
    ) -> Self {
        Self {
            origin: AutocompleteField::new(FieldId::Origin, Arc::clone(&search), tx.clone(), settings),
            destination: AutocompleteField::new(FieldId::Destination, search, tx, settings),
            cruise_fl: String::new(),
            calm: default_calm,
            focus: Focus::default(),
            local_error: None,
            disabled: false,
        }
    }

    pub fn field(&self, id: FieldId) -> &AutocompleteField {
        match id {
            FieldId::Origin => &self.origin,
            FieldId::Destination => &self.destination,
        }
    }

    pub fn field_mut(&mut self, id: FieldId) -> &mut AutocompleteField {
        match id {
            FieldId::Origin => &mut self.origin,
            FieldId::Destination => &mut self.destination,
        }
    }

    /// The code currently in the other route field, for duplicate hints.
    pub fn sibling_code(&self, id: FieldId) -> &str {
        match id {
            FieldId::Origin => self.destination.text(),
            FieldId::Destination => self.origin.text(),
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn local_error(&self) -> Option<&str> {
        self.local_error.as_deref()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Move focus; the field being left closes its dropdown.
    pub fn set_focus(&mut self, focus: Focus) {
        if focus == self.focus {
            return;
        }
        if let Some(id) = self.focus.field() {
            self.field_mut(id).close();
        }
        self.focus = focus;
        if let Some(id) = focus.field() {
            self.field_mut(id).focus();
        }
    }

    pub fn toggle_calm(&mut self) {
        if !self.disabled {
            self.calm = !self.calm;
        }
    }

    /// Route a finished search to the field that started it.
    pub fn apply_suggestions(&mut self, outcome: SearchOutcome) -> bool {
        self.field_mut(outcome.field).apply(outcome)
    }

    /// While disabled every control ignores input and both fields release
    /// their pending searches.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
        self.origin.set_disabled(disabled);
        self.destination.set_disabled(disabled);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> FormAction {
        if self.disabled {
            return FormAction::None;
        }

        match key.code {
            KeyCode::Tab => {
                self.set_focus(self.focus.next());
                return FormAction::None;
            }
            KeyCode::BackTab => {
                self.set_focus(self.focus.prev());
                return FormAction::None;
            }
            _ => {}
        }

        match self.focus {
            Focus::Origin | Focus::Destination => {
                let Some(id) = self.focus.field() else {
                    return FormAction::None;
                };
                match self.field_mut(id).handle_key(key.code) {
                    KeyOutcome::Ignored if key.code == KeyCode::Enter => self.submit(),
                    _ => FormAction::None,
                }
            }
            Focus::CruiseLevel => match key.code {
                KeyCode::Char(c)
                    if (c.is_ascii_digit() || matches!(c, 'f' | 'F' | 'l' | 'L'))
                        && self.cruise_fl.len() < MAX_CRUISE_INPUT =>
                {
                    self.cruise_fl.push(c.to_ascii_uppercase());
                    FormAction::None
                }
                KeyCode::Backspace => {
                    self.cruise_fl.pop();
                    FormAction::None
                }
                KeyCode::Enter => self.submit(),
                _ => FormAction::None,
            },
            Focus::Calm => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    self.toggle_calm();
                    FormAction::None
                }
                _ => FormAction::None,
            },
            Focus::Submit => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => self.submit(),
                _ => FormAction::None,
            },
        }
    }

    /// Validate and, when valid, produce the payload for the page.
    pub fn submit(&mut self) -> FormAction {
        if self.disabled {
            return FormAction::None;
        }
        self.local_error = None;

        let input = FormInput {
            origin: self.origin.text().to_string(),
            destination: self.destination.text().to_string(),
            cruise_fl: self.cruise_fl.clone(),
            calm: self.calm,
        };

        match input.validate() {
            Ok(payload) => {
                self.origin.close();
                self.destination.close();
                FormAction::Submit(payload)
            }
            Err(e) => {
                self.local_error = Some(e.to_string());
                FormAction::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockSearch;
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc::unbounded_channel;

    fn form() -> RouteForm {
        let (tx, _rx) = unbounded_channel();
        RouteForm::new(MockSearch::with_codes(&[]), tx, FieldSettings::default(), true)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_airport_blocks_submit() {
        let mut form = form();
        form.origin.set_text("KATL");
        form.destination.set_text("KATL");
        assert_eq!(form.submit(), FormAction::None);
        assert_eq!(
            form.local_error(),
            Some("Origin and destination must be different.")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_origin_blocks_submit() {
        let mut form = form();
        form.origin.set_text("AB1");
        form.destination.set_text("KDEN");
        assert_eq!(form.submit(), FormAction::None);
        assert_eq!(
            form.local_error(),
            Some("Origin must be a valid 4-character ICAO (e.g., KATL).")
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_valid_submit_clears_error() {
        let mut form = form();
        form.origin.set_text("AB1");
        form.submit();
        assert!(form.local_error().is_some());

        form.origin.set_text("katl");
        form.destination.set_text("kden");
        form.calm = false;
        let action = form.submit();
        assert_eq!(
            action,
            FormAction::Submit(FormPayload {
                origin: "KATL".into(),
                destination: "KDEN".into(),
                calm: false,
                cruise_fl: None,
            })
        );
        assert_eq!(form.local_error(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_enter_in_field_submits_when_nothing_highlighted() {
        let mut form = form();
        form.origin.set_text("KATL");
        form.destination.set_text("KDEN");
        form.set_focus(Focus::Destination);
        assert!(matches!(form.handle_key(key(KeyCode::Enter)), FormAction::Submit(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_tab_cycles_focus_and_closes_dropdown() {
        let mut form = form();
        form.origin.set_text("KA");
        assert!(form.origin.phase().is_open());

        form.handle_key(key(KeyCode::Tab));
        assert_eq!(form.focus(), Focus::Destination);
        assert!(!form.origin.phase().is_open());

        form.handle_key(key(KeyCode::BackTab));
        assert_eq!(form.focus(), Focus::Origin);
        assert!(form.origin.phase().is_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cruise_override_is_validated() {
        let mut form = form();
        form.origin.set_text("KATL");
        form.destination.set_text("KDEN");
        form.set_focus(Focus::CruiseLevel);
        for c in "FL500".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        assert_eq!(form.cruise_fl, "FL500");
        assert_eq!(form.handle_key(key(KeyCode::Enter)), FormAction::None);
        assert_eq!(
            form.local_error(),
            Some("Cruise FL must be between 0 and 450 (e.g., 340).")
        );

        form.handle_key(key(KeyCode::Backspace));
        form.handle_key(key(KeyCode::Backspace));
        form.handle_key(key(KeyCode::Backspace));
        for c in "30".chars() {
            form.handle_key(key(KeyCode::Char(c)));
        }
        match form.handle_key(key(KeyCode::Enter)) {
            FormAction::Submit(payload) => assert_eq!(payload.cruise_fl, Some(30)),
            other => panic!("expected submit, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_calm_toggle_and_disabled_form() {
        let mut form = form();
        form.set_focus(Focus::Calm);
        form.handle_key(key(KeyCode::Char(' ')));
        assert!(!form.calm);

        form.set_disabled(true);
        form.handle_key(key(KeyCode::Enter));
        assert!(!form.calm);
        assert_eq!(form.submit(), FormAction::None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_sibling_code() {
        let mut form = form();
        form.origin.set_text("KATL");
        assert_eq!(form.sibling_code(FieldId::Destination), "KATL");
        assert_eq!(form.sibling_code(FieldId::Origin), "");
    }
}
