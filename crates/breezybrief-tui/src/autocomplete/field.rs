use std::sync::Arc;

use breezybrief_api::AirportSearch;
use breezybrief_core::{AirportSuggestion, icao};
use crossterm::event::KeyCode;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use super::{DropdownPhase, FieldId, FieldSettings, MAX_INPUT_LEN, PendingSearch, SearchOutcome};
use crate::app::async_tasks::AsyncResult;

/// What a key press did to the field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Not meant for the field; the form may act on it.
    Ignored,
    Handled,
    /// A suggestion was chosen; carries the normalized ICAO code.
    Committed(String),
}

/// Text input with an airport-suggestion dropdown.
///
/// All state is owned by the field and only mutated from its own handlers.
/// At most one [`PendingSearch`] is alive at a time; replacing or dropping
/// it cancels the previous operation, which is what keeps stale results out.
pub struct AutocompleteField {
    id: FieldId,
    text: String,
    query: String,
    open: bool,
    loading: bool,
    results: Vec<AirportSuggestion>,
    /// Query the cached `results` were fetched for.
    results_query: Option<String>,
    highlight: Option<usize>,
    disabled: bool,
    pending: Option<PendingSearch>,
    search: Arc<dyn AirportSearch>,
    tx: UnboundedSender<AsyncResult>,
    settings: FieldSettings,
}

impl std::fmt::Debug for AutocompleteField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AutocompleteField")
            .field("id", &self.id)
            .field("text", &self.text)
            .field("phase", &self.phase())
            .field("results", &self.results.len())
            .field("highlight", &self.highlight)
            .finish()
    }
}

impl AutocompleteField {
    pub fn new(
        id: FieldId,
        search: Arc<dyn AirportSearch>,
        tx: UnboundedSender<AsyncResult>,
        settings: FieldSettings,
    ) -> Self {
        Self {
            id,
            text: String::new(),
            query: String::new(),
            open: false,
            loading: false,
            results: Vec::new(),
            results_query: None,
            highlight: None,
            disabled: false,
            pending: None,
            search,
            tx,
            settings,
        }
    }

    // ─── Accessors ─────────────────────────────────────────

    /// Text as displayed in the input.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn results(&self) -> &[AirportSuggestion] {
        &self.results
    }

    pub fn highlight(&self) -> Option<usize> {
        self.highlight
    }

    #[cfg(test)]
    fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    #[cfg(test)]
    fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn phase(&self) -> DropdownPhase {
        if !self.open || self.disabled || !icao::is_searchable(&self.query) {
            DropdownPhase::Closed
        } else if self.loading {
            DropdownPhase::OpenLoading
        } else if self.results.is_empty() {
            DropdownPhase::OpenEmpty
        } else {
            DropdownPhase::OpenResults
        }
    }

    /// Whether row `index` holds the code already picked in the other field.
    pub fn is_duplicate(&self, index: usize, other_code: &str) -> bool {
        let other = icao::normalize(other_code);
        !other.is_empty()
            && self
                .results
                .get(index)
                .is_some_and(|a| icao::normalize(&a.icao) == other)
    }

    // ─── Editing ───────────────────────────────────────────

    /// Replace the input text. Typing uppercases and caps the length.
    pub fn set_text(&mut self, text: &str) {
        let next: String = text.to_uppercase().chars().take(MAX_INPUT_LEN).collect();
        if next == self.text {
            return;
        }
        self.text = next;
        self.open = true;
        self.refresh_query();
    }

    pub fn insert_char(&mut self, c: char) {
        if self.disabled || self.text.chars().count() >= MAX_INPUT_LEN {
            return;
        }
        let mut next = self.text.clone();
        next.push(c);
        self.set_text(&next);
    }

    pub fn backspace(&mut self) {
        if self.disabled || self.text.is_empty() {
            return;
        }
        let mut next = self.text.clone();
        next.pop();
        self.set_text(&next);
    }

    fn refresh_query(&mut self) {
        let query = icao::normalize(&self.text);
        if query == self.query {
            return;
        }
        self.query = query;
        self.on_query_changed();
    }

    /// Debounce entry point: runs on every change of the normalized query.
    fn on_query_changed(&mut self) {
        self.cancel_pending();
        self.results.clear();
        self.highlight = None;

        if self.disabled || !icao::is_searchable(&self.query) {
            self.results_query = None;
            self.loading = false;
            if !icao::is_searchable(&self.query) {
                self.open = false;
            }
            return;
        }

        self.loading = true;
        self.open = true;
        self.pending = Some(PendingSearch::spawn(
            self.id,
            self.query.clone(),
            self.settings.debounce,
            Arc::clone(&self.search),
            self.tx.clone(),
        ));
    }

    fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel();
        }
    }

    // ─── Search results ────────────────────────────────────

    /// Apply a finished search. Returns `false` when the outcome is stale
    /// (superseded, cancelled, or meant for the other field) and was dropped.
    pub fn apply(&mut self, outcome: SearchOutcome) -> bool {
        // Every replaced handle is cancelled, so an uncancelled token from
        // a field with a live handle belongs to that handle.
        if outcome.field != self.id
            || outcome.token.is_cancelled()
            || self.pending.is_none()
            || self.disabled
        {
            debug!(field = ?self.id, query = %outcome.query, "dropping stale suggestions");
            return false;
        }

        self.pending = None;
        let mut results = outcome.results;
        results.truncate(self.settings.max_visible);
        self.highlight = if results.is_empty() { None } else { Some(0) };
        self.results = results;
        self.results_query = Some(outcome.query);
        self.loading = false;
        true
    }

    // ─── Dropdown interaction ──────────────────────────────

    /// Focus entering the field reopens the dropdown for a searchable query.
    ///
    /// Cached results or a running search are shown as they are; a query
    /// that was never searched (e.g. a committed code) is searched again.
    pub fn focus(&mut self) {
        if self.disabled || !icao::is_searchable(&self.query) {
            return;
        }
        if self.pending.is_some() || self.has_results_for_query() {
            self.open = true;
        } else {
            self.on_query_changed();
        }
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn handle_key(&mut self, code: KeyCode) -> KeyOutcome {
        if self.disabled {
            return KeyOutcome::Ignored;
        }
        match code {
            KeyCode::Down => self.move_down(),
            KeyCode::Up => self.move_up(),
            KeyCode::Enter => match (self.phase(), self.highlight) {
                (DropdownPhase::OpenResults, Some(i)) if i < self.results.len() => self.commit(i),
                _ => KeyOutcome::Ignored,
            },
            KeyCode::Esc => {
                if self.phase().is_open() {
                    self.close();
                    KeyOutcome::Handled
                } else {
                    KeyOutcome::Ignored
                }
            }
            KeyCode::Char(c) => {
                self.insert_char(c);
                KeyOutcome::Handled
            }
            KeyCode::Backspace => {
                self.backspace();
                KeyOutcome::Handled
            }
            _ => KeyOutcome::Ignored,
        }
    }

    fn move_down(&mut self) -> KeyOutcome {
        match self.phase() {
            DropdownPhase::Closed if self.can_reopen() => {
                self.open = true;
                self.highlight = Some(0);
                KeyOutcome::Handled
            }
            DropdownPhase::Closed => KeyOutcome::Ignored,
            DropdownPhase::OpenResults => {
                let last = self.results.len() - 1;
                self.highlight = Some(self.highlight.map_or(0, |h| (h + 1).min(last)));
                KeyOutcome::Handled
            }
            DropdownPhase::OpenLoading | DropdownPhase::OpenEmpty => KeyOutcome::Handled,
        }
    }

    fn move_up(&mut self) -> KeyOutcome {
        match self.phase() {
            DropdownPhase::Closed => KeyOutcome::Ignored,
            DropdownPhase::OpenResults => {
                self.highlight = Some(self.highlight.map_or(0, |h| h.saturating_sub(1)));
                KeyOutcome::Handled
            }
            DropdownPhase::OpenLoading | DropdownPhase::OpenEmpty => KeyOutcome::Handled,
        }
    }

    /// Cached results belong to the current query and can be shown again
    /// without another search.
    fn can_reopen(&self) -> bool {
        !self.disabled && !self.loading && !self.results.is_empty() && self.has_results_for_query()
    }

    fn has_results_for_query(&self) -> bool {
        self.results_query.as_deref() == Some(self.query.as_str())
    }

    /// Pointer moved over row `index`.
    pub fn hover(&mut self, index: usize) {
        if self.phase() == DropdownPhase::OpenResults && index < self.results.len() {
            self.highlight = Some(index);
        }
    }

    /// Primary button pressed on row `index`. Commits on press, not click.
    pub fn press_item(&mut self, index: usize) -> Option<String> {
        if self.phase() != DropdownPhase::OpenResults || index >= self.results.len() {
            return None;
        }
        match self.commit(index) {
            KeyOutcome::Committed(code) => Some(code),
            _ => None,
        }
    }

    /// Primary button pressed anywhere outside this field's container.
    pub fn press_outside(&mut self) {
        self.close();
    }

    fn commit(&mut self, index: usize) -> KeyOutcome {
        let code = icao::normalize(&self.results[index].icao);
        debug!(field = ?self.id, %code, "suggestion committed");

        self.cancel_pending();
        self.text = code.clone();
        self.query = code.clone();
        self.results.clear();
        self.results_query = None;
        self.highlight = None;
        self.loading = false;
        self.open = false;
        KeyOutcome::Committed(code)
    }

    // ─── Lifecycle ─────────────────────────────────────────

    /// Disabling releases the pending timer and any in-flight search.
    ///
    /// Re-enabling refreshes a searchable query whose search was cut short,
    /// keeping the dropdown closed until the field is focused again.
    pub fn set_disabled(&mut self, disabled: bool) {
        let was_disabled = self.disabled;
        self.disabled = disabled;
        if disabled {
            self.cancel_pending();
            self.loading = false;
            self.open = false;
        } else if was_disabled
            && icao::is_searchable(&self.query)
            && !self.has_results_for_query()
        {
            self.on_query_changed();
            self.open = false;
        }
    }
}
