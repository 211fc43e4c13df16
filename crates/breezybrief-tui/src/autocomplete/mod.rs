//! Airport autocomplete field: debounced search-as-you-type with a
//! keyboard/mouse driven dropdown.

mod field;
mod pending;

use std::time::Duration;

use breezybrief_core::AirportSuggestion;
use breezybrief_core::AppConfig;
use tokio_util::sync::CancellationToken;

pub use field::{AutocompleteField, KeyOutcome};
pub use pending::PendingSearch;

/// Longest text the input accepts (codes or name fragments).
pub const MAX_INPUT_LEN: usize = 32;

/// Which of the two route fields a message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Origin,
    Destination,
}

impl FieldId {
    pub fn label(self) -> &'static str {
        match self {
            Self::Origin => "Origin ICAO",
            Self::Destination => "Destination ICAO",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            Self::Origin => "Type ICAO or airport name (e.g., KATL or Atlanta)",
            Self::Destination => "Type ICAO or airport name (e.g., KDEN or Denver)",
        }
    }
}

/// Observable dropdown state, derived from the field's query state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownPhase {
    Closed,
    /// A search is scheduled or in flight ("Searching…").
    OpenLoading,
    OpenResults,
    /// The last search came back empty ("No matches.").
    OpenEmpty,
}

impl DropdownPhase {
    pub fn is_open(self) -> bool {
        !matches!(self, Self::Closed)
    }
}

/// Tunables shared by both fields.
#[derive(Debug, Clone, Copy)]
pub struct FieldSettings {
    /// Quiet period after the last keystroke before searching.
    pub debounce: Duration,
    /// Rows shown in the dropdown; extra results are dropped.
    pub max_visible: usize,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(180),
            max_visible: 8,
        }
    }
}

impl From<&AppConfig> for FieldSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            debounce: config.debounce(),
            max_visible: config.ui.max_visible_suggestions.max(1),
        }
    }
}

/// Result of one search, delivered back to the UI loop.
///
/// Carries the token of the operation that produced it; a cancelled token
/// means the operation was superseded and the outcome must be dropped.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub field: FieldId,
    pub query: String,
    pub token: CancellationToken,
    pub results: Vec<AirportSuggestion>,
}
