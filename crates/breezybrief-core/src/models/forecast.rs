use serde::{Deserialize, Serialize};

/// Cruise flight level used when the form carries no override.
pub const DEFAULT_CRUISE_FL: u16 = 340;

/// Highest cruise flight level the forecast service accepts.
pub const MAX_CRUISE_FL: u16 = 450;

/// Body of `POST /api/forecast`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastRequest {
    pub origin: String,
    pub destination: String,
    pub cruise_fl: u16,
    /// Passenger-friendly tone instead of the technical one.
    pub calm: bool,
    /// Ask the server to render a map page for the route.
    pub embed: bool,
}

/// Response of `POST /api/forecast`.
///
/// Fields default when absent so that a partial body can be reported as
/// incomplete instead of failing to parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    #[serde(default)]
    pub briefing: String,

    /// Opaque per-route summary, passed through untouched.
    #[serde(default)]
    pub summary: serde_json::Value,

    #[serde(default)]
    pub map_url: String,
}

impl ForecastResponse {
    /// A usable forecast carries both a briefing and a map URL.
    pub fn is_complete(&self) -> bool {
        !self.briefing.trim().is_empty() && !self.map_url.trim().is_empty()
    }
}
