//! Submit-time validation of the route form.

use thiserror::Error;

use crate::icao;
use crate::models::{ForecastRequest, MAX_CRUISE_FL};

/// Validation failures. `Display` is the message shown under the form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Origin must be a valid 4-character ICAO (e.g., KATL).")]
    InvalidOrigin,

    #[error("Destination must be a valid 4-character ICAO (e.g., KDEN).")]
    InvalidDestination,

    #[error("Origin and destination must be different.")]
    SameAirport,

    #[error("Cruise FL must be between 0 and 450 (e.g., 340).")]
    InvalidCruiseLevel,
}

/// Raw form contents as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub origin: String,
    pub destination: String,
    /// Optional override; empty means "use the default level".
    pub cruise_fl: String,
    pub calm: bool,
}

/// Normalized, validated form output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormPayload {
    pub origin: String,
    pub destination: String,
    pub calm: bool,
    pub cruise_fl: Option<u16>,
}

impl FormInput {
    /// Check the form in display order and return the first failure.
    pub fn validate(&self) -> Result<FormPayload, FormError> {
        let origin = icao::normalize(&self.origin);
        let destination = icao::normalize(&self.destination);

        if !icao::is_valid_code(&origin) {
            return Err(FormError::InvalidOrigin);
        }
        if !icao::is_valid_code(&destination) {
            return Err(FormError::InvalidDestination);
        }
        if origin == destination {
            return Err(FormError::SameAirport);
        }

        let cruise_fl = parse_cruise_level(&self.cruise_fl)?;

        Ok(FormPayload {
            origin,
            destination,
            calm: self.calm,
            cruise_fl,
        })
    }
}

impl FormPayload {
    /// Attach the cruise level and embed flag the page adds before sending.
    pub fn into_request(self, default_cruise_fl: u16) -> ForecastRequest {
        ForecastRequest {
            origin: self.origin,
            destination: self.destination,
            cruise_fl: self.cruise_fl.unwrap_or(default_cruise_fl),
            calm: self.calm,
            embed: true,
        }
    }
}

/// Parse an optional cruise level such as `"340"` or `"FL340"`.
///
/// Blank input is `Ok(None)`; anything else must be an integer in `0..=450`.
pub fn parse_cruise_level(text: &str) -> Result<Option<u16>, FormError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let digits = match trimmed.get(..2) {
        Some(prefix) if prefix.eq_ignore_ascii_case("FL") => trimmed[2..].trim_start(),
        _ => trimmed,
    };

    match digits.parse::<u16>() {
        Ok(level) if level <= MAX_CRUISE_FL => Ok(Some(level)),
        _ => Err(FormError::InvalidCruiseLevel),
    }
}
