//! BreezyBrief core: airport codes, forecast contract, form validation, config.

pub mod config;
pub mod error;
pub mod form;
pub mod icao;
pub mod models;
pub mod url;

pub use config::AppConfig;
pub use error::{BriefError, Result};
pub use form::{FormError, FormInput, FormPayload};
pub use models::*;
