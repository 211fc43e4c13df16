//! BreezyBrief API: airport search and forecast clients.

pub mod airports;
pub mod error;
pub mod forecast;
pub mod http;

pub use airports::{AirportSearch, SuggestionFetcher, is_usable_airport, sanitize_suggestions};
pub use error::{ApiError, Result};
pub use forecast::ForecastClient;
pub use http::ApiClient;
pub use tokio_util::sync::CancellationToken;
