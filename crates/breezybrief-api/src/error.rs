use thiserror::Error;

/// Failures of a forecast submission. `Display` is the banner text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Forecast timed out. Try again, or use Calm mode.")]
    Timeout,

    #[error("Network error. Check your connection.")]
    Network(#[source] reqwest::Error),

    /// Non-2xx response; `message` is the server's detail or a generic line.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Unexpected response from server.")]
    Unexpected,

    #[error("Server returned an incomplete forecast.")]
    Incomplete,

    #[error("HTTP client setup failed: {0}")]
    Client(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
