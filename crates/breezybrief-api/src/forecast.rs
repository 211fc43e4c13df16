//! Forecast submission: `POST /api/forecast`.

use std::time::Duration;

use breezybrief_core::{ForecastRequest, ForecastResponse};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{ApiError, Result};
use crate::http::{ApiClient, RawResponse};

/// Default deadline for a forecast round-trip.
pub const DEFAULT_FORECAST_TIMEOUT: Duration = Duration::from_secs(90);

#[derive(Debug, Clone)]
pub struct ForecastClient {
    client: ApiClient,
    timeout: Duration,
}

impl ForecastClient {
    pub fn new(client: ApiClient) -> Self {
        Self::with_timeout(client, DEFAULT_FORECAST_TIMEOUT)
    }

    pub fn with_timeout(client: ApiClient, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn base_url(&self) -> &str {
        self.client.base_url()
    }

    /// Submit `request` and wait at most the configured timeout.
    pub async fn fetch_forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse> {
        info!(
            origin = %request.origin,
            destination = %request.destination,
            cruise_fl = request.cruise_fl,
            calm = request.calm,
            "requesting forecast"
        );
        match tokio::time::timeout(self.timeout, self.post(request)).await {
            Ok(result) => result,
            Err(_) => {
                warn!(timeout_secs = self.timeout.as_secs(), "forecast timed out");
                Err(ApiError::Timeout)
            }
        }
    }

    async fn post(&self, request: &ForecastRequest) -> Result<ForecastResponse> {
        let url = self.client.url("/api/forecast");
        debug!(%url, "POST");

        let resp = self
            .client
            .inner()
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(ApiError::Network)?;
        let raw = RawResponse::read(resp).await;

        if !raw.is_success() {
            let message = failure_message(raw.status, raw.is_json, &raw.body);
            warn!(status = raw.status, %message, "forecast request failed");
            return Err(ApiError::Status {
                status: raw.status,
                message,
            });
        }

        parse_forecast(raw.is_json, &raw.body)
    }
}

/// Pick the message shown for a non-2xx response.
///
/// JSON bodies shaped `{"detail": "..."}` or `{"detail": [{"msg": "..."}]}`
/// surface the detail; plain-text bodies surface their text; anything else
/// falls back to `Request failed (<status>)`.
pub fn failure_message(status: u16, is_json: bool, body: &str) -> String {
    let generic = || format!("Request failed ({status})");

    if !is_json {
        let text = body.trim();
        return if text.is_empty() {
            generic()
        } else {
            text.to_string()
        };
    }

    let parsed: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    match parsed.get("detail") {
        Some(Value::String(detail)) => detail.clone(),
        Some(Value::Array(items)) => items
            .first()
            .and_then(|first| first.get("msg"))
            .and_then(Value::as_str)
            .filter(|msg| !msg.is_empty())
            .map(str::to_string)
            .unwrap_or_else(generic),
        _ => generic(),
    }
}

/// Validate a 2xx forecast body.
pub fn parse_forecast(is_json: bool, body: &str) -> Result<ForecastResponse> {
    if !is_json {
        return Err(ApiError::Unexpected);
    }
    let value: Value = serde_json::from_str(body).map_err(|_| ApiError::Unexpected)?;
    if !value.is_object() {
        return Err(ApiError::Unexpected);
    }
    let data: ForecastResponse =
        serde_json::from_value(value).map_err(|_| ApiError::Incomplete)?;
    if !data.is_complete() {
        return Err(ApiError::Incomplete);
    }
    Ok(data)
}
