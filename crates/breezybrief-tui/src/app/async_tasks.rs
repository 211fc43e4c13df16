use breezybrief_api::{ApiError, ForecastClient};
use breezybrief_core::{ForecastRequest, ForecastResponse};
use tokio::sync::mpsc::UnboundedSender;

use crate::autocomplete::SearchOutcome;

/// Represents the result of an asynchronous background task.
#[derive(Debug)]
pub enum AsyncResult {
    /// A debounced airport search finished for one of the route fields.
    Suggestions(SearchOutcome),

    /// The forecast submission finished (or failed / timed out).
    ForecastLoaded {
        request: ForecastRequest,
        result: Result<ForecastResponse, ApiError>,
    },
}

pub fn spawn_forecast(
    tx: UnboundedSender<AsyncResult>,
    client: ForecastClient,
    request: ForecastRequest,
) {
    tokio::spawn(async move {
        let result = client.fetch_forecast(&request).await;
        let _ = tx.send(AsyncResult::ForecastLoaded { request, result });
    });
}
