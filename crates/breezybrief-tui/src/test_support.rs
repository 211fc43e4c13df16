//! Test doubles shared by the TUI unit tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use breezybrief_api::{AirportSearch, ApiClient, ForecastClient};
use breezybrief_core::{AirportSuggestion, AppConfig};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio_util::sync::CancellationToken;

use crate::app::App;
use crate::app::async_tasks::AsyncResult;
use crate::autocomplete::SearchOutcome;

type Responder = Box<dyn Fn(&str) -> Vec<AirportSuggestion> + Send + Sync>;

/// Records every query and answers from a closure, optionally after a delay
/// that ignores cancellation (like a transport that cannot abort).
pub struct MockSearch {
    calls: Mutex<Vec<String>>,
    delay: Duration,
    respond: Responder,
}

impl MockSearch {
    pub fn new(respond: impl Fn(&str) -> Vec<AirportSuggestion> + Send + Sync + 'static) -> Arc<Self> {
        Self::slow(Duration::ZERO, respond)
    }

    pub fn slow(
        delay: Duration,
        respond: impl Fn(&str) -> Vec<AirportSuggestion> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            delay,
            respond: Box::new(respond),
        })
    }

    /// Always answers with the given codes.
    pub fn with_codes(codes: &[&str]) -> Arc<Self> {
        let codes: Vec<String> = codes.iter().map(|c| c.to_string()).collect();
        Self::new(move |_| codes.iter().map(|c| airport(c)).collect())
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl AirportSearch for MockSearch {
    async fn search(&self, query: &str, _cancel: &CancellationToken) -> Vec<AirportSuggestion> {
        self.calls.lock().unwrap().push(query.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        (self.respond)(query)
    }
}

pub fn airport(icao: &str) -> AirportSuggestion {
    AirportSuggestion {
        name: Some(format!("{icao} Airport")),
        ..AirportSuggestion::new(icao)
    }
}

/// Wait for the next suggestions message, failing after five (virtual) seconds.
pub async fn next_suggestions(rx: &mut UnboundedReceiver<AsyncResult>) -> SearchOutcome {
    match tokio::time::timeout(Duration::from_secs(5), rx.recv()).await {
        Ok(Some(AsyncResult::Suggestions(outcome))) => outcome,
        Ok(other) => panic!("expected suggestions, got {other:?}"),
        Err(_) => panic!("no suggestions arrived"),
    }
}

/// An app whose searches answer `KATL`/`KATW` and whose forecast host refuses
/// connections.
pub fn test_app() -> App {
    let client = ApiClient::new("http://127.0.0.1:9", "breezybrief-test").unwrap();
    App::new(
        AppConfig::default(),
        MockSearch::with_codes(&["KATL", "KATW"]),
        ForecastClient::new(client),
    )
}

/// Let the debounce elapse and apply whatever the background tasks sent.
pub async fn settle(app: &mut App) {
    for _ in 0..10 {
        tokio::time::sleep(Duration::from_millis(100)).await;
        app.drain_async();
    }
}
