//! Airport search: `GET /api/airports/search?q=<query>&limit=<n>`.
//!
//! Failures never escape this module. A bad status, an unreadable body or a
//! cancelled call all come back as an empty list so the dropdown simply
//! shows nothing.

use async_trait::async_trait;
use breezybrief_core::AirportSuggestion;
use breezybrief_core::icao;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::http::{ApiClient, RawResponse};

/// Default `limit` sent with every search.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Something that can turn a partial code into airport suggestions.
#[async_trait]
pub trait AirportSearch: Send + Sync {
    /// Search for `query` (already normalized).
    ///
    /// Returns an empty list for queries shorter than two characters, on any
    /// failure, and when `cancel` fires before the response arrives.
    async fn search(&self, query: &str, cancel: &CancellationToken) -> Vec<AirportSuggestion>;
}

/// [`AirportSearch`] backed by the BreezyBrief API.
#[derive(Debug, Clone)]
pub struct SuggestionFetcher {
    client: ApiClient,
    limit: usize,
}

impl SuggestionFetcher {
    pub fn new(client: ApiClient) -> Self {
        Self::with_limit(client, DEFAULT_SEARCH_LIMIT)
    }

    pub fn with_limit(client: ApiClient, limit: usize) -> Self {
        Self { client, limit }
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}?q={}&limit={}",
            self.client.url("/api/airports/search"),
            urlencoding::encode(query),
            self.limit
        )
    }

    async fn fetch(&self, query: &str) -> Vec<AirportSuggestion> {
        let url = self.search_url(query);
        debug!(%url, "airport search");

        let resp = match self.client.inner().get(&url).send().await {
            Ok(r) => RawResponse::read(r).await,
            Err(e) => {
                warn!(query, error = %e, "airport search failed");
                return Vec::new();
            }
        };

        if !resp.is_success() {
            debug!(query, status = resp.status, "airport search returned non-success");
            return Vec::new();
        }

        match serde_json::from_str::<Value>(&resp.body) {
            Ok(Value::Array(items)) => sanitize_suggestions(items),
            Ok(_) => {
                debug!(query, "airport search body is not an array");
                Vec::new()
            }
            Err(e) => {
                debug!(query, error = %e, "airport search body is not JSON");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl AirportSearch for SuggestionFetcher {
    async fn search(&self, query: &str, cancel: &CancellationToken) -> Vec<AirportSuggestion> {
        if !icao::is_searchable(query) {
            return Vec::new();
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!(query, "airport search cancelled");
                Vec::new()
            }
            results = self.fetch(query) => results,
        }
    }
}

/// Heliports are excluded from every result set.
pub fn is_usable_airport(airport: &AirportSuggestion) -> bool {
    airport.is_usable()
}

/// Turn raw JSON elements into the suggestions the UI may show.
///
/// Malformed elements are dropped individually; heliports are filtered; ICAO
/// codes are normalized and entries left without one are removed. Server
/// order is preserved.
pub fn sanitize_suggestions(items: Vec<Value>) -> Vec<AirportSuggestion> {
    items
        .into_iter()
        .filter_map(|v| serde_json::from_value::<AirportSuggestion>(v).ok())
        .filter(is_usable_airport)
        .map(AirportSuggestion::normalized)
        .filter(|a| !a.icao.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    async fn fetcher_for(server: &Server) -> SuggestionFetcher {
        SuggestionFetcher::new(ApiClient::new(&server.url(), "breezybrief-test").unwrap())
    }

    #[test]
    fn test_sanitize_filters_and_normalizes() {
        let items = vec![
            json!({"icao": " katl ", "iata": "ATL", "name": "Atlanta Intl", "type": "large_airport"}),
            json!({"icao": "KH01", "type": "HELIPORT"}),
            json!({"icao": "KH02", "name": "City Heliport"}),
            json!({"icao": "   ", "name": "Blank"}),
            json!({"name": "No code"}),
            json!({"icao": 42}),
            json!("not an object"),
            json!({"icao": "kden", "scheduled_service": true}),
        ];
        let out = sanitize_suggestions(items);
        let codes: Vec<&str> = out.iter().map(|a| a.icao.as_str()).collect();
        assert_eq!(codes, vec!["KATL", "KDEN"]);
        assert_eq!(out[0].iata.as_deref(), Some("ATL"));
    }

    #[tokio::test]
    async fn test_search_parses_array() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", "/api/airports/search")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("q".into(), "KAT".into()),
                Matcher::UrlEncoded("limit".into(), "10".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!([
                    {"icao": "katl", "name": "Hartsfield-Jackson", "city": "Atlanta", "state": "GA"},
                    {"icao": "KATH", "type": "heliport"},
                    {"icao": "KATW", "name": "Appleton"}
                ])
                .to_string(),
            )
            .expect(1)
            .create_async()
            .await;

        let fetcher = fetcher_for(&server).await;
        let results = fetcher.search("KAT", &CancellationToken::new()).await;
        let codes: Vec<&str> = results.iter().map(|a| a.icao.as_str()).collect();
        assert_eq!(codes, vec!["KATL", "KATW"]);
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_short_query_makes_no_request() {
        let mut server = Server::new_async().await;
        let m = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let fetcher = fetcher_for(&server).await;
        assert!(fetcher.search("K", &CancellationToken::new()).await.is_empty());
        assert!(fetcher.search("", &CancellationToken::new()).await.is_empty());
        m.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_yields_empty() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/airports/search")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("boom")
            .create_async()
            .await;

        let fetcher = fetcher_for(&server).await;
        assert!(fetcher.search("KA", &CancellationToken::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_non_array_body_yields_empty() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/airports/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"results": [{"icao": "KATL"}]}"#)
            .create_async()
            .await;

        let fetcher = fetcher_for(&server).await;
        assert!(fetcher.search("KA", &CancellationToken::new()).await.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_search_yields_empty() {
        let mut server = Server::new_async().await;
        let _m = server
            .mock("GET", "/api/airports/search")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"icao": "KATL"}]"#)
            .create_async()
            .await;

        let fetcher = fetcher_for(&server).await;
        let token = CancellationToken::new();
        token.cancel();
        assert!(fetcher.search("KATL", &token).await.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_empty() {
        let client = ApiClient::new("http://127.0.0.1:9", "breezybrief-test").unwrap();
        let fetcher = SuggestionFetcher::new(client);
        assert!(fetcher.search("KATL", &CancellationToken::new()).await.is_empty());
    }
}
