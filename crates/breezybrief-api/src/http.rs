use std::sync::Arc;

use breezybrief_core::AppConfig;
use breezybrief_core::url::join_url;
use reqwest::header::CONTENT_TYPE;

use crate::error::{ApiError, Result};

/// Shared HTTP client bound to one API host.
///
/// Cheap to clone; the base URL is fixed at construction.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: Arc<str>,
}

impl ApiClient {
    pub fn new(base_url: &str, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .gzip(true)
            .build()
            .map_err(|e| ApiError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(&config.api.base_url, &config.api.user_agent)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path such as `/api/forecast`.
    pub fn url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    pub(crate) fn inner(&self) -> &reqwest::Client {
        &self.client
    }
}

/// Body of an HTTP response, read in full.
#[derive(Debug, Clone)]
pub(crate) struct RawResponse {
    pub status: u16,
    pub is_json: bool,
    pub body: String,
}

impl RawResponse {
    pub(crate) async fn read(resp: reqwest::Response) -> Self {
        let status = resp.status().as_u16();
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.contains("application/json"));
        let body = resp.text().await.unwrap_or_default();
        Self {
            status,
            is_json,
            body,
        }
    }

    pub(crate) fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_paths() {
        let client = ApiClient::new("http://api.test/", "test").unwrap();
        assert_eq!(client.base_url(), "http://api.test");
        assert_eq!(client.url("/api/forecast"), "http://api.test/api/forecast");
        assert_eq!(
            client.url("api/airports/search"),
            "http://api.test/api/airports/search"
        );
    }
}
