//! # API Client Core
//!
//! Thin wrapper around `reqwest::Client` that owns the base URL and bearer
//! token, applies the envelope contract to every response, and exposes the
//! verbs the endpoint modules build on.

use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::envelope::{ApiEnvelope, PageOf};
use crate::error::{ClientError, ClientResult};

/// Default per-request timeout.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Query parameters common to every list endpoint.
#[derive(Debug, Clone, Default)]
pub struct ListParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
}

impl ListParams {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(page) = self.page {
            query.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            query.push(("search", search.to_string()));
        }
        query
    }
}

/// The upstream API client. Cheap to clone; the inner `reqwest::Client`
/// pools connections.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Builds a client for the given base URL, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> ClientResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Sends one request and decodes the envelope. A non-2xx status or a
    /// `success: false` envelope both surface as errors.
    async fn send<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> ClientResult<ApiEnvelope<T>> {
        let url = self.url(path);
        debug!(%method, %url, "api request");

        let mut request = self.http.request(method, &url).query(query);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "api request failed");
            return Err(ClientError::Status {
                status: status.as_u16(),
                message: extract_message(&text, status),
            });
        }

        let envelope: ApiEnvelope<T> = serde_json::from_str(&text)?;
        if !envelope.success {
            return Err(ClientError::Rejected {
                message: envelope
                    .message
                    .unwrap_or_else(|| "no reason given".to_string()),
            });
        }

        Ok(envelope)
    }

    /// GET returning the envelope's required data payload.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let envelope = self
            .send::<T, ()>(Method::GET, path, &[], None)
            .await?;
        envelope.data.ok_or(ClientError::MissingData)
    }

    /// GET for a list endpoint: items plus pagination metadata.
    pub async fn get_page<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &ListParams,
    ) -> ClientResult<PageOf<T>> {
        let envelope = self
            .send::<Vec<T>, ()>(Method::GET, path, &params.to_query(), None)
            .await?;
        Ok(PageOf {
            items: envelope.data.unwrap_or_default(),
            pagination: envelope.pagination,
        })
    }

    /// POST a body, returning the created resource.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let envelope = self.send(Method::POST, path, &[], Some(body)).await?;
        envelope.data.ok_or(ClientError::MissingData)
    }

    /// PUT a body, returning the updated resource.
    pub async fn put<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let envelope = self.send(Method::PUT, path, &[], Some(body)).await?;
        envelope.data.ok_or(ClientError::MissingData)
    }

    /// DELETE; succeeds on a `success: true` envelope regardless of payload.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        self.send::<serde_json::Value, ()>(Method::DELETE, path, &[], None)
            .await?;
        Ok(())
    }
}

/// Pulls a human-readable message out of an error body, falling back to the
/// status reason. Error bodies usually follow the envelope shape too.
fn extract_message(body: &str, status: StatusCode) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    status
        .canonical_reason()
        .unwrap_or("unknown error")
        .to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = ApiClient::new("http://localhost:5000/api/", None).unwrap();
        assert_eq!(client.url("/company"), "http://localhost:5000/api/company");
        assert_eq!(client.url("company"), "http://localhost:5000/api/company");
    }

    #[test]
    fn test_list_params_query() {
        let params = ListParams {
            page: Some(2),
            limit: Some(25),
            search: Some("cotton".to_string()),
        };
        let query = params.to_query();
        assert!(query.contains(&("page", "2".to_string())));
        assert!(query.contains(&("limit", "25".to_string())));
        assert!(query.contains(&("search", "cotton".to_string())));

        // Empty search is omitted entirely.
        let params = ListParams {
            search: Some(String::new()),
            ..Default::default()
        };
        assert!(params.to_query().is_empty());
    }

    #[test]
    fn test_extract_message() {
        assert_eq!(
            extract_message(
                r#"{"success": false, "message": "token expired"}"#,
                StatusCode::UNAUTHORIZED
            ),
            "token expired"
        );
        assert_eq!(
            extract_message("<html>nope</html>", StatusCode::BAD_GATEWAY),
            "Bad Gateway"
        );
    }
}
