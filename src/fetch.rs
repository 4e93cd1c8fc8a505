//! HTTP JSON fetching with failure classification.
//!
//! One GET per call, bounded by the client's timeout, decoded straight into
//! the caller's record type. Failures are sorted into the run's diagnostics:
//! a 404 is the only hard error (the resource genuinely is not there); rate
//! limiting, transport faults, and undecodable bodies are soft warnings.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::diagnostics::Diagnostics;

/// Identifying user agent sent with every registry/API request.
pub const USER_AGENT: &str = "pkglens/0.1.0";

/// Default per-request deadline.
pub const HTTP_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(10);

/// Build the shared HTTP client used by the registry adapters and the GitHub
/// fallback path.
pub fn client() -> reqwest::Result<Client> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(HTTP_TIMEOUT)
        .build()
}

/// GET `url` and decode the JSON body into `T`.
///
/// Returns `None` on any failure, after recording it:
/// 404 → error, 403 → warning (likely rate limiting), other HTTP status →
/// warning, network fault → warning, malformed body → warning. Never errors.
pub async fn fetch_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    diag: &mut Diagnostics,
) -> Option<T> {
    debug!(url, "fetching json");

    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(err) => {
            diag.warn(format!("Network error fetching {url}: {err}"));
            return None;
        }
    };

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        diag.error(format!("Resource not found: {url}"));
        return None;
    }
    if status == StatusCode::FORBIDDEN {
        diag.warn(format!("Access forbidden (rate limit?): {url}"));
        return None;
    }
    if !status.is_success() {
        diag.warn(format!("HTTP {} error fetching {url}", status.as_u16()));
        return None;
    }

    match response.json::<T>().await {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            diag.warn(format!("Invalid JSON from {url}: {err}"));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn server_with(status: u16, body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/data"))
            .respond_with(ResponseTemplate::new(status).set_body_string(body.to_string()))
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_success_returns_parsed_body() {
        let server = server_with(200, r#"{"name": "serde"}"#).await;
        let client = client().unwrap();
        let mut diag = Diagnostics::default();

        let result: Option<Value> =
            fetch_json(&client, &format!("{}/data", server.uri()), &mut diag).await;

        assert_eq!(result.unwrap()["name"], "serde");
        assert!(diag.errors.is_empty());
        assert!(diag.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_404_is_exactly_one_error() {
        let server = server_with(404, "").await;
        let client = client().unwrap();
        let mut diag = Diagnostics::default();

        let result: Option<Value> =
            fetch_json(&client, &format!("{}/data", server.uri()), &mut diag).await;

        assert!(result.is_none());
        assert_eq!(diag.errors.len(), 1);
        assert!(diag.errors[0].starts_with("Resource not found:"));
        assert!(diag.warnings.is_empty());
    }

    #[tokio::test]
    async fn test_403_is_exactly_one_warning() {
        let server = server_with(403, "").await;
        let client = client().unwrap();
        let mut diag = Diagnostics::default();

        let result: Option<Value> =
            fetch_json(&client, &format!("{}/data", server.uri()), &mut diag).await;

        assert!(result.is_none());
        assert!(diag.errors.is_empty());
        assert_eq!(diag.warnings.len(), 1);
        assert!(diag.warnings[0].contains("rate limit?"));
    }

    #[tokio::test]
    async fn test_other_http_error_warns() {
        let server = server_with(500, "").await;
        let client = client().unwrap();
        let mut diag = Diagnostics::default();

        let result: Option<Value> =
            fetch_json(&client, &format!("{}/data", server.uri()), &mut diag).await;

        assert!(result.is_none());
        assert!(diag.errors.is_empty());
        assert_eq!(diag.warnings.len(), 1);
        assert!(diag.warnings[0].starts_with("HTTP 500"));
    }

    #[tokio::test]
    async fn test_malformed_json_warns() {
        let server = server_with(200, "not json at all").await;
        let client = client().unwrap();
        let mut diag = Diagnostics::default();

        let result: Option<Value> =
            fetch_json(&client, &format!("{}/data", server.uri()), &mut diag).await;

        assert!(result.is_none());
        assert!(diag.errors.is_empty());
        assert_eq!(diag.warnings.len(), 1);
        assert!(diag.warnings[0].starts_with("Invalid JSON from"));
    }

    #[tokio::test]
    async fn test_network_failure_warns() {
        // Nothing listens on this port.
        let client = client().unwrap();
        let mut diag = Diagnostics::default();

        let result: Option<Value> =
            fetch_json(&client, "http://127.0.0.1:1/data", &mut diag).await;

        assert!(result.is_none());
        assert!(diag.errors.is_empty());
        assert_eq!(diag.warnings.len(), 1);
        assert!(diag.warnings[0].starts_with("Network error fetching"));
    }
}
