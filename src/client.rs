//! HTTP JSON client shared by all provider lookups
//!
//! Every outbound call in this crate is a single GET returning a JSON body.
//! The [`JsonClient`] trait is the seam used by unit tests; [`HttpJsonClient`]
//! is the reqwest-backed implementation used everywhere else.

use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Abstraction over "GET this URL and give me JSON"
#[async_trait]
pub trait JsonClient: Send + Sync {
    /// Perform a GET request and parse the response body as JSON
    async fn get_json(&self, url: &str) -> Result<serde_json::Value>;
}

impl dyn JsonClient + '_ {
    /// GET a URL and deserialize the JSON body into a concrete type
    pub async fn get_json_as<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let value = self.get_json(url).await?;
        serde_json::from_value(value)
            .map_err(|e| AppError::parse(format!("Unexpected response shape from {}: {}", url, e)))
    }
}

/// reqwest-backed JSON client
#[derive(Debug, Clone)]
pub struct HttpJsonClient {
    client: Client,
}

impl HttpJsonClient {
    /// Create a client with the default timeout
    pub fn new() -> Result<Self> {
        Self::with_timeout(crate::defaults::DEFAULT_TIMEOUT)
    }

    /// Create a client with a custom request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Access the underlying reqwest client (the latency probe issues raw
    /// GETs through it without JSON parsing)
    pub fn inner(&self) -> &Client {
        &self.client
    }
}

#[async_trait]
impl JsonClient for HttpJsonClient {
    async fn get_json(&self, url: &str) -> Result<serde_json::Value> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::network(format!("GET {} failed: {}", url, e)))?;

        let body = response
            .text()
            .await
            .map_err(|e| AppError::network(format!("Failed to read body from {}: {}", url, e)))?;

        serde_json::from_str(&body)
            .map_err(|e| AppError::parse(format!("Non-JSON body from {}: {}", url, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_client_creation() {
        assert!(HttpJsonClient::new().is_ok());
        assert!(HttpJsonClient::with_timeout(Duration::from_secs(3)).is_ok());
    }

    #[tokio::test]
    async fn test_get_json_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/ip"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ip": "203.0.113.9"
            })))
            .mount(&server)
            .await;

        let client = HttpJsonClient::new().unwrap();
        let value = client.get_json(&format!("{}/ip", server.uri())).await.unwrap();
        assert_eq!(value["ip"], "203.0.113.9");
    }

    #[tokio::test]
    async fn test_get_json_non_json_body_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/html"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>nope</html>"))
            .mount(&server)
            .await;

        let client = HttpJsonClient::new().unwrap();
        let err = client
            .get_json(&format!("{}/html", server.uri()))
            .await
            .unwrap_err();
        assert_eq!(err.category(), "PARSE");
    }

    #[tokio::test]
    async fn test_get_json_transport_failure_is_network_error() {
        let client = HttpJsonClient::with_timeout(Duration::from_millis(500)).unwrap();
        // TEST-NET-1 address, nothing listens there
        let err = client
            .get_json("http://192.0.2.1:9/ip")
            .await
            .unwrap_err();
        assert_eq!(err.category(), "NETWORK");
    }

    #[tokio::test]
    async fn test_get_json_as_typed_via_trait_object() {
        #[derive(serde::Deserialize)]
        struct Echo {
            ip: String,
        }

        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/echo"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "ip": "198.51.100.4"
            })))
            .mount(&server)
            .await;

        let client = HttpJsonClient::new().unwrap();
        let client: &dyn JsonClient = &client;
        let echo: Echo = client
            .get_json_as(&format!("{}/echo", server.uri()))
            .await
            .unwrap();
        assert_eq!(echo.ip, "198.51.100.4");
    }
}
