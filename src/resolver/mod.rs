//! Domain resolution via DNS-over-HTTPS
//!
//! Issues a single JSON query against a Google-style DoH endpoint
//! (`/resolve?name=<domain>`) and returns the data field of the first
//! answer record.

use crate::client::JsonClient;
use crate::error::{AppError, Result};
use serde::Deserialize;

/// Default DNS-over-HTTPS endpoint
pub const DEFAULT_DOH_ENDPOINT: &str = "https://dns.google/resolve";

/// Response shape of a Google-style DoH JSON query. Only the fields this
/// crate reads are modeled; everything else is ignored.
#[derive(Debug, Deserialize)]
pub struct DohResponse {
    #[serde(rename = "Answer", default)]
    pub answer: Vec<DohAnswer>,
}

/// Single answer record from a DoH response
#[derive(Debug, Deserialize)]
pub struct DohAnswer {
    pub name: Option<String>,
    pub data: String,
}

/// Resolves domain names through a DNS-over-HTTPS endpoint
#[derive(Debug, Clone)]
pub struct DomainResolver {
    endpoint: String,
}

impl DomainResolver {
    /// Create a resolver against the default DoH endpoint
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_DOH_ENDPOINT.to_string(),
        }
    }

    /// Create a resolver against a custom DoH endpoint
    pub fn with_endpoint<S: Into<String>>(endpoint: S) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }

    /// The query URL for a given domain
    pub fn query_url(&self, domain: &str) -> String {
        format!("{}?name={}", self.endpoint, domain)
    }

    /// Resolve a domain to the first answer record's data (an address string).
    ///
    /// The domain is passed through to the resolver unvalidated; a missing or
    /// empty answer list is reported as [`AppError::NoRecords`].
    pub async fn resolve(&self, client: &dyn JsonClient, domain: &str) -> Result<String> {
        let response: DohResponse = client.get_json_as(&self.query_url(domain)).await?;

        response
            .answer
            .into_iter()
            .next()
            .map(|answer| answer.data)
            .ok_or_else(|| AppError::no_records(domain))
    }
}

impl Default for DomainResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// JsonClient fake returning a canned value regardless of URL
    struct CannedClient {
        value: serde_json::Value,
    }

    #[async_trait]
    impl JsonClient for CannedClient {
        async fn get_json(&self, _url: &str) -> Result<serde_json::Value> {
            Ok(self.value.clone())
        }
    }

    #[test]
    fn test_query_url_construction() {
        let resolver = DomainResolver::new();
        assert_eq!(
            resolver.query_url("example.com"),
            "https://dns.google/resolve?name=example.com"
        );

        let resolver = DomainResolver::with_endpoint("http://127.0.0.1:8053/resolve");
        assert_eq!(
            resolver.query_url("example.com"),
            "http://127.0.0.1:8053/resolve?name=example.com"
        );
    }

    #[tokio::test]
    async fn test_resolve_returns_first_answer() {
        let client = CannedClient {
            value: serde_json::json!({
                "Status": 0,
                "Answer": [
                    { "name": "example.com.", "type": 1, "TTL": 300, "data": "93.184.216.34" },
                    { "name": "example.com.", "type": 1, "TTL": 300, "data": "93.184.216.35" }
                ]
            }),
        };

        let resolver = DomainResolver::new();
        let ip = resolver.resolve(&client, "example.com").await.unwrap();
        assert_eq!(ip, "93.184.216.34");
    }

    #[tokio::test]
    async fn test_resolve_empty_answer_is_no_records() {
        let client = CannedClient {
            value: serde_json::json!({ "Status": 3, "Answer": [] }),
        };

        let resolver = DomainResolver::new();
        let err = resolver
            .resolve(&client, "nosuchdomain.invalid")
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NoRecords(ref d) if d == "nosuchdomain.invalid"));
    }

    #[tokio::test]
    async fn test_resolve_missing_answer_field_is_no_records() {
        let client = CannedClient {
            value: serde_json::json!({ "Status": 3 }),
        };

        let resolver = DomainResolver::new();
        let err = resolver.resolve(&client, "example.com").await.unwrap_err();
        assert!(matches!(err, AppError::NoRecords(_)));
    }

    #[tokio::test]
    async fn test_resolve_malformed_body_is_parse_error() {
        let client = CannedClient {
            value: serde_json::json!({ "Answer": "not-a-list" }),
        };

        let resolver = DomainResolver::new();
        let err = resolver.resolve(&client, "example.com").await.unwrap_err();
        assert_eq!(err.category(), "PARSE");
    }
}
