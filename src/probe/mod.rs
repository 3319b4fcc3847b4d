//! Site latency probe
//!
//! Fires one cache-busted GET per target, all targets at once, and reports
//! each settlement through an mpsc channel as it happens. Both transport
//! success and failure count as a settlement; failure is expected data, not
//! an error. There is no retry, no ordering between targets, and no
//! aggregate completion signal beyond the channel closing once every probe
//! has reported.

use crate::error::{AppError, Result};
use colored::Color;
use reqwest::Client;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Default per-probe transport timeout. The probe layer itself never times
/// settlements out; a timeout surfaces as a failed settlement like any other
/// transport error.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(15);

/// Latency classification thresholds in milliseconds
pub const FAST_THRESHOLD_MS: f64 = 300.0;
pub const MODERATE_THRESHOLD_MS: f64 = 500.0;

/// A single probe target. The target list is fixed at probe construction and
/// never mutated while probes are in flight; `name` is the identity results
/// are keyed by.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeTarget {
    pub name: String,
    pub url: String,
}

impl ProbeTarget {
    pub fn new<N: Into<String>, U: Into<String>>(name: N, url: U) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Outcome of a single settled probe
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    /// Name of the target this settlement belongs to
    pub name: String,
    /// Elapsed wall-clock time from probe start to settlement, 2-decimal ms
    pub duration_ms: f64,
    /// Whether the transfer completed. This mirrors "the fetch finished",
    /// not a verified HTTP status.
    pub success: bool,
}

impl ProbeResult {
    /// Classify this settlement into a latency tier
    pub fn tier(&self) -> LatencyTier {
        LatencyTier::classify(self)
    }
}

/// Display tier for a settled probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LatencyTier {
    /// Under 300 ms
    Fast,
    /// 300 to under 500 ms
    Moderate,
    /// 500 ms and above
    Slow,
    /// The transfer did not complete, irrespective of duration
    Failed,
}

impl LatencyTier {
    /// Classify a settlement. Failure wins over any duration value.
    pub fn classify(result: &ProbeResult) -> Self {
        if !result.success {
            return Self::Failed;
        }
        Self::from_duration_ms(result.duration_ms)
    }

    /// Classify a successful settlement by duration alone
    pub fn from_duration_ms(duration_ms: f64) -> Self {
        if duration_ms < FAST_THRESHOLD_MS {
            Self::Fast
        } else if duration_ms < MODERATE_THRESHOLD_MS {
            Self::Moderate
        } else {
            Self::Slow
        }
    }

    /// Terminal color used when rendering this tier
    pub fn color(&self) -> Color {
        match self {
            Self::Fast => Color::Green,
            Self::Moderate => Color::Yellow,
            Self::Slow | Self::Failed => Color::Red,
        }
    }
}

/// Append a cache-busting timestamp parameter to a probe URL so repeated
/// runs do not measure a local or browser-style cache. Upstream CDN caches
/// are not defeated by this.
pub fn cache_busted_url(url: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{}{}t={}", url, separator, chrono::Utc::now().timestamp_millis())
}

/// Concurrent fire-and-settle latency probe over a fixed target list
pub struct LatencyProbe {
    client: Client,
    targets: Vec<ProbeTarget>,
}

impl LatencyProbe {
    /// Create a probe with the default transport timeout
    pub fn new(targets: Vec<ProbeTarget>) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_PROBE_TIMEOUT)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| AppError::network(format!("Failed to create probe client: {}", e)))?;

        Ok(Self { client, targets })
    }

    /// Create a probe reusing an existing reqwest client
    pub fn with_client(client: Client, targets: Vec<ProbeTarget>) -> Self {
        Self { client, targets }
    }

    /// The targets this probe will fire at
    pub fn targets(&self) -> &[ProbeTarget] {
        &self.targets
    }

    /// Launch every probe at once and return the settlement stream.
    ///
    /// Each target produces exactly one [`ProbeResult`], in whatever order
    /// the network settles them. The channel closes after the last
    /// settlement. If the receiver is dropped early, late settlements are
    /// discarded silently.
    pub fn run(&self) -> mpsc::Receiver<ProbeResult> {
        let (tx, rx) = mpsc::channel(self.targets.len().max(1));

        for target in self.targets.iter().cloned() {
            let client = self.client.clone();
            let tx = tx.clone();

            tokio::spawn(async move {
                let url = cache_busted_url(&target.url);
                let started = Instant::now();

                // A settlement is the full transfer finishing, success or
                // not; the response body is discarded and the status line is
                // deliberately not inspected.
                let success = match client.get(&url).send().await {
                    Ok(response) => response.bytes().await.is_ok(),
                    Err(_) => false,
                };

                let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
                let result = ProbeResult {
                    name: target.name,
                    duration_ms: round_two_decimals(elapsed_ms),
                    success,
                };

                let _ = tx.send(result).await;
            });
        }

        rx
    }
}

/// Round to the 2-decimal millisecond precision settlements are reported in
fn round_two_decimals(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settled(name: &str, duration_ms: f64, success: bool) -> ProbeResult {
        ProbeResult {
            name: name.to_string(),
            duration_ms,
            success,
        }
    }

    #[test]
    fn test_tier_boundaries_exact() {
        assert_eq!(
            settled("a", 299.0, true).tier(),
            LatencyTier::Fast
        );
        assert_eq!(
            settled("a", 300.0, true).tier(),
            LatencyTier::Moderate
        );
        assert_eq!(
            settled("a", 499.0, true).tier(),
            LatencyTier::Moderate
        );
        assert_eq!(
            settled("a", 500.0, true).tier(),
            LatencyTier::Slow
        );
    }

    #[test]
    fn test_failure_wins_over_duration() {
        assert_eq!(settled("a", 12.0, false).tier(), LatencyTier::Failed);
        assert_eq!(settled("a", 9999.0, false).tier(), LatencyTier::Failed);
        assert_eq!(settled("a", 0.0, false).tier(), LatencyTier::Failed);
    }

    #[test]
    fn test_cache_busting_appends_timestamp() {
        let url = cache_busted_url("https://www.example.com/favicon.ico");
        assert!(url.starts_with("https://www.example.com/favicon.ico?t="));

        let token = url.rsplit("t=").next().unwrap();
        assert!(token.parse::<i64>().is_ok());
    }

    #[test]
    fn test_cache_busting_preserves_existing_query() {
        let url = cache_busted_url("https://api.example.com/img?size=16");
        assert!(url.starts_with("https://api.example.com/img?size=16&t="));
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        assert_eq!(round_two_decimals(123.456789), 123.46);
        assert_eq!(round_two_decimals(0.004), 0.0);
        assert_eq!(round_two_decimals(299.995), 300.0);
    }

    #[tokio::test]
    async fn test_every_target_settles_exactly_once() {
        let server = MockServer::start().await;
        let names = ["google", "baidu", "facebook", "twitter", "amazon", "microsoft"];

        for name in names {
            Mock::given(method("GET"))
                .and(path(format!("/{}/favicon.ico", name)))
                .respond_with(ResponseTemplate::new(200).set_body_bytes(b"icon".to_vec()))
                .mount(&server)
                .await;
        }

        let targets = names
            .iter()
            .map(|name| {
                ProbeTarget::new(*name, format!("{}/{}/favicon.ico", server.uri(), name))
            })
            .collect();

        let probe = LatencyProbe::new(targets).unwrap();
        let mut rx = probe.run();

        let mut seen = HashSet::new();
        while let Some(result) = rx.recv().await {
            assert!(result.success, "probe {} should settle successfully", result.name);
            assert!(result.duration_ms >= 0.0);
            assert!(
                seen.insert(result.name.clone()),
                "duplicate settlement for {}",
                result.name
            );
        }

        assert_eq!(seen.len(), names.len());
    }

    #[tokio::test]
    async fn test_failed_transfer_settles_as_data() {
        let client = Client::builder()
            .timeout(Duration::from_millis(800))
            .build()
            .unwrap();
        // TEST-NET-1: guaranteed unreachable
        let probe = LatencyProbe::with_client(
            client,
            vec![ProbeTarget::new("unreachable", "http://192.0.2.1:9/favicon.ico")],
        );

        let mut rx = probe.run();
        let result = rx.recv().await.expect("failed probe must still settle");
        assert!(!result.success);
        assert!(result.duration_ms >= 0.0);
        assert_eq!(result.tier(), LatencyTier::Failed);
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_duration_reflects_elapsed_wall_time() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/slow"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(Duration::from_millis(120)),
            )
            .mount(&server)
            .await;

        let probe = LatencyProbe::new(vec![ProbeTarget::new(
            "slow",
            format!("{}/slow", server.uri()),
        )])
        .unwrap();

        let mut rx = probe.run();
        let result = rx.recv().await.unwrap();
        assert!(result.success);
        assert!(
            result.duration_ms >= 100.0,
            "settlement after a 120ms delay reported {}ms",
            result.duration_ms
        );
    }

    #[tokio::test]
    async fn test_dropped_receiver_discards_late_settlements() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/late"))
            .respond_with(
                ResponseTemplate::new(200).set_delay(Duration::from_millis(150)),
            )
            .mount(&server)
            .await;

        let probe = LatencyProbe::new(vec![ProbeTarget::new(
            "late",
            format!("{}/late", server.uri()),
        )])
        .unwrap();

        let rx = probe.run();
        drop(rx);

        // The spawned probe settles into a closed channel without panicking.
        tokio::time::sleep(Duration::from_millis(300)).await;
    }

    proptest! {
        #[test]
        fn prop_classification_is_total(duration_ms in 0.0f64..3_600_000.0, success: bool) {
            let result = ProbeResult {
                name: "prop".to_string(),
                duration_ms,
                success,
            };

            let tier = result.tier();
            if !success {
                prop_assert_eq!(tier, LatencyTier::Failed);
            } else if duration_ms < 300.0 {
                prop_assert_eq!(tier, LatencyTier::Fast);
            } else if duration_ms < 500.0 {
                prop_assert_eq!(tier, LatencyTier::Moderate);
            } else {
                prop_assert_eq!(tier, LatencyTier::Slow);
            }
        }
    }
}
