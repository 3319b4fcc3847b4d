//! netcheck
//!
//! A network diagnostics tool: resolves domains over DNS-over-HTTPS, looks
//! up the caller's public IP from one of two echo services, geolocates
//! addresses via one of two providers, and runs an informal latency probe
//! against a fixed set of well-known sites.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod probe;
pub mod providers;
pub mod resolver;

// Re-export commonly used types
pub use client::{HttpJsonClient, JsonClient};
pub use error::{AppError, Result};
pub use probe::{LatencyProbe, LatencyTier, ProbeResult, ProbeTarget};
pub use providers::{AddressFamily, GeoProvider, GeoRecord, IpProvider};
pub use resolver::DomainResolver;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    use std::time::Duration;

    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    /// Fixed latency probe targets. The list never changes at runtime;
    /// result rows are keyed by the name column.
    pub const SPEED_TEST_TARGETS: &[(&str, &str)] = &[
        ("Google", "https://www.google.com/favicon.ico"),
        ("Baidu", "https://www.baidu.com/favicon.ico"),
        ("Facebook", "https://www.facebook.com/favicon.ico"),
        ("Twitter", "https://twitter.com/favicon.ico"),
        ("Amazon", "https://www.amazon.com/favicon.ico"),
        ("Microsoft", "https://www.microsoft.com/favicon.ico"),
    ];
}

/// Build the default probe target list
pub fn default_probe_targets() -> Vec<ProbeTarget> {
    defaults::SPEED_TEST_TARGETS
        .iter()
        .map(|(name, url)| ProbeTarget::new(*name, *url))
        .collect()
}
