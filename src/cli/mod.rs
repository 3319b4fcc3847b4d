//! Command-line interface definition

use clap::{Parser, Subcommand};

/// netcheck - resolve domains, check your public IP, geolocate addresses,
/// and probe site latency
#[derive(Parser, Debug, Clone)]
#[command(name = "ntc")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Request timeout in seconds
    #[arg(short, long, global = true, value_parser = parse_duration, default_value_t = crate::defaults::DEFAULT_TIMEOUT.as_secs(), env = "NETCHECK_TIMEOUT_SECONDS")]
    pub timeout: u64,

    /// Force colored output
    #[arg(long, global = true)]
    pub color: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Public IP provider key (ipify, httpbin)
    #[arg(long, global = true, env = "NETCHECK_IP_PROVIDER")]
    pub ip_provider: Option<String>,

    /// Geolocation provider key (ipapi, ipinfo)
    #[arg(long, global = true, env = "NETCHECK_GEO_PROVIDER")]
    pub geo_provider: Option<String>,
}

/// Diagnostic flows, mirroring the tool's four controls. With no subcommand
/// the startup behavior runs: speed test plus public-IP lookup plus
/// geolocation.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Resolve a domain over DNS-over-HTTPS, then geolocate the address
    Resolve {
        /// Domain name to resolve
        domain: String,
    },

    /// Look up your public IP, then geolocate it
    Ip {
        /// Address family hint (v4 or v6); only ipify branches on it
        #[arg(long, default_value = "v4")]
        family: String,
    },

    /// Geolocate an IP address
    Geo {
        /// IP address to geolocate
        ip: String,
    },

    /// Probe latency to six well-known sites
    Speedtest,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }
        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }
}

/// Parse duration from seconds string
fn parse_duration(s: &str) -> Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid duration: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid duration: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Duration must be greater than 0".to_string())
            } else if secs > 300 {
                Err("Duration cannot exceed 300 seconds".to_string())
            } else {
                Ok(secs)
            }
        })
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }

    true
}
