//! Terminal rendering of diagnostic results
//!
//! Key/value tables for geolocation records, an incrementally updated
//! latency table for the speed test, and one-line results for the resolve
//! and public-IP flows. Colors come from the `colored` crate and are
//! suppressed entirely when color output is disabled.

use crate::probe::{LatencyTier, ProbeResult};
use crate::providers::GeoRecord;
use colored::{Color, ColoredString, Colorize};
use std::fmt::Write as _;

/// Renders results for the terminal
#[derive(Debug, Clone)]
pub struct ReportFormatter {
    enable_color: bool,
}

impl ReportFormatter {
    pub fn new(enable_color: bool) -> Self {
        Self { enable_color }
    }

    /// Apply color to text if colors are enabled
    fn colorize(&self, text: &str, color: Color) -> ColoredString {
        if self.enable_color {
            text.color(color)
        } else {
            text.normal()
        }
    }

    /// Apply bold formatting if colors are enabled
    fn bold(&self, text: &str) -> ColoredString {
        if self.enable_color {
            text.bold()
        } else {
            text.normal()
        }
    }

    /// One-line result for a successful domain resolution
    pub fn format_resolved(&self, domain: &str, ip: &str) -> String {
        format!(
            "Domain {} resolved successfully\nIP: {}",
            self.bold(domain),
            self.colorize(ip, Color::Cyan)
        )
    }

    /// One-line result for a public-IP lookup
    pub fn format_public_ip(&self, provider: &str, ip: &str) -> String {
        format!(
            "Your public IP ({}): {}",
            provider,
            self.colorize(ip, Color::Cyan)
        )
    }

    /// Key/value table for a geolocation record. Fields render in response
    /// order; empty values show as "-".
    pub fn format_geo_table(&self, record: &GeoRecord) -> String {
        if record.is_empty() {
            return "The geolocation provider returned no information.".to_string();
        }

        let key_width = record
            .entries()
            .map(|(key, _)| key.len())
            .max()
            .unwrap_or(0)
            .max("Information".len());

        // Pad before styling; ANSI escapes would defeat width formatting
        let mut output = String::new();
        let _ = writeln!(
            output,
            "{}  {}",
            self.bold(&format!("{:<width$}", "Information", width = key_width)),
            self.bold("Value"),
        );
        let _ = writeln!(output, "{}", "-".repeat(key_width + 2 + 24));

        for (key, value) in record.entries() {
            let _ = writeln!(output, "{:<width$}  {}", key, value, width = key_width);
        }

        output
    }

    /// Header line for the speed test table
    pub fn speedtest_header(&self) -> String {
        format!(
            "{}  {}",
            self.bold(&format!("{:<12}", "Website")),
            self.bold("Latency")
        )
    }

    /// Single settlement row, colored by latency tier. Failed settlements
    /// always render as "Access failed" in red, whatever their duration.
    pub fn format_probe_row(&self, result: &ProbeResult) -> String {
        let cell = match result.tier() {
            LatencyTier::Failed => self.colorize("Access failed", Color::Red),
            tier => self.colorize(&format!("{:.2} ms", result.duration_ms), tier.color()),
        };
        format!("{:<12}  {}", result.name, cell)
    }

    /// Footnote shown under the speed test table
    pub fn speedtest_footnote(&self) -> String {
        "Note: Latency values are for reference only. Actual values may be lower.".to_string()
    }
}
