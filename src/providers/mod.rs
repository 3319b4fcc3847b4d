//! Public-IP and geolocation provider registries
//!
//! The original tool dispatched providers through string-keyed maps; here
//! each registry is a closed enum so an unrecognized selector is a typed
//! [`AppError::UnknownProvider`] instead of a lookup fault.

use crate::client::JsonClient;
use crate::error::{AppError, Result};
use std::fmt;
use std::str::FromStr;

/// ipify endpoints; the v6 host also answers v4-only clients
pub const IPIFY_V4_ENDPOINT: &str = "https://api.ipify.org?format=json";
pub const IPIFY_V6_ENDPOINT: &str = "https://api64.ipify.org?format=json";

/// httpbin IP echo endpoint (no address-family variant)
pub const HTTPBIN_ENDPOINT: &str = "https://httpbin.org/ip";

/// Geolocation endpoint bases
pub const IPAPI_BASE: &str = "https://ipapi.co";
pub const IPINFO_BASE: &str = "https://ipinfo.io";

/// Address family hint for public-IP lookups
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressFamily {
    #[default]
    V4,
    V6,
}

impl FromStr for AddressFamily {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "v4" | "4" | "ipv4" => Ok(Self::V4),
            "v6" | "6" | "ipv6" => Ok(Self::V6),
            other => Err(AppError::validation(format!(
                "Invalid address family '{}' (expected v4 or v6)",
                other
            ))),
        }
    }
}

impl fmt::Display for AddressFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::V4 => write!(f, "v4"),
            Self::V6 => write!(f, "v6"),
        }
    }
}

/// "What is my IP" provider registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IpProvider {
    #[default]
    Ipify,
    Httpbin,
}

impl IpProvider {
    /// Selector keys accepted by [`FromStr`]
    pub const EXPECTED_KEYS: &'static str = "ipify, httpbin";

    /// Selector key for this provider
    pub fn key(&self) -> &'static str {
        match self {
            Self::Ipify => "ipify",
            Self::Httpbin => "httpbin",
        }
    }

    /// Endpoint queried for the given address family. Only ipify branches on
    /// the family hint; httpbin has a single endpoint.
    pub fn endpoint(&self, family: AddressFamily) -> &'static str {
        match (self, family) {
            (Self::Ipify, AddressFamily::V4) => IPIFY_V4_ENDPOINT,
            (Self::Ipify, AddressFamily::V6) => IPIFY_V6_ENDPOINT,
            (Self::Httpbin, _) => HTTPBIN_ENDPOINT,
        }
    }

    /// JSON field carrying the caller's address in this provider's response
    fn address_field(&self) -> &'static str {
        match self {
            Self::Ipify => "ip",
            Self::Httpbin => "origin",
        }
    }

    /// Query the provider for the caller's public IP address
    pub async fn lookup(&self, client: &dyn JsonClient, family: AddressFamily) -> Result<String> {
        self.lookup_at(client, self.endpoint(family)).await
    }

    /// Query a specific endpoint, extracting this provider's address field.
    /// Split out so tests can point a provider at a mock server.
    pub async fn lookup_at(&self, client: &dyn JsonClient, url: &str) -> Result<String> {
        let value = client.get_json(url).await?;
        value
            .get(self.address_field())
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                AppError::parse(format!(
                    "Response from {} is missing string field '{}'",
                    url,
                    self.address_field()
                ))
            })
    }
}

impl FromStr for IpProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ipify" => Ok(Self::Ipify),
            "httpbin" => Ok(Self::Httpbin),
            other => Err(AppError::unknown_provider(other, Self::EXPECTED_KEYS)),
        }
    }
}

impl fmt::Display for IpProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Geolocation provider registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeoProvider {
    #[default]
    IpApi,
    IpInfo,
}

impl GeoProvider {
    /// Selector keys accepted by [`FromStr`]
    pub const EXPECTED_KEYS: &'static str = "ipapi, ipinfo";

    /// Selector key for this provider
    pub fn key(&self) -> &'static str {
        match self {
            Self::IpApi => "ipapi",
            Self::IpInfo => "ipinfo",
        }
    }

    /// Endpoint queried for the given IP. The two providers differ only in
    /// host and path shape.
    pub fn endpoint(&self, ip: &str) -> String {
        match self {
            Self::IpApi => format!("{}/{}/json/", IPAPI_BASE, ip),
            Self::IpInfo => format!("{}/{}/json", IPINFO_BASE, ip),
        }
    }

    /// Geolocate an IP, returning the provider's JSON body as-is. The IP is
    /// untyped input; no format validation is performed upstream.
    pub async fn locate(&self, client: &dyn JsonClient, ip: &str) -> Result<GeoRecord> {
        self.locate_at(client, &self.endpoint(ip)).await
    }

    /// Geolocate via a specific URL; test seam like [`IpProvider::lookup_at`]
    pub async fn locate_at(&self, client: &dyn JsonClient, url: &str) -> Result<GeoRecord> {
        let value = client.get_json(url).await?;
        match value {
            serde_json::Value::Object(map) => Ok(GeoRecord { fields: map }),
            other => Err(AppError::parse(format!(
                "Expected a JSON object from {}, got {}",
                url,
                json_type_name(&other)
            ))),
        }
    }
}

impl FromStr for GeoProvider {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ipapi" => Ok(Self::IpApi),
            "ipinfo" => Ok(Self::IpInfo),
            other => Err(AppError::unknown_provider(other, Self::EXPECTED_KEYS)),
        }
    }
}

impl fmt::Display for GeoProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Opaque geolocation record: whatever JSON object the provider returned.
/// No schema is enforced; fields are displayed verbatim.
#[derive(Debug, Clone)]
pub struct GeoRecord {
    fields: serde_json::Map<String, serde_json::Value>,
}

impl GeoRecord {
    /// Number of fields in the record
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the provider returned an empty object
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a single field as a display string
    pub fn get(&self, key: &str) -> Option<String> {
        self.fields.get(key).map(display_value)
    }

    /// Iterate fields as (key, display string) pairs, in response order.
    /// Null values render as "-".
    pub fn entries(&self) -> impl Iterator<Item = (&str, String)> {
        self.fields
            .iter()
            .map(|(k, v)| (k.as_str(), display_value(v)))
    }
}

#[cfg(test)]
impl GeoRecord {
    /// Build a record directly from a JSON object (tests only)
    pub fn from_object(fields: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { fields }
    }
}

/// Render a JSON value for table display: bare strings unquoted, null as "-",
/// everything else in compact JSON
fn display_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => "-".to_string(),
        serde_json::Value::String(s) if s.is_empty() => "-".to_string(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
