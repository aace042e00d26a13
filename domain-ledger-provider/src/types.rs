//! Public types shared by registrar clients.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Prefix value that means "no subdomain label": the record applies to the apex.
pub const WILDCARD_SENTINEL: &str = "*";

/// Porkbun JSON API v3 endpoint.
pub const PORKBUN_API_BASE: &str = "https://api.porkbun.com/api/json/v3";

/// Default connect timeout (seconds).
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// Default total request timeout (seconds).
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Default retry budget for idempotent listing calls.
pub const DEFAULT_LIST_MAX_RETRIES: u32 = 3;

// ============ Credentials ============

/// Registrar credentials (type-safe).
///
/// `Debug` never prints secret material.
#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "registrar", content = "credentials")]
pub enum RegistrarCredentials {
    /// Porkbun API key pair. Requires feature `porkbun`.
    #[cfg(feature = "porkbun")]
    #[serde(rename = "porkbun")]
    Porkbun {
        /// Public API key (`apikey`).
        api_key: String,
        /// Secret API key (`secretapikey`).
        secret_api_key: String,
    },
}

impl RegistrarCredentials {
    /// Registrar identifier for these credentials.
    pub fn registrar(&self) -> &'static str {
        match self {
            #[cfg(feature = "porkbun")]
            Self::Porkbun { .. } => "porkbun",
        }
    }
}

impl fmt::Debug for RegistrarCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            #[cfg(feature = "porkbun")]
            Self::Porkbun { api_key, .. } => f
                .debug_struct("Porkbun")
                .field("api_key", &crate::utils::log_sanitizer::mask_secret(api_key))
                .field("secret_api_key", &"***")
                .finish(),
        }
    }
}

// ============ Client options ============

/// Transport settings for a registrar client.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// API base URL without trailing slash.
    pub base_url: String,
    /// TCP/TLS connect deadline.
    pub connect_timeout: Duration,
    /// Total deadline per request.
    pub request_timeout: Duration,
    /// Extra attempts allowed for listing calls.
    pub list_max_retries: u32,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: PORKBUN_API_BASE.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            list_max_retries: DEFAULT_LIST_MAX_RETRIES,
        }
    }
}

// ============ Domains ============

/// A domain as reported by the registrar listing.
///
/// Dates are kept as the registrar's raw strings (`YYYY-MM-DD HH:MM:SS`, UTC);
/// see [`crate::datetime::parse_registrar_datetime`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrarDomain {
    pub domain: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub tld: String,
    #[serde(default)]
    pub create_date: String,
    #[serde(default)]
    pub expire_date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub security_lock: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub whois_privacy: String,
    /// Reported either as a number or a string depending on the account.
    #[serde(default)]
    pub auto_renew: serde_json::Value,
    #[serde(default)]
    pub not_local: i64,
}

/// Accepts a JSON string, number or bool and keeps it as text.
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    })
}

// ============ Records ============

/// Subdomain label of a record to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecordName {
    /// Apply to the apex; the registrar request carries no `name` field.
    Apex,
    /// A subdomain label such as `www`.
    Label(String),
}

impl RecordName {
    /// Maps an operator-supplied prefix, treating [`WILDCARD_SENTINEL`] as the apex.
    pub fn from_prefix(prefix: &str) -> Self {
        if prefix == WILDCARD_SENTINEL {
            Self::Apex
        } else {
            Self::Label(prefix.to_string())
        }
    }

    /// The label to send, if any.
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Apex => None,
            Self::Label(label) => Some(label),
        }
    }
}

/// Create DNS record request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateRecordRequest {
    /// Base domain the record lives under.
    pub domain: String,
    /// Record type, e.g. `A` or `CNAME`.
    pub record_type: String,
    /// Record content (address, target host, text).
    pub content: String,
    /// TTL in seconds.
    pub ttl: u32,
    pub name: RecordName,
}

/// Registrar acknowledgement of a created record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedRecord {
    /// Registrar-side record id, when the registrar returns one.
    pub id: Option<String>,
}
