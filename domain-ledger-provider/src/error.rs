use serde::{Deserialize, Serialize};

/// Unified error type for all registrar operations.
///
/// Each variant carries a `registrar` field identifying which client produced
/// the error, plus variant-specific context. All variants are serializable for
/// structured error reporting.
///
/// # Classification
///
/// - Transport failures: [`NetworkError`](Self::NetworkError), [`Timeout`](Self::Timeout).
/// - Application failures: [`ApiError`](Self::ApiError) (non-2xx status or an
///   envelope whose `status` is not `SUCCESS`), [`RateLimited`](Self::RateLimited),
///   [`ParseError`](Self::ParseError).
///
/// Only idempotent calls are retried; see `HttpUtils::execute_request_with_retry`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum RegistrarError {
    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Registrar that produced the error.
        registrar: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request hit its connect or total deadline.
    Timeout {
        /// Registrar that produced the error.
        registrar: String,
        /// Error details.
        detail: String,
    },

    /// The registrar answered, but not with success.
    ///
    /// The response body is kept verbatim for diagnostics.
    ApiError {
        /// Registrar that produced the error.
        registrar: String,
        /// HTTP status code of the response.
        status_code: u16,
        /// HTTP status line, e.g. `500 Internal Server Error`.
        status: String,
        /// Raw response body.
        body: String,
    },

    /// The API rate limit has been exceeded (HTTP 429).
    RateLimited {
        /// Registrar that produced the error.
        registrar: String,
        /// Suggested wait time in seconds before retrying, if provided by the API.
        retry_after: Option<u64>,
        /// Raw response body, if any.
        raw_message: Option<String>,
    },

    /// A 2xx response body could not be decoded.
    ParseError {
        /// Registrar that produced the error.
        registrar: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Registrar that produced the error.
        registrar: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// The client could not be constructed (TLS backend, invalid base URL, ...).
    ClientSetup {
        /// Registrar that produced the error.
        registrar: String,
        /// Error details.
        detail: String,
    },
}

impl RegistrarError {
    /// 是否为预期行为（4xx 业务拒绝等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ApiError { status_code, .. } => (400..500).contains(status_code),
            Self::RateLimited { .. } => true,
            _ => false,
        }
    }

    /// Whether the failure happened before any HTTP response was received.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }
}

impl std::fmt::Display for RegistrarError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { registrar, detail } => {
                write!(f, "[{registrar}] Network error: {detail}")
            }
            Self::Timeout { registrar, detail } => {
                write!(f, "[{registrar}] Request timeout: {detail}")
            }
            Self::ApiError {
                registrar,
                status_code,
                status,
                body,
            } => {
                write!(
                    f,
                    "[{registrar}] HTTP error: {status} (code: {status_code}), body: {body}"
                )
            }
            Self::RateLimited {
                registrar,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{registrar}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{registrar}] Rate limited")
                }
            }
            Self::ParseError { registrar, detail } => {
                write!(f, "[{registrar}] Parse error: {detail}")
            }
            Self::SerializationError { registrar, detail } => {
                write!(f, "[{registrar}] Serialization error: {detail}")
            }
            Self::ClientSetup { registrar, detail } => {
                write!(f, "[{registrar}] Client setup failed: {detail}")
            }
        }
    }
}

impl std::error::Error for RegistrarError {}

/// Convenience type alias for `Result<T, RegistrarError>`.
pub type Result<T> = std::result::Result<T, RegistrarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_network_error() {
        let e = RegistrarError::NetworkError {
            registrar: "porkbun".to_string(),
            detail: "connection refused".to_string(),
        };
        assert_eq!(e.to_string(), "[porkbun] Network error: connection refused");
    }

    #[test]
    fn display_api_error_keeps_body() {
        let e = RegistrarError::ApiError {
            registrar: "porkbun".to_string(),
            status_code: 500,
            status: "500 Internal Server Error".to_string(),
            body: r#"{"status":"ERROR"}"#.to_string(),
        };
        assert_eq!(
            e.to_string(),
            r#"[porkbun] HTTP error: 500 Internal Server Error (code: 500), body: {"status":"ERROR"}"#
        );
    }

    #[test]
    fn display_rate_limited_with_retry() {
        let e = RegistrarError::RateLimited {
            registrar: "porkbun".to_string(),
            retry_after: Some(30),
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[porkbun] Rate limited (retry after 30s)");
    }

    #[test]
    fn display_rate_limited_without_retry() {
        let e = RegistrarError::RateLimited {
            registrar: "porkbun".to_string(),
            retry_after: None,
            raw_message: None,
        };
        assert_eq!(e.to_string(), "[porkbun] Rate limited");
    }

    #[test]
    fn display_timeout() {
        let e = RegistrarError::Timeout {
            registrar: "test".to_string(),
            detail: "30s elapsed".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Request timeout: 30s elapsed");
    }

    #[test]
    fn display_parse_error() {
        let e = RegistrarError::ParseError {
            registrar: "test".to_string(),
            detail: "bad json".to_string(),
        };
        assert_eq!(e.to_string(), "[test] Parse error: bad json");
    }

    #[test]
    fn client_errors_are_expected_server_errors_are_not() {
        let api = |status_code| RegistrarError::ApiError {
            registrar: "t".into(),
            status_code,
            status: String::new(),
            body: String::new(),
        };
        assert!(api(400).is_expected());
        assert!(api(404).is_expected());
        assert!(!api(500).is_expected());
        assert!(!api(200).is_expected());
    }

    #[test]
    fn transport_classification() {
        assert!(
            RegistrarError::NetworkError {
                registrar: "t".into(),
                detail: "x".into(),
            }
            .is_transport()
        );
        assert!(
            RegistrarError::Timeout {
                registrar: "t".into(),
                detail: "x".into(),
            }
            .is_transport()
        );
        assert!(
            !RegistrarError::ParseError {
                registrar: "t".into(),
                detail: "x".into(),
            }
            .is_transport()
        );
    }

    #[test]
    fn serialize_uses_code_tag() {
        let e = RegistrarError::ApiError {
            registrar: "porkbun".to_string(),
            status_code: 400,
            status: "400 Bad Request".to_string(),
            body: "nope".to_string(),
        };
        let json = serde_json::to_string(&e).unwrap();
        assert!(json.contains("\"code\":\"ApiError\""));
        assert!(json.contains("\"status_code\":400"));
    }
}
