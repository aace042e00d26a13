//! Generic HTTP client tools
//!
//! Reusable request execution for registrar clients. Each client builds its
//! own `RequestBuilder` (URL, auth fields, body); this module owns sending,
//! logging, status classification and the retry loop.
//!
//! # Status rules
//! - Transport failures become [`RegistrarError::NetworkError`] / [`RegistrarError::Timeout`]
//! - HTTP 429 becomes [`RegistrarError::RateLimited`]
//! - Any other status outside `200..300` becomes [`RegistrarError::ApiError`] with the body kept

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::RegistrarError;
use crate::utils::log_sanitizer::truncate_for_log;

/// A successful (2xx) HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Response body text.
    pub body: String,
}

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns the response body of a 2xx answer.
    ///
    /// # Arguments
    /// * `request_builder` - configured request (URL, headers, body)
    /// * `registrar` - registrar name (for logs and errors)
    /// * `action` - endpoint name, e.g. `domain/listAll` (for logs)
    pub async fn execute_request(
        request_builder: RequestBuilder,
        registrar: &str,
        action: &str,
    ) -> Result<RawResponse, RegistrarError> {
        log::debug!("[{registrar}] POST {action}");

        let response = request_builder.send().await.map_err(|e| {
            if e.is_timeout() {
                RegistrarError::Timeout {
                    registrar: registrar.to_string(),
                    detail: e.to_string(),
                }
            } else {
                RegistrarError::NetworkError {
                    registrar: registrar.to_string(),
                    detail: e.to_string(),
                }
            }
        })?;

        let status = response.status();
        let status_code = status.as_u16();
        log::debug!("[{registrar}] Response Status: {status_code}");

        // Retry-After 需要在读取 body 之前取出
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse::<u64>().ok());

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                RegistrarError::Timeout {
                    registrar: registrar.to_string(),
                    detail: format!("Timed out reading response body: {e}"),
                }
            } else {
                RegistrarError::NetworkError {
                    registrar: registrar.to_string(),
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        log::debug!("[{registrar}] Response Body: {}", truncate_for_log(&body));

        if status_code == 429 {
            log::warn!("[{registrar}] Rate limited (HTTP 429), retry_after={retry_after:?}");
            return Err(RegistrarError::RateLimited {
                registrar: registrar.to_string(),
                retry_after,
                raw_message: Some(body),
            });
        }

        if !status.is_success() {
            log::warn!("[{registrar}] {action} answered HTTP {status}");
            return Err(RegistrarError::ApiError {
                registrar: registrar.to_string(),
                status_code,
                status: status.to_string(),
                body,
            });
        }

        Ok(RawResponse { status_code, body })
    }

    /// Parse JSON response
    ///
    /// # Returns
    /// * `Ok(T)` - successfully parsed
    /// * `Err(RegistrarError::ParseError)` - parsing failed
    pub fn parse_json<T>(response_text: &str, registrar: &str) -> Result<T, RegistrarError>
    where
        T: DeserializeOwned,
    {
        serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{registrar}] JSON parse failed: {e}");
            log::error!(
                "[{registrar}] Raw response: {}",
                truncate_for_log(response_text)
            );
            RegistrarError::ParseError {
                registrar: registrar.to_string(),
                detail: e.to_string(),
            }
        })
    }

    /// Performs an HTTP request with retries.
    ///
    /// Only for idempotent endpoints. `max_retries == 0` sends exactly once.
    ///
    /// # Retry strategy
    /// - Retries transport failures, HTTP 429 and HTTP 502/503/504
    /// - Exponential backoff: 100ms, 200ms, 400ms, ... (maximum 10 seconds)
    /// - `Retry-After` on a 429 is honoured, capped at 30 seconds
    pub async fn execute_request_with_retry(
        request_builder: RequestBuilder,
        registrar: &str,
        action: &str,
        max_retries: u32,
    ) -> Result<RawResponse, RegistrarError> {
        if max_retries == 0 {
            return Self::execute_request(request_builder, registrar, action).await;
        }

        let mut last_error = None;

        for attempt in 0..=max_retries {
            // RequestBuilder 只能使用一次，每次重试前克隆
            let Some(req) = request_builder.try_clone() else {
                log::warn!("[{registrar}] Cannot clone request, disabling retry");
                return Self::execute_request(request_builder, registrar, action).await;
            };

            match Self::execute_request(req, registrar, action).await {
                Ok(resp) => return Ok(resp),
                Err(e) if attempt < max_retries && is_retryable(&e) => {
                    let delay = retry_delay(&e, attempt);
                    log::warn!(
                        "[{}] {} failed (attempt {}/{}), retrying in {:.1}s: {}",
                        registrar,
                        action,
                        attempt + 1,
                        max_retries,
                        delay.as_secs_f32(),
                        e
                    );
                    tokio::time::sleep(delay).await;
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| RegistrarError::NetworkError {
            registrar: registrar.to_string(),
            detail: "All retries exhausted with no error captured".to_string(),
        }))
    }
}

/// Determine whether the error can be retried
///
/// Gateway errors count as transient; every other API answer is final.
fn is_retryable(error: &RegistrarError) -> bool {
    if error.is_transport() {
        return true;
    }
    match error {
        RegistrarError::RateLimited { .. } => true,
        RegistrarError::ApiError { status_code, .. } => matches!(status_code, 502..=504),
        _ => false,
    }
}

/// Calculate retry delay
///
/// Use `retry_after` (capped at 30s) for `RateLimited`, exponential backoff otherwise.
fn retry_delay(error: &RegistrarError, attempt: u32) -> Duration {
    if let RegistrarError::RateLimited {
        retry_after: Some(secs),
        ..
    } = error
    {
        Duration::from_secs((*secs).min(30))
    } else {
        backoff_delay(attempt)
    }
}

/// Calculate exponential backoff delay
///
/// 100ms, 200ms, 400ms, 800ms, 1.6s, ... capped at 10 seconds
fn backoff_delay(attempt: u32) -> Duration {
    let capped_attempt = attempt.min(20); // Prevent 2^attempt from overflowing
    let delay_ms = 100_u64.saturating_mul(1_u64 << capped_attempt);
    let delay_ms = delay_ms.min(10_000);
    Duration::from_millis(delay_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_error(status_code: u16) -> RegistrarError {
        RegistrarError::ApiError {
            registrar: "test".into(),
            status_code,
            status: String::new(),
            body: String::new(),
        }
    }

    // ---- is_retryable ----

    #[test]
    fn retryable_network_error() {
        let e = RegistrarError::NetworkError {
            registrar: "test".into(),
            detail: "err".into(),
        };
        assert!(is_retryable(&e));
    }

    #[test]
    fn retryable_timeout() {
        let e = RegistrarError::Timeout {
            registrar: "test".into(),
            detail: "err".into(),
        };
        assert!(is_retryable(&e));
    }

    #[test]
    fn retryable_rate_limited() {
        let e = RegistrarError::RateLimited {
            registrar: "test".into(),
            retry_after: None,
            raw_message: None,
        };
        assert!(is_retryable(&e));
    }

    #[test]
    fn retryable_gateway_errors() {
        assert!(is_retryable(&api_error(502)));
        assert!(is_retryable(&api_error(503)));
        assert!(is_retryable(&api_error(504)));
    }

    #[test]
    fn not_retryable_other_api_errors() {
        assert!(!is_retryable(&api_error(400)));
        assert!(!is_retryable(&api_error(500)));
    }

    #[test]
    fn not_retryable_parse_error() {
        let e = RegistrarError::ParseError {
            registrar: "test".into(),
            detail: "err".into(),
        };
        assert!(!is_retryable(&e));
    }

    // ---- retry_delay / backoff_delay ----

    #[test]
    fn backoff_doubles() {
        assert_eq!(backoff_delay(0), Duration::from_millis(100));
        assert_eq!(backoff_delay(1), Duration::from_millis(200));
        assert_eq!(backoff_delay(3), Duration::from_millis(800));
    }

    #[test]
    fn backoff_capped_at_10s() {
        // attempt 7: 100 * 2^7 = 12800ms, capped to 10000ms
        assert_eq!(backoff_delay(7), Duration::from_millis(10_000));
        assert_eq!(backoff_delay(u32::MAX), Duration::from_millis(10_000));
    }

    #[test]
    fn retry_after_is_honoured_and_capped() {
        let limited = |secs| RegistrarError::RateLimited {
            registrar: "test".into(),
            retry_after: Some(secs),
            raw_message: None,
        };
        assert_eq!(retry_delay(&limited(5), 0), Duration::from_secs(5));
        assert_eq!(retry_delay(&limited(600), 0), Duration::from_secs(30));
        assert_eq!(retry_delay(&api_error(503), 2), Duration::from_millis(400));
    }

    // ---- parse_json ----

    #[test]
    fn parse_json_valid() {
        #[derive(serde::Deserialize, Debug, PartialEq)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, RegistrarError> = HttpUtils::parse_json(r#"{"x":42}"#, "test");
        assert!(
            matches!(&result, Ok(Foo { x: 42 })),
            "unexpected parse result: {result:?}"
        );
    }

    #[test]
    fn parse_json_invalid() {
        #[derive(serde::Deserialize, Debug)]
        #[allow(dead_code)]
        struct Foo {
            x: i32,
        }
        let result: Result<Foo, RegistrarError> = HttpUtils::parse_json("not json", "test");
        assert!(
            matches!(&result, Err(RegistrarError::ParseError { .. })),
            "unexpected parse result: {result:?}"
        );
    }
}
