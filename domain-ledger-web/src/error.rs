//! HTTP 错误映射

use actix_web::error::JsonPayloadError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;

use domain_ledger_core::error::{CoreError, RegistrarError};

/// Web 层错误
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Authentication required")]
    Unauthorized,

    #[error("Content-Type must be application/json")]
    UnsupportedMediaType,

    #[error("Invalid request body: {0}")]
    BadRequest(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: &'a str,
    message: String,
}

impl ApiError {
    /// 响应体中的 `code` 字段
    pub fn code(&self) -> &'static str {
        match self {
            Self::Core(CoreError::ValidationError(_)) => "ValidationError",
            Self::Core(CoreError::StorageError(_)) => "StorageError",
            Self::Core(CoreError::InvalidRegistrarData { .. }) => "InvalidRegistrarData",
            Self::Core(CoreError::PersistenceAfterProvision { .. }) => "PersistenceAfterProvision",
            Self::Core(CoreError::Registrar(e)) => match e {
                RegistrarError::NetworkError { .. } => "RegistrarUnreachable",
                RegistrarError::Timeout { .. } => "RegistrarTimeout",
                RegistrarError::RateLimited { .. } => "RegistrarRateLimited",
                _ => "RegistrarError",
            },
            Self::Unauthorized => "Unauthorized",
            Self::UnsupportedMediaType => "UnsupportedMediaType",
            Self::BadRequest(_) => "BadRequest",
        }
    }

    fn is_expected(&self) -> bool {
        match self {
            Self::Core(e) => e.is_expected(),
            _ => true,
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Core(e) => match e {
                CoreError::ValidationError(_) => StatusCode::BAD_REQUEST,
                CoreError::StorageError(_) | CoreError::PersistenceAfterProvision { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
                CoreError::InvalidRegistrarData { .. } => StatusCode::BAD_GATEWAY,
                CoreError::Registrar(RegistrarError::Timeout { .. }) => {
                    StatusCode::GATEWAY_TIMEOUT
                }
                CoreError::Registrar(RegistrarError::RateLimited { .. }) => {
                    StatusCode::TOO_MANY_REQUESTS
                }
                CoreError::Registrar(_) => StatusCode::BAD_GATEWAY,
            },
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_expected() {
            tracing::warn!(code = self.code(), "{self}");
        } else {
            tracing::error!(code = self.code(), "{self}");
        }

        HttpResponse::build(self.status_code()).json(ErrorBody {
            code: self.code(),
            message: self.to_string(),
        })
    }
}

/// `web::Json` 解析失败时的映射
pub fn json_payload_error(err: JsonPayloadError) -> ApiError {
    match err {
        JsonPayloadError::ContentType => ApiError::UnsupportedMediaType,
        other => ApiError::BadRequest(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registrar(err: RegistrarError) -> ApiError {
        ApiError::Core(CoreError::Registrar(err))
    }

    #[test]
    fn core_errors_map_to_status_codes() {
        let cases = [
            (
                ApiError::Core(CoreError::ValidationError("ttl".into())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Core(CoreError::StorageError("locked".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Core(CoreError::PersistenceAfterProvision {
                    record_id: "abc".into(),
                    detail: "locked".into(),
                }),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Core(CoreError::InvalidRegistrarData {
                    domain: "a.com".into(),
                    detail: "expireDate".into(),
                }),
                StatusCode::BAD_GATEWAY,
            ),
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
            (
                ApiError::UnsupportedMediaType,
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(err.status_code(), status, "{err}");
        }
    }

    #[test]
    fn registrar_errors_map_to_gateway_codes() {
        let timeout = registrar(RegistrarError::Timeout {
            registrar: "porkbun".into(),
            detail: "deadline".into(),
        });
        let unreachable = registrar(RegistrarError::NetworkError {
            registrar: "porkbun".into(),
            detail: "refused".into(),
        });
        let limited = registrar(RegistrarError::RateLimited {
            registrar: "porkbun".into(),
            retry_after: None,
            raw_message: None,
        });
        let rejected = registrar(RegistrarError::ApiError {
            registrar: "porkbun".into(),
            status_code: 500,
            status: "ERROR".into(),
            body: "{}".into(),
        });

        assert_eq!(timeout.status_code(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(unreachable.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(limited.status_code(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(rejected.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(rejected.code(), "RegistrarError");
    }

    #[test]
    fn content_type_error_is_415() {
        assert!(matches!(
            json_payload_error(JsonPayloadError::ContentType),
            ApiError::UnsupportedMediaType
        ));
    }
}
