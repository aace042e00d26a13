//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export library error type
pub use domain_ledger_provider::RegistrarError;

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Operator input rejected before any registrar call
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// The registrar listing contained a row that cannot be stored
    #[error("Invalid registrar data for {domain}: {detail}")]
    InvalidRegistrarData { domain: String, detail: String },

    /// The registrar created the record but the ledger write failed.
    ///
    /// The registrar-side record exists; there is no local row for it.
    #[error("Record {record_id} was created at the registrar but not recorded locally: {detail}")]
    PersistenceAfterProvision { record_id: String, detail: String },

    /// Registrar error (converting from library)
    #[error("{0}")]
    Registrar(#[from] RegistrarError),
}

impl CoreError {
    /// Whether it is expected behavior (user input, registrar 4xx, etc.), used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added.**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        match self {
            Self::ValidationError(_) => true,
            Self::Registrar(e) => e.is_expected(),
            _ => false,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_is_expected_storage_is_not() {
        assert!(CoreError::ValidationError("ttl".into()).is_expected());
        assert!(!CoreError::StorageError("down".into()).is_expected());
        assert!(
            !CoreError::PersistenceAfterProvision {
                record_id: "abc".into(),
                detail: "locked".into(),
            }
            .is_expected()
        );
    }

    #[test]
    fn registrar_errors_keep_their_classification() {
        let rejected: CoreError = RegistrarError::ApiError {
            registrar: "porkbun".into(),
            status_code: 400,
            status: "400 Bad Request".into(),
            body: String::new(),
        }
        .into();
        assert!(rejected.is_expected());

        let down: CoreError = RegistrarError::NetworkError {
            registrar: "porkbun".into(),
            detail: "refused".into(),
        }
        .into();
        assert!(!down.is_expected());
        assert_eq!(down.to_string(), "[porkbun] Network error: refused");
    }

    #[test]
    fn serializes_with_code_tag() {
        let json = serde_json::to_value(CoreError::InvalidRegistrarData {
            domain: "a.com".into(),
            detail: "bad date".into(),
        })
        .unwrap();
        assert_eq!(json["code"], "InvalidRegistrarData");
        assert_eq!(json["details"]["domain"], "a.com");
    }
}
