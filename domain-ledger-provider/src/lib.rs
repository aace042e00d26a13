//! # domain-ledger-provider
//!
//! Registrar API client used by Domain Ledger to list owned domains and create
//! DNS records.
//!
//! ## Supported Registrars
//!
//! | Registrar | Feature Flag | Auth Method |
//! |-----------|-------------|-------------|
//! | [Porkbun](https://porkbun.com/api/json/v3/documentation) | `porkbun` | API key pair in the JSON body |
//!
//! ## Feature Flags
//!
//! - **`porkbun`** *(default)*: enable the Porkbun client.
//! - **`native-tls`** *(default)*: use the platform's native TLS implementation.
//! - **`rustls`**: use rustls.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use domain_ledger_provider::{
//!     create_registrar, ClientOptions, CreateRecordRequest, RecordName, RegistrarCredentials,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = create_registrar(
//!         RegistrarCredentials::Porkbun {
//!             api_key: "pk1_...".to_string(),
//!             secret_api_key: "sk1_...".to_string(),
//!         },
//!         ClientOptions::default(),
//!     )?;
//!
//!     for domain in client.list_all_domains().await? {
//!         println!("{} {} (expires {})", domain.domain, domain.status, domain.expire_date);
//!     }
//!
//!     client
//!         .create_record(&CreateRecordRequest {
//!             domain: "example.com".to_string(),
//!             record_type: "A".to_string(),
//!             content: "1.2.3.4".to_string(),
//!             ttl: 600,
//!             name: RecordName::from_prefix("www"),
//!         })
//!         .await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Every call returns [`Result<T, RegistrarError>`](RegistrarError):
//!
//! - [`RegistrarError::NetworkError`] / [`RegistrarError::Timeout`]: the registrar was not reached
//! - [`RegistrarError::ApiError`]: non-2xx status or a non-`SUCCESS` envelope, body kept
//! - [`RegistrarError::RateLimited`]: HTTP 429
//! - [`RegistrarError::ParseError`]: a 2xx body that does not decode
//!
//! Listing calls retry transient failures with exponential backoff. Record
//! creation is sent exactly once.

mod error;
mod factory;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{RegistrarError, Result};

// Re-export factory functions
pub use factory::create_registrar;

pub use traits::{LIST_PAGE_SIZE, MAX_LIST_PAGES, RegistrarClient};

pub use providers::common::normalize_domain_name;

pub use types::{
    ClientOptions, CreateRecordRequest, CreatedRecord, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_LIST_MAX_RETRIES, DEFAULT_REQUEST_TIMEOUT_SECS, PORKBUN_API_BASE, RecordName,
    RegistrarCredentials, RegistrarDomain, WILDCARD_SENTINEL,
};

// Re-export utils modules
pub use utils::datetime;
pub use utils::log_sanitizer;

#[cfg(feature = "porkbun")]
pub use providers::PorkbunClient;
