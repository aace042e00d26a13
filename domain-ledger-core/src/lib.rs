//! Domain Ledger Core Library
//!
//! Business logic of the domain ledger:
//! - Reconciliation: pull the registrar's domain listing into the ledger (`ReconciliationService`)
//! - Provisioning: create DNS records at the registrar and record them (`ProvisioningService`)
//!
//! Storage is abstracted through [`LedgerRepository`]; the registrar through
//! [`RegistrarClient`]. Both are injected via [`ServiceContext`].

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::{ProvisioningService, ReconciliationService, ServiceContext};
pub use traits::{LedgerRepository, RegistrarClient};
