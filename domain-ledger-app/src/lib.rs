//! Platform-agnostic application bootstrap for Domain Ledger.
//!
//! Provides `AppState` (service container) and `AppStateBuilder` (adapter injection).
//! With the `database-store` feature, also provides the `SeaORM` ledger store.

use std::sync::Arc;

use domain_ledger_core::error::{CoreError, CoreResult};
use domain_ledger_core::services::{ProvisioningService, ReconciliationService, ServiceContext};
use domain_ledger_core::traits::{LedgerRepository, RegistrarClient};

pub mod adapters;

/// Platform-agnostic application state.
///
/// Holds all services and the `ServiceContext`. Every frontend constructs this
/// once at startup via `AppStateBuilder`.
pub struct AppState {
    /// Service context (registrar client and ledger store)
    pub ctx: Arc<ServiceContext>,
    /// Registrar reconciliation and domain views
    pub reconciliation_service: ReconciliationService,
    /// DNS record provisioning
    pub provisioning_service: ProvisioningService,
}

impl AppState {
    /// Run the startup sequence: schema check, then a credential probe.
    ///
    /// A schema failure aborts startup. A failed or rejected credential probe
    /// is only logged; the registrar may be temporarily unreachable.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if the ledger schema cannot be ensured.
    pub async fn run_startup(&self) -> CoreResult<()> {
        self.ctx.ledger.ensure_schema().await?;

        match self.ctx.registrar.validate_credentials().await {
            Ok(true) => log::info!("Registrar {} credentials accepted", self.ctx.registrar.id()),
            Ok(false) => log::warn!(
                "Registrar {} rejected the configured credentials",
                self.ctx.registrar.id()
            ),
            Err(e) => log::warn!("Registrar credential check failed: {e}"),
        }
        Ok(())
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `registrar`: the registrar API client
/// - `ledger`: where owned domains and provisioned records are stored
pub struct AppStateBuilder {
    registrar: Option<Arc<dyn RegistrarClient>>,
    ledger: Option<Arc<dyn LedgerRepository>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            registrar: None,
            ledger: None,
        }
    }

    #[must_use]
    pub fn registrar(mut self, registrar: Arc<dyn RegistrarClient>) -> Self {
        self.registrar = Some(registrar);
        self
    }

    #[must_use]
    pub fn ledger(mut self, ledger: Arc<dyn LedgerRepository>) -> Self {
        self.ledger = Some(ledger);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let registrar = self
            .registrar
            .ok_or_else(|| CoreError::ValidationError("registrar is required".to_string()))?;
        let ledger = self
            .ledger
            .ok_or_else(|| CoreError::ValidationError("ledger is required".to_string()))?;

        let ctx = Arc::new(ServiceContext::new(registrar, ledger));

        Ok(AppState {
            reconciliation_service: ReconciliationService::new(Arc::clone(&ctx)),
            provisioning_service: ProvisioningService::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
