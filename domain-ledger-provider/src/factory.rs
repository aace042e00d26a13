//! Registrar client factory.

use std::sync::Arc;

use crate::error::Result;
use crate::traits::RegistrarClient;
use crate::types::{ClientOptions, RegistrarCredentials};

#[cfg(feature = "porkbun")]
use crate::providers::PorkbunClient;

/// Creates a [`RegistrarClient`] from the given credentials.
///
/// The concrete client is selected by the [`RegistrarCredentials`] variant and
/// returned as `Arc<dyn RegistrarClient>` for sharing across request handlers.
///
/// # Examples
///
/// ```rust,no_run
/// use domain_ledger_provider::{create_registrar, ClientOptions, RegistrarCredentials};
///
/// let client = create_registrar(
///     RegistrarCredentials::Porkbun {
///         api_key: "pk1_...".to_string(),
///         secret_api_key: "sk1_...".to_string(),
///     },
///     ClientOptions::default(),
/// )?;
/// # Ok::<(), domain_ledger_provider::RegistrarError>(())
/// ```
pub fn create_registrar(
    credentials: RegistrarCredentials,
    options: ClientOptions,
) -> Result<Arc<dyn RegistrarClient>> {
    match credentials {
        #[cfg(feature = "porkbun")]
        RegistrarCredentials::Porkbun {
            api_key,
            secret_api_key,
        } => Ok(Arc::new(PorkbunClient::new(api_key, secret_api_key, options)?)),
    }
}
