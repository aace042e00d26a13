//! Registrar client implementations

/// Shared utilities used by registrar clients.
pub mod common;

#[cfg(feature = "porkbun")]
mod porkbun;

#[cfg(feature = "porkbun")]
pub use porkbun::PorkbunClient;
