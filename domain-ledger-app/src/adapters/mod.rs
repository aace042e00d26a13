//! Storage adapters.

#[cfg(feature = "database-store")]
mod database;

#[cfg(feature = "database-store")]
pub use database::DatabaseStore;
