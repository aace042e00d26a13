//! Relational ledger store using `SeaORM`.
//!
//! A single `DatabaseStore` implements `LedgerRepository` against `SQLite`
//! or `PostgreSQL`; the backend is chosen by the connection URL.

pub(crate) mod entity;
mod ledger_repo;
mod migration;

use std::path::Path;

use domain_ledger_core::error::{CoreError, CoreResult};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use migration::Migrator;

/// Ledger store backed by a pooled database connection.
///
/// Constructed once at startup; the schema is brought up to date before the
/// store is returned.
pub struct DatabaseStore {
    /// Shared `SeaORM` database connection.
    pub(crate) db: DatabaseConnection,
}

impl DatabaseStore {
    /// Connect to `url` (`sqlite://...` or `postgres://...`) and run migrations.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if the connection or schema migration fails.
    pub async fn connect(url: &str) -> CoreResult<Self> {
        let mut options = ConnectOptions::new(url.to_owned());
        options.sqlx_logging(false);

        let db = Database::connect(options)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to connect to database: {e}")))?;
        log::info!("Connected to {:?} ledger database", db.get_database_backend());

        let store = Self { db };
        Self::migrate(&store.db).await?;
        Ok(store)
    }

    /// Open (or create) a `SQLite` ledger file.
    ///
    /// # Errors
    /// Returns `CoreError::StorageError` if directory creation, database
    /// connection, or schema migration fails.
    pub async fn open_sqlite(db_path: &Path) -> CoreResult<Self> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageError(format!("Failed to create directory: {e}")))?;
        }

        Self::connect(&format!("sqlite://{}?mode=rwc", db_path.display())).await
    }

    async fn migrate(db: &DatabaseConnection) -> CoreResult<()> {
        Migrator::up(db, None)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to run migrations: {e}")))
    }
}
