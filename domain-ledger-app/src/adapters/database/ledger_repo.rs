//! `LedgerRepository` implementation for `DatabaseStore`.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, EntityTrait, QueryOrder, TransactionTrait, sea_query::OnConflict,
};

use domain_ledger_core::error::{CoreError, CoreResult};
use domain_ledger_core::traits::LedgerRepository;
use domain_ledger_core::types::{NewOwnedDomain, OwnedDomain, ProvisionedRecord};

use super::DatabaseStore;
use super::entity::{owned_domain, provisioned_record};

impl From<owned_domain::Model> for OwnedDomain {
    fn from(model: owned_domain::Model) -> Self {
        Self {
            name: model.name,
            status: model.status,
            expires_at: model.expires_at,
            obtained_at: model.obtained_at,
            created_at: model.created_at,
        }
    }
}

impl TryFrom<provisioned_record::Model> for ProvisionedRecord {
    type Error = CoreError;

    fn try_from(model: provisioned_record::Model) -> CoreResult<Self> {
        let ttl = u32::try_from(model.ttl).map_err(|_| {
            CoreError::StorageError(format!("Record {} has invalid ttl {}", model.id, model.ttl))
        })?;

        Ok(Self {
            id: model.id,
            prefix: model.prefix,
            kind: model.kind,
            base_domain: model.base_domain,
            target_host: model.target_host,
            ttl,
            description: model.description,
            created_at: model.created_at,
        })
    }
}

#[async_trait]
impl LedgerRepository for DatabaseStore {
    async fn ensure_schema(&self) -> CoreResult<()> {
        Self::migrate(&self.db).await
    }

    async fn upsert_owned_domains(&self, domains: &[NewOwnedDomain]) -> CoreResult<()> {
        if domains.is_empty() {
            return Ok(());
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to begin transaction: {e}")))?;

        let now = Utc::now();
        for domain in domains {
            let model = owned_domain::ActiveModel {
                name: Set(domain.name.clone()),
                status: Set(domain.status.clone()),
                expires_at: Set(domain.expires_at),
                obtained_at: Set(domain.obtained_at),
                created_at: Set(now),
            };

            // 已存在时只更新 status，日期保持首次观察值
            owned_domain::Entity::insert(model)
                .on_conflict(
                    OnConflict::column(owned_domain::Column::Name)
                        .update_column(owned_domain::Column::Status)
                        .to_owned(),
                )
                .exec_without_returning(&txn)
                .await
                .map_err(|e| {
                    CoreError::StorageError(format!("Failed to upsert domain {}: {e}", domain.name))
                })?;
        }

        // 未提交的事务在 drop 时回滚
        txn.commit()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to commit domains: {e}")))?;

        log::debug!("Upserted {} owned domains", domains.len());
        Ok(())
    }

    async fn insert_provisioned_record(&self, record: &ProvisionedRecord) -> CoreResult<()> {
        let model = provisioned_record::ActiveModel {
            id: Set(record.id.clone()),
            prefix: Set(record.prefix.clone()),
            kind: Set(record.kind.clone()),
            base_domain: Set(record.base_domain.clone()),
            target_host: Set(record.target_host.clone()),
            ttl: Set(i64::from(record.ttl)),
            description: Set(record.description.clone()),
            created_at: Set(record.created_at),
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to begin transaction: {e}")))?;

        provisioned_record::Entity::insert(model)
            .exec_without_returning(&txn)
            .await
            .map_err(|e| {
                CoreError::StorageError(format!("Failed to insert record {}: {e}", record.id))
            })?;

        txn.commit()
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to commit record: {e}")))?;

        Ok(())
    }

    async fn list_owned_domains(&self) -> CoreResult<Vec<OwnedDomain>> {
        let rows = owned_domain::Entity::find()
            .order_by_desc(owned_domain::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query domains: {e}")))?;

        Ok(rows.into_iter().map(OwnedDomain::from).collect())
    }

    async fn list_owned_domains_by_expiry(&self) -> CoreResult<Vec<OwnedDomain>> {
        let rows = owned_domain::Entity::find()
            .order_by_asc(owned_domain::Column::ExpiresAt)
            .order_by_asc(owned_domain::Column::Name)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query domains: {e}")))?;

        Ok(rows.into_iter().map(OwnedDomain::from).collect())
    }

    async fn list_provisioned_records(&self) -> CoreResult<Vec<ProvisionedRecord>> {
        let rows = provisioned_record::Entity::find()
            .order_by_asc(provisioned_record::Column::CreatedAt)
            .order_by_asc(provisioned_record::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query records: {e}")))?;

        rows.into_iter().map(ProvisionedRecord::try_from).collect()
    }
}
