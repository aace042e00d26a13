//! 账本持久化抽象 Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{NewOwnedDomain, OwnedDomain, ProvisionedRecord};

/// 账本仓库 Trait
///
/// 平台实现:
/// - Actix-Web: `DatabaseStore` (`SeaORM`, `SQLite` / `PostgreSQL`)
#[async_trait]
pub trait LedgerRepository: Send + Sync {
    /// 创建缺失的表（幂等，每次启动都可调用）
    async fn ensure_schema(&self) -> CoreResult<()>;

    /// 批量写入注册商域名
    ///
    /// 整批在同一事务中执行，任意一行失败则全部回滚。
    /// 同名行已存在时只更新 `status`。
    async fn upsert_owned_domains(&self, domains: &[NewOwnedDomain]) -> CoreResult<()>;

    /// 写入一条已创建的记录（单独事务）
    ///
    /// # Errors
    /// * `StorageError` - ID 冲突或存储不可用
    async fn insert_provisioned_record(&self, record: &ProvisionedRecord) -> CoreResult<()>;

    /// 全部域名，按 `name` 降序
    async fn list_owned_domains(&self) -> CoreResult<Vec<OwnedDomain>>;

    /// 全部域名，按 `expires_at` 升序（相同时按 `name` 升序）
    async fn list_owned_domains_by_expiry(&self) -> CoreResult<Vec<OwnedDomain>>;

    /// 全部记录，按 `created_at` 升序（相同时按 `id` 升序）
    async fn list_provisioned_records(&self) -> CoreResult<Vec<ProvisionedRecord>>;
}
