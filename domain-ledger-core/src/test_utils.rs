//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::RwLock;

use domain_ledger_provider::{
    CreateRecordRequest, CreatedRecord, LIST_PAGE_SIZE, RegistrarClient, RegistrarDomain,
    RegistrarError,
};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::LedgerRepository;
use crate::types::{NewOwnedDomain, OwnedDomain, ProvisionedRecord};

// ===== MockRegistrar =====

/// 内存注册商
#[derive(Default)]
pub struct MockRegistrar {
    domains: RwLock<Vec<RegistrarDomain>>,
    created: RwLock<Vec<CreateRecordRequest>>,
    list_calls: RwLock<usize>,
    /// 如果 Some，`list_domains` 返回此错误
    list_error: RwLock<Option<RegistrarError>>,
    /// 如果 Some，`create_record` 返回此错误
    create_error: RwLock<Option<RegistrarError>>,
}

impl MockRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_domains(&self, domains: Vec<RegistrarDomain>) {
        *self.domains.write().await = domains;
    }

    pub async fn set_list_error(&self, err: Option<RegistrarError>) {
        *self.list_error.write().await = err;
    }

    pub async fn set_create_error(&self, err: Option<RegistrarError>) {
        *self.create_error.write().await = err;
    }

    /// 已收到的创建请求
    pub async fn created_requests(&self) -> Vec<CreateRecordRequest> {
        self.created.read().await.clone()
    }

    pub async fn list_calls(&self) -> usize {
        *self.list_calls.read().await
    }
}

#[async_trait]
impl RegistrarClient for MockRegistrar {
    fn id(&self) -> &'static str {
        "mock"
    }

    async fn validate_credentials(&self) -> domain_ledger_provider::Result<bool> {
        Ok(true)
    }

    async fn list_domains(&self, start: usize) -> domain_ledger_provider::Result<Vec<RegistrarDomain>> {
        *self.list_calls.write().await += 1;
        if let Some(err) = self.list_error.read().await.clone() {
            return Err(err);
        }
        let domains = self.domains.read().await;
        Ok(domains
            .iter()
            .skip(start)
            .take(LIST_PAGE_SIZE)
            .cloned()
            .collect())
    }

    async fn create_record(
        &self,
        req: &CreateRecordRequest,
    ) -> domain_ledger_provider::Result<CreatedRecord> {
        if let Some(err) = self.create_error.read().await.clone() {
            return Err(err);
        }
        let mut created = self.created.write().await;
        created.push(req.clone());
        Ok(CreatedRecord {
            id: Some(created.len().to_string()),
        })
    }
}

// ===== MockLedger =====

/// 内存账本
#[derive(Default)]
pub struct MockLedger {
    owned: RwLock<BTreeMap<String, OwnedDomain>>,
    records: RwLock<Vec<ProvisionedRecord>>,
    upsert_calls: RwLock<usize>,
    /// 如果 Some，`insert_provisioned_record` 返回此错误
    insert_error: RwLock<Option<String>>,
}

impl MockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set_insert_error(&self, err: Option<String>) {
        *self.insert_error.write().await = err;
    }

    pub async fn upsert_calls(&self) -> usize {
        *self.upsert_calls.read().await
    }
}

#[async_trait]
impl LedgerRepository for MockLedger {
    async fn ensure_schema(&self) -> CoreResult<()> {
        Ok(())
    }

    async fn upsert_owned_domains(&self, domains: &[NewOwnedDomain]) -> CoreResult<()> {
        *self.upsert_calls.write().await += 1;
        let mut owned = self.owned.write().await;
        for domain in domains {
            owned
                .entry(domain.name.clone())
                .and_modify(|row| row.status.clone_from(&domain.status))
                .or_insert_with(|| OwnedDomain {
                    name: domain.name.clone(),
                    status: domain.status.clone(),
                    expires_at: domain.expires_at,
                    obtained_at: domain.obtained_at,
                    created_at: Utc::now(),
                });
        }
        Ok(())
    }

    async fn insert_provisioned_record(&self, record: &ProvisionedRecord) -> CoreResult<()> {
        if let Some(ref msg) = *self.insert_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(CoreError::StorageError(format!(
                "duplicate record id {}",
                record.id
            )));
        }
        records.push(record.clone());
        Ok(())
    }

    async fn list_owned_domains(&self) -> CoreResult<Vec<OwnedDomain>> {
        Ok(self.owned.read().await.values().rev().cloned().collect())
    }

    async fn list_owned_domains_by_expiry(&self) -> CoreResult<Vec<OwnedDomain>> {
        let mut rows: Vec<_> = self.owned.read().await.values().cloned().collect();
        rows.sort_by(|a, b| {
            a.expires_at
                .cmp(&b.expires_at)
                .then_with(|| a.name.cmp(&b.name))
        });
        Ok(rows)
    }

    async fn list_provisioned_records(&self) -> CoreResult<Vec<ProvisionedRecord>> {
        let mut rows = self.records.read().await.clone();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(rows)
    }
}

// ===== 工厂方法 =====

/// 创建测试用 `ServiceContext`
pub fn create_test_context() -> (Arc<ServiceContext>, Arc<MockRegistrar>, Arc<MockLedger>) {
    let registrar = Arc::new(MockRegistrar::new());
    let ledger = Arc::new(MockLedger::new());
    let ctx = Arc::new(ServiceContext::new(registrar.clone(), ledger.clone()));
    (ctx, registrar, ledger)
}

/// 构造一条注册商域名
pub fn registrar_domain(name: &str, status: &str, expire_date: &str) -> RegistrarDomain {
    RegistrarDomain {
        domain: name.to_string(),
        status: status.to_string(),
        tld: name.rsplit('.').next().unwrap_or_default().to_string(),
        create_date: "2020-01-01 00:00:00".to_string(),
        expire_date: expire_date.to_string(),
        security_lock: "1".to_string(),
        whois_privacy: "1".to_string(),
        auto_renew: serde_json::Value::from(0),
        not_local: 0,
    }
}

/// 构造一条 `example.com` 下的已创建记录
pub fn provisioned_record(id: &str, prefix: &str) -> ProvisionedRecord {
    ProvisionedRecord {
        id: id.to_string(),
        prefix: prefix.to_string(),
        kind: "A".to_string(),
        base_domain: "example.com".to_string(),
        target_host: "1.2.3.4".to_string(),
        ttl: 600,
        description: String::new(),
        created_at: Utc.with_ymd_and_hms(2024, 3, 7, 12, 0, 0).single().unwrap_or_default(),
    }
}
