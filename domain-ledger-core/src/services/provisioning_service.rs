//! DNS 记录创建服务
//!
//! 先调用注册商创建记录，注册商确认后再写入账本。任何一步都不重试。

use std::sync::Arc;

use chrono::Utc;
use domain_ledger_provider::normalize_domain_name;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::types::{
    CreateRecordRequest, ProvisionRequest, ProvisionState, ProvisionedRecord, RecordName,
};
use crate::utils::id::generate_record_id;

/// DNS 记录创建服务
pub struct ProvisioningService {
    ctx: Arc<ServiceContext>,
}

impl ProvisioningService {
    /// 创建服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 创建一条 DNS 记录
    ///
    /// 请求应已通过 [`ProvisionRequest::validate`]。域名在发给注册商和写入账本前
    /// 统一规范化（去空白、去末尾的点、转小写）。
    ///
    /// # Errors
    /// * `Registrar` - 注册商拒绝或不可达，账本未被修改
    /// * `PersistenceAfterProvision` - 注册商已创建记录，但账本写入失败
    pub async fn provision(&self, request: ProvisionRequest) -> CoreResult<ProvisionedRecord> {
        let ttl = request.ttl_seconds()?;
        let domain = normalize_domain_name(&request.domain);
        if domain.is_empty() {
            return Err(CoreError::ValidationError("domain is required".to_string()));
        }
        let target = format!("{}.{domain}", request.prefix);
        transition(&target, ProvisionState::Received);

        let registrar_request = CreateRecordRequest {
            domain: domain.clone(),
            record_type: request.kind.clone(),
            content: request.host.clone(),
            ttl,
            name: RecordName::from_prefix(&request.prefix),
        };

        transition(&target, ProvisionState::RegistrarCallPending);
        let created = match self.ctx.registrar.create_record(&registrar_request).await {
            Ok(created) => created,
            Err(e) => {
                transition(&target, ProvisionState::RegistrarRejected);
                return Err(e.into());
            }
        };
        transition(&target, ProvisionState::RegistrarConfirmed);

        let record = ProvisionedRecord {
            id: generate_record_id(),
            prefix: request.prefix,
            kind: request.kind,
            base_domain: domain,
            target_host: request.host,
            ttl,
            description: request.description,
            created_at: Utc::now(),
        };

        transition(&target, ProvisionState::PersistencePending);
        if let Err(e) = self.ctx.ledger.insert_provisioned_record(&record).await {
            transition(&target, ProvisionState::PersistenceFailed);
            log::error!(
                "Registrar record {} (registrar id {}) exists but ledger write failed: {e}",
                record.id,
                created.id.as_deref().unwrap_or("-")
            );
            return Err(CoreError::PersistenceAfterProvision {
                record_id: record.id,
                detail: e.to_string(),
            });
        }
        transition(&target, ProvisionState::Persisted);

        Ok(record)
    }
}

fn transition(target: &str, state: ProvisionState) {
    if state.is_terminal() {
        log::info!("Provisioning {target}: {state}");
    } else {
        log::debug!("Provisioning {target}: {state}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RegistrarError;
    use crate::test_utils::create_test_context;
    use crate::traits::LedgerRepository;
    use crate::types::DomainInfo;
    use crate::utils::datetime::format_ledger_date;

    fn request(prefix: &str, ttl: i64) -> ProvisionRequest {
        ProvisionRequest {
            domain: "example.com".into(),
            ttl,
            kind: "A".into(),
            prefix: prefix.into(),
            host: "1.2.3.4".into(),
            description: "test".into(),
        }
    }

    #[tokio::test]
    async fn ttl_minutes_reach_registrar_and_ledger_as_seconds() {
        let (ctx, registrar, ledger) = create_test_context();
        let svc = ProvisioningService::new(ctx);

        let record = svc.provision(request("www", 5)).await.unwrap();

        assert_eq!(record.ttl, 300);
        let sent = registrar.created_requests().await;
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].ttl, 300);
        assert_eq!(sent[0].name, RecordName::Label("www".into()));
        assert_eq!(ledger.list_provisioned_records().await.unwrap()[0].ttl, 300);
    }

    #[tokio::test]
    async fn wildcard_prefix_is_sent_as_apex_and_stored_verbatim() {
        let (ctx, registrar, ledger) = create_test_context();
        let svc = ProvisioningService::new(ctx);

        svc.provision(request("*", 10)).await.unwrap();

        assert_eq!(registrar.created_requests().await[0].name, RecordName::Apex);
        assert_eq!(ledger.list_provisioned_records().await.unwrap()[0].prefix, "*");
    }

    #[tokio::test]
    async fn registrar_rejection_persists_nothing() {
        let (ctx, registrar, ledger) = create_test_context();
        registrar
            .set_create_error(Some(RegistrarError::ApiError {
                registrar: "mock".into(),
                status_code: 500,
                status: "500 Internal Server Error".into(),
                body: r#"{"status":"ERROR"}"#.into(),
            }))
            .await;
        let svc = ProvisioningService::new(ctx);

        let before = ledger.list_provisioned_records().await.unwrap();
        let err = svc.provision(request("www", 10)).await.unwrap_err();
        let after = ledger.list_provisioned_records().await.unwrap();

        assert!(matches!(err, CoreError::Registrar(_)));
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn ledger_failure_after_registrar_success_is_reported() {
        let (ctx, registrar, ledger) = create_test_context();
        ledger.set_insert_error(Some("database is locked".into())).await;
        let svc = ProvisioningService::new(ctx);

        let err = svc.provision(request("www", 10)).await.unwrap_err();

        assert_eq!(registrar.created_requests().await.len(), 1);
        match err {
            CoreError::PersistenceAfterProvision { record_id, detail } => {
                assert_eq!(record_id.len(), 21);
                assert!(detail.contains("database is locked"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn overflowing_ttl_never_reaches_registrar() {
        let (ctx, registrar, _ledger) = create_test_context();
        let svc = ProvisioningService::new(ctx);

        let err = svc.provision(request("www", i64::MAX)).await.unwrap_err();

        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!(registrar.created_requests().await.is_empty());
    }

    #[tokio::test]
    async fn domain_is_normalized_for_registrar_and_ledger() {
        let (ctx, registrar, ledger) = create_test_context();
        let svc = ProvisioningService::new(ctx);

        let mut req = request("www", 10);
        req.domain = " Example.COM. ".into();
        let record = svc.provision(req).await.unwrap();

        assert_eq!(record.base_domain, "example.com");
        assert_eq!(registrar.created_requests().await[0].domain, "example.com");
        let stored = ledger.list_provisioned_records().await.unwrap();
        assert_eq!(stored[0].base_domain, "example.com");
        assert_eq!(DomainInfo::from(&stored[0]).name, "www.example.com");
    }

    #[tokio::test]
    async fn domain_of_only_dots_never_reaches_registrar() {
        let (ctx, registrar, _ledger) = create_test_context();
        let svc = ProvisioningService::new(ctx);

        let mut req = request("www", 10);
        req.domain = "..".into();
        let err = svc.provision(req).await.unwrap_err();

        assert!(matches!(err, CoreError::ValidationError(_)));
        assert!(registrar.created_requests().await.is_empty());
    }

    #[tokio::test]
    async fn provisioned_record_shows_up_in_local_view() {
        let (ctx, _registrar, ledger) = create_test_context();
        let svc = ProvisioningService::new(ctx);

        svc.provision(request("www", 10)).await.unwrap();

        let records = ledger.list_provisioned_records().await.unwrap();
        let info = DomainInfo::from(&records[0]);
        assert_eq!(info.tag, "A");
        assert_eq!(info.name, "www.example.com");
        assert_eq!(info.target, "1.2.3.4");
        assert_eq!(info.date, format_ledger_date(&Utc::now()));
    }
}
