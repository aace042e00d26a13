//! 账本对账服务
//!
//! 从注册商拉取域名列表写入账本，并生成展示用视图。

use std::sync::Arc;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::{DomainInfo, DomainSource, NewOwnedDomain, OwnedDomain};

/// 账本对账服务
pub struct ReconciliationService {
    ctx: Arc<ServiceContext>,
}

impl ReconciliationService {
    /// 创建对账服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 按调用方选择的来源生成域名视图
    pub async fn domain_view(&self, source: DomainSource) -> CoreResult<Vec<DomainInfo>> {
        log::debug!("Building domain view from {source}");
        match source {
            DomainSource::FetchFresh => self.refresh_from_registrar().await,
            DomainSource::LocalView => self.view_from_ledger().await,
        }
    }

    /// 拉取注册商列表并写入账本
    ///
    /// 返回本次拉取到的注册商数据（而不是账本中的行），顺序与注册商一致。
    /// 拉取失败或任意一行日期无法解析时，账本不会被修改。
    pub async fn refresh_from_registrar(&self) -> CoreResult<Vec<DomainInfo>> {
        let domains = self.ctx.registrar.list_all_domains().await?;

        // 先全部转换，保证整批要么全部写入要么完全不写
        let rows = domains
            .iter()
            .map(NewOwnedDomain::try_from)
            .collect::<CoreResult<Vec<_>>>()?;

        self.ctx.ledger.upsert_owned_domains(&rows).await?;
        log::info!(
            "Reconciled {} domains from {}",
            rows.len(),
            self.ctx.registrar.id()
        );

        Ok(domains.iter().map(DomainInfo::from).collect())
    }

    /// 本地视图：只读账本中已创建的记录，不访问注册商
    pub async fn view_from_ledger(&self) -> CoreResult<Vec<DomainInfo>> {
        let records = self.ctx.ledger.list_provisioned_records().await?;
        Ok(records.iter().map(DomainInfo::from).collect())
    }

    /// 账本中的域名名称（按名称降序）
    pub async fn owned_domain_names(&self) -> CoreResult<Vec<String>> {
        let domains = self.ctx.ledger.list_owned_domains().await?;
        Ok(domains.into_iter().map(|d| d.name).collect())
    }

    /// 账本中的域名（按到期时间升序）
    pub async fn owned_domains_by_expiry(&self) -> CoreResult<Vec<OwnedDomain>> {
        self.ctx.ledger.list_owned_domains_by_expiry().await
    }
}
