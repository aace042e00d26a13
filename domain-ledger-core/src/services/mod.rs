//! 业务逻辑服务层

mod provisioning_service;
mod reconciliation_service;

pub use provisioning_service::ProvisioningService;
pub use reconciliation_service::ReconciliationService;

use std::sync::Arc;

use crate::traits::{LedgerRepository, RegistrarClient};

/// 服务上下文 - 持有所有依赖
///
/// 平台层在启动时创建一次，并注入具体的注册商客户端和账本存储。
pub struct ServiceContext {
    /// 注册商客户端
    pub registrar: Arc<dyn RegistrarClient>,
    /// 账本仓库
    pub ledger: Arc<dyn LedgerRepository>,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(registrar: Arc<dyn RegistrarClient>, ledger: Arc<dyn LedgerRepository>) -> Self {
        Self { registrar, ledger }
    }
}
