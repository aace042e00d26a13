//! 账本持久化类型定义

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use domain_ledger_provider::RegistrarDomain;
use domain_ledger_provider::datetime::parse_registrar_datetime;

use crate::error::CoreError;

/// 注册商账户当前持有的域名（账本行）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnedDomain {
    /// 完整域名，唯一键
    pub name: String,
    /// 注册商生命周期状态，如 `ACTIVE`
    pub status: String,
    pub expires_at: DateTime<Utc>,
    pub obtained_at: DateTime<Utc>,
    /// 首次写入账本的时间，之后不再修改
    pub created_at: DateTime<Utc>,
}

/// 待写入账本的域名行
///
/// 已存在同名行时仅更新 `status`，`expires_at` / `obtained_at` 保持首次观察到的值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOwnedDomain {
    pub name: String,
    pub status: String,
    pub expires_at: DateTime<Utc>,
    pub obtained_at: DateTime<Utc>,
}

impl TryFrom<&RegistrarDomain> for NewOwnedDomain {
    type Error = CoreError;

    fn try_from(domain: &RegistrarDomain) -> Result<Self, Self::Error> {
        let parse = |field: &str, value: &str| {
            parse_registrar_datetime(value).map_err(|e| CoreError::InvalidRegistrarData {
                domain: domain.domain.clone(),
                detail: format!("{field} '{value}': {e}"),
            })
        };

        Ok(Self {
            name: domain.domain.clone(),
            status: domain.status.clone(),
            expires_at: parse("expireDate", &domain.expire_date)?,
            obtained_at: parse("createDate", &domain.create_date)?,
        })
    }
}

/// 操作员创建的 DNS 记录（账本行）
///
/// 仅在注册商确认创建后写入，之后不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionedRecord {
    pub id: String,
    /// 子域名标签，或通配符 `*`
    pub prefix: String,
    /// 记录类型，如 `A` / `CNAME`
    pub kind: String,
    /// 记录所在域名（不是外键）
    pub base_domain: String,
    pub target_host: String,
    /// TTL（秒）
    pub ttl: u32,
    pub description: String,
    pub created_at: DateTime<Utc>,
}
