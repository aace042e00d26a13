//! 记录创建请求类型

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// 操作员提交的记录创建请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisionRequest {
    /// 记录所在域名
    pub domain: String,
    /// TTL（分钟）
    pub ttl: i64,
    /// 记录类型
    pub kind: String,
    /// 子域名标签，`*` 表示根域名
    pub prefix: String,
    /// 记录值
    pub host: String,
    #[serde(default)]
    pub description: String,
}

impl ProvisionRequest {
    /// 入口校验：必填字段非空，TTL 为正
    pub fn validate(&self) -> CoreResult<()> {
        for (field, value) in [
            ("domain", &self.domain),
            ("kind", &self.kind),
            ("prefix", &self.prefix),
            ("host", &self.host),
        ] {
            if value.trim().is_empty() {
                return Err(CoreError::ValidationError(format!(
                    "{field} cannot be empty"
                )));
            }
        }

        if self.ttl <= 0 {
            return Err(CoreError::ValidationError(format!(
                "ttl must be a positive number of minutes, got {}",
                self.ttl
            )));
        }

        self.ttl_seconds().map(|_| ())
    }

    /// 分钟转秒，溢出时报校验错误
    pub fn ttl_seconds(&self) -> CoreResult<u32> {
        self.ttl
            .checked_mul(60)
            .and_then(|secs| u32::try_from(secs).ok())
            .ok_or_else(|| {
                CoreError::ValidationError(format!("ttl of {} minutes is out of range", self.ttl))
            })
    }
}

/// 单个创建请求的状态流转
///
/// `Received → RegistrarCallPending → RegistrarConfirmed → PersistencePending → Persisted`，
/// 失败分支为 `RegistrarRejected` 和 `PersistenceFailed`，不存在回退。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionState {
    Received,
    RegistrarCallPending,
    RegistrarConfirmed,
    RegistrarRejected,
    PersistencePending,
    Persisted,
    PersistenceFailed,
}

impl ProvisionState {
    /// 是否为终止状态
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::RegistrarRejected | Self::Persisted | Self::PersistenceFailed
        )
    }
}

impl fmt::Display for ProvisionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Received => "received",
            Self::RegistrarCallPending => "registrar-call-pending",
            Self::RegistrarConfirmed => "registrar-confirmed",
            Self::RegistrarRejected => "registrar-rejected",
            Self::PersistencePending => "persistence-pending",
            Self::Persisted => "persisted",
            Self::PersistenceFailed => "persistence-failed",
        };
        f.write_str(s)
    }
}
