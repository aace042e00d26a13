//! 展示层投影类型

use std::fmt;

use serde::{Deserialize, Serialize};

use domain_ledger_provider::RegistrarDomain;

use super::ProvisionedRecord;
use crate::utils::datetime::format_ledger_date;

/// 展示用的域名条目（不持久化）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainInfo {
    pub tag: String,
    pub name: String,
    /// 不适用时为空字符串
    pub target: String,
    pub date: String,
}

impl From<&RegistrarDomain> for DomainInfo {
    fn from(domain: &RegistrarDomain) -> Self {
        Self {
            tag: domain.status.clone(),
            name: domain.domain.clone(),
            target: String::new(),
            date: domain.expire_date.clone(),
        }
    }
}

impl From<&ProvisionedRecord> for DomainInfo {
    fn from(record: &ProvisionedRecord) -> Self {
        Self {
            tag: record.kind.clone(),
            name: format!("{}.{}", record.prefix, record.base_domain),
            target: record.target_host.clone(),
            date: format_ledger_date(&record.created_at),
        }
    }
}

/// 域名视图的数据来源
///
/// 由调用方选择，引擎本身不做回退。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DomainSource {
    /// 从注册商拉取最新列表并写入账本
    FetchFresh,
    /// 只读本地已创建的记录
    #[default]
    LocalView,
}

impl DomainSource {
    /// `FetchFresh` 在请求中的取值
    pub const FETCH_LISTING: &'static str = "fetch-listing";

    /// 解析请求中的 `kind` 字段；缺失或其他任何值都视为本地视图
    pub fn from_kind(kind: Option<&str>) -> Self {
        match kind {
            Some(Self::FETCH_LISTING) => Self::FetchFresh,
            _ => Self::LocalView,
        }
    }
}

impl fmt::Display for DomainSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FetchFresh => f.write_str(Self::FETCH_LISTING),
            Self::LocalView => f.write_str("local-view"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn source_from_kind() {
        assert_eq!(
            DomainSource::from_kind(Some("fetch-listing")),
            DomainSource::FetchFresh
        );
        assert_eq!(DomainSource::from_kind(Some("")), DomainSource::LocalView);
        assert_eq!(
            DomainSource::from_kind(Some("Fetch-Listing")),
            DomainSource::LocalView
        );
        assert_eq!(DomainSource::from_kind(None), DomainSource::LocalView);
    }

    #[test]
    fn record_projection() {
        let record = ProvisionedRecord {
            id: "x".into(),
            prefix: "www".into(),
            kind: "A".into(),
            base_domain: "example.com".into(),
            target_host: "1.2.3.4".into(),
            ttl: 600,
            description: String::new(),
            created_at: Utc.with_ymd_and_hms(2024, 3, 7, 23, 59, 0).unwrap(),
        };
        let info = DomainInfo::from(&record);
        assert_eq!(info.tag, "A");
        assert_eq!(info.name, "www.example.com");
        assert_eq!(info.target, "1.2.3.4");
        assert_eq!(info.date, "2024.03.07");
    }

    #[test]
    fn registrar_projection_uses_raw_expiry() {
        let domain: RegistrarDomain = serde_json::from_value(serde_json::json!({
            "domain": "a.com",
            "status": "ACTIVE",
            "expireDate": "2030-01-01 00:00:00"
        }))
        .unwrap();
        let info = DomainInfo::from(&domain);
        assert_eq!(info.tag, "ACTIVE");
        assert_eq!(info.target, "");
        assert_eq!(info.date, "2030-01-01 00:00:00");
    }
}
