//! 类型定义模块

mod ledger;
mod provision;
mod view;

pub use ledger::{NewOwnedDomain, OwnedDomain, ProvisionedRecord};
pub use provision::{ProvisionRequest, ProvisionState};
pub use view::{DomainInfo, DomainSource};

// Re-export provider 库的公共类型
pub use domain_ledger_provider::{
    CreateRecordRequest, CreatedRecord, RecordName, RegistrarDomain, WILDCARD_SENTINEL,
};
