pub mod owned_domain;
pub mod provisioned_record;
