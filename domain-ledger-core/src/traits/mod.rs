//! Storage and registrar abstraction traits

mod ledger_repository;

pub use ledger_repository::LedgerRepository;

pub use domain_ledger_provider::RegistrarClient;
