//! Utility modules

pub mod datetime;
pub mod id;
