//! Utility modules.

/// Registrar date/time parsing.
pub mod datetime;

/// Log sanitization helpers.
pub mod log_sanitizer;
