//! 注册商日期时间解析
//!
//! 注册商返回的日期格式为 `YYYY-MM-DD HH:MM:SS`（UTC，无时区后缀）。

use chrono::{DateTime, NaiveDateTime, Utc};

/// Registrar wire format for `createDate` / `expireDate`.
pub const REGISTRAR_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// 解析注册商日期字符串为 UTC 时间
pub fn parse_registrar_datetime(value: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(value.trim(), REGISTRAR_DATETIME_FORMAT).map(|dt| dt.and_utc())
}
