//! Date formatting for ledger views.

use chrono::{DateTime, Utc};

/// Display format of `created_at` in the local view, e.g. `2024.03.07`.
pub const LEDGER_DATE_FORMAT: &str = "%Y.%m.%d";

/// Formats a ledger timestamp as `YYYY.MM.DD` (UTC).
pub fn format_ledger_date(dt: &DateTime<Utc>) -> String {
    dt.format(LEDGER_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn pads_month_and_day() {
        let dt = Utc.with_ymd_and_hms(2025, 1, 9, 0, 0, 1).unwrap();
        assert_eq!(format_ledger_date(&dt), "2025.01.09");
    }
}
