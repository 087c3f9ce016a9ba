//! Date and time formatting for table cells.
//!
//! The API emits both RFC 3339 timestamps and naive ISO timestamps
//! (no offset). Both are rendered US-style.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Format an ISO timestamp as "MM/DD/YYYY HH:MM".
/// Example: "2024-03-15T14:02:26.123Z" -> "03/15/2024 14:02"
pub fn format_datetime(datetime_str: &str) -> String {
    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime_str) {
        return dt.format("%m/%d/%Y %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%dT%H:%M:%S%.f") {
        return dt.format("%m/%d/%Y %H:%M").to_string();
    }
    datetime_str.to_string()
}

/// Format an ISO date or timestamp as "MM/DD/YYYY".
/// Example: "2024-03-15" or "2024-03-15T14:02:26Z" -> "03/15/2024"
pub fn format_date(date_str: &str) -> String {
    let date_part = date_str.split('T').next().unwrap_or(date_str);
    if let Ok(date) = NaiveDate::parse_from_str(date_part, "%Y-%m-%d") {
        return date.format("%m/%d/%Y").to_string();
    }
    date_str.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_datetime() {
        assert_eq!(
            format_datetime("2024-03-15T14:02:26.123Z"),
            "03/15/2024 14:02"
        );
        // naive timestamps straight out of the database
        assert_eq!(
            format_datetime("2024-12-31T23:59:59.482910"),
            "12/31/2024 23:59"
        );
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-03-15"), "03/15/2024");
        assert_eq!(format_date("2024-03-15T14:02:26.123Z"), "03/15/2024");
    }

    #[test]
    fn test_invalid_input_passes_through() {
        assert_eq!(format_datetime("pending"), "pending");
        assert_eq!(format_date("n/a"), "n/a");
    }
}
