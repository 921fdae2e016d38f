//! Real-time clock formatting

use chrono::{DateTime, Datelike, TimeZone, Timelike};

/// Zero-padded `HH:MM:SS`
pub fn format_time<Tz: TimeZone>(t: &DateTime<Tz>) -> String {
    format!("{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second())
}

/// Zero-padded `DD.MM.YYYY`
pub fn format_date<Tz: TimeZone>(t: &DateTime<Tz>) -> String {
    format!("{:02}.{:02}.{}", t.day(), t.month(), t.year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_formats_are_zero_padded() {
        let t = Utc.with_ymd_and_hms(2026, 3, 7, 4, 5, 9).unwrap();
        assert_eq!(format_time(&t), "04:05:09");
        assert_eq!(format_date(&t), "07.03.2026");
    }
}
