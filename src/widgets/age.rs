//! Age calculator
//!
//! Calendar age arithmetic for the "time lived" widget and the birthday
//! detection that triggers the celebration overlay.

use chrono::{DateTime, Datelike, NaiveDate, Utc};

/// Elapsed lifetime broken into calendar and clock components.
///
/// Years/months/days are calendar arithmetic (days borrow from the
/// previous month's length, months borrow from years); hours/minutes/
/// seconds are the current-day remainder of the total elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeInfo {
    pub years: i32,
    pub months: i32,
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

/// Compute the age at `now` for someone born on `birth` (midnight UTC)
pub fn calculate_age(birth: NaiveDate, now: DateTime<Utc>) -> AgeInfo {
    let today = now.date_naive();

    let mut years = today.year() - birth.year();
    let mut months = today.month() as i32 - birth.month() as i32;
    let mut days = today.day() as i64 - birth.day() as i64;

    if days < 0 {
        months -= 1;
        days += days_in_previous_month(today);
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    let birth_midnight = birth.and_time(chrono::NaiveTime::MIN).and_utc();
    let total_seconds = (now - birth_midnight).num_seconds().max(0);

    AgeInfo {
        years,
        months,
        days,
        hours: (total_seconds % 86_400) / 3_600,
        minutes: (total_seconds % 3_600) / 60,
        seconds: total_seconds % 60,
    }
}

/// Whether `today` is the anniversary of `birth` (month and day match)
pub fn is_birthday(birth: NaiveDate, today: NaiveDate) -> bool {
    birth.month() == today.month() && birth.day() == today.day()
}

/// Number of days in the month before the one `date` falls in
fn days_in_previous_month(date: NaiveDate) -> i64 {
    let first_of_month =
        NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
    let last_of_previous = first_of_month.pred_opt().unwrap_or(first_of_month);
    last_of_previous.day() as i64
}
