//! Date and time helpers shared by forms and lists

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Today in the browser's local time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Midnight at the start of `date`
pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

/// Format an ISO datetime string for display as `YYYY-MM-DD HH:MM`.
/// Example: "2024-03-15T14:02:26.123Z" -> "2024-03-15 14:02"
///
/// Values that are not datetimes are returned unchanged.
pub fn format_datetime(datetime_str: &str) -> String {
    if let Some((date_part, time_part)) = datetime_str.split_once('T') {
        if let Some(hours_minutes) = time_part.get(..5) {
            if NaiveDate::parse_from_str(date_part, "%Y-%m-%d").is_ok() {
                return format!("{} {}", date_part, hours_minutes);
            }
        }
    }
    datetime_str.to_string()
}
