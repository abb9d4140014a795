pub mod backup;
pub mod goal;
pub mod project;
pub mod remind;
pub mod settings;
pub mod task;
pub mod template;
pub mod today;

use chrono::{NaiveDate, NaiveTime};

/// Parse a calendar date argument (YYYY-MM-DD).
pub fn parse_date(s: &str) -> Result<NaiveDate, Box<dyn std::error::Error>> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{s}', expected YYYY-MM-DD").into())
}

/// Parse a time-of-day argument (HH:MM).
pub fn parse_time(s: &str) -> Result<NaiveTime, Box<dyn std::error::Error>> {
    NaiveTime::parse_from_str(s, "%H:%M")
        .map_err(|_| format!("invalid time '{s}', expected HH:MM").into())
}
