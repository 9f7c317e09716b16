//! Field types and input validators for tasks.
//!
//! Every value stored on a [`Task`](crate::task::Task) passes through one of the
//! parsers here first, so the store only ever holds normalised priorities,
//! calendar dates and 24-hour times.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Priority code of a task. Persisted as its single-letter code.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Priority {
    #[serde(rename = "C")]
    Critical,
    #[serde(rename = "H")]
    High,
    #[serde(rename = "N")]
    Normal,
    #[serde(rename = "L")]
    Low,
}

impl Priority {
    /// The single-letter code shown to the user and written to disk.
    pub fn code(self) -> &'static str {
        match self {
            Priority::Critical => "C",
            Priority::High => "H",
            Priority::Normal => "N",
            Priority::Low => "L",
        }
    }
}

/// An editable task field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Priority,
    Date,
    Time,
    Task,
}

/// A validated replacement value for exactly one task field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Priority(Priority),
    Date(NaiveDate),
    Time(NaiveTime),
    Text(String),
}

impl FieldValue {
    /// The field this value replaces.
    pub fn field(&self) -> Field {
        match self {
            FieldValue::Priority(_) => Field::Priority,
            FieldValue::Date(_) => Field::Date,
            FieldValue::Time(_) => Field::Time,
            FieldValue::Text(_) => Field::Task,
        }
    }
}

/// Parse a field name as typed at the edit prompt.
pub fn parse_field(s: &str) -> Option<Field> {
    match s.trim() {
        "priority" => Some(Field::Priority),
        "date" => Some(Field::Date),
        "time" => Some(Field::Time),
        "task" => Some(Field::Task),
        _ => None,
    }
}

/// Parse a priority code, case-insensitively.
pub fn parse_priority(s: &str) -> Option<Priority> {
    match s.trim().to_uppercase().as_str() {
        "C" => Some(Priority::Critical),
        "H" => Some(Priority::High),
        "N" => Some(Priority::Normal),
        "L" => Some(Priority::Low),
        _ => None,
    }
}

/// Parse a `yyyy-m-d` date. The year must have exactly four digits; month and
/// day may omit their leading zero.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let mut parts = s.trim().splitn(3, '-');
    let year = parts.next()?;
    let month = parts.next()?;
    let day = parts.next()?;
    if year.len() != 4 || !all_digits(year) || !all_digits(month) || !all_digits(day) {
        return None;
    }
    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// Parse an `h:m` 24-hour time; either part may omit its leading zero.
pub fn parse_time(s: &str) -> Option<NaiveTime> {
    let (hours, minutes) = s.trim().split_once(':')?;
    if !all_digits(hours) || !all_digits(minutes) {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    NaiveTime::from_hms_opt(hours, minutes, 0)
}

fn all_digits(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}
