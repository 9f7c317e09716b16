//! Task data structure.
//!
//! A task is a free-text body with a priority code and a due date and time.
//! On disk it is a flat record of four strings:
//!
//! ```json
//! {"task": "Buy milk", "priority": "C", "date": "2024-03-01", "time": "09:00"}
//! ```

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::classify::{due_color, priority_color, Mark};
use crate::fields::{FieldValue, Priority};

/// A single to-do entry. Identity is its position in the [`Database`](crate::db::Database).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "task")]
    pub text: String,
    pub priority: Priority,
    pub date: NaiveDate,
    #[serde(with = "hh_mm")]
    pub time: NaiveTime,
}

impl Task {
    pub fn new(text: impl Into<String>, priority: Priority, date: NaiveDate, time: NaiveTime) -> Self {
        Task { text: text.into(), priority, date, time }
    }

    /// Due date as `YYYY-MM-DD`.
    pub fn date_string(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }

    /// Due time as `HH:MM`.
    pub fn time_string(&self) -> String {
        self.time.format(hh_mm::FORMAT).to_string()
    }

    pub fn priority_mark(&self) -> Mark {
        priority_color(self.priority)
    }

    pub fn due_mark(&self, today: NaiveDate) -> Mark {
        due_color(self.date, today)
    }

    /// Replace one field in place.
    pub(crate) fn apply(&mut self, value: FieldValue) {
        match value {
            FieldValue::Priority(p) => self.priority = p,
            FieldValue::Date(d) => self.date = d,
            FieldValue::Time(t) => self.time = t,
            FieldValue::Text(s) => self.text = s,
        }
    }
}

/// Serde adapter keeping times as `HH:MM` without seconds.
mod hh_mm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&time.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let s = String::deserialize(deserializer)?;
        NaiveTime::parse_from_str(&s, FORMAT).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Task {
        Task::new(
            "Buy milk",
            Priority::Critical,
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_serializes_as_flat_string_record() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"task": "Buy milk", "priority": "C", "date": "2024-03-01", "time": "09:00"})
        );
    }

    #[test]
    fn test_deserializes_stored_record() {
        let task: Task = serde_json::from_str(
            r#"{"task":"Call mum\nabout Sunday","priority":"L","date":"2025-12-24","time":"18:30"}"#,
        )
        .unwrap();
        assert_eq!(task.text, "Call mum\nabout Sunday");
        assert_eq!(task.priority, Priority::Low);
        assert_eq!(task.date_string(), "2025-12-24");
        assert_eq!(task.time_string(), "18:30");
    }

    #[test]
    fn test_rejects_unknown_priority_and_bad_time() {
        let bad_priority = r#"{"task":"x","priority":"Z","date":"2025-12-24","time":"18:30"}"#;
        assert!(serde_json::from_str::<Task>(bad_priority).is_err());
        let bad_time = r#"{"task":"x","priority":"N","date":"2025-12-24","time":"25:00"}"#;
        assert!(serde_json::from_str::<Task>(bad_time).is_err());
    }

    #[test]
    fn test_marks() {
        let task = sample();
        assert_eq!(task.priority_mark(), Mark::Red);
        assert_eq!(task.due_mark(task.date), Mark::Yellow);
    }

    #[test]
    fn test_apply_replaces_one_field() {
        let mut task = sample();
        task.apply(FieldValue::Time(NaiveTime::from_hms_opt(17, 45, 0).unwrap()));
        assert_eq!(task.time_string(), "17:45");
        assert_eq!(task.text, "Buy milk");
        assert_eq!(task.priority, Priority::Critical);
    }
}
