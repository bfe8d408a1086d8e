//! Record definitions: the two collections StudyDesk keeps on disk.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Color given to tasks created without one.
pub const DEFAULT_TASK_COLOR: &str = "#5A91E6";

/// A to-do item for a study subject.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Time-derived numeric id, assigned at creation.
    pub id: i64,
    pub subject: String,
    /// A stored `null` reads as the default color.
    #[serde(default = "default_color", deserialize_with = "color_or_default")]
    pub color: String,
    /// Older files may hold tasks without this key, or with `null`; they read as not completed.
    #[serde(default, deserialize_with = "null_as_false")]
    pub completed: bool,
}

fn default_color() -> String {
    DEFAULT_TASK_COLOR.to_string()
}

fn color_or_default<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(d)?.unwrap_or_else(default_color))
}

fn null_as_false<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(d)?.unwrap_or(false))
}

impl Task {
    /// Create a task, filling in the default color and completion state.
    pub fn new(id: i64, subject: &str, color: Option<String>, completed: Option<bool>) -> Self {
        Self {
            id,
            subject: subject.to_string(),
            color: color.unwrap_or_else(default_color),
            completed: completed.unwrap_or(false),
        }
    }

    /// Compare a path-supplied id against this task's numeric id.
    ///
    /// Tolerates surrounding whitespace and float spellings (`"17.0"`).
    /// Anything that is not a number never matches.
    pub fn matches_id(&self, raw: &str) -> bool {
        let raw = raw.trim();
        if let Ok(n) = raw.parse::<i64>() {
            return n == self.id;
        }
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => f == self.id as f64,
            _ => false,
        }
    }
}

/// One logged block of study time. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudyEntry {
    pub subject: String,
    /// Caller-defined unit and type; kept exactly as submitted.
    #[serde(rename = "timeSpent")]
    pub time_spent: Value,
    /// ISO-8601 UTC timestamp with millisecond precision.
    pub date: String,
}

impl StudyEntry {
    /// Create an entry stamped at `at`.
    pub fn new(subject: &str, time_spent: Value, at: DateTime<Utc>) -> Self {
        Self {
            subject: subject.to_string(),
            time_spent,
            date: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Truthiness of a submitted JSON value: `null`, `false`, `0`, and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_task_defaults() {
        let task = Task::new(1, "Math", None, None);
        assert_eq!(task.color, "#5A91E6");
        assert!(!task.completed);

        let task = Task::new(2, "Art", Some("#FF0000".into()), Some(true));
        assert_eq!(task.color, "#FF0000");
        assert!(task.completed);
    }

    #[test]
    fn test_matches_id_coercive() {
        let task = Task::new(1739000000123, "Math", None, None);
        assert!(task.matches_id("1739000000123"));
        assert!(task.matches_id(" 1739000000123 "));
        assert!(task.matches_id("1739000000123.0"));
        assert!(!task.matches_id("1739000000124"));
        assert!(!task.matches_id("abc"));
        assert!(!task.matches_id(""));
        assert!(!task.matches_id("NaN"));
    }

    #[test]
    fn test_task_tolerates_missing_completed() {
        let json = r##"{"id": 5, "subject": "Chem", "color": "#000"}"##;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(!task.completed);
        assert_eq!(task.color, "#000");
    }

    #[test]
    fn test_study_entry_wire_format() {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 30, 0).unwrap();
        let entry = StudyEntry::new("Physics", json!(25), at);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["subject"], "Physics");
        assert_eq!(json["timeSpent"], 25);
        assert_eq!(json["date"], "2026-10-19T08:30:00.000Z");
        assert!(json.get("time_spent").is_none());
    }

    #[test]
    fn test_study_entry_keeps_fractional_time() {
        let at = Utc::now();
        let entry = StudyEntry::new("Bio", json!(2.5), at);
        let text = serde_json::to_string(&entry).unwrap();
        assert!(text.contains("\"timeSpent\":2.5"));
    }

    #[test]
    fn test_task_null_fields_read_as_defaults() {
        let json = r#"{"id": 1739000000000, "subject": "Math", "color": null, "completed": null}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.color, DEFAULT_TASK_COLOR);
        assert!(!task.completed);
    }

    #[test]
    fn test_study_entry_keeps_string_time() {
        let json = r#"{"subject": "Physics", "timeSpent": "25", "date": "2025-02-08T10:00:00.000Z"}"#;
        let entry: StudyEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.time_spent, json!("25"));
        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["timeSpent"], "25");
    }

    #[test]
    fn test_truthiness() {
        for v in [json!(25), json!(-1), json!(0.5), json!("25"), json!("0"), json!(true), json!([]), json!({})] {
            assert!(is_truthy(&v), "{v}");
        }
        for v in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_truthy(&v), "{v}");
        }
    }
}
