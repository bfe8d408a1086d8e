//! Study-time log, an append-only collection.

use chrono::Utc;
use serde_json::Value;
use studydesk_core::{Result, StudyDeskError, StudyEntry, is_truthy};

use crate::store::Collection;

pub const MISSING_STUDY_FIELDS: &str = "Missing subject or timeSpent";

pub struct StudyService {
    store: Collection<StudyEntry>,
}

impl StudyService {
    pub fn new(store: Collection<StudyEntry>) -> Self {
        Self { store }
    }

    /// All entries, oldest first.
    pub fn list_study_time(&self) -> Result<Vec<StudyEntry>> {
        self.store.load()
    }

    /// Append an entry stamped with the current time.
    ///
    /// `time_spent` may be any truthy JSON value and is stored as given.
    /// `null`, `false`, `0`, and `""` count as missing.
    pub fn add_study_time(
        &self,
        subject: Option<&str>,
        time_spent: Option<&Value>,
    ) -> Result<StudyEntry> {
        let missing = || StudyDeskError::MissingField(MISSING_STUDY_FIELDS.into());
        let subject = subject.filter(|s| !s.trim().is_empty()).ok_or_else(missing)?;
        let time_spent = time_spent
            .filter(|v| is_truthy(v))
            .cloned()
            .ok_or_else(missing)?;

        let entry = StudyEntry::new(subject, time_spent, Utc::now());
        self.store.modify(|entries| {
            entries.push(entry.clone());
            Ok(())
        })?;
        tracing::info!("⏱️ Logged {} for {}", entry.time_spent, entry.subject);
        Ok(entry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryBlob;
    use chrono::DateTime;
    use serde_json::json;
    use std::sync::Arc;

    fn service() -> (StudyService, Arc<MemoryBlob>) {
        let blob = Arc::new(MemoryBlob::new("study_time"));
        (StudyService::new(Collection::new(blob.clone(), false)), blob)
    }

    #[test]
    fn test_add_and_list() {
        let (svc, _) = service();
        let before = Utc::now();
        svc.add_study_time(Some("Physics"), Some(&json!(25))).unwrap();
        let after = Utc::now();

        let entries = svc.list_study_time().unwrap();
        assert_eq!(entries.len(), 1);
        let last = entries.last().unwrap();
        assert_eq!(last.subject, "Physics");
        assert_eq!(last.time_spent, json!(25));

        let stamped = DateTime::parse_from_rfc3339(&last.date).unwrap();
        assert!(stamped.timestamp_millis() >= before.timestamp_millis());
        assert!(stamped.timestamp_millis() <= after.timestamp_millis());
    }

    #[test]
    fn test_appends_in_order() {
        let (svc, _) = service();
        svc.add_study_time(Some("Math"), Some(&json!(10))).unwrap();
        svc.add_study_time(Some("Art"), Some(&json!(1.5))).unwrap();
        let subjects: Vec<_> = svc
            .list_study_time()
            .unwrap()
            .into_iter()
            .map(|e| e.subject)
            .collect();
        assert_eq!(subjects, vec!["Math", "Art"]);
    }

    #[test]
    fn test_missing_fields_rejected() {
        let (svc, blob) = service();
        let cases = [
            (None, Some(json!(25))),
            (Some(""), Some(json!(25))),
            (Some("Physics"), None),
            (Some("Physics"), Some(json!(0))),
            (Some("Physics"), Some(json!(0.0))),
            (Some("Physics"), Some(json!(null))),
            (Some("Physics"), Some(json!(false))),
            (Some("Physics"), Some(json!(""))),
        ];
        for (subject, time_spent) in cases {
            let err = svc.add_study_time(subject, time_spent.as_ref()).unwrap_err();
            assert!(
                matches!(err, StudyDeskError::MissingField(ref m) if m == MISSING_STUDY_FIELDS),
                "case {subject:?} {time_spent:?}"
            );
        }
        assert!(blob.contents().is_none());
    }

    #[test]
    fn test_negative_time_is_kept() {
        let (svc, _) = service();
        let entry = svc.add_study_time(Some("Math"), Some(&json!(-5))).unwrap();
        assert_eq!(entry.time_spent, json!(-5));
    }

    #[test]
    fn test_string_time_is_kept() {
        let (svc, blob) = service();
        let entry = svc.add_study_time(Some("Math"), Some(&json!("25"))).unwrap();
        assert_eq!(entry.time_spent, json!("25"));
        let saved = blob.contents().unwrap();
        assert!(saved.contains("\"timeSpent\": \"25\""));
    }

    #[test]
    fn test_reads_existing_file() {
        let blob = MemoryBlob::with_content(
            "study_time",
            r#"[{"subject": "Chem", "timeSpent": 30, "date": "2025-01-01T00:00:00.000Z"}]"#,
        );
        let svc = StudyService::new(Collection::new(blob, false));
        svc.add_study_time(Some("Bio"), Some(&json!(5))).unwrap();
        let entries = svc.list_study_time().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].date, "2025-01-01T00:00:00.000Z");
    }

    #[test]
    fn test_reads_file_with_non_numeric_times() {
        let blob = MemoryBlob::with_content(
            "study_time",
            r#"[
  {"subject": "Physics", "timeSpent": "25", "date": "2025-02-08T10:00:00.000Z"},
  {"subject": "Art", "timeSpent": true, "date": "2025-02-08T11:00:00.000Z"}
]"#,
        );
        let svc = StudyService::new(Collection::new(blob, false));
        let entries = svc.list_study_time().unwrap();
        assert_eq!(entries[0].time_spent, json!("25"));
        assert_eq!(entries[1].time_spent, json!(true));
        svc.add_study_time(Some("Bio"), Some(&json!(5))).unwrap();
        assert_eq!(svc.list_study_time().unwrap().len(), 3);
    }
}
