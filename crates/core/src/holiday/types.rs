use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::serde::deserialize_lenient_date;

/// A configured holiday as returned by the holiday collaborator.
///
/// The calendar feed names these fields `start` and `title`; both spellings are
/// accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    #[serde(alias = "start", deserialize_with = "deserialize_lenient_date")]
    pub date: NaiveDate,
    #[serde(alias = "title")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
            color: None,
        }
    }
}

/// Outcome of checking a candidate range against the holiday calendar.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictResult {
    pub blocked: bool,
    /// Human-readable blocking reasons, in day order.
    pub reasons: Vec<String>,
}

impl ConflictResult {
    /// No conflict.
    pub fn clear() -> Self {
        Self::default()
    }

    /// Blocked when at least one reason is given.
    pub fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            blocked: !reasons.is_empty(),
            reasons,
        }
    }

    /// The user-facing message for a blocked range.
    pub fn message(&self) -> String {
        format!(
            "Cannot schedule leave during holidays: {}",
            self.reasons.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_holiday_accepts_both_wire_shapes() {
        let canonical: Holiday =
            serde_json::from_str(r#"{"date": "2025-12-25", "name": "Christmas Day"}"#).unwrap();
        let feed: Holiday = serde_json::from_str(
            r##"{"start": "2025-12-25", "title": "Christmas Day", "color": "#ef4444"}"##,
        )
        .unwrap();

        assert_eq!(canonical.date, NaiveDate::from_ymd_opt(2025, 12, 25).unwrap());
        assert_eq!(feed.name, canonical.name);
        assert_eq!(feed.date, canonical.date);
        assert_eq!(feed.color.as_deref(), Some("#ef4444"));
    }

    #[test]
    fn test_conflict_result_from_reasons() {
        assert!(!ConflictResult::from_reasons(Vec::new()).blocked);

        let result = ConflictResult::from_reasons(vec!["Christmas Day".into(), "Boxing Day".into()]);
        assert!(result.blocked);
        assert_eq!(
            result.message(),
            "Cannot schedule leave during holidays: Christmas Day, Boxing Day"
        );
    }
}
