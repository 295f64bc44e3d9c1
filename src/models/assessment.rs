use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{HealingLabel, Urgency};
use super::severity::Severity;

/// Symptom labels for one assessment.
///
/// Blank labels are dropped and duplicates collapse onto the first
/// occurrence, so iteration order is insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct SymptomSet(Vec<String>);

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a label. Returns false if it was blank or already present.
    pub fn insert(&mut self, label: &str) -> bool {
        let label = label.trim();
        if label.is_empty() || self.contains(label) {
            return false;
        }
        self.0.push(label.to_string());
        true
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.iter().any(|s| s == label.trim())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for label in iter {
            set.insert(label.as_ref());
        }
        set
    }
}

impl From<Vec<String>> for SymptomSet {
    fn from(labels: Vec<String>) -> Self {
        labels.into_iter().collect()
    }
}

impl From<SymptomSet> for Vec<String> {
    fn from(set: SymptomSet) -> Self {
        set.0
    }
}

/// Candidate assessment as submitted by the host or produced by the
/// assessment provider. Nothing here is trusted until ingestion validates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawAssessment {
    pub captured_at: NaiveDateTime,
    pub severity: i64,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

/// One immutable point-in-time evaluation inside a case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotoAssessment {
    pub id: Uuid,
    pub captured_at: NaiveDateTime,
    pub severity: Severity,
    pub symptoms: SymptomSet,
    pub healing_label: HealingLabel,
    /// Advisory only; never read by control logic.
    pub confidence: Option<f64>,
    pub urgency: Urgency,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symptoms_collapse_duplicates_in_insertion_order() {
        let set: SymptomSet = ["Redness", "Swelling", " Redness ", "", "Itching"]
            .into_iter()
            .collect();
        let labels: Vec<&str> = set.iter().collect();
        assert_eq!(labels, vec!["Redness", "Swelling", "Itching"]);
    }

    #[test]
    fn insert_reports_novelty() {
        let mut set = SymptomSet::new();
        assert!(set.insert("Fever"));
        assert!(!set.insert("Fever"));
        assert!(!set.insert("   "));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn symptoms_serialize_as_array() {
        let set: SymptomSet = ["Pain", "Pain", "Heat"].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["Pain","Heat"]"#);
        let back: SymptomSet = serde_json::from_str(r#"["a","a","b"]"#).unwrap();
        assert_eq!(back.len(), 2);
    }

    #[test]
    fn raw_assessment_defaults_optional_fields() {
        let raw: RawAssessment =
            serde_json::from_str(r#"{"captured_at":"2024-01-10T14:30:00","severity":6}"#).unwrap();
        assert_eq!(raw.severity, 6);
        assert!(raw.symptoms.is_empty());
        assert!(raw.confidence.is_none());
        assert!(raw.recommendations.is_empty());
    }
}
