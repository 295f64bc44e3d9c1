use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assessment::SymptomSet;
use super::enums::{RiskLevel, Urgency};
use super::severity::Severity;

/// Result of a one-off photo analysis, kept in the analysis history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: Uuid,
    pub analyzed_at: NaiveDateTime,
    pub insect: String,
    pub severity: Severity,
    pub risk_level: RiskLevel,
    pub confidence: Option<f64>,
    pub symptoms: SymptomSet,
    pub recommendations: Vec<String>,
    pub urgency: Urgency,
    pub location: Option<String>,
}
