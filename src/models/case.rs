use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::assessment::PhotoAssessment;
use super::enums::{CaseStatus, HealingLabel, Urgency};
use super::severity::Severity;

/// A single tracked bite and its full assessment history.
///
/// `history` is never empty and is ordered by `captured_at`. The cached
/// fields (`current_severity`, `status`, `last_updated_at`) are written only
/// by the aggregator in `tracking::aggregate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingCase {
    pub id: Uuid,
    pub title: String,
    pub insect_type: String,
    pub started_at: NaiveDateTime,
    pub history: Vec<PhotoAssessment>,
    pub initial_severity: Severity,
    pub current_severity: Severity,
    pub status: CaseStatus,
    pub last_updated_at: NaiveDateTime,
    /// Starts at 1; bumped each time a healed case is reopened.
    pub episode: u32,
}

impl TrackingCase {
    /// Most recent assessment by capture time.
    pub fn latest(&self) -> Option<&PhotoAssessment> {
        self.history.last()
    }

    pub fn latest_urgency(&self) -> Option<Urgency> {
        self.latest().map(|a| a.urgency)
    }

    /// Whether the host should prompt the user to seek care now.
    pub fn requires_emergency_care(&self) -> bool {
        self.latest_urgency() == Some(Urgency::Emergency)
    }

    /// Direction from the first assessment to the latest one.
    pub fn overall_trend(&self) -> HealingLabel {
        crate::tracking::trend::classify(Some(self.initial_severity), self.current_severity)
    }
}
