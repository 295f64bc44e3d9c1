//! Alert Gate.
//!
//! Only entry into `emergency` crosses the notification threshold. The
//! urgency last seen per case is kept in an [`AlertLedger`] owned by the
//! caller, so the same emergency is not announced twice while a drop below
//! emergency re-arms the gate.

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::enums::Urgency;
use crate::models::{Alert, TrackingCase};

pub const EMERGENCY_MESSAGE: &str =
    "Serious worsening detected in your insect bite. Seek medical care immediately.";

/// Decide whether the case's latest state warrants an alert, given the
/// urgency observed at the previous evaluation of the same case.
pub fn evaluate(case: &TrackingCase, previous: Option<Urgency>) -> Option<Alert> {
    let urgency = case.latest_urgency()?;
    if urgency != Urgency::Emergency || previous == Some(Urgency::Emergency) {
        return None;
    }
    Some(Alert {
        case_id: case.id,
        urgency,
        message: format!("{}: {EMERGENCY_MESSAGE}", case.title),
    })
}

/// Process-local record of the last urgency observed per case. Not
/// persisted: a case with no entry falls back to the urgency of its
/// second-to-last assessment, so deduplication survives a restart.
#[derive(Debug, Default)]
pub struct AlertLedger {
    last_seen: HashMap<Uuid, Urgency>,
}

impl AlertLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_seen(&self, case_id: &Uuid) -> Option<Urgency> {
        self.last_seen.get(case_id).copied()
    }

    /// Evaluate the gate for `case` and record its latest urgency.
    pub fn observe(&mut self, case: &TrackingCase) -> Option<Alert> {
        let previous = self
            .last_seen(&case.id)
            .or_else(|| prior_urgency(case));
        let alert = evaluate(case, previous);
        match case.latest_urgency() {
            Some(urgency) => {
                self.last_seen.insert(case.id, urgency);
            }
            None => {
                self.last_seen.remove(&case.id);
            }
        }
        if alert.is_none() && previous == Some(Urgency::Emergency) {
            tracing::debug!(case_id = %case.id, "Emergency already announced, suppressing alert");
        }
        alert
    }
}

/// Urgency of the assessment before the latest one, as stored in history.
fn prior_urgency(case: &TrackingCase) -> Option<Urgency> {
    let len = case.history.len();
    len.checked_sub(2).map(|i| case.history[i].urgency)
}
