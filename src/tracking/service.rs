//! `TrackingService`: the operations the host application calls.
//!
//! Every mutating operation computes the new case state on a copy, persists
//! it, and only then evaluates the alert gate. A write that fails to persist
//! is reported as a failure and leaves both the store and the alert ledger
//! untouched.

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregate;
use super::alert_gate::AlertLedger;
use super::ingest::build_assessment;
use super::notify::Notifier;
use super::provider::{AssessmentProvider, CaptureRef};
use super::stats::{self, Overview, Progress, WeeklySummary};
use super::store::TrackingStore;
use super::{trend, urgency, TrackingError};
use crate::models::enums::CaseStatus;
use crate::models::{
    Alert, AnalysisRecord, PhotoAssessment, RawAssessment, SymptomSet, TrackingCase,
};

const MAX_TITLE_LEN: usize = 200;
const UNKNOWN_INSECT: &str = "unknown";

/// Input for `create_case`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCase {
    pub title: String,
    #[serde(default)]
    pub insect_type: Option<String>,
    pub assessment: RawAssessment,
}

/// Result of a successful write: the new record, the updated case, and the
/// alert raised by it (if any).
#[derive(Debug, Clone, Serialize)]
pub struct IngestOutcome {
    pub assessment: PhotoAssessment,
    pub case: TrackingCase,
    pub alert: Option<Alert>,
}

pub struct TrackingService {
    store: Box<dyn TrackingStore>,
    provider: Arc<dyn AssessmentProvider>,
    notifier: Arc<dyn Notifier>,
    ledger: AlertLedger,
}

impl TrackingService {
    pub fn new(
        store: Box<dyn TrackingStore>,
        provider: Arc<dyn AssessmentProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            provider,
            notifier,
            ledger: AlertLedger::new(),
        }
    }

    // ── Writes ──────────────────────────────────────────────

    /// Create a case together with its first assessment.
    pub fn create_case(&mut self, new: NewCase) -> Result<IngestOutcome, TrackingError> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(invalid("title is required"));
        }
        if title.chars().count() > MAX_TITLE_LEN {
            return Err(invalid("title is too long"));
        }
        let insect_type = new
            .insect_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(UNKNOWN_INSECT)
            .to_string();

        let first = build_assessment(&new.assessment, None)?;
        let mut case = TrackingCase {
            id: Uuid::new_v4(),
            title: title.to_string(),
            insect_type,
            started_at: first.captured_at,
            initial_severity: first.severity,
            current_severity: first.severity,
            status: CaseStatus::Active,
            last_updated_at: first.captured_at,
            history: vec![first.clone()],
            episode: 1,
        };
        aggregate::recompute(&mut case);

        self.store.insert_case(&case)?;
        tracing::info!(
            case_id = %case.id,
            severity = case.current_severity.value(),
            status = case.status.as_str(),
            "Tracking case created"
        );

        let alert = self.raise_alert(&case);
        Ok(IngestOutcome {
            assessment: first,
            case,
            alert,
        })
    }

    /// Append a new assessment to an existing, non-healed case.
    pub fn ingest(
        &mut self,
        case_id: &Uuid,
        raw: &RawAssessment,
    ) -> Result<IngestOutcome, TrackingError> {
        let case = self.load(case_id)?;
        if case.status == CaseStatus::Healed {
            return Err(invalid("case is healed; reopen it or start a new case"));
        }
        self.append(case, raw, false)
    }

    /// Start a new episode on a healed case with `raw` as its first point.
    /// The assessment is still classified against the previous one.
    pub fn reopen(
        &mut self,
        case_id: &Uuid,
        raw: &RawAssessment,
    ) -> Result<IngestOutcome, TrackingError> {
        let case = self.load(case_id)?;
        if case.status != CaseStatus::Healed {
            return Err(invalid("only a healed case can be reopened"));
        }
        self.append(case, raw, true)
    }

    /// Run the assessment provider on a capture and ingest its result.
    pub fn ingest_capture(
        &mut self,
        case_id: &Uuid,
        capture: &CaptureRef,
    ) -> Result<IngestOutcome, TrackingError> {
        // Fail fast before calling the provider.
        self.load(case_id)?;
        let assessed = self
            .provider
            .assess(capture)
            .and_then(|out| out.validate().map(|_| out))
            .map_err(|e| {
                tracing::warn!(
                    case_id = %case_id,
                    error = %e,
                    "Provider failed, ingestion rejected"
                );
                TrackingError::from(e)
            })?;
        self.ingest(case_id, &assessed.into_raw(capture.captured_at))
    }

    /// One-off analysis of a capture, recorded in the analysis history.
    pub fn analyze(&mut self, capture: &CaptureRef) -> Result<AnalysisRecord, TrackingError> {
        let assessed = self.provider.assess(capture)?;
        let severity = assessed.validate()?;

        let record = AnalysisRecord {
            id: Uuid::new_v4(),
            analyzed_at: capture.captured_at,
            insect: assessed
                .insect
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_INSECT.to_string()),
            severity,
            risk_level: severity.band(),
            confidence: assessed.confidence,
            symptoms: assessed.symptoms.iter().collect::<SymptomSet>(),
            recommendations: assessed.recommendations,
            urgency: urgency::resolve(severity, trend::classify(None, severity)),
            location: capture.location.clone(),
        };

        self.store.insert_analysis(&record)?;
        tracing::info!(
            analysis_id = %record.id,
            risk = record.risk_level.as_str(),
            "Photo analyzed"
        );
        Ok(record)
    }

    // ── Reads ───────────────────────────────────────────────

    pub fn get_case(&self, case_id: &Uuid) -> Result<TrackingCase, TrackingError> {
        self.load(case_id)
    }

    /// All cases, most recently updated first.
    pub fn list_cases(&self) -> Result<Vec<TrackingCase>, TrackingError> {
        let mut cases = self.store.list_cases()?;
        cases.sort_by(|a, b| {
            b.last_updated_at
                .cmp(&a.last_updated_at)
                .then_with(|| b.started_at.cmp(&a.started_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(cases)
    }

    pub fn list_analyses(&self) -> Result<Vec<AnalysisRecord>, TrackingError> {
        Ok(self.store.list_analyses()?)
    }

    /// Risk breakdown of the analyses from the week before `now`.
    pub fn weekly_summary(&self, now: NaiveDateTime) -> Result<WeeklySummary, TrackingError> {
        Ok(stats::weekly(&self.store.list_analyses()?, now))
    }

    pub fn overview(&self) -> Result<Overview, TrackingError> {
        Ok(stats::overview(&self.store.list_cases()?))
    }

    pub fn progress(&self, case_id: &Uuid) -> Result<Progress, TrackingError> {
        Ok(stats::progress(&self.load(case_id)?))
    }

    // ── Internals ───────────────────────────────────────────

    fn load(&self, case_id: &Uuid) -> Result<TrackingCase, TrackingError> {
        self.store
            .get_case(case_id)?
            .ok_or(TrackingError::CaseNotFound(*case_id))
    }

    fn append(
        &mut self,
        mut case: TrackingCase,
        raw: &RawAssessment,
        new_episode: bool,
    ) -> Result<IngestOutcome, TrackingError> {
        let assessment = build_assessment(raw, case.latest()).map_err(|e| {
            tracing::warn!(case_id = %case.id, error = %e, "Assessment rejected");
            e
        })?;

        case.history.push(assessment.clone());
        if new_episode {
            case.episode += 1;
        }
        aggregate::recompute(&mut case);

        self.store.append_assessment(&case, &assessment)?;
        tracing::info!(
            case_id = %case.id,
            severity = assessment.severity.value(),
            healing = assessment.healing_label.as_str(),
            urgency = assessment.urgency.as_str(),
            status = case.status.as_str(),
            "Assessment ingested"
        );

        let alert = self.raise_alert(&case);
        Ok(IngestOutcome {
            assessment,
            case,
            alert,
        })
    }

    fn raise_alert(&mut self, case: &TrackingCase) -> Option<Alert> {
        let alert = self.ledger.observe(case)?;
        if let Err(e) = self.notifier.notify(&alert) {
            tracing::warn!(case_id = %case.id, error = %e, "Alert delivery failed");
        }
        Some(alert)
    }
}

fn invalid(reason: &str) -> TrackingError {
    TrackingError::InvalidAssessment {
        reason: reason.to_string(),
    }
}
