//! Shared types for the HTTP layer.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::api::error::ApiError;
use crate::core_state::CoreState;
use crate::models::{Alert, PhotoAssessment, TrackingCase};
use crate::tracking::IngestOutcome;

/// Shared context for all API routes.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}

/// Case identifiers arrive as path strings; anything that is not a UUID
/// cannot name an existing case.
pub fn parse_case_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound(format!("case {raw}")))
}

/// Case as sent to clients: the stored case plus read-side hints.
#[derive(Debug, Serialize)]
pub struct CaseView {
    #[serde(flatten)]
    pub case: TrackingCase,
    pub overall_trend: crate::models::enums::HealingLabel,
    pub requires_emergency_care: bool,
}

impl From<TrackingCase> for CaseView {
    fn from(case: TrackingCase) -> Self {
        Self {
            overall_trend: case.overall_trend(),
            requires_emergency_care: case.requires_emergency_care(),
            case,
        }
    }
}

/// Response for every write that appends an assessment.
#[derive(Debug, Serialize)]
pub struct IngestResponse {
    pub assessment: PhotoAssessment,
    pub case: CaseView,
    pub alert: Option<Alert>,
}

impl From<IngestOutcome> for IngestResponse {
    fn from(out: IngestOutcome) -> Self {
        Self {
            assessment: out.assessment,
            case: out.case.into(),
            alert: out.alert,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_case_id_is_not_found() {
        assert!(matches!(parse_case_id("abc"), Err(ApiError::NotFound(_))));
        assert_eq!(parse_case_id(&Uuid::nil().to_string()).unwrap(), Uuid::nil());
    }
}
