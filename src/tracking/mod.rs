//! Progress tracking and severity-trend engine.
//!
//! Flow for one ingestion (one atomic unit of work per case):
//! provider → `ingest` (validate + classify + resolve) → `aggregate`
//! → store → `alert_gate` → notifier.

pub mod aggregate;
pub mod alert_gate;
pub mod ingest;
pub mod notify;
pub mod provider;
pub mod service;
pub mod stats;
pub mod store;
pub mod trend;
pub mod urgency;

pub use service::{IngestOutcome, NewCase, TrackingService};

use uuid::Uuid;

use crate::db::DatabaseError;
use provider::ProviderError;

#[derive(Debug, thiserror::Error)]
pub enum TrackingError {
    #[error("Invalid assessment: {reason}")]
    InvalidAssessment { reason: String },

    #[error("Case not found: {0}")]
    CaseNotFound(Uuid),

    #[error("Assessment provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Persistence failure: {0}")]
    Persistence(#[from] DatabaseError),
}

impl From<ProviderError> for TrackingError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::Unavailable(detail) => TrackingError::ProviderUnavailable(detail),
            ProviderError::AnalysisFailed(detail) => TrackingError::AnalysisFailed(detail),
        }
    }
}
