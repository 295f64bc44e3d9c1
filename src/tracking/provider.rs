//! Assessment provider capability.
//!
//! Image recognition lives outside this crate. The core hands a capture
//! reference to an [`AssessmentProvider`] and treats any failure as a reason
//! to reject ingestion; it never fabricates a record.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::ingest::{CONFIDENCE_MAX, CONFIDENCE_MIN};
use crate::models::{RawAssessment, Severity};

/// Reference to an image captured by the host (path, URI or opaque key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureRef {
    pub image: String,
    pub captured_at: NaiveDateTime,
    #[serde(default)]
    pub location: Option<String>,
}

/// What a provider returns for one capture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderAssessment {
    /// Best guess at the insect; `None` when the provider cannot tell.
    pub insect: Option<String>,
    pub severity: i64,
    pub symptoms: Vec<String>,
    pub confidence: Option<f64>,
    pub recommendations: Vec<String>,
}

impl ProviderAssessment {
    /// Check the provider's output before it reaches ingestion or the
    /// analysis history. A malformed result is an upstream failure, not a
    /// caller error.
    pub fn validate(&self) -> Result<Severity, ProviderError> {
        let severity = Severity::new(self.severity)
            .map_err(|e| ProviderError::AnalysisFailed(format!("provider returned {e}")))?;
        if let Some(confidence) = self.confidence {
            if !(confidence.is_finite()
                && (CONFIDENCE_MIN..=CONFIDENCE_MAX).contains(&confidence))
            {
                return Err(ProviderError::AnalysisFailed(format!(
                    "provider returned confidence {confidence} outside \
                     {CONFIDENCE_MIN}..={CONFIDENCE_MAX}"
                )));
            }
        }
        Ok(severity)
    }

    /// Pair the provider output with the capture time for ingestion.
    pub fn into_raw(self, captured_at: NaiveDateTime) -> RawAssessment {
        RawAssessment {
            captured_at,
            severity: self.severity,
            symptoms: self.symptoms,
            confidence: self.confidence,
            recommendations: self.recommendations,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Assessment provider unavailable: {0}")]
    Unavailable(String),
    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
}

/// Abstraction over the image assessment backend (allows mocking).
pub trait AssessmentProvider: Send + Sync {
    fn assess(&self, capture: &CaptureRef) -> Result<ProviderAssessment, ProviderError>;
}

/// Deterministic provider that always returns the configured assessment.
/// Stands in for a recognition model during development and demos.
#[derive(Debug, Clone)]
pub struct SimulatedProvider {
    result: ProviderAssessment,
}

impl SimulatedProvider {
    pub fn new(result: ProviderAssessment) -> Self {
        Self { result }
    }
}

impl Default for SimulatedProvider {
    fn default() -> Self {
        Self::new(ProviderAssessment {
            insect: Some("Mosquito".into()),
            severity: 3,
            symptoms: vec!["Itching".into(), "Redness".into(), "Mild swelling".into()],
            confidence: Some(92.0),
            recommendations: vec![
                "Apply a cold compress".into(),
                "Avoid scratching".into(),
                "An antihistamine cream may help".into(),
            ],
        })
    }
}

impl AssessmentProvider for SimulatedProvider {
    fn assess(&self, capture: &CaptureRef) -> Result<ProviderAssessment, ProviderError> {
        if capture.image.trim().is_empty() {
            return Err(ProviderError::AnalysisFailed("empty image reference".into()));
        }
        Ok(self.result.clone())
    }
}
