//! Storage capability for cases and the analysis history.
//!
//! Implementations must make `insert_case` and `append_assessment` atomic:
//! either the whole write lands or nothing does.

use std::collections::HashMap;

use uuid::Uuid;

use crate::db::DatabaseError;
use crate::models::{AnalysisRecord, PhotoAssessment, TrackingCase};

pub trait TrackingStore: Send {
    /// Persist a new case together with its first assessment.
    fn insert_case(&mut self, case: &TrackingCase) -> Result<(), DatabaseError>;

    /// Persist `assessment` (already the last element of `case.history`) and
    /// the case's recomputed fields.
    fn append_assessment(
        &mut self,
        case: &TrackingCase,
        assessment: &PhotoAssessment,
    ) -> Result<(), DatabaseError>;

    fn get_case(&self, id: &Uuid) -> Result<Option<TrackingCase>, DatabaseError>;

    fn list_cases(&self) -> Result<Vec<TrackingCase>, DatabaseError>;

    fn insert_analysis(&mut self, record: &AnalysisRecord) -> Result<(), DatabaseError>;

    /// Newest first.
    fn list_analyses(&self) -> Result<Vec<AnalysisRecord>, DatabaseError>;
}

/// Non-durable store for tests and ephemeral hosts.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cases: HashMap<Uuid, TrackingCase>,
    analyses: Vec<AnalysisRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TrackingStore for MemoryStore {
    fn insert_case(&mut self, case: &TrackingCase) -> Result<(), DatabaseError> {
        if self.cases.contains_key(&case.id) {
            return Err(DatabaseError::ConstraintViolation(format!(
                "case {} already exists",
                case.id
            )));
        }
        self.cases.insert(case.id, case.clone());
        Ok(())
    }

    fn append_assessment(
        &mut self,
        case: &TrackingCase,
        _assessment: &PhotoAssessment,
    ) -> Result<(), DatabaseError> {
        let stored = self
            .cases
            .get_mut(&case.id)
            .ok_or_else(|| DatabaseError::NotFound {
                entity_type: "TrackingCase".into(),
                id: case.id.to_string(),
            })?;
        *stored = case.clone();
        Ok(())
    }

    fn get_case(&self, id: &Uuid) -> Result<Option<TrackingCase>, DatabaseError> {
        Ok(self.cases.get(id).cloned())
    }

    fn list_cases(&self) -> Result<Vec<TrackingCase>, DatabaseError> {
        Ok(self.cases.values().cloned().collect())
    }

    fn insert_analysis(&mut self, record: &AnalysisRecord) -> Result<(), DatabaseError> {
        self.analyses.push(record.clone());
        Ok(())
    }

    fn list_analyses(&self) -> Result<Vec<AnalysisRecord>, DatabaseError> {
        let mut out = self.analyses.clone();
        out.sort_by(|a, b| b.analyzed_at.cmp(&a.analyzed_at));
        Ok(out)
    }
}
