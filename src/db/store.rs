//! SQLite-backed `TrackingStore`.

use rusqlite::Connection;
use uuid::Uuid;

use super::repository::{
    get_tracking_case, insert_analysis_record, insert_assessment, insert_tracking_case,
    list_analysis_records, list_tracking_cases, update_case_summary,
};
use super::DatabaseError;
use crate::models::{AnalysisRecord, PhotoAssessment, TrackingCase};
use crate::tracking::store::TrackingStore;

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Wrap an already-migrated connection (see `open_database`).
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl TrackingStore for SqliteStore {
    fn insert_case(&mut self, case: &TrackingCase) -> Result<(), DatabaseError> {
        let tx = self.conn.transaction()?;
        insert_tracking_case(&tx, case)?;
        for (seq, assessment) in case.history.iter().enumerate() {
            insert_assessment(&tx, &case.id, seq, assessment)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn append_assessment(
        &mut self,
        case: &TrackingCase,
        assessment: &PhotoAssessment,
    ) -> Result<(), DatabaseError> {
        let seq = case
            .history
            .iter()
            .position(|a| a.id == assessment.id)
            .ok_or_else(|| {
                DatabaseError::ConstraintViolation(format!(
                    "assessment {} is not part of case {}",
                    assessment.id, case.id
                ))
            })?;

        let tx = self.conn.transaction()?;
        insert_assessment(&tx, &case.id, seq, assessment)?;
        update_case_summary(&tx, case)?;
        tx.commit()?;
        Ok(())
    }

    fn get_case(&self, id: &Uuid) -> Result<Option<TrackingCase>, DatabaseError> {
        get_tracking_case(&self.conn, id)
    }

    fn list_cases(&self) -> Result<Vec<TrackingCase>, DatabaseError> {
        list_tracking_cases(&self.conn)
    }

    fn insert_analysis(&mut self, record: &AnalysisRecord) -> Result<(), DatabaseError> {
        insert_analysis_record(&self.conn, record)
    }

    fn list_analyses(&self) -> Result<Vec<AnalysisRecord>, DatabaseError> {
        list_analysis_records(&self.conn)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::db::sqlite::{open_database, open_memory_database};
    use crate::models::enums::{CaseStatus, HealingLabel, Urgency};
    use crate::models::RawAssessment;
    use crate::tracking::notify::RecordingNotifier;
    use crate::tracking::provider::SimulatedProvider;
    use crate::tracking::{NewCase, TrackingError, TrackingService};

    fn at(day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(9, 45, 0)
            .unwrap()
    }

    fn raw(day: u32, severity: i64) -> RawAssessment {
        RawAssessment {
            captured_at: at(day),
            severity,
            symptoms: vec!["Redness".into(), "Itching".into()],
            confidence: Some(88.0),
            recommendations: vec!["Keep out of the sun".into()],
        }
    }

    fn service_over(conn: Connection) -> TrackingService {
        TrackingService::new(
            Box::new(SqliteStore::new(conn)),
            Arc::new(SimulatedProvider::default()),
            Arc::new(RecordingNotifier::new()),
        )
    }

    fn new_case(severity: i64) -> NewCase {
        NewCase {
            title: "Mosquito bite - left arm".into(),
            insect_type: Some("Mosquito".into()),
            assessment: raw(10, severity),
        }
    }

    #[test]
    fn service_state_matches_store() {
        let mut svc = service_over(open_memory_database().unwrap());
        let created = svc.create_case(new_case(6)).unwrap();
        let out = svc.ingest(&created.case.id, &raw(12, 4)).unwrap();

        let stored = svc.get_case(&created.case.id).unwrap();
        assert_eq!(stored, out.case);
        assert_eq!(stored.history.len(), 2);
        assert_eq!(stored.history[1].healing_label, HealingLabel::Improving);
    }

    #[test]
    fn rejected_ingestion_writes_nothing() {
        let mut svc = service_over(open_memory_database().unwrap());
        let created = svc.create_case(new_case(5)).unwrap();
        assert!(matches!(
            svc.ingest(&created.case.id, &raw(11, 11)),
            Err(TrackingError::InvalidAssessment { .. })
        ));
        assert!(svc.ingest(&created.case.id, &raw(9, 4)).is_err());
        assert_eq!(svc.get_case(&created.case.id).unwrap().history.len(), 1);
    }

    #[test]
    fn survives_reopen_of_file_database() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bitecheck.db");

        let case_id = {
            let mut svc = service_over(open_database(&path).unwrap());
            let created = svc.create_case(new_case(8)).unwrap();
            svc.ingest(&created.case.id, &raw(14, 9)).unwrap();
            created.case.id
        };

        let svc = service_over(open_database(&path).unwrap());
        let case = svc.get_case(&case_id).unwrap();
        assert_eq!(case.status, CaseStatus::NeedsAttention);
        assert_eq!(case.latest_urgency(), Some(Urgency::Emergency));
        assert_eq!(case.initial_severity.value(), 8);
        assert_eq!(case.current_severity.value(), 9);
        assert_eq!(case.last_updated_at, at(14));
    }

    #[test]
    fn emergency_dedup_survives_restart() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("bitecheck.db");

        let case_id = {
            let mut svc = service_over(open_database(&path).unwrap());
            let created = svc.create_case(new_case(8)).unwrap();
            assert!(svc.ingest(&created.case.id, &raw(14, 9)).unwrap().alert.is_some());
            created.case.id
        };

        let notifier = Arc::new(RecordingNotifier::new());
        let mut svc = TrackingService::new(
            Box::new(SqliteStore::new(open_database(&path).unwrap())),
            Arc::new(SimulatedProvider::default()),
            notifier.clone(),
        );
        let out = svc.ingest(&case_id, &raw(15, 10)).unwrap();
        assert!(out.alert.is_none());
        assert!(notifier.sent().is_empty());

        svc.ingest(&case_id, &raw(16, 5)).unwrap();
        assert!(svc.ingest(&case_id, &raw(17, 9)).unwrap().alert.is_some());
        assert_eq!(notifier.sent().len(), 1);
    }

    #[test]
    fn append_rejects_foreign_assessment() {
        let mut store = SqliteStore::new(open_memory_database().unwrap());
        let mut svc_case = {
            let mut svc = service_over(open_memory_database().unwrap());
            svc.create_case(new_case(5)).unwrap()
        };
        store.insert_case(&svc_case.case).unwrap();
        svc_case.assessment.id = Uuid::new_v4();
        assert!(matches!(
            store.append_assessment(&svc_case.case, &svc_case.assessment),
            Err(DatabaseError::ConstraintViolation(_))
        ));
    }
}
