use std::collections::HashMap;

use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::{
    get_assessments_for_case, list_all_assessments, parse_enum, parse_severity, parse_uuid,
};
use crate::db::DatabaseError;
use crate::models::enums::CaseStatus;
use crate::models::{PhotoAssessment, TrackingCase};

const CASE_COLUMNS: &str = "id, title, insect_type, started_at, initial_severity,
     current_severity, status, last_updated_at, episode";

/// Case row without its history.
struct CaseRow {
    id: String,
    title: String,
    insect_type: String,
    started_at: NaiveDateTime,
    initial_severity: i64,
    current_severity: i64,
    status: String,
    last_updated_at: NaiveDateTime,
    episode: u32,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<CaseRow> {
    Ok(CaseRow {
        id: row.get(0)?,
        title: row.get(1)?,
        insect_type: row.get(2)?,
        started_at: row.get(3)?,
        initial_severity: row.get(4)?,
        current_severity: row.get(5)?,
        status: row.get(6)?,
        last_updated_at: row.get(7)?,
        episode: row.get(8)?,
    })
}

impl CaseRow {
    fn into_case(
        self,
        history: Vec<PhotoAssessment>,
    ) -> Result<TrackingCase, DatabaseError> {
        Ok(TrackingCase {
            id: parse_uuid(&self.id)?,
            title: self.title,
            insect_type: self.insect_type,
            started_at: self.started_at,
            history,
            initial_severity: parse_severity(self.initial_severity)?,
            current_severity: parse_severity(self.current_severity)?,
            status: parse_enum::<CaseStatus>(&self.status)?,
            last_updated_at: self.last_updated_at,
            episode: self.episode,
        })
    }
}

/// Inserts the case row only; assessments are inserted separately.
pub fn insert_tracking_case(conn: &Connection, case: &TrackingCase) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO tracking_cases (id, title, insect_type, started_at, initial_severity,
         current_severity, status, last_updated_at, episode)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            case.id.to_string(),
            case.title,
            case.insect_type,
            case.started_at,
            case.initial_severity.value(),
            case.current_severity.value(),
            case.status.as_str(),
            case.last_updated_at,
            case.episode,
        ],
    )?;
    Ok(())
}

/// Writes the aggregator-owned fields back to the case row.
pub fn update_case_summary(conn: &Connection, case: &TrackingCase) -> Result<(), DatabaseError> {
    let updated = conn.execute(
        "UPDATE tracking_cases
         SET current_severity = ?1, status = ?2, last_updated_at = ?3, episode = ?4
         WHERE id = ?5",
        params![
            case.current_severity.value(),
            case.status.as_str(),
            case.last_updated_at,
            case.episode,
            case.id.to_string(),
        ],
    )?;
    if updated == 0 {
        return Err(DatabaseError::NotFound {
            entity_type: "TrackingCase".into(),
            id: case.id.to_string(),
        });
    }
    Ok(())
}

pub fn get_tracking_case(
    conn: &Connection,
    id: &Uuid,
) -> Result<Option<TrackingCase>, DatabaseError> {
    let row = conn
        .query_row(
            &format!("SELECT {CASE_COLUMNS} FROM tracking_cases WHERE id = ?1"),
            params![id.to_string()],
            read_row,
        )
        .optional()?;

    match row {
        Some(row) => {
            let history = get_assessments_for_case(conn, id)?;
            Ok(Some(row.into_case(history)?))
        }
        None => Ok(None),
    }
}

/// All cases with their histories, in no particular order.
pub fn list_tracking_cases(conn: &Connection) -> Result<Vec<TrackingCase>, DatabaseError> {
    let mut stmt = conn.prepare(&format!("SELECT {CASE_COLUMNS} FROM tracking_cases"))?;
    let rows = stmt.query_map([], read_row)?;

    let mut by_case: HashMap<Uuid, Vec<_>> = HashMap::new();
    for (case_id, assessment) in list_all_assessments(conn)? {
        by_case.entry(case_id).or_default().push(assessment);
    }

    let mut cases = Vec::new();
    for row in rows {
        let row = row?;
        let id = parse_uuid(&row.id)?;
        let history = by_case.remove(&id).unwrap_or_default();
        cases.push(row.into_case(history)?);
    }
    Ok(cases)
}
