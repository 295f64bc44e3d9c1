use chrono::NaiveDateTime;
use rusqlite::{params, Connection};
use uuid::Uuid;

use super::{parse_enum, parse_severity, parse_uuid};
use crate::db::DatabaseError;
use crate::models::enums::{HealingLabel, Urgency};
use crate::models::{PhotoAssessment, SymptomSet};

const ASSESSMENT_COLUMNS: &str = "id, captured_at, severity, symptoms, healing_label,
     confidence, urgency, recommendations, case_id";

type AssessmentRow = (
    String,
    NaiveDateTime,
    i64,
    String,
    String,
    Option<f64>,
    String,
    String,
    String,
);

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<AssessmentRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn into_assessment(row: AssessmentRow) -> Result<(Uuid, PhotoAssessment), DatabaseError> {
    let (
        id,
        captured_at,
        severity,
        symptoms,
        healing_label,
        confidence,
        urgency,
        recommendations,
        case_id,
    ) = row;
    let symptoms: SymptomSet = serde_json::from_str(&symptoms)?;
    let assessment = PhotoAssessment {
        id: parse_uuid(&id)?,
        captured_at,
        severity: parse_severity(severity)?,
        symptoms,
        healing_label: parse_enum::<HealingLabel>(&healing_label)?,
        confidence,
        urgency: parse_enum::<Urgency>(&urgency)?,
        recommendations: serde_json::from_str(&recommendations)?,
    };
    Ok((parse_uuid(&case_id)?, assessment))
}

/// Appends one assessment at position `seq` in the case history.
pub fn insert_assessment(
    conn: &Connection,
    case_id: &Uuid,
    seq: usize,
    assessment: &PhotoAssessment,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO photo_assessments (id, case_id, seq, captured_at, severity, symptoms,
         healing_label, confidence, urgency, recommendations)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            assessment.id.to_string(),
            case_id.to_string(),
            seq as i64,
            assessment.captured_at,
            assessment.severity.value(),
            serde_json::to_string(&assessment.symptoms)?,
            assessment.healing_label.as_str(),
            assessment.confidence,
            assessment.urgency.as_str(),
            serde_json::to_string(&assessment.recommendations)?,
        ],
    )?;
    Ok(())
}

/// History of one case in append order.
pub fn get_assessments_for_case(
    conn: &Connection,
    case_id: &Uuid,
) -> Result<Vec<PhotoAssessment>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ASSESSMENT_COLUMNS} FROM photo_assessments WHERE case_id = ?1 ORDER BY seq"
    ))?;
    let rows = stmt.query_map(params![case_id.to_string()], read_row)?;

    let mut history = Vec::new();
    for row in rows {
        let (_, assessment) = into_assessment(row?)?;
        history.push(assessment);
    }
    Ok(history)
}

/// Every assessment tagged with its case id, ordered by case then sequence.
pub fn list_all_assessments(
    conn: &Connection,
) -> Result<Vec<(Uuid, PhotoAssessment)>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ASSESSMENT_COLUMNS} FROM photo_assessments ORDER BY case_id, seq"
    ))?;
    let rows = stmt.query_map([], read_row)?;

    let mut out = Vec::new();
    for row in rows {
        out.push(into_assessment(row?)?);
    }
    Ok(out)
}

#[cfg(test)]
pub fn count_assessments(conn: &Connection, case_id: &Uuid) -> Result<i64, DatabaseError> {
    let count = conn.query_row(
        "SELECT COUNT(*) FROM photo_assessments WHERE case_id = ?1",
        params![case_id.to_string()],
        |row| row.get::<_, i64>(0),
    )?;
    Ok(count)
}
