use rusqlite::{params, Connection};

use super::{parse_enum, parse_severity, parse_uuid};
use crate::db::DatabaseError;
use crate::models::enums::{RiskLevel, Urgency};
use crate::models::AnalysisRecord;

pub fn insert_analysis_record(
    conn: &Connection,
    record: &AnalysisRecord,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT INTO analysis_records (id, analyzed_at, insect, severity, risk_level, confidence,
         symptoms, recommendations, urgency, location)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        params![
            record.id.to_string(),
            record.analyzed_at,
            record.insect,
            record.severity.value(),
            record.risk_level.as_str(),
            record.confidence,
            serde_json::to_string(&record.symptoms)?,
            serde_json::to_string(&record.recommendations)?,
            record.urgency.as_str(),
            record.location,
        ],
    )?;
    Ok(())
}

/// Analysis history, newest first.
pub fn list_analysis_records(conn: &Connection) -> Result<Vec<AnalysisRecord>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, analyzed_at, insect, severity, risk_level, confidence,
         symptoms, recommendations, urgency, location
         FROM analysis_records ORDER BY analyzed_at DESC, id",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, chrono::NaiveDateTime>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, i64>(3)?,
            row.get::<_, String>(4)?,
            row.get::<_, Option<f64>>(5)?,
            row.get::<_, String>(6)?,
            row.get::<_, String>(7)?,
            row.get::<_, String>(8)?,
            row.get::<_, Option<String>>(9)?,
        ))
    })?;

    let mut records = Vec::new();
    for row in rows {
        let (
            id, analyzed_at, insect, severity, risk_level, confidence,
            symptoms, recommendations, urgency, location,
        ) = row?;
        records.push(AnalysisRecord {
            id: parse_uuid(&id)?,
            analyzed_at,
            insect,
            severity: parse_severity(severity)?,
            risk_level: parse_enum::<RiskLevel>(&risk_level)?,
            confidence,
            symptoms: serde_json::from_str(&symptoms)?,
            recommendations: serde_json::from_str(&recommendations)?,
            urgency: parse_enum::<Urgency>(&urgency)?,
            location,
        });
    }
    Ok(records)
}
