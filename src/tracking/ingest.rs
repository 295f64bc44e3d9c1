//! Assessment Ingestion: validation and construction of the final record.
//!
//! The record's `healing_label` and `urgency` are derived here, before it is
//! appended, so a stored assessment is always final.

use chrono::NaiveDateTime;
use uuid::Uuid;

use super::{trend, urgency, TrackingError};
use crate::models::{PhotoAssessment, RawAssessment, Severity, SymptomSet};

pub const CONFIDENCE_MIN: f64 = 0.0;
pub const CONFIDENCE_MAX: f64 = 100.0;

/// Validate `raw` against the case's latest assessment (if any) and build the
/// immutable record.
pub fn build_assessment(
    raw: &RawAssessment,
    previous: Option<&PhotoAssessment>,
) -> Result<PhotoAssessment, TrackingError> {
    let severity = Severity::new(raw.severity).map_err(|e| invalid(e.to_string()))?;

    if let Some(confidence) = raw.confidence {
        check_confidence(confidence)?;
    }

    if let Some(prev) = previous {
        check_not_before(raw.captured_at, prev.captured_at)?;
    }

    let healing_label = trend::classify(previous.map(|p| p.severity), severity);
    let urgency = urgency::resolve(severity, healing_label);

    Ok(PhotoAssessment {
        id: Uuid::new_v4(),
        captured_at: raw.captured_at,
        severity,
        symptoms: raw.symptoms.iter().collect::<SymptomSet>(),
        healing_label,
        confidence: raw.confidence,
        urgency,
        recommendations: raw
            .recommendations
            .iter()
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .map(str::to_string)
            .collect(),
    })
}

fn check_confidence(confidence: f64) -> Result<(), TrackingError> {
    if confidence.is_finite() && (CONFIDENCE_MIN..=CONFIDENCE_MAX).contains(&confidence) {
        Ok(())
    } else {
        Err(invalid(format!(
            "confidence {confidence} is outside {CONFIDENCE_MIN}..={CONFIDENCE_MAX}"
        )))
    }
}

/// History is non-decreasing in capture time; equal timestamps are allowed.
fn check_not_before(
    captured_at: NaiveDateTime,
    latest: NaiveDateTime,
) -> Result<(), TrackingError> {
    if captured_at < latest {
        return Err(invalid(format!(
            "captured_at {captured_at} is earlier than the latest assessment at {latest}"
        )));
    }
    Ok(())
}

fn invalid(reason: String) -> TrackingError {
    TrackingError::InvalidAssessment { reason }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::models::enums::{HealingLabel, Urgency};

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn raw(day: u32, severity: i64) -> RawAssessment {
        RawAssessment {
            captured_at: at(day, 9),
            severity,
            symptoms: vec!["Redness".into(), "Swelling".into(), "Redness".into()],
            confidence: Some(85.0),
            recommendations: vec!["Cold compress".into(), "  ".into()],
        }
    }

    #[test]
    fn first_assessment_is_stable() {
        let a = build_assessment(&raw(10, 6), None).unwrap();
        assert_eq!(a.healing_label, HealingLabel::Stable);
        assert_eq!(a.urgency, Urgency::Medium);
        assert_eq!(a.symptoms.len(), 2);
        assert_eq!(a.recommendations, vec!["Cold compress".to_string()]);
    }

    #[test]
    fn derives_label_from_previous() {
        let first = build_assessment(&raw(8, 8), None).unwrap();
        let second = build_assessment(&raw(14, 9), Some(&first)).unwrap();
        assert_eq!(second.healing_label, HealingLabel::Worsening);
        assert_eq!(second.urgency, Urgency::Emergency);
    }

    #[test]
    fn rejects_severity_out_of_range() {
        for bad in [0, 11, -1] {
            let err = build_assessment(&raw(10, bad), None).unwrap_err();
            assert!(matches!(err, TrackingError::InvalidAssessment { .. }));
        }
    }

    #[test]
    fn rejects_bad_confidence() {
        for bad in [-0.1, 100.5, f64::NAN, f64::INFINITY] {
            let mut r = raw(10, 5);
            r.confidence = Some(bad);
            assert!(matches!(
                build_assessment(&r, None),
                Err(TrackingError::InvalidAssessment { .. })
            ));
        }
    }

    #[test]
    fn confidence_is_optional_and_inclusive() {
        let mut r = raw(10, 5);
        r.confidence = None;
        assert!(build_assessment(&r, None).is_ok());
        r.confidence = Some(0.0);
        assert!(build_assessment(&r, None).is_ok());
        r.confidence = Some(100.0);
        assert!(build_assessment(&r, None).is_ok());
    }

    #[test]
    fn rejects_backfill() {
        let first = build_assessment(&raw(12, 5), None).unwrap();
        let err = build_assessment(&raw(11, 4), Some(&first)).unwrap_err();
        assert!(err.to_string().contains("earlier than"));
    }

    #[test]
    fn same_timestamp_accepted() {
        let first = build_assessment(&raw(12, 5), None).unwrap();
        let second = build_assessment(&raw(12, 5), Some(&first)).unwrap();
        assert_eq!(second.healing_label, HealingLabel::Stable);
        assert_ne!(first.id, second.id);
    }
}
