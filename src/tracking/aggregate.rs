//! Case Aggregator: keeps the cached case fields consistent with history.

use crate::models::enums::{CaseStatus, HealingLabel, Urgency};
use crate::models::{PhotoAssessment, TrackingCase};

/// Severity at or below which an improving case counts as healed.
const HEALED_MAX_SEVERITY: u8 = 2;

/// Recompute `current_severity`, `status` and `last_updated_at` from the
/// chronologically last assessment. Idempotent.
pub fn recompute(case: &mut TrackingCase) {
    let sole = case.history.len() == 1;
    let Some(last) = case.history.last() else {
        return;
    };
    case.current_severity = last.severity;
    case.last_updated_at = last.captured_at;
    case.status = derive_status(last, sole);
}

/// Status rule. `needs_attention` takes precedence over `healed`.
pub fn derive_status(last: &PhotoAssessment, only_assessment: bool) -> CaseStatus {
    if matches!(last.urgency, Urgency::High | Urgency::Emergency) {
        CaseStatus::NeedsAttention
    } else if last.severity.value() <= HEALED_MAX_SEVERITY
        && last.healing_label == HealingLabel::Improving
        && !only_assessment
    {
        CaseStatus::Healed
    } else {
        CaseStatus::Active
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use uuid::Uuid;

    use super::*;
    use crate::models::{Severity, SymptomSet};

    fn at(day: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap()
    }

    fn assessment(day: u32, sev: i64, label: HealingLabel, urgency: Urgency) -> PhotoAssessment {
        PhotoAssessment {
            id: Uuid::new_v4(),
            captured_at: at(day),
            severity: Severity::new(sev).unwrap(),
            symptoms: SymptomSet::new(),
            healing_label: label,
            confidence: Some(90.0),
            urgency,
            recommendations: vec![],
        }
    }

    fn case_with(history: Vec<PhotoAssessment>) -> TrackingCase {
        let first = &history[0];
        TrackingCase {
            id: Uuid::new_v4(),
            title: "Left arm".into(),
            insect_type: "Mosquito".into(),
            started_at: first.captured_at,
            initial_severity: first.severity,
            current_severity: first.severity,
            status: CaseStatus::Active,
            last_updated_at: first.captured_at,
            history,
            episode: 1,
        }
    }

    #[test]
    fn tracks_last_assessment() {
        let mut case = case_with(vec![
            assessment(10, 6, HealingLabel::Stable, Urgency::Medium),
            assessment(12, 4, HealingLabel::Improving, Urgency::Medium),
        ]);
        recompute(&mut case);
        assert_eq!(case.current_severity.value(), 4);
        assert_eq!(case.last_updated_at, at(12));
        assert_eq!(case.status, CaseStatus::Active);
        assert_eq!(case.initial_severity.value(), 6);
    }

    #[test]
    fn high_urgency_needs_attention() {
        let mut case = case_with(vec![assessment(8, 8, HealingLabel::Stable, Urgency::High)]);
        recompute(&mut case);
        assert_eq!(case.status, CaseStatus::NeedsAttention);
    }

    #[test]
    fn healed_requires_improvement_and_history() {
        let mut sole = case_with(vec![assessment(1, 2, HealingLabel::Improving, Urgency::Low)]);
        recompute(&mut sole);
        assert_eq!(sole.status, CaseStatus::Active);

        let mut stable = case_with(vec![
            assessment(1, 2, HealingLabel::Stable, Urgency::Low),
            assessment(2, 2, HealingLabel::Stable, Urgency::Low),
        ]);
        recompute(&mut stable);
        assert_eq!(stable.status, CaseStatus::Active);

        let mut healed = case_with(vec![
            assessment(1, 3, HealingLabel::Stable, Urgency::Low),
            assessment(2, 2, HealingLabel::Improving, Urgency::Low),
        ]);
        recompute(&mut healed);
        assert_eq!(healed.status, CaseStatus::Healed);
    }

    #[test]
    fn attention_beats_healed() {
        let last = assessment(3, 1, HealingLabel::Improving, Urgency::High);
        assert_eq!(derive_status(&last, false), CaseStatus::NeedsAttention);
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut case = case_with(vec![
            assessment(8, 8, HealingLabel::Stable, Urgency::High),
            assessment(14, 9, HealingLabel::Worsening, Urgency::Emergency),
        ]);
        recompute(&mut case);
        let once = case.clone();
        recompute(&mut case);
        assert_eq!(case, once);
    }
}
