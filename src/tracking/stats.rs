//! Read-side summaries: overview counters, per-case progress series and the
//! weekly risk breakdown of the analysis history.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::models::enums::{CaseStatus, HealingLabel, RiskLevel, Urgency};
use crate::models::{AnalysisRecord, Severity, TrackingCase};

/// Length of the analysis summary window.
pub const WEEKLY_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub total: usize,
    /// Cases whose latest assessment is improving.
    pub improving: usize,
    pub needs_attention: usize,
    pub healed: usize,
}

pub fn overview(cases: &[TrackingCase]) -> Overview {
    cases.iter().fold(Overview::default(), |mut acc, case| {
        acc.total += 1;
        if case.latest().map(|a| a.healing_label) == Some(HealingLabel::Improving) {
            acc.improving += 1;
        }
        match case.status {
            CaseStatus::NeedsAttention => acc.needs_attention += 1,
            CaseStatus::Healed => acc.healed += 1,
            CaseStatus::Active => {}
        }
        acc
    })
}

/// One bar of the progress chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressPoint {
    pub captured_at: NaiveDateTime,
    pub severity: Severity,
    pub band: RiskLevel,
    pub healing_label: HealingLabel,
    pub urgency: Urgency,
    /// Severity relative to the case maximum, in (0, 1].
    pub relative_height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Progress {
    pub initial_severity: Severity,
    pub current_severity: Severity,
    pub overall_trend: HealingLabel,
    pub points: Vec<ProgressPoint>,
}

pub fn progress(case: &TrackingCase) -> Progress {
    let max = case
        .history
        .iter()
        .map(|a| a.severity.value())
        .max()
        .unwrap_or(Severity::MAX);

    let points = case
        .history
        .iter()
        .map(|a| ProgressPoint {
            captured_at: a.captured_at,
            severity: a.severity,
            band: a.severity.band(),
            healing_label: a.healing_label,
            urgency: a.urgency,
            relative_height: f64::from(a.severity.value()) / f64::from(max),
        })
        .collect();

    Progress {
        initial_severity: case.initial_severity,
        current_severity: case.current_severity,
        overall_trend: case.overall_trend(),
        points,
    }
}

/// Analyses in the last week, by risk level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklySummary {
    /// Inclusive start of the window.
    pub since: NaiveDateTime,
    pub total: usize,
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
}

/// Count records analyzed at or after `now - 7 days`.
pub fn weekly(records: &[AnalysisRecord], now: NaiveDateTime) -> WeeklySummary {
    let since = now - Duration::days(WEEKLY_WINDOW_DAYS);
    let init = WeeklySummary {
        since,
        total: 0,
        high: 0,
        moderate: 0,
        low: 0,
    };
    records
        .iter()
        .filter(|r| r.analyzed_at >= since)
        .fold(init, |mut acc, r| {
            acc.total += 1;
            match r.risk_level {
                RiskLevel::High => acc.high += 1,
                RiskLevel::Moderate => acc.moderate += 1,
                RiskLevel::Low => acc.low += 1,
            }
            acc
        })
}
