//! Urgency Resolver.
//!
//! Rules are evaluated in order and the first match wins:
//!
//! | # | Condition                          | Urgency   |
//! |---|------------------------------------|-----------|
//! | 1 | severity >= 9                      | emergency |
//! | 2 | worsening and severity >= 7        | emergency |
//! | 3 | severity >= 7                      | high      |
//! | 4 | worsening or severity >= 4         | medium    |
//! | 5 | otherwise                          | low       |

use crate::models::enums::{HealingLabel, Urgency};
use crate::models::Severity;

const EMERGENCY_SEVERITY: u8 = 9;
const HIGH_SEVERITY: u8 = 7;
const MEDIUM_SEVERITY: u8 = 4;

pub fn resolve(severity: Severity, healing: HealingLabel) -> Urgency {
    let s = severity.value();
    let worsening = healing == HealingLabel::Worsening;

    // Rules 1 and 2
    if s >= EMERGENCY_SEVERITY || (worsening && s >= HIGH_SEVERITY) {
        Urgency::Emergency
    } else if s >= HIGH_SEVERITY {
        Urgency::High
    } else if worsening || s >= MEDIUM_SEVERITY {
        Urgency::Medium
    } else {
        Urgency::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LABELS: [HealingLabel; 3] = [
        HealingLabel::Improving,
        HealingLabel::Stable,
        HealingLabel::Worsening,
    ];

    fn sev(v: i64) -> Severity {
        Severity::new(v).unwrap()
    }

    #[test]
    fn nine_and_above_always_emergency() {
        for v in 9..=10 {
            for label in LABELS {
                assert_eq!(resolve(sev(v), label), Urgency::Emergency);
            }
        }
    }

    #[test]
    fn worsening_high_escalates() {
        assert_eq!(resolve(sev(7), HealingLabel::Worsening), Urgency::Emergency);
        assert_eq!(resolve(sev(8), HealingLabel::Worsening), Urgency::Emergency);
        assert_eq!(resolve(sev(7), HealingLabel::Stable), Urgency::High);
        assert_eq!(resolve(sev(8), HealingLabel::Improving), Urgency::High);
    }

    #[test]
    fn medium_band() {
        assert_eq!(resolve(sev(4), HealingLabel::Improving), Urgency::Medium);
        assert_eq!(resolve(sev(6), HealingLabel::Stable), Urgency::Medium);
        assert_eq!(resolve(sev(1), HealingLabel::Worsening), Urgency::Medium);
    }

    #[test]
    fn low_band() {
        for v in 1..=3 {
            assert_eq!(resolve(sev(v), HealingLabel::Stable), Urgency::Low);
            assert_eq!(resolve(sev(v), HealingLabel::Improving), Urgency::Low);
        }
    }

    #[test]
    fn worsening_never_lowers_urgency() {
        for v in 1..=10 {
            let s = sev(v);
            assert!(resolve(s, HealingLabel::Worsening) >= resolve(s, HealingLabel::Stable));
            assert!(resolve(s, HealingLabel::Worsening) >= resolve(s, HealingLabel::Improving));
        }
    }

    #[test]
    fn urgency_monotone_in_severity() {
        for label in LABELS {
            for v in 1..10 {
                assert!(resolve(sev(v + 1), label) >= resolve(sev(v), label));
            }
        }
    }
}
