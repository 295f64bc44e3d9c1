//! Trend Classifier: healing direction from two consecutive severities.

use crate::models::enums::HealingLabel;
use crate::models::Severity;

/// Label a new severity relative to the previous one.
///
/// The first assessment of a case has no predecessor and is `Stable`.
/// Equal severities are always `Stable`, even at high values.
pub fn classify(previous: Option<Severity>, new: Severity) -> HealingLabel {
    let Some(previous) = previous else {
        return HealingLabel::Stable;
    };
    match new.cmp(&previous) {
        std::cmp::Ordering::Less => HealingLabel::Improving,
        std::cmp::Ordering::Greater => HealingLabel::Worsening,
        std::cmp::Ordering::Equal => HealingLabel::Stable,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sev(v: i64) -> Severity {
        Severity::new(v).unwrap()
    }

    #[test]
    fn first_point_is_stable() {
        for v in 1..=10 {
            assert_eq!(classify(None, sev(v)), HealingLabel::Stable);
        }
    }

    #[test]
    fn every_ordered_pair() {
        for a in 1..=10 {
            for b in 1..=10 {
                let expected = if a < b {
                    HealingLabel::Worsening
                } else if a > b {
                    HealingLabel::Improving
                } else {
                    HealingLabel::Stable
                };
                assert_eq!(classify(Some(sev(a)), sev(b)), expected, "{a} -> {b}");
            }
        }
    }

    #[test]
    fn high_tie_is_still_stable() {
        assert_eq!(classify(Some(sev(9)), sev(9)), HealingLabel::Stable);
    }
}
