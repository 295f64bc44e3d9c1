use serde::{Deserialize, Serialize};

use super::enums::RiskLevel;

/// Bite severity on a 1–10 scale: 1 is negligible, 10 is life-threatening.
///
/// Only constructible through [`Severity::new`], so a value in hand is always
/// within range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Severity(u8);

/// Rejected severity value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("severity {0} is outside {min}..={max}", min = Severity::MIN, max = Severity::MAX)]
pub struct SeverityOutOfRange(pub i64);

impl Severity {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    pub fn new(value: i64) -> Result<Self, SeverityOutOfRange> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(SeverityOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Chart band: above 6 is high, above 3 moderate, otherwise low.
    pub fn band(self) -> RiskLevel {
        match self.0 {
            7..=10 => RiskLevel::High,
            4..=6 => RiskLevel::Moderate,
            _ => RiskLevel::Low,
        }
    }
}

impl TryFrom<i64> for Severity {
    type Error = SeverityOutOfRange;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Severity> for u8 {
    fn from(s: Severity) -> Self {
        s.0
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_full_range() {
        for v in 1..=10 {
            assert_eq!(Severity::new(v).unwrap().value() as i64, v);
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(Severity::new(0), Err(SeverityOutOfRange(0)));
        assert_eq!(Severity::new(11), Err(SeverityOutOfRange(11)));
        assert!(Severity::new(-3).is_err());
    }

    #[test]
    fn bands_follow_chart_thresholds() {
        assert_eq!(Severity::new(3).unwrap().band(), RiskLevel::Low);
        assert_eq!(Severity::new(4).unwrap().band(), RiskLevel::Moderate);
        assert_eq!(Severity::new(6).unwrap().band(), RiskLevel::Moderate);
        assert_eq!(Severity::new(7).unwrap().band(), RiskLevel::High);
    }

    #[test]
    fn deserialize_validates() {
        let s: Severity = serde_json::from_str("7").unwrap();
        assert_eq!(s.value(), 7);
        assert!(serde_json::from_str::<Severity>("11").is_err());
        assert_eq!(serde_json::to_string(&s).unwrap(), "7");
    }

    #[test]
    fn error_message_names_bounds() {
        assert_eq!(
            SeverityOutOfRange(11).to_string(),
            "severity 11 is outside 1..=10"
        );
    }
}
