use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Variant order is declaration order, so `Ord` follows escalation.
macro_rules! str_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

str_enum!(
    /// Direction of a bite relative to the previous assessment.
    HealingLabel {
        Improving => "improving",
        Stable => "stable",
        Worsening => "worsening",
    }
);

str_enum!(
    /// Escalation level, lowest first.
    Urgency {
        Low => "low",
        Medium => "medium",
        High => "high",
        Emergency => "emergency",
    }
);

str_enum!(
    CaseStatus {
        Active => "active",
        NeedsAttention => "needs_attention",
        Healed => "healed",
    }
);

str_enum!(
    /// Coarse severity band used for charts and single-shot analysis.
    RiskLevel {
        Low => "low",
        Moderate => "moderate",
        High => "high",
    }
);
