use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    SuddenDrop,
    HighVolatility,
    LowActivityNegative,
}

impl std::fmt::Display for AnomalyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SuddenDrop => write!(f, "sudden_drop"),
            Self::HighVolatility => write!(f, "high_volatility"),
            Self::LowActivityNegative => write!(f, "low_activity_negative"),
        }
    }
}

/// The statistics that triggered an anomaly rule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnomalyEvidence {
    SuddenDrop {
        mood_change: f64,
        previous_mean: f64,
        mean_mood: f64,
    },
    HighVolatility {
        volatility: f64,
        mean_mood: f64,
    },
    LowActivityNegative {
        activity_level: usize,
        mean_mood: f64,
    },
}

/// A flagged date. One date may appear once per rule that fired.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Anomaly {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub evidence: AnomalyEvidence,
}

impl Anomaly {
    pub fn kind(&self) -> AnomalyKind {
        match self.evidence {
            AnomalyEvidence::SuddenDrop { .. } => AnomalyKind::SuddenDrop,
            AnomalyEvidence::HighVolatility { .. } => AnomalyKind::HighVolatility,
            AnomalyEvidence::LowActivityNegative { .. } => AnomalyKind::LowActivityNegative,
        }
    }
}
