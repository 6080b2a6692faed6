use tracing::{debug, info};

use crate::config::DetectionConfig;
use crate::error::{InstamoodError, Result};
use crate::models::{Anomaly, AnomalyEvidence, DailyStat};

/// Flags dates whose statistics break one of three fixed-threshold rules.
///
/// Rules are independent; one date can be flagged by several of them.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnomalyDetector {
    thresholds: DetectionConfig,
}

impl AnomalyDetector {
    pub fn new(thresholds: DetectionConfig) -> Self {
        Self { thresholds }
    }

    /// Evaluate every rule for every date. Output is ordered by date, then by
    /// rule: sudden drop, high volatility, low-activity negative mood.
    ///
    /// Dates must be strictly ascending. Empty input yields no anomalies.
    pub fn detect(&self, stats: &[DailyStat]) -> Result<Vec<Anomaly>> {
        if let Some(pair) = stats.windows(2).find(|pair| pair[1].date <= pair[0].date) {
            return Err(InstamoodError::InvalidOrdering(format!(
                "daily stats not strictly ascending: {} then {}",
                pair[0].date, pair[1].date
            )));
        }

        let mut anomalies = Vec::new();
        for stat in stats {
            self.evaluate(stat, &mut anomalies);
        }

        info!(
            days = stats.len(),
            anomalies = anomalies.len(),
            "Anomaly detection complete"
        );
        Ok(anomalies)
    }

    fn evaluate(&self, stat: &DailyStat, out: &mut Vec<Anomaly>) {
        if let Some(evidence) = self.sudden_drop(stat) {
            out.push(Anomaly {
                date: stat.date,
                evidence,
            });
        }
        if let Some(evidence) = self.high_volatility(stat) {
            out.push(Anomaly {
                date: stat.date,
                evidence,
            });
        }
        if let Some(evidence) = self.low_activity_negative(stat) {
            out.push(Anomaly {
                date: stat.date,
                evidence,
            });
        }
    }

    fn sudden_drop(&self, stat: &DailyStat) -> Option<AnomalyEvidence> {
        let change = stat.mood_change?;
        let previous_mean = stat.previous_mean()?;
        if change < self.thresholds.sudden_drop_threshold {
            debug!(date = %stat.date, change, "Sudden mood drop");
            Some(AnomalyEvidence::SuddenDrop {
                mood_change: change,
                previous_mean,
                mean_mood: stat.mean_mood,
            })
        } else {
            None
        }
    }

    fn high_volatility(&self, stat: &DailyStat) -> Option<AnomalyEvidence> {
        let volatility = stat.volatility.filter(|v| v.is_finite())?;
        (volatility > self.thresholds.volatility_threshold).then_some(
            AnomalyEvidence::HighVolatility {
                volatility,
                mean_mood: stat.mean_mood,
            },
        )
    }

    fn low_activity_negative(&self, stat: &DailyStat) -> Option<AnomalyEvidence> {
        let low_activity = stat.activity_level < self.thresholds.low_activity_max_events;
        let negative = stat.mean_mood < self.thresholds.low_activity_mood_threshold;
        (low_activity && negative).then_some(AnomalyEvidence::LowActivityNegative {
            activity_level: stat.activity_level,
            mean_mood: stat.mean_mood,
        })
    }
}
