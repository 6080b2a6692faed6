use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::{MoodLabel, Source};

/// Per-label event counts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct LabelCounts {
    pub happy: usize,
    pub neutral: usize,
    pub sad: usize,
}

impl LabelCounts {
    pub fn increment(&mut self, label: MoodLabel) {
        match label {
            MoodLabel::Happy => self.happy += 1,
            MoodLabel::Neutral => self.neutral += 1,
            MoodLabel::Sad => self.sad += 1,
        }
    }

    pub fn get(&self, label: MoodLabel) -> usize {
        match label {
            MoodLabel::Happy => self.happy,
            MoodLabel::Neutral => self.neutral,
            MoodLabel::Sad => self.sad,
        }
    }

    /// Most frequent label; ties resolve to the earlier label in `MoodLabel::ALL`.
    /// `None` when every count is zero.
    pub fn most_common(&self) -> Option<MoodLabel> {
        let mut best: Option<(MoodLabel, usize)> = None;
        for label in MoodLabel::ALL {
            let count = self.get(label);
            if count == 0 {
                continue;
            }
            match best {
                Some((_, best_count)) if best_count >= count => {}
                _ => best = Some((label, count)),
            }
        }
        best.map(|(label, _)| label)
    }
}

/// Mood aggregate for one calendar date.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub mean_mood: f64,
    /// Difference from the previous date's mean; `None` on the first date.
    pub mood_change: Option<f64>,
    /// Sample standard deviation; `None` with fewer than two events.
    pub volatility: Option<f64>,
    pub activity_level: usize,
    pub label_counts: BTreeMap<Source, LabelCounts>,
}

impl DailyStat {
    /// Mean of the previous date, recovered from `mood_change`.
    pub fn previous_mean(&self) -> Option<f64> {
        self.mood_change.map(|change| self.mean_mood - change)
    }

    pub fn counts_for(&self, source: Source) -> LabelCounts {
        self.label_counts.get(&source).copied().unwrap_or_default()
    }
}
