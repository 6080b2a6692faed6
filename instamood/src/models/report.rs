use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Anomaly, LabelCounts, MoodLabel, Source};

/// One row of the (date, source) x mood-label summary table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SummaryRow {
    pub date: NaiveDate,
    pub source: Source,
    pub happy: usize,
    pub neutral: usize,
    pub sad: usize,
}

impl SummaryRow {
    pub fn new(date: NaiveDate, source: Source, counts: LabelCounts) -> Self {
        Self {
            date,
            source,
            happy: counts.happy,
            neutral: counts.neutral,
            sad: counts.sad,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ReportSummary {
    pub total_events: usize,
    pub days_analyzed: usize,
    /// `None` when no events were analyzed.
    pub mean_mood: Option<f64>,
    pub most_common_mood: Option<MoodLabel>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodReport {
    pub summary_table: Vec<SummaryRow>,
    pub anomalies: Vec<Anomaly>,
    pub summary: ReportSummary,
}

impl MoodReport {
    pub fn is_empty(&self) -> bool {
        self.summary.total_events == 0
    }
}
