use crate::models::{
    Anomaly, DailyStat, LabelCounts, MoodEvent, MoodReport, ReportSummary, Source, SummaryRow,
};

/// Assembles the exported report shape from already-computed results.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportBuilder;

impl ReportBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, events: &[MoodEvent], daily: &[DailyStat], anomalies: &[Anomaly]) -> MoodReport {
        MoodReport {
            summary_table: summary_table(daily),
            anomalies: anomalies.to_vec(),
            summary: summarize(events, daily.len()),
        }
    }
}

/// Rows ordered by date, then source enumeration order. Only (date, source)
/// pairs that had events appear.
pub fn summary_table(daily: &[DailyStat]) -> Vec<SummaryRow> {
    daily
        .iter()
        .flat_map(|stat| {
            Source::ALL.into_iter().filter_map(move |source| {
                stat.label_counts
                    .get(&source)
                    .map(|counts| SummaryRow::new(stat.date, source, *counts))
            })
        })
        .collect()
}

pub fn summarize(events: &[MoodEvent], days_analyzed: usize) -> ReportSummary {
    let mut counts = LabelCounts::default();
    let mut total = 0.0;
    for event in events {
        counts.increment(event.mood_label());
        total += event.mood_score();
    }

    let mean_mood = (!events.is_empty()).then(|| total / events.len() as f64);

    ReportSummary {
        total_events: events.len(),
        days_analyzed,
        mean_mood,
        most_common_mood: counts.most_common(),
    }
}
