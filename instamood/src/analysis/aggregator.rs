use std::collections::BTreeMap;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{InstamoodError, Result};
use crate::models::{DailyStat, LabelCounts, MoodEvent, Source};

/// Groups date-ordered events into per-day mood statistics.
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyAggregator;

impl DailyAggregator {
    pub fn new() -> Self {
        Self
    }

    /// Build one `DailyStat` per distinct date, ascending.
    ///
    /// `events` must already be ordered by date; an event dated before its
    /// predecessor is an `InvalidOrdering` error. Scores are summed in input
    /// order, so the same input always yields bit-identical output.
    pub fn aggregate(&self, events: &[MoodEvent]) -> Result<Vec<DailyStat>> {
        let mut stats: Vec<DailyStat> = Vec::new();
        let mut group: Option<DayGroup> = None;

        for event in events {
            match group.as_mut() {
                Some(current) if current.date == event.date() => current.push(event),
                Some(current) if event.date() < current.date => {
                    return Err(InstamoodError::InvalidOrdering(format!(
                        "event dated {} follows {}",
                        event.date(),
                        current.date
                    )));
                }
                _ => {
                    if let Some(finished) = group.take() {
                        let stat = finished.finish(stats.last());
                        stats.push(stat);
                    }
                    let mut next = DayGroup::new(event.date());
                    next.push(event);
                    group = Some(next);
                }
            }
        }

        if let Some(finished) = group {
            let stat = finished.finish(stats.last());
            stats.push(stat);
        }

        debug!(days = stats.len(), events = events.len(), "Aggregated daily mood");
        Ok(stats)
    }
}

struct DayGroup {
    date: NaiveDate,
    scores: Vec<f64>,
    label_counts: BTreeMap<Source, LabelCounts>,
}

impl DayGroup {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            scores: Vec::new(),
            label_counts: BTreeMap::new(),
        }
    }

    fn push(&mut self, event: &MoodEvent) {
        self.scores.push(event.mood_score());
        self.label_counts
            .entry(event.source())
            .or_default()
            .increment(event.mood_label());
    }

    fn finish(self, previous: Option<&DailyStat>) -> DailyStat {
        let n = self.scores.len();
        let mean_mood = self.scores.iter().sum::<f64>() / n as f64;

        let volatility = (n >= 2).then(|| {
            let squared: f64 = self.scores.iter().map(|s| (s - mean_mood).powi(2)).sum();
            (squared / (n - 1) as f64).sqrt()
        });

        DailyStat {
            date: self.date,
            mean_mood,
            mood_change: previous.map(|prev| mean_mood - prev.mean_mood),
            volatility,
            activity_level: n,
            label_counts: self.label_counts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{MoodLabel, Sentiment};
    use chrono::NaiveDateTime;

    fn event(source: Source, day: u32, hour: u32, score: f64) -> MoodEvent {
        let timestamp: NaiveDateTime = NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap();
        MoodEvent::new(source, timestamp, String::new(), Sentiment::from_score(score))
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_empty_input_yields_no_stats() {
        let stats = DailyAggregator::new().aggregate(&[]).unwrap();
        assert!(stats.is_empty());
    }

    #[test]
    fn test_first_date_has_no_change() {
        let events = vec![event(Source::Likes, 1, 9, 0.4), event(Source::Likes, 2, 9, 0.1)];
        let stats = DailyAggregator::new().aggregate(&events).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].mood_change, None);
        assert!(approx(stats[1].mood_change.unwrap(), -0.3));
    }

    #[test]
    fn test_single_event_day_has_no_volatility() {
        let stats = DailyAggregator::new()
            .aggregate(&[event(Source::Reels, 1, 9, -0.7)])
            .unwrap();
        assert_eq!(stats[0].volatility, None);
        assert_eq!(stats[0].activity_level, 1);
    }

    #[test]
    fn test_sample_standard_deviation() {
        let events = vec![
            event(Source::Likes, 1, 8, 0.2),
            event(Source::Likes, 1, 9, 0.4),
            event(Source::Messages, 1, 10, 0.6),
        ];
        let stats = DailyAggregator::new().aggregate(&events).unwrap();
        assert!(approx(stats[0].mean_mood, 0.4));
        // ((0.04 + 0 + 0.04) / 2).sqrt()
        assert!(approx(stats[0].volatility.unwrap(), 0.2));
    }

    #[test]
    fn test_label_counts_per_source() {
        let events = vec![
            event(Source::Likes, 1, 8, 0.9),
            event(Source::Likes, 1, 9, 0.0),
            event(Source::Messages, 1, 10, -0.8),
            event(Source::VideoWatch, 1, 11, 0.0),
        ];
        let stats = DailyAggregator::new().aggregate(&events).unwrap();
        let day = &stats[0];

        assert_eq!(
            day.counts_for(Source::Likes),
            LabelCounts {
                happy: 1,
                neutral: 1,
                sad: 0
            }
        );
        assert_eq!(day.counts_for(Source::Messages).get(MoodLabel::Sad), 1);
        assert_eq!(day.counts_for(Source::VideoWatch).neutral, 1);
        assert_eq!(day.counts_for(Source::Ads), LabelCounts::default());
        assert!(!day.label_counts.contains_key(&Source::Ads));
    }

    #[test]
    fn test_missing_dates_are_not_filled() {
        let events = vec![event(Source::Likes, 1, 9, 0.5), event(Source::Likes, 5, 9, 0.5)];
        let stats = DailyAggregator::new().aggregate(&events).unwrap();
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[1].date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert!(approx(stats[1].mood_change.unwrap(), 0.0));
    }

    #[test]
    fn test_out_of_order_dates_are_rejected() {
        let events = vec![event(Source::Likes, 2, 9, 0.5), event(Source::Likes, 1, 9, 0.5)];
        let err = DailyAggregator::new().aggregate(&events).unwrap_err();
        assert!(matches!(err, InstamoodError::InvalidOrdering(_)));
    }

    #[test]
    fn test_same_date_out_of_time_order_is_accepted() {
        let events = vec![event(Source::Likes, 1, 18, 0.5), event(Source::Likes, 1, 6, 0.1)];
        let stats = DailyAggregator::new().aggregate(&events).unwrap();
        assert_eq!(stats.len(), 1);
        assert_eq!(stats[0].activity_level, 2);
    }

    #[test]
    fn test_reaggregation_is_identical() {
        let events = vec![
            event(Source::Likes, 1, 8, 0.123),
            event(Source::Ads, 1, 9, -0.456),
            event(Source::Reels, 2, 9, 0.789),
            event(Source::Messages, 2, 10, -0.1),
            event(Source::Messages, 3, 10, 0.33),
        ];
        let aggregator = DailyAggregator::new();
        let first = aggregator.aggregate(&events).unwrap();
        let second = aggregator.aggregate(&events).unwrap();
        assert_eq!(first, second);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.mean_mood.to_bits(), b.mean_mood.to_bits());
        }
    }
}
