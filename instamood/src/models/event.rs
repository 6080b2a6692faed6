use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::{MoodLabel, Source};

/// A mood score paired with the label it maps to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Sentiment {
    pub score: f64,
    pub label: MoodLabel,
}

impl Sentiment {
    pub const NEUTRAL: Sentiment = Sentiment {
        score: 0.0,
        label: MoodLabel::Neutral,
    };

    pub fn from_score(score: f64) -> Self {
        Self {
            score,
            label: MoodLabel::from_score(score),
        }
    }
}

/// One normalized activity record.
///
/// Fields are read-only; `date` is always the date component of `timestamp`
/// and `mood_label` always matches `mood_score`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MoodEvent {
    source: Source,
    timestamp: NaiveDateTime,
    date: NaiveDate,
    text: String,
    mood_score: f64,
    mood_label: MoodLabel,
}

impl MoodEvent {
    /// The score is clamped to [-1, 1]; a non-finite score becomes neutral.
    pub fn new(source: Source, timestamp: NaiveDateTime, text: String, sentiment: Sentiment) -> Self {
        let mood_score = if sentiment.score.is_finite() {
            sentiment.score.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        Self {
            source,
            timestamp,
            date: timestamp.date(),
            text,
            mood_score,
            mood_label: MoodLabel::from_score(mood_score),
        }
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn timestamp(&self) -> NaiveDateTime {
        self.timestamp
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mood_score(&self) -> f64 {
        self.mood_score
    }

    pub fn mood_label(&self) -> MoodLabel {
        self.mood_label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    #[test]
    fn test_date_derived_from_timestamp() {
        let event = MoodEvent::new(
            Source::Likes,
            at("2024-03-09T23:59:59"),
            "late night".to_string(),
            Sentiment::NEUTRAL,
        );
        assert_eq!(event.date(), NaiveDate::from_ymd_opt(2024, 3, 9).unwrap());
    }

    #[test]
    fn test_label_recomputed_from_score() {
        let mismatched = Sentiment {
            score: 0.9,
            label: MoodLabel::Sad,
        };
        let event = MoodEvent::new(
            Source::Reels,
            at("2024-03-09T10:00:00"),
            String::new(),
            mismatched,
        );
        assert_eq!(event.mood_label(), MoodLabel::Happy);
    }

    #[test]
    fn test_score_kept_within_range() {
        let high = MoodEvent::new(
            Source::Likes,
            at("2024-03-09T10:00:00"),
            String::new(),
            Sentiment::from_score(4.2),
        );
        assert_eq!(high.mood_score(), 1.0);
        assert_eq!(high.mood_label(), MoodLabel::Happy);

        let nan = MoodEvent::new(
            Source::Likes,
            at("2024-03-09T11:00:00"),
            String::new(),
            Sentiment::from_score(f64::NAN),
        );
        assert_eq!(nan.mood_score(), 0.0);
        assert_eq!(nan.mood_label(), MoodLabel::Neutral);
    }
}
