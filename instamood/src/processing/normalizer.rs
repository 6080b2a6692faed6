use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::error::{InstamoodError, Result};
use crate::models::{
    MoodEvent, RawAd, RawMessage, RawPost, RawRecord, RawVideo, Sentiment, Source,
};
use crate::sentiment::{classify, SentimentClassifier};

use super::{parse_timestamp, NormalizedBatch, RecordRejection, SourceFailure};

/// Phrase scored for an ad category that has no entry in `AD_CATEGORY_PHRASES`.
pub const DEFAULT_AD_PHRASE: &str = "Stay positive!";

/// Ad-interest records carry no natural language. Each category maps to a
/// canned phrase so ads still produce a comparable mood signal. The resulting
/// score reflects the phrase, not anything the user wrote or felt.
pub const AD_CATEGORY_PHRASES: &[(&str, &str)] = &[
    ("Fashion", "New trends in fashion this season."),
    ("Travel", "Plan your next adventure today!"),
    ("AI & Tech", "Explore the future of AI and technology."),
    ("Breakup Recovery", "Focus on healing and self-care."),
    ("Mental Wellness", "Take care of your mental health today."),
];

pub fn ad_phrase(category: Option<&str>) -> &'static str {
    category
        .and_then(|category| {
            AD_CATEGORY_PHRASES
                .iter()
                .find(|(name, _)| *name == category)
                .map(|(_, phrase)| *phrase)
        })
        .unwrap_or(DEFAULT_AD_PHRASE)
}

/// Turns raw source records into `MoodEvent`s.
#[derive(Clone)]
pub struct RecordNormalizer {
    classifier: Arc<dyn SentimentClassifier>,
}

impl RecordNormalizer {
    pub fn new(classifier: Arc<dyn SentimentClassifier>) -> Self {
        Self { classifier }
    }

    /// Normalize one record. Conversations expand to one event per message,
    /// in message order; any malformed message fails the whole call.
    pub fn normalize(&self, record: &RawRecord) -> Result<Vec<MoodEvent>> {
        match record {
            RawRecord::Like(post) => Ok(vec![self.normalize_post(Source::Likes, post)?]),
            RawRecord::Reel(post) => Ok(vec![self.normalize_post(Source::Reels, post)?]),
            RawRecord::Conversation(convo) => {
                let messages = convo.messages.as_ref().ok_or_else(|| {
                    InstamoodError::malformed(Source::Messages, "conversation has no messages")
                })?;
                messages
                    .iter()
                    .map(|message| self.normalize_message(message))
                    .collect()
            }
            RawRecord::Ad(ad) => Ok(vec![self.normalize_ad(ad)?]),
            RawRecord::VideoWatch(video) => Ok(vec![normalize_video(video)?]),
        }
    }

    /// Normalize a sequence of records, skipping malformed ones.
    ///
    /// Record-level problems are collected as rejections. Classifier failures
    /// are returned as errors since every remaining text record would fail too.
    pub fn normalize_batch(&self, records: &[RawRecord]) -> Result<NormalizedBatch> {
        let mut batch = NormalizedBatch::default();

        for (index, record) in records.iter().enumerate() {
            match record {
                RawRecord::Conversation(convo) => {
                    let Some(messages) = convo.messages.as_ref() else {
                        batch.reject(RecordRejection::new(
                            Source::Messages,
                            index,
                            None,
                            "conversation has no messages",
                        ));
                        continue;
                    };
                    for (message_index, message) in messages.iter().enumerate() {
                        match self.normalize_message(message) {
                            Ok(event) => batch.events.push(event),
                            Err(e) if e.is_record_level() => batch.reject(
                                RecordRejection::from_error(Source::Messages, index, Some(message_index), &e),
                            ),
                            Err(e) => return Err(e),
                        }
                    }
                }
                _ => match self.normalize(record) {
                    Ok(events) => batch.events.extend(events),
                    Err(e) if e.is_record_level() => {
                        batch.reject(RecordRejection::from_error(record.source(), index, None, &e))
                    }
                    Err(e) => return Err(e),
                },
            }
        }

        Ok(batch)
    }

    /// Normalize every source independently. A source whose records cannot be
    /// scored is reported as a failure; the other sources are unaffected.
    pub fn normalize_sources(&self, sources: &BTreeMap<Source, Vec<RawRecord>>) -> NormalizedBatch {
        let mut combined = NormalizedBatch::default();

        for (source, records) in sources {
            match self.normalize_batch(records) {
                Ok(batch) => {
                    info!(
                        source = source.as_str(),
                        events = batch.events.len(),
                        rejected = batch.rejections.len(),
                        "Normalized source"
                    );
                    combined.merge(batch);
                }
                Err(e) => {
                    warn!(source = source.as_str(), "Source could not be normalized: {}", e);
                    combined.failures.push(SourceFailure {
                        source: *source,
                        reason: e.to_string(),
                    });
                }
            }
        }

        combined
    }

    fn score(&self, text: &str) -> Result<Sentiment> {
        classify(self.classifier.as_ref(), text)
    }

    fn normalize_post(&self, source: Source, post: &RawPost) -> Result<MoodEvent> {
        let timestamp = require_timestamp(source, post.timestamp.as_deref())?;
        let text = first_non_empty(&[post.caption.as_deref(), post.content.as_deref()]);
        let sentiment = self.score(&text)?;
        Ok(MoodEvent::new(source, timestamp, text, sentiment))
    }

    fn normalize_message(&self, message: &RawMessage) -> Result<MoodEvent> {
        let timestamp = require_timestamp(Source::Messages, message.timestamp.as_deref())?;
        let text = message.content.clone().unwrap_or_default();
        let sentiment = self.score(&text)?;
        Ok(MoodEvent::new(Source::Messages, timestamp, text, sentiment))
    }

    fn normalize_ad(&self, ad: &RawAd) -> Result<MoodEvent> {
        let timestamp = require_timestamp(Source::Ads, ad.timestamp.as_deref())?;
        let text = ad_phrase(ad.category.as_deref()).to_string();
        let sentiment = self.score(&text)?;
        Ok(MoodEvent::new(Source::Ads, timestamp, text, sentiment))
    }
}

/// Watch history has no textual signal; it is neutral without consulting the classifier.
fn normalize_video(video: &RawVideo) -> Result<MoodEvent> {
    let timestamp = require_timestamp(Source::VideoWatch, video.timestamp.as_deref())?;
    let text = video.caption.clone().unwrap_or_default();
    Ok(MoodEvent::new(
        Source::VideoWatch,
        timestamp,
        text,
        Sentiment::NEUTRAL,
    ))
}

fn require_timestamp(source: Source, raw: Option<&str>) -> Result<NaiveDateTime> {
    let raw = raw.ok_or_else(|| InstamoodError::malformed(source, "missing timestamp"))?;
    parse_timestamp(raw).ok_or_else(|| {
        debug!(source = source.as_str(), raw, "Timestamp rejected");
        InstamoodError::malformed(source, format!("unparseable timestamp '{raw}'"))
    })
}

fn first_non_empty(candidates: &[Option<&str>]) -> String {
    candidates
        .iter()
        .flatten()
        .find(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or_default()
}
