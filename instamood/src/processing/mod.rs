mod loader;
mod normalizer;
mod pipeline;
mod timestamp;

use serde::Serialize;

use crate::error::InstamoodError;
use crate::models::{MoodEvent, Source};

pub use loader::{load_source, load_sources, parse_source, LoadedSources};
pub use normalizer::{ad_phrase, RecordNormalizer, AD_CATEGORY_PHRASES, DEFAULT_AD_PHRASE};
pub use pipeline::{AnalysisRun, MoodAnalyzer};
pub use timestamp::parse_timestamp;

/// A record skipped during loading or normalization.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecordRejection {
    pub source: Source,
    /// Position of the record within its source.
    pub index: usize,
    /// Position within the conversation, for individual messages.
    pub message_index: Option<usize>,
    pub reason: String,
}

impl RecordRejection {
    pub fn new(
        source: Source,
        index: usize,
        message_index: Option<usize>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            source,
            index,
            message_index,
            reason: reason.into(),
        }
    }

    pub fn from_error(
        source: Source,
        index: usize,
        message_index: Option<usize>,
        err: &InstamoodError,
    ) -> Self {
        let reason = match err {
            InstamoodError::MalformedRecord { reason, .. } => reason.clone(),
            other => other.to_string(),
        };
        Self::new(source, index, message_index, reason)
    }
}

/// A source that produced no events at all.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SourceFailure {
    pub source: Source,
    pub reason: String,
}

/// Output of normalization: events in insertion order plus what was skipped.
#[derive(Debug, Clone, Default)]
pub struct NormalizedBatch {
    pub events: Vec<MoodEvent>,
    pub rejections: Vec<RecordRejection>,
    pub failures: Vec<SourceFailure>,
}

impl NormalizedBatch {
    pub fn reject(&mut self, rejection: RecordRejection) {
        tracing::warn!(
            source = rejection.source.as_str(),
            index = rejection.index,
            message_index = rejection.message_index,
            "Skipping record: {}",
            rejection.reason
        );
        self.rejections.push(rejection);
    }

    pub fn merge(&mut self, other: NormalizedBatch) {
        self.events.extend(other.events);
        self.rejections.extend(other.rejections);
        self.failures.extend(other.failures);
    }
}
