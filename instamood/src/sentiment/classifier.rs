use std::sync::Arc;

use crate::error::{InstamoodError, Result};
use crate::models::Sentiment;

/// Scores free text on a polarity scale.
///
/// Implementations must be stateless per call so that events can be scored
/// in any order, or concurrently.
pub trait SentimentClassifier: Send + Sync {
    /// Raw polarity for non-empty text, nominally in [-1, 1].
    fn polarity(&self, text: &str) -> Result<f64>;
}

impl<T: SentimentClassifier + ?Sized> SentimentClassifier for Arc<T> {
    fn polarity(&self, text: &str) -> Result<f64> {
        (**self).polarity(text)
    }
}

impl<T: SentimentClassifier + ?Sized> SentimentClassifier for &T {
    fn polarity(&self, text: &str) -> Result<f64> {
        (**self).polarity(text)
    }
}

/// Score `text` and attach its mood label.
///
/// Empty or whitespace-only text is neutral and never reaches the classifier.
pub fn classify(classifier: &dyn SentimentClassifier, text: &str) -> Result<Sentiment> {
    if text.trim().is_empty() {
        return Ok(Sentiment::NEUTRAL);
    }

    let raw = classifier.polarity(text)?;
    if !raw.is_finite() {
        return Err(InstamoodError::Classifier(format!(
            "non-finite polarity {raw} for text of {} bytes",
            text.len()
        )));
    }

    Ok(Sentiment::from_score(raw.clamp(-1.0, 1.0)))
}
