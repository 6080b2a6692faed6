use crate::config::ClassifierConfig;
use crate::error::{InstamoodError, Result};

use super::{LexiconClassifier, SentimentClassifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifierBackend {
    Lexicon,
    Unavailable { reason: String },
}

/// Classifier selected from configuration.
///
/// An unavailable provider fails every scoring call with
/// `ClassifierUnavailable`; textless sources never reach it.
pub struct ClassifierProvider {
    backend: ClassifierBackend,
    lexicon: Option<LexiconClassifier>,
}

impl ClassifierProvider {
    pub fn new(config: &ClassifierConfig) -> Self {
        match config.backend.trim().to_lowercase().as_str() {
            "lexicon" | "" => Self::lexicon(),
            "none" | "disabled" => Self::unavailable("Classifier disabled by configuration"),
            other => Self::unavailable(&format!("Unknown classifier backend: {other}")),
        }
    }

    pub fn lexicon() -> Self {
        Self {
            backend: ClassifierBackend::Lexicon,
            lexicon: Some(LexiconClassifier::new()),
        }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self {
            backend: ClassifierBackend::Unavailable {
                reason: reason.to_string(),
            },
            lexicon: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !matches!(self.backend, ClassifierBackend::Unavailable { .. })
    }

    pub fn backend(&self) -> &ClassifierBackend {
        &self.backend
    }

    fn unavailable_reason(&self) -> String {
        match &self.backend {
            ClassifierBackend::Unavailable { reason } => reason.clone(),
            ClassifierBackend::Lexicon => "Lexicon not loaded".to_string(),
        }
    }
}

impl SentimentClassifier for ClassifierProvider {
    fn polarity(&self, text: &str) -> Result<f64> {
        match &self.lexicon {
            Some(lexicon) if self.is_available() => lexicon.polarity(text),
            _ => Err(InstamoodError::ClassifierUnavailable(self.unavailable_reason())),
        }
    }
}
