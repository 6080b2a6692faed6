mod classifier;
mod lexicon;
mod provider;

pub use classifier::{classify, SentimentClassifier};
pub use lexicon::LexiconClassifier;
pub use provider::{ClassifierBackend, ClassifierProvider};
