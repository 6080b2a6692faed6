#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use instamood::config::DataConfig;
use instamood::error::Result;
use instamood::models::Source;
use instamood::sentiment::SentimentClassifier;
use serde_json::Value;

/// Scores text that is itself a number, e.g. `"-0.4"`. Anything else is 0.
pub struct LiteralClassifier;

impl SentimentClassifier for LiteralClassifier {
    fn polarity(&self, text: &str) -> Result<f64> {
        Ok(text.trim().parse().unwrap_or(0.0))
    }
}

/// Remembers every text it was asked to score.
#[derive(Default)]
pub struct RecordingClassifier {
    pub score: f64,
    pub seen: Mutex<Vec<String>>,
}

impl RecordingClassifier {
    pub fn with_score(score: f64) -> Self {
        Self {
            score,
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl SentimentClassifier for RecordingClassifier {
    fn polarity(&self, text: &str) -> Result<f64> {
        self.seen.lock().unwrap().push(text.to_string());
        Ok(self.score)
    }
}

/// Data config pointing at `dir` with the default file names.
pub fn data_config(dir: &Path) -> DataConfig {
    DataConfig {
        dir: dir.to_path_buf(),
        ..DataConfig::default()
    }
}

/// Write one source export into the data directory.
pub fn write_source(config: &DataConfig, source: Source, payload: &Value) {
    let path = config.path_for(source);
    fs::write(&path, serde_json::to_vec_pretty(payload).unwrap())
        .unwrap_or_else(|e| panic!("Failed to write fixture '{}': {e}", path.display()));
}

/// `count` likes on `date`, each captioned with `score` so
/// `LiteralClassifier` scores them exactly.
pub fn likes_on(date: &str, score: f64, count: usize) -> Vec<Value> {
    (0..count)
        .map(|i| {
            serde_json::json!({
                "timestamp": format!("{date}T{:02}:00:00", 8 + i),
                "caption": score.to_string(),
            })
        })
        .collect()
}
