use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::config::DataConfig;
use crate::error::Result;
use crate::models::{RawRecord, Source};

use super::{RecordRejection, SourceFailure};

/// Raw records read from the source exports, plus whatever could not be read.
#[derive(Debug, Default)]
pub struct LoadedSources {
    pub records: BTreeMap<Source, Vec<RawRecord>>,
    pub rejections: Vec<RecordRejection>,
    pub failures: Vec<SourceFailure>,
}

impl LoadedSources {
    pub fn record_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }
}

/// Decode one source export: a JSON array whose elements are records of that source.
///
/// Elements that are not objects are rejected individually. Anything else
/// wrong with the payload fails the whole source.
pub fn parse_source(source: Source, bytes: &[u8]) -> Result<(Vec<RawRecord>, Vec<RecordRejection>)> {
    let values: Vec<serde_json::Value> = serde_json::from_slice(bytes)?;

    let mut records = Vec::with_capacity(values.len());
    let mut rejections = Vec::new();

    for (index, value) in values.into_iter().enumerate() {
        if !value.is_object() {
            rejections.push(RecordRejection::new(
                source,
                index,
                None,
                "record is not a JSON object",
            ));
            continue;
        }
        match RawRecord::from_json(source, value) {
            Ok(record) => records.push(record),
            Err(e) => rejections.push(RecordRejection::new(source, index, None, e.to_string())),
        }
    }

    Ok((records, rejections))
}

pub fn load_source(path: &Path, source: Source) -> Result<(Vec<RawRecord>, Vec<RecordRejection>)> {
    let bytes = fs::read(path)?;
    parse_source(source, &bytes)
}

/// Load the requested sources from the data directory. A source that cannot
/// be read is recorded as a failure and does not stop the others.
pub fn load_sources(config: &DataConfig, sources: &[Source]) -> LoadedSources {
    let mut loaded = LoadedSources::default();

    for &source in sources {
        let path = config.path_for(source);
        match load_source(&path, source) {
            Ok((records, rejections)) => {
                info!(
                    source = source.as_str(),
                    path = %path.display(),
                    records = records.len(),
                    rejected = rejections.len(),
                    "Loaded source"
                );
                for rejection in &rejections {
                    warn!(source = source.as_str(), index = rejection.index, "{}", rejection.reason);
                }
                loaded.records.insert(source, records);
                loaded.rejections.extend(rejections);
            }
            Err(e) => {
                warn!(
                    source = source.as_str(),
                    path = %path.display(),
                    "Failed to load source: {}",
                    e
                );
                loaded.failures.push(SourceFailure {
                    source,
                    reason: format!("{}: {e}", path.display()),
                });
            }
        }
    }

    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_source_rejects_non_objects() {
        let payload = br#"[
            {"timestamp": "2024-01-01T10:00:00", "category": "Travel"},
            "Fashion",
            null,
            {"timestamp": "2024-01-02T10:00:00"}
        ]"#;

        let (records, rejections) = parse_source(Source::Ads, payload).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(rejections.len(), 2);
        assert_eq!(rejections[0].index, 1);
        assert_eq!(rejections[1].index, 2);
        assert!(rejections.iter().all(|r| r.source == Source::Ads));
    }

    #[test]
    fn test_parse_source_requires_array() {
        assert!(parse_source(Source::Likes, br#"{"timestamp": "x"}"#).is_err());
        assert!(parse_source(Source::Likes, b"not json").is_err());
    }

    #[test]
    fn test_parse_source_wrong_field_type_is_rejected() {
        let payload = br#"[{"timestamp": 12345}]"#;
        let (records, rejections) = parse_source(Source::Likes, payload).unwrap();
        assert!(records.is_empty());
        assert_eq!(rejections.len(), 1);
    }

    #[test]
    fn test_load_sources_isolates_missing_files() {
        let dir = TempDir::new().unwrap();
        let config = DataConfig {
            dir: dir.path().to_path_buf(),
            ..DataConfig::default()
        };
        std::fs::write(
            config.path_for(Source::Likes),
            r#"[{"timestamp": "2024-01-01T10:00:00", "caption": "hello"}]"#,
        )
        .unwrap();

        let loaded = load_sources(&config, &[Source::Likes, Source::Reels]);
        assert_eq!(loaded.record_count(), 1);
        assert!(loaded.records.contains_key(&Source::Likes));
        assert!(!loaded.records.contains_key(&Source::Reels));
        assert_eq!(loaded.failures.len(), 1);
        assert_eq!(loaded.failures[0].source, Source::Reels);
    }
}
