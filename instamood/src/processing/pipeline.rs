use std::sync::Arc;

use tracing::{debug, info};

use crate::analysis::{AnomalyDetector, DailyAggregator, EventFilter};
use crate::config::DetectionConfig;
use crate::error::Result;
use crate::models::{DailyStat, MoodEvent, MoodReport};
use crate::report::ReportBuilder;
use crate::sentiment::SentimentClassifier;

use super::{LoadedSources, NormalizedBatch, RecordNormalizer};

/// Everything one analysis produced.
#[derive(Debug, Clone)]
pub struct AnalysisRun {
    pub daily: Vec<DailyStat>,
    pub report: MoodReport,
}

/// Normalize, aggregate, detect, report.
#[derive(Clone)]
pub struct MoodAnalyzer {
    normalizer: RecordNormalizer,
    aggregator: DailyAggregator,
    detector: AnomalyDetector,
    builder: ReportBuilder,
}

impl MoodAnalyzer {
    pub fn new(classifier: Arc<dyn SentimentClassifier>, thresholds: DetectionConfig) -> Self {
        Self {
            normalizer: RecordNormalizer::new(classifier),
            aggregator: DailyAggregator::new(),
            detector: AnomalyDetector::new(thresholds),
            builder: ReportBuilder::new(),
        }
    }

    /// Normalize every loaded source. Rejections and failures from loading
    /// are carried into the returned batch.
    pub fn normalize(&self, loaded: &LoadedSources) -> NormalizedBatch {
        let mut batch = NormalizedBatch {
            events: Vec::new(),
            rejections: loaded.rejections.clone(),
            failures: loaded.failures.clone(),
        };
        batch.merge(self.normalizer.normalize_sources(&loaded.records));

        info!(
            events = batch.events.len(),
            rejected = batch.rejections.len(),
            failed_sources = batch.failures.len(),
            "Normalization complete"
        );
        batch
    }

    /// Analyze events in any order. The input is not modified.
    pub fn analyze(&self, events: &[MoodEvent], filter: &EventFilter) -> Result<AnalysisRun> {
        let mut ordered = events.to_vec();
        ordered.sort_by_key(MoodEvent::timestamp);
        let selected = filter.apply(&ordered);
        debug!(
            total = events.len(),
            selected = selected.len(),
            "Applied event filter"
        );

        let daily = self.aggregator.aggregate(&selected)?;
        let anomalies = self.detector.detect(&daily)?;
        let report = self.builder.build(&selected, &daily, &anomalies);

        info!(
            events = selected.len(),
            days = daily.len(),
            anomalies = anomalies.len(),
            "Analysis complete"
        );

        Ok(AnalysisRun { daily, report })
    }
}
