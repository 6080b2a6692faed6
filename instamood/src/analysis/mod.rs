pub mod aggregator;
pub mod detector;
pub mod filter;

pub use aggregator::DailyAggregator;
pub use detector::AnomalyDetector;
pub use filter::EventFilter;
