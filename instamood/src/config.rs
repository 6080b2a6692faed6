use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use validator::Validate;

use crate::error::Result;
use crate::models::Source;

fn parse_env_or<T: std::str::FromStr>(var: &str, default: T) -> T
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(val) => match val.parse() {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!("Invalid value '{}' for {}: {}. Using default.", val, var, e);
                default
            }
        },
        Err(_) => default,
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub classifier: ClassifierConfig,
    pub detection: DetectionConfig,
    pub report: ReportConfig,
}

/// Where the five source exports live.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub dir: PathBuf,
    pub likes_file: String,
    pub reels_file: String,
    pub messages_file: String,
    pub ads_file: String,
    pub videos_file: String,
}

impl DataConfig {
    pub fn file_for(&self, source: Source) -> &str {
        match source {
            Source::Likes => &self.likes_file,
            Source::Reels => &self.reels_file,
            Source::Messages => &self.messages_file,
            Source::Ads => &self.ads_file,
            Source::VideoWatch => &self.videos_file,
        }
    }

    pub fn path_for(&self, source: Source) -> PathBuf {
        self.dir.join(self.file_for(source))
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data"),
            likes_file: "insta_mood_mock_likes.json".to_string(),
            reels_file: "insta_mood_mock_reels.json".to_string(),
            messages_file: "insta_mood_mock_messages.json".to_string(),
            ads_file: "insta_mood_mock_ads_and_interests.json".to_string(),
            videos_file: "insta_mood_mock_watch_history.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClassifierConfig {
    /// `lexicon` or `none`.
    pub backend: String,
}

const MIN_DROP_THRESHOLD: f64 = -2.0;
const MIN_MOOD_SCORE: f64 = -1.0;

/// Thresholds for the three anomaly rules.
#[derive(Debug, Clone, Copy, Deserialize, Validate, PartialEq)]
pub struct DetectionConfig {
    /// A day-over-day change in mean mood below this is a sudden drop.
    #[validate(range(min = MIN_DROP_THRESHOLD, max = 0.0))]
    pub sudden_drop_threshold: f64,
    /// A per-day standard deviation above this is high volatility.
    #[validate(range(min = 0.0, max = 2.0))]
    pub volatility_threshold: f64,
    /// Days with fewer events than this count as low activity.
    #[validate(range(min = 1))]
    pub low_activity_max_events: usize,
    #[validate(range(min = MIN_MOOD_SCORE, max = 1.0))]
    pub low_activity_mood_threshold: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            sudden_drop_threshold: -0.3,
            volatility_threshold: 0.4,
            low_activity_max_events: 3,
            low_activity_mood_threshold: -0.2,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    pub summary_csv: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let data_defaults = DataConfig::default();
        let detection_defaults = DetectionConfig::default();

        Self {
            data: DataConfig {
                dir: env::var("INSTAMOOD_DATA_DIR")
                    .map(PathBuf::from)
                    .unwrap_or(data_defaults.dir),
                likes_file: env::var("INSTAMOOD_LIKES_FILE").unwrap_or(data_defaults.likes_file),
                reels_file: env::var("INSTAMOOD_REELS_FILE").unwrap_or(data_defaults.reels_file),
                messages_file: env::var("INSTAMOOD_MESSAGES_FILE")
                    .unwrap_or(data_defaults.messages_file),
                ads_file: env::var("INSTAMOOD_ADS_FILE").unwrap_or(data_defaults.ads_file),
                videos_file: env::var("INSTAMOOD_VIDEOS_FILE")
                    .unwrap_or(data_defaults.videos_file),
            },
            classifier: ClassifierConfig {
                backend: env::var("CLASSIFIER_BACKEND").unwrap_or_else(|_| "lexicon".to_string()),
            },
            detection: DetectionConfig {
                sudden_drop_threshold: parse_env_or(
                    "SUDDEN_DROP_THRESHOLD",
                    detection_defaults.sudden_drop_threshold,
                ),
                volatility_threshold: parse_env_or(
                    "VOLATILITY_THRESHOLD",
                    detection_defaults.volatility_threshold,
                ),
                low_activity_max_events: parse_env_or(
                    "LOW_ACTIVITY_MAX_EVENTS",
                    detection_defaults.low_activity_max_events,
                ),
                low_activity_mood_threshold: parse_env_or(
                    "LOW_ACTIVITY_MOOD_THRESHOLD",
                    detection_defaults.low_activity_mood_threshold,
                ),
            },
            report: ReportConfig {
                summary_csv: env::var("INSTAMOOD_SUMMARY_CSV").ok().map(PathBuf::from),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        self.detection.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_TEST_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn test_detection_config_defaults() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::remove_var("SUDDEN_DROP_THRESHOLD");
        std::env::remove_var("VOLATILITY_THRESHOLD");
        std::env::remove_var("LOW_ACTIVITY_MAX_EVENTS");
        std::env::remove_var("LOW_ACTIVITY_MOOD_THRESHOLD");

        let config = Config::default();
        assert_eq!(config.detection.sudden_drop_threshold, -0.3);
        assert_eq!(config.detection.volatility_threshold, 0.4);
        assert_eq!(config.detection.low_activity_max_events, 3);
        assert_eq!(config.detection.low_activity_mood_threshold, -0.2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_sudden_drop_threshold_from_env() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::set_var("SUDDEN_DROP_THRESHOLD", "-0.5");
        let config = Config::default();
        assert_eq!(config.detection.sudden_drop_threshold, -0.5);
        std::env::remove_var("SUDDEN_DROP_THRESHOLD");
    }

    #[test]
    fn test_invalid_env_value_falls_back_to_default() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::set_var("LOW_ACTIVITY_MAX_EVENTS", "lots");
        let config = Config::default();
        assert_eq!(config.detection.low_activity_max_events, 3);
        std::env::remove_var("LOW_ACTIVITY_MAX_EVENTS");
    }

    #[test]
    fn test_data_config_defaults() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::remove_var("INSTAMOOD_DATA_DIR");
        std::env::remove_var("INSTAMOOD_ADS_FILE");

        let config = Config::default();
        assert_eq!(config.data.dir, PathBuf::from("data"));
        assert_eq!(
            config.data.path_for(Source::Ads),
            PathBuf::from("data").join("insta_mood_mock_ads_and_interests.json")
        );
        assert_eq!(
            config.data.file_for(Source::VideoWatch),
            "insta_mood_mock_watch_history.json"
        );
    }

    #[test]
    fn test_classifier_backend_default() {
        let _guard = ENV_TEST_MUTEX.lock().unwrap();
        std::env::remove_var("CLASSIFIER_BACKEND");
        let config = Config::default();
        assert_eq!(config.classifier.backend, "lexicon");
    }

    #[test]
    fn test_validate_rejects_positive_drop_threshold() {
        let detection = DetectionConfig {
            sudden_drop_threshold: 0.3,
            ..DetectionConfig::default()
        };
        assert!(detection.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_activity_cutoff() {
        let detection = DetectionConfig {
            low_activity_max_events: 0,
            ..DetectionConfig::default()
        };
        assert!(detection.validate().is_err());
    }
}
