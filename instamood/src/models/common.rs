use serde::{Deserialize, Serialize};

/// Origin category of an activity record.
///
/// Declaration order is the stable enumeration order used for report rows.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Likes,
    Reels,
    Messages,
    Ads,
    VideoWatch,
}

impl Source {
    pub const ALL: [Source; 5] = [
        Source::Likes,
        Source::Reels,
        Source::Messages,
        Source::Ads,
        Source::VideoWatch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Likes => "likes",
            Self::Reels => "reels",
            Self::Messages => "messages",
            Self::Ads => "ads",
            Self::VideoWatch => "video_watch",
        }
    }

    /// Sources whose records carry no text and are never sent to the classifier.
    pub fn is_textless(&self) -> bool {
        matches!(self, Self::VideoWatch)
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Source {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "likes" => Ok(Self::Likes),
            "reels" => Ok(Self::Reels),
            "messages" => Ok(Self::Messages),
            "ads" => Ok(Self::Ads),
            "video_watch" | "videos" => Ok(Self::VideoWatch),
            _ => Err(format!("Unknown source: {s}")),
        }
    }
}

/// Discretized mood bucket.
///
/// Declaration order doubles as the tie-break order for "most common mood".
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MoodLabel {
    Happy,
    Neutral,
    Sad,
}

/// Scores strictly above this are `happy`.
pub const HAPPY_THRESHOLD: f64 = 0.3;
/// Scores strictly below this are `sad`.
pub const SAD_THRESHOLD: f64 = -0.3;

impl MoodLabel {
    pub const ALL: [MoodLabel; 3] = [MoodLabel::Happy, MoodLabel::Neutral, MoodLabel::Sad];

    /// Threshold mapping from a mood score to its label.
    pub fn from_score(score: f64) -> Self {
        if score > HAPPY_THRESHOLD {
            Self::Happy
        } else if score < SAD_THRESHOLD {
            Self::Sad
        } else {
            Self::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Neutral => "neutral",
            Self::Sad => "sad",
        }
    }
}

impl std::fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
