use serde::{Deserialize, Serialize};

use super::Source;

/// A liked post or a viewed reel.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawPost {
    pub timestamp: Option<String>,
    pub caption: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawMessage {
    pub timestamp: Option<String>,
    pub content: Option<String>,
}

/// A direct-message thread; `messages` is required for normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawConversation {
    pub messages: Option<Vec<RawMessage>>,
}

/// An ad-interest entry. Carries a category, never free text.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawAd {
    pub timestamp: Option<String>,
    pub category: Option<String>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RawVideo {
    pub timestamp: Option<String>,
    pub caption: Option<String>,
}

/// One record as read from a source export, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawRecord {
    Like(RawPost),
    Reel(RawPost),
    Conversation(RawConversation),
    Ad(RawAd),
    VideoWatch(RawVideo),
}

impl RawRecord {
    pub fn source(&self) -> Source {
        match self {
            Self::Like(_) => Source::Likes,
            Self::Reel(_) => Source::Reels,
            Self::Conversation(_) => Source::Messages,
            Self::Ad(_) => Source::Ads,
            Self::VideoWatch(_) => Source::VideoWatch,
        }
    }

    /// Decode a JSON value into the record shape declared by `source`.
    pub fn from_json(source: Source, value: serde_json::Value) -> serde_json::Result<Self> {
        Ok(match source {
            Source::Likes => Self::Like(serde_json::from_value(value)?),
            Source::Reels => Self::Reel(serde_json::from_value(value)?),
            Source::Messages => Self::Conversation(serde_json::from_value(value)?),
            Source::Ads => Self::Ad(serde_json::from_value(value)?),
            Source::VideoWatch => Self::VideoWatch(serde_json::from_value(value)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_ignores_unknown_fields() {
        let value = json!({
            "timestamp": "2024-01-01T10:00:00",
            "caption": "sunset",
            "username": "someone"
        });
        let record = RawRecord::from_json(Source::Likes, value).unwrap();
        assert_eq!(record.source(), Source::Likes);
        match record {
            RawRecord::Like(post) => assert_eq!(post.caption.as_deref(), Some("sunset")),
            other => panic!("unexpected record {other:?}"),
        }
    }

    #[test]
    fn test_from_json_missing_fields_become_none() {
        let record = RawRecord::from_json(Source::Ads, json!({})).unwrap();
        assert_eq!(record, RawRecord::Ad(RawAd::default()));
    }

    #[test]
    fn test_from_json_rejects_non_objects() {
        assert!(RawRecord::from_json(Source::Ads, json!("Fashion")).is_err());
        assert!(RawRecord::from_json(Source::Messages, json!(42)).is_err());
    }

    #[test]
    fn test_conversation_nested_messages() {
        let value = json!({
            "participants": ["a", "b"],
            "messages": [
                {"timestamp": "2024-01-01T10:00:00", "content": "hi"},
                {"timestamp": "2024-01-01T10:05:00"}
            ]
        });
        let record = RawRecord::from_json(Source::Messages, value).unwrap();
        let RawRecord::Conversation(convo) = record else {
            panic!("expected conversation");
        };
        let messages = convo.messages.unwrap();
        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.is_none());
    }
}
