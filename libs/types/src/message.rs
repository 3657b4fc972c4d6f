//! Post records as emitted by the upstream producer
//!
//! A `Message` mirrors one JSON line of the producer's live file. Every
//! field is optional on the wire; `Message::into_observation` decides
//! whether the record is complete enough to feed the aggregator.
//!
//! Only `author` and `sentiment` are typed strictly. The producer's other
//! fields decode to `None` when their JSON type is unexpected, so they can
//! never cause an otherwise usable line to be dropped.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::errors::MessageError;
use crate::ids::AuthorId;

/// One decoded post.
///
/// Fields other than `author` and `sentiment` are carried for logging
/// and are never required. Unknown keys are ignored; known auxiliary keys
/// with a mismatched type decode to `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Post text
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Author handle
    #[serde(default)]
    pub author: Option<String>,
    /// Producer timestamp, kept verbatim
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    /// Topic category assigned by the producer
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Sentiment score, nominally in [0, 1] but never clamped
    #[serde(default)]
    pub sentiment: Option<f64>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub keyword_mentioned: Option<String>,
    #[serde(default, deserialize_with = "lenient", skip_serializing_if = "Option::is_none")]
    pub message_length: Option<u64>,
}

/// A validated (author, sentiment) pair ready for aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub author: AuthorId,
    pub sentiment: f64,
}

/// Decode an auxiliary field, mapping a type mismatch to `None`.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

impl Message {
    /// Extract the observation, or the reason the record is partial.
    ///
    /// Partial records are dropped by callers, never defaulted.
    pub fn into_observation(self) -> Result<Observation, MessageError> {
        let author = AuthorId::try_new(self.author.ok_or(MessageError::MissingAuthor)?)?;
        let sentiment = self.sentiment.ok_or(MessageError::MissingSentiment)?;
        Ok(Observation { author, sentiment })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_producer_line() {
        let line = r#"{"message": "I just shared a meme! It was amazing.", "author": "Charlie", "timestamp": "2025-01-29 14:35:20", "category": "humor", "sentiment": 0.87, "keyword_mentioned": "meme", "message_length": 42}"#;
        let msg: Message = serde_json::from_str(line).unwrap();
        assert_eq!(msg.author.as_deref(), Some("Charlie"));
        assert_eq!(msg.category.as_deref(), Some("humor"));
        assert_eq!(msg.message_length, Some(42));

        let obs = msg.into_observation().unwrap();
        assert_eq!(obs.author.as_str(), "Charlie");
        assert_eq!(obs.sentiment, 0.87);
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let msg: Message =
            serde_json::from_str(r#"{"author":"bob","sentiment":0.4,"likes":12}"#).unwrap();
        assert_eq!(msg.into_observation().unwrap().sentiment, 0.4);
    }

    #[test]
    fn test_missing_author() {
        let msg: Message = serde_json::from_str(r#"{"sentiment":0.9}"#).unwrap();
        assert_eq!(msg.into_observation(), Err(MessageError::MissingAuthor));
    }

    #[test]
    fn test_empty_author() {
        let msg: Message = serde_json::from_str(r#"{"author":"","sentiment":0.9}"#).unwrap();
        assert_eq!(msg.into_observation(), Err(MessageError::EmptyAuthor));
    }

    #[test]
    fn test_null_sentiment() {
        let msg: Message = serde_json::from_str(r#"{"author":"bob","sentiment":null}"#).unwrap();
        assert_eq!(msg.into_observation(), Err(MessageError::MissingSentiment));
    }

    #[test]
    fn test_zero_sentiment_is_present() {
        let msg: Message = serde_json::from_str(r#"{"author":"bob","sentiment":0}"#).unwrap();
        assert_eq!(msg.into_observation().unwrap().sentiment, 0.0);
    }

    #[test]
    fn test_out_of_range_sentiment_not_clamped() {
        let msg: Message = serde_json::from_str(r#"{"author":"bob","sentiment":3.5}"#).unwrap();
        assert_eq!(msg.into_observation().unwrap().sentiment, 3.5);
    }

    #[test]
    fn test_mistyped_auxiliary_fields_decode_to_none() {
        let line = r#"{"message":["not","text"],"author":"dana","timestamp":1738160120,"category":{"k":1},"sentiment":0.3,"keyword_mentioned":7,"message_length":-1}"#;
        let msg: Message = serde_json::from_str(line).unwrap();
        assert_eq!(msg.message, None);
        assert_eq!(msg.timestamp, None);
        assert_eq!(msg.category, None);
        assert_eq!(msg.keyword_mentioned, None);
        assert_eq!(msg.message_length, None);

        let obs = msg.into_observation().unwrap();
        assert_eq!(obs.author.as_str(), "dana");
        assert_eq!(obs.sentiment, 0.3);
    }

    #[test]
    fn test_mistyped_core_fields_still_fail() {
        assert!(serde_json::from_str::<Message>(r#"{"author":5,"sentiment":0.3}"#).is_err());
        assert!(serde_json::from_str::<Message>(r#"{"author":"a","sentiment":"0.3"}"#).is_err());
    }
}
