//! Error types for the sentiment consumer
//!
//! Comprehensive error taxonomy using thiserror

use thiserror::Error;

/// Reasons a decoded message cannot be turned into an observation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("Message has no author")]
    MissingAuthor,

    #[error("Author handle is empty")]
    EmptyAuthor,

    #[error("Message has no sentiment")]
    MissingSentiment,
}

/// Aggregator query errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregatorError {
    #[error("No sentiment data for author: {author}")]
    NoData { author: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_error_display() {
        assert_eq!(MessageError::MissingSentiment.to_string(), "Message has no sentiment");
    }

    #[test]
    fn test_aggregator_error_no_data() {
        let err = AggregatorError::NoData {
            author: "@dave".to_string(),
        };
        assert!(err.to_string().contains("@dave"));
    }
}
