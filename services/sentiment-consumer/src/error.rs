use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::render::RenderError;

/// Errors that end a consumer run.
///
/// Bad input lines are never reported here; they are skipped and
/// counted by the ingester.
#[derive(Debug, Error)]
pub enum ConsumerError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("cannot open input {path}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("input read failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("render failed: {0}")]
    Render(#[from] RenderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_error_names_path() {
        let err = ConsumerError::Open {
            path: PathBuf::from("data/missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        assert_eq!(err.to_string(), "cannot open input data/missing.json");
        assert_eq!(
            std::error::Error::source(&err).map(|e| e.to_string()),
            Some("no such file".to_string())
        );
    }

    #[test]
    fn test_from_config_error() {
        let err: ConsumerError = ConfigError::ZeroWindow.into();
        assert!(matches!(err, ConsumerError::Config(ConfigError::ZeroWindow)));
    }
}
