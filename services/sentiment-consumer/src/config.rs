//! Consumer configuration
//!
//! `ConsumerConfig` is the single source of runtime settings. The binary
//! builds it from CLI flags; tests build it directly.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::aggregator::DEFAULT_WINDOW_SIZE;
use crate::ingestion::{FollowConfig, IngesterConfig, DEFAULT_POLL_INTERVAL};
use crate::render::{ChartConfig, DEFAULT_BAR_WIDTH};

/// Producer's live output file, relative to the working directory.
pub const DEFAULT_INPUT_PATH: &str = "data/project_live.json";

/// Errors from validating a [`ConsumerConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("window size must be a positive integer")]
    ZeroWindow,

    #[error("bar width must be at least 1")]
    ZeroBarWidth,

    #[error("poll interval must be non-zero in follow mode")]
    ZeroPollInterval,
}

/// Where lines are read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
}

impl FromStr for InputSource {
    type Err = std::convert::Infallible;

    /// `-` selects standard input; anything else is a path.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            Ok(InputSource::Stdin)
        } else {
            Ok(InputSource::File(PathBuf::from(s)))
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => write!(f, "<stdin>"),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// How snapshots are presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Live bar chart on the terminal
    Chart,
    /// One JSON snapshot per line on stdout
    Json,
    /// No output
    None,
}

#[derive(Debug, Clone)]
pub struct ConsumerConfig {
    pub input: InputSource,
    /// Samples retained per author.
    pub window_size: usize,
    /// Keep polling for appended lines after EOF.
    pub follow: bool,
    pub poll_interval: Duration,
    /// Stop following after this long without new data.
    pub idle_timeout: Option<Duration>,
    pub render: RenderMode,
    pub bar_width: usize,
    /// Pause after each chart frame.
    pub frame_delay: Duration,
}

impl Default for ConsumerConfig {
    fn default() -> Self {
        Self {
            input: InputSource::File(PathBuf::from(DEFAULT_INPUT_PATH)),
            window_size: DEFAULT_WINDOW_SIZE.get(),
            follow: false,
            poll_interval: DEFAULT_POLL_INTERVAL,
            idle_timeout: None,
            render: RenderMode::Chart,
            bar_width: DEFAULT_BAR_WIDTH,
            frame_delay: Duration::ZERO,
        }
    }
}

impl ConsumerConfig {
    /// Check every setting, returning the validated window size.
    pub fn validate(&self) -> Result<NonZeroUsize, ConfigError> {
        let window = NonZeroUsize::new(self.window_size).ok_or(ConfigError::ZeroWindow)?;
        if self.bar_width == 0 {
            return Err(ConfigError::ZeroBarWidth);
        }
        if self.follow && self.poll_interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(window)
    }

    pub fn ingester_config(&self) -> IngesterConfig {
        IngesterConfig {
            follow: self.follow.then(|| FollowConfig {
                poll_interval: self.poll_interval,
                idle_timeout: self.idle_timeout,
            }),
        }
    }

    pub fn chart_config(&self) -> ChartConfig {
        ChartConfig {
            bar_width: self.bar_width,
            frame_delay: self.frame_delay,
        }
    }
}
