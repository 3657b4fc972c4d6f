//! Line ingestion layer for the sentiment consumer
//!
//! Reads newline-delimited JSON, decodes each line into a [`Message`],
//! and forwards complete (author, sentiment) observations to the
//! aggregator. Undecodable or partial lines are skipped and counted;
//! they never stop the stream.
//!
//! After every accepted line the render hook receives a fresh snapshot.

use std::io::BufRead;
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info, trace};
use types::errors::MessageError;
use types::message::{Message, Observation};

use crate::aggregator::SentimentAggregator;
use crate::error::ConsumerError;
use crate::render::RenderHook;

/// Why a single line was skipped.
#[derive(Debug, thiserror::Error)]
pub enum LineError {
    #[error("line is not valid UTF-8")]
    InvalidUtf8,

    #[error("line is not a JSON message: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("incomplete message: {0}")]
    Incomplete(#[from] MessageError),
}

/// What happened to one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineOutcome {
    /// Forwarded to the aggregator.
    Accepted,
    /// Whitespace only.
    Blank,
    /// Not decodable as a message.
    Malformed,
    /// Decoded, but missing author or sentiment.
    Incomplete,
}

/// Default sleep between EOF polls in follow mode.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Polling behaviour once the source reaches EOF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowConfig {
    /// Sleep between EOF polls.
    pub poll_interval: Duration,
    /// Give up after this long without new bytes. `None` follows forever.
    pub idle_timeout: Option<Duration>,
}

impl Default for FollowConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            idle_timeout: None,
        }
    }
}

/// Configuration for the line ingester.
#[derive(Debug, Clone, Default)]
pub struct IngesterConfig {
    /// Follow the source past EOF, like `tail -f`. `None` stops at EOF.
    pub follow: Option<FollowConfig>,
}

/// Running totals for one ingestion run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IngestStats {
    /// Lines read, including skipped ones.
    pub lines: u64,
    pub accepted: u64,
    pub blank: u64,
    pub malformed: u64,
    pub incomplete: u64,
}

impl IngestStats {
    pub fn skipped(&self) -> u64 {
        self.blank + self.malformed + self.incomplete
    }
}

/// Decode one raw line into an observation.
pub fn parse_line(line: &[u8]) -> Result<Observation, LineError> {
    let text = std::str::from_utf8(line).map_err(|_| LineError::InvalidUtf8)?;
    let message: Message = serde_json::from_str(text.trim())?;
    Ok(message.into_observation()?)
}

/// Pull-based ingester feeding a [`SentimentAggregator`].
pub struct LineIngester {
    config: IngesterConfig,
    stats: IngestStats,
}

impl LineIngester {
    pub fn new(config: IngesterConfig) -> Self {
        info!(follow = config.follow.is_some(), "LineIngester initialized");

        Self {
            config,
            stats: IngestStats::default(),
        }
    }

    /// Create an ingester that stops at EOF.
    pub fn with_defaults() -> Self {
        Self::new(IngesterConfig::default())
    }

    pub fn stats(&self) -> IngestStats {
        self.stats
    }

    /// Process one raw line (trailing newline optional).
    ///
    /// Complete messages update `aggregator`; everything else is skipped.
    pub fn ingest_line(&mut self, line: &[u8], aggregator: &mut SentimentAggregator) -> LineOutcome {
        self.stats.lines += 1;
        let line_no = self.stats.lines;

        if line.iter().all(u8::is_ascii_whitespace) {
            self.stats.blank += 1;
            trace!(line = line_no, "Skipping blank line");
            return LineOutcome::Blank;
        }

        match parse_line(line) {
            Ok(observation) => {
                trace!(
                    line = line_no,
                    author = %observation.author,
                    sentiment = observation.sentiment,
                    "Line accepted"
                );
                aggregator.apply(observation);
                self.stats.accepted += 1;
                LineOutcome::Accepted
            }
            Err(err @ LineError::Incomplete(_)) => {
                self.stats.incomplete += 1;
                debug!(line = line_no, reason = %err, "Dropping partial record");
                LineOutcome::Incomplete
            }
            Err(err) => {
                self.stats.malformed += 1;
                debug!(line = line_no, reason = %err, "Skipping malformed line");
                LineOutcome::Malformed
            }
        }
    }

    /// Consume `reader` line by line until EOF (or idle timeout when
    /// following), rendering after every accepted line.
    ///
    /// Only I/O errors from the reader and render failures end the run
    /// early.
    pub fn run<R, H>(
        &mut self,
        mut reader: R,
        aggregator: &mut SentimentAggregator,
        hook: &mut H,
    ) -> Result<IngestStats, ConsumerError>
    where
        R: BufRead,
        H: RenderHook + ?Sized,
    {
        let mut buf = Vec::with_capacity(256);
        let mut idle_since: Option<Instant> = None;

        loop {
            let read = reader.read_until(b'\n', &mut buf)?;
            let complete = buf.last() == Some(&b'\n');

            if complete {
                idle_since = None;
                self.process(&buf, aggregator, hook)?;
                buf.clear();
                continue;
            }

            // EOF, possibly with a partial trailing line in `buf`.
            let Some(follow) = self.config.follow.clone() else {
                if !buf.is_empty() {
                    self.process(&buf, aggregator, hook)?;
                }
                break;
            };

            if read > 0 {
                idle_since = None;
            }
            let since = *idle_since.get_or_insert_with(Instant::now);
            if follow.idle_timeout.is_some_and(|limit| since.elapsed() >= limit) {
                info!(
                    idle_ms = since.elapsed().as_millis() as u64,
                    "Input idle, stopping follow"
                );
                if !buf.is_empty() {
                    self.process(&buf, aggregator, hook)?;
                }
                break;
            }
            thread::sleep(follow.poll_interval);
        }

        info!(
            lines = self.stats.lines,
            accepted = self.stats.accepted,
            skipped = self.stats.skipped(),
            authors = aggregator.author_count(),
            "Input exhausted"
        );
        Ok(self.stats)
    }

    fn process<H>(
        &mut self,
        line: &[u8],
        aggregator: &mut SentimentAggregator,
        hook: &mut H,
    ) -> Result<(), ConsumerError>
    where
        H: RenderHook + ?Sized,
    {
        if self.ingest_line(line, aggregator) == LineOutcome::Accepted {
            hook.render(&aggregator.snapshot())?;
        }
        Ok(())
    }
}
