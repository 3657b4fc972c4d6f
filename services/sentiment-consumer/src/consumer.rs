//! Wiring from a [`ConsumerConfig`] to a finished run
//!
//! Opens the input source, builds the aggregator and render hook the
//! config asks for, and drives the ingester to completion.

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use tracing::info;

use crate::aggregator::SentimentAggregator;
use crate::config::{ConsumerConfig, InputSource, RenderMode};
use crate::error::ConsumerError;
use crate::ingestion::{IngestStats, LineIngester};
use crate::render::{JsonLinesSink, NullSink, RenderHook, TerminalChart};

/// Outcome of a completed run.
#[derive(Debug)]
pub struct RunSummary {
    pub stats: IngestStats,
    pub aggregator: SentimentAggregator,
}

/// Open the configured input for line reading.
///
/// A missing or unreadable file fails here, before any processing.
pub fn open_input(source: &InputSource) -> Result<Box<dyn BufRead>, ConsumerError> {
    match source {
        InputSource::Stdin => Ok(Box::new(BufReader::new(io::stdin()))),
        InputSource::File(path) => {
            let file = File::open(path).map_err(|source| ConsumerError::Open {
                path: path.clone(),
                source,
            })?;
            Ok(Box::new(BufReader::new(file)))
        }
    }
}

/// Render hook writing to stdout for the configured mode.
pub fn stdout_hook(config: &ConsumerConfig) -> Box<dyn RenderHook> {
    match config.render {
        RenderMode::Chart => Box::new(TerminalChart::new(io::stdout(), config.chart_config())),
        RenderMode::Json => Box::new(JsonLinesSink::new(io::stdout())),
        RenderMode::None => Box::new(NullSink),
    }
}

/// Run the consumer against an already-open reader and hook.
pub fn run_with<R, H>(
    config: &ConsumerConfig,
    reader: R,
    hook: &mut H,
) -> Result<RunSummary, ConsumerError>
where
    R: BufRead,
    H: RenderHook + ?Sized,
{
    let window = config.validate()?;
    info!(
        input = %config.input,
        window_size = window.get(),
        render = ?config.render,
        follow = config.follow,
        "Starting sentiment consumer"
    );

    let mut aggregator = SentimentAggregator::new(window);
    let mut ingester = LineIngester::new(config.ingester_config());
    let stats = ingester.run(reader, &mut aggregator, hook)?;

    Ok(RunSummary { stats, aggregator })
}

/// Run the consumer end to end: open input, render to stdout.
pub fn run(config: &ConsumerConfig) -> Result<RunSummary, ConsumerError> {
    let reader = open_input(&config.input)?;
    let mut hook = stdout_hook(config);
    run_with(config, reader, &mut hook)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use std::io::Cursor;
    use std::path::PathBuf;

    #[test]
    fn test_run_with_window_from_config() {
        let config = ConsumerConfig {
            window_size: 2,
            render: RenderMode::None,
            ..ConsumerConfig::default()
        };
        let input = "{\"author\":\"a\",\"sentiment\":0.1}\n\
                     {\"author\":\"a\",\"sentiment\":0.2}\n\
                     {\"author\":\"a\",\"sentiment\":0.4}\n";

        let summary = run_with(&config, Cursor::new(input), &mut NullSink).unwrap();
        assert_eq!(summary.aggregator.history("a").unwrap(), vec![0.2, 0.4]);
        assert_eq!(summary.stats.accepted, 3);
    }

    #[test]
    fn test_run_rejects_zero_window() {
        let config = ConsumerConfig {
            window_size: 0,
            ..ConsumerConfig::default()
        };
        let result = run_with(&config, Cursor::new(""), &mut NullSink);
        assert!(matches!(result, Err(ConsumerError::Config(ConfigError::ZeroWindow))));
    }

    #[test]
    fn test_missing_input_fails_at_startup() {
        let source = InputSource::File(PathBuf::from("/definitely/not/here.json"));
        assert!(matches!(open_input(&source), Err(ConsumerError::Open { .. })));
    }
}
