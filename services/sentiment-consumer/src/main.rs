use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use sentiment_consumer::config::{ConsumerConfig, InputSource, RenderMode, DEFAULT_INPUT_PATH};
use sentiment_consumer::consumer;
use sentiment_consumer::ingestion::DEFAULT_POLL_INTERVAL;
use sentiment_consumer::render::DEFAULT_BAR_WIDTH;
use sentiment_consumer::DEFAULT_WINDOW_SIZE;

/// Live rolling-average sentiment per author from a JSON-lines feed.
#[derive(Debug, Parser)]
#[command(name = "sentiment-consumer", version, about, long_about = None)]
struct Cli {
    /// Input file, or `-` for stdin
    #[arg(default_value = DEFAULT_INPUT_PATH, env = "SENTIMENT_INPUT")]
    input: InputSource,

    /// Samples kept per author
    #[arg(short, long, default_value_t = DEFAULT_WINDOW_SIZE.get(), env = "SENTIMENT_WINDOW_SIZE")]
    window_size: usize,

    /// Keep reading lines appended after EOF
    #[arg(short, long, env = "SENTIMENT_FOLLOW")]
    follow: bool,

    /// Milliseconds between polls for new data in follow mode
    #[arg(long, default_value_t = DEFAULT_POLL_INTERVAL.as_millis() as u64)]
    poll_ms: u64,

    /// Stop following after this many seconds without new data
    #[arg(long)]
    idle_timeout_secs: Option<u64>,

    /// How snapshots are presented
    #[arg(short, long, value_enum, default_value_t = RenderMode::Chart, env = "SENTIMENT_RENDER")]
    render: RenderMode,

    /// Cells for a full-scale bar
    #[arg(long, default_value_t = DEFAULT_BAR_WIDTH)]
    bar_width: usize,

    /// Milliseconds to pause after each chart frame
    #[arg(long, default_value_t = 0)]
    frame_delay_ms: u64,
}

impl From<Cli> for ConsumerConfig {
    fn from(cli: Cli) -> Self {
        Self {
            input: cli.input,
            window_size: cli.window_size,
            follow: cli.follow,
            poll_interval: Duration::from_millis(cli.poll_ms),
            idle_timeout: cli.idle_timeout_secs.map(Duration::from_secs),
            render: cli.render,
            bar_width: cli.bar_width,
            frame_delay: Duration::from_millis(cli.frame_delay_ms),
        }
    }
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so the chart owns stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = ConsumerConfig::from(Cli::parse());
    let input = config.input.clone();

    let summary = consumer::run(&config)
        .with_context(|| format!("sentiment consumer failed on {}", input))?;

    tracing::info!(
        lines = summary.stats.lines,
        accepted = summary.stats.accepted,
        malformed = summary.stats.malformed,
        incomplete = summary.stats.incomplete,
        authors = summary.aggregator.author_count(),
        "Consumer finished reading messages"
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["sentiment-consumer"]).unwrap();
        let config = ConsumerConfig::from(cli);
        let defaults = ConsumerConfig::default();
        assert_eq!(config.window_size, defaults.window_size);
        assert_eq!(config.poll_interval, defaults.poll_interval);
        assert_eq!(config.bar_width, defaults.bar_width);
        assert_eq!(config.input, defaults.input);
        assert_eq!(config.render, RenderMode::Chart);
        assert!(!config.follow);
    }

    #[test]
    fn test_cli_overrides() {
        let cli = Cli::try_parse_from([
            "sentiment-consumer",
            "-",
            "--window-size",
            "5",
            "--follow",
            "--idle-timeout-secs",
            "3",
            "--render",
            "json",
        ])
        .unwrap();
        let config = ConsumerConfig::from(cli);
        assert_eq!(config.input, InputSource::Stdin);
        assert_eq!(config.window_size, 5);
        assert!(config.follow);
        assert_eq!(config.idle_timeout, Some(Duration::from_secs(3)));
        assert_eq!(config.render, RenderMode::Json);
    }
}
