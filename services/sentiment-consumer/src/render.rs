//! Render hooks
//!
//! The ingestion loop hands the latest full [`Snapshot`] to a
//! [`RenderHook`] after every accepted message. Hooks decide how (or
//! whether) to present it.

use std::io::Write;
use std::thread;
use std::time::Duration;

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use tracing::trace;

use crate::snapshot::Snapshot;

/// Errors raised while presenting a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("render output failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Receives the full snapshot after each accepted message.
pub trait RenderHook {
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), RenderError>;
}

impl<H: RenderHook + ?Sized> RenderHook for Box<H> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), RenderError> {
        (**self).render(snapshot)
    }
}

/// Discards every snapshot.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RenderHook for NullSink {
    fn render(&mut self, _snapshot: &Snapshot) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Adapts a closure into a render hook.
pub struct CallbackSink<F>(pub F);

impl<F> RenderHook for CallbackSink<F>
where
    F: FnMut(&Snapshot),
{
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), RenderError> {
        (self.0)(snapshot);
        Ok(())
    }
}

/// Writes each snapshot as one JSON line.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderHook for JsonLinesSink<W> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), RenderError> {
        serde_json::to_writer(&mut self.out, snapshot)?;
        self.out.write_all(b"\n")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Default cells for a full-scale bar.
pub const DEFAULT_BAR_WIDTH: usize = 40;

/// Layout options for [`TerminalChart`].
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Cells used for a bar at value 1.0.
    pub bar_width: usize,
    /// Pause after each frame.
    pub frame_delay: Duration,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            bar_width: DEFAULT_BAR_WIDTH,
            frame_delay: Duration::ZERO,
        }
    }
}

const FILLED: char = '█';
const EMPTY: char = '·';

/// Horizontal bar chart redrawn in place on a terminal.
///
/// The value axis is fixed to [0, 1]. Averages outside that range are
/// clamped when drawn; the printed number is the true value.
pub struct TerminalChart<W: Write> {
    out: W,
    config: ChartConfig,
    frames: u64,
}

impl<W: Write> TerminalChart<W> {
    pub fn new(out: W, config: ChartConfig) -> Self {
        Self {
            out,
            config,
            frames: 0,
        }
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderHook for TerminalChart<W> {
    fn render(&mut self, snapshot: &Snapshot) -> Result<(), RenderError> {
        queue!(self.out, MoveTo(0, 0), Clear(ClearType::All))?;
        for line in chart_lines(snapshot, self.config.bar_width) {
            self.out.write_all(line.as_bytes())?;
            self.out.write_all(b"\r\n")?;
        }
        self.out.flush()?;

        self.frames += 1;
        trace!(frame = self.frames, authors = snapshot.len(), "Chart redrawn");

        if !self.config.frame_delay.is_zero() {
            thread::sleep(self.config.frame_delay);
        }
        Ok(())
    }
}

/// Plain-text frame for a snapshot, without terminal control sequences.
pub fn chart_lines(snapshot: &Snapshot, bar_width: usize) -> Vec<String> {
    let mut lines = Vec::with_capacity(snapshot.len() + 3);
    lines.push(format!(
        "Rolling Average Sentiment (last {} messages)",
        snapshot.window_size
    ));

    if snapshot.is_empty() {
        lines.push("(no authors yet)".to_string());
        return lines;
    }

    let label_width = snapshot
        .authors()
        .map(|author| author.chars().count())
        .max()
        .unwrap_or(0);

    lines.push(format!(
        "{:label_width$}  0{}1",
        "",
        " ".repeat(bar_width.saturating_sub(1)),
    ));

    for entry in snapshot {
        let filled = bar_cells(entry.average, bar_width);
        let bar: String = std::iter::repeat(FILLED)
            .take(filled)
            .chain(std::iter::repeat(EMPTY).take(bar_width - filled))
            .collect();
        let pad = label_width - entry.author.as_str().chars().count();
        lines.push(format!(
            "{}{}  {} {:.3} (n={})",
            entry.author,
            " ".repeat(pad),
            bar,
            entry.average,
            entry.samples
        ));
    }

    lines.push(format!("Average Sentiment (Rolling), {} messages", snapshot.messages));
    lines
}

/// Number of filled cells for `value` on a [0, 1] axis.
fn bar_cells(value: f64, bar_width: usize) -> usize {
    let clamped = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
    ((clamped * bar_width as f64).round() as usize).min(bar_width)
}
