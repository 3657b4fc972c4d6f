//! Rolling Sentiment Consumer
//!
//! Consumes a producer's newline-delimited JSON posts and keeps, per
//! author, the last N sentiment scores:
//! - Line ingestion with skip-and-count handling of bad input
//! - Fixed-capacity rolling windows per author (ring buffers)
//! - Rolling averages and ordered snapshots on demand
//! - Render hooks: live terminal bar chart, JSON lines, or nothing
//!
//! # Architecture
//!
//! ```text
//!   producer file / stdin
//!          │
//!     ┌────▼────┐
//!     │ Ingest  │  ← decode, skip malformed / partial lines
//!     └────┬────┘
//!          │ (author, sentiment)
//!   ┌──────▼──────┐
//!   │ Aggregator  │  ← per-author ring buffers, first-seen order
//!   └──────┬──────┘
//!          │ snapshot()
//!   ┌──────▼──────┐
//!   │ RenderHook  │  ← chart / json / none
//!   └─────────────┘
//! ```

pub mod aggregator;
pub mod config;
pub mod consumer;
pub mod error;
pub mod ingestion;
pub mod render;
pub mod snapshot;
pub mod window;

pub use aggregator::{SentimentAggregator, DEFAULT_WINDOW_SIZE};
pub use error::ConsumerError;
pub use snapshot::{AuthorAverage, Snapshot};
