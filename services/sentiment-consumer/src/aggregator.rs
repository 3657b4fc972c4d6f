//! Per-author rolling sentiment aggregation
//!
//! Holds one fixed-capacity [`RollingWindow`] per author in an arena
//! indexed by author key. Authors are appended to the arena the first
//! time they are seen and are never removed, so arena order is
//! first-seen order.
//!
//! Averages are recomputed from the window on every query (O(window)).

use std::collections::HashMap;
use std::num::NonZeroUsize;

use tracing::{debug, info};
use types::errors::AggregatorError;
use types::ids::AuthorId;
use types::message::Observation;

use crate::snapshot::{AuthorAverage, Snapshot};
use crate::window::RollingWindow;

/// Default number of samples retained per author.
pub const DEFAULT_WINDOW_SIZE: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(size) => size,
    None => unreachable!(),
};

/// Rolling average state for every author seen so far.
#[derive(Debug, Clone)]
pub struct SentimentAggregator {
    window_size: NonZeroUsize,
    /// Author → arena slot.
    index: HashMap<AuthorId, usize>,
    /// Windows in first-seen order.
    arena: Vec<(AuthorId, RollingWindow)>,
    /// Total updates applied.
    messages: u64,
}

impl SentimentAggregator {
    /// Create an aggregator retaining `window_size` samples per author.
    pub fn new(window_size: NonZeroUsize) -> Self {
        info!(window_size = window_size.get(), "SentimentAggregator initialized");

        Self {
            window_size,
            index: HashMap::new(),
            arena: Vec::new(),
            messages: 0,
        }
    }

    /// Create an aggregator with the default window of 20.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE)
    }

    /// Record a sentiment sample for `author`.
    ///
    /// Creates the author's window on first sight. Returns the sample
    /// evicted to make room, if the window was already full.
    pub fn update(&mut self, author: AuthorId, sentiment: f64) -> Option<f64> {
        self.messages += 1;

        let slot = match self.index.get(author.as_str()) {
            Some(&slot) => slot,
            None => {
                let slot = self.arena.len();
                debug!(author = %author, slot, "Tracking new author");
                self.index.insert(author.clone(), slot);
                self.arena.push((author, RollingWindow::new(self.window_size)));
                slot
            }
        };

        self.arena[slot].1.push(sentiment)
    }

    /// Record a validated observation.
    pub fn apply(&mut self, observation: Observation) -> Option<f64> {
        self.update(observation.author, observation.sentiment)
    }

    /// Mean of `author`'s current window.
    pub fn rolling_average(&self, author: &str) -> Result<f64, AggregatorError> {
        self.window(author)
            .and_then(RollingWindow::mean)
            .ok_or_else(|| AggregatorError::NoData {
                author: author.to_string(),
            })
    }

    /// Rolling average of every tracked author, in first-seen order.
    pub fn snapshot(&self) -> Snapshot {
        let averages = self
            .arena
            .iter()
            .filter_map(|(author, window)| {
                window.mean().map(|average| AuthorAverage {
                    author: author.clone(),
                    average,
                    samples: window.len(),
                })
            })
            .collect();

        Snapshot {
            window_size: self.window_size.get(),
            messages: self.messages,
            averages,
        }
    }

    /// Copy of `author`'s window, oldest first.
    pub fn history(&self, author: &str) -> Option<Vec<f64>> {
        self.window(author).map(RollingWindow::to_vec)
    }

    /// Tracked authors in first-seen order.
    pub fn authors(&self) -> impl Iterator<Item = &AuthorId> {
        self.arena.iter().map(|(author, _)| author)
    }

    pub fn author_count(&self) -> usize {
        self.arena.len()
    }

    pub fn window_size(&self) -> usize {
        self.window_size.get()
    }

    /// Total updates applied since creation.
    pub fn messages(&self) -> u64 {
        self.messages
    }

    fn window(&self, author: &str) -> Option<&RollingWindow> {
        self.index.get(author).map(|&slot| &self.arena[slot].1)
    }
}

impl Default for SentimentAggregator {
    fn default() -> Self {
        Self::with_defaults()
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_history_is_suffix_of_input(
            window in 1usize..40,
            values in proptest::collection::vec(0.0f64..1.0, 1..120),
        ) {
            let mut agg = SentimentAggregator::new(NonZeroUsize::new(window).unwrap());
            let who = AuthorId::try_new("solo").unwrap();

            for (n, v) in values.iter().enumerate() {
                agg.update(who.clone(), *v);
                let seen = n + 1;
                let keep = seen.min(window);
                let history = agg.history("solo").unwrap();
                prop_assert_eq!(history.len(), keep);
                prop_assert_eq!(history, values[seen - keep..seen].to_vec());
            }
        }

        #[test]
        fn prop_snapshot_keys_follow_first_seen(
            picks in proptest::collection::vec(0usize..5, 1..60),
        ) {
            let names = ["a", "b", "c", "d", "e"];
            let mut agg = SentimentAggregator::with_defaults();
            let mut first_seen: Vec<&str> = Vec::new();

            for p in &picks {
                let name = names[*p];
                if !first_seen.contains(&name) {
                    first_seen.push(name);
                }
                agg.update(AuthorId::try_new(name).unwrap(), 0.5);
            }

            let snap = agg.snapshot();
            prop_assert_eq!(snap.authors().collect::<Vec<_>>(), first_seen);
            prop_assert_eq!(snap.clone(), agg.snapshot());
        }
    }
}
