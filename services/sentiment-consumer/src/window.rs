//! Fixed-capacity rolling window
//!
//! A ring buffer of the most recent sentiment values for one author.
//! Storage is allocated once at the window capacity; once full, each new
//! value overwrites the oldest slot in place.

use std::num::NonZeroUsize;

/// Bounded FIFO of `f64` samples, oldest first.
#[derive(Debug, Clone)]
pub struct RollingWindow {
    /// Backing slots. Grows up to `capacity` and never beyond.
    slots: Vec<f64>,
    /// Index of the oldest sample once the buffer has wrapped.
    head: usize,
    capacity: NonZeroUsize,
}

impl RollingWindow {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity.get()),
            head: 0,
            capacity,
        }
    }

    /// Append a sample, evicting the oldest when at capacity.
    ///
    /// Returns the evicted sample, if any.
    pub fn push(&mut self, value: f64) -> Option<f64> {
        if self.slots.len() < self.capacity.get() {
            self.slots.push(value);
            return None;
        }

        let evicted = std::mem::replace(&mut self.slots[self.head], value);
        self.head = (self.head + 1) % self.capacity.get();
        Some(evicted)
    }

    /// Samples in chronological order (oldest first).
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let (newer, older) = self.slots.split_at(self.head);
        older.iter().chain(newer.iter()).copied()
    }

    /// Arithmetic mean of the stored samples.
    ///
    /// Divides by the number of samples held, not by the capacity.
    /// `None` for an empty window.
    pub fn mean(&self) -> Option<f64> {
        if self.slots.is_empty() {
            return None;
        }
        let sum: f64 = self.iter().sum();
        Some(sum / self.slots.len() as f64)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() == self.capacity.get()
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.iter().collect()
    }
}
