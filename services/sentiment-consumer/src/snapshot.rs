//! Point-in-time view of every author's rolling average
//!
//! Built by the aggregator on demand and handed to render hooks. Entries
//! keep the order in which authors were first seen.

use serde::{Deserialize, Serialize};
use types::ids::AuthorId;

/// Rolling average for a single author.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorAverage {
    pub author: AuthorId,
    /// Mean of the samples currently in the author's window.
    pub average: f64,
    /// Number of samples the mean was taken over.
    pub samples: usize,
}

/// Full author → average mapping at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Window capacity in effect when the snapshot was taken.
    pub window_size: usize,
    /// Total updates applied to the aggregator so far.
    pub messages: u64,
    /// Per-author averages in first-seen order.
    pub averages: Vec<AuthorAverage>,
}

impl Snapshot {
    /// Average for one author, if tracked.
    pub fn get(&self, author: &str) -> Option<f64> {
        self.averages
            .iter()
            .find(|entry| entry.author.as_str() == author)
            .map(|entry| entry.average)
    }

    /// Author handles in first-seen order.
    pub fn authors(&self) -> impl Iterator<Item = &str> {
        self.averages.iter().map(|entry| entry.author.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AuthorAverage> {
        self.averages.iter()
    }

    pub fn len(&self) -> usize {
        self.averages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }

    /// `(author, average)` pairs in first-seen order.
    pub fn to_pairs(&self) -> Vec<(String, f64)> {
        self.averages
            .iter()
            .map(|entry| (entry.author.to_string(), entry.average))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a AuthorAverage;
    type IntoIter = std::slice::Iter<'a, AuthorAverage>;

    fn into_iter(self) -> Self::IntoIter {
        self.averages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(author: &str, average: f64, samples: usize) -> AuthorAverage {
        AuthorAverage {
            author: AuthorId::try_new(author).unwrap(),
            average,
            samples,
        }
    }

    fn sample() -> Snapshot {
        Snapshot {
            window_size: 20,
            messages: 4,
            averages: vec![entry("a", 0.5, 3), entry("b", 0.25, 1)],
        }
    }

    #[test]
    fn test_get_and_order() {
        let snap = sample();
        assert_eq!(snap.get("a"), Some(0.5));
        assert_eq!(snap.get("b"), Some(0.25));
        assert_eq!(snap.get("c"), None);
        assert_eq!(snap.authors().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn test_to_pairs() {
        assert_eq!(
            sample().to_pairs(),
            vec![("a".to_string(), 0.5), ("b".to_string(), 0.25)]
        );
    }

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&sample()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["window_size"], 20);
        assert_eq!(value["averages"][0]["author"], "a");
        assert_eq!(value["averages"][1]["samples"], 1);
    }
}
