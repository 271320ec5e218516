//! Bounded history log
//!
//! Append-only, insertion-ordered, capped at `max_size`. Once full, every push
//! evicts the oldest entry first (FIFO).

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// FIFO-capped sequence of past check results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct History<T> {
    max_size: usize,
    entries: VecDeque<T>,
}

impl<T> History<T> {
    /// Create an empty history retaining at most `max_size` entries
    pub fn new(max_size: usize) -> Self {
        let max_size = max_size.max(1);
        Self { max_size, entries: VecDeque::with_capacity(max_size.min(1024)) }
    }

    /// Append an entry, returning the evicted oldest entry if the cap was hit
    pub fn push(&mut self, entry: T) -> Option<T> {
        let evicted = if self.entries.len() >= self.max_size {
            self.entries.pop_front()
        } else {
            None
        };
        self.entries.push_back(entry);
        evicted
    }

    /// Most recent entry
    pub fn latest(&self) -> Option<&T> {
        self.entries.back()
    }

    /// Entries oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> + ExactSizeIterator {
        self.entries.iter()
    }

    /// Get the most recent n entries, newest first
    pub fn recent(&self, n: usize) -> Vec<&T> {
        self.entries.iter().rev().take(n).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl<T: Clone> History<T> {
    /// Snapshot of all entries, oldest first
    pub fn to_vec(&self) -> Vec<T> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_push_below_capacity() {
        let mut history = History::new(3);
        assert!(history.is_empty());
        assert_eq!(history.push(1), None);
        assert_eq!(history.push(2), None);
        assert_eq!(history.len(), 2);
        assert_eq!(history.latest(), Some(&2));
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut history = History::new(3);
        for i in 0..3 {
            history.push(i);
        }
        assert_eq!(history.push(3), Some(0));
        assert_eq!(history.push(4), Some(1));
        assert_eq!(history.to_vec(), vec![2, 3, 4]);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let mut history = History::new(10);
        for i in 0..5 {
            history.push(i);
        }
        assert_eq!(history.recent(2), vec![&4, &3]);
        assert_eq!(history.recent(100).len(), 5);
    }

    #[test]
    fn test_zero_capacity_keeps_one() {
        let mut history = History::new(0);
        history.push("a");
        history.push("b");
        assert_eq!(history.max_size(), 1);
        assert_eq!(history.to_vec(), vec!["b"]);
    }

    proptest! {
        #[test]
        fn prop_length_never_exceeds_cap(
            cap in 1usize..50,
            values in proptest::collection::vec(any::<u32>(), 0..200),
        ) {
            let mut history = History::new(cap);
            for v in &values {
                history.push(*v);
                prop_assert!(history.len() <= cap);
            }
        }

        #[test]
        fn prop_retains_most_recent_in_order(
            cap in 1usize..50,
            values in proptest::collection::vec(any::<u32>(), 0..200),
        ) {
            let mut history = History::new(cap);
            for v in &values {
                history.push(*v);
            }
            let start = values.len().saturating_sub(cap);
            prop_assert_eq!(history.to_vec(), values[start..].to_vec());
        }
    }
}
