//! Capacity-bounded, tick-indexed history.
//!
//! A [`BoundedHistory`] maps ticks to samples and never holds more than its
//! capacity. Inserting past capacity evicts the oldest tick, and the evicted
//! sample is handed back to the caller so eviction can be observed and tested.
//!
//! Storage is a `BTreeMap`, which keeps ticks ordered: the oldest and newest
//! entries are the first and last keys.
//!
//! # Example
//!
//! ```
//! use sweeplock_core::history::BoundedHistory;
//!
//! let mut health = BoundedHistory::with_capacity(2);
//! health.put(1, 100.0);
//! health.put(2, 90.0);
//! let evicted = health.put(3, 75.0);
//!
//! assert_eq!(evicted, Some((1, 100.0)));
//! assert_eq!(health.get(1), None);
//! assert_eq!(health.latest(), Some(3));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Discrete simulation step.
pub type Tick = u64;

/// Default number of live entries kept per history.
pub const DEFAULT_CAPACITY: usize = 100;

/// Sparse tick → sample map holding at most `capacity` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundedHistory<T> {
    entries: BTreeMap<Tick, T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    /// Creates an empty history with [`DEFAULT_CAPACITY`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty history holding at most `capacity` entries.
    ///
    /// A capacity of zero is raised to one.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: BTreeMap::new(),
            capacity: capacity.max(1),
        }
    }

    /// Inserts or overwrites the sample at `tick`.
    ///
    /// Returns the entry evicted to stay within capacity, if any. The evicted
    /// entry is always the smallest tick present after the insert.
    pub fn put(&mut self, tick: Tick, value: T) -> Option<(Tick, T)> {
        self.entries.insert(tick, value);
        if self.entries.len() > self.capacity {
            self.entries.pop_first()
        } else {
            None
        }
    }

    /// Sample recorded at `tick`, if present.
    #[must_use]
    pub fn get(&self, tick: Tick) -> Option<&T> {
        self.entries.get(&tick)
    }

    /// Largest tick with a present entry.
    #[must_use]
    pub fn latest(&self) -> Option<Tick> {
        self.entries.keys().next_back().copied()
    }

    /// Smallest tick with a present entry.
    #[must_use]
    pub fn earliest(&self) -> Option<Tick> {
        self.entries.keys().next().copied()
    }

    /// Newest entry.
    #[must_use]
    pub fn last(&self) -> Option<(Tick, &T)> {
        self.entries.iter().next_back().map(|(tick, value)| (*tick, value))
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been recorded (or everything was evicted).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of live entries.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries in ascending tick order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Tick, &T)> {
        self.entries.iter().map(|(tick, value)| (*tick, value))
    }
}

impl<T: Copy> BoundedHistory<T> {
    /// Copy of the sample at `tick`, if present.
    #[must_use]
    pub fn at(&self, tick: Tick) -> Option<T> {
        self.get(tick).copied()
    }
}

impl<T> Default for BoundedHistory<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Tests
// =============================================================================
