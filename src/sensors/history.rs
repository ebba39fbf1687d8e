//! Bounded rolling history of the most recent readings.
//!
//! One instance per charted metric. Appending past capacity evicts the
//! oldest value; values are never rewritten after insertion.

use std::collections::VecDeque;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct RollingHistory<T> {
    #[serde(skip)]
    capacity: usize,
    values: VecDeque<T>,
}

impl<T> RollingHistory<T> {
    /// Create an empty history holding at most `capacity` values.
    /// A zero capacity is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            values: VecDeque::with_capacity(capacity),
        }
    }

    /// Append the newest value, evicting the oldest on overflow.
    pub fn push(&mut self, value: T) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most recent value.
    pub fn latest(&self) -> Option<&T> {
        self.values.back()
    }

    /// Oldest-first iteration, for charting.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.values.iter()
    }
}

impl<T: Copy> RollingHistory<T> {
    /// Oldest-first copy of the retained values.
    pub fn to_vec(&self) -> Vec<T> {
        self.values.iter().copied().collect()
    }
}
