//! # Deadline Histogram
//!
//! Tasks are aggregated by deadline into buckets. The greedy pass in
//! [`crate::collapse`] consumes buckets from the highest deadline downward and
//! pushes each visited bucket's count into the bucket one unit earlier, so the
//! histogram has to accept insertions of lesser keys while it is being walked.
//! A `BTreeMap` keyed by deadline gives both.

use std::collections::BTreeMap;

/// Deadline value of a task.
pub type Deadline = u32;

/// Frequency histogram of task deadlines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeadlineHistogram {
    buckets: BTreeMap<Deadline, u64>,
}

impl DeadlineHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the histogram of `deadlines`.
    pub fn from_deadlines(deadlines: &[Deadline]) -> Self {
        let mut hist = Self::new();
        for &d in deadlines {
            hist.add(d, 1);
        }
        hist
    }

    /// Adds `count` tasks to the bucket at `deadline`, creating it if absent.
    pub fn add(&mut self, deadline: Deadline, count: u64) {
        *self.buckets.entry(deadline).or_insert(0) += count;
    }

    pub fn count(&self, deadline: Deadline) -> u64 {
        self.buckets.get(&deadline).copied().unwrap_or(0)
    }

    /// Number of distinct deadlines.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total number of tasks over all buckets.
    pub fn total(&self) -> u64 {
        self.buckets.values().sum()
    }

    /// Highest deadline strictly below `cursor`, or the highest overall when
    /// `cursor` is `None`. Keys inserted below the cursor after a previous
    /// lookup are seen by the next one.
    pub fn next_below(&self, cursor: Option<Deadline>) -> Option<(Deadline, u64)> {
        let entry = match cursor {
            Some(c) => self.buckets.range(..c).next_back(),
            None => self.buckets.iter().next_back(),
        };
        entry.map(|(&k, &v)| (k, v))
    }

    /// Moves the bucket at `deadline` into `deadline - 1` and returns its
    /// count. A descending pass never revisits the source bucket, so it is
    /// removed. Deadline 0 has no earlier bucket and is left alone.
    pub fn roll_over(&mut self, deadline: Deadline) -> u64 {
        if deadline == 0 {
            return 0;
        }
        let Some(count) = self.buckets.remove(&deadline) else {
            return 0;
        };
        self.add(deadline - 1, count);
        count
    }

    /// Buckets in descending deadline order.
    pub fn iter_desc(&self) -> impl Iterator<Item = (Deadline, u64)> + '_ {
        self.buckets.iter().rev().map(|(&k, &v)| (k, v))
    }
}

impl FromIterator<Deadline> for DeadlineHistogram {
    fn from_iter<I: IntoIterator<Item = Deadline>>(iter: I) -> Self {
        let mut hist = Self::new();
        for d in iter {
            hist.add(d, 1);
        }
        hist
    }
}
