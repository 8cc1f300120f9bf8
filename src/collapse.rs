//! # Deadline Collapsing
//!
//! Greedy pass over a [`DeadlineHistogram`]: each day clears the bucket with
//! the highest remaining deadline, and that bucket's tasks roll over into the
//! bucket one deadline earlier. The pass stops when the days run out, when it
//! reaches deadline 0, or when no buckets are left.

use crate::histogram::{Deadline, DeadlineHistogram};

/// Why the greedy pass stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StopReason {
    DaysExhausted,
    ReachedZero,
    NoBuckets,
}

/// One day of the greedy pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub deadline: Deadline,
    pub count: u64,
    pub days_left: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Outcome {
    pub completed: u64,
    pub days_left: u64,
    pub stop: StopReason,
}

/// Number of tasks completed within `days` days.
pub fn compute(deadlines: &[Deadline], days: u64) -> u64 {
    collapse(DeadlineHistogram::from_deadlines(deadlines), days).completed
}

/// Runs the greedy pass over `hist`, consuming it.
pub fn collapse(hist: DeadlineHistogram, days: u64) -> Outcome {
    collapse_with(hist, days, None)
}

/// Like [`collapse`], additionally appending every visited day to `trace`.
pub fn collapse_with(
    mut hist: DeadlineHistogram,
    mut days: u64,
    mut trace: Option<&mut Vec<Step>>,
) -> Outcome {
    let mut completed = 0u64;
    let mut cursor = None;
    let stop = loop {
        if days == 0 {
            break StopReason::DaysExhausted;
        }
        let Some((deadline, count)) = hist.next_below(cursor) else {
            break StopReason::NoBuckets;
        };
        if deadline == 0 {
            break StopReason::ReachedZero;
        }
        completed += count;
        hist.roll_over(deadline);
        days -= 1;
        if let Some(steps) = trace.as_deref_mut() {
            steps.push(Step {
                deadline,
                count,
                days_left: days,
            });
        }
        cursor = Some(deadline);
    };
    Outcome {
        completed,
        days_left: days,
        stop,
    }
}
