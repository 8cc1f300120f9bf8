// # deadline-collapse
//
// Counts how many tasks get done when each day clears the bucket of tasks with
// the latest remaining deadline and rolls that bucket over into the one a day
// earlier. Besides the counter itself, the crate carries the tooling used to
// check a solution locally: a case generator and an auto-judge that runs a
// command against a directory of input/output pairs.

/// Frequency histogram of task deadlines.
pub mod histogram;

/// The greedy deadline-collapsing pass.
pub mod collapse;

/// Reading and validating problem input.
pub mod input;

/// The `solve` driver.
pub mod solver;

/// Local auto-judge for a solution command.
pub mod judge;

/// Random case generation in the judge's directory layout.
pub mod casegen;

pub use collapse::compute;
pub use input::{InputError, Problem};
