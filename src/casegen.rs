//! # Random Case Generation
//!
//! Produces random problems and writes them, together with their expected
//! answers, in the case-directory layout read by [`crate::judge`].

use crate::histogram::Deadline;
use crate::input::Problem;
use anyhow::{Context, Result};
use rand::Rng;
use std::fs;
use std::path::Path;

/// Upper bounds for generated problems (inclusive).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Limits {
    pub max_tasks: usize,
    pub max_deadline: Deadline,
    pub max_days: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_tasks: 20,
            max_deadline: 10,
            max_days: 10,
        }
    }
}

pub fn random_problem<R: Rng>(rng: &mut R, limits: &Limits) -> Problem {
    let n = rng.random_range(0..=limits.max_tasks);
    let deadlines = (0..n)
        .map(|_| rng.random_range(0..=limits.max_deadline))
        .collect();
    let days = rng.random_range(0..=limits.max_days);
    Problem::new(days, deadlines)
}

/// Writes `input{i}.txt` and `output{i}.txt` (1-based) under `dir`, creating
/// it if needed, and the case count to `cases_file`.
pub fn write_cases(dir: &Path, cases_file: &Path, problems: &[Problem]) -> Result<()> {
    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    for (i, p) in problems.iter().enumerate() {
        let input = dir.join(format!("input{}.txt", i + 1));
        let output = dir.join(format!("output{}.txt", i + 1));
        fs::write(&input, p.to_string())
            .with_context(|| format!("Failed to write {}", input.display()))?;
        fs::write(&output, p.solve().to_string())
            .with_context(|| format!("Failed to write {}", output.display()))?;
    }
    fs::write(cases_file, format!("{}\n", problems.len()))
        .with_context(|| format!("Failed to write {}", cases_file.display()))?;
    Ok(())
}
