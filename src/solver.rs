//! The `solve` driver: problem text in, task count out.

use crate::collapse::{Step, collapse_with};
use crate::histogram::DeadlineHistogram;
use crate::input::Problem;
use anyhow::Result;
use std::io::Write;

/// Parses `input`, writes the count to `out` with no trailing newline and,
/// when `trace` is set, one `!log step` line per visited day plus a `!log
/// stop` line to `log`.
pub fn run<W: Write, L: Write>(input: &str, trace: bool, out: &mut W, log: &mut L) -> Result<()> {
    let problem = Problem::parse(input)?;
    let hist = DeadlineHistogram::from_deadlines(&problem.deadlines);
    let mut steps: Vec<Step> = vec![];
    let outcome = collapse_with(hist, problem.days, trace.then_some(&mut steps));
    if trace {
        for step in &steps {
            writeln!(
                log,
                "!log step deadline={} count={} days_left={}",
                step.deadline, step.count, step.days_left
            )?;
        }
        writeln!(log, "!log stop {:?}", outcome.stop)?;
    }
    write!(out, "{}", outcome.completed)?;
    out.flush()?;
    Ok(())
}
