//! Problem input: `N D` followed by `N` deadlines, whitespace separated.
//!
//! Input is validated while it is read. Tokens after the `N`-th deadline are
//! ignored.

use crate::collapse;
use crate::histogram::Deadline;
use anyhow::Context;
use itertools::Itertools;
use proconio::source::Source;
use proconio::source::once::OnceSource;
use std::fmt;
use std::io::BufRead;
use std::num::ParseIntError;
use std::str::FromStr;

/// Which input value a token was expected to hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    TaskCount,
    Days,
    /// 0-based index of the deadline.
    Deadline(usize),
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::TaskCount => write!(f, "task count"),
            Field::Days => write!(f, "day budget"),
            Field::Deadline(i) => write!(f, "deadline #{}", i + 1),
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("missing {field}")]
    MissingToken { field: Field },
    #[error("invalid {field}: {token:?} ({source})")]
    InvalidToken {
        field: Field,
        token: String,
        source: ParseIntError,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Problem {
    pub days: u64,
    pub deadlines: Vec<Deadline>,
}

impl Problem {
    pub fn new(days: u64, deadlines: Vec<Deadline>) -> Self {
        Self { days, deadlines }
    }

    /// Parses the problem from the whole input text.
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let mut src = OnceSource::from(text);
        let n: usize = next_value(&mut src, Field::TaskCount)?;
        let days: u64 = next_value(&mut src, Field::Days)?;
        // `n` is untrusted until the deadlines have actually been read.
        let mut deadlines = Vec::with_capacity(n.min(1 << 16));
        for i in 0..n {
            deadlines.push(next_value(&mut src, Field::Deadline(i))?);
        }
        Ok(Self { days, deadlines })
    }

    pub fn num_tasks(&self) -> usize {
        self.deadlines.len()
    }

    pub fn solve(&self) -> u64 {
        collapse::compute(&self.deadlines, self.days)
    }
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.deadlines.len(), self.days)?;
        writeln!(f, "{}", self.deadlines.iter().join(" "))
    }
}

/// Reads all of stdin.
pub fn read_stdin() -> anyhow::Result<String> {
    use std::io::Read;
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    Ok(input)
}

fn next_value<R, T>(src: &mut OnceSource<R>, field: Field) -> Result<T, InputError>
where
    R: BufRead,
    T: FromStr<Err = ParseIntError>,
{
    let token = src.next_token().ok_or(InputError::MissingToken { field })?;
    token.parse().map_err(|source| InputError::InvalidToken {
        field,
        token: token.to_string(),
        source,
    })
}
