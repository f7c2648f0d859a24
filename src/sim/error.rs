use std::fmt;

use crate::core::{ProcessId, Ticks};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    /// A token was missing or not an integer.
    Parse {
        expected: &'static str,
        found: Option<String>,
    },
    InvalidInput(String),
    DuplicateProcess(ProcessId),
    InvalidQuantum(i64),
    MissingQuantum,
    UnknownAlgorithm(i64),
    /// The scheduler left the CPU idle with nothing left to arrive.
    Stalled { now: Ticks, unfinished: usize },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse {
                expected,
                found: Some(token),
            } => write!(f, "expected {expected}, found {token:?}"),
            Self::Parse {
                expected,
                found: None,
            } => write!(f, "expected {expected}, found end of input"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::DuplicateProcess(id) => write!(f, "process id {id} appears more than once"),
            Self::InvalidQuantum(q) => write!(f, "time quantum must be positive, got {q}"),
            Self::MissingQuantum => f.write_str("round robin requires a time quantum"),
            Self::UnknownAlgorithm(sel) => write!(f, "unknown algorithm selector {sel}"),
            Self::Stalled { now, unfinished } => write!(
                f,
                "scheduler stalled at t={now} with {unfinished} unfinished processes"
            ),
        }
    }
}

impl std::error::Error for SimError {}
