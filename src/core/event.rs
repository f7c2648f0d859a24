use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{ProcessId, Ticks};

/// One contiguous stretch of CPU time given to a process: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub pid: ProcessId,
    pub start: Ticks,
    pub end: Ticks,
}

impl Interval {
    pub fn len(&self) -> Ticks {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }
}

// Timeline line format: "<id> <start> <end>"
impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.pid, self.start, self.end)
    }
}
