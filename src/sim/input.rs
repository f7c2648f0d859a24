//! The whitespace-separated input stream:
//!
//! ```text
//! n
//! arrival burst priority    (n times, ids 1..=n in this order)
//! choice                    (1 FCFS, 2 SJF, 3 Round Robin, 4 Priority)
//! quantum                   (only when choice == 3)
//! ```

use std::{fmt::Write as _, str::SplitWhitespace};

use super::error::SimError;
use crate::{
    core::{Process, ProcessId, Ticks},
    scheduler::Algorithm,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workload {
    pub processes: Vec<Process>,
    pub selector: i64,
    pub quantum: Option<i64>,
}

struct Tokens<'a> {
    iter: SplitWhitespace<'a>,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            iter: input.split_whitespace(),
        }
    }

    fn next_int(&mut self, expected: &'static str) -> Result<i64, SimError> {
        let token = self.iter.next().ok_or(SimError::Parse {
            expected,
            found: None,
        })?;
        token.parse().map_err(|_| SimError::Parse {
            expected,
            found: Some(token.to_owned()),
        })
    }
}

impl Workload {
    pub fn parse(input: &str) -> Result<Self, SimError> {
        let mut tokens = Tokens::new(input);

        let n = tokens.next_int("process count")?;
        let n = usize::try_from(n)
            .map_err(|_| SimError::InvalidInput(format!("process count {n} is negative")))?;

        let mut processes = Vec::with_capacity(n.min(1024));
        for index in 0..n {
            let id = ProcessId::try_from(index + 1)
                .map_err(|_| SimError::InvalidInput(format!("too many processes: {n}")))?;

            let arrival = tokens.next_int("arrival time")?;
            let burst = tokens.next_int("burst time")?;
            let priority = tokens.next_int("priority")?;

            let arrival = Ticks::try_from(arrival).map_err(|_| {
                SimError::InvalidInput(format!(
                    "process {id}: arrival must be non-negative, got {arrival}"
                ))
            })?;
            let burst = match Ticks::try_from(burst) {
                Ok(b) if b > 0 => b,
                _ => {
                    return Err(SimError::InvalidInput(format!(
                        "process {id}: burst must be positive, got {burst}"
                    )));
                }
            };

            processes.push(Process::new(id, arrival, burst, priority));
        }

        let selector = tokens.next_int("algorithm choice")?;
        let quantum = if selector == Algorithm::SELECTOR_RR {
            Some(tokens.next_int("time quantum")?)
        } else {
            None
        };

        Ok(Self {
            processes,
            selector,
            quantum,
        })
    }

    pub fn from_processes(processes: Vec<Process>, algorithm: Algorithm) -> Self {
        let quantum = match algorithm {
            Algorithm::RoundRobin { quantum } => i64::try_from(quantum).ok(),
            _ => None,
        };
        Self {
            processes,
            selector: algorithm.selector(),
            quantum,
        }
    }

    pub fn algorithm(&self) -> Result<Algorithm, SimError> {
        Algorithm::from_selector(self.selector, self.quantum)
    }

    /// Renders back into the stream format, in id order.
    pub fn to_input_string(&self) -> String {
        let mut processes = self.processes.clone();
        processes.sort_by_key(|p| p.id);

        let mut out = String::new();
        let _ = writeln!(out, "{}", processes.len());
        for p in &processes {
            let _ = writeln!(out, "{} {} {}", p.arrival, p.burst, p.priority);
        }
        let _ = writeln!(out, "{}", self.selector);
        if let Some(quantum) = self.quantum {
            let _ = writeln!(out, "{quantum}");
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_round_robin_stream() {
        let workload = Workload::parse("2\n0 5 1\n0 3 2\n3\n2\n").unwrap();
        assert_eq!(
            workload.processes,
            vec![Process::new(1, 0, 5, 1), Process::new(2, 0, 3, 2)]
        );
        assert_eq!(
            workload.algorithm().unwrap(),
            Algorithm::RoundRobin { quantum: 2 }
        );
    }

    #[test]
    fn quantum_is_only_read_for_round_robin() {
        let workload = Workload::parse("1 0 4 1 2 99").unwrap();
        assert_eq!(workload.selector, 2);
        assert_eq!(workload.quantum, None);
    }

    #[test]
    fn reports_missing_tokens() {
        assert_eq!(
            Workload::parse("2\n0 5 1\n0 3").unwrap_err(),
            SimError::Parse {
                expected: "priority",
                found: None
            }
        );
        assert_eq!(
            Workload::parse("1\n0 5 1\n3\n").unwrap_err(),
            SimError::Parse {
                expected: "time quantum",
                found: None
            }
        );
    }

    #[test]
    fn reports_non_integer_tokens() {
        assert_eq!(
            Workload::parse("1\n0 five 1\n1\n").unwrap_err(),
            SimError::Parse {
                expected: "burst time",
                found: Some("five".to_owned())
            }
        );
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            Workload::parse("-1\n1\n"),
            Err(SimError::InvalidInput(_))
        ));
        assert!(matches!(
            Workload::parse("1\n-2 3 1\n1\n"),
            Err(SimError::InvalidInput(_))
        ));
        assert!(matches!(
            Workload::parse("1\n0 0 1\n1\n"),
            Err(SimError::InvalidInput(_))
        ));
    }

    #[test]
    fn bad_quantum_surfaces_when_selecting() {
        let workload = Workload::parse("1\n0 3 1\n3\n0\n").unwrap();
        assert_eq!(workload.algorithm(), Err(SimError::InvalidQuantum(0)));
    }

    #[test]
    fn renders_back_to_the_same_stream() {
        let text = "2\n0 5 1\n4 3 2\n3\n2\n";
        assert_eq!(Workload::parse(text).unwrap().to_input_string(), text);
    }
}
