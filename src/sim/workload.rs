use rand::prelude::*;

use crate::core::{Priority, Process, ProcessId, Ticks};

/// Parameters for a Bernoulli arrival process: at every tick a process
/// arrives with probability `p_arrival`, and is short with probability
/// `p_short`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BernoulliParams {
    pub ticks: Ticks,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: Ticks,
    pub long_burst: Ticks,
    pub max_priority: Priority,
    pub seed: u64,
}

impl Default for BernoulliParams {
    fn default() -> Self {
        Self {
            ticks: 50,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            max_priority: 5,
            seed: 0,
        }
    }
}

/// Same seed, same processes.
pub fn bernoulli_processes(params: &BernoulliParams) -> Vec<Process> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut processes = Vec::new();

    for t in 0..params.ticks {
        if rng.random::<f64>() < params.p_arrival {
            let burst = if rng.random::<f64>() < params.p_short {
                params.short_burst
            } else {
                params.long_burst
            };
            let priority = rng.random_range(1..=params.max_priority.max(1));

            let id = processes.len() as ProcessId + 1;
            processes.push(Process::new(id, t, burst.max(1), priority));
        }
    }

    processes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_generation_is_reproducible() {
        let params = BernoulliParams {
            seed: 7,
            ..BernoulliParams::default()
        };
        assert_eq!(bernoulli_processes(&params), bernoulli_processes(&params));
    }

    #[test]
    fn ids_are_sequential_and_values_in_range() {
        let params = BernoulliParams {
            ticks: 200,
            p_arrival: 0.5,
            ..BernoulliParams::default()
        };
        let processes = bernoulli_processes(&params);
        assert!(!processes.is_empty());

        for (index, p) in processes.iter().enumerate() {
            assert_eq!(p.id as usize, index + 1);
            assert!(p.arrival < params.ticks);
            assert!(p.burst == params.short_burst || p.burst == params.long_burst);
            assert!((1..=params.max_priority).contains(&p.priority));
        }
    }

    #[test]
    fn zero_probability_yields_nothing() {
        let params = BernoulliParams {
            p_arrival: 0.0,
            ..BernoulliParams::default()
        };
        assert!(bernoulli_processes(&params).is_empty());
    }
}
