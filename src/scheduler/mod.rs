pub mod fcfs;
pub mod priority;
pub mod priq;
pub mod rr;
pub mod sjf;

use serde::Serialize;
use std::fmt;

use crate::{
    core::{SimCtx, Slot, Ticks},
    sim::SimError,
};
pub use fcfs::FcfsScheduler;
pub use priority::PriorityScheduler;
pub use priq::{PriqScheduler, SelectionKey};
pub use rr::RoundRobinScheduler;
pub use sjf::SjfScheduler;

pub type EnqueueFlags = u64;

pub const SIM_ENQ_ARRIVAL: EnqueueFlags = 1 << 0;
pub const SIM_ENQ_PREEMPT: EnqueueFlags = 1 << 1;
pub const SIM_ENQ_EAGER: EnqueueFlags = 1 << 2;

pub const SIM_QUANTUM_DFL: Ticks = 3;

/// When processes enter the scheduler's ready set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Admission {
    /// Everything is enqueued at time 0 in arrival order, arrived or not.
    #[default]
    Eager,
    /// A process is enqueued once the clock reaches its arrival.
    OnArrival,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatch {
    pub slot: Slot,
    // Capped at the process's remaining burst by the core
    pub slice: Ticks,
}

impl Dispatch {
    pub fn to_completion(ctx: &SimCtx, slot: Slot) -> Self {
        Self {
            slot,
            slice: ctx.entry(slot).remaining,
        }
    }
}

pub trait Scheduler {
    fn name(&self) -> &'static str;

    fn admission(&self) -> Admission {
        Admission::OnArrival
    }

    fn enqueue(&mut self, ctx: &SimCtx, slot: Slot, flags: EnqueueFlags);

    /// Picks the next process to run, or None to leave the CPU idle.
    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch>;
}

/// Policy selector, numbered as in the input stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "policy", rename_all = "kebab-case")]
pub enum Algorithm {
    Fcfs,
    Sjf,
    RoundRobin { quantum: Ticks },
    Priority,
}

impl Algorithm {
    pub const SELECTOR_FCFS: i64 = 1;
    pub const SELECTOR_SJF: i64 = 2;
    pub const SELECTOR_RR: i64 = 3;
    pub const SELECTOR_PRIORITY: i64 = 4;

    pub fn from_selector(selector: i64, quantum: Option<i64>) -> Result<Self, SimError> {
        match selector {
            Self::SELECTOR_FCFS => Ok(Self::Fcfs),
            Self::SELECTOR_SJF => Ok(Self::Sjf),
            Self::SELECTOR_RR => Self::round_robin(quantum.ok_or(SimError::MissingQuantum)?),
            Self::SELECTOR_PRIORITY => Ok(Self::Priority),
            other => Err(SimError::UnknownAlgorithm(other)),
        }
    }

    pub fn round_robin(quantum: i64) -> Result<Self, SimError> {
        match Ticks::try_from(quantum) {
            Ok(q) if q > 0 => Ok(Self::RoundRobin { quantum: q }),
            _ => Err(SimError::InvalidQuantum(quantum)),
        }
    }

    pub fn selector(&self) -> i64 {
        match self {
            Self::Fcfs => Self::SELECTOR_FCFS,
            Self::Sjf => Self::SELECTOR_SJF,
            Self::RoundRobin { .. } => Self::SELECTOR_RR,
            Self::Priority => Self::SELECTOR_PRIORITY,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Fcfs => FcfsScheduler::NAME,
            Self::Sjf => SjfScheduler::NAME,
            Self::RoundRobin { .. } => RoundRobinScheduler::NAME,
            Self::Priority => PriorityScheduler::NAME,
        }
    }

    pub fn all(quantum: Ticks) -> [Self; 4] {
        [
            Self::Fcfs,
            Self::Sjf,
            Self::RoundRobin { quantum },
            Self::Priority,
        ]
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundRobin { quantum } => write!(f, "{} (q={quantum})", self.name()),
            _ => f.write_str(self.name()),
        }
    }
}
