use super::priq::{PriqScheduler, SelectionKey};
use crate::core::{Priority, Process};

#[derive(Debug)]
pub struct LowestPriority;

impl SelectionKey for LowestPriority {
    type Key = Priority;

    const NAME: &'static str = "Priority";

    fn key(process: &Process) -> Priority {
        process.priority
    }
}

/// Non-preemptive priority scheduling; lower value means higher priority.
pub type PriorityScheduler = PriqScheduler<LowestPriority>;
