use super::priq::{PriqScheduler, SelectionKey};
use crate::core::{Process, Ticks};

#[derive(Debug)]
pub struct ShortestBurst;

impl SelectionKey for ShortestBurst {
    type Key = Ticks;

    const NAME: &'static str = "SJF";

    fn key(process: &Process) -> Ticks {
        process.burst
    }
}

/// Shortest job first, non-preemptive.
pub type SjfScheduler = PriqScheduler<ShortestBurst>;
