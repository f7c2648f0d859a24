use log::trace;
use std::collections::VecDeque;

use super::{Admission, Dispatch, EnqueueFlags, SIM_ENQ_PREEMPT, Scheduler, SimCtx, Slot};
use crate::{core::Ticks, sim::SimError};

/// Round-robin over a FIFO with a fixed quantum.
///
/// With [`Admission::Eager`] every process is queued at time 0 in arrival
/// order, so a process can be dispatched before it has arrived. That
/// matches the classic textbook table-driven simulation. Use
/// [`Admission::OnArrival`] for strict admission.
#[derive(Debug)]
pub struct RoundRobinScheduler {
    queue: VecDeque<Slot>,
    quantum: Ticks,
    admission: Admission,
}

impl RoundRobinScheduler {
    pub const NAME: &'static str = "Round Robin";

    pub fn new(quantum: Ticks, admission: Admission) -> Result<Self, SimError> {
        if quantum == 0 {
            return Err(SimError::InvalidQuantum(0));
        }
        Ok(Self {
            queue: VecDeque::new(),
            quantum,
            admission,
        })
    }
}

impl Scheduler for RoundRobinScheduler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn admission(&self) -> Admission {
        self.admission
    }

    fn enqueue(&mut self, ctx: &SimCtx, slot: Slot, flags: EnqueueFlags) {
        if flags & SIM_ENQ_PREEMPT != 0 {
            trace!(
                "RR: {} used its quantum, requeued behind {} at t={}",
                ctx.process(slot).id,
                self.queue.len(),
                ctx.now
            );
        }
        self.queue.push_back(slot);
    }

    fn dispatch(&mut self, _ctx: &SimCtx) -> Option<Dispatch> {
        let slot = self.queue.pop_front()?;
        Some(Dispatch {
            slot,
            slice: self.quantum,
        })
    }
}
