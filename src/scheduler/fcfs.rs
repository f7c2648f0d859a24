use std::collections::VecDeque;

use super::{Dispatch, EnqueueFlags, Scheduler, SimCtx, Slot};

/// First-come-first-served: arrival order, each process runs to completion.
#[derive(Debug, Default)]
pub struct FcfsScheduler {
    queue: VecDeque<Slot>,
}

impl FcfsScheduler {
    pub const NAME: &'static str = "FCFS";

    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for FcfsScheduler {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn enqueue(&mut self, _ctx: &SimCtx, slot: Slot, _flags: EnqueueFlags) {
        self.queue.push_back(slot);
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        let slot = self.queue.pop_front()?;
        Some(Dispatch::to_completion(ctx, slot))
    }
}
