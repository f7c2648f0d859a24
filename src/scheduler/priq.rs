use log::trace;
use std::{fmt, marker::PhantomData};

use super::{Dispatch, EnqueueFlags, Scheduler, SimCtx, Slot};
use crate::core::{MinKey, Process, ReadyHeap};

/// Which attribute a non-preemptive priority-queue policy selects on.
/// Smaller keys run first; equal keys fall back to the lowest process id.
pub trait SelectionKey {
    type Key: Ord + Copy + fmt::Debug;

    const NAME: &'static str;

    fn key(process: &Process) -> Self::Key;
}

/// Non-preemptive selection over the set of arrived, unfinished processes.
///
/// Arrivals go into a min-heap keyed on `(K::key, id)`; every dispatch
/// pops the minimum and runs it to completion. The core idles to the next
/// arrival whenever the heap is empty.
#[derive(Debug)]
pub struct PriqScheduler<K: SelectionKey> {
    ready: ReadyHeap<K::Key>,
    _key: PhantomData<K>,
}

impl<K: SelectionKey> PriqScheduler<K> {
    pub const NAME: &'static str = K::NAME;

    pub fn new() -> Self {
        Self {
            ready: ReadyHeap::new(),
            _key: PhantomData,
        }
    }
}

impl<K: SelectionKey> Default for PriqScheduler<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: SelectionKey> Scheduler for PriqScheduler<K> {
    fn name(&self) -> &'static str {
        K::NAME
    }

    fn enqueue(&mut self, ctx: &SimCtx, slot: Slot, flags: EnqueueFlags) {
        let process = ctx.process(slot);
        trace!(
            "{}: enqueue {} (flags {flags:#x}) at t={}",
            K::NAME,
            process.id,
            ctx.now
        );
        self.ready.push(slot, MinKey(K::key(process), process.id));
    }

    fn dispatch(&mut self, ctx: &SimCtx) -> Option<Dispatch> {
        let slot = self.ready.pop()?;
        Some(Dispatch::to_completion(ctx, slot))
    }
}
