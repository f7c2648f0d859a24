use log::{debug, trace};

use super::{
    observer::Observer,
    state::{Process, SimCtx},
};
use crate::{
    scheduler::{
        Admission, Dispatch, SIM_ENQ_ARRIVAL, SIM_ENQ_EAGER, SIM_ENQ_PREEMPT, Scheduler,
    },
    sim::SimError,
};

/// Drives one scheduler over one registry: admit arrivals, ask for a
/// dispatch, run the slice, requeue or complete, idle when nothing is ready.
pub struct SchedCore<S: Scheduler> {
    pub ctx: SimCtx,
    pub scheduler: S,
    observer: Observer,
}

impl<S: Scheduler> SchedCore<S> {
    pub fn new(processes: &[Process], scheduler: S) -> Self {
        let ctx = SimCtx::new(processes);
        let observer = Observer::new(scheduler.admission());
        Self {
            ctx,
            scheduler,
            observer,
        }
    }

    pub fn run(&mut self) -> Result<(), SimError> {
        if self.scheduler.admission() == Admission::Eager {
            for slot in self.ctx.take_all() {
                self.scheduler.enqueue(&self.ctx, slot, SIM_ENQ_EAGER);
            }
        }

        loop {
            self.handle_arrivals();
            if self.ctx.all_completed() {
                break;
            }
            self.step()?;
        }

        self.observer.observe_finish(&self.ctx);
        debug!(
            "{}: {} processes finished at t={} after {} dispatches",
            self.scheduler.name(),
            self.ctx.len(),
            self.ctx.now,
            self.observer.steps()
        );
        Ok(())
    }

    // One scheduling decision: run a slice, or idle to the next arrival
    fn step(&mut self) -> Result<(), SimError> {
        let Some(Dispatch { slot, slice }) = self.scheduler.dispatch(&self.ctx) else {
            return self.idle();
        };

        let interval = self.ctx.run_slice(slot, slice);
        trace!("{}: ran {interval}", self.scheduler.name());
        self.observer.observe_interval(&self.ctx, slot, &interval);

        if self.ctx.entry(slot).remaining == 0 {
            self.ctx.mark_completed(slot);
        } else {
            // Whatever arrived during the slice queues ahead of the preempted process
            self.handle_arrivals();
            self.ctx.mark_ready(slot);
            self.scheduler.enqueue(&self.ctx, slot, SIM_ENQ_PREEMPT);
        }
        Ok(())
    }

    fn idle(&mut self) -> Result<(), SimError> {
        match self.ctx.next_arrival() {
            Some(arrival) => {
                debug!(
                    "{}: cpu idle from t={} to t={arrival}",
                    self.scheduler.name(),
                    self.ctx.now
                );
                self.ctx.idle_until(arrival);
                Ok(())
            }
            None => Err(SimError::Stalled {
                now: self.ctx.now,
                unfinished: self
                    .ctx
                    .entries
                    .iter()
                    .filter(|e| e.stats.completion.is_none())
                    .count(),
            }),
        }
    }

    fn handle_arrivals(&mut self) {
        for slot in self.ctx.take_arrivals() {
            self.scheduler.enqueue(&self.ctx, slot, SIM_ENQ_ARRIVAL);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::Slot,
        scheduler::{Admission, EnqueueFlags, FcfsScheduler},
    };

    /// Accepts processes but never dispatches any of them.
    struct IdleScheduler;

    impl Scheduler for IdleScheduler {
        fn name(&self) -> &'static str {
            "idle"
        }

        fn enqueue(&mut self, _ctx: &SimCtx, _slot: Slot, _flags: EnqueueFlags) {}

        fn dispatch(&mut self, _ctx: &SimCtx) -> Option<Dispatch> {
            None
        }
    }

    #[test]
    fn idle_scheduler_stalls_once_arrivals_run_out() {
        let mut core = SchedCore::new(
            &[Process::new(1, 0, 2, 0), Process::new(2, 4, 1, 0)],
            IdleScheduler,
        );

        assert_eq!(
            core.run(),
            Err(SimError::Stalled {
                now: 4,
                unfinished: 2
            })
        );
        assert!(core.ctx.timeline.is_empty());
    }

    #[test]
    fn idle_gaps_jump_to_next_arrival() {
        let mut core = SchedCore::new(&[Process::new(1, 6, 2, 0)], FcfsScheduler::new());
        assert_eq!(core.scheduler.admission(), Admission::OnArrival);

        core.run().unwrap();
        assert_eq!(core.ctx.now, 8);
        assert_eq!(core.observer.steps(), 1);
    }
}
