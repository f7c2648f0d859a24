use super::{
    event::Interval,
    state::{ProcessState, SimCtx, Slot},
};
use crate::scheduler::Admission;

#[derive(Debug)]
pub struct Observer {
    step: u64,
    admission: Admission,
}

impl Observer {
    pub fn new(admission: Admission) -> Self {
        Self { step: 0, admission }
    }

    pub fn steps(&self) -> u64 {
        self.step
    }

    pub fn observe_interval(&mut self, ctx: &SimCtx, slot: Slot, interval: &Interval) {
        self.step += 1;

        let entry = ctx.entry(slot);
        let pid = entry.process.id;
        debug_assert_eq!(pid, interval.pid, "Interval emitted for wrong slot");
        debug_assert!(
            interval.start < interval.end,
            "Empty interval {interval} for process {pid}"
        );
        debug_assert!(
            interval.len() <= entry.process.burst,
            "Interval {interval} longer than burst {}",
            entry.process.burst
        );
        debug_assert_eq!(
            entry.state,
            ProcessState::Running,
            "Process {pid} must be Running right after dispatch"
        );
        // Eager admission deliberately lets a process run before it arrives
        if self.admission == Admission::OnArrival {
            debug_assert!(
                interval.start >= entry.process.arrival,
                "Process {pid} ran at {} before arriving at {}",
                interval.start,
                entry.process.arrival
            );
        }
        if let Some(prev) = ctx.timeline.iter().rev().nth(1) {
            debug_assert!(
                prev.end <= interval.start,
                "Interval {interval} overlaps {prev}"
            );
        }
    }

    pub fn observe_finish(&self, ctx: &SimCtx) {
        for entry in &ctx.entries {
            let pid = entry.process.id;
            debug_assert_eq!(
                entry.state,
                ProcessState::Completed,
                "Process {pid} left unfinished"
            );
            debug_assert_eq!(
                entry.executed(),
                entry.process.burst,
                "Process {pid} executed for the wrong total time"
            );
            if let (Some(turnaround), Some(waiting)) = (entry.stats.turnaround, entry.stats.waiting)
            {
                debug_assert_eq!(waiting, turnaround - entry.process.burst as i64);
            }
        }
    }
}
