use average::{Estimate, Mean};
use serde::Serialize;
use std::io::{self, Write};

use crate::{
    core::{Interval, Process, ProcessId, SignedTicks, SimCtx, Ticks},
    scheduler::Algorithm,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessOutcome {
    #[serde(flatten)]
    pub process: Process,
    pub completion: Ticks,
    pub turnaround: SignedTicks,
    pub waiting: SignedTicks,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub avg_waiting: f64,
    pub avg_turnaround: f64,
    pub makespan: Ticks,
    pub busy: Ticks,
    pub utilization: f64,
}

/// Everything one run produced: the timeline in emission order and the
/// per-process outcomes in id order.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub algorithm: Algorithm,
    pub timeline: Vec<Interval>,
    pub outcomes: Vec<ProcessOutcome>,
    pub summary: Summary,
}

impl SimReport {
    pub fn new(algorithm: Algorithm, ctx: &SimCtx) -> Self {
        let mut outcomes: Vec<_> = ctx
            .entries
            .iter()
            .filter_map(|e| {
                Some(ProcessOutcome {
                    process: e.process,
                    completion: e.stats.completion?,
                    turnaround: e.stats.turnaround?,
                    waiting: e.stats.waiting?,
                })
            })
            .collect();
        outcomes.sort_by_key(|o| o.process.id);

        let makespan = ctx.timeline.last().map_or(0, |i| i.end);
        let busy = ctx.timeline.iter().map(Interval::len).sum();
        let summary = Summary {
            avg_waiting: avg(outcomes.iter().map(|o| o.waiting as f64)),
            avg_turnaround: avg(outcomes.iter().map(|o| o.turnaround as f64)),
            makespan,
            busy,
            utilization: if makespan == 0 {
                0.0
            } else {
                busy as f64 / makespan as f64
            },
        };

        Self {
            algorithm,
            timeline: ctx.timeline.clone(),
            outcomes,
            summary,
        }
    }

    pub fn outcome(&self, id: ProcessId) -> Option<&ProcessOutcome> {
        self.outcomes.iter().find(|o| o.process.id == id)
    }

    /// One `"<id> <start> <end>"` line per interval.
    pub fn write_timeline<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for interval in &self.timeline {
            writeln!(out, "{interval}")?;
        }
        Ok(())
    }

    pub fn write_metrics<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(
            out,
            "{:<8}{:>8}{:>8}{:>10}{:>12}{:>12}{:>9}",
            "Process", "Arrival", "Burst", "Priority", "Completion", "Turnaround", "Waiting"
        )?;
        for o in &self.outcomes {
            writeln!(
                out,
                "{:<8}{:>8}{:>8}{:>10}{:>12}{:>12}{:>9}",
                format!("P{}", o.process.id),
                o.process.arrival,
                o.process.burst,
                o.process.priority,
                o.completion,
                o.turnaround,
                o.waiting
            )?;
        }
        writeln!(
            out,
            "Average waiting time: {:.2}",
            self.summary.avg_waiting
        )?;
        writeln!(
            out,
            "Average turnaround time: {:.2}",
            self.summary.avg_turnaround
        )?;
        writeln!(
            out,
            "CPU utilization: {:.1}% of {} ticks",
            self.summary.utilization * 100.0,
            self.summary.makespan
        )
    }
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    let mean: Mean = iter.collect();
    if mean.is_empty() { 0.0 } else { mean.estimate() }
}
