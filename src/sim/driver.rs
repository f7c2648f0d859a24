use log::info;
use rustc_hash::FxHashSet;

use super::{config::SimConfig, error::SimError, report::SimReport};
use crate::{
    core::{CLOCK_LIMIT, Process, SchedCore, SimCtx, Ticks, horizon},
    scheduler::{
        Algorithm, FcfsScheduler, PriorityScheduler, RoundRobinScheduler, Scheduler,
        SjfScheduler,
    },
};

/// One run of one scheduler over a private copy of the input processes.
pub struct Sim<S: Scheduler> {
    pub core: SchedCore<S>,
}

impl<S: Scheduler> Sim<S> {
    pub fn new(processes: &[Process], scheduler: S) -> Result<Self, SimError> {
        validate(processes)?;
        Ok(Self {
            core: SchedCore::new(processes, scheduler),
        })
    }

    pub fn run(&mut self) -> Result<(), SimError> {
        self.core.run()
    }

    pub fn ctx(&self) -> &SimCtx {
        &self.core.ctx
    }
}

fn validate(processes: &[Process]) -> Result<(), SimError> {
    let mut seen = FxHashSet::default();
    for p in processes {
        if p.burst == 0 {
            return Err(SimError::InvalidInput(format!(
                "process {} has a zero burst",
                p.id
            )));
        }
        if !seen.insert(p.id) {
            return Err(SimError::DuplicateProcess(p.id));
        }
    }
    if horizon(processes).is_none() {
        return Err(SimError::InvalidInput(format!(
            "last arrival plus total burst exceeds the clock limit {CLOCK_LIMIT}"
        )));
    }
    Ok(())
}

/// Runs `algorithm` over a fresh copy of `processes`.
pub fn simulate(
    processes: &[Process],
    algorithm: Algorithm,
    config: &SimConfig,
) -> Result<SimReport, SimError> {
    match algorithm {
        Algorithm::Fcfs => run_policy(processes, FcfsScheduler::new(), algorithm),
        Algorithm::Sjf => run_policy(processes, SjfScheduler::new(), algorithm),
        Algorithm::RoundRobin { quantum } => run_policy(
            processes,
            RoundRobinScheduler::new(quantum, config.admission)?,
            algorithm,
        ),
        Algorithm::Priority => run_policy(processes, PriorityScheduler::new(), algorithm),
    }
}

/// Runs every policy, each on its own copy of the same processes.
pub fn compare(
    processes: &[Process],
    quantum: Ticks,
    config: &SimConfig,
) -> Result<Vec<SimReport>, SimError> {
    Algorithm::all(quantum)
        .into_iter()
        .map(|algorithm| simulate(processes, algorithm, config))
        .collect()
}

fn run_policy<S: Scheduler>(
    processes: &[Process],
    scheduler: S,
    algorithm: Algorithm,
) -> Result<SimReport, SimError> {
    let mut sim = Sim::new(processes, scheduler)?;
    sim.run()?;

    let report = SimReport::new(algorithm, sim.ctx());
    info!(
        "{algorithm}: {} intervals, makespan {}, avg waiting {:.2}, avg turnaround {:.2}",
        report.timeline.len(),
        report.summary.makespan,
        report.summary.avg_waiting,
        report.summary.avg_turnaround
    );
    Ok(report)
}
