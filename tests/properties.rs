//! Property tests over randomly generated process batches.
//!
//! Run with: `cargo test --test properties`

use proptest::prelude::*;
use rustc_hash::FxHashMap;
use schedsim::{
    Admission, Algorithm, Interval, Process, ProcessId, SimConfig, SimReport, Ticks, simulate,
};

const STRICT: SimConfig = SimConfig {
    admission: Admission::OnArrival,
    default_quantum: 3,
};

fn processes_strategy() -> impl Strategy<Value = Vec<Process>> {
    proptest::collection::vec((0u64..20, 1u64..10, -3i64..5), 0..12).prop_map(|raw| {
        raw.into_iter()
            .enumerate()
            .map(|(i, (arrival, burst, priority))| {
                Process::new(i as ProcessId + 1, arrival, burst, priority)
            })
            .collect()
    })
}

fn by_id(processes: &[Process]) -> FxHashMap<ProcessId, Process> {
    processes.iter().map(|p| (p.id, *p)).collect()
}

fn executed(timeline: &[Interval]) -> FxHashMap<ProcessId, Ticks> {
    let mut total = FxHashMap::default();
    for i in timeline {
        *total.entry(i.pid).or_insert(0) += i.len();
    }
    total
}

fn check_basic(report: &SimReport, processes: &[Process], check_arrival: bool) -> Result<(), TestCaseError> {
    let procs = by_id(processes);
    let mut prev_end = 0;
    for i in &report.timeline {
        let p = procs[&i.pid];
        prop_assert!(i.start < i.end);
        prop_assert!(i.len() <= p.burst);
        prop_assert!(i.start >= prev_end, "overlap at {}", i);
        if check_arrival {
            prop_assert!(i.start >= p.arrival, "{} before arrival {}", i, p.arrival);
        }
        prev_end = i.end;
    }

    let totals = executed(&report.timeline);
    prop_assert_eq!(totals.len(), processes.len());
    for p in processes {
        prop_assert_eq!(totals[&p.id], p.burst);
    }

    for o in &report.outcomes {
        let p = o.process;
        prop_assert_eq!(o.turnaround, o.completion as i64 - p.arrival as i64);
        prop_assert_eq!(o.waiting, o.turnaround - p.burst as i64);
        if check_arrival {
            prop_assert!(o.waiting >= 0);
        }
    }
    Ok(())
}

/// With strict admission the CPU only idles while nothing unfinished has arrived.
fn check_work_conserving(report: &SimReport, processes: &[Process]) -> Result<(), TestCaseError> {
    let completion: FxHashMap<ProcessId, Ticks> = report
        .outcomes
        .iter()
        .map(|o| (o.process.id, o.completion))
        .collect();

    let mut prev_end = 0;
    for i in &report.timeline {
        if i.start > prev_end {
            let waiting_somebody = processes
                .iter()
                .any(|p| p.arrival <= prev_end && completion[&p.id] > prev_end);
            prop_assert!(!waiting_somebody, "idle from {} to {} with work ready", prev_end, i.start);
        }
        prev_end = i.end;
    }
    Ok(())
}

fn check_greedy<K: Ord>(
    report: &SimReport,
    processes: &[Process],
    key: impl Fn(&Process) -> K,
) -> Result<(), TestCaseError> {
    let procs = by_id(processes);
    prop_assert_eq!(report.timeline.len(), processes.len());

    let mut started = Vec::new();
    for i in &report.timeline {
        let chosen = procs[&i.pid];
        prop_assert_eq!(i.len(), chosen.burst);
        for other in processes {
            if other.id == chosen.id || started.contains(&other.id) || other.arrival > i.start {
                continue;
            }
            prop_assert!(
                (key(&chosen), chosen.id) < (key(other), other.id),
                "{} chosen at {} over {}",
                chosen.id,
                i.start,
                other.id
            );
        }
        started.push(chosen.id);
    }
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_fcfs_order_and_gaps(processes in processes_strategy()) {
        let report = simulate(&processes, Algorithm::Fcfs, &STRICT).unwrap();
        check_basic(&report, &processes, true)?;
        check_work_conserving(&report, &processes)?;

        let mut sorted = processes.clone();
        sorted.sort_by_key(|p| (p.arrival, p.id));
        prop_assert_eq!(report.timeline.len(), sorted.len());

        let mut now = 0;
        for (i, p) in report.timeline.iter().zip(&sorted) {
            prop_assert_eq!(i.pid, p.id);
            prop_assert_eq!(i.start, now.max(p.arrival));
            now = i.end;
        }
    }

    #[test]
    fn prop_sjf_runs_shortest_eligible(processes in processes_strategy()) {
        let report = simulate(&processes, Algorithm::Sjf, &STRICT).unwrap();
        check_basic(&report, &processes, true)?;
        check_work_conserving(&report, &processes)?;
        check_greedy(&report, &processes, |p| p.burst)?;
    }

    #[test]
    fn prop_priority_runs_most_urgent_eligible(processes in processes_strategy()) {
        let report = simulate(&processes, Algorithm::Priority, &STRICT).unwrap();
        check_basic(&report, &processes, true)?;
        check_work_conserving(&report, &processes)?;
        check_greedy(&report, &processes, |p| p.priority)?;
    }

    #[test]
    fn prop_round_robin_slices_bounded(
        processes in processes_strategy(),
        quantum in 1u64..6,
        strict in any::<bool>(),
    ) {
        let config = if strict { STRICT } else { SimConfig::default() };
        let report = simulate(&processes, Algorithm::RoundRobin { quantum }, &config).unwrap();
        check_basic(&report, &processes, strict)?;
        if strict {
            check_work_conserving(&report, &processes)?;
        }

        let procs = by_id(&processes);
        let mut remaining: FxHashMap<ProcessId, Ticks> =
            procs.values().map(|p| (p.id, p.burst)).collect();
        for i in &report.timeline {
            let left = remaining[&i.pid];
            if left > quantum {
                prop_assert_eq!(i.len(), quantum);
            } else {
                prop_assert_eq!(i.len(), left);
            }
            *remaining.get_mut(&i.pid).unwrap() -= i.len();
        }
    }

    #[test]
    fn prop_runs_are_repeatable(processes in processes_strategy(), quantum in 1u64..6) {
        for algorithm in Algorithm::all(quantum) {
            let first = simulate(&processes, algorithm, &SimConfig::default()).unwrap();
            let second = simulate(&processes, algorithm, &SimConfig::default()).unwrap();
            prop_assert_eq!(&first.timeline, &second.timeline);
            prop_assert_eq!(&first.outcomes, &second.outcomes);
        }
    }
}
