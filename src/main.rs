use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use env_logger::Env;
use log::{info, warn};
use schedsim::{
    Admission, Algorithm, SimConfig, SimError, SimReport, Ticks, Workload, compare, simulate,
    sim::{BernoulliParams, bernoulli_processes},
};
use std::{
    fs,
    io::{self, BufWriter, Read, Write},
    path::PathBuf,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Policy {
    Fcfs,
    Sjf,
    Rr,
    Priority,
}

impl Policy {
    fn selector(self) -> i64 {
        match self {
            Policy::Fcfs => Algorithm::SELECTOR_FCFS,
            Policy::Sjf => Algorithm::SELECTOR_SJF,
            Policy::Rr => Algorithm::SELECTOR_RR,
            Policy::Priority => Algorithm::SELECTOR_PRIORITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum AdmissionArg {
    /// Queue every process at time 0 (classic round-robin table)
    Eager,
    /// Queue a process only once it has arrived
    OnArrival,
}

impl From<AdmissionArg> for Admission {
    fn from(arg: AdmissionArg) -> Self {
        match arg {
            AdmissionArg::Eager => Admission::Eager,
            AdmissionArg::OnArrival => Admission::OnArrival,
        }
    }
}

/// Simulate classical single-CPU scheduling policies over a fixed batch of processes.
///
/// Reads `n`, then `n` lines of `arrival burst priority`, then the algorithm
/// choice (1 FCFS, 2 SJF, 3 Round Robin, 4 Priority) and, for Round Robin,
/// the time quantum. Prints one `id start end` line per execution interval.
#[derive(Parser, Debug)]
#[command(name = "schedsim", version)]
struct Args {
    /// Read the workload from this file instead of stdin
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Override the algorithm choice in the workload
    #[arg(short, long, value_enum)]
    algorithm: Option<Policy>,

    /// Round-robin time quantum, overriding the workload
    #[arg(short, long, allow_negative_numbers = true)]
    quantum: Option<i64>,

    /// When round robin admits processes into its queue
    #[arg(long, value_enum, default_value_t = AdmissionArg::Eager)]
    admission: AdmissionArg,

    /// Print per-process metrics and averages after the timeline
    #[arg(long)]
    metrics: bool,

    /// Print the full report as JSON
    #[arg(long, conflicts_with = "metrics")]
    json: bool,

    /// Run all four policies on the same workload and summarize them
    #[arg(long)]
    compare: bool,

    /// Generate a random workload spanning this many ticks instead of reading one
    #[arg(long, value_name = "TICKS", conflicts_with = "input")]
    random: Option<Ticks>,

    /// Seed for --random
    #[arg(long, default_value_t = 0, requires = "random")]
    seed: u64,

    /// Print the workload in input format instead of simulating it
    #[arg(long)]
    emit_input: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let config = SimConfig {
        admission: args.admission.into(),
        ..SimConfig::default()
    };

    let mut workload = load_workload(&args)?;
    if let Some(policy) = args.algorithm {
        workload.selector = policy.selector();
    }
    if let Some(quantum) = args.quantum {
        workload.quantum = Some(quantum);
    }
    if workload.selector == Algorithm::SELECTOR_RR && workload.quantum.is_none() {
        workload.quantum = Some(config.default_quantum as i64);
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    if args.emit_input {
        out.write_all(workload.to_input_string().as_bytes())?;
        return Ok(out.flush()?);
    }

    if args.compare {
        let quantum = match workload.quantum {
            Some(q) => Ticks::try_from(q)
                .ok()
                .filter(|&q| q > 0)
                .ok_or(SimError::InvalidQuantum(q))?,
            None => config.default_quantum,
        };
        let reports = compare(&workload.processes, quantum, &config)?;
        if args.json {
            serde_json::to_writer_pretty(&mut out, &reports)?;
            writeln!(out)?;
        } else {
            write_comparison(&mut out, &reports)?;
        }
        return Ok(out.flush()?);
    }

    let algorithm = match workload.algorithm() {
        Ok(algorithm) => algorithm,
        Err(SimError::UnknownAlgorithm(selector)) => {
            warn!("unknown algorithm selector {selector}, nothing to simulate");
            return Ok(());
        }
        Err(e) => return Err(e).context("selecting algorithm"),
    };

    info!(
        "simulating {algorithm} over {} processes",
        workload.processes.len()
    );
    let report = simulate(&workload.processes, algorithm, &config)?;

    if args.json {
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        report.write_timeline(&mut out)?;
        if args.metrics {
            writeln!(out)?;
            report.write_metrics(&mut out)?;
        }
    }
    Ok(out.flush()?)
}

fn load_workload(args: &Args) -> Result<Workload> {
    if let Some(ticks) = args.random {
        let params = BernoulliParams {
            ticks,
            seed: args.seed,
            ..BernoulliParams::default()
        };
        let processes = bernoulli_processes(&params);
        info!(
            "generated {} processes over {ticks} ticks (seed {})",
            processes.len(),
            args.seed
        );
        // Selector and quantum come from the command line
        return Ok(Workload {
            processes,
            selector: args.algorithm.unwrap_or(Policy::Fcfs).selector(),
            quantum: None,
        });
    }

    let text = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading workload from {}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("reading workload from stdin")?;
            buf
        }
    };
    Workload::parse(&text).context("parsing workload")
}

fn write_comparison<W: Write>(out: &mut W, reports: &[SimReport]) -> io::Result<()> {
    writeln!(
        out,
        "{:<22}{:>10}{:>16}{:>10}{:>13}",
        "Algorithm", "Avg wait", "Avg turnaround", "Makespan", "Utilization"
    )?;
    for report in reports {
        let summary = &report.summary;
        writeln!(
            out,
            "{:<22}{:>10.2}{:>16.2}{:>10}{:>12.1}%",
            report.algorithm.to_string(),
            summary.avg_waiting,
            summary.avg_turnaround,
            summary.makespan,
            summary.utilization * 100.0
        )?;
    }
    Ok(())
}
