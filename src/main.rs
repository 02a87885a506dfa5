use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use serde_json::{json, Value};
use tracing::error;
use tracing_subscriber::EnvFilter;
use u_poolsim::cli::{Cli, Command, GenerateArgs, OutputFormat, SimulateArgs, SortArgs, SweepArgs};
use u_poolsim::models::{BuildRecord, JobRequest};
use u_poolsim::report::{b2b, WaitHistogram, WaitKpi};
use u_poolsim::simulation::{SimulationConfig, SimulationEngine};
use u_poolsim::sweep::{smallest_meeting, sweep};
use u_poolsim::trace::{self, SyntheticTrace};
use u_poolsim::validation::{self, ValidationResult};

/// Initialize tracing subscriber; RUST_LOG overrides -v
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn open_input(filename: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match filename {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("cannot open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

/// Log every validation error and abort if there were any
fn ensure_valid(result: ValidationResult, what: &str) -> Result<()> {
    if let Err(errors) = result {
        for e in &errors {
            error!("invalid {what}: {e}");
        }
        bail!("{} invalid {what}", errors.len());
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}

fn read_jobs(filename: Option<&Path>) -> Result<Vec<JobRequest>> {
    let jobs: Vec<JobRequest> =
        trace::read_records(open_input(filename)?).context("failed to read job events")?;
    ensure_valid(validation::validate_jobs(&jobs), "job event")?;
    Ok(jobs)
}

fn read_build_records(filename: Option<&Path>) -> Result<Vec<BuildRecord>> {
    let records: Vec<BuildRecord> =
        trace::read_records(open_input(filename)?).context("failed to read build records")?;
    ensure_valid(validation::validate_records(&records), "build record")?;
    Ok(records)
}

fn run_simulate(args: &SimulateArgs, format: OutputFormat) -> Result<()> {
    let config = SimulationConfig::new(args.size, args.b2b);
    ensure_valid(validation::validate_config(&config), "configuration")?;
    let jobs = read_jobs(args.input.filename.as_deref())?;

    let outcome = SimulationEngine::simulate(config, &jobs).context("simulation failed")?;
    let histogram = WaitHistogram::from_waits(&outcome.wait_times);

    match format {
        OutputFormat::Text => println!("{histogram}"),
        OutputFormat::Json => print_json(&json!({
            "config": config,
            "histogram": histogram,
            "kpi": WaitKpi::calculate(&outcome, config.pool_size),
        }))?,
    }
    Ok(())
}

fn run_waits(filename: Option<&Path>, format: OutputFormat) -> Result<()> {
    let records = read_build_records(filename)?;
    let waits: Vec<_> = records.iter().map(BuildRecord::observed_wait).collect();
    let histogram = WaitHistogram::from_waits(&waits);

    match format {
        OutputFormat::Text => println!("{histogram}"),
        OutputFormat::Json => print_json(&histogram)?,
    }
    Ok(())
}

fn run_extract(filename: Option<&Path>) -> Result<()> {
    let records = read_build_records(filename)?;
    trace::write_records(io::stdout().lock(), &trace::extract_jobs(&records))?;
    Ok(())
}

fn run_sort(args: &SortArgs) -> Result<()> {
    let records: Vec<Value> = trace::read_records(open_input(args.input.filename.as_deref())?)
        .context("failed to read records")?;
    let sorted = trace::sort_records(records, args.key.into())?;
    trace::write_records(io::stdout().lock(), &sorted)?;
    Ok(())
}

fn run_b2b(filename: Option<&Path>, format: OutputFormat) -> Result<()> {
    let records = read_build_records(filename)?;
    let Some(summary) = b2b::estimate(&records) else {
        bail!("no build-to-build samples in {} records", records.len());
    };

    match format {
        OutputFormat::Text => println!("{summary}"),
        OutputFormat::Json => print_json(&summary)?,
    }
    Ok(())
}

fn run_sweep(args: &SweepArgs, format: OutputFormat) -> Result<()> {
    if args.min == 0 || args.min > args.max {
        bail!("pool size range {}..={} is empty or starts at 0", args.min, args.max);
    }
    let jobs = read_jobs(args.input.filename.as_deref())?;
    let points = sweep(&jobs, args.min..=args.max, args.b2b).context("sweep failed")?;
    let recommended = args
        .max_p90
        .and_then(|budget| smallest_meeting(&points, budget))
        .map(|p| p.pool_size);

    match format {
        OutputFormat::Text => {
            let mut out = io::stdout().lock();
            writeln!(
                out,
                "{:>6} {:>8} {:>8} {:>8} {:>10} {:>6} {:>6}",
                "pool", "p50", "p90", "p99", "wait(h)", "util", "60+"
            )?;
            for p in &points {
                writeln!(
                    out,
                    "{:>6} {:>8} {:>8} {:>8} {:>10.1} {:>5.1}% {:>6}",
                    p.pool_size,
                    p.kpi.p50_wait,
                    p.kpi.p90_wait,
                    p.kpi.p99_wait,
                    p.kpi.total_wait_hours,
                    p.kpi.avg_utilization * 100.0,
                    p.histogram.over_hour()
                )?;
            }
            if let Some(budget) = args.max_p90 {
                match recommended {
                    Some(size) => writeln!(out, "Smallest pool with p90 <= {budget}s: {size}")?,
                    None => writeln!(out, "No pool size in range has p90 <= {budget}s")?,
                }
            }
        }
        OutputFormat::Json => print_json(&json!({
            "points": points,
            "recommended_pool_size": recommended,
        }))?,
    }
    Ok(())
}

fn run_generate(args: &GenerateArgs) -> Result<()> {
    let jobs = SyntheticTrace::new(args.steps, args.seed)
        .with_step_seconds(args.step_seconds)
        .with_arrival_probability(args.p_arrival)
        .with_short_probability(args.p_short)
        .with_durations(args.short, args.long)
        .generate();
    ensure_valid(validation::validate_jobs(&jobs), "generated job")?;
    trace::write_records(io::stdout().lock(), &jobs)?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Command::Simulate(args) => run_simulate(args, cli.format),
        Command::Waits(input) => run_waits(input.filename.as_deref(), cli.format),
        Command::Extract(input) => run_extract(input.filename.as_deref()),
        Command::Sort(args) => run_sort(args),
        Command::B2b(input) => run_b2b(input.filename.as_deref(), cli.format),
        Command::Sweep(args) => run_sweep(args, cli.format),
        Command::Generate(args) => run_generate(args),
    }
}
