//! CLI argument parsing for poolsim

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::models::Seconds;
use crate::trace::SortKey;

/// Output format for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text (default)
    Text,
    /// JSON for machine parsing
    Json,
}

/// Timestamp field to sort raw records by
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SortField {
    /// Job start time
    #[value(name = "starttime")]
    StartTime,
    /// Job request time
    #[value(name = "requesttime")]
    RequestTime,
}

impl From<SortField> for SortKey {
    fn from(field: SortField) -> Self {
        match field {
            SortField::StartTime => SortKey::StartTime,
            SortField::RequestTime => SortKey::RequestTime,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "poolsim")]
#[command(version)]
#[command(about = "Simulate job wait times for a worker pool of a given size", long_about = None)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Report format
    #[arg(long = "format", value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Simulate wait times for (requesttime, duration) events on a pool
    Simulate(SimulateArgs),
    /// Report the wait times build records actually experienced
    Waits(InputArgs),
    /// Turn build records into (requesttime, duration) events
    Extract(InputArgs),
    /// Sort build records by a timestamp field
    Sort(SortArgs),
    /// Estimate build-to-build time from build records
    B2b(InputArgs),
    /// Simulate a range of pool sizes
    Sweep(SweepArgs),
    /// Generate a synthetic (requesttime, duration) trace
    Generate(GenerateArgs),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// File to process (default stdin)
    pub filename: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// How many machines to simulate
    #[arg(short = 'n', long = "size")]
    pub size: usize,

    /// Time between jobs on the same machine, in seconds
    #[arg(short = 'b', long = "b2b")]
    pub b2b: Seconds,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct SortArgs {
    /// Field to sort by
    #[arg(long = "key", value_enum, default_value = "starttime")]
    pub key: SortField,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Smallest pool size
    #[arg(long = "min", default_value = "1")]
    pub min: usize,

    /// Largest pool size
    #[arg(long = "max")]
    pub max: usize,

    /// Time between jobs on the same machine, in seconds
    #[arg(short = 'b', long = "b2b")]
    pub b2b: Seconds,

    /// Recommend the smallest pool whose 90th percentile wait is within this many seconds
    #[arg(long = "max-p90", value_name = "SECONDS")]
    pub max_p90: Option<Seconds>,

    #[command(flatten)]
    pub input: InputArgs,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Number of arrival steps
    #[arg(long = "steps", default_value = "1440")]
    pub steps: u64,

    /// Seconds between steps
    #[arg(long = "step-seconds", default_value = "60")]
    pub step_seconds: Seconds,

    /// Probability of a job arriving at each step
    #[arg(long = "p-arrival", default_value = "0.3", value_parser = parse_probability)]
    pub p_arrival: f64,

    /// Probability that a job is short
    #[arg(long = "p-short", default_value = "0.3", value_parser = parse_probability)]
    pub p_short: f64,

    /// Short job duration, in seconds
    #[arg(long = "short", default_value = "600")]
    pub short: Seconds,

    /// Long job duration, in seconds
    #[arg(long = "long", default_value = "3600")]
    pub long: Seconds,

    /// RNG seed
    #[arg(long = "seed", default_value = "0")]
    pub seed: u64,
}

/// Parses a finite probability in `[0, 1]`
fn parse_probability(s: &str) -> Result<f64, String> {
    let p: f64 = s.parse().map_err(|e| format!("{e}"))?;
    if p.is_finite() && (0.0..=1.0).contains(&p) {
        Ok(p)
    } else {
        Err(format!("{s} is not a probability between 0 and 1"))
    }
}
