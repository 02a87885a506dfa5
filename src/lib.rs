//! Worker-pool sizing simulation for the U-Engine ecosystem.
//!
//! Replays historical build/test job traces against a hypothetical pool
//! of machines to show how pool size and build-to-build overhead (reboot,
//! provisioning) would have changed job wait times.
//!
//! # Modules
//!
//! - **`models`**: Trace types — `JobRequest`, `BuildRecord`, `Seconds`
//! - **`simulation`**: Discrete-event engine — `EventQueue`, `MachinePool`,
//!   `SimulationEngine`
//! - **`trace`**: Line-delimited JSON ingestion, extraction, sorting,
//!   synthetic traces
//! - **`report`**: Wait histograms, KPIs, build-to-build estimation
//! - **`sweep`**: One simulation per pool size
//! - **`validation`**: Input integrity checks (negative times, empty pool)
//!
//! # Pipeline
//!
//! Data flows one way: build records → `(request, duration)` pairs →
//! simulation → wait-time report. The engine depends on neither
//! neighbour and can be driven by any producer of job requests.
//!
//! # References
//!
//! - Law (2015), "Simulation Modeling and Analysis"
//! - Harchol-Balter (2013), "Performance Modeling and Design of Computer Systems"

pub mod cli;
pub mod models;
pub mod report;
pub mod simulation;
pub mod sweep;
pub mod trace;
pub mod validation;
