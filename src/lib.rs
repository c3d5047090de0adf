//! # snap-gauge
//!
//! Go/No-Go snap gauge inspection with batch P-chart process control.
//!
//! Parts (spheres) are measured, classified against an inclusive tolerance
//! band, grouped into fixed-size batches, and once every batch is sealed the
//! run is summarized with a binomial P chart and an in-control verdict.
//!
//! ## Modules
//!
//! - [`gauge`] — Gauge limits and Go/No-Go classification
//! - [`source`] — Seedable measurement sources and the sphere tray
//! - [`inspection`] — The batch-inspection state machine and run summary
//! - [`spc`] — Fixed-sample-size P chart and control limits
//! - [`export`] — CSV and Excel result table, JSON summary export
//! - [`simulation`] — A complete operator session
//! - [`config`] — Session configuration with defaults
//! - [`logging`] — `tracing` subscriber setup
//!
//! ## Design Philosophy
//!
//! - **Caller-owned state**: every run is an explicit value; nothing global
//! - **Injected randomness**: sources take a generator or seed
//! - **Data, not faults**: an out-of-band part is a No-Go verdict, never an error

pub mod config;
pub mod error;
pub mod export;
pub mod gauge;
pub mod inspection;
pub mod logging;
pub mod simulation;
pub mod source;
pub mod spc;

pub use config::SimulationConfig;
pub use error::{ExportError, InspectionError, Result, SimulationError};
pub use export::ResultRow;
pub use gauge::{classify, GaugeSpec, Verdict};
pub use inspection::{Batch, BatchStats, InspectionResult, Run, RunSummary};
pub use simulation::Simulation;
pub use source::{MeasurementSource, ScriptedSource, SpherePool, UniformSource};
pub use spc::{ControlLimits, ProcessVerdict};
