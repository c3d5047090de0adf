//! Batch inspection: Go/No-Go results grouped into fixed-size batches,
//! summarized with a P chart once every batch is sealed.
//!
//! - [`Run`] — the `Collecting → Complete` state machine
//! - [`Batch`] / [`InspectionResult`] — the recorded data
//! - [`RunSummary`] / [`BatchStats`] — the cached P-chart summary

mod batch;
mod run;
mod summary;

pub use batch::{Batch, InspectionResult};
pub use run::Run;
pub use summary::{BatchStats, RunSummary};
