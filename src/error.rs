//! Error types.
//!
//! The inspection core has exactly three failure kinds. None of them are
//! transient: a failed call leaves the run untouched and retrying the same
//! call yields the same error.

use thiserror::Error;

/// Errors raised by the gauge, measurement sources and the inspection run.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InspectionError {
    /// Construction parameters are unusable (zero batch size, non-positive
    /// tolerance, negative spread, ...).
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A measurement was submitted after the run completed.
    #[error("run is already complete; no further inspections accepted")]
    InvalidState,

    /// The summary was requested before every batch was sealed.
    #[error("run is not complete; summary not available yet")]
    NotReady,
}

/// Convenience alias for core results.
pub type Result<T> = std::result::Result<T, InspectionError>;

/// Errors raised while writing the result table or summary.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("xlsx encoding failed: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

/// Errors raised by a [`Simulation`](crate::simulation::Simulation) session.
#[derive(Error, Debug)]
pub enum SimulationError {
    #[error(transparent)]
    Inspection(#[from] InspectionError),

    /// The operator picked a sphere index that is not on the tray.
    #[error("no sphere at tray position {0}")]
    NoSuchSphere(usize),

    #[error("configuration error: {0}")]
    Config(String),
}
