//! Simulation configuration.
//!
//! Every field has a default, so a JSON file only needs to name what it
//! changes:
//!
//! ```json
//! { "batch_count": 3, "samples_per_batch": 5, "seed": 42 }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{InspectionError, SimulationError};
use crate::gauge::GaugeSpec;
use crate::source::DEFAULT_SPREAD;

/// Largest tray a session will generate up front.
pub const MAX_TRAY_SPHERES: usize = 10_000_000;

/// Parameters of one simulated inspection session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Nominal sphere diameter in millimetres.
    pub nominal: f64,
    /// Gauge tolerance (half-width of the Go band).
    pub tolerance: f64,
    pub batch_count: usize,
    pub samples_per_batch: usize,
    /// Center of the generated diameters; `None` means `nominal`.
    pub target: Option<f64>,
    /// Half-width of the generated diameters.
    pub spread: f64,
    /// Random seed; `None` draws one from the operating system.
    pub seed: Option<u64>,
    /// Decimal places generated diameters are rounded to.
    pub decimals: Option<u32>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            nominal: 50.0,
            tolerance: 0.5,
            batch_count: 5,
            samples_per_batch: 5,
            target: None,
            spread: DEFAULT_SPREAD,
            seed: None,
            decimals: Some(2),
        }
    }
}

impl SimulationConfig {
    /// Parse a JSON document, filling omitted fields with defaults.
    pub fn from_json_str(text: &str) -> Result<Self, SimulationError> {
        serde_json::from_str(text).map_err(|e| SimulationError::Config(e.to_string()))
    }

    /// Read and parse a JSON configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| SimulationError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    /// The gauge described by `nominal` and `tolerance`.
    pub fn gauge(&self) -> Result<GaugeSpec, InspectionError> {
        GaugeSpec::new(self.nominal, self.tolerance)
    }

    /// Center of the generated diameters.
    pub fn target(&self) -> f64 {
        self.target.unwrap_or(self.nominal)
    }

    /// Total number of spheres a run consumes, saturating at `usize::MAX`.
    pub fn total_samples(&self) -> usize {
        self.batch_count.saturating_mul(self.samples_per_batch)
    }

    /// Check every field without building anything.
    ///
    /// The tray is generated eagerly, so the part count is capped at
    /// [`MAX_TRAY_SPHERES`].
    pub fn validate(&self) -> Result<(), InspectionError> {
        self.gauge()?;
        if self.batch_count == 0 {
            return Err(InspectionError::InvalidConfig(
                "batch count must be > 0".into(),
            ));
        }
        if self.samples_per_batch == 0 {
            return Err(InspectionError::InvalidConfig(
                "samples per batch must be > 0".into(),
            ));
        }
        match self.batch_count.checked_mul(self.samples_per_batch) {
            Some(total) if total <= MAX_TRAY_SPHERES => {}
            _ => {
                return Err(InspectionError::InvalidConfig(format!(
                    "{} batches of {} spheres exceed the {MAX_TRAY_SPHERES}-sphere tray",
                    self.batch_count, self.samples_per_batch
                )))
            }
        }
        if !self.target().is_finite() {
            return Err(InspectionError::InvalidConfig(
                "target diameter must be finite".into(),
            ));
        }
        if !self.spread.is_finite() || self.spread < 0.0 {
            return Err(InspectionError::InvalidConfig(format!(
                "spread must be a finite value >= 0, got {}",
                self.spread
            )));
        }
        Ok(())
    }
}
