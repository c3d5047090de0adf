//! A simulated snap-gauge session.
//!
//! Owns the configuration, a tray of candidate spheres, and the inspection
//! run. A presenter (GUI, CLI, test) holds the session and maps every
//! operator action to exactly one [`Simulation::place`] call.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::config::SimulationConfig;
use crate::error::{InspectionError, SimulationError};
use crate::inspection::{InspectionResult, Run, RunSummary};
use crate::source::{MeasurementSource, SpherePool, UniformSource};

/// One operator session: a sphere tray feeding a single inspection run.
///
/// # Examples
///
/// ```
/// use snap_gauge::{Simulation, SimulationConfig};
///
/// let config = SimulationConfig {
///     batch_count: 3,
///     samples_per_batch: 5,
///     seed: Some(7),
///     ..SimulationConfig::default()
/// };
/// let mut sim = Simulation::new(config).unwrap();
/// assert_eq!(sim.pool().len(), 15);
///
/// let summary = sim.run_to_completion().unwrap();
/// assert_eq!(summary.batches.len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct Simulation {
    config: SimulationConfig,
    seed: Option<u64>,
    pool: SpherePool,
    run: Run,
}

impl Simulation {
    /// Build a session whose tray is filled from a seeded uniform source.
    ///
    /// Without a configured seed one is drawn from the OS; [`seed`](Self::seed)
    /// reports it so the session can be replayed.
    pub fn new(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut source = UniformSource::new(
            config.target(),
            config.spread,
            ChaCha8Rng::seed_from_u64(seed),
        )?
        .with_decimals(config.decimals);

        let mut sim = Self::with_source(config, &mut source)?;
        sim.seed = Some(seed);
        Ok(sim)
    }

    /// Build a session whose tray is filled from `source`.
    pub fn with_source<S: MeasurementSource>(
        config: SimulationConfig,
        source: &mut S,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        let run = Run::new(config.gauge()?, config.batch_count, config.samples_per_batch)?;
        let pool = SpherePool::fill(source, config.total_samples());
        info!(
            spheres = pool.len(),
            lcl = run.gauge().lcl(),
            ucl = run.gauge().ucl(),
            "sphere tray filled"
        );
        Ok(Self {
            seed: None,
            config,
            pool,
            run,
        })
    }

    /// Gauge the sphere at tray position `index`.
    ///
    /// # Errors
    ///
    /// - [`SimulationError::Inspection`] with `InvalidState` once the run is
    ///   complete; the tray is left untouched.
    /// - [`SimulationError::NoSuchSphere`] if `index` is off the tray.
    pub fn place(&mut self, index: usize) -> Result<InspectionResult, SimulationError> {
        if self.run.is_complete() {
            return Err(InspectionError::InvalidState.into());
        }
        let diameter = self
            .pool
            .take(index)
            .ok_or(SimulationError::NoSuchSphere(index))?;
        Ok(self.run.inspect(diameter)?)
    }

    /// Place spheres front to back until the run completes.
    pub fn run_to_completion(&mut self) -> Result<&RunSummary, SimulationError> {
        while !self.run.is_complete() {
            self.place(0)?;
        }
        Ok(self.run.summary()?)
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Seed the tray was generated from; `None` for an external source.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn pool(&self) -> &SpherePool {
        &self.pool
    }

    pub fn run(&self) -> &Run {
        &self.run
    }

    pub fn into_run(self) -> Run {
        self.run
    }
}
