//! Measurement sources: where candidate sphere diameters come from.
//!
//! - [`UniformSource`] — uniform draws in `[target - spread, target + spread]`
//!   from an injected random generator
//! - [`ScriptedSource`] — replays externally supplied diameters in order
//! - [`SpherePool`] — the tray of candidate spheres an operator picks from
//!
//! Randomness is never ambient. Callers hand in a generator (or a seed), so
//! two sources built from the same seed yield the same sequence and
//! independent sources never interfere.

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::{InspectionError, Result};

/// Default half-width of the uniform diameter band, in millimetres.
pub const DEFAULT_SPREAD: f64 = 1.0;

/// Something that produces part diameters one at a time.
pub trait MeasurementSource {
    /// Produce the next candidate diameter.
    fn next_diameter(&mut self) -> f64;
}

// ---------------------------------------------------------------------------
// Uniform source
// ---------------------------------------------------------------------------

/// Uniformly distributed diameters around a target.
///
/// # Examples
///
/// ```
/// use snap_gauge::{MeasurementSource, UniformSource};
///
/// let mut a = UniformSource::seeded(50.0, 1.0, 42).unwrap();
/// let mut b = UniformSource::seeded(50.0, 1.0, 42).unwrap();
/// for _ in 0..10 {
///     let d = a.next_diameter();
///     assert_eq!(d, b.next_diameter());
///     assert!((49.0..=51.0).contains(&d));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct UniformSource<R> {
    target: f64,
    spread: f64,
    /// Round every draw to this many decimal places (gauge resolution).
    decimals: Option<u32>,
    rng: R,
}

impl<R: Rng> UniformSource<R> {
    /// Create a source drawing from `[target - spread, target + spread]`.
    ///
    /// # Errors
    ///
    /// [`InspectionError::InvalidConfig`] if `target` or `spread` is
    /// non-finite, or `spread < 0`.
    pub fn new(target: f64, spread: f64, rng: R) -> Result<Self> {
        if !target.is_finite() {
            return Err(InspectionError::InvalidConfig(format!(
                "target diameter must be finite, got {target}"
            )));
        }
        if !spread.is_finite() || spread < 0.0 {
            return Err(InspectionError::InvalidConfig(format!(
                "spread must be a finite value >= 0, got {spread}"
            )));
        }
        Ok(Self {
            target,
            spread,
            decimals: None,
            rng,
        })
    }

    /// Round draws to `decimals` places, e.g. `Some(2)` for 0.01 mm.
    pub fn with_decimals(mut self, decimals: Option<u32>) -> Self {
        self.decimals = decimals;
        self
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn spread(&self) -> f64 {
        self.spread
    }
}

impl UniformSource<ChaCha8Rng> {
    /// Source backed by a ChaCha8 generator seeded with `seed`.
    ///
    /// The same seed yields the same sequence on every platform.
    pub fn seeded(target: f64, spread: f64, seed: u64) -> Result<Self> {
        Self::new(target, spread, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> MeasurementSource for UniformSource<R> {
    fn next_diameter(&mut self) -> f64 {
        let lo = self.target - self.spread;
        let hi = self.target + self.spread;
        let d = self.rng.gen_range(lo..=hi);
        match self.decimals {
            Some(places) => snap_to_grid(d, lo, hi, places),
            None => d,
        }
    }
}

/// Round `value` to `places` decimals, staying on grid points inside
/// `[lo, hi]`. A band too narrow to hold any grid point leaves `value`
/// unrounded.
fn snap_to_grid(value: f64, lo: f64, hi: f64, places: u32) -> f64 {
    let scale = 10f64.powi(places as i32);
    let first = (lo * scale).ceil();
    let last = (hi * scale).floor();
    if first > last {
        return value;
    }
    (value * scale).round().clamp(first, last) / scale
}

// ---------------------------------------------------------------------------
// Scripted source
// ---------------------------------------------------------------------------

/// Replays a fixed list of diameters, then keeps returning `NaN`.
///
/// Used when measurements come from outside (an operator typing values,
/// a recorded file). `NaN` classifies as No-Go, so an exhausted script never
/// produces a spurious pass.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSource {
    queue: VecDeque<f64>,
}

impl ScriptedSource {
    pub fn new(diameters: impl IntoIterator<Item = f64>) -> Self {
        Self {
            queue: diameters.into_iter().collect(),
        }
    }

    /// Number of diameters not yet handed out.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }

    pub fn push(&mut self, diameter: f64) {
        self.queue.push_back(diameter);
    }
}

impl MeasurementSource for ScriptedSource {
    fn next_diameter(&mut self) -> f64 {
        self.queue.pop_front().unwrap_or(f64::NAN)
    }
}

// ---------------------------------------------------------------------------
// Sphere pool
// ---------------------------------------------------------------------------

/// A tray of candidate spheres waiting to be gauged.
///
/// The operator may pick spheres in any order; removing one keeps the
/// relative order of the rest.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpherePool {
    diameters: Vec<f64>,
}

impl SpherePool {
    /// Fill a tray with `count` spheres drawn from `source`.
    pub fn fill<S: MeasurementSource>(source: &mut S, count: usize) -> Self {
        let diameters = (0..count).map(|_| source.next_diameter()).collect();
        Self { diameters }
    }

    pub fn from_diameters(diameters: Vec<f64>) -> Self {
        Self { diameters }
    }

    /// Remove and return the sphere at `index`, or `None` if there is none.
    pub fn take(&mut self, index: usize) -> Option<f64> {
        if index < self.diameters.len() {
            Some(self.diameters.remove(index))
        } else {
            None
        }
    }

    pub fn diameters(&self) -> &[f64] {
        &self.diameters
    }

    pub fn len(&self) -> usize {
        self.diameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diameters.is_empty()
    }
}
