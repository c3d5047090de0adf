//! Snap gauge specification and Go/No-Go classification.
//!
//! A snap gauge has two fixed jaws set at `nominal - tolerance` and
//! `nominal + tolerance`. A part whose diameter falls inside the band,
//! including either jaw exactly, passes (Go); everything else is rejected
//! (No-Go).

use serde::{Deserialize, Serialize};

use crate::error::{InspectionError, Result};

/// Nominal diameter and symmetric tolerance of a snap gauge.
///
/// # Invariants
///
/// - `tolerance > 0`
/// - `nominal` and `tolerance` are finite
///
/// # Examples
///
/// ```
/// use snap_gauge::GaugeSpec;
///
/// let gauge = GaugeSpec::new(50.0, 0.5).unwrap();
/// assert_eq!(gauge.lcl(), 49.5);
/// assert_eq!(gauge.ucl(), 50.5);
///
/// assert!(GaugeSpec::new(50.0, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeSpec {
    nominal: f64,
    tolerance: f64,
}

impl GaugeSpec {
    /// Creates a gauge, validating the tolerance band.
    ///
    /// # Errors
    ///
    /// [`InspectionError::InvalidConfig`] if either value is non-finite or
    /// `tolerance <= 0`.
    pub fn new(nominal: f64, tolerance: f64) -> Result<Self> {
        if !nominal.is_finite() {
            return Err(InspectionError::InvalidConfig(format!(
                "nominal diameter must be finite, got {nominal}"
            )));
        }
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(InspectionError::InvalidConfig(format!(
                "tolerance must be a finite value > 0, got {tolerance}"
            )));
        }
        Ok(Self { nominal, tolerance })
    }

    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// Lower gauge limit (the "go" jaw's lower bound).
    pub fn lcl(&self) -> f64 {
        self.nominal - self.tolerance
    }

    /// Upper gauge limit.
    pub fn ucl(&self) -> f64 {
        self.nominal + self.tolerance
    }

    /// Classifies `diameter` against this gauge. See [`classify`].
    pub fn classify(&self, diameter: f64) -> Verdict {
        classify(diameter, self)
    }
}

/// Outcome of gauging a single part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// Diameter inside the inclusive gauge band.
    Go,
    /// Diameter outside the band (or not a number).
    NoGo,
}

impl Verdict {
    pub fn is_defective(self) -> bool {
        matches!(self, Verdict::NoGo)
    }

    /// Label used in the exported result table.
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Go => "Go",
            Verdict::NoGo => "NoGo",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns [`Verdict::Go`] iff `gauge.lcl() <= diameter <= gauge.ucl()`.
///
/// Both limits are inclusive. NaN fails every comparison and is therefore
/// No-Go.
///
/// # Examples
///
/// ```
/// use snap_gauge::{classify, GaugeSpec, Verdict};
///
/// let gauge = GaugeSpec::new(50.0, 0.5).unwrap();
/// assert_eq!(classify(50.5, &gauge), Verdict::Go);
/// assert_eq!(classify(49.4, &gauge), Verdict::NoGo);
/// ```
pub fn classify(diameter: f64, gauge: &GaugeSpec) -> Verdict {
    if gauge.lcl() <= diameter && diameter <= gauge.ucl() {
        Verdict::Go
    } else {
        Verdict::NoGo
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gauge() -> GaugeSpec {
        GaugeSpec::new(50.0, 0.5).expect("valid gauge")
    }

    #[test]
    fn test_gauge_limits() {
        let g = gauge();
        assert!((g.lcl() - 49.5).abs() < f64::EPSILON);
        assert!((g.ucl() - 50.5).abs() < f64::EPSILON);
        assert!((g.nominal() - 50.0).abs() < f64::EPSILON);
        assert!((g.tolerance() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gauge_rejects_invalid() {
        assert!(GaugeSpec::new(50.0, 0.0).is_err());
        assert!(GaugeSpec::new(50.0, -0.5).is_err());
        assert!(GaugeSpec::new(50.0, f64::NAN).is_err());
        assert!(GaugeSpec::new(f64::INFINITY, 0.5).is_err());
        assert!(matches!(
            GaugeSpec::new(50.0, 0.0),
            Err(InspectionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_classify_boundaries_inclusive() {
        let g = gauge();
        assert_eq!(classify(49.5, &g), Verdict::Go);
        assert_eq!(classify(50.5, &g), Verdict::Go);
        assert_eq!(classify(50.0, &g), Verdict::Go);
        assert_eq!(classify(49.5 - 1e-9, &g), Verdict::NoGo);
        assert_eq!(classify(50.5 + 1e-9, &g), Verdict::NoGo);
    }

    #[test]
    fn test_classify_scenario_batch() {
        let g = gauge();
        let verdicts: Vec<Verdict> = [50.5, 49.5, 50.6, 49.4, 50.0]
            .iter()
            .map(|&d| g.classify(d))
            .collect();
        assert_eq!(
            verdicts,
            vec![Verdict::Go, Verdict::Go, Verdict::NoGo, Verdict::NoGo, Verdict::Go]
        );
    }

    #[test]
    fn test_classify_non_finite_is_no_go() {
        let g = gauge();
        assert_eq!(classify(f64::NAN, &g), Verdict::NoGo);
        assert_eq!(classify(f64::INFINITY, &g), Verdict::NoGo);
        assert_eq!(classify(f64::NEG_INFINITY, &g), Verdict::NoGo);
    }

    #[test]
    fn test_verdict_labels() {
        assert_eq!(Verdict::Go.to_string(), "Go");
        assert_eq!(Verdict::NoGo.to_string(), "NoGo");
        assert!(Verdict::NoGo.is_defective());
        assert!(!Verdict::Go.is_defective());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn classify_matches_band(
            nominal in 1.0_f64..1000.0,
            tolerance in 0.001_f64..10.0,
            d in 0.0_f64..1100.0,
        ) {
            let g = GaugeSpec::new(nominal, tolerance).expect("valid gauge");
            let expected = if g.lcl() <= d && d <= g.ucl() { Verdict::Go } else { Verdict::NoGo };
            prop_assert_eq!(classify(d, &g), expected);
        }

        #[test]
        fn limits_always_go(
            nominal in 1.0_f64..1000.0,
            tolerance in 0.001_f64..10.0,
        ) {
            let g = GaugeSpec::new(nominal, tolerance).expect("valid gauge");
            prop_assert_eq!(classify(g.lcl(), &g), Verdict::Go);
            prop_assert_eq!(classify(g.ucl(), &g), Verdict::Go);
        }
    }
}
