//! Core control chart types.
//!
//! Defines the control limits shared by every chart point and the overall
//! process verdict derived from a finished chart.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use serde::Serialize;

/// Control limits for a chart.
///
/// Represents the upper control limit (UCL), center line (CL), and lower
/// control limit (LCL) computed from the process data.
///
/// # Invariants
///
/// - `lcl <= cl <= ucl`
/// - All values are finite
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ControlLimits {
    /// Upper control limit (UCL = CL + 3 sigma).
    pub ucl: f64,
    /// Center line (pooled proportion defective).
    pub cl: f64,
    /// Lower control limit (LCL = max(0, CL - 3 sigma)).
    pub lcl: f64,
}

impl ControlLimits {
    /// Whether `value` falls strictly outside the limits.
    ///
    /// A value sitting exactly on a limit is in control.
    pub fn is_beyond(&self, value: f64) -> bool {
        value > self.ucl || value < self.lcl
    }
}

/// Overall judgement of a finished chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ProcessVerdict {
    /// Every point lies within the control limits.
    InControl,
    /// At least one point lies beyond a control limit.
    OutOfControl,
    /// The center line is 0 or 1: every unit passed, or every unit failed.
    /// The binomial variance is zero and there is no dispersion to judge.
    NoVariation,
}

impl ProcessVerdict {
    /// Derive the verdict from per-point out-of-control flags and the
    /// center line.
    ///
    /// Beyond-limit points take precedence over the degenerate center line.
    pub fn judge(any_beyond_limits: bool, center_line: f64) -> Self {
        if any_beyond_limits {
            ProcessVerdict::OutOfControl
        } else if center_line == 0.0 || center_line == 1.0 {
            ProcessVerdict::NoVariation
        } else {
            ProcessVerdict::InControl
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProcessVerdict::InControl => "in control",
            ProcessVerdict::OutOfControl => "out of control",
            ProcessVerdict::NoVariation => "no variation",
        }
    }
}

impl std::fmt::Display for ProcessVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
