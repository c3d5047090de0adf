//! Statistical Process Control (SPC) charts.
//!
//! # Attributes Charts
//!
//! - [`PChart`] — Proportion nonconforming per fixed-size subgroup
//!
//! A finished chart yields [`ControlLimits`] and a [`ProcessVerdict`].
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

mod attributes;
mod chart;

pub use attributes::{proportion, AttributeChartPoint, PChart};
pub use chart::{ControlLimits, ProcessVerdict};
