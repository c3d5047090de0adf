//! P-chart summary of a completed inspection run.
//!
//! # Algorithm
//!
//! For sealed batches 1..k with `inspected_i` parts and `defective_i` No-Go
//! results, and design batch size `n`:
//!
//! ```text
//! proportion_i = defective_i / inspected_i          (0 if inspected_i = 0)
//! avg_p        = sum(defective_i) / sum(inspected_i)
//! std_err      = sqrt(avg_p * (1 - avg_p) / n)
//! UCL          = avg_p + 3 * std_err
//! LCL          = max(0, avg_p - 3 * std_err)
//! ```
//!
//! The process is out of control when any `proportion_i` lies strictly
//! outside `[LCL, UCL]`; otherwise `avg_p` of exactly 0 or 1 means there is
//! no variation to judge; otherwise it is in control.

use serde::Serialize;

use super::batch::Batch;
use crate::spc::{AttributeChartPoint, ControlLimits, PChart, ProcessVerdict};

/// Per-batch statistics, numbered from 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchStats {
    /// One-based batch number.
    pub index: usize,
    pub inspected: usize,
    pub defective: usize,
    /// `defective / inspected`.
    pub proportion: f64,
    /// Whether this batch's proportion lies beyond the control limits.
    pub out_of_control: bool,
}

/// Read-only P-chart summary of a completed run.
///
/// # Examples
///
/// ```
/// use snap_gauge::{GaugeSpec, ProcessVerdict, Run};
///
/// let gauge = GaugeSpec::new(50.0, 0.5).unwrap();
/// let mut run = Run::new(gauge, 2, 2).unwrap();
/// for d in [50.0, 50.1, 49.9, 50.2] {
///     run.inspect(d).unwrap();
/// }
/// let summary = run.summary().unwrap();
/// assert_eq!(summary.avg_p, 0.0);
/// assert_eq!(summary.verdict, ProcessVerdict::NoVariation);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    /// Statistics for every sealed batch, in inspection order.
    pub batches: Vec<BatchStats>,
    /// Pooled defective fraction across the whole run.
    pub avg_p: f64,
    /// Binomial standard error using the configured batch size.
    pub std_err: f64,
    /// Statistical control limits (center line = `avg_p`).
    pub limits: ControlLimits,
    pub verdict: ProcessVerdict,
    /// Largest defective count of any batch.
    pub max_defective: usize,
    /// One-based numbers of every batch reaching `max_defective`, ascending.
    pub most_defective: Vec<usize>,
    /// Chart points for plotting, one per batch.
    pub points: Vec<AttributeChartPoint>,
}

impl RunSummary {
    /// Summarize `batches` against the design batch size `samples_per_batch`.
    ///
    /// An empty slice yields a zeroed summary with verdict
    /// [`ProcessVerdict::NoVariation`].
    pub fn from_batches(batches: &[Batch], samples_per_batch: usize) -> Self {
        let mut chart = PChart::new(samples_per_batch.max(1) as u64);
        for batch in batches {
            chart.add_sample(batch.defective() as u64, batch.len() as u64);
        }

        let limits = chart.control_limits().unwrap_or(ControlLimits {
            ucl: 0.0,
            cl: 0.0,
            lcl: 0.0,
        });
        let points = chart.points().to_vec();

        let stats: Vec<BatchStats> = batches
            .iter()
            .zip(points.iter())
            .map(|(batch, point)| BatchStats {
                index: point.index + 1,
                inspected: batch.len(),
                defective: batch.defective(),
                proportion: point.value,
                out_of_control: point.out_of_control,
            })
            .collect();

        let max_defective = stats.iter().map(|s| s.defective).max().unwrap_or(0);
        let most_defective = stats
            .iter()
            .filter(|s| s.defective == max_defective)
            .map(|s| s.index)
            .collect();

        Self {
            batches: stats,
            avg_p: limits.cl,
            std_err: chart.std_err().unwrap_or(0.0),
            limits,
            verdict: chart.verdict().unwrap_or(ProcessVerdict::NoVariation),
            max_defective,
            most_defective,
            points,
        }
    }

    /// Upper statistical control limit.
    pub fn ucl(&self) -> f64 {
        self.limits.ucl
    }

    /// Lower statistical control limit (never negative).
    pub fn lcl(&self) -> f64 {
        self.limits.lcl
    }

    pub fn total_inspected(&self) -> usize {
        self.batches.iter().map(|b| b.inspected).sum()
    }

    pub fn total_defective(&self) -> usize {
        self.batches.iter().map(|b| b.defective).sum()
    }

    /// Batches whose proportion lies beyond the control limits.
    pub fn out_of_control_batches(&self) -> impl Iterator<Item = &BatchStats> {
        self.batches.iter().filter(|b| b.out_of_control)
    }
}
