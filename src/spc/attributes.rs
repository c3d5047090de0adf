//! Attributes control chart: the P chart for fixed-size subgroups.
//!
//! Monitors the fraction of nonconforming (No-Go) units per subgroup. Each
//! subgroup is a batch of gauged parts; the limits are derived from the
//! binomial distribution using the pooled proportion across all subgroups.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.,
//!   Chapter 7: Control Charts for Attributes.
//! - ASTM E2587 — Standard Practice for Use of Control Charts

use serde::Serialize;

use super::chart::{ControlLimits, ProcessVerdict};

/// A single data point on an attributes control chart.
///
/// Contains the computed statistic, its control limits, and an
/// out-of-control flag.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeChartPoint {
    /// The zero-based index of this point.
    pub index: usize,
    /// The subgroup proportion nonconforming.
    pub value: f64,
    /// Upper control limit for this point.
    pub ucl: f64,
    /// Center line for this point.
    pub cl: f64,
    /// Lower control limit for this point.
    pub lcl: f64,
    /// Whether this point is out of control (beyond UCL or below LCL).
    pub out_of_control: bool,
}

// ---------------------------------------------------------------------------
// P Chart
// ---------------------------------------------------------------------------

/// Proportion nonconforming (P) chart with a fixed design sample size.
///
/// The center line pools every subgroup, so a short subgroup weighs less
/// than a full one. The standard error, however, always uses the design
/// sample size `n`, which keeps the limits identical for every point.
///
/// # Formulas
///
/// - CL = p-bar = total_defectives / total_inspected
/// - sigma = sqrt(p-bar * (1 - p-bar) / n)
/// - UCL = p-bar + 3 * sigma
/// - LCL = max(0, p-bar - 3 * sigma)
///
/// # Examples
///
/// ```
/// use snap_gauge::spc::PChart;
///
/// let mut chart = PChart::new(5);
/// for d in [1, 0, 4] {
///     chart.add_sample(d, 5);
/// }
/// let p_bar = chart.p_bar().unwrap();
/// assert!((p_bar - 5.0 / 15.0).abs() < 1e-12);
/// assert!(chart.is_in_control());
/// ```
///
/// # Reference
///
/// Montgomery, D.C. (2019). *Introduction to Statistical Quality Control*, 8th ed.,
/// Chapter 7, Section 7.2.
#[derive(Debug, Clone)]
pub struct PChart {
    /// Design sample size used for the standard error.
    sample_size: u64,
    /// Stored samples as (defective_count, inspected_count) pairs.
    samples: Vec<(u64, u64)>,
    /// Computed chart points.
    chart_points: Vec<AttributeChartPoint>,
    /// Limits shared by every point.
    limits: Option<ControlLimits>,
    /// Binomial standard error of the proportion.
    std_err: Option<f64>,
}

impl PChart {
    /// Create a new P chart with design sample size `sample_size`.
    ///
    /// # Panics
    ///
    /// Panics if `sample_size == 0`.
    pub fn new(sample_size: u64) -> Self {
        assert!(sample_size > 0, "sample_size must be > 0");
        Self {
            sample_size,
            samples: Vec::new(),
            chart_points: Vec::new(),
            limits: None,
            std_err: None,
        }
    }

    /// Add a subgroup with its defective count and the number inspected.
    ///
    /// Ignores samples where `defectives > inspected`. An empty subgroup
    /// (`inspected == 0`) is kept and plotted at proportion 0.
    pub fn add_sample(&mut self, defectives: u64, inspected: u64) {
        if defectives > inspected {
            return;
        }
        self.samples.push((defectives, inspected));
        self.recompute();
    }

    pub fn sample_size(&self) -> u64 {
        self.sample_size
    }

    /// Get the pooled proportion defective (p-bar), or `None` if no data.
    pub fn p_bar(&self) -> Option<f64> {
        self.limits.map(|l| l.cl)
    }

    /// Get the standard error of the proportion, or `None` if no data.
    pub fn std_err(&self) -> Option<f64> {
        self.std_err
    }

    /// Get the control limits, or `None` if no data.
    pub fn control_limits(&self) -> Option<ControlLimits> {
        self.limits
    }

    /// Get all chart points.
    pub fn points(&self) -> &[AttributeChartPoint] {
        &self.chart_points
    }

    /// Check if every point lies within the control limits.
    pub fn is_in_control(&self) -> bool {
        self.chart_points.iter().all(|p| !p.out_of_control)
    }

    /// Overall process verdict, or `None` if no data.
    pub fn verdict(&self) -> Option<ProcessVerdict> {
        let p_bar = self.p_bar()?;
        Some(ProcessVerdict::judge(!self.is_in_control(), p_bar))
    }

    /// Recompute p-bar, control limits, and out-of-control flags.
    fn recompute(&mut self) {
        if self.samples.is_empty() {
            self.limits = None;
            self.std_err = None;
            self.chart_points.clear();
            return;
        }

        let total_defectives: u64 = self.samples.iter().map(|&(d, _)| d).sum();
        let total_inspected: u64 = self.samples.iter().map(|&(_, n)| n).sum();
        let p_bar = if total_inspected == 0 {
            0.0
        } else {
            total_defectives as f64 / total_inspected as f64
        };

        let n = self.sample_size as f64;
        let sigma = (p_bar * (1.0 - p_bar) / n).sqrt();
        let limits = ControlLimits {
            ucl: p_bar + 3.0 * sigma,
            cl: p_bar,
            lcl: (p_bar - 3.0 * sigma).max(0.0),
        };
        self.limits = Some(limits);
        self.std_err = Some(sigma);

        self.chart_points = self
            .samples
            .iter()
            .enumerate()
            .map(|(i, &(defectives, inspected))| {
                let p = proportion(defectives, inspected);
                AttributeChartPoint {
                    index: i,
                    value: p,
                    ucl: limits.ucl,
                    cl: limits.cl,
                    lcl: limits.lcl,
                    out_of_control: limits.is_beyond(p),
                }
            })
            .collect();
    }
}

/// Fraction `defectives / inspected`, defined as 0 for an empty subgroup.
pub fn proportion(defectives: u64, inspected: u64) -> f64 {
    if inspected == 0 {
        0.0
    } else {
        defectives as f64 / inspected as f64
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_p_chart_basic() {
        // Textbook example: 10 samples of size 100
        let mut chart = PChart::new(100);
        let defectives = [5, 8, 3, 6, 4, 7, 2, 9, 5, 6];
        for &d in &defectives {
            chart.add_sample(d, 100);
        }

        let p_bar = chart.p_bar().expect("should have p_bar");
        // p-bar = 55/1000 = 0.055
        assert!(
            (p_bar - 0.055).abs() < 1e-10,
            "p_bar={p_bar}, expected 0.055"
        );

        assert_eq!(chart.points().len(), 10);
        for pt in chart.points() {
            assert!((pt.cl - 0.055).abs() < 1e-10);
        }
    }

    #[test]
    fn test_p_chart_limits() {
        let mut chart = PChart::new(100);
        // p-bar = 0.10, n = 100
        // sigma = sqrt(0.1 * 0.9 / 100) = 0.03
        // UCL = 0.10 + 0.09 = 0.19
        // LCL = 0.10 - 0.09 = 0.01
        chart.add_sample(10, 100);

        let limits = chart.control_limits().expect("limits");
        assert!((limits.cl - 0.1).abs() < 1e-10);
        assert!((limits.ucl - 0.19).abs() < 1e-10);
        assert!((limits.lcl - 0.01).abs() < 1e-10);
        assert!((chart.std_err().expect("std_err") - 0.03).abs() < 1e-12);
    }

    #[test]
    fn test_p_chart_pooled_average() {
        // 3 batches of 5 with [1, 0, 4] defectives
        let mut chart = PChart::new(5);
        for d in [1, 0, 4] {
            chart.add_sample(d, 5);
        }
        let p_bar = chart.p_bar().expect("p_bar");
        assert!((p_bar - 5.0 / 15.0).abs() < 1e-12);

        let expected_se = (p_bar * (1.0 - p_bar) / 5.0).sqrt();
        assert!((chart.std_err().expect("std_err") - expected_se).abs() < 1e-12);

        let limits = chart.control_limits().expect("limits");
        assert!((limits.ucl - (p_bar + 3.0 * expected_se)).abs() < 1e-12);
        // p-bar - 3 sigma is negative here
        assert!((limits.lcl - 0.0).abs() < f64::EPSILON);
        assert_eq!(chart.verdict(), Some(ProcessVerdict::InControl));
    }

    #[test]
    fn test_p_chart_design_size_drives_sigma() {
        // A short subgroup changes p-bar but not the sample size in sigma
        let mut chart = PChart::new(10);
        chart.add_sample(2, 10);
        chart.add_sample(1, 5);

        let p_bar = chart.p_bar().expect("p_bar");
        assert!((p_bar - 3.0 / 15.0).abs() < 1e-12);
        let expected_se = (p_bar * (1.0 - p_bar) / 10.0).sqrt();
        assert!((chart.std_err().expect("std_err") - expected_se).abs() < 1e-12);

        let pts = chart.points();
        assert!((pts[0].ucl - pts[1].ucl).abs() < f64::EPSILON);
    }

    #[test]
    fn test_p_chart_rejects_invalid() {
        let mut chart = PChart::new(5);
        chart.add_sample(10, 5); // Defectives > inspected
        assert!(chart.p_bar().is_none());
        assert!(chart.verdict().is_none());
    }

    #[test]
    fn test_p_chart_empty_subgroup() {
        let mut chart = PChart::new(5);
        chart.add_sample(0, 0);
        assert_eq!(chart.p_bar(), Some(0.0));
        assert!((chart.points()[0].value - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    #[should_panic(expected = "sample_size must be > 0")]
    fn test_p_chart_zero_sample_size() {
        let _ = PChart::new(0);
    }

    #[test]
    fn test_p_chart_lcl_clamped_to_zero() {
        let mut chart = PChart::new(10);
        // Very small p with small n → LCL would be negative
        chart.add_sample(1, 10);
        let pt = &chart.points()[0];
        assert!(pt.lcl >= 0.0);
    }

    #[test]
    fn test_p_chart_out_of_control() {
        let mut chart = PChart::new(5);
        for _ in 0..9 {
            chart.add_sample(0, 5);
        }
        chart.add_sample(5, 5);

        // p-bar = 0.1, sigma = sqrt(0.09 / 5), UCL ≈ 0.5025
        assert!(!chart.is_in_control());
        let last = chart.points().last().expect("should have points");
        assert!(last.out_of_control);
        assert_eq!(chart.verdict(), Some(ProcessVerdict::OutOfControl));
    }

    #[test]
    fn test_p_chart_all_conforming_has_no_variation() {
        let mut chart = PChart::new(5);
        for _ in 0..4 {
            chart.add_sample(0, 5);
        }
        assert_eq!(chart.p_bar(), Some(0.0));
        assert!(chart.is_in_control());
        assert_eq!(chart.verdict(), Some(ProcessVerdict::NoVariation));
    }

    #[test]
    fn test_p_chart_all_nonconforming_has_no_variation() {
        let mut chart = PChart::new(3);
        chart.add_sample(3, 3);
        chart.add_sample(3, 3);
        assert_eq!(chart.p_bar(), Some(1.0));
        assert_eq!(chart.verdict(), Some(ProcessVerdict::NoVariation));
    }

    #[test]
    fn test_proportion_helper() {
        assert!((proportion(2, 5) - 0.4).abs() < f64::EPSILON);
        assert!((proportion(0, 0) - 0.0).abs() < f64::EPSILON);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn limits_ordered(
            n in 1_u64..50,
            counts in proptest::collection::vec(0_u64..50, 1..20),
        ) {
            let mut chart = PChart::new(n);
            for c in counts {
                chart.add_sample(c.min(n), n);
            }
            let limits = chart.control_limits().expect("limits");
            prop_assert!(limits.lcl >= 0.0);
            prop_assert!(limits.lcl <= limits.cl + 1e-12);
            prop_assert!(limits.cl <= limits.ucl + 1e-12);
            prop_assert!((0.0..=1.0).contains(&limits.cl));
        }
    }
}
