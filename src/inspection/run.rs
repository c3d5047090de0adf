//! The batch-inspection state machine.
//!
//! A [`Run`] starts `Collecting`. Every call to [`Run::inspect`] classifies
//! one diameter and appends it to the open batch. When the open batch
//! reaches `samples_per_batch` results it is sealed; when `batch_count`
//! batches are sealed the run moves to `Complete`, the P-chart summary is
//! computed once, and no further mutation is possible.

use tracing::{debug, info, warn};

use super::batch::{Batch, InspectionResult};
use super::summary::RunSummary;
use crate::error::{InspectionError, Result};
use crate::export::ResultRow;
use crate::gauge::{classify, GaugeSpec};

/// Upper bound on up-front reservations; larger runs grow on demand.
pub(crate) const PREALLOC_LIMIT: usize = 64;

#[derive(Debug, Clone, PartialEq)]
enum RunState {
    Collecting,
    Complete(RunSummary),
}

/// One inspection session: a gauge, a batch layout, and the results so far.
///
/// # Examples
///
/// ```
/// use snap_gauge::{GaugeSpec, InspectionError, Run, Verdict};
///
/// let gauge = GaugeSpec::new(50.0, 0.5).unwrap();
/// let mut run = Run::new(gauge, 1, 5).unwrap();
///
/// let verdicts: Vec<Verdict> = [50.5, 49.5, 50.6, 49.4, 50.0]
///     .iter()
///     .map(|&d| run.inspect(d).unwrap().verdict)
///     .collect();
/// assert_eq!(verdicts, [Verdict::Go, Verdict::Go, Verdict::NoGo, Verdict::NoGo, Verdict::Go]);
///
/// assert!(run.is_complete());
/// let batch = &run.summary().unwrap().batches[0];
/// assert_eq!((batch.defective, batch.inspected), (2, 5));
/// assert_eq!(run.inspect(50.0), Err(InspectionError::InvalidState));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Run {
    gauge: GaugeSpec,
    batch_count: usize,
    samples_per_batch: usize,
    /// `batch_count * samples_per_batch`, checked at construction.
    total: usize,
    sealed: Vec<Batch>,
    open: Batch,
    state: RunState,
}

impl Run {
    /// Start a run of `batch_count` batches of `samples_per_batch` parts.
    ///
    /// # Errors
    ///
    /// [`InspectionError::InvalidConfig`] if either count is zero or their
    /// product overflows `usize`. The gauge tolerance is already validated
    /// by [`GaugeSpec::new`].
    pub fn new(gauge: GaugeSpec, batch_count: usize, samples_per_batch: usize) -> Result<Self> {
        if batch_count == 0 {
            return Err(InspectionError::InvalidConfig(
                "batch count must be > 0".into(),
            ));
        }
        if samples_per_batch == 0 {
            return Err(InspectionError::InvalidConfig(
                "samples per batch must be > 0".into(),
            ));
        }
        let total = batch_count.checked_mul(samples_per_batch).ok_or_else(|| {
            InspectionError::InvalidConfig(format!(
                "{batch_count} batches of {samples_per_batch} parts overflow the part count"
            ))
        })?;
        debug!(
            nominal = gauge.nominal(),
            tolerance = gauge.tolerance(),
            batch_count,
            samples_per_batch,
            "inspection run started"
        );

        Ok(Self {
            gauge,
            batch_count,
            samples_per_batch,
            total,
            sealed: Vec::with_capacity(batch_count.min(PREALLOC_LIMIT)),
            open: Batch::with_capacity(samples_per_batch),
            state: RunState::Collecting,
        })
    }

    /// Classify `diameter` and record it in the open batch.
    ///
    /// # Errors
    ///
    /// [`InspectionError::InvalidState`] if the run is already complete.
    /// The run is left untouched.
    pub fn inspect(&mut self, diameter: f64) -> Result<InspectionResult> {
        if self.is_complete() {
            return Err(InspectionError::InvalidState);
        }
        if !diameter.is_finite() {
            warn!(diameter, "non-finite diameter recorded as No-Go");
        }

        let result = InspectionResult {
            diameter,
            verdict: classify(diameter, &self.gauge),
        };
        debug!(
            batch = self.sealed.len() + 1,
            diameter,
            verdict = %result.verdict,
            "part inspected"
        );

        if self.open.push(result) {
            self.seal_open_batch();
        }
        Ok(result)
    }

    fn seal_open_batch(&mut self) {
        let batch = std::mem::replace(&mut self.open, Batch::with_capacity(self.samples_per_batch));
        info!(
            batch = self.sealed.len() + 1,
            defective = batch.defective(),
            inspected = batch.len(),
            "batch sealed"
        );
        self.sealed.push(batch);

        if self.sealed.len() == self.batch_count {
            let summary = RunSummary::from_batches(&self.sealed, self.samples_per_batch);
            info!(
                avg_p = summary.avg_p,
                ucl = summary.ucl(),
                lcl = summary.lcl(),
                verdict = %summary.verdict,
                "inspection run complete"
            );
            self.state = RunState::Complete(summary);
        }
    }

    /// Results in the batch currently being filled.
    ///
    /// Empty right after a batch seals and once the run is complete.
    pub fn current_batch_results(&self) -> &[InspectionResult] {
        self.open.results()
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.state, RunState::Complete(_))
    }

    /// The cached P-chart summary.
    ///
    /// # Errors
    ///
    /// [`InspectionError::NotReady`] until the last batch is sealed.
    pub fn summary(&self) -> Result<&RunSummary> {
        match &self.state {
            RunState::Complete(summary) => Ok(summary),
            RunState::Collecting => Err(InspectionError::NotReady),
        }
    }

    pub fn gauge(&self) -> &GaugeSpec {
        &self.gauge
    }

    pub fn batch_count(&self) -> usize {
        self.batch_count
    }

    pub fn samples_per_batch(&self) -> usize {
        self.samples_per_batch
    }

    /// Sealed batches, in inspection order.
    pub fn batches(&self) -> &[Batch] {
        &self.sealed
    }

    /// Total parts inspected so far.
    pub fn inspected_count(&self) -> usize {
        self.sealed.iter().map(Batch::len).sum::<usize>() + self.open.len()
    }

    /// Parts still needed before the run completes.
    pub fn remaining(&self) -> usize {
        self.total - self.inspected_count()
    }

    /// One-based number of the batch being filled, or `None` once complete.
    pub fn open_batch_number(&self) -> Option<usize> {
        (!self.is_complete()).then(|| self.sealed.len() + 1)
    }

    /// Result table: every sealed batch, then the open batch.
    pub fn rows(&self) -> Vec<ResultRow> {
        self.sealed
            .iter()
            .chain(std::iter::once(&self.open))
            .enumerate()
            .flat_map(|(i, batch)| {
                batch.results().iter().map(move |r| ResultRow {
                    batch: i + 1,
                    diameter: r.diameter,
                    result: r.verdict,
                })
            })
            .collect()
    }
}
