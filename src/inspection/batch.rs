//! Inspection results and the fixed-capacity batches that hold them.

use serde::Serialize;

use super::run::PREALLOC_LIMIT;
use crate::gauge::Verdict;

/// One gauged part: its diameter and the verdict it received.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InspectionResult {
    pub diameter: f64,
    pub verdict: Verdict,
}

/// An ordered group of consecutive inspection results.
///
/// A batch accepts results until it holds `capacity` of them, at which
/// point it is sealed and rejects further appends.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    results: Vec<InspectionResult>,
    capacity: usize,
}

impl Batch {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Vec::with_capacity(capacity.min(PREALLOC_LIMIT)),
            capacity,
        }
    }

    /// Append a result. Returns `true` when this append sealed the batch.
    pub(crate) fn push(&mut self, result: InspectionResult) -> bool {
        debug_assert!(!self.is_sealed(), "append to a sealed batch");
        self.results.push(result);
        self.is_sealed()
    }

    pub fn results(&self) -> &[InspectionResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_sealed(&self) -> bool {
        self.results.len() >= self.capacity
    }

    /// Number of No-Go results.
    pub fn defective(&self) -> usize {
        self.results
            .iter()
            .filter(|r| r.verdict.is_defective())
            .count()
    }
}
