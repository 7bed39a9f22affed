//! Core traits for streaming estimators
//!
//! [`Estimator`] covers ingestion and lifecycle; [`IntervalEstimator`] adds a
//! point estimate with a confidence interval around it.

use core::fmt::Debug;

use crate::error::Result;
use crate::interval::ConfidenceInterval;

/// Core trait for single-pass estimators over a stream of observations
///
/// Implementations keep O(1) state and are fed one observation at a time, in
/// arrival order. Mutation requires `&mut self`; callers sharing an estimator
/// between producers must serialize access themselves.
pub trait Estimator: Clone + Debug {
    /// The type of observation this estimator consumes
    type Item;

    /// Fold one observation into the running state
    ///
    /// Returns an error, leaving the state untouched, if the observation is
    /// not acceptable.
    fn update(&mut self, item: Self::Item) -> Result<()>;

    /// Reset to the empty state, keeping configuration
    fn clear(&mut self);

    /// Memory usage in bytes
    fn size_bytes(&self) -> usize;

    /// Number of observations folded in
    fn count(&self) -> u64;

    /// Check if nothing has been observed since construction or the last clear
    fn is_empty(&self) -> bool {
        self.count() == 0
    }
}

/// Estimators that can bound their point estimate
pub trait IntervalEstimator: Estimator {
    /// Current point estimate
    fn estimate(&self) -> f64;

    /// Confidence interval around [`estimate`](Self::estimate)
    fn confidence_interval(&self) -> Result<ConfidenceInterval>;
}
