//! Error types for estimator construction, ingestion and queries

use thiserror::Error;

/// Errors surfaced by [`RunningEstimator`](crate::RunningEstimator)
///
/// All of these are caller-usage errors. Nothing is retried internally and a
/// failing operation never leaves the estimator partially updated.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// The configuration cannot produce a usable estimator
    #[error("invalid configuration: {reason}")]
    InvalidConfiguration {
        /// What was wrong with it
        reason: &'static str,
    },

    /// A non-finite value was offered to the estimator
    #[error("invalid observation: {value} is not a finite number")]
    InvalidObservation {
        /// The rejected value
        value: f64,
    },

    /// Too few observations to answer the query
    #[error("insufficient data: need at least {required} observation(s), have {found}")]
    InsufficientData {
        /// Minimum number of observations the query needs
        required: u64,
        /// Observations ingested so far
        found: u64,
    },
}

/// Result alias used throughout the crate
pub type Result<T> = core::result::Result<T, Error>;
