//! # Flowci
//!
//! Streaming confidence intervals for Rust.
//!
//! Flowci estimates the mean of a stream of observations together with a
//! two-sided, normal-approximation confidence interval, in O(1) time and
//! space per observation. The observations themselves are never stored.
//!
//! ## Features
//!
//! - **Numerically stable**: Welford-style running sum of squared deviations
//! - **Exact quantiles**: inverse normal CDF accurate to near machine precision,
//!   or bring your own through [`normal::QuantileFn`]
//! - **Explicit errors**: non-finite input and empty queries fail loudly
//!   instead of producing NaN
//! - **`no_std`**: falls back to `libm` without the `std` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use flowci::prelude::*;
//!
//! let mut est = RunningEstimator::with_confidence(95.0)?;
//! for v in [9.7, 10.1, 10.4, 9.9, 10.0, 9.8] {
//!     est.ingest(v)?;
//! }
//!
//! let ci = est.confidence_interval()?;
//! assert!(ci.contains(est.mean()));
//! println!("{}", ci);
//! # Ok::<(), flowci::Error>(())
//! ```
//!
//! ## Sequential Stopping
//!
//! The estimator stores a precision target but never decides when to stop
//! sampling. Callers build that loop on top of the half-width:
//!
//! ```rust
//! use flowci::prelude::*;
//!
//! let config = EstimatorConfig::new(95.0, 0.05, true);
//! let mut est = RunningEstimator::new(config)?;
//!
//! let mut i = 0u32;
//! while est.len() < 2 || !est.precision_reached()? {
//!     est.ingest(100.0 + f64::from(i % 7))?;
//!     i += 1;
//! }
//! # Ok::<(), flowci::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Standard library support
//! - `serde`: Serialization of [`EstimatorConfig`] and [`ConfidenceInterval`]

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod config;
pub mod error;
pub mod interval;
pub mod normal;
pub mod statistics;
pub mod traits;

mod math;

pub mod prelude {
    pub use crate::config::{EstimatorConfig, PrecisionMode};
    pub use crate::error::{Error, Result};
    pub use crate::interval::ConfidenceInterval;
    pub use crate::statistics::RunningEstimator;
    pub use crate::traits::*;
}

pub use config::{EstimatorConfig, PrecisionMode};
pub use error::{Error, Result};
pub use interval::ConfidenceInterval;
pub use statistics::RunningEstimator;
