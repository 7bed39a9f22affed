//! Running point estimates over streaming data
//!
//! This module provides estimators that summarize a stream in a single pass
//! with constant memory.
//!
//! # Example
//!
//! ```
//! use flowci::statistics::RunningEstimator;
//!
//! let mut est = RunningEstimator::with_confidence(90.0)?;
//!
//! for value in [1.0, 2.0, 3.0, 4.0, 5.0] {
//!     est.ingest(value)?;
//! }
//!
//! println!("Mean: {}", est.mean());
//! println!("Variance: {}", est.variance());
//! println!("{}", est.confidence_interval()?);
//! # Ok::<(), flowci::Error>(())
//! ```

mod running;

pub use running::RunningEstimator;
