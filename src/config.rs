//! Estimator configuration
//!
//! A [`RunningEstimator`](crate::RunningEstimator) is configured once, at
//! construction, with a confidence level and a precision target. The
//! confidence level is resolved into a normal quantile immediately; the
//! precision target is only stored so that callers can build sequential
//! stopping rules on top of the interval half-width.
//!
//! # Example
//!
//! ```
//! use flowci::config::{EstimatorConfig, PrecisionMode};
//!
//! let config = EstimatorConfig::default()
//!     .with_confidence_level(99.0)
//!     .with_precision(0.5)
//!     .with_precision_mode(PrecisionMode::Absolute);
//!
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{Error, Result};

/// Default confidence level, in percent
pub const DEFAULT_CONFIDENCE_LEVEL: f64 = 95.0;

/// Default precision target
pub const DEFAULT_PRECISION: f64 = 0.01;

/// How a precision target is compared against an interval half-width
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PrecisionMode {
    /// Half-width relative to the magnitude of the point estimate
    #[default]
    Relative,
    /// Half-width in the units of the observations
    Absolute,
}

impl PrecisionMode {
    /// Whether the target is relative to the point estimate
    pub fn is_relative(self) -> bool {
        matches!(self, PrecisionMode::Relative)
    }
}

impl From<bool> for PrecisionMode {
    /// `true` selects [`PrecisionMode::Relative`]
    fn from(relative: bool) -> Self {
        if relative {
            PrecisionMode::Relative
        } else {
            PrecisionMode::Absolute
        }
    }
}

/// Construction parameters for a running estimator
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EstimatorConfig {
    /// Two-sided confidence level in percent, strictly between 0 and 100
    pub confidence_level: f64,
    /// Desired interval half-width. Stored, never consumed by the estimator.
    pub precision: f64,
    /// Interpretation of `precision`
    pub precision_mode: PrecisionMode,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            confidence_level: DEFAULT_CONFIDENCE_LEVEL,
            precision: DEFAULT_PRECISION,
            precision_mode: PrecisionMode::Relative,
        }
    }
}

impl EstimatorConfig {
    /// Create a configuration from its three parts
    ///
    /// `relative` follows the usual convention: `true` means the precision
    /// target is relative to the point estimate.
    pub fn new(confidence_level: f64, precision: f64, relative: bool) -> Self {
        Self {
            confidence_level,
            precision,
            precision_mode: relative.into(),
        }
    }

    pub fn with_confidence_level(mut self, confidence_level: f64) -> Self {
        self.confidence_level = confidence_level;
        self
    }

    pub fn with_precision(mut self, precision: f64) -> Self {
        self.precision = precision;
        self
    }

    pub fn with_precision_mode(mut self, mode: PrecisionMode) -> Self {
        self.precision_mode = mode;
        self
    }

    /// Check that the configuration can build an estimator
    ///
    /// Only the confidence level is constrained. The precision settings are
    /// opaque to the estimator and accepted as given.
    pub fn validate(&self) -> Result<()> {
        let level = self.confidence_level;
        if !level.is_finite() || level <= 0.0 || level >= 100.0 {
            return Err(Error::InvalidConfiguration {
                reason: "confidence level must lie strictly between 0 and 100",
            });
        }
        Ok(())
    }
}
