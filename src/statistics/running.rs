//! Running mean, variance and confidence interval
//!
//! Keeps three numbers (count, sum and a Welford-style sum of squared
//! deviations) and derives every query from them on demand.

use log::{debug, trace, warn};

use crate::config::EstimatorConfig;
use crate::error::{Error, Result};
use crate::interval::ConfidenceInterval;
use crate::math;
use crate::normal::{standard_normal_inverse_cdf, two_sided_quantile, QuantileFn};
use crate::traits::{Estimator, IntervalEstimator};

/// Streaming estimator of the mean with a normal-approximation confidence
/// interval
///
/// Each observation is folded in with a one-pass update that avoids the
/// catastrophic cancellation of accumulating `sum` and `sum of squares`
/// separately. The two-sided quantile for the configured confidence level is
/// computed once, at construction.
///
/// # Example
///
/// ```
/// use flowci::RunningEstimator;
///
/// let mut est = RunningEstimator::with_confidence(95.0).unwrap();
/// for v in [10.0, 12.0, 23.0, 23.0, 16.0, 23.0, 21.0, 16.0] {
///     est.ingest(v).unwrap();
/// }
///
/// assert_eq!(est.mean(), 18.0);
/// assert!((est.variance() - 192.0 / 7.0).abs() < 1e-9);
///
/// let ci = est.confidence_interval().unwrap();
/// assert_eq!(
///     ci.to_string(),
///     "95% Confidence Interval: [ 14.3709, 21.6291 ]  (hw = 3.6291)"
/// );
/// ```
///
/// # Concurrency
///
/// Ingestion and reset take `&mut self`, so a single writer is enforced at
/// compile time. Feeding one estimator from several producers requires the
/// caller to serialize access, e.g. behind a `Mutex` or through a single
/// consumer loop.
#[derive(Clone, Debug)]
pub struct RunningEstimator {
    /// Number of observations ingested
    count: u64,
    /// Running sum of observations
    sum: f64,
    /// Running `(count - 1) * sample variance`
    sum_sq_dev: f64,
    /// Two-sided normal quantile for `config.confidence_level`
    quantile: f64,
    config: EstimatorConfig,
}

impl RunningEstimator {
    /// Create an estimator using the built-in inverse normal CDF
    ///
    /// Fails with [`Error::InvalidConfiguration`] unless the confidence level
    /// lies strictly between 0 and 100.
    pub fn new(config: EstimatorConfig) -> Result<Self> {
        Self::with_quantile_fn(config, standard_normal_inverse_cdf)
    }

    /// Create an estimator at `confidence_level` percent with default
    /// precision settings
    pub fn with_confidence(confidence_level: f64) -> Result<Self> {
        Self::new(EstimatorConfig::default().with_confidence_level(confidence_level))
    }

    /// Create an estimator resolving its quantile through `quantile_fn`
    ///
    /// `quantile_fn` receives `0.5 + confidence_level / 200` and must return a
    /// finite, non-negative critical value. Zero is accepted: levels so small
    /// that `0.5 + level / 200` rounds to 0.5 legitimately resolve to `z = 0`
    /// and produce zero-width intervals.
    pub fn with_quantile_fn(config: EstimatorConfig, quantile_fn: QuantileFn) -> Result<Self> {
        if let Err(err) = config.validate() {
            warn!("rejecting estimator configuration {:?}: {}", config, err);
            return Err(err);
        }

        let quantile = two_sided_quantile(config.confidence_level, quantile_fn);
        if !quantile.is_finite() || quantile < 0.0 {
            warn!(
                "quantile function returned {} for a {}% interval",
                quantile, config.confidence_level
            );
            return Err(Error::InvalidConfiguration {
                reason: "quantile function must return a finite non-negative critical value",
            });
        }

        debug!(
            "created running estimator: {}% confidence, z = {}",
            config.confidence_level, quantile
        );

        Ok(Self {
            count: 0,
            sum: 0.0,
            sum_sq_dev: 0.0,
            quantile,
            config,
        })
    }

    /// Return to the empty state
    ///
    /// The resolved quantile and the configuration are kept.
    pub fn reset(&mut self) {
        debug!("resetting running estimator after {} observations", self.count);
        self.count = 0;
        self.sum = 0.0;
        self.sum_sq_dev = 0.0;
    }

    /// Fold one observation into the running aggregates
    ///
    /// NaN and infinite values are rejected with
    /// [`Error::InvalidObservation`] before any state is touched. So is a
    /// finite value that would overflow the running sum or the sum of squared
    /// deviations, so the aggregates stay finite and every later query returns
    /// finite results.
    pub fn ingest(&mut self, value: f64) -> Result<()> {
        if !value.is_finite() {
            warn!("rejecting non-finite observation {}", value);
            return Err(Error::InvalidObservation { value });
        }

        let count = self.count + 1;
        let mut sum_sq_dev = self.sum_sq_dev;
        if count > 1 {
            // delta = (k - 1) * (previous mean - value), expressed through the
            // pre-update sum to save a division
            let k = count as f64;
            let delta = self.sum - (k - 1.0) * value;
            sum_sq_dev += (delta / k) * (delta / (k - 1.0));
        }
        // Computed from the old sum, after the deviation term
        let sum = self.sum + value;

        if !sum.is_finite() || !sum_sq_dev.is_finite() {
            warn!(
                "rejecting observation {}: running aggregates would overflow (n = {})",
                value, self.count
            );
            return Err(Error::InvalidObservation { value });
        }

        self.count = count;
        self.sum = sum;
        self.sum_sq_dev = sum_sq_dev;

        trace!("ingested {} (n = {})", value, self.count);
        Ok(())
    }

    /// Ingest values in order, stopping at the first rejected one
    ///
    /// Values preceding the rejected one remain ingested. Returns the number
    /// of values ingested.
    pub fn ingest_all<I>(&mut self, values: I) -> Result<usize>
    where
        I: IntoIterator<Item = f64>,
    {
        let mut ingested = 0;
        for value in values {
            self.ingest(value)?;
            ingested += 1;
        }
        Ok(ingested)
    }

    /// Number of observations ingested
    pub fn len(&self) -> u64 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Sum of all observations
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Sample mean, or 0 when empty
    pub fn mean(&self) -> f64 {
        if self.count >= 1 {
            self.sum / self.count as f64
        } else {
            0.0
        }
    }

    /// Unbiased sample variance, or 0 with fewer than two observations
    pub fn variance(&self) -> f64 {
        if self.count > 1 {
            self.sum_sq_dev.max(0.0) / (self.count - 1) as f64
        } else {
            0.0
        }
    }

    /// Sample standard deviation
    pub fn std_dev(&self) -> f64 {
        math::sqrt(self.variance())
    }

    /// Standard error of the mean, or 0 when empty
    pub fn standard_error(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            math::sqrt(self.variance() / self.count as f64)
        }
    }

    /// Two-sided confidence interval for the mean
    ///
    /// Fails with [`Error::InsufficientData`] when empty. A single observation
    /// yields a zero-width interval at that observation.
    pub fn confidence_interval(&self) -> Result<ConfidenceInterval> {
        if self.count == 0 {
            return Err(Error::InsufficientData {
                required: 1,
                found: 0,
            });
        }

        let half_width = self.quantile * self.standard_error();
        Ok(ConfidenceInterval::new(
            self.mean(),
            half_width,
            self.config.confidence_level,
        ))
    }

    /// Whether the current half-width satisfies the configured precision
    ///
    /// Always `false` below two observations, since a single observation
    /// carries no spread information. Fails like
    /// [`confidence_interval`](Self::confidence_interval) when empty.
    pub fn precision_reached(&self) -> Result<bool> {
        let ci = self.confidence_interval()?;
        if self.count < 2 {
            return Ok(false);
        }
        Ok(ci.meets_precision(self.config.precision, self.config.precision_mode))
    }

    /// Two-sided critical value resolved at construction
    pub fn quantile(&self) -> f64 {
        self.quantile
    }

    /// Confidence level in percent
    pub fn confidence_level(&self) -> f64 {
        self.config.confidence_level
    }

    pub fn config(&self) -> &EstimatorConfig {
        &self.config
    }
}

impl Estimator for RunningEstimator {
    type Item = f64;

    fn update(&mut self, item: Self::Item) -> Result<()> {
        self.ingest(item)
    }

    fn clear(&mut self) {
        self.reset();
    }

    fn size_bytes(&self) -> usize {
        core::mem::size_of::<Self>()
    }

    fn count(&self) -> u64 {
        self.count
    }
}

impl IntervalEstimator for RunningEstimator {
    fn estimate(&self) -> f64 {
        self.mean()
    }

    fn confidence_interval(&self) -> Result<ConfidenceInterval> {
        RunningEstimator::confidence_interval(self)
    }
}
