//! Two-sided confidence intervals around a point estimate

use core::fmt;

use crate::config::PrecisionMode;
use crate::math;

/// Symmetric confidence interval `[estimate - hw, estimate + hw]`
///
/// The [`Display`](fmt::Display) rendering is stable and suitable for golden
/// output:
///
/// ```
/// use flowci::ConfidenceInterval;
///
/// let ci = ConfidenceInterval::new(10.0, 0.1766, 95.0);
/// assert_eq!(
///     ci.to_string(),
///     "95% Confidence Interval: [ 9.8234, 10.1766 ]  (hw = 0.1766)"
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConfidenceInterval {
    estimate: f64,
    half_width: f64,
    confidence_level: f64,
}

impl ConfidenceInterval {
    /// Create an interval from its point estimate, half-width and confidence
    /// level (in percent)
    pub fn new(estimate: f64, half_width: f64, confidence_level: f64) -> Self {
        Self {
            estimate,
            half_width,
            confidence_level,
        }
    }

    /// Lower bound, `estimate - half_width`
    pub fn lower(&self) -> f64 {
        self.estimate - self.half_width
    }

    /// Upper bound, `estimate + half_width`
    pub fn upper(&self) -> f64 {
        self.estimate + self.half_width
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    /// Point estimate at the center of the interval
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Confidence level in percent (e.g. 95.0)
    pub fn confidence_level(&self) -> f64 {
        self.confidence_level
    }

    /// Check if a value falls within bounds (inclusive)
    pub fn contains(&self, value: f64) -> bool {
        value >= self.lower() && value <= self.upper()
    }

    /// Full width of the interval
    pub fn width(&self) -> f64 {
        2.0 * self.half_width
    }

    /// Half-width relative to the magnitude of the estimate
    ///
    /// Returns 0 when the estimate is exactly zero.
    pub fn relative_half_width(&self) -> f64 {
        if self.estimate == 0.0 {
            0.0
        } else {
            self.half_width / math::abs(self.estimate)
        }
    }

    /// Whether the half-width is within `target`
    ///
    /// In [`PrecisionMode::Relative`] the half-width is compared against
    /// `target * |estimate|`, otherwise against `target` directly. A zero
    /// estimate never satisfies a relative target unless the half-width is
    /// zero as well.
    pub fn meets_precision(&self, target: f64, mode: PrecisionMode) -> bool {
        match mode {
            PrecisionMode::Absolute => self.half_width <= target,
            PrecisionMode::Relative => self.half_width <= target * math::abs(self.estimate),
        }
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}% Confidence Interval: [ {:.4}, {:.4} ]  (hw = {:.4})",
            self.confidence_level,
            self.lower(),
            self.upper(),
            self.half_width
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        let ci = ConfidenceInterval::new(100.0, 10.0, 95.0);

        assert_eq!(ci.lower(), 90.0);
        assert_eq!(ci.upper(), 110.0);
        assert!(ci.contains(100.0));
        assert!(ci.contains(90.0));
        assert!(ci.contains(110.0));
        assert!(!ci.contains(89.0));
        assert!(!ci.contains(111.0));

        assert_eq!(ci.width(), 20.0);
        assert!((ci.relative_half_width() - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_zero_estimate() {
        let ci = ConfidenceInterval::new(0.0, 1.0, 95.0);
        assert_eq!(ci.relative_half_width(), 0.0);
        assert!(!ci.meets_precision(0.5, PrecisionMode::Relative));
        assert!(ConfidenceInterval::new(0.0, 0.0, 95.0).meets_precision(0.5, PrecisionMode::Relative));
    }

    #[test]
    fn test_meets_precision() {
        let ci = ConfidenceInterval::new(-50.0, 2.0, 90.0);

        assert!(ci.meets_precision(2.0, PrecisionMode::Absolute));
        assert!(!ci.meets_precision(1.9, PrecisionMode::Absolute));

        // 2 / |-50| = 0.04
        assert!(ci.meets_precision(0.05, PrecisionMode::Relative));
        assert!(!ci.meets_precision(0.03, PrecisionMode::Relative));
    }

    #[test]
    fn test_display_integer_level() {
        let ci = ConfidenceInterval::new(18.0, 3.629_148_103_434_960_4, 95.0);
        assert_eq!(
            ci.to_string(),
            "95% Confidence Interval: [ 14.3709, 21.6291 ]  (hw = 3.6291)"
        );
    }

    #[test]
    fn test_display_fractional_level() {
        let ci = ConfidenceInterval::new(1.0, 0.5, 99.9);
        assert_eq!(
            ci.to_string(),
            "99.9% Confidence Interval: [ 0.5000, 1.5000 ]  (hw = 0.5000)"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_round_trip() {
        let ci = ConfidenceInterval::new(18.0, 3.625, 99.9);
        let json = serde_json::to_string(&ci).unwrap();
        assert!(json.contains("\"half_width\":"));
        assert!(json.contains("\"confidence_level\":99.9"));

        let back: ConfidenceInterval = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ci);
        assert_eq!(back.to_string(), ci.to_string());
    }

    #[test]
    fn test_display_degenerate() {
        let ci = ConfidenceInterval::new(-3.25, 0.0, 80.0);
        assert_eq!(
            ci.to_string(),
            "80% Confidence Interval: [ -3.2500, -3.2500 ]  (hw = 0.0000)"
        );
    }
}
