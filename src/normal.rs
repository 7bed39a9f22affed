//! Standard normal distribution helpers
//!
//! The estimator needs exactly one thing from the normal distribution: the
//! two-sided critical value `z` for a confidence level. That value is
//! produced by a [`QuantileFn`], which defaults to
//! [`standard_normal_inverse_cdf`] but can be swapped for any other
//! implementation (a statistics library, a lookup table) through
//! [`RunningEstimator::with_quantile_fn`](crate::RunningEstimator::with_quantile_fn).
//!
//! # Example
//!
//! ```
//! use flowci::normal::{standard_normal_inverse_cdf, two_sided_quantile};
//!
//! let z = two_sided_quantile(95.0, standard_normal_inverse_cdf);
//! assert!((z - 1.959964).abs() < 1e-6);
//! ```

use crate::math;

/// Inverse CDF of the standard normal distribution, `p -> z`
pub type QuantileFn = fn(f64) -> f64;

const SQRT_2: f64 = core::f64::consts::SQRT_2;
/// sqrt(2 * pi)
const SQRT_2PI: f64 = 2.506_628_274_631_000_7;

// Acklam's rational approximation coefficients
const A: [f64; 6] = [
    -3.969_683_028_665_376e1,
    2.209_460_984_245_205e2,
    -2.759_285_104_469_687e2,
    1.383_577_518_672_69e2,
    -3.066_479_806_614_716e1,
    2.506_628_277_459_239,
];
const B: [f64; 5] = [
    -5.447_609_879_822_406e1,
    1.615_858_368_580_409e2,
    -1.556_989_798_598_866e2,
    6.680_131_188_771_972e1,
    -1.328_068_155_288_572e1,
];
const C: [f64; 6] = [
    -7.784_894_002_430_293e-3,
    -3.223_964_580_411_365e-1,
    -2.400_758_277_161_838,
    -2.549_732_539_343_734,
    4.374_664_141_464_968,
    2.938_163_982_698_783,
];
const D: [f64; 4] = [
    7.784_695_709_041_462e-3,
    3.224_671_290_700_398e-1,
    2.445_134_137_142_996,
    3.754_408_661_907_416,
];

/// Boundary between the central and tail regions of the approximation
const P_LOW: f64 = 0.024_25;

/// CDF of the standard normal distribution
pub fn standard_normal_cdf(x: f64) -> f64 {
    0.5 * (1.0 + math::erf(x / SQRT_2))
}

/// Inverse CDF (probit) of the standard normal distribution
///
/// Uses Acklam's rational approximation (relative error below 1.15e-9)
/// followed by one Halley refinement step against `erfc`, which brings the
/// result to within a few ulps of the exact quantile.
///
/// Returns NaN for `p` outside `[0, 1]` or NaN, `-inf` at 0 and `+inf` at 1.
pub fn standard_normal_inverse_cdf(p: f64) -> f64 {
    if p.is_nan() || !(0.0..=1.0).contains(&p) {
        return f64::NAN;
    }
    if p == 0.0 {
        return f64::NEG_INFINITY;
    }
    if p == 1.0 {
        return f64::INFINITY;
    }

    let x = if p < P_LOW {
        let q = math::sqrt(-2.0 * math::ln(p));
        tail(q)
    } else if p <= 1.0 - P_LOW {
        let q = p - 0.5;
        let r = q * q;
        (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q
            / (((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0)
    } else {
        let q = math::sqrt(-2.0 * math::ln(1.0 - p));
        -tail(q)
    };

    // Halley step
    let e = 0.5 * math::erfc(-x / SQRT_2) - p;
    let u = e * SQRT_2PI * math::exp(x * x / 2.0);
    x - u / (1.0 + x * u / 2.0)
}

#[inline]
fn tail(q: f64) -> f64 {
    (((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5])
        / ((((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0)
}

/// Critical value `z` of a two-sided interval at `confidence_level` percent
///
/// Evaluates `quantile_fn(0.5 + confidence_level / 200)`. No validation is
/// done here; out-of-range levels produce whatever `quantile_fn` returns for
/// an out-of-range probability.
pub fn two_sided_quantile(confidence_level: f64, quantile_fn: QuantileFn) -> f64 {
    quantile_fn(0.5 + confidence_level / 200.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Reference quantiles, accurate to 15 significant digits
    const REFERENCE: [(f64, f64); 6] = [
        (0.90, 1.281_551_565_544_601),
        (0.95, 1.644_853_626_951_472),
        (0.975, 1.959_963_984_540_054),
        (0.995, 2.575_829_303_548_901),
        (0.9995, 3.290_526_731_491_926),
        (0.5, 0.0),
    ];

    #[test]
    fn test_inverse_cdf_reference_values() {
        for (p, z) in REFERENCE {
            let got = standard_normal_inverse_cdf(p);
            assert!(
                (got - z).abs() < 1e-12,
                "p={}: got {}, expected {}",
                p,
                got,
                z
            );
        }
    }

    #[test]
    fn test_inverse_cdf_symmetry() {
        for p in [1e-6, 1e-4, 0.01, 0.02425, 0.1, 0.3, 0.49] {
            let lo = standard_normal_inverse_cdf(p);
            let hi = standard_normal_inverse_cdf(1.0 - p);
            assert!((lo + hi).abs() < 1e-9, "asymmetric at p={}", p);
        }
    }

    #[test]
    fn test_round_trip_through_cdf() {
        let mut p = 0.001;
        while p < 1.0 {
            let z = standard_normal_inverse_cdf(p);
            assert!((standard_normal_cdf(z) - p).abs() < 1e-14, "p={}", p);
            p += 0.0137;
        }
    }

    #[test]
    fn test_inverse_cdf_monotonic() {
        let mut prev = f64::NEG_INFINITY;
        for i in 1..1000 {
            let z = standard_normal_inverse_cdf(i as f64 / 1000.0);
            assert!(z > prev);
            prev = z;
        }
    }

    #[test]
    fn test_inverse_cdf_edges() {
        assert!(standard_normal_inverse_cdf(f64::NAN).is_nan());
        assert!(standard_normal_inverse_cdf(-0.1).is_nan());
        assert!(standard_normal_inverse_cdf(1.1).is_nan());
        assert_eq!(standard_normal_inverse_cdf(0.0), f64::NEG_INFINITY);
        assert_eq!(standard_normal_inverse_cdf(1.0), f64::INFINITY);
    }

    #[test]
    fn test_two_sided_quantile() {
        let z95 = two_sided_quantile(95.0, standard_normal_inverse_cdf);
        assert!((z95 - 1.959_963_984_540_054).abs() < 1e-12);

        let z999 = two_sided_quantile(99.9, standard_normal_inverse_cdf);
        assert!((z999 - 3.290_526_731_491_926).abs() < 1e-9);

        // Injected functions are used verbatim
        let fixed: QuantileFn = |_| 2.0;
        assert_eq!(two_sided_quantile(95.0, fixed), 2.0);
    }

    #[test]
    fn test_cdf_known_points() {
        assert!((standard_normal_cdf(0.0) - 0.5).abs() < 1e-15);
        assert!((standard_normal_cdf(1.959_963_984_540_054) - 0.975).abs() < 1e-12);
        assert!(standard_normal_cdf(-40.0) < 1e-300);
    }
}
