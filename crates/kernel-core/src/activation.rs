// Licensed under the MIT License.
// See LICENSE file in the project root for full license information.
//
// SPDX-License-Identifier: MIT

//! Numerically safe scalar activation approximations.
//!
//! Some compute devices produce invalid results (NaN/Inf) from their native
//! `exp`/`tanh` for large arguments, and a naive series expansion of tanh is
//! inaccurate near zero. The [`tanh`] here partitions the domain into four
//! magnitude regions so that every branch stays finite and single-precision
//! accurate, and no branch feeds `exp` an argument large enough to overflow.

/// Magnitude beyond which tanh rounds to ±1 in single precision.
const X_LARGE: f32 = 8.664_339_756_999_316_367_72;

/// Lower bound of the direct-exponential region.
const X_MEDIUM: f32 = 0.549_306_144_334_054_845_70;

/// Magnitude below which `tanh(x) == x` to machine precision.
const X_SMALL: f32 = 4.228_639_666_916_204_329_90e-4;

/// Minimax rational coefficients for the `[X_SMALL, X_MEDIUM)` band.
const P0: f32 = -0.823_772_812_7;
const P1: f32 = -0.003_831_010_665;
const Q0: f32 = 2.471_319_654;

/// Hyperbolic tangent, partitioned into four regions by `|x|`.
///
/// - `|x| >= X_LARGE`: saturated, returns `±1.0` without touching `exp`.
/// - `X_MEDIUM <= |x| < X_LARGE`: direct exponential form
///   `sign * 2 * (0.5 - 1 / (1 + exp(2|x|)))`; the argument to `exp` never
///   exceeds `2 * X_LARGE ≈ 17.3`, far below f32 overflow.
/// - `X_SMALL <= |x| < X_MEDIUM`: minimax rational approximation
///   `x + x * g * (P1*g + P0) / (g + Q0)` with `g = x²`, more accurate in
///   this band than a truncated series.
/// - `|x| < X_SMALL`: identity, `tanh(x) == x` at this magnitude.
///
/// `x == 0.0` (either sign of zero) returns exactly `0.0`. For all finite
/// `x` the result is finite, lies in `[-1, 1]`, and has the sign of `x`.
/// Non-finite inputs propagate by the usual floating-point rules.
#[inline(always)]
pub fn tanh(x: f32) -> f32 {
    if x == 0.0 {
        return 0.0;
    }
    let sign = if x > 0.0 { 1.0f32 } else { -1.0f32 };
    let abs_x = sign * x;

    if abs_x >= X_LARGE {
        sign
    } else if abs_x >= X_MEDIUM {
        let t = 0.5 - 1.0 / (1.0 + (2.0 * abs_x).exp());
        sign * (t + t)
    } else if abs_x >= X_SMALL {
        let g = abs_x * abs_x;
        let r = g * (P1 * g + P0) / (g + Q0);
        x + x * r
    } else {
        x
    }
}

/// Logistic sigmoid: `1 / (1 + exp(-x))`.
///
/// No domain partitioning; relies on the host `exp`. The result lies in
/// `(0, 1)` for all finite `x`, reaching exactly `0.0` or `1.0` at f32
/// extremes through underflow/overflow of `exp`, which is accepted
/// behavior.
#[inline(always)]
pub fn sigmoid(x: f32) -> f32 {
    1.0 / (1.0 + (-x).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f32, b: f32, tol: f32) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_tanh_zero() {
        assert_eq!(tanh(0.0), 0.0);
        assert_eq!(tanh(-0.0), 0.0);
    }

    #[test]
    fn test_tanh_minimal_region_is_identity() {
        assert_eq!(tanh(0.0001), 0.0001);
        assert_eq!(tanh(-0.0001), -0.0001);
    }

    #[test]
    fn test_tanh_known_value() {
        // tanh(1.0) = 0.7615941559557649.
        assert!(approx_eq(tanh(1.0), 0.761_594_16, 1e-6));
        assert!(approx_eq(tanh(-1.0), -0.761_594_16, 1e-6));
    }

    #[test]
    fn test_tanh_rational_region() {
        // 0.25 falls in the rational band; compare against libm.
        for &x in &[0.001, 0.01, 0.1, 0.25, 0.5, -0.3, -0.01] {
            let x: f32 = x;
            assert!(
                approx_eq(tanh(x), x.tanh(), 1e-6),
                "tanh({x}) = {} vs reference {}",
                tanh(x),
                x.tanh()
            );
        }
    }

    #[test]
    fn test_tanh_saturated() {
        assert_eq!(tanh(100.0), 1.0);
        assert_eq!(tanh(-100.0), -1.0);
        assert_eq!(tanh(8.67), 1.0);
        // Enormous inputs must not overflow exp.
        assert_eq!(tanh(f32::MAX), 1.0);
        assert_eq!(tanh(-f32::MAX), -1.0);
    }

    #[test]
    fn test_tanh_range_and_sign() {
        let mut x = -20.0f32;
        while x <= 20.0 {
            let y = tanh(x);
            assert!(y.is_finite(), "tanh({x}) not finite");
            assert!((-1.0..=1.0).contains(&y), "tanh({x}) = {y} out of range");
            if x > 0.0 {
                assert!(y > 0.0, "tanh({x}) = {y} lost sign");
            } else if x < 0.0 {
                assert!(y < 0.0, "tanh({x}) = {y} lost sign");
            }
            x += 0.0173;
        }
    }

    #[test]
    fn test_tanh_continuous_at_region_boundaries() {
        let eps = 1e-6f32;
        for &boundary in &[4.228_639_7e-4f32, 0.549_306_14, 8.664_34] {
            let below = tanh(boundary - eps);
            let above = tanh(boundary + eps);
            assert!(
                (below - above).abs() < 1e-5,
                "discontinuity at {boundary}: {below} vs {above}"
            );
        }
    }

    #[test]
    fn test_tanh_is_odd() {
        for &x in &[0.0002, 0.3, 0.7, 2.0, 9.0] {
            let x: f32 = x;
            assert_eq!(tanh(-x), -tanh(x));
        }
    }

    #[test]
    fn test_sigmoid_zero() {
        assert_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn test_sigmoid_symmetry() {
        for &x in &[0.1, 0.5, 1.0, 3.0, 10.0, 42.0] {
            let x: f32 = x;
            assert!(
                approx_eq(sigmoid(x) + sigmoid(-x), 1.0, 1e-6),
                "sigmoid({x}) + sigmoid(-{x}) != 1"
            );
        }
    }

    #[test]
    fn test_sigmoid_extremes() {
        // Saturation through exp under/overflow is accepted behavior.
        assert_eq!(sigmoid(100.0), 1.0);
        assert_eq!(sigmoid(-100.0), 0.0);
        assert!(sigmoid(10.0) < 1.0);
        assert!(sigmoid(-10.0) > 0.0);
    }

    #[test]
    fn test_nan_propagates() {
        assert!(tanh(f32::NAN).is_nan());
        assert!(sigmoid(f32::NAN).is_nan());
        assert_eq!(tanh(f32::INFINITY), 1.0);
        assert_eq!(tanh(f32::NEG_INFINITY), -1.0);
    }
}
