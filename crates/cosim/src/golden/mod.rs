//! Golden reference evaluation.
//!
//! The golden model computes the trusted binary32 result for a stimulus vector:
//! - **Multiply:** `a * b` is exact in double precision, rounded once to binary32.
//! - **Multiply-add:** `a * b` is exact in double precision; the sum with `c`
//!   is carried as a rounded value plus its exact residual and rounded once
//!   to binary32.
//! - **Exponential:** `e^x` in double precision, rounded to binary32.
//!
//! Narrowing honours the stimulus rounding mode ([`rounding_modes`]). NaN results
//! are canonicalized ([`nan_handling`]); infinities and signed zeros propagate
//! as IEEE 754 prescribes.

/// Canonical NaN propagation.
pub mod nan_handling;

/// Rounding mode definitions and directed narrowing.
pub mod rounding_modes;

use crate::stimulus::StimulusVector;
use crate::unit::UnitOp;

use self::nan_handling::canonicalize_f32;
use self::rounding_modes::{RoundingMode, round_sum_to_f32, round_to_f32};

/// Computes the golden binary32 result of `op` on `stimulus`.
///
/// Pure function: no state, no side effects.
///
/// # Arguments
///
/// * `op`       - The operation of the unit under test.
/// * `stimulus` - The input vector; operands beyond the arity of `op` are ignored.
///
/// # Returns
///
/// The expected binary32 result.
///
/// # Examples
///
/// ```
/// use fpcosim_core::golden::evaluate;
/// use fpcosim_core::golden::rounding_modes::RoundingMode;
/// use fpcosim_core::stimulus::StimulusVector;
/// use fpcosim_core::unit::UnitOp;
///
/// let v = StimulusVector::ternary(2.0, 3.0, 1.0, RoundingMode::Rne);
/// assert_eq!(evaluate(UnitOp::MulAdd, &v), 7.0);
///
/// let e = StimulusVector::unary(f32::INFINITY, RoundingMode::Rne);
/// assert_eq!(evaluate(UnitOp::Exp, &e), f32::INFINITY);
/// ```
pub fn evaluate(op: UnitOp, stimulus: &StimulusVector) -> f32 {
    let [a, b, c] = stimulus.padded().map(f64::from);
    let rm = stimulus.rounding_mode();

    let narrow = match op {
        UnitOp::Mul => round_to_f32(a * b, rm),
        UnitOp::MulAdd => {
            let (hi, lo) = fused_mul_add(a, b, c, rm);
            round_sum_to_f32(hi, lo, rm)
        }
        UnitOp::Exp => round_to_f32(a.exp(), rm),
    };

    canonicalize_f32(narrow)
}

/// Fused `a * b + c` as `(sum, residual)` with `sum + residual` exact.
///
/// Operands are widened binary32 values, so the product is exact and a
/// two-sum recovers what the double-precision addition dropped.
///
/// A sum of opposite-signed operands that is exactly zero is `+0` in every
/// mode except round-down, where it is `-0`. The host computes in RNE, so the
/// RDN case is patched here.
fn fused_mul_add(a: f64, b: f64, c: f64, rm: RoundingMode) -> (f64, f64) {
    let product = a * b;
    let sum = product + c;
    if !sum.is_finite() {
        return (sum, 0.0);
    }

    let c_part = sum - product;
    let residual = (product - (sum - c_part)) + (c - c_part);

    if sum == 0.0 && rm == RoundingMode::Rdn {
        let both_positive_zero = product.to_bits() == 0 && c.to_bits() == 0;
        if !both_positive_zero {
            return (-0.0, 0.0);
        }
    }
    (sum, residual)
}
