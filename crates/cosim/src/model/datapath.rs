//! Arithmetic of the behavioral unit models.
//!
//! Multiply and multiply-add are exactly rounded, so their datapath reuses the
//! golden rounding. The exponential is approximated the way a hardware unit
//! does it: Cody-Waite range reduction `x = k·ln2 + r`, a degree-6 polynomial
//! for `e^r` evaluated in binary32, and a scale by `2^k`. Its relative error is
//! a few binary32 ulps, well inside the `1e-4` tolerance of the exponential
//! unit, but not zero.
//!
//! [`Datapath::with_error_ulps`] skews every finite nonzero result by a fixed
//! number of ulps to model a faulty unit.

use crate::common::bits::{bits_of, float_of};
use crate::golden::evaluate;
use crate::golden::nan_handling::canonicalize_f32;
use crate::golden::rounding_modes::{RoundingMode, next_up};
use crate::stimulus::StimulusVector;
use crate::unit::UnitOp;

/// `ln(2)` split for range reduction: high part with trailing zero bits.
const LN2_HI: f32 = 0.693_145_75;
/// Low part of `ln(2)`.
const LN2_LO: f32 = 1.428_606_8e-6;
/// Inputs above this overflow to +∞.
const EXP_OVERFLOW: f32 = 88.722_84;
/// Inputs below this underflow to +0.
const EXP_UNDERFLOW: f32 = -103.972_08;

/// Arithmetic performed by a behavioral unit model.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Datapath {
    op: UnitOp,
    has_rounding_mode: bool,
    error_ulps: u32,
}

impl Datapath {
    /// Datapath for `op`; `has_rounding_mode` selects whether the `rm` port is honoured.
    pub const fn new(op: UnitOp, has_rounding_mode: bool) -> Self {
        Self {
            op,
            has_rounding_mode,
            error_ulps: 0,
        }
    }

    /// Skews every finite nonzero result `ulps` steps towards +∞.
    #[must_use]
    pub const fn with_error_ulps(mut self, ulps: u32) -> Self {
        self.error_ulps = ulps;
        self
    }

    /// Operation computed by the datapath.
    pub const fn op(&self) -> UnitOp {
        self.op
    }

    /// Computes the result bit pattern for raw port values.
    ///
    /// # Arguments
    ///
    /// * `operands` - Operand bit patterns; slots past the arity are ignored.
    /// * `rm`       - Rounding-mode port value; reserved encodings fall back to RNE.
    ///
    /// # Returns
    ///
    /// The result bit pattern presented on the output port.
    pub fn compute(&self, operands: [u32; 3], rm: u8) -> u32 {
        let rm = if self.has_rounding_mode {
            RoundingMode::from_bits(rm).unwrap_or_default()
        } else {
            RoundingMode::Rne
        };
        let [a, b, c] = operands.map(float_of);

        let result = match self.op {
            UnitOp::Mul => evaluate(self.op, &StimulusVector::binary(a, b, rm)),
            UnitOp::MulAdd => evaluate(self.op, &StimulusVector::ternary(a, b, c, rm)),
            UnitOp::Exp => exp_approx(a),
        };

        bits_of(self.skew(result))
    }

    fn skew(&self, f: f32) -> f32 {
        if !f.is_finite() || f == 0.0 {
            return f;
        }
        (0..self.error_ulps).fold(f, |acc, _| next_up(acc))
    }
}

/// Binary32 exponential by range reduction and polynomial evaluation.
fn exp_approx(x: f32) -> f32 {
    if x.is_nan() {
        return canonicalize_f32(x);
    }
    if x > EXP_OVERFLOW {
        return f32::INFINITY;
    }
    if x < EXP_UNDERFLOW {
        return 0.0;
    }

    let k = (x * std::f32::consts::LOG2_E).round();
    let r = (x - k * LN2_HI) - k * LN2_LO;

    // e^r for |r| <= ln2/2, Horner form of the Taylor series.
    let p = 1.0
        + r * (1.0
            + r * (1.0 / 2.0
                + r * (1.0 / 6.0 + r * (1.0 / 24.0 + r * (1.0 / 120.0 + r * (1.0 / 720.0))))));

    // Split the scale so neither factor overflows or flushes early.
    let k = k as i32;
    let half = k / 2;
    p * pow2(half) * pow2(k - half)
}

/// `2^e` for `e` in the binary32 normal exponent range.
fn pow2(e: i32) -> f32 {
    let biased = (e + 127).clamp(1, 254) as u32;
    float_of(biased << 23)
}
