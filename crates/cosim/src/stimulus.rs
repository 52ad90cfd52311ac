//! Stimulus vectors and generators.
//!
//! This module produces the inputs driven into a unit under test:
//! 1. **Vectors:** [`StimulusVector`], up to three binary32 operands plus a rounding mode.
//! 2. **Random:** [`RandomStimulus`], uniform draws over an inclusive range, eagerly buffered.
//! 3. **Exhaustive:** [`ExhaustiveSweep`], every binary32 value of an interval in increasing order.
//! 4. **Special values:** [`special_vectors`], signed zeros, infinities, NaN and range borders.
//!
//! The exhaustive sweep steps an integer order key (see
//! [`order_key`](crate::common::bits::order_key)) rather than a float, so the
//! loop visits every value, subnormals and both interval ends included, exactly
//! once.

use std::f32::consts::{E, LN_2, LN_10, PI};
use std::ops::RangeInclusive;

use rand::Rng;

use crate::common::bits::{bits_from_order_key, bits_of, float_of, order_key};
use crate::common::HarnessError;
use crate::golden::rounding_modes::RoundingMode;

/// Input vector for one operation of the unit under test.
///
/// Immutable once built. Operands past `arity` are zero and are never driven
/// onto meaningful ports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StimulusVector {
    operands: [f32; 3],
    arity: usize,
    rm: RoundingMode,
}

impl StimulusVector {
    /// One-operand vector (exponential).
    pub const fn unary(x: f32, rm: RoundingMode) -> Self {
        Self {
            operands: [x, 0.0, 0.0],
            arity: 1,
            rm,
        }
    }

    /// Two-operand vector (multiply).
    pub const fn binary(a: f32, b: f32, rm: RoundingMode) -> Self {
        Self {
            operands: [a, b, 0.0],
            arity: 2,
            rm,
        }
    }

    /// Three-operand vector (multiply-add).
    pub const fn ternary(a: f32, b: f32, c: f32, rm: RoundingMode) -> Self {
        Self {
            operands: [a, b, c],
            arity: 3,
            rm,
        }
    }

    /// Builds a vector of the given arity from the leading `operands`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Config`] if `arity` is not 1, 2 or 3.
    pub fn with_arity(arity: usize, operands: [f32; 3], rm: RoundingMode) -> Result<Self, HarnessError> {
        match arity {
            1 => Ok(Self::unary(operands[0], rm)),
            2 => Ok(Self::binary(operands[0], operands[1], rm)),
            3 => Ok(Self::ternary(operands[0], operands[1], operands[2], rm)),
            n => Err(HarnessError::Config(format!("unsupported operand arity {n}"))),
        }
    }

    /// The operands that are meaningful for this vector.
    pub fn operands(&self) -> &[f32] {
        &self.operands[..self.arity]
    }

    /// All three operand slots, unused ones zero.
    pub const fn padded(&self) -> [f32; 3] {
        self.operands
    }

    /// Operand bit patterns as driven onto the input ports.
    pub fn port_bits(&self) -> [u32; 3] {
        self.operands.map(bits_of)
    }

    /// Number of meaningful operands.
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Rounding mode selector.
    pub const fn rounding_mode(&self) -> RoundingMode {
        self.rm
    }
}

/// Uniform random stimulus over an inclusive range.
#[derive(Clone, Debug)]
pub struct RandomStimulus {
    /// Operand count of each vector.
    pub arity: usize,
    /// Inclusive bounds shared by every operand.
    pub range: (f32, f32),
    /// Number of vectors to draw.
    pub count: usize,
    /// Rounding mode applied to every vector.
    pub rm: RoundingMode,
}

impl RandomStimulus {
    /// Draws all vectors into a freshly reserved buffer.
    ///
    /// Reproducible only if `rng` was seeded by the caller.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidRange`] if the bounds are not finite or are
    /// reversed, [`HarnessError::Config`] for an unsupported arity, and
    /// [`HarnessError::Allocation`] if the buffer cannot be reserved.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Vec<StimulusVector>, HarnessError> {
        let (lo, hi) = self.range;
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(HarnessError::InvalidRange { lo, hi });
        }

        let mut vectors = Vec::new();
        vectors
            .try_reserve_exact(self.count)
            .map_err(|_| HarnessError::Allocation {
                requested: self.count,
            })?;

        for _ in 0..self.count {
            let mut operands = [0.0_f32; 3];
            for slot in operands.iter_mut().take(self.arity) {
                *slot = rng.gen_range(lo..=hi);
            }
            vectors.push(StimulusVector::with_arity(self.arity, operands, self.rm)?);
        }
        Ok(vectors)
    }
}

/// Exhaustive enumeration of a closed binary32 interval.
///
/// Sweeps operand A over `[lo, hi]` in strictly increasing numeric order;
/// operands B and C, if the unit has them, are held at fixed values. Both
/// zeros are visited when the interval contains zero (`-0.0` first).
#[derive(Clone, Debug)]
pub struct ExhaustiveSweep {
    keys: RangeInclusive<u32>,
    arity: usize,
    fixed: [f32; 2],
    rm: RoundingMode,
}

impl ExhaustiveSweep {
    /// Creates a sweep over `[lo, hi]`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::InvalidRange`] if either bound is NaN or `lo`
    /// sorts after `hi` (`[+0.0, -0.0]` included), and [`HarnessError::Config`]
    /// for an unsupported arity.
    pub fn new(lo: f32, hi: f32, arity: usize, rm: RoundingMode) -> Result<Self, HarnessError> {
        let (lo_key, hi_key) = (order_key(bits_of(lo)), order_key(bits_of(hi)));
        if lo.is_nan() || hi.is_nan() || lo_key > hi_key {
            return Err(HarnessError::InvalidRange { lo, hi });
        }
        if !(1..=3).contains(&arity) {
            return Err(HarnessError::Config(format!("unsupported operand arity {arity}")));
        }
        Ok(Self {
            keys: lo_key..=hi_key,
            arity,
            fixed: [1.0, 0.0],
            rm,
        })
    }

    /// Creates a sweep from raw bit patterns, e.g. `0xC2AE999A..=0x42B16666`.
    ///
    /// # Errors
    ///
    /// Same as [`ExhaustiveSweep::new`].
    pub fn from_bits(lo: u32, hi: u32, arity: usize, rm: RoundingMode) -> Result<Self, HarnessError> {
        Self::new(float_of(lo), float_of(hi), arity, rm)
    }

    /// Holds operands B and C at the given values.
    #[must_use]
    pub const fn with_fixed(mut self, b: f32, c: f32) -> Self {
        self.fixed = [b, c];
        self
    }

    /// Number of values the sweep visits: `key(hi) - key(lo) + 1`.
    pub fn len(&self) -> u64 {
        u64::from(*self.keys.end()) - u64::from(*self.keys.start()) + 1
    }

    /// A validated sweep always visits at least one value.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Iterates the sweep values as stimulus vectors.
    pub fn vectors(&self) -> impl Iterator<Item = StimulusVector> + '_ {
        self.keys.clone().map(move |key| {
            let x = float_of(bits_from_order_key(key));
            let [b, c] = self.fixed;
            match self.arity {
                1 => StimulusVector::unary(x, self.rm),
                2 => StimulusVector::binary(x, b, self.rm),
                _ => StimulusVector::ternary(x, b, c, self.rm),
            }
        })
    }
}

/// Extended special-value list for one-operand units.
///
/// Covers signed zeros, small integers, the overflow/underflow borders of the
/// exponential (`88.7`, `-87.3` and their neighbours), infinities, NaN,
/// subnormals, `FLT_MIN`/`FLT_MAX` and a handful of mathematical constants.
pub fn special_values() -> Vec<f32> {
    vec![
        // Basic
        0.0,
        -0.0,
        1.0,
        -1.0,
        10.0,
        -10.0,
        50.0,
        -50.0,
        88.699_999,
        88.7,
        88.700_001,
        -87.300_001,
        -87.3,
        -87.299_999,
        100.0,
        -100.0,
        // Extremes
        f32::INFINITY,
        f32::NEG_INFINITY,
        f32::NAN,
        1e-37,
        -1e-37,
        1e38,
        -1e38,
        // Subnormals and boundaries
        1e-45,
        -1e-45,
        f32::MIN_POSITIVE,
        -f32::MIN_POSITIVE,
        f32::MAX,
        -f32::MAX,
        // Constants
        PI,
        -PI,
        E,
        -E,
        LN_2,
        -LN_2,
        LN_10,
        -LN_10,
        // Overflow/underflow neighbourhood
        88.0,
        89.0,
        90.0,
        -87.0,
        -88.0,
        -89.0,
    ]
}

/// Compact special set crossed for multi-operand units.
const CROSS_VALUES: [f32; 10] = [
    0.0,
    -0.0,
    1.0,
    -1.0,
    f32::INFINITY,
    f32::NEG_INFINITY,
    f32::NAN,
    f32::MIN_POSITIVE,
    f32::MAX,
    1e-45,
];

/// Special-value vectors for a unit of the given arity.
///
/// One-operand units get [`special_values`]. Two-operand units get the full
/// cartesian product of a compact special set; three-operand units cross that
/// product with the same set for the addend.
///
/// # Errors
///
/// Returns [`HarnessError::Config`] for an unsupported arity.
pub fn special_vectors(arity: usize, rm: RoundingMode) -> Result<Vec<StimulusVector>, HarnessError> {
    match arity {
        1 => Ok(special_values()
            .into_iter()
            .map(|x| StimulusVector::unary(x, rm))
            .collect()),
        2 => Ok(CROSS_VALUES
            .iter()
            .flat_map(|&a| CROSS_VALUES.iter().map(move |&b| StimulusVector::binary(a, b, rm)))
            .collect()),
        3 => Ok(CROSS_VALUES
            .iter()
            .flat_map(|&a| {
                CROSS_VALUES.iter().flat_map(move |&b| {
                    CROSS_VALUES
                        .iter()
                        .map(move |&c| StimulusVector::ternary(a, b, c, rm))
                })
            })
            .collect()),
        n => Err(HarnessError::Config(format!("unsupported operand arity {n}"))),
    }
}
