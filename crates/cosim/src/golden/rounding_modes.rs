//! Binary32 rounding mode support.
//!
//! The units under test expose a 3-bit rounding-mode port with the usual
//! IEEE 754 encodings:
//!
//! | Value | Mode | Description                             |
//! |-------|------|-----------------------------------------|
//! | 0b000 | RNE  | Round to Nearest, ties to Even          |
//! | 0b001 | RTZ  | Round towards Zero                      |
//! | 0b010 | RDN  | Round Down (towards −∞)                 |
//! | 0b011 | RUP  | Round Up (towards +∞)                   |
//! | 0b100 | RMM  | Round to Nearest, ties to Max Magnitude |
//!
//! Golden values are computed in double precision and narrowed to binary32 by
//! [`round_to_f32`], which honours the selected mode including directed
//! overflow (RTZ never produces an infinity from a finite value).

use serde::Deserialize;

/// Rounding mode encoding driven onto the unit's `rm` port.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
#[repr(u8)]
pub enum RoundingMode {
    /// Round to Nearest, ties to Even (default IEEE mode).
    #[default]
    #[serde(alias = "Rne")]
    Rne = 0b000,
    /// Round towards Zero.
    #[serde(alias = "Rtz")]
    Rtz = 0b001,
    /// Round Down (towards −∞).
    #[serde(alias = "Rdn")]
    Rdn = 0b010,
    /// Round Up (towards +∞).
    #[serde(alias = "Rup")]
    Rup = 0b011,
    /// Round to Nearest, ties to Max Magnitude.
    #[serde(alias = "Rmm")]
    Rmm = 0b100,
}

impl RoundingMode {
    /// Decodes a 3-bit rounding mode field.
    ///
    /// Returns `None` for the reserved encodings (0b101, 0b110) and the dynamic
    /// sentinel (0b111), which have no meaning on a standalone unit.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits & 0x7 {
            0b000 => Some(Self::Rne),
            0b001 => Some(Self::Rtz),
            0b010 => Some(Self::Rdn),
            0b011 => Some(Self::Rup),
            0b100 => Some(Self::Rmm),
            _ => None,
        }
    }

    /// Returns the 3-bit port encoding.
    pub const fn bits(self) -> u8 {
        self as u8
    }
}

/// Returns the next binary32 value towards +∞.
///
/// `+∞` and NaN are returned unchanged; `-0.0` steps to the smallest positive subnormal.
pub fn next_up(f: f32) -> f32 {
    if f.is_nan() || f == f32::INFINITY {
        return f;
    }
    if f == 0.0 {
        return f32::from_bits(1);
    }
    let bits = f.to_bits();
    if f > 0.0 {
        f32::from_bits(bits + 1)
    } else {
        f32::from_bits(bits - 1)
    }
}

/// Returns the next binary32 value towards −∞.
pub fn next_down(f: f32) -> f32 {
    -next_up(-f)
}

/// Narrows a double-precision value to binary32 under `rm`.
///
/// NaN, infinities, zeros and values exactly representable in binary32 are
/// returned as-is (sign preserved). Otherwise the two binary32 neighbours
/// bracketing `x` are found from the round-to-nearest result and the mode
/// picks one of them.
///
/// # Arguments
///
/// * `x`  - The double-precision value to narrow.
/// * `rm` - The rounding mode.
///
/// # Returns
///
/// The binary32 result of rounding `x` once under `rm`.
pub fn round_to_f32(x: f64, rm: RoundingMode) -> f32 {
    round_sum_to_f32(x, 0.0, rm)
}

/// Rounds the exact sum `hi + lo` to binary32 under `rm`.
///
/// `hi` is the double-precision rounding of the sum and `lo` the exact
/// residual (as produced by a two-sum), so `|lo|` is at most half an ulp of
/// `hi`. Only the sign of `lo` matters: it resolves the cases where `hi`
/// itself sits on a binary32 value or exactly halfway between two.
pub fn round_sum_to_f32(hi: f64, lo: f64, rm: RoundingMode) -> f32 {
    let nearest = hi as f32;
    if hi.is_nan() || hi.is_infinite() {
        return nearest;
    }

    let on_grid = f64::from(nearest) == hi;
    if on_grid && lo == 0.0 {
        return nearest;
    }

    let (down, up) = if on_grid {
        if lo > 0.0 {
            (nearest, next_up(nearest))
        } else {
            (next_down(nearest), nearest)
        }
    } else if f64::from(nearest) < hi {
        (nearest, next_up(nearest))
    } else {
        (next_down(nearest), nearest)
    };

    match rm {
        RoundingMode::Rne | RoundingMode::Rmm => {
            if on_grid || hi - f64::from(down) != f64::from(up) - hi {
                return nearest;
            }
            // `hi` is a binary32 midpoint.
            if lo > 0.0 {
                up
            } else if lo < 0.0 {
                down
            } else if rm == RoundingMode::Rne {
                nearest
            } else if hi > 0.0 {
                up
            } else {
                down
            }
        }
        RoundingMode::Rtz => {
            if hi > 0.0 {
                down
            } else {
                up
            }
        }
        RoundingMode::Rdn => down,
        RoundingMode::Rup => up,
    }
}
