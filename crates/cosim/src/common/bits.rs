//! Binary32 bit casts and the order-preserving key bijection.
//!
//! Hardware ports carry raw 32-bit patterns while the golden model works with
//! `f32` values. The conversion between the two is a plain bit cast ([`bits_of`],
//! [`float_of`]); no arithmetic conversion ever takes place.
//!
//! Exhaustive sweeps walk a floating-point interval with an integer loop. The
//! bijection [`order_key`] maps a bit pattern to a `u32` whose unsigned ordering
//! matches the numeric ordering of the floats:
//!
//! | Input sign | Key                   |
//! |------------|-----------------------|
//! | negative   | `bits ^ 0xFFFF_FFFF`  |
//! | positive   | `bits ^ 0x8000_0000`  |
//!
//! Negative values have their bit patterns descending as the value ascends, so
//! inverting all bits turns them into ascending keys below `0x8000_0000`. Positive
//! values just move above that midpoint. `-0.0` and `+0.0` land on the adjacent
//! keys `0x7FFF_FFFF` and `0x8000_0000`.

/// Sign bit of an IEEE 754 binary32 value.
pub const F32_SIGN_BIT: u32 = 0x8000_0000;

/// Returns the IEEE 754 bit pattern of `f`.
#[inline]
pub const fn bits_of(f: f32) -> u32 {
    f.to_bits()
}

/// Reinterprets a 32-bit pattern as an IEEE 754 binary32 value.
#[inline]
pub const fn float_of(bits: u32) -> f32 {
    f32::from_bits(bits)
}

/// Maps a binary32 bit pattern to its order key.
///
/// For all non-NaN `a`, `b`: `a < b` implies `order_key(a) < order_key(b)`.
///
/// # Arguments
///
/// * `bits` - The binary32 bit pattern.
///
/// # Returns
///
/// The unsigned key whose ordering follows the numeric ordering of `bits`.
#[inline]
pub const fn order_key(bits: u32) -> u32 {
    if bits & F32_SIGN_BIT != 0 {
        bits ^ 0xFFFF_FFFF
    } else {
        bits ^ F32_SIGN_BIT
    }
}

/// Recovers the binary32 bit pattern from an order key.
///
/// Inverse of [`order_key`]: keys at or above `0x8000_0000` are positive values,
/// keys below it are negative values with all bits inverted.
///
/// # Arguments
///
/// * `key` - An order key produced by [`order_key`] or by stepping through a key range.
///
/// # Returns
///
/// The binary32 bit pattern that maps to `key`.
#[inline]
pub const fn bits_from_order_key(key: u32) -> u32 {
    if key & F32_SIGN_BIT != 0 {
        key ^ F32_SIGN_BIT
    } else {
        !key
    }
}

/// Order key of a float value.
#[inline]
pub const fn order_key_of(f: f32) -> u32 {
    order_key(bits_of(f))
}
