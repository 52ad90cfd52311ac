//! Order-key bijection properties.
//!
//! The exhaustive sweep relies on two facts: the key map is a bijection on all
//! 2^32 bit patterns, and it is monotone on every non-NaN value.

use fpcosim_core::common::bits::{bits_from_order_key, bits_of, float_of, order_key, order_key_of};
use proptest::prelude::*;

fn non_nan() -> impl Strategy<Value = f32> {
    any::<u32>().prop_map(float_of).prop_filter("not NaN", |f| !f.is_nan())
}

proptest! {
    #[test]
    fn key_round_trips(bits in any::<u32>()) {
        prop_assert_eq!(bits_from_order_key(order_key(bits)), bits);
    }

    #[test]
    fn inverse_round_trips(key in any::<u32>()) {
        prop_assert_eq!(order_key(bits_from_order_key(key)), key);
    }

    #[test]
    fn bit_cast_round_trips(bits in any::<u32>()) {
        prop_assert_eq!(bits_of(float_of(bits)), bits);
    }

    #[test]
    fn key_preserves_order(a in non_nan(), b in non_nan()) {
        if a < b {
            prop_assert!(order_key_of(a) < order_key_of(b));
        }
        if order_key_of(a) < order_key_of(b) {
            prop_assert!(a <= b);
        }
    }

    #[test]
    fn key_matches_total_order(a in non_nan(), b in non_nan()) {
        prop_assert_eq!(order_key_of(a).cmp(&order_key_of(b)), a.total_cmp(&b));
    }
}

#[test]
fn order_crosses_the_sign_boundary() {
    let ladder = [
        f32::NEG_INFINITY,
        -f32::MAX,
        -1.0,
        -f32::MIN_POSITIVE,
        -float_of(1),
        -0.0,
        0.0,
        float_of(1),
        f32::MIN_POSITIVE,
        1.0,
        f32::MAX,
        f32::INFINITY,
    ];
    for pair in ladder.windows(2) {
        assert!(
            order_key_of(pair[0]) < order_key_of(pair[1]),
            "{} !< {}",
            pair[0],
            pair[1]
        );
    }
}

#[test]
fn zeros_and_smallest_subnormals_are_neighbours() {
    assert_eq!(order_key_of(-float_of(1)) + 1, order_key_of(-0.0));
    assert_eq!(order_key_of(-0.0) + 1, order_key_of(0.0));
    assert_eq!(order_key_of(0.0) + 1, order_key_of(float_of(1)));
}
