//! Stimulus generation and exhaustive sweeps.

use fpcosim_core::HarnessError;
use fpcosim_core::common::bits::{bits_from_order_key, order_key, order_key_of};
use fpcosim_core::golden::rounding_modes::RoundingMode;
use fpcosim_core::stimulus::{ExhaustiveSweep, RandomStimulus, StimulusVector, special_values, special_vectors};
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const RNE: RoundingMode = RoundingMode::Rne;

/// Lowest and highest non-NaN order keys (-inf and +inf).
const KEY_MIN: u32 = 0x007F_FFFF;
const KEY_MAX: u32 = 0xFF80_0000;

proptest! {
    #[test]
    fn sweep_visits_every_key_once_in_order(start in KEY_MIN..KEY_MAX - 300, len in 0_u32..300) {
        let lo = bits_from_order_key(start);
        let hi = bits_from_order_key(start + len);
        let sweep = ExhaustiveSweep::from_bits(lo, hi, 1, RNE).expect("valid range");

        prop_assert_eq!(sweep.len(), u64::from(len) + 1);

        let values: Vec<f32> = sweep.vectors().map(|v| v.operands()[0]).collect();
        prop_assert_eq!(values.len() as u64, sweep.len());
        prop_assert_eq!(values[0].to_bits(), lo);
        prop_assert_eq!(values[values.len() - 1].to_bits(), hi);
        for pair in values.windows(2) {
            prop_assert_eq!(order_key_of(pair[0]) + 1, order_key_of(pair[1]));
            prop_assert!(pair[0].total_cmp(&pair[1]).is_lt());
        }
    }
}

#[test]
fn sweep_through_zero_visits_both_zeros() {
    let tiny = f32::from_bits(2);
    let sweep = ExhaustiveSweep::new(-tiny, tiny, 1, RNE).expect("valid range");
    let bits: Vec<u32> = sweep.vectors().map(|v| v.operands()[0].to_bits()).collect();
    assert_eq!(bits, [0x8000_0002, 0x8000_0001, 0x8000_0000, 0x0000_0000, 0x0000_0001, 0x0000_0002]);
}

#[test]
fn default_exp_sweep_size() {
    let sweep = ExhaustiveSweep::from_bits(0xC2AE_999A, 0x42B1_6666, 1, RNE).expect("valid range");
    assert_eq!(
        sweep.len(),
        u64::from(order_key(0x42B1_6666)) - u64::from(order_key(0xC2AE_999A)) + 1
    );
    assert_eq!(sweep.vectors().next().map(|v| v.operands()[0]), Some(-87.3));
}

#[test]
fn whole_non_nan_range_size() {
    let sweep = ExhaustiveSweep::new(f32::NEG_INFINITY, f32::INFINITY, 1, RNE).expect("valid range");
    // 2^32 patterns minus 2 * (2^23 - 1) NaNs.
    assert_eq!(sweep.len(), (1_u64 << 32) - 2 * ((1 << 23) - 1));
}

#[test]
fn single_value_sweep() {
    let sweep = ExhaustiveSweep::new(1.0, 1.0, 2, RNE).expect("valid range").with_fixed(3.0, 0.0);
    let vectors: Vec<StimulusVector> = sweep.vectors().collect();
    assert_eq!(vectors, [StimulusVector::binary(1.0, 3.0, RNE)]);
}

#[test]
fn invalid_sweep_ranges() {
    assert!(matches!(
        ExhaustiveSweep::new(2.0, 1.0, 1, RNE),
        Err(HarnessError::InvalidRange { .. })
    ));
    assert!(matches!(
        ExhaustiveSweep::new(f32::NAN, 1.0, 1, RNE),
        Err(HarnessError::InvalidRange { .. })
    ));
    assert!(matches!(ExhaustiveSweep::new(0.0, 1.0, 4, RNE), Err(HarnessError::Config(_))));
}

#[test]
fn positive_to_negative_zero_is_reversed() {
    // Numerically equal, but -0.0 sorts below +0.0.
    assert!(matches!(
        ExhaustiveSweep::new(0.0, -0.0, 1, RNE),
        Err(HarnessError::InvalidRange { .. })
    ));
    assert!(matches!(
        ExhaustiveSweep::from_bits(0x0000_0000, 0x8000_0000, 1, RNE),
        Err(HarnessError::InvalidRange { .. })
    ));

    let sweep = ExhaustiveSweep::new(-0.0, 0.0, 1, RNE).expect("valid range");
    assert_eq!(sweep.len(), 2);
    assert_eq!(sweep.vectors().count(), 2);
}

#[test]
fn random_draws_stay_in_range() {
    let mut rng = StdRng::seed_from_u64(7);
    let source = RandomStimulus {
        arity: 3,
        range: (-100.0, 100.0),
        count: 1000,
        rm: RoundingMode::Rtz,
    };
    let vectors = source.generate(&mut rng).expect("generate");
    assert_eq!(vectors.len(), 1000);
    for v in &vectors {
        assert_eq!(v.arity(), 3);
        assert_eq!(v.rounding_mode(), RoundingMode::Rtz);
        assert!(v.operands().iter().all(|x| (-100.0..=100.0).contains(x)));
    }
}

#[test]
fn random_draws_are_seed_deterministic() {
    let source = RandomStimulus {
        arity: 1,
        range: (-87.2, 88.7),
        count: 64,
        rm: RNE,
    };
    let a = source.generate(&mut StdRng::seed_from_u64(1)).expect("generate");
    let b = source.generate(&mut StdRng::seed_from_u64(1)).expect("generate");
    assert_eq!(a, b);
}

#[test]
fn random_rejects_non_finite_bounds() {
    let source = RandomStimulus {
        arity: 1,
        range: (0.0, f32::INFINITY),
        count: 1,
        rm: RNE,
    };
    assert!(matches!(
        source.generate(&mut StdRng::seed_from_u64(0)),
        Err(HarnessError::InvalidRange { .. })
    ));
}

#[test]
fn huge_request_reports_allocation_failure() {
    let source = RandomStimulus {
        arity: 1,
        range: (0.0, 1.0),
        count: usize::MAX,
        rm: RNE,
    };
    assert!(matches!(
        source.generate(&mut StdRng::seed_from_u64(0)),
        Err(HarnessError::Allocation { requested: usize::MAX })
    ));
}

#[test]
fn special_sets() {
    let values = special_values();
    assert_eq!(values.len(), 43);
    assert!(values.iter().any(|x| x.is_nan()));
    assert!(values.iter().any(|x| *x == 0.0 && x.is_sign_negative()));
    assert!(values.contains(&f32::from_bits(1)));

    let vectors = special_vectors(3, RNE).expect("ternary");
    assert_eq!(vectors.len(), 1000);
    assert!(vectors.iter().all(|v| v.arity() == 3));
    assert!(matches!(special_vectors(0, RNE), Err(HarnessError::Config(_))));
}
