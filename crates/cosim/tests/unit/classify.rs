//! Classification table.

use fpcosim_core::check::{MatchKind, classify};
use fpcosim_core::config::InfinitySign;
use rstest::rstest;

#[rstest]
#[case::both_nan(f32::NAN, f32::NAN, 1e-6, true, 0.0)]
#[case::nan_payloads_differ(f32::NAN, f32::from_bits(0xFFC0_0001), 1e-6, true, 0.0)]
#[case::both_pos_inf(f32::INFINITY, f32::INFINITY, 1e-6, true, 0.0)]
#[case::both_neg_inf(f32::NEG_INFINITY, f32::NEG_INFINITY, 1e-6, true, 0.0)]
#[case::both_zero(0.0, 0.0, 1e-6, true, 0.0)]
#[case::signed_zeros(-0.0, 0.0, 1e-6, true, 0.0)]
#[case::exact(7.0, 7.0, 1e-6, true, 0.0)]
#[case::golden_nan(f32::NAN, 1.0, 1e-4, false, f64::INFINITY)]
#[case::hardware_nan(1.0, f32::NAN, 1e-4, false, f64::INFINITY)]
fn special_table(
    #[case] golden: f32,
    #[case] hardware: f32,
    #[case] threshold: f64,
    #[case] passed: bool,
    #[case] error: f64,
) {
    let v = classify(golden, hardware, threshold, InfinitySign::Strict);
    assert_eq!(v.passed, passed);
    assert_eq!(v.error, error);
}

#[rstest]
#[case(1e-6, true)]
#[case(1e-7, false)]
fn near_one_depends_on_threshold(#[case] threshold: f64, #[case] passed: bool) {
    let v = classify(1.0, 1.0 + 2e-7, threshold, InfinitySign::Strict);
    assert_eq!(v.kind, MatchKind::Relative);
    assert_eq!(v.passed, passed);
    assert!(v.error > 1e-7 && v.error < 1e-6, "error {}", v.error);
}

#[test]
fn error_equal_to_threshold_fails() {
    // |1.5 - 1.0| / 1.0 == 0.5 exactly.
    let v = classify(1.0, 1.5, 0.5, InfinitySign::Strict);
    assert_eq!(v.error, 0.5);
    assert!(!v.passed);
}

#[test]
fn zero_operands_use_absolute_error() {
    let v = classify(0.0, 1e-7, 1e-6, InfinitySign::Strict);
    assert!(v.passed);
    assert!((v.error - f64::from(1e-7_f32)).abs() < 1e-20);

    let v = classify(1e-3, 0.0, 1e-6, InfinitySign::Strict);
    assert!(!v.passed);
    assert!((v.error - f64::from(1e-3_f32)).abs() < 1e-15);
}

#[test]
fn relative_error_scales_by_golden() {
    let v = classify(1000.0, 1001.0, 1e-2, InfinitySign::Strict);
    assert!((v.error - 1e-3).abs() < 1e-12);
    assert!(v.passed);
}

#[rstest]
#[case::strict(InfinitySign::Strict, false, MatchKind::SpecialMismatch)]
#[case::ignore(InfinitySign::Ignore, true, MatchKind::SpecialMatch)]
fn opposite_infinities_follow_policy(#[case] policy: InfinitySign, #[case] passed: bool, #[case] kind: MatchKind) {
    let v = classify(f32::INFINITY, f32::NEG_INFINITY, 1e-4, policy);
    assert_eq!(v.passed, passed);
    assert_eq!(v.kind, kind);
}

#[test]
fn infinity_against_finite_fails_under_both_policies() {
    for policy in [InfinitySign::Strict, InfinitySign::Ignore] {
        let v = classify(f32::INFINITY, f32::MAX, 1e-4, policy);
        assert!(!v.passed);
        assert!(v.error.is_infinite());
    }
}
