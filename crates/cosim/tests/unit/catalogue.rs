//! Unit catalogue and descriptors.

use fpcosim_core::HarnessError;
use fpcosim_core::unit::{APPROX_THRESHOLD, EXACT_THRESHOLD, TimingDiscipline, UnitDescriptor, UnitOp};
use rstest::rstest;

#[rstest]
#[case("cma", UnitOp::MulAdd, 3, true, Some(4), EXACT_THRESHOLD)]
#[case("exp-main", UnitOp::Exp, 1, true, Some(17), APPROX_THRESHOLD)]
#[case("exp", UnitOp::Exp, 1, true, None, APPROX_THRESHOLD)]
#[case("mul", UnitOp::Mul, 2, false, None, EXACT_THRESHOLD)]
fn catalogue(
    #[case] name: &str,
    #[case] op: UnitOp,
    #[case] arity: usize,
    #[case] has_rm: bool,
    #[case] offset: Option<u32>,
    #[case] threshold: f64,
) {
    let unit = UnitDescriptor::by_name(name).expect("built-in unit");
    assert_eq!(unit.name, name);
    assert_eq!(unit.op, op);
    assert_eq!(unit.arity(), arity);
    assert_eq!(unit.has_rounding_mode, has_rm);
    assert_eq!(unit.collect_offset(), offset);
    assert_eq!(unit.threshold, threshold);
    unit.validate().expect("valid");
}

#[test]
fn catalogue_names_resolve() {
    for name in UnitDescriptor::CATALOGUE {
        assert!(UnitDescriptor::by_name(name).is_some(), "{name}");
    }
    assert!(UnitDescriptor::by_name("div").is_none());
}

#[test]
fn zero_depth_is_invalid() {
    let unit = UnitDescriptor {
        timing: TimingDiscipline::FixedLatency { depth: 0 },
        ..UnitDescriptor::cma_fp32()
    };
    assert!(matches!(unit.validate(), Err(HarnessError::Config(_))));
}

#[test]
fn reversed_random_range_is_invalid() {
    let unit = UnitDescriptor {
        random_range: (1.0, -1.0),
        ..UnitDescriptor::mul_fp32()
    };
    assert!(matches!(unit.validate(), Err(HarnessError::InvalidRange { .. })));
}

#[test]
fn descriptor_from_json() {
    let unit: UnitDescriptor = serde_json::from_str(
        r#"{
            "name": "fma-fast",
            "op": "mul_add",
            "has_rounding_mode": true,
            "timing": { "fixed_latency": { "depth": 3 } },
            "threshold": 1e-6,
            "random_range": [-1.0, 1.0]
        }"#,
    )
    .expect("parse");
    assert_eq!(unit.collect_offset(), Some(2));
    assert_eq!(unit.sweep_range, None);
}
