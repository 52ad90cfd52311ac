use fpcosim_core::model::{CycleModel, HandshakeModel, SignalValue};
use mockall::mock;

mock! {
    pub Unit {}
    impl CycleModel for Unit {
        fn set_clock(&mut self, level: bool);
        fn set_reset(&mut self, level: bool);
        fn eval(&mut self);
        fn drive(&mut self, operands: [u32; 3], rm: u8);
        fn output(&self) -> u32;
        fn probe(&self, signals: &mut Vec<SignalValue>);
    }
    impl HandshakeModel for Unit {
        fn set_in_valid(&mut self, level: bool);
        fn in_ready(&self) -> bool;
        fn set_out_ready(&mut self, level: bool);
        fn out_valid(&self) -> bool;
    }
}

/// A unit whose handshake outputs are stuck at the given levels.
///
/// Every input write is accepted and ignored; the result port reads `output`.
pub fn stuck_unit(in_ready: bool, out_valid: bool, output: u32) -> MockUnit {
    let mut unit = MockUnit::new();
    let _ = unit.expect_set_clock().return_const(());
    let _ = unit.expect_set_reset().return_const(());
    let _ = unit.expect_eval().return_const(());
    let _ = unit.expect_drive().return_const(());
    let _ = unit.expect_probe().return_const(());
    let _ = unit.expect_set_in_valid().return_const(());
    let _ = unit.expect_set_out_ready().return_const(());
    let _ = unit.expect_output().return_const(output);
    let _ = unit.expect_in_ready().return_const(in_ready);
    let _ = unit.expect_out_valid().return_const(out_valid);
    unit
}
