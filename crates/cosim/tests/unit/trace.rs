//! VCD tracing through the harness.

use std::fs;

use fpcosim_core::collect::{Collector, HandshakeCollector, PipelineCollector};
use fpcosim_core::config::HarnessConfig;
use fpcosim_core::golden::rounding_modes::RoundingMode;
use fpcosim_core::model::{Datapath, FixedLatencyModel, SignalValue, StreamModel};
use fpcosim_core::sim::Harness;
use fpcosim_core::stimulus::StimulusVector;
use fpcosim_core::trace::{TraceSink, VcdWriter};
use fpcosim_core::unit::UnitDescriptor;

use crate::common::harness::init_tracing;

#[test]
fn pipeline_run_writes_a_vcd_file() {
    init_tracing();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("cma.vcd");
    let unit = UnitDescriptor::cma_fp32();

    let model = FixedLatencyModel::new(Datapath::new(unit.op, true), 5);
    let mut harness = Harness::new(model, &HarnessConfig::default())
        .expect("harness")
        .with_trace(Box::new(VcdWriter::create(&path, "cma").expect("create")));
    harness.apply_reset(2).expect("reset");
    let mut pairs = Vec::new();
    let _ = PipelineCollector::for_depth(5)
        .collect(
            &mut harness,
            [StimulusVector::ternary(2.0, 3.0, 1.0, RoundingMode::Rne)],
            &mut pairs,
        )
        .expect("collect");

    // Two dumps per cycle: 2 reset cycles + 5 collection cycles.
    assert_eq!(harness.time(), 14);
    harness.finish().expect("finish");

    let text = fs::read_to_string(&path).expect("read trace");
    assert!(text.starts_with("$timescale"));
    assert!(text.contains("$scope module cma $end"));
    assert!(text.contains("$var wire 32 # io_in_a $end"));
    assert!(text.contains("$enddefinitions $end"));
    // 7.0 reaches the output port.
    assert!(text.contains(&format!("b{:b} '", 7.0_f32.to_bits())));
}

#[test]
fn dropping_the_harness_closes_the_trace() {
    init_tracing();
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("mul.vcd");
    let unit = UnitDescriptor::mul_fp32();

    {
        let model = StreamModel::new(Datapath::new(unit.op, false), 2, 2);
        let mut harness = Harness::new(model, &HarnessConfig::default())
            .expect("harness")
            .with_trace(Box::new(VcdWriter::create(&path, "mul").expect("create")));
        harness.apply_reset(1).expect("reset");
        let mut pairs = Vec::new();
        let _ = HandshakeCollector::default()
            .collect(
                &mut harness,
                [StimulusVector::binary(1.0, 2.0, RoundingMode::Rne)],
                &mut pairs,
            )
            .expect("collect");
    }

    let text = fs::read_to_string(&path).expect("read trace");
    assert!(text.contains("io_out_valid"));
    assert!(text.lines().any(|l| l == "#1"));
}

#[test]
fn writer_emits_only_changes() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("top.vcd");
    let mut writer = VcdWriter::create(&path, "top").expect("create");
    let a = [SignalValue::bit("clock", false), SignalValue::bus("data", 4, 0b1010)];
    let b = [SignalValue::bit("clock", true), SignalValue::bus("data", 4, 0b1010)];
    writer.dump(0, &a).expect("dump");
    writer.dump(1, &b).expect("dump");
    writer.dump(2, &b).expect("dump");
    writer.close().expect("close");
    writer.dump(3, &a).expect("dump after close is ignored");
    writer.close().expect("second close is a no-op");

    let text = fs::read_to_string(&path).expect("read trace");
    assert!(text.contains("$var wire 1 ! clock $end"));
    assert!(text.contains("$var wire 4 \" data $end"));
    let body: Vec<&str> = text
        .lines()
        .skip_while(|l| *l != "$enddefinitions $end")
        .skip(1)
        .collect();
    assert_eq!(body, ["#0", "$dumpvars", "0!", "b1010 \"", "$end", "#1", "1!"]);
}

#[test]
fn zero_bus_is_written_as_a_single_bit() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("zero.vcd");
    let mut writer = VcdWriter::create(&path, "top").expect("create");
    writer.dump(0, &[SignalValue::bus("data", 32, 0)]).expect("dump");
    writer.dump(1, &[SignalValue::bus("data", 32, 1 << 31)]).expect("dump");
    writer.close().expect("close");

    let text = fs::read_to_string(&path).expect("read trace");
    assert!(text.lines().any(|l| l == "b0 !"));
    assert!(text.lines().any(|l| l == format!("b1{} !", "0".repeat(31))));
}
