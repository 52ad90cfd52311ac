//! Fixed-latency pipeline model.
//!
//! A `depth`-stage register pipeline without flow control. On every rising
//! clock edge the first stage captures the datapath result of the current
//! input ports and every other stage captures its predecessor. The output port
//! is the last stage, so a result driven before edge `n` is visible after edge
//! `n + depth - 1`.
//!
//! Reset clears all stages; the output stays zero until the first real result
//! reaches it.

use super::datapath::Datapath;
use super::{CycleModel, SignalValue};

/// Behavioral model of a fixed-latency unit.
#[derive(Clone, Debug)]
pub struct FixedLatencyModel {
    datapath: Datapath,
    stages: Vec<u32>,
    clock: bool,
    last_clock: bool,
    reset: bool,
    operands: [u32; 3],
    rm: u8,
    edges: u64,
}

impl FixedLatencyModel {
    /// Creates a pipeline of `depth` stages (at least one).
    pub fn new(datapath: Datapath, depth: u32) -> Self {
        Self {
            datapath,
            stages: vec![0; depth.max(1) as usize],
            clock: false,
            last_clock: false,
            reset: false,
            operands: [0; 3],
            rm: 0,
            edges: 0,
        }
    }

    /// Number of register stages.
    pub fn depth(&self) -> usize {
        self.stages.len()
    }

    /// Rising clock edges seen since construction.
    pub const fn edges(&self) -> u64 {
        self.edges
    }

    fn rising_edge(&mut self) {
        self.edges += 1;
        if self.reset {
            self.stages.fill(0);
            return;
        }
        self.stages.rotate_right(1);
        self.stages[0] = self.datapath.compute(self.operands, self.rm);
    }
}

impl CycleModel for FixedLatencyModel {
    fn set_clock(&mut self, level: bool) {
        self.clock = level;
    }

    fn set_reset(&mut self, level: bool) {
        self.reset = level;
    }

    fn eval(&mut self) {
        if self.clock && !self.last_clock {
            self.rising_edge();
        }
        self.last_clock = self.clock;
    }

    fn drive(&mut self, operands: [u32; 3], rm: u8) {
        self.operands = operands;
        self.rm = rm;
    }

    fn output(&self) -> u32 {
        self.stages.last().copied().unwrap_or_default()
    }

    fn probe(&self, signals: &mut Vec<SignalValue>) {
        signals.push(SignalValue::bit("clock", self.clock));
        signals.push(SignalValue::bit("reset", self.reset));
        signals.push(SignalValue::bus("io_in_a", 32, u64::from(self.operands[0])));
        signals.push(SignalValue::bus("io_in_b", 32, u64::from(self.operands[1])));
        signals.push(SignalValue::bus("io_in_c", 32, u64::from(self.operands[2])));
        signals.push(SignalValue::bus("io_in_rm", 3, u64::from(self.rm)));
        signals.push(SignalValue::bus("io_out_out", 32, u64::from(self.output())));
    }
}
