//! Valid/ready streaming model.
//!
//! A unit with handshakes on both sides. All outputs are registered: they are
//! recomputed on the rising clock edge and stay stable until the next one.
//! On each rising edge, in order:
//! 1. **Output transfer:** if `out_valid && out_ready`, the head result is retired.
//! 2. **Input transfer:** if `in_valid && in_ready`, the operands are accepted and
//!    their result becomes visible `latency` edges later.
//! 3. **Registers:** `out_valid`, `out_bits` and `in_ready` are updated.
//!
//! `in_ready` is low while `capacity` results are in flight and during the
//! stall windows of the configured [`BackPressure`]. Results leave strictly in
//! acceptance order.

use std::collections::VecDeque;

use super::datapath::Datapath;
use super::{CycleModel, HandshakeModel, SignalValue};

/// Periodic input back-pressure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BackPressure {
    /// `in_ready` depends only on capacity.
    #[default]
    None,
    /// `in_ready` is forced low for `stall` cycles out of every `period`.
    Periodic {
        /// Length of the repeating window in cycles.
        period: u64,
        /// Stalled cycles at the start of each window.
        stall: u64,
    },
}

impl BackPressure {
    const fn stalls(self, cycle: u64) -> bool {
        match self {
            Self::None => false,
            Self::Periodic { period, stall } => period != 0 && cycle % period < stall,
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct InFlight {
    visible_at: u64,
    bits: u32,
}

/// Behavioral model of a valid/ready unit.
#[derive(Clone, Debug)]
pub struct StreamModel {
    datapath: Datapath,
    latency: u64,
    capacity: usize,
    back_pressure: BackPressure,

    clock: bool,
    last_clock: bool,
    reset: bool,
    in_valid: bool,
    in_bits: [u32; 3],
    rm: u8,
    out_ready: bool,

    in_ready: bool,
    out_valid: bool,
    out_bits: u32,

    now: u64,
    queue: VecDeque<InFlight>,
    accepted: u64,
    retired: u64,
}

impl StreamModel {
    /// Creates a unit whose results appear `latency` edges (at least one) after acceptance
    /// and which holds at most `capacity` (at least one) results in flight.
    pub fn new(datapath: Datapath, latency: u64, capacity: usize) -> Self {
        Self {
            datapath,
            latency: latency.max(1),
            capacity: capacity.max(1),
            back_pressure: BackPressure::None,
            clock: false,
            last_clock: false,
            reset: false,
            in_valid: false,
            in_bits: [0; 3],
            rm: 0,
            out_ready: false,
            in_ready: false,
            out_valid: false,
            out_bits: 0,
            now: 0,
            queue: VecDeque::new(),
            accepted: 0,
            retired: 0,
        }
    }

    /// Applies periodic input back-pressure.
    #[must_use]
    pub const fn with_back_pressure(mut self, back_pressure: BackPressure) -> Self {
        self.back_pressure = back_pressure;
        self
    }

    /// Inputs accepted since the last reset.
    pub const fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Results retired through the output handshake since the last reset.
    pub const fn retired(&self) -> u64 {
        self.retired
    }

    /// Results currently held inside the unit.
    pub fn in_flight(&self) -> usize {
        self.queue.len()
    }

    fn rising_edge(&mut self) {
        if self.reset {
            self.queue.clear();
            self.now = 0;
            self.accepted = 0;
            self.retired = 0;
            self.in_ready = false;
            self.out_valid = false;
            self.out_bits = 0;
            return;
        }

        if self.out_valid && self.out_ready {
            let _ = self.queue.pop_front();
            self.retired += 1;
        }
        if self.in_valid && self.in_ready {
            self.queue.push_back(InFlight {
                visible_at: self.now + self.latency,
                bits: self.datapath.compute(self.in_bits, self.rm),
            });
            self.accepted += 1;
        }
        self.now += 1;

        match self.queue.front() {
            Some(head) if head.visible_at <= self.now => {
                self.out_valid = true;
                self.out_bits = head.bits;
            }
            _ => self.out_valid = false,
        }
        self.in_ready = self.queue.len() < self.capacity && !self.back_pressure.stalls(self.now);
    }
}

impl CycleModel for StreamModel {
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
        self.in_bits = operands;
        self.rm = rm;
    }

    fn output(&self) -> u32 {
        self.out_bits
    }

    fn probe(&self, signals: &mut Vec<SignalValue>) {
        signals.push(SignalValue::bit("clock", self.clock));
        signals.push(SignalValue::bit("reset", self.reset));
        signals.push(SignalValue::bit("io_in_valid", self.in_valid));
        signals.push(SignalValue::bit("io_in_ready", self.in_ready));
        signals.push(SignalValue::bus("io_in_bits_in1", 32, u64::from(self.in_bits[0])));
        signals.push(SignalValue::bus("io_in_bits_in2", 32, u64::from(self.in_bits[1])));
        signals.push(SignalValue::bus("io_in_bits_in3", 32, u64::from(self.in_bits[2])));
        signals.push(SignalValue::bus("io_in_bits_rm", 3, u64::from(self.rm)));
        signals.push(SignalValue::bit("io_out_valid", self.out_valid));
        signals.push(SignalValue::bit("io_out_ready", self.out_ready));
        signals.push(SignalValue::bus("io_out_bits_out", 32, u64::from(self.out_bits)));
    }
}

impl HandshakeModel for StreamModel {
    fn set_in_valid(&mut self, level: bool) {
        self.in_valid = level;
    }

    fn in_ready(&self) -> bool {
        self.in_ready
    }

    fn set_out_ready(&mut self, level: bool) {
        self.out_ready = level;
    }

    fn out_valid(&self) -> bool {
        self.out_valid
    }
}
