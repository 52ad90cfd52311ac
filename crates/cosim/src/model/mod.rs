//! Cycle-accurate model interface and behavioral reference models.
//!
//! The unit under test is an external cycle-accurate model. The harness only
//! needs a narrow view of it:
//! 1. **[`CycleModel`]:** clock, synchronous reset, data ports and the evaluate operation.
//! 2. **[`HandshakeModel`]:** the four valid/ready signals of a streaming unit.
//!
//! Signal writes take effect on the next [`CycleModel::eval`]; reads return the
//! values computed by the last evaluation.
//!
//! The submodules provide behavioral models of both disciplines so the
//! harness can run without a generated RTL model:
//! - [`datapath`]: the arithmetic a unit performs.
//! - [`pipeline`]: a fixed-latency register pipeline.
//! - [`stream`]: a valid/ready unit with latency, capacity and back-pressure.

/// Arithmetic of the behavioral unit models.
pub mod datapath;

/// Fixed-latency pipeline model.
pub mod pipeline;

/// Valid/ready streaming model.
pub mod stream;

pub use datapath::Datapath;
pub use pipeline::FixedLatencyModel;
pub use stream::{BackPressure, StreamModel};

/// A named port value captured for waveform tracing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SignalValue {
    /// Port name.
    pub name: &'static str,
    /// Port width in bits (1..=64).
    pub width: u8,
    /// Current value, zero-extended.
    pub value: u64,
}

impl SignalValue {
    /// Single-bit signal.
    pub const fn bit(name: &'static str, level: bool) -> Self {
        Self {
            name,
            width: 1,
            value: level as u64,
        }
    }

    /// Multi-bit bus.
    pub const fn bus(name: &'static str, width: u8, value: u64) -> Self {
        Self { name, width, value }
    }
}

/// Clocked hardware model with a clock, a synchronous reset and data ports.
pub trait CycleModel {
    /// Drives the clock input.
    fn set_clock(&mut self, level: bool);

    /// Drives the synchronous reset input.
    fn set_reset(&mut self, level: bool);

    /// Re-evaluates the model after input changes.
    fn eval(&mut self);

    /// Drives the operand ports and the rounding-mode port.
    ///
    /// Units without a rounding-mode port ignore `rm`; unused operand slots are
    /// ignored by units of lower arity.
    fn drive(&mut self, operands: [u32; 3], rm: u8);

    /// Reads the result port.
    fn output(&self) -> u32;

    /// Appends the current port values for tracing.
    fn probe(&self, _signals: &mut Vec<SignalValue>) {}
}

/// Streaming model with valid/ready handshakes on input and output.
///
/// A transfer happens on a rising clock edge where both valid and ready are high.
pub trait HandshakeModel: CycleModel {
    /// Drives `in_valid`.
    fn set_in_valid(&mut self, level: bool);

    /// Reads `in_ready`.
    fn in_ready(&self) -> bool;

    /// Drives `out_ready`.
    fn set_out_ready(&mut self, level: bool);

    /// Reads `out_valid`.
    fn out_valid(&self) -> bool;
}
