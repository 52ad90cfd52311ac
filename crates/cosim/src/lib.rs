//! Cycle-accurate differential test harness for binary32 floating-point units.
//!
//! This crate drives a cycle-stepped hardware model with stimulus and checks every
//! result it produces against a software golden reference:
//! 1. **Clocking:** A harness context owning the model, the cycle counter and an optional waveform trace.
//! 2. **Stimulus:** Uniform random vectors, special values, and exhaustive order-key sweeps.
//! 3. **Collection:** Fixed-latency pipeline and valid/ready handshake collectors that pair outputs with inputs.
//! 4. **Checking:** Golden evaluation under the unit's rounding mode, relative-error classification, statistics.
//! 5. **Reporting:** Fixed-width detail rows and the pass/fail summary.

/// Bit-level float helpers and the harness error type.
pub mod common;
/// Harness configuration (defaults, JSON loading, validation).
pub mod config;
/// Unit operation descriptors and the built-in unit catalogue.
pub mod unit;
/// Golden reference evaluation and rounding-mode support.
pub mod golden;
/// Stimulus vectors and generators.
pub mod stimulus;
/// Cycle-model port traits and behavioral reference models.
pub mod model;
/// Waveform trace sinks.
pub mod trace;
/// Harness context: clock and reset driving.
pub mod sim;
/// Response collectors for the two timing disciplines.
pub mod collect;
/// Error classification and the scoring sink.
pub mod check;
/// Per-run pass/fail statistics.
pub mod stats;
/// Console report formatting.
pub mod report;
/// Test phase orchestration.
pub mod runner;

/// Error type returned by every fallible harness operation.
pub use crate::common::error::HarnessError;
/// Root configuration type; use `HarnessConfig::default()` or load from JSON.
pub use crate::config::HarnessConfig;
/// Harness context owning the model under test.
pub use crate::sim::Harness;
/// Operation descriptor for a unit under test.
pub use crate::unit::UnitDescriptor;
