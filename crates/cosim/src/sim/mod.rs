//! Harness context and clock/reset driving.
//!
//! Provides the single object that owns the model under test, the cycle
//! counter and the optional trace sink for the duration of a run.

/// Harness context: owns the model, the cycle counter and the trace sink.
pub mod harness;

pub use harness::Harness;
