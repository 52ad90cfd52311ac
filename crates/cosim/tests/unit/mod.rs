//! # Unit Components
//!
//! Per-module tests for the co-simulation harness, from the bit-level order
//! keys up to whole test phases.

/// Order-key bijection and bit-cast properties.
pub mod bits;

/// Unit catalogue and descriptors.
pub mod catalogue;

/// Golden classification table.
pub mod classify;



/// Configuration loading and validation.
pub mod config;





/// Stimulus generation and exhaustive sweeps.
pub mod stimulus;

/// Waveform tracing.
pub mod trace;
