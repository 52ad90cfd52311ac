//! Harness error definitions.
//!
//! This module defines the failure taxonomy for a co-simulation run. It provides:
//! 1. **Protocol Violations:** Handshake timeouts and outputs with no stimulus in flight.
//! 2. **Resource Exhaustion:** Stimulus buffer reservation failures.
//! 3. **Setup Errors:** Invalid ranges, invalid configuration, parse and I/O failures.
//!
//! Numeric disagreement between the hardware and the golden model is not an
//! error: it is counted by [`RunStatistics`](crate::stats::RunStatistics) and
//! printed by the reporter.

use std::fmt;
use std::io;

use thiserror::Error;

/// Handshake signal a spin-wait is blocked on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandshakeSignal {
    /// Waiting for the model to accept input (`in_ready`).
    InputReady,
    /// Waiting for the model to produce output (`out_valid`).
    OutputValid,
}

impl fmt::Display for HandshakeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputReady => write!(f, "input-ready"),
            Self::OutputValid => write!(f, "output-valid"),
        }
    }
}

/// Errors raised while driving a unit under test.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A handshake signal stayed deasserted for the whole iteration budget.
    ///
    /// `cycles` is the number of consecutive cycles without progress.
    #[error("handshake timeout: no {signal} after {cycles} cycles")]
    HandshakeTimeout {
        /// Signal the harness was waiting for.
        signal: HandshakeSignal,
        /// Cycles spent waiting.
        cycles: u64,
    },

    /// The model asserted output-valid while no issued stimulus was outstanding.
    #[error("output-valid asserted at cycle {cycle} with no stimulus in flight")]
    SpuriousOutput {
        /// Global cycle count at which the output was observed.
        cycle: u64,
    },

    /// Reserving the stimulus buffer failed.
    #[error("failed to allocate stimulus buffer for {requested} vectors")]
    Allocation {
        /// Number of vectors requested.
        requested: usize,
    },

    /// A stimulus range is empty, reversed, or contains NaN or infinite bounds.
    #[error("invalid stimulus range [{lo:e}, {hi:e}]")]
    InvalidRange {
        /// Lower bound.
        lo: f32,
        /// Upper bound.
        hi: f32,
    },

    /// Configuration is well-formed but semantically invalid.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration text could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),

    /// Trace or report output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
