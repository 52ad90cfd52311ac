//! Harness: owns the model under test side-by-side with the run state.
//!
//! Everything a run mutates lives here and is passed by `&mut` into the
//! collectors: the model, the global cycle counter, the logical trace time and
//! the trace sink. The sink is closed by [`Harness::finish`] or, on any other
//! exit path, when the harness is dropped.

use tracing::{info, warn};

use crate::common::HarnessError;
use crate::config::HarnessConfig;
use crate::model::{CycleModel, SignalValue};
use crate::trace::TraceSink;

/// Harness context for one unit under test.
pub struct Harness<M: CycleModel> {
    model: M,
    trace: Option<Box<dyn TraceSink>>,
    probe_buf: Vec<SignalValue>,
    cycles: u64,
    time: u64,
    handshake_timeout: u64,
}

impl<M: CycleModel> std::fmt::Debug for Harness<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Harness")
            .field("cycles", &self.cycles)
            .field("time", &self.time)
            .field("tracing", &self.trace.is_some())
            .field("handshake_timeout", &self.handshake_timeout)
            .finish_non_exhaustive()
    }
}

impl<M: CycleModel> Harness<M> {
    /// Wraps `model` with clock and reset deasserted and tracing disabled.
    ///
    /// The handshake budget comes from `config.handshake.timeout_cycles`.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Config`] if `config` fails validation.
    pub fn new(mut model: M, config: &HarnessConfig) -> Result<Self, HarnessError> {
        config.validate()?;
        model.set_clock(false);
        model.set_reset(false);
        Ok(Self {
            model,
            trace: None,
            probe_buf: Vec::new(),
            cycles: 0,
            time: 0,
            handshake_timeout: config.handshake.timeout_cycles,
        })
    }

    /// Attaches a trace sink; every subsequent clock edge is recorded.
    #[must_use]
    pub fn with_trace(mut self, sink: Box<dyn TraceSink>) -> Self {
        self.trace = Some(sink);
        self
    }

    /// Advances the model by one clock period.
    ///
    /// Drives the clock low then high, evaluating the model after each edge.
    /// With tracing enabled each evaluated state is dumped at the current
    /// logical time, which then advances by one unit.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] if the trace sink fails.
    pub fn advance_cycle(&mut self) -> Result<(), HarnessError> {
        for level in [false, true] {
            self.model.set_clock(level);
            self.model.eval();
            self.dump()?;
        }
        self.cycles += 1;
        Ok(())
    }

    /// Holds reset asserted for `n` clock cycles, then deasserts it.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] if the trace sink fails.
    pub fn apply_reset(&mut self, n: u32) -> Result<(), HarnessError> {
        info!(cycles = n, "applying reset");
        self.model.set_reset(true);
        for _ in 0..n {
            self.advance_cycle()?;
        }
        self.model.set_reset(false);
        Ok(())
    }

    /// Clock cycles advanced since construction.
    pub const fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Current logical trace time.
    pub const fn time(&self) -> u64 {
        self.time
    }

    /// Handshake iteration budget in cycles.
    pub const fn handshake_timeout(&self) -> u64 {
        self.handshake_timeout
    }

    /// Shared access to the model.
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the model for driving its ports.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    /// Closes the trace sink and tears the harness down.
    ///
    /// Dropping the harness also closes the sink but can only log a failure;
    /// this reports it.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] if closing the trace fails.
    pub fn finish(mut self) -> Result<(), HarnessError> {
        if let Some(mut sink) = self.trace.take() {
            sink.close()?;
        }
        Ok(())
    }

    fn dump(&mut self) -> Result<(), HarnessError> {
        if let Some(sink) = self.trace.as_mut() {
            self.probe_buf.clear();
            self.model.probe(&mut self.probe_buf);
            sink.dump(self.time, &self.probe_buf)?;
            self.time += 1;
        }
        Ok(())
    }
}

impl<M: CycleModel> Drop for Harness<M> {
    fn drop(&mut self) {
        if let Some(mut sink) = self.trace.take() {
            if let Err(e) = sink.close() {
                warn!(error = %e, "failed to close trace sink");
            }
        }
    }
}
