//! Valid/ready handshake collector.
//!
//! **Streaming** (Idle → InputAsserted → WaitOutput), once per cycle:
//! 1. If a vector is pending and the model asserts `in_ready`, assert
//!    `in_valid` and drive the vector; otherwise deassert `in_valid`.
//! 2. Assert `out_ready`; the harness never throttles the output side.
//! 3. Advance the clock.
//! 4. If the model asserts `out_valid`, read the result and pair it with the
//!    oldest issued vector not yet collected.
//!
//! Pairing is positional: the unit must return results in issue order.
//!
//! **Strict** issues one vector and drains it before the next: spin until
//! `in_ready`, hold `in_valid` for one cycle, then spin until `out_valid`.
//! Slower, but nothing is ever in flight across vectors.
//!
//! Every spin is bounded by the harness handshake budget. A wait that makes no
//! progress for that many consecutive cycles fails with
//! [`HarnessError::HandshakeTimeout`] instead of hanging.

use std::collections::VecDeque;

use tracing::{debug, warn};

use super::{CollectSummary, CollectedPair, Collector, PairSink};
use crate::common::bits::float_of;
use crate::common::{HandshakeSignal, HarnessError};
use crate::model::HandshakeModel;
use crate::sim::Harness;
use crate::stimulus::StimulusVector;

/// Issue policy of the handshake collector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandshakeMode {
    /// Issue whenever the unit is ready; many vectors may be in flight.
    #[default]
    Streaming,
    /// Issue one vector and wait for its result before the next.
    Strict,
}

/// Collector for valid/ready units.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HandshakeCollector {
    mode: HandshakeMode,
}

impl HandshakeCollector {
    /// Creates a collector with the given issue policy.
    pub const fn new(mode: HandshakeMode) -> Self {
        Self { mode }
    }

    /// Issue policy of this collector.
    pub const fn mode(&self) -> HandshakeMode {
        self.mode
    }
}

impl<M: HandshakeModel> Collector<M> for HandshakeCollector {
    fn collect<I, S>(
        &mut self,
        harness: &mut Harness<M>,
        stimuli: I,
        sink: &mut S,
    ) -> Result<CollectSummary, HarnessError>
    where
        I: IntoIterator<Item = StimulusVector>,
        S: PairSink + ?Sized,
    {
        let start = harness.cycles();
        harness.model_mut().set_in_valid(false);
        harness.model_mut().set_out_ready(true);

        let (issued, collected) = match self.mode {
            HandshakeMode::Streaming => streaming(harness, stimuli.into_iter(), sink)?,
            HandshakeMode::Strict => strict(harness, stimuli.into_iter(), sink)?,
        };

        debug!(issued, collected, mode = ?self.mode, "handshake collection done");
        Ok(CollectSummary {
            issued,
            collected,
            cycles: harness.cycles() - start,
        })
    }
}

fn streaming<M, I, S>(harness: &mut Harness<M>, mut stimuli: I, sink: &mut S) -> Result<(u64, u64), HarnessError>
where
    M: HandshakeModel,
    I: Iterator<Item = StimulusVector>,
    S: PairSink + ?Sized,
{
    let budget = harness.handshake_timeout();
    let mut pending = stimuli.next();
    let mut in_flight: VecDeque<StimulusVector> = VecDeque::new();
    let mut issued = 0_u64;
    let mut collected = 0_u64;
    let mut idle = 0_u64;

    while pending.is_some() || !in_flight.is_empty() {
        let mut progressed = false;

        let model = harness.model_mut();
        match pending {
            Some(stimulus) if model.in_ready() => {
                model.drive(stimulus.port_bits(), stimulus.rounding_mode().bits());
                model.set_in_valid(true);
                in_flight.push_back(stimulus);
                issued += 1;
                pending = stimuli.next();
                progressed = true;
            }
            _ => model.set_in_valid(false),
        }
        model.set_out_ready(true);

        harness.advance_cycle()?;

        if harness.model().out_valid() {
            let Some(stimulus) = in_flight.pop_front() else {
                warn!(cycle = harness.cycles(), "output-valid with nothing in flight");
                return Err(HarnessError::SpuriousOutput {
                    cycle: harness.cycles(),
                });
            };
            sink.accept(CollectedPair {
                index: collected,
                stimulus,
                hardware: float_of(harness.model().output()),
                cycle: harness.cycles(),
            })?;
            collected += 1;
            progressed = true;
        }

        if progressed {
            idle = 0;
        } else {
            idle += 1;
            if idle >= budget {
                let signal = if in_flight.is_empty() {
                    HandshakeSignal::InputReady
                } else {
                    HandshakeSignal::OutputValid
                };
                return Err(timeout(signal, idle));
            }
        }
    }

    harness.model_mut().set_in_valid(false);
    Ok((issued, collected))
}

fn strict<M, I, S>(harness: &mut Harness<M>, stimuli: I, sink: &mut S) -> Result<(u64, u64), HarnessError>
where
    M: HandshakeModel,
    I: Iterator<Item = StimulusVector>,
    S: PairSink + ?Sized,
{
    let mut issued = 0_u64;
    let mut collected = 0_u64;

    for stimulus in stimuli {
        spin_until(harness, HandshakeSignal::InputReady)?;

        let model = harness.model_mut();
        model.drive(stimulus.port_bits(), stimulus.rounding_mode().bits());
        model.set_in_valid(true);
        harness.advance_cycle()?;
        harness.model_mut().set_in_valid(false);
        issued += 1;

        spin_until(harness, HandshakeSignal::OutputValid)?;

        sink.accept(CollectedPair {
            index: collected,
            stimulus,
            hardware: float_of(harness.model().output()),
            cycle: harness.cycles(),
        })?;
        collected += 1;
    }

    Ok((issued, collected))
}

/// Advances the clock until `signal` is asserted, within the handshake budget.
fn spin_until<M: HandshakeModel>(harness: &mut Harness<M>, signal: HandshakeSignal) -> Result<(), HarnessError> {
    let budget = harness.handshake_timeout();
    let mut waited = 0_u64;
    loop {
        let asserted = match signal {
            HandshakeSignal::InputReady => harness.model().in_ready(),
            HandshakeSignal::OutputValid => harness.model().out_valid(),
        };
        if asserted {
            return Ok(());
        }
        if waited >= budget {
            return Err(timeout(signal, waited));
        }
        harness.advance_cycle()?;
        waited += 1;
    }
}

fn timeout(signal: HandshakeSignal, cycles: u64) -> HarnessError {
    warn!(%signal, cycles, "handshake timeout");
    HarnessError::HandshakeTimeout { signal, cycles }
}
