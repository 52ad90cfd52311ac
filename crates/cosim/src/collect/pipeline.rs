//! Fixed-latency pipeline collector.
//!
//! Issuing → Draining → Done. For iteration `i` of `0..N + D`:
//! 1. If `i < N`, stimulus `i` is driven onto the input ports (the ports keep
//!    their last value while draining).
//! 2. The clock advances one cycle.
//! 3. If `i >= D`, the output port holds the result of stimulus `i - D`.
//!
//! `D` is the unit's pipeline depth minus one and must be supplied by the
//! caller. The unit has no valid signal, so a wrong depth pairs results with
//! the wrong stimulus without any observable error.

use std::collections::VecDeque;

use tracing::debug;

use super::{CollectSummary, CollectedPair, Collector, PairSink};
use crate::common::bits::float_of;
use crate::common::HarnessError;
use crate::model::CycleModel;
use crate::sim::Harness;
use crate::stimulus::StimulusVector;

/// Collector for units without flow control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PipelineCollector {
    offset: u32,
}

impl PipelineCollector {
    /// Collector for a unit with `depth` register stages (`D = depth - 1`).
    pub const fn for_depth(depth: u32) -> Self {
        Self {
            offset: depth.saturating_sub(1),
        }
    }

    /// Collector reading outputs `offset` iterations after issue.
    pub const fn with_offset(offset: u32) -> Self {
        Self { offset }
    }

    /// Iteration offset `D` between issue and collection.
    pub const fn offset(&self) -> u32 {
        self.offset
    }
}

impl<M: CycleModel> Collector<M> for PipelineCollector {
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
        let offset = u64::from(self.offset);
        let mut in_flight: VecDeque<StimulusVector> = VecDeque::with_capacity(self.offset as usize + 1);
        let mut issued = 0_u64;
        let mut collected = 0_u64;
        let mut iteration = 0_u64;

        // Issuing
        for stimulus in stimuli {
            harness
                .model_mut()
                .drive(stimulus.port_bits(), stimulus.rounding_mode().bits());
            in_flight.push_back(stimulus);
            issued += 1;
            harness.advance_cycle()?;

            if iteration >= offset {
                collect_head(harness, &mut in_flight, &mut collected, sink)?;
            }
            iteration += 1;
        }

        // Draining
        while !in_flight.is_empty() {
            harness.advance_cycle()?;
            if iteration >= offset {
                collect_head(harness, &mut in_flight, &mut collected, sink)?;
            }
            iteration += 1;
        }

        debug!(issued, collected, offset, "pipeline collection done");
        Ok(CollectSummary {
            issued,
            collected,
            cycles: harness.cycles() - start,
        })
    }
}

fn collect_head<M, S>(
    harness: &Harness<M>,
    in_flight: &mut VecDeque<StimulusVector>,
    collected: &mut u64,
    sink: &mut S,
) -> Result<(), HarnessError>
where
    M: CycleModel,
    S: PairSink + ?Sized,
{
    if let Some(stimulus) = in_flight.pop_front() {
        sink.accept(CollectedPair {
            index: *collected,
            stimulus,
            hardware: float_of(harness.model().output()),
            cycle: harness.cycles(),
        })?;
        *collected += 1;
    }
    Ok(())
}
