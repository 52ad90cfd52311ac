//! Response collectors.
//!
//! A collector drives stimulus into the model under one timing discipline and
//! pairs every output it observes with the stimulus that produced it:
//! - [`PipelineCollector`]: fixed-latency units, one input per cycle, output read `D` iterations later.
//! - [`HandshakeCollector`]: valid/ready units, issue on `in_ready`, collect on `out_valid`.
//!
//! Both keep the issued-but-not-collected vectors in a FIFO and pop its head
//! for every collected output, so the `i`-th pair always holds the `i`-th
//! issued vector. Stimulus is consumed from an iterator, which lets an
//! exhaustive sweep stream billions of vectors without buffering them.

/// Valid/ready handshake collector.
pub mod handshake;

/// Fixed-latency pipeline collector.
pub mod pipeline;

pub use handshake::{HandshakeCollector, HandshakeMode};
pub use pipeline::PipelineCollector;

use crate::common::HarnessError;
use crate::model::CycleModel;
use crate::sim::Harness;
use crate::stimulus::StimulusVector;

/// A hardware result paired with the stimulus that produced it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollectedPair {
    /// Issue-order index of the stimulus.
    pub index: u64,
    /// The stimulus vector.
    pub stimulus: StimulusVector,
    /// Result read from the output port.
    pub hardware: f32,
    /// Global cycle count at which the result was read.
    pub cycle: u64,
}

/// Consumer of collected pairs.
pub trait PairSink {
    /// Accepts the next pair in issue order.
    ///
    /// # Errors
    ///
    /// Returns any error that should abort the run (e.g. report I/O).
    fn accept(&mut self, pair: CollectedPair) -> Result<(), HarnessError>;
}

impl PairSink for Vec<CollectedPair> {
    fn accept(&mut self, pair: CollectedPair) -> Result<(), HarnessError> {
        self.push(pair);
        Ok(())
    }
}

/// Counts reported by a finished collection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CollectSummary {
    /// Vectors driven into the model.
    pub issued: u64,
    /// Outputs read and paired.
    pub collected: u64,
    /// Clock cycles the collection consumed.
    pub cycles: u64,
}

/// Drives stimulus through a model and pairs the outputs.
pub trait Collector<M: CycleModel> {
    /// Issues every vector of `stimuli` and forwards each pair to `sink`.
    ///
    /// Returns once every issued vector has been collected.
    ///
    /// # Errors
    ///
    /// Returns protocol errors detected by the collector and any error from
    /// `sink` or the harness.
    fn collect<I, S>(
        &mut self,
        harness: &mut Harness<M>,
        stimuli: I,
        sink: &mut S,
    ) -> Result<CollectSummary, HarnessError>
    where
        I: IntoIterator<Item = StimulusVector>,
        S: PairSink + ?Sized;
}
