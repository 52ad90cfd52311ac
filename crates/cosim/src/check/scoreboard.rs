//! Scoring sink for collected pairs.

use std::io::Write;

use tracing::debug;

use super::classify::classify;
use crate::collect::{CollectedPair, PairSink};
use crate::common::HarnessError;
use crate::config::{DetailPolicy, InfinitySign};
use crate::golden::evaluate;
use crate::report::Reporter;
use crate::stats::RunStatistics;
use crate::unit::{UnitDescriptor, UnitOp};

/// Evaluates, classifies and records every pair it receives.
///
/// Detail rows go to the borrowed reporter: every comparison under
/// [`DetailPolicy::All`], failures only under [`DetailPolicy::Failures`].
#[derive(Debug)]
pub struct Scoreboard<'r, W: Write> {
    op: UnitOp,
    threshold: f64,
    inf_sign: InfinitySign,
    detail: DetailPolicy,
    stats: RunStatistics,
    reporter: &'r mut Reporter<W>,
}

impl<'r, W: Write> Scoreboard<'r, W> {
    /// Scoreboard for `unit` writing detail rows to `reporter`.
    pub fn new(
        unit: &UnitDescriptor,
        inf_sign: InfinitySign,
        detail: DetailPolicy,
        reporter: &'r mut Reporter<W>,
    ) -> Self {
        Self {
            op: unit.op,
            threshold: unit.threshold,
            inf_sign,
            detail,
            stats: RunStatistics::default(),
            reporter,
        }
    }

    /// Statistics recorded so far.
    pub const fn stats(&self) -> &RunStatistics {
        &self.stats
    }

    /// Ends scoring and returns the statistics.
    pub fn into_stats(self) -> RunStatistics {
        self.stats
    }
}

impl<W: Write> PairSink for Scoreboard<'_, W> {
    fn accept(&mut self, pair: CollectedPair) -> Result<(), HarnessError> {
        let golden = evaluate(self.op, &pair.stimulus);
        let verdict = classify(golden, pair.hardware, self.threshold, self.inf_sign);
        self.stats.record(verdict.passed, verdict.error);

        if !verdict.passed {
            debug!(
                index = pair.index,
                cycle = pair.cycle,
                inputs = ?pair.stimulus.operands(),
                golden,
                hardware = pair.hardware,
                error = verdict.error,
                "mismatch"
            );
        }

        if self.detail == DetailPolicy::All || !verdict.passed {
            self.reporter
                .row(&pair.stimulus, golden, pair.hardware, verdict.error)?;
        }
        Ok(())
    }
}
