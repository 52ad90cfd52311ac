//! Test phase orchestration.
//!
//! A phase ties the pieces together for one run:
//! 1. **Stimulus:** Built from the [`Phase`] and the unit descriptor.
//! 2. **Collection:** Driven through the caller's collector into a [`Scoreboard`].
//! 3. **Report:** Header, detail rows, and the summary with the cycles the run consumed.
//!
//! Random phases are seeded from `general.seed` when set and from OS entropy
//! otherwise.

use std::io::Write;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use crate::check::Scoreboard;
use crate::collect::Collector;
use crate::common::HarnessError;
use crate::common::bits::float_of;
use crate::config::{DetailPolicy, HarnessConfig};
use crate::golden::rounding_modes::RoundingMode;
use crate::model::CycleModel;
use crate::report::Reporter;
use crate::sim::Harness;
use crate::stats::RunStatistics;
use crate::stimulus::{ExhaustiveSweep, RandomStimulus, StimulusVector, special_vectors};
use crate::unit::UnitDescriptor;

/// Stimulus source of one test phase.
#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    /// `count` uniform draws over the unit's random range.
    Random {
        /// Number of vectors.
        count: usize,
    },
    /// Every binary32 value of `[lo, hi]` (bit patterns) for operand A.
    Exhaustive {
        /// Lower bound bit pattern.
        lo: u32,
        /// Upper bound bit pattern.
        hi: u32,
        /// Values held on operands B and C.
        fixed: (f32, f32),
    },
    /// The special-value set for the unit's arity.
    Special,
    /// An explicit vector list, issued in order.
    Vectors(Vec<StimulusVector>),
}

impl Phase {
    /// Random phase with the configured vector count.
    pub const fn random(config: &HarnessConfig) -> Self {
        Self::Random {
            count: config.random.count,
        }
    }

    /// Exhaustive phase over the unit's default sweep range.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Config`] if the unit has no default sweep range.
    pub fn default_sweep(unit: &UnitDescriptor) -> Result<Self, HarnessError> {
        let (lo, hi) = unit.sweep_range.ok_or_else(|| {
            HarnessError::Config(format!("unit `{}` has no default sweep range", unit.name))
        })?;
        Ok(Self::Exhaustive {
            lo,
            hi,
            fixed: (1.0, 0.0),
        })
    }

    /// Report heading for this phase.
    pub fn title(&self, unit: &UnitDescriptor) -> String {
        let op = unit.op.mnemonic();
        match self {
            Self::Random { .. } => format!("Random {op} Tests"),
            Self::Exhaustive { lo, hi, .. } => {
                format!("{op} Tests in Range [{:+}, {:+}]", float_of(*lo), float_of(*hi))
            }
            Self::Special => format!("Special {op} Tests (Extended)"),
            Self::Vectors(_) => format!("Directed {op} Tests"),
        }
    }

    /// Detail policy for this phase; special phases print every case.
    fn detail(&self, config: &HarnessConfig) -> DetailPolicy {
        match self {
            Self::Special => DetailPolicy::All,
            _ => config.report.detail,
        }
    }
}

/// Runs one phase and reports it.
///
/// Creates fresh statistics, streams the phase stimulus through `collector`
/// into a scoreboard, and writes the header, detail rows and summary to
/// `reporter`. The returned statistics carry the cycles this phase consumed.
///
/// # Errors
///
/// Returns stimulus construction errors, collector protocol errors and
/// report I/O errors.
pub fn run_phase<M, C, W>(
    harness: &mut Harness<M>,
    collector: &mut C,
    unit: &UnitDescriptor,
    phase: &Phase,
    config: &HarnessConfig,
    reporter: &mut Reporter<W>,
) -> Result<RunStatistics, HarnessError>
where
    M: CycleModel,
    C: Collector<M>,
    W: Write,
{
    let arity = unit.arity();
    let rm = if unit.has_rounding_mode {
        config.rounding_mode
    } else {
        RoundingMode::Rne
    };
    if let Phase::Vectors(vectors) = phase {
        if let Some(v) = vectors.iter().find(|v| v.arity() != arity) {
            return Err(HarnessError::Config(format!(
                "{}-operand vector for {}-operand unit `{}`",
                v.arity(),
                arity,
                unit.name
            )));
        }
    }

    reporter.header(&phase.title(unit), arity)?;
    info!(unit = %unit.name, phase = %phase.title(unit), "phase started");

    let mut scoreboard = Scoreboard::new(unit, config.report.infinity_sign, phase.detail(config), reporter);

    let summary = match phase {
        Phase::Random { count } => {
            let mut rng = match config.general.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            let vectors = RandomStimulus {
                arity,
                range: unit.random_range,
                count: *count,
                rm,
            }
            .generate(&mut rng)?;
            collector.collect(harness, vectors, &mut scoreboard)?
        }
        Phase::Exhaustive { lo, hi, fixed } => {
            let sweep = ExhaustiveSweep::from_bits(*lo, *hi, arity, rm)?.with_fixed(fixed.0, fixed.1);
            info!(values = sweep.len(), "exhaustive sweep");
            collector.collect(harness, sweep.vectors(), &mut scoreboard)?
        }
        Phase::Special => collector.collect(harness, special_vectors(arity, rm)?, &mut scoreboard)?,
        Phase::Vectors(vectors) => collector.collect(harness, vectors.iter().copied(), &mut scoreboard)?,
    };

    let mut stats = scoreboard.into_stats();
    stats.cycles = summary.cycles;

    reporter.summary(&stats)?;
    info!(
        total = stats.total(),
        pass = stats.pass,
        fail = stats.fail,
        cycles = stats.cycles,
        "phase finished"
    );
    Ok(stats)
}
