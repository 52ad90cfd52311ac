//! Error classification and scoring.
//!
//! Every collected pair goes through two steps:
//! 1. **Classification:** [`classify`] compares golden and hardware values and
//!    yields a relative error and a pass/fail verdict.
//! 2. **Scoring:** [`Scoreboard`] evaluates the golden model, classifies, updates
//!    the run statistics and emits detail rows to the reporter.

/// Golden/hardware comparison.
pub mod classify;

/// Pair sink that scores collected results.
pub mod scoreboard;

pub use classify::{MatchKind, Verdict, classify};
pub use scoreboard::Scoreboard;
