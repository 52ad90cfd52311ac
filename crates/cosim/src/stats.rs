//! Per-run comparison statistics.
//!
//! This module aggregates the outcome of one test phase. It provides:
//! 1. **Counts:** Passing and failing comparisons.
//! 2. **Error metrics:** Sum and maximum of the relative error, and the derived average.
//! 3. **Cycles:** Clock cycles the phase consumed.
//!
//! A fresh [`RunStatistics`] is created for every phase; nothing carries over
//! between runs.

/// Pass/fail statistics of one test run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RunStatistics {
    /// Comparisons within the error threshold.
    pub pass: u64,
    /// Comparisons at or above the error threshold.
    pub fail: u64,
    /// Sum of the relative errors of all comparisons.
    pub total_err: f64,
    /// Largest relative error seen.
    pub max_err: f64,
    /// Clock cycles consumed by the run.
    pub cycles: u64,
}

impl RunStatistics {
    /// Records one classified comparison.
    ///
    /// # Arguments
    ///
    /// * `passed` - Whether the comparison met the threshold.
    /// * `error`  - Its relative error (`+Inf` for a NaN or infinity mismatch).
    pub fn record(&mut self, passed: bool, error: f64) {
        if passed {
            self.pass += 1;
        } else {
            self.fail += 1;
        }
        self.total_err += error;
        if error > self.max_err {
            self.max_err = error;
        }
    }

    /// Total comparisons recorded.
    pub const fn total(&self) -> u64 {
        self.pass + self.fail
    }

    /// Mean relative error; zero before any comparison.
    pub fn avg_err(&self) -> f64 {
        match self.total() {
            0 => 0.0,
            n => self.total_err / n as f64,
        }
    }

    /// Share of passing comparisons in percent.
    pub fn pass_pct(&self) -> f64 {
        self.percent(self.pass)
    }

    /// Share of failing comparisons in percent.
    pub fn fail_pct(&self) -> f64 {
        self.percent(self.fail)
    }

    /// True if every recorded comparison passed.
    pub const fn all_passed(&self) -> bool {
        self.fail == 0
    }

    fn percent(&self, count: u64) -> f64 {
        match self.total() {
            0 => 0.0,
            n => count as f64 * 100.0 / n as f64,
        }
    }
}
