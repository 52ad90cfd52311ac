//! Golden/hardware comparison.
//!
//! | Golden `g`      | Hardware `h`      | Kind                 | Error                  |
//! |-----------------|-------------------|----------------------|------------------------|
//! | NaN             | NaN               | `SpecialMatch`       | 0                      |
//! | ±Inf            | ±Inf, same sign   | `SpecialMatch`       | 0                      |
//! | ±Inf            | ∓Inf              | policy dependent     | 0 or +Inf              |
//! | NaN             | not NaN (or v.v.) | `SpecialMismatch`    | +Inf                   |
//! | anything else   |                   | `Relative`           | `\|h - g\| / scale`    |
//!
//! `scale` is 1 when either value is zero and `|g|` otherwise, so results
//! near zero are compared absolutely. The error is computed in double
//! precision. NaN payloads and signs are never compared.

use crate::config::InfinitySign;

/// How a comparison was decided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchKind {
    /// Both NaN, or both infinite and accepted by the sign policy.
    SpecialMatch,
    /// Exactly one NaN, or infinities of opposite sign under the strict policy.
    SpecialMismatch,
    /// Relative error computed and compared with the threshold.
    Relative,
}

/// Outcome of one comparison.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Verdict {
    /// Whether the hardware result is accepted.
    pub passed: bool,
    /// Relative error; `+Inf` for a special mismatch.
    pub error: f64,
    /// Comparison path taken.
    pub kind: MatchKind,
}

impl Verdict {
    const fn special(passed: bool) -> Self {
        Self {
            passed,
            error: if passed { 0.0 } else { f64::INFINITY },
            kind: if passed {
                MatchKind::SpecialMatch
            } else {
                MatchKind::SpecialMismatch
            },
        }
    }
}

/// Classifies a hardware result against its golden value.
///
/// # Arguments
///
/// * `golden`    - Expected binary32 result.
/// * `hardware`  - Result read from the unit.
/// * `threshold` - A relative error strictly below this passes.
/// * `inf_sign`  - Whether infinities of opposite sign match.
///
/// # Examples
///
/// ```
/// use fpcosim_core::check::classify;
/// use fpcosim_core::config::InfinitySign;
///
/// let v = classify(1.0, 1.0 + 2e-7, 1e-6, InfinitySign::Strict);
/// assert!(v.passed);
///
/// let v = classify(f32::NAN, f32::NAN, 1e-6, InfinitySign::Strict);
/// assert!(v.passed && v.error == 0.0);
/// ```
pub fn classify(golden: f32, hardware: f32, threshold: f64, inf_sign: InfinitySign) -> Verdict {
    match (golden.is_nan(), hardware.is_nan()) {
        (true, true) => return Verdict::special(true),
        (true, false) | (false, true) => return Verdict::special(false),
        (false, false) => {}
    }

    if golden.is_infinite() && hardware.is_infinite() {
        let same_sign = golden.is_sign_negative() == hardware.is_sign_negative();
        return Verdict::special(same_sign || inf_sign == InfinitySign::Ignore);
    }

    let error = relative_error(f64::from(golden), f64::from(hardware));
    Verdict {
        passed: error < threshold,
        error,
        kind: MatchKind::Relative,
    }
}

/// `|h - g| / (g == 0 || h == 0 ? 1 : |g|)`.
pub fn relative_error(g: f64, h: f64) -> f64 {
    let scale = if g == 0.0 || h == 0.0 { 1.0 } else { g.abs() };
    (h - g).abs() / scale
}
