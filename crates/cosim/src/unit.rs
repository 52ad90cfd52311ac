//! Unit operation descriptors.
//!
//! One generic harness covers every unit; what differs between units is data:
//! 1. **Operation:** The function the unit computes and therefore its operand arity.
//! 2. **Ports:** Whether the unit has a rounding-mode input.
//! 3. **Timing:** Fixed-latency pipeline or valid/ready handshake.
//! 4. **Tolerance:** The relative-error threshold the unit must meet.
//!
//! The built-in catalogue describes the four binary32 units the harness was
//! written for; [`UnitDescriptor::by_name`] looks them up by their CLI name.

use std::fmt;

use serde::Deserialize;

use crate::common::HarnessError;

/// Relative-error threshold for exactly rounded units (multiply, multiply-add).
pub const EXACT_THRESHOLD: f64 = 1e-6;

/// Relative-error threshold for approximating units (exponential).
pub const APPROX_THRESHOLD: f64 = 1e-4;

/// Function computed by a unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitOp {
    /// Fused multiply-add `a * b + c`.
    MulAdd,
    /// Natural exponential `e^x`.
    Exp,
    /// Multiply `a * b`.
    Mul,
}

impl UnitOp {
    /// Number of binary32 operands the operation consumes.
    pub const fn arity(self) -> usize {
        match self {
            Self::MulAdd => 3,
            Self::Exp => 1,
            Self::Mul => 2,
        }
    }

    /// Short mnemonic used in report headings.
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::MulAdd => "CMA",
            Self::Exp => "EXP",
            Self::Mul => "MUL",
        }
    }
}

impl fmt::Display for UnitOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// How a unit accepts inputs and presents outputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimingDiscipline {
    /// No flow control: one input per cycle, the result appears `depth` clock
    /// edges after the input was driven.
    FixedLatency {
        /// Register stages between input and output (at least 1).
        depth: u32,
    },
    /// Valid/ready streaming on both the input and the output side.
    Handshake,
}

/// Operation descriptor for a unit under test.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct UnitDescriptor {
    /// CLI name of the unit.
    pub name: String,
    /// Function the unit computes.
    pub op: UnitOp,
    /// Whether the unit has a rounding-mode input port.
    pub has_rounding_mode: bool,
    /// Timing discipline of the unit's ports.
    pub timing: TimingDiscipline,
    /// Relative-error threshold below which a result passes.
    pub threshold: f64,
    /// Inclusive range random operands are drawn from.
    pub random_range: (f32, f32),
    /// Default exhaustive sweep interval as binary32 bit patterns.
    #[serde(default)]
    pub sweep_range: Option<(u32, u32)>,
}

impl UnitDescriptor {
    /// Names of the built-in units, in catalogue order.
    pub const CATALOGUE: &'static [&'static str] = &["cma", "exp-main", "exp", "mul"];

    /// Fused multiply-add unit: 5-stage pipeline, no flow control.
    pub fn cma_fp32() -> Self {
        Self {
            name: "cma".to_string(),
            op: UnitOp::MulAdd,
            has_rounding_mode: true,
            timing: TimingDiscipline::FixedLatency { depth: 5 },
            threshold: EXACT_THRESHOLD,
            random_range: (-100.0, 100.0),
            sweep_range: None,
        }
    }

    /// Exponential main path: 18-stage pipeline, no flow control.
    pub fn exp_fp32_main_path() -> Self {
        Self {
            name: "exp-main".to_string(),
            op: UnitOp::Exp,
            has_rounding_mode: true,
            timing: TimingDiscipline::FixedLatency { depth: 18 },
            threshold: APPROX_THRESHOLD,
            random_range: (-50.0, 50.0),
            sweep_range: None,
        }
    }

    /// Exponential unit with special-case handling behind a valid/ready interface.
    ///
    /// The default sweep covers the range where the result is a normal
    /// binary32 value: `[-87.3, +88.7]`.
    pub fn exp_fp32() -> Self {
        Self {
            name: "exp".to_string(),
            op: UnitOp::Exp,
            has_rounding_mode: true,
            timing: TimingDiscipline::Handshake,
            threshold: APPROX_THRESHOLD,
            random_range: (-87.2, 88.7),
            sweep_range: Some((0xC2AE_999A, 0x42B1_6666)),
        }
    }

    /// Multiply unit behind a valid/ready interface, no rounding-mode port.
    pub fn mul_fp32() -> Self {
        Self {
            name: "mul".to_string(),
            op: UnitOp::Mul,
            has_rounding_mode: false,
            timing: TimingDiscipline::Handshake,
            threshold: EXACT_THRESHOLD,
            random_range: (-100.0, 100.0),
            sweep_range: None,
        }
    }

    /// Looks up a built-in unit by its CLI name.
    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "cma" => Some(Self::cma_fp32()),
            "exp-main" => Some(Self::exp_fp32_main_path()),
            "exp" => Some(Self::exp_fp32()),
            "mul" => Some(Self::mul_fp32()),
            _ => None,
        }
    }

    /// Operand count of the unit.
    pub const fn arity(&self) -> usize {
        self.op.arity()
    }

    /// Collector iteration offset `D` for a fixed-latency unit.
    ///
    /// The output read after the clock edge of iteration `i + D` belongs to the
    /// stimulus driven at iteration `i`. A wrong depth silently pairs the wrong
    /// values; the harness cannot detect it.
    ///
    /// Returns `None` for handshake units.
    pub const fn collect_offset(&self) -> Option<u32> {
        match self.timing {
            TimingDiscipline::FixedLatency { depth } => Some(depth.saturating_sub(1)),
            TimingDiscipline::Handshake => None,
        }
    }

    /// Checks the descriptor for values the harness cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Config`] for a zero pipeline depth or a
    /// non-positive threshold, and [`HarnessError::InvalidRange`] for an
    /// unusable random range.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if let TimingDiscipline::FixedLatency { depth: 0 } = self.timing {
            return Err(HarnessError::Config(format!(
                "unit `{}` has a zero pipeline depth",
                self.name
            )));
        }
        if !(self.threshold > 0.0) {
            return Err(HarnessError::Config(format!(
                "unit `{}` has a non-positive error threshold",
                self.name
            )));
        }
        let (lo, hi) = self.random_range;
        if !lo.is_finite() || !hi.is_finite() || lo > hi {
            return Err(HarnessError::InvalidRange { lo, hi });
        }
        Ok(())
    }
}
