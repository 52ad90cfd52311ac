//! Console report formatting.
//!
//! The report goes to any [`Write`] (stdout in the CLI) and is never routed
//! through `tracing`. Layout of one phase:
//!
//! ```text
//! === Random CMA Tests ===
//!        InputA        InputB        InputC        Golden      Hardware         Error
//! -----------------------------------------------------------------------------------
//! +2.000000e+00 +3.000000e+00 +1.000000e+00 +7.000000e+00 +7.000010e+00  1.430511e-06
//!
//! Total=1, Pass=0 (0.00%), Fail=1 (100.00%)
//! AvgErr=1.430511e-06, MaxErr=1.430511e-06
//! Total cycles: 5
//! ```
//!
//! Numbers use C `printf` scientific notation (`%+13.6e`): a mandatory
//! exponent sign and at least two exponent digits.

use std::io::{self, Stdout, Write};

use crate::stats::RunStatistics;
use crate::stimulus::StimulusVector;

/// Width of every table column.
const COLUMN_WIDTH: usize = 13;

/// Mantissa digits of every number in the table.
const PRECISION: usize = 6;

/// Writes phase tables and summaries.
#[derive(Debug)]
pub struct Reporter<W: Write> {
    out: W,
}

impl Reporter<Stdout> {
    /// Reporter writing to standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Reporter<W> {
    /// Wraps a writer.
    pub const fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the reporter and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes a free-standing line.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Writes the phase title and the column header for a unit of `arity` operands.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn header(&mut self, title: &str, arity: usize) -> io::Result<()> {
        writeln!(self.out, "=== {title} ===")?;

        let inputs: &[&str] = match arity {
            1 => &["Input"],
            2 => &["InputA", "InputB"],
            _ => &["InputA", "InputB", "InputC"],
        };
        let columns: Vec<String> = inputs
            .iter()
            .chain(["Golden", "Hardware", "Error"].iter())
            .map(|name| format!("{name:>COLUMN_WIDTH$}"))
            .collect();
        writeln!(self.out, "{}", columns.join(" "))?;

        let width = columns.len() * (COLUMN_WIDTH + 1) - 1;
        writeln!(self.out, "{}", "-".repeat(width))
    }

    /// Writes one detail row.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn row(&mut self, stimulus: &StimulusVector, golden: f32, hardware: f32, error: f64) -> io::Result<()> {
        for &x in stimulus.operands() {
            write!(self.out, "{:>COLUMN_WIDTH$} ", sci(f64::from(x), true))?;
        }
        writeln!(
            self.out,
            "{:>w$} {:>w$} {:>w$}",
            sci(f64::from(golden), true),
            sci(f64::from(hardware), true),
            sci(error, false),
            w = COLUMN_WIDTH,
        )
    }

    /// Writes the closing summary of a phase.
    ///
    /// # Errors
    ///
    /// Returns any error from the writer.
    pub fn summary(&mut self, stats: &RunStatistics) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(
            self.out,
            "Total={}, Pass={} ({:.2}%), Fail={} ({:.2}%)",
            stats.total(),
            stats.pass,
            stats.pass_pct(),
            stats.fail,
            stats.fail_pct(),
        )?;
        writeln!(
            self.out,
            "AvgErr={}, MaxErr={}",
            sci(stats.avg_err(), false),
            sci(stats.max_err, false)
        )?;
        writeln!(self.out, "Total cycles: {}", stats.cycles)?;
        self.out.flush()
    }
}

/// Formats `x` like C's `%.6e`, with a leading `+` for non-negative values if `plus`.
pub fn sci(x: f64, plus: bool) -> String {
    let sign = if x.is_sign_negative() {
        "-"
    } else if plus {
        "+"
    } else {
        ""
    };

    if x.is_nan() {
        return format!("{sign}nan");
    }
    if x.is_infinite() {
        return format!("{sign}inf");
    }

    let rust = format!("{:.*e}", PRECISION, x.abs());
    let Some((mantissa, exponent)) = rust.split_once('e') else {
        return format!("{sign}{rust}");
    };
    let exponent: i32 = exponent.parse().unwrap_or_default();
    let exp_sign = if exponent < 0 { '-' } else { '+' };
    format!("{sign}{mantissa}e{exp_sign}{:02}", exponent.unsigned_abs())
}
