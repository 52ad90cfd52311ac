//! Waveform trace sinks.
//!
//! The harness hands every sink the model's port values twice per clock cycle,
//! once after each edge, keyed by a monotonically increasing logical time.
//! [`VcdWriter`] records them as a Value Change Dump: the header is emitted
//! on the first dump from the set of probed signals, afterwards only changed
//! values are written.

use std::fmt;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use vcd::{IdCode, SimulationCommand, TimescaleUnit, Value};

use crate::model::SignalValue;

/// Destination for per-edge signal snapshots.
pub trait TraceSink {
    /// Records `signals` at logical time `time`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    fn dump(&mut self, time: u64, signals: &[SignalValue]) -> io::Result<()>;

    /// Flushes and finalizes the trace. Further dumps are ignored.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    fn close(&mut self) -> io::Result<()>;
}

/// Value Change Dump writer on top of [`vcd::Writer`].
pub struct VcdWriter<W: Write> {
    /// `None` once closed.
    out: Option<vcd::Writer<W>>,
    scope: String,
    ids: Vec<IdCode>,
    last: Option<Vec<u64>>,
}

impl<W: Write> fmt::Debug for VcdWriter<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VcdWriter")
            .field("scope", &self.scope)
            .field("signals", &self.ids.len())
            .field("closed", &self.out.is_none())
            .finish_non_exhaustive()
    }
}

impl VcdWriter<BufWriter<File>> {
    /// Creates (truncating) a VCD file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the error from creating the file.
    pub fn create(path: impl AsRef<Path>, scope: &str) -> io::Result<Self> {
        Ok(Self::new(BufWriter::new(File::create(path)?), scope))
    }
}

impl<W: Write> VcdWriter<W> {
    /// Wraps an arbitrary writer; `scope` names the top-level module.
    pub fn new(out: W, scope: &str) -> Self {
        Self {
            out: Some(vcd::Writer::new(out)),
            scope: scope.to_string(),
            ids: Vec::new(),
            last: None,
        }
    }
}

fn write_header<W: Write>(
    out: &mut vcd::Writer<W>,
    scope: &str,
    signals: &[SignalValue],
) -> io::Result<Vec<IdCode>> {
    out.timescale(1, TimescaleUnit::NS)?;
    out.add_module(scope)?;
    let ids = signals
        .iter()
        .map(|s| out.add_wire(u32::from(s.width), s.name))
        .collect::<io::Result<Vec<_>>>()?;
    out.upscope()?;
    out.enddefinitions()?;
    Ok(ids)
}

fn write_value<W: Write>(out: &mut vcd::Writer<W>, id: IdCode, signal: &SignalValue) -> io::Result<()> {
    if signal.width == 1 {
        out.change_scalar(id, level(signal.value & 1 == 1))
    } else {
        // Leading zeros are implied by the declared width.
        let significant = (u64::BITS - signal.value.leading_zeros()).max(1);
        let bits = (0..significant).rev().map(|i| level((signal.value >> i) & 1 == 1));
        out.change_vector(id, bits)
    }
}

const fn level(high: bool) -> Value {
    if high { Value::V1 } else { Value::V0 }
}

impl<W: Write> TraceSink for VcdWriter<W> {
    fn dump(&mut self, time: u64, signals: &[SignalValue]) -> io::Result<()> {
        let Some(out) = self.out.as_mut() else {
            return Ok(());
        };

        match self.last.take() {
            None => {
                self.ids = write_header(out, &self.scope, signals)?;
                out.timestamp(time)?;
                out.begin(SimulationCommand::Dumpvars)?;
                for (&id, s) in self.ids.iter().zip(signals) {
                    write_value(out, id, s)?;
                }
                out.end()?;
                self.last = Some(signals.iter().map(|s| s.value).collect());
            }
            Some(mut last) => {
                let mut stamped = false;
                for ((&id, s), prev) in self.ids.iter().zip(signals).zip(last.iter_mut()) {
                    if s.value == *prev {
                        continue;
                    }
                    if !stamped {
                        out.timestamp(time)?;
                        stamped = true;
                    }
                    write_value(out, id, s)?;
                    *prev = s.value;
                }
                self.last = Some(last);
            }
        }
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        match self.out.take() {
            Some(mut out) => out.flush(),
            None => Ok(()),
        }
    }
}
