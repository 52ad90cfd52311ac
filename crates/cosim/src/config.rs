//! Configuration system for the harness.
//!
//! This module defines the structures that parameterize a co-simulation run. It provides:
//! 1. **Defaults:** Reset length, handshake iteration budget, random vector count.
//! 2. **Structures:** General, handshake, report and random-stimulus sections.
//! 3. **Enums:** Detail-row policy and the infinity sign policy of the classifier.
//!
//! Configuration is loaded from JSON; every field is optional and falls back to
//! the same value `HarnessConfig::default()` uses.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::common::HarnessError;
use crate::golden::rounding_modes::RoundingMode;

/// Default configuration constants for the harness.
mod defaults {
    /// Clock cycles the reset input is held asserted at start-up.
    pub const RESET_CYCLES: u32 = 10;

    /// Consecutive cycles a handshake wait may spin before it is reported as a timeout.
    ///
    /// Large enough for any realistic unit latency; a protocol violation is
    /// reported after a few milliseconds of simulation instead of hanging.
    pub const HANDSHAKE_TIMEOUT: u64 = 1_000_000;

    /// Vectors drawn by a random phase.
    pub const RANDOM_COUNT: usize = 100_000;
}

/// Which comparisons are printed as detail rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailPolicy {
    /// Only failing comparisons.
    #[default]
    Failures,
    /// Every comparison.
    All,
}

/// Whether the sign of two infinities must agree for an exact match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InfinitySign {
    /// `+Inf` against `-Inf` is a mismatch.
    #[default]
    Strict,
    /// Any two infinities match.
    Ignore,
}

/// Root harness configuration.
///
/// # Examples
///
/// ```
/// use fpcosim_core::config::{DetailPolicy, HarnessConfig};
///
/// let json = r#"{
///     "general": { "reset_cycles": 4, "seed": 7 },
///     "handshake": { "timeout_cycles": 5000 },
///     "report": { "detail": "all" }
/// }"#;
///
/// let config = HarnessConfig::from_json_str(json).unwrap();
/// assert_eq!(config.general.reset_cycles, 4);
/// assert_eq!(config.general.seed, Some(7));
/// assert_eq!(config.handshake.timeout_cycles, 5000);
/// assert_eq!(config.report.detail, DetailPolicy::All);
/// assert_eq!(config.random.count, 100_000);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HarnessConfig {
    /// General run settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Handshake spin-wait settings
    #[serde(default)]
    pub handshake: HandshakeConfig,
    /// Report settings
    #[serde(default)]
    pub report: ReportConfig,
    /// Random stimulus settings
    #[serde(default)]
    pub random: RandomConfig,
    /// Rounding mode driven with every vector
    #[serde(default)]
    pub rounding_mode: RoundingMode,
}

impl HarnessConfig {
    /// Parses a configuration from JSON text and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::ConfigParse`] for malformed JSON and
    /// [`HarnessError::Config`] if validation fails.
    pub fn from_json_str(text: &str) -> Result<Self, HarnessError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Io`] if the file cannot be read, otherwise as
    /// [`HarnessConfig::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, HarnessError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Rejects values the harness cannot run with.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Config`] for a zero handshake timeout.
    pub fn validate(&self) -> Result<(), HarnessError> {
        if self.handshake.timeout_cycles == 0 {
            return Err(HarnessError::Config(
                "handshake.timeout_cycles must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// General run settings.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Cycles the reset input is held asserted at start-up
    #[serde(default = "GeneralConfig::default_reset_cycles")]
    pub reset_cycles: u32,

    /// Seed for random stimulus; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,

    /// Waveform trace output path; tracing is disabled when absent
    #[serde(default)]
    pub trace_path: Option<PathBuf>,
}

impl GeneralConfig {
    /// Returns the default reset length.
    const fn default_reset_cycles() -> u32 {
        defaults::RESET_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            reset_cycles: defaults::RESET_CYCLES,
            seed: None,
            trace_path: None,
        }
    }
}

/// Handshake spin-wait settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HandshakeConfig {
    /// Consecutive cycles without handshake progress before a timeout error
    #[serde(default = "HandshakeConfig::default_timeout_cycles")]
    pub timeout_cycles: u64,
}

impl HandshakeConfig {
    /// Returns the default handshake iteration budget.
    const fn default_timeout_cycles() -> u64 {
        defaults::HANDSHAKE_TIMEOUT
    }
}

impl Default for HandshakeConfig {
    fn default() -> Self {
        Self {
            timeout_cycles: defaults::HANDSHAKE_TIMEOUT,
        }
    }
}

/// Report settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReportConfig {
    /// Which comparisons produce detail rows
    #[serde(default)]
    pub detail: DetailPolicy,

    /// Infinity sign policy of the classifier
    #[serde(default)]
    pub infinity_sign: InfinitySign,
}

/// Random stimulus settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RandomConfig {
    /// Vectors per random phase
    #[serde(default = "RandomConfig::default_count")]
    pub count: usize,
}

impl RandomConfig {
    /// Returns the default random vector count.
    const fn default_count() -> usize {
        defaults::RANDOM_COUNT
    }
}

impl Default for RandomConfig {
    fn default() -> Self {
        Self {
            count: defaults::RANDOM_COUNT,
        }
    }
}
