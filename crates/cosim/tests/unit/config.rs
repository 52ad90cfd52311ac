//! Configuration loading and validation.

use std::io::Write;

use fpcosim_core::HarnessError;
use fpcosim_core::config::{DetailPolicy, HarnessConfig, InfinitySign};
use fpcosim_core::golden::rounding_modes::RoundingMode;
use tempfile::NamedTempFile;

#[test]
fn defaults() {
    let config = HarnessConfig::default();
    assert_eq!(config.general.reset_cycles, 10);
    assert_eq!(config.general.seed, None);
    assert!(config.general.trace_path.is_none());
    assert_eq!(config.handshake.timeout_cycles, 1_000_000);
    assert_eq!(config.report.detail, DetailPolicy::Failures);
    assert_eq!(config.report.infinity_sign, InfinitySign::Strict);
    assert_eq!(config.random.count, 100_000);
    assert_eq!(config.rounding_mode, RoundingMode::Rne);
}

#[test]
fn empty_object_matches_default() {
    let parsed = HarnessConfig::from_json_str("{}").expect("parse");
    let default = HarnessConfig::default();
    assert_eq!(parsed.general.reset_cycles, default.general.reset_cycles);
    assert_eq!(parsed.handshake.timeout_cycles, default.handshake.timeout_cycles);
    assert_eq!(parsed.random.count, default.random.count);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let config = HarnessConfig::from_json_str(
        r#"{ "report": { "infinity_sign": "ignore" }, "rounding_mode": "RTZ" }"#,
    )
    .expect("parse");
    assert_eq!(config.report.infinity_sign, InfinitySign::Ignore);
    assert_eq!(config.report.detail, DetailPolicy::Failures);
    assert_eq!(config.rounding_mode, RoundingMode::Rtz);
    assert_eq!(config.general.reset_cycles, 10);
}

#[test]
fn zero_timeout_is_rejected() {
    let err = HarnessConfig::from_json_str(r#"{ "handshake": { "timeout_cycles": 0 } }"#).unwrap_err();
    assert!(matches!(err, HarnessError::Config(_)));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = HarnessConfig::from_json_str(r#"{ "general": { "reset_cycles": "ten" } }"#).unwrap_err();
    assert!(matches!(err, HarnessError::ConfigParse(_)));
}

#[test]
fn loads_from_file() {
    let mut file = NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"{{ "general": {{ "seed": 99, "trace_path": "run.vcd" }}, "random": {{ "count": 12 }} }}"#
    )
    .expect("write");

    let config = HarnessConfig::from_json_file(file.path()).expect("load");
    assert_eq!(config.general.seed, Some(99));
    assert_eq!(config.general.trace_path.as_deref(), Some(std::path::Path::new("run.vcd")));
    assert_eq!(config.random.count, 12);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = HarnessConfig::from_json_file(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, HarnessError::Io(_)));
}
