//! Floating-point unit co-simulation CLI.
//!
//! This binary is the single entry point for every unit and test phase. It performs:
//! 1. **Setup:** Load the JSON configuration, apply flag overrides, install logging.
//! 2. **Model:** Build the behavioral model and collector matching the unit's timing discipline.
//! 3. **Run:** Reset, run the requested phase, print the report and summary.
//!
//! The report goes to stdout; logs go to stderr.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fpcosim_core::collect::{Collector, HandshakeCollector, HandshakeMode, PipelineCollector};
use fpcosim_core::common::bits::bits_of;
use fpcosim_core::config::DetailPolicy;
use fpcosim_core::golden::rounding_modes::RoundingMode;
use fpcosim_core::model::{BackPressure, CycleModel, Datapath, FixedLatencyModel, StreamModel};
use fpcosim_core::report::Reporter;
use fpcosim_core::runner::{Phase, run_phase};
use fpcosim_core::stats::RunStatistics;
use fpcosim_core::trace::VcdWriter;
use fpcosim_core::unit::TimingDiscipline;
use fpcosim_core::{Harness, HarnessConfig, HarnessError, UnitDescriptor};

#[derive(Parser, Debug)]
#[command(
    name = "fpcosim",
    author,
    version,
    about = "Cycle-accurate differential test harness for binary32 FP units",
    long_about = "Drive a cycle-level FP unit model with stimulus and check every result against a golden reference.\n\nExamples:\n  fpcosim random cma --count 10000\n  fpcosim special exp\n  fpcosim exhaustive exp\n  fpcosim --seed 42 --trace mul.vcd random mul\n  fpcosim list"
)]
struct Cli {
    /// JSON configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Write a VCD waveform trace to this path.
    #[arg(long, global = true)]
    trace: Option<PathBuf>,

    /// Seed for random stimulus.
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Print every comparison, not just failures.
    #[arg(long, global = true)]
    all: bool,

    /// Rounding mode driven with every vector (rne, rtz, rdn, rup, rmm).
    #[arg(long, global = true, value_parser = parse_rounding_mode)]
    rm: Option<RoundingMode>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Uniform random vectors over the unit's random range.
    Random {
        #[command(flatten)]
        target: Target,

        /// Number of vectors (overrides the configuration).
        #[arg(short = 'n', long)]
        count: Option<usize>,
    },

    /// Every binary32 value of an interval, in increasing order, on operand A.
    Exhaustive {
        #[command(flatten)]
        target: Target,

        /// Lower bound as a float.
        #[arg(long, allow_hyphen_values = true, conflicts_with = "lo_bits")]
        lo: Option<f32>,

        /// Upper bound as a float.
        #[arg(long, allow_hyphen_values = true, conflicts_with = "hi_bits")]
        hi: Option<f32>,

        /// Lower bound as a hex bit pattern (e.g. 0xC2AE999A).
        #[arg(long, value_parser = parse_hex)]
        lo_bits: Option<u32>,

        /// Upper bound as a hex bit pattern (e.g. 0x42B16666).
        #[arg(long, value_parser = parse_hex)]
        hi_bits: Option<u32>,

        /// Values held on operands B and C.
        #[arg(long, num_args = 2, value_names = ["B", "C"], allow_hyphen_values = true)]
        fixed: Option<Vec<f32>>,
    },

    /// Signed zeros, infinities, NaN, range borders and constants.
    Special {
        #[command(flatten)]
        target: Target,
    },

    /// Print the built-in unit catalogue.
    List,
}

/// Unit selection and behavioral model knobs shared by every phase.
#[derive(Args, Debug)]
struct Target {
    /// Unit name (see `fpcosim list`).
    unit: String,

    /// Result latency of a handshake unit, in cycles.
    #[arg(long, default_value_t = 8)]
    latency: u64,

    /// Results a handshake unit holds in flight.
    #[arg(long, default_value_t = 4)]
    capacity: usize,

    /// Stall `in_ready` for N cycles out of every `--stall-period` (handshake units).
    #[arg(long, default_value_t = 0)]
    stall: u64,

    /// Back-pressure window length in cycles.
    #[arg(long, default_value_t = 0)]
    stall_period: u64,

    /// Skew every model result by this many ulps (fault injection).
    #[arg(long, default_value_t = 0)]
    error_ulps: u32,
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = execute(cli) {
        eprintln!("error: {e}");
        process::exit(1);
    }
}

/// Dispatches the parsed command line.
fn execute(cli: Cli) -> Result<(), HarnessError> {
    let mut config = match &cli.config {
        Some(path) => HarnessConfig::from_json_file(path)?,
        None => HarnessConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.general.seed = Some(seed);
    }
    if let Some(path) = cli.trace {
        config.general.trace_path = Some(path);
    }
    if cli.all {
        config.report.detail = DetailPolicy::All;
    }
    if let Some(rm) = cli.rm {
        config.rounding_mode = rm;
    }

    let (target, phase) = match cli.command {
        Commands::List => {
            print_catalogue();
            return Ok(());
        }
        Commands::Random { target, count } => {
            if let Some(count) = count {
                config.random.count = count;
            }
            (target, Phase::random(&config))
        }
        Commands::Exhaustive {
            target,
            lo,
            hi,
            lo_bits,
            hi_bits,
            fixed,
        } => {
            let unit = lookup(&target.unit)?;
            let lo = lo_bits.or(lo.map(bits_of));
            let hi = hi_bits.or(hi.map(bits_of));
            let fixed = match fixed.as_deref() {
                Some(&[b, c]) => (b, c),
                _ => (1.0, 0.0),
            };
            let phase = match (lo, hi) {
                (Some(lo), Some(hi)) => Phase::Exhaustive { lo, hi, fixed },
                (None, None) => match Phase::default_sweep(&unit)? {
                    Phase::Exhaustive { lo, hi, .. } => Phase::Exhaustive { lo, hi, fixed },
                    other => other,
                },
                _ => {
                    return Err(HarnessError::Config(
                        "exhaustive range needs both a lower and an upper bound".to_string(),
                    ));
                }
            };
            (target, phase)
        }
        Commands::Special { target } => (target, Phase::Special),
    };

    let unit = lookup(&target.unit)?;
    let datapath = Datapath::new(unit.op, unit.has_rounding_mode).with_error_ulps(target.error_ulps);

    match unit.timing {
        TimingDiscipline::FixedLatency { depth } => {
            let model = FixedLatencyModel::new(datapath, depth);
            let _ = simulate(model, PipelineCollector::for_depth(depth), &unit, &phase, &config)?;
        }
        TimingDiscipline::Handshake => {
            let back_pressure = if target.stall > 0 && target.stall_period > 0 {
                BackPressure::Periodic {
                    period: target.stall_period,
                    stall: target.stall,
                }
            } else {
                BackPressure::None
            };
            let model = StreamModel::new(datapath, target.latency, target.capacity).with_back_pressure(back_pressure);
            // Exhaustive sweeps drain one vector at a time.
            let mode = match phase {
                Phase::Exhaustive { .. } => HandshakeMode::Strict,
                _ => HandshakeMode::Streaming,
            };
            let _ = simulate(model, HandshakeCollector::new(mode), &unit, &phase, &config)?;
        }
    }
    Ok(())
}

/// Builds the harness around `model`, resets it and runs one phase.
fn simulate<M, C>(
    model: M,
    mut collector: C,
    unit: &UnitDescriptor,
    phase: &Phase,
    config: &HarnessConfig,
) -> Result<RunStatistics, HarnessError>
where
    M: CycleModel,
    C: Collector<M>,
{
    let mut reporter = Reporter::stdout();
    reporter.line(&format!("Initializing {} simulation...\n", unit.op.mnemonic()))?;

    let mut harness = Harness::new(model, config)?;
    if let Some(path) = &config.general.trace_path {
        info!(path = %path.display(), "tracing enabled");
        harness = harness.with_trace(Box::new(VcdWriter::create(path, &unit.name)?));
    }

    harness.apply_reset(config.general.reset_cycles)?;
    let stats = run_phase(&mut harness, &mut collector, unit, phase, config, &mut reporter)?;
    harness.finish()?;

    reporter.line("\nSimulation complete.")?;
    Ok(stats)
}

fn lookup(name: &str) -> Result<UnitDescriptor, HarnessError> {
    let unit = UnitDescriptor::by_name(name).ok_or_else(|| {
        HarnessError::Config(format!(
            "unknown unit `{name}` (expected one of: {})",
            UnitDescriptor::CATALOGUE.join(", ")
        ))
    })?;
    unit.validate()?;
    Ok(unit)
}

fn print_catalogue() {
    println!("{:<10} {:<4} {:>5} {:>3} {:<22} {:>9}", "UNIT", "OP", "ARITY", "RM", "TIMING", "THRESHOLD");
    for unit in UnitDescriptor::CATALOGUE.iter().filter_map(|name| UnitDescriptor::by_name(name)) {
        let timing = match unit.timing {
            TimingDiscipline::FixedLatency { depth } => format!("fixed latency, depth {depth}"),
            TimingDiscipline::Handshake => "valid/ready".to_string(),
        };
        println!(
            "{:<10} {:<4} {:>5} {:>3} {:<22} {:>9.0e}",
            unit.name,
            unit.op.mnemonic(),
            unit.arity(),
            if unit.has_rounding_mode { "yes" } else { "no" },
            timing,
            unit.threshold,
        );
    }
}

fn parse_hex(s: &str) -> Result<u32, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X").replace('_', "");
    u32::from_str_radix(&digits, 16).map_err(|e| format!("invalid hex bit pattern `{s}`: {e}"))
}

fn parse_rounding_mode(s: &str) -> Result<RoundingMode, String> {
    match s.to_ascii_lowercase().as_str() {
        "rne" => Ok(RoundingMode::Rne),
        "rtz" => Ok(RoundingMode::Rtz),
        "rdn" => Ok(RoundingMode::Rdn),
        "rup" => Ok(RoundingMode::Rup),
        "rmm" => Ok(RoundingMode::Rmm),
        _ => Err(format!("unknown rounding mode `{s}`")),
    }
}
