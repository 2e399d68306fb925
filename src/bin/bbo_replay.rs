//! CLI tool that annotates a tick file with best bid/offer columns.
//!
//! Reads a semicolon-delimited event file, replays it through the book
//! engine several times to measure construction speed, and writes every
//! event back out with the top of book after it.
//!
//! # Usage
//!
//! ```bash
//! cargo run --release --bin bbo_replay -- data/ticks.csv data/ticks_bbo.csv
//!
//! # Single timed replay, invariant checks on, stats dumped as JSON
//! cargo run --release --bin bbo_replay -- \
//!     data/ticks.csv data/ticks_bbo.csv --runs 1 --verify --stats stats.json
//! ```

use std::env;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use bbo_reconstructor::{
    codec, BboError, BookEngine, CsvSource, EngineConfig, EventSource, Result,
};

/// Default number of timed replays.
const DEFAULT_RUNS: usize = 100;

/// Command-line arguments
struct Args {
    /// Input event file
    input: PathBuf,
    /// Output file for annotated events
    output: PathBuf,
    /// Number of timed replays
    runs: usize,
    /// Optional path for the final engine statistics (JSON)
    stats: Option<PathBuf>,
    /// Verify book invariants after every event
    verify: bool,
}

/// Parse arguments (program name excluded). `Ok(None)` means fewer than two
/// paths were given. Everything after `--` is positional.
fn parse_args(args: &[String]) -> std::result::Result<Option<Args>, String> {
    let mut input: Option<PathBuf> = None;
    let mut output: Option<PathBuf> = None;
    let mut runs = DEFAULT_RUNS;
    let mut stats: Option<PathBuf> = None;
    let mut verify = false;
    let mut options_done = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            arg if options_done => positional(arg, &mut input, &mut output)?,
            "--" => {
                options_done = true;
            }
            "--runs" | "-r" => {
                i += 1;
                let value = args.get(i).ok_or("--runs requires a number")?;
                runs = value
                    .parse()
                    .map_err(|_| format!("Invalid --runs value: {value}"))?;
                if runs == 0 {
                    return Err("--runs must be at least 1".to_string());
                }
            }
            "--stats" | "-s" => {
                i += 1;
                let value = args.get(i).ok_or("--stats requires a path")?;
                stats = Some(PathBuf::from(value));
            }
            "--verify" => {
                verify = true;
            }
            "--help" | "-h" => {
                print_help();
                std::process::exit(0);
            }
            arg if arg.starts_with('-') && arg.len() > 1 => {
                return Err(format!("Unknown argument: {arg}"));
            }
            arg => positional(arg, &mut input, &mut output)?,
        }
        i += 1;
    }

    let (Some(input), Some(output)) = (input, output) else {
        return Ok(None);
    };

    Ok(Some(Args {
        input,
        output,
        runs,
        stats,
        verify,
    }))
}

fn positional(
    arg: &str,
    input: &mut Option<PathBuf>,
    output: &mut Option<PathBuf>,
) -> std::result::Result<(), String> {
    if input.is_none() {
        *input = Some(PathBuf::from(arg));
    } else if output.is_none() {
        *output = Some(PathBuf::from(arg));
    } else {
        return Err(format!("Unexpected argument: {arg}"));
    }
    Ok(())
}

fn print_help() {
    println!(
        r#"
BBO Replay

Annotates every event of a tick file with the best bid and best ask
(price, aggregate quantity, order count) after that event.

USAGE:
    bbo_replay [OPTIONS] <INPUT> <OUTPUT>
    bbo_replay [OPTIONS] -- <INPUT> <OUTPUT>

OPTIONS:
    -r, --runs <N>        Number of timed replays (default: {DEFAULT_RUNS})
    -s, --stats <PATH>    Write final engine statistics as JSON
        --verify          Check book invariants after every event (slow)
    -h, --help            Print this help message

INPUT FORMAT:
    SourceTime;Side;Action;OrderId;Price;Qty
    Side: 1=bid, 2=ask. Action: Y/F=clear, A=add, M=modify, D=delete.
"#
    );
}

/// Print a timing line in microseconds, total and per tick.
fn report(label: &str, elapsed: Duration, ticks: usize) {
    let micros = elapsed.as_secs_f64() * 1e6;
    println!("{label} time [us]: {micros:.3}");
    println!(
        "{label} time per tick [us]: {:.3}",
        micros / ticks.max(1) as f64
    );
}

fn run(args: Args) -> Result<()> {
    // Step 1: data input
    let started = Instant::now();
    let source = CsvSource::new(&args.input)?;
    let mut events = source.collect_events()?;
    let input_time = started.elapsed();
    let ticks = events.len();

    log::info!("Loaded {} events from {}", ticks, args.input.display());
    report("Data input", input_time, ticks);

    // Step 2: book construction, best of N replays
    let config = EngineConfig::new()
        .with_logging(args.runs == 1)
        .with_invariant_checks(args.verify);
    let mut engine = BookEngine::with_config(config);

    let mut best_build = Duration::MAX;
    for _ in 0..args.runs {
        let started = Instant::now();
        engine.replay(&mut events);
        let elapsed = started.elapsed();

        report(" OrderBook creation", elapsed, ticks);
        best_build = best_build.min(elapsed);
    }
    report("Best OrderBook creation", best_build, ticks);

    let stats = engine.stats();
    log::info!(
        "Replay: {} events, {} live orders, {} cache refreshes, {} upserts, {} fallback adds, {} missing deletes",
        stats.events_processed,
        stats.active_orders,
        stats.cache_refreshes,
        stats.add_upserts,
        stats.modify_fallback_adds,
        stats.missing_deletes
    );
    if stats.invariant_failures > 0 {
        log::warn!("{} invariant check failures", stats.invariant_failures);
    }
    if let Some(path) = &args.stats {
        stats.save_json(path)?;
        log::info!("Wrote statistics to {}", path.display());
    }

    // Step 3: result saving
    let started = Instant::now();
    codec::save_events(&args.output, &events)?;
    let save_time = started.elapsed();
    report("Result saving", save_time, ticks);

    report("Best total", input_time + best_build + save_time, ticks);
    Ok(())
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let argv: Vec<String> = env::args().skip(1).collect();
    let args = match parse_args(&argv) {
        Ok(Some(args)) => args,
        Ok(None) => {
            println!("Please pass the input CSV path and the resultant CSV path as parameters.");
            println!("Use --help for usage information");
            return;
        }
        Err(e) => {
            eprintln!("{}", BboError::Usage(e));
            eprintln!("Use --help for usage information");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
