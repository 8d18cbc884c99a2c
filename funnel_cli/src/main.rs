#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! CLI entrypoint for the tube comparison engine.
//!
//! Responsibilities:
//! - Parse `--reference`/`--test`/`--output`/tolerance flags
//! - Read the two input CSVs, run the engine, write the five report CSVs
//! - Initialize `tracing` structured logging from `--verbose`/`--brief`
//! - Map `EngineError` variants to stable exit codes

mod cli;
mod error_fmt;

use clap::Parser;
use eyre::WrapErr;
use funnel_core::{compare, Curve, Tolerances};
use funnel_io::{read_curve_csv, write_report};

use cli::{Cli, VERBOSE_MODE};
use error_fmt::{exit_code_for_error, humanize};

fn main() -> eyre::Result<()> {
    let _ = color_eyre::install();

    if let Err(e) = real_main() {
        eprintln!("{}", humanize(&e));
        std::process::exit(exit_code_for_error(&e));
    }
    Ok(())
}

fn real_main() -> eyre::Result<()> {
    let cli = Cli::parse();
    let _ = VERBOSE_MODE.set(cli.verbose);
    init_tracing(cli.log_level());

    let reference: Curve = read_curve_csv(&cli.reference)
        .wrap_err_with(|| format!("read reference curve {:?}", cli.reference))?;
    let test: Curve =
        read_curve_csv(&cli.test).wrap_err_with(|| format!("read test curve {:?}", cli.test))?;

    let tolerances = Tolerances {
        atolx: cli.atolx.unwrap_or(0.0),
        atoly: cli.atoly.unwrap_or(0.0),
        rtolx: cli.rtolx.unwrap_or(0.0),
        rtoly: cli.rtoly.unwrap_or(0.0),
    };

    let outcome = compare(&reference, &test, &tolerances)?;

    write_report(
        &cli.output,
        &reference,
        &test,
        &outcome.lower,
        &outcome.upper,
        &outcome.errors.diff,
    )
    .wrap_err_with(|| format!("write report to {:?}", cli.output))?;

    if outcome.errors.is_within_tolerance() {
        tracing::info!("test curve is within tolerance");
        println!("PASS: test curve is within tolerance");
    } else {
        let n = outcome.errors.original.len();
        tracing::warn!(violations = n, "test curve is out of tolerance");
        println!("FAIL: {n} point(s) out of tolerance");
    }

    Ok(())
}

/// `--verbose` -> `debug`, `--brief` -> `warn`, default `info`.
fn init_tracing(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
