//! CLI argument definitions for the `funnel` binary.

use std::path::PathBuf;
use std::sync::OnceLock;

use clap::Parser;

/// Set once at startup so error formatting can stay output-mode aware
/// without threading a flag through every call site.
pub static VERBOSE_MODE: OnceLock<bool> = OnceLock::new();

#[derive(Parser, Debug)]
#[command(
    name = "funnel",
    version,
    about = "Compares a test time series against a tolerance tube built around a reference curve."
)]
#[command(group(
    clap::ArgGroup::new("xtol")
        .args(["atolx", "rtolx"])
        .multiple(true)
        .required(true)
))]
#[command(group(
    clap::ArgGroup::new("ytol")
        .args(["atoly", "rtoly"])
        .multiple(true)
        .required(true)
))]
pub struct Cli {
    /// Path to the reference (baseline) curve CSV.
    #[arg(long, value_name = "PATH")]
    pub reference: PathBuf,

    /// Path to the test curve CSV to validate against the tube.
    #[arg(long, value_name = "PATH")]
    pub test: PathBuf,

    /// Directory to write the five output CSVs into; created recursively
    /// if missing.
    #[arg(long, value_name = "DIR")]
    pub output: PathBuf,

    /// Absolute tolerance in the x direction.
    ///
    /// Left as `Option` with no default: clap's `ArgGroup::required` only
    /// enforces "at least one of atolx/rtolx was given" when a missing arg
    /// is truly absent from the match, not defaulted to a value.
    #[arg(long, value_name = "F")]
    pub atolx: Option<f64>,

    /// Absolute tolerance in the y direction.
    #[arg(long, value_name = "F")]
    pub atoly: Option<f64>,

    /// Relative tolerance in the x direction, as a fraction of the
    /// reference curve's x range.
    #[arg(long, value_name = "F")]
    pub rtolx: Option<f64>,

    /// Relative tolerance in the y direction, as a fraction of the
    /// reference curve's y range.
    #[arg(long, value_name = "F")]
    pub rtoly: Option<f64>,

    /// Emit debug-level structured logs to stderr.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub verbose: bool,

    /// Emit only warnings and errors; overrides `--verbose` if both are given.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub brief: bool,
}

impl Cli {
    /// `--verbose` maps to `debug`, `--brief` to `warn` (taking precedence
    /// over `--verbose` if both are set), the default is `info`.
    pub fn log_level(&self) -> &'static str {
        if self.brief {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn brief_overrides_verbose_for_log_level() {
        let cli = Cli::parse_from([
            "funnel",
            "--reference",
            "r.csv",
            "--test",
            "t.csv",
            "--output",
            "out",
            "--atolx",
            "0.1",
            "--atoly",
            "0.1",
            "--verbose",
            "--brief",
        ]);
        assert_eq!(cli.log_level(), "warn");
        assert_eq!(cli.atolx, Some(0.1));
    }

    #[test]
    fn default_log_level_is_info() {
        let cli = Cli::parse_from([
            "funnel",
            "--reference",
            "r.csv",
            "--test",
            "t.csv",
            "--output",
            "out",
            "--atolx",
            "0.1",
            "--atoly",
            "0.1",
        ]);
        assert_eq!(cli.log_level(), "info");
    }

    #[test]
    fn missing_x_tolerance_is_rejected_by_the_arg_group() {
        let err = Cli::try_parse_from([
            "funnel",
            "--reference",
            "r.csv",
            "--test",
            "t.csv",
            "--output",
            "out",
            "--atoly",
            "0.1",
        ])
        .unwrap_err();
        assert!(err.to_string().to_lowercase().contains("required"));
    }
}
