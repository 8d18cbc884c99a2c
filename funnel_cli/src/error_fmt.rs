//! Human-readable error descriptions and exit-code mapping: match the
//! typed engine error first, then fall back to string heuristics for
//! I/O context chains.

use funnel_core::EngineError;

use crate::cli::VERBOSE_MODE;

/// Maps an `eyre::Report` to a "What happened / Likely causes / How to
/// fix" explanation, matching on the typed `EngineError` first and
/// falling back to string heuristics for non-typed I/O context chains.
///
/// Reads `VERBOSE_MODE` (set once from `--verbose` in `main`, the same
/// `doser_cli::JSON_MODE` pattern) before applying any of the non-typed
/// heuristics: once the user has already asked for `--verbose`, the raw
/// `eyre` cause chain is printed directly rather than a curated
/// one-liner that would hide detail they asked to see.
pub fn humanize(err: &eyre::Report) -> String {
    if let Some(e) = err.downcast_ref::<EngineError>() {
        return match e {
            EngineError::BadTolerance => {
                "What happened: No usable tolerance was given.\nLikely causes: Neither --atolx nor --rtolx was set, or neither --atoly nor --rtoly was set.\nHow to fix: Pass a positive value for at least one x tolerance and one y tolerance."
                    .to_string()
            }
            EngineError::DegenerateReference => {
                "What happened: The reference curve has fewer than two distinct points.\nLikely causes: An empty or constant-point reference CSV.\nHow to fix: Check --reference; it needs at least two distinct (x, y) points."
                    .to_string()
            }
            EngineError::EmptyEnvelope { side } => format!(
                "What happened: The {side:?} tube envelope has zero points after loop removal.\nLikely causes: A degenerate reference curve or tolerances reducing the rectangle to nothing.\nHow to fix: Widen atolx/atoly/rtolx/rtoly or inspect --reference for malformed data."
            ),
            EngineError::InvalidRange { detail } => format!(
                "What happened: Internal error while removing a backward segment ({detail}).\nLikely causes: An engine bug, not a problem with your input.\nHow to fix: Please file an issue with the reference/test CSVs attached."
            ),
        };
    }

    // --verbose trades the curated heuristics below for the raw eyre cause
    // chain: once the user has already asked for more detail, a terser
    // curated message would only be hiding context they asked to see.
    if *VERBOSE_MODE.get().unwrap_or(&false) {
        let full_chain = err
            .chain()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n  caused by: ");
        return format!("Something went wrong.\n{full_chain}");
    }

    let msg = err.to_string();
    // The keywords below are produced at different layers of the wrap chain
    // (funnel_io names the file operation, funnel_cli names the curve/report
    // role), so match against the whole chain joined together rather than
    // just the outermost `Display`, which would miss anything wrapped more
    // than one layer down.
    let chain: String = err
        .chain()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(": ")
        .to_ascii_lowercase();

    if chain.contains("open curve csv") && !chain.contains("for writing") {
        return format!(
            "What happened: Could not read an input CSV.\nLikely causes: The path is wrong or the file is unreadable.\nHow to fix: Check the --reference/--test path.\nOriginal: {msg}"
        );
    }

    if chain.contains("create output directory") {
        return format!(
            "What happened: Could not create the output directory.\nLikely causes: A parent path segment exists as a file, or permissions are insufficient.\nHow to fix: Check --output and filesystem permissions.\nOriginal: {msg}"
        );
    }

    if chain.contains("open curve csv for writing") || chain.contains("write") {
        return format!(
            "What happened: Could not write a report CSV.\nLikely causes: The output directory is not writable, or the disk is full.\nHow to fix: Check permissions and available space under --output.\nOriginal: {msg}"
        );
    }

    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!("Something went wrong.{cause}\nHow to fix: Re-run with --verbose for more detail. Original: {msg}")
}

/// Exit codes: 0 success, 1 generic failure, 2 bad tolerance, 3
/// degenerate reference, 4 empty envelope, 5 an internal invalid-range
/// bug.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    match err.downcast_ref::<EngineError>() {
        Some(EngineError::BadTolerance) => 2,
        Some(EngineError::DegenerateReference) => 3,
        Some(EngineError::EmptyEnvelope { .. }) => 4,
        Some(EngineError::InvalidRange { .. }) => 5,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bad_tolerance_maps_to_exit_code_2() {
        let err: eyre::Report = EngineError::BadTolerance.into();
        assert_eq!(exit_code_for_error(&err), 2);
        assert!(humanize(&err).contains("No usable tolerance"));
    }

    #[test]
    fn degenerate_reference_maps_to_exit_code_3() {
        let err: eyre::Report = EngineError::DegenerateReference.into();
        assert_eq!(exit_code_for_error(&err), 3);
    }

    #[test]
    fn generic_io_error_maps_to_exit_code_1() {
        // Mirrors the real wrap chain: funnel_io names the file operation,
        // funnel_cli's wrap_err_with names the curve role one layer up.
        let err = eyre::eyre!("not found")
            .wrap_err("open curve CSV \"missing.csv\"")
            .wrap_err("read reference curve \"missing.csv\"");
        assert_eq!(exit_code_for_error(&err), 1);
        assert!(humanize(&err).contains("Could not read an input CSV"));
    }

    #[test]
    fn output_directory_failure_is_distinguished_from_a_csv_write_failure() {
        let err = eyre::eyre!("permission denied")
            .wrap_err("create output directory \"/no/perm\"")
            .wrap_err("write report to \"/no/perm\"");
        assert_eq!(exit_code_for_error(&err), 1);
        assert!(humanize(&err).contains("Could not create the output directory"));
    }

    #[test]
    fn csv_row_write_failure_reports_as_write_failure() {
        let err = eyre::eyre!("disk full")
            .wrap_err("write row to \"out/lowerBound.csv\"")
            .wrap_err("write report to \"out\"");
        assert_eq!(exit_code_for_error(&err), 1);
        assert!(humanize(&err).contains("Could not write a report CSV"));
    }
}
