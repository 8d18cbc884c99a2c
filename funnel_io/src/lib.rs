#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! CSV curve I/O and output-directory handling for the tube comparison
//! engine.
//!
//! `funnel_core` is pure numerics over in-memory `Curve`s; this crate is
//! the external collaborator around it -- reading reference/test curves
//! from CSV, creating the output directory, and writing the five report
//! CSVs, so the engine itself never touches a filesystem path.

use std::fs;
use std::io::Write;
use std::path::Path;

use eyre::WrapErr;
use funnel_core::Curve;

/// Reads a two-column curve CSV: one header line skipped, rows delimited
/// by comma or semicolon. Stops at the first row that doesn't parse as two
/// numbers, tolerant to trailing garbage rather than erroring on it.
///
/// `csv` fixes its delimiter per reader, so a comma-delimited reader is
/// tried first; a row that doesn't split into two comma fields (because
/// the file actually uses `;`) falls back to a manual split on `;` of
/// that row's raw text.
pub fn read_curve_csv(path: &Path) -> eyre::Result<Curve> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .delimiter(b',')
        .from_path(path)
        .wrap_err_with(|| format!("open curve CSV {path:?}"))?;

    let mut x = Vec::new();
    let mut y = Vec::new();

    for result in rdr.records() {
        let record = match result {
            Ok(r) => r,
            Err(_) => break,
        };
        match parse_record(&record) {
            Some((xi, yi)) => {
                x.push(xi);
                y.push(yi);
            }
            None => break,
        }
    }

    Ok(Curve::new(x, y))
}

/// Parses a CSV record as two doubles. A record already split into two
/// comma fields is used directly; a record collapsed into a single field
/// (the semicolon-delimited case) is re-split on `;`. Anything else ends
/// the scan rather than erroring, so a malformed trailing line silently
/// truncates the curve instead of failing the whole read.
fn parse_record(record: &csv::StringRecord) -> Option<(f64, f64)> {
    match record.len() {
        2 => {
            let xi = record.get(0)?.trim().parse::<f64>().ok()?;
            let yi = record.get(1)?.trim().parse::<f64>().ok()?;
            Some((xi, yi))
        }
        1 => {
            let line = record.get(0)?;
            let mut fields = line.splitn(2, ';');
            let xi = fields.next()?.trim().parse::<f64>().ok()?;
            let yi = fields.next()?.trim().parse::<f64>().ok()?;
            Some((xi, yi))
        }
        _ => None,
    }
}

/// Writes a curve CSV with header `x,y` and one `x,y` row per point.
/// Rust's default `f64` `Display` round-trips losslessly, used here
/// instead of a fixed-precision format string -- see DESIGN.md.
pub fn write_curve_csv(path: &Path, curve: &Curve) -> eyre::Result<()> {
    let mut file =
        fs::File::create(path).wrap_err_with(|| format!("open curve CSV {path:?} for writing"))?;
    writeln!(file, "x,y").wrap_err_with(|| format!("write header to {path:?}"))?;
    for i in 0..curve.len() {
        let (xi, yi) = curve.point(i);
        writeln!(file, "{xi},{yi}").wrap_err_with(|| format!("write row to {path:?}"))?;
    }
    Ok(())
}

/// Creates `dir` recursively if missing. `std::fs::create_dir_all`
/// already accepts both `/` and the platform's native separator.
pub fn ensure_output_dir(dir: &Path) -> eyre::Result<()> {
    fs::create_dir_all(dir).wrap_err_with(|| format!("create output directory {dir:?}"))
}

/// Writes the five report CSVs (reference, test, lower/upper bound,
/// errors) into `dir`, creating the directory first.
pub fn write_report(
    dir: &Path,
    reference: &Curve,
    test: &Curve,
    lower: &Curve,
    upper: &Curve,
    errors: &Curve,
) -> eyre::Result<()> {
    ensure_output_dir(dir)?;
    write_curve_csv(&dir.join("reference.csv"), reference)?;
    write_curve_csv(&dir.join("test.csv"), test)?;
    write_curve_csv(&dir.join("lowerBound.csv"), lower)?;
    write_curve_csv(&dir.join("upperBound.csv"), upper)?;
    write_curve_csv(&dir.join("errors.csv"), errors)?;
    tracing::debug!(dir = ?dir, "wrote funnel report CSVs");
    Ok(())
}
