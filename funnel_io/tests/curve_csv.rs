//! Round-trip and malformed-input coverage for the curve CSV reader and
//! writer, driven against `tempfile` fixtures.

use funnel_core::Curve;
use funnel_io::{ensure_output_dir, read_curve_csv, write_curve_csv, write_report};
use rstest::rstest;
use std::fs;

#[rstest]
fn reads_comma_delimited_csv_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reference.csv");
    fs::write(&path, "x,y\n0.0,0.0\n1.0,1.5\n2.0,0.0\n").unwrap();

    let curve = read_curve_csv(&path).unwrap();
    assert_eq!(curve.x, vec![0.0, 1.0, 2.0]);
    assert_eq!(curve.y, vec![0.0, 1.5, 0.0]);
}

#[rstest]
fn reads_semicolon_delimited_csv_with_header() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reference.csv");
    fs::write(&path, "x;y\n0.0;0.0\n1.0;1.5\n").unwrap();

    let curve = read_curve_csv(&path).unwrap();
    assert_eq!(curve.x, vec![0.0, 1.0]);
    assert_eq!(curve.y, vec![0.0, 1.5]);
}

#[rstest]
fn trailing_garbage_row_truncates_the_scan_instead_of_erroring() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("reference.csv");
    fs::write(&path, "x,y\n0.0,0.0\n1.0,1.0\nnot,numbers,here\n").unwrap();

    let curve = read_curve_csv(&path).unwrap();
    assert_eq!(curve.x, vec![0.0, 1.0]);
    assert_eq!(curve.y, vec![0.0, 1.0]);
}

#[rstest]
fn missing_file_is_reported_with_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does-not-exist.csv");
    let err = read_curve_csv(&path).unwrap_err();
    assert!(format!("{err:#}").contains("does-not-exist.csv"));
}

#[rstest]
fn write_then_read_round_trips_exactly() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.csv");
    let curve = Curve::new(vec![0.0, 0.5, 1.25], vec![-3.0, 0.0, 9.75]);

    write_curve_csv(&path, &curve).unwrap();
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.starts_with("x,y\n"));

    let round_tripped = read_curve_csv(&path).unwrap();
    assert_eq!(round_tripped.x, curve.x);
    assert_eq!(round_tripped.y, curve.y);
}

#[rstest]
fn ensure_output_dir_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("results").join("run1");
    ensure_output_dir(&nested).unwrap();
    ensure_output_dir(&nested).unwrap();
    assert!(nested.is_dir());
}

#[rstest]
fn write_report_creates_the_output_directory_and_all_five_files() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested").join("results");
    let reference = Curve::new(vec![0.0, 1.0, 2.0], vec![0.0, 0.0, 0.0]);
    let test = reference.clone();
    let lower = Curve::new(vec![-0.1, 2.1], vec![-0.1, -0.1]);
    let upper = Curve::new(vec![-0.1, 2.1], vec![0.1, 0.1]);
    let errors = Curve::new(vec![0.0, 1.0, 2.0], vec![0.0, 0.0, 0.0]);

    write_report(&out, &reference, &test, &lower, &upper, &errors).unwrap();

    assert_eq!(read_curve_csv(&out.join("reference.csv")).unwrap().x, reference.x);
    assert_eq!(read_curve_csv(&out.join("lowerBound.csv")).unwrap().y, lower.y);
    assert_eq!(read_curve_csv(&out.join("upperBound.csv")).unwrap().y, upper.y);
    assert_eq!(read_curve_csv(&out.join("test.csv")).unwrap().x, test.x);
    assert_eq!(read_curve_csv(&out.join("errors.csv")).unwrap().y, errors.y);
}
