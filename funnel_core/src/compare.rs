//! Engine entry point: ties the resolver, envelope builder, loop
//! remover, and validator together into one pure function.
//!
//! Deliberately a plain in-memory function with no file I/O (owned by
//! `funnel_io`/`funnel_cli`) and no C-ABI/FFI surface.

use crate::curve::Curve;
use crate::envelope::build_raw_envelope;
use crate::error::{EngineError, Result};
use crate::loop_remove::remove_loops;
use crate::side::Side;
use crate::tolerance::{resolve_rectangle, Tolerances};
use crate::validate::{validate, ErrorReport};

/// The tube built from `reference` plus the validation of `test` against it.
#[derive(Debug, Clone, PartialEq)]
pub struct CompareOutcome {
    pub lower: Curve,
    pub upper: Curve,
    pub errors: ErrorReport,
}

/// Builds a tolerance tube around `reference` and validates `test`
/// against it, end to end.
pub fn compare(reference: &Curve, test: &Curve, tol: &Tolerances) -> Result<CompareOutcome> {
    let rect = resolve_rectangle(reference, tol)?;

    let lower_raw = build_raw_envelope(reference, rect.x_len, rect.y_len, Side::Lower)?;
    let upper_raw = build_raw_envelope(reference, rect.x_len, rect.y_len, Side::Upper)?;

    let lower = remove_loops(lower_raw, Side::Lower);
    let upper = remove_loops(upper_raw, Side::Upper);

    if lower.is_empty() {
        return Err(EngineError::EmptyEnvelope { side: Side::Lower });
    }
    if upper.is_empty() {
        return Err(EngineError::EmptyEnvelope { side: Side::Upper });
    }

    let errors = validate(&lower, &upper, test);

    tracing::info!(
        lower_points = lower.len(),
        upper_points = upper.len(),
        violations = errors.original.len(),
        "compared test curve against tube"
    );

    Ok(CompareOutcome { lower, upper, errors })
}
