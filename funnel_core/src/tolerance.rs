//! Tolerance-to-rectangle resolver: turns four tolerance numbers and
//! a reference curve's ranges into the half-width/half-height of the
//! structuring rectangle swept along the curve.

use crate::curve::{approx_eq, Curve};
use crate::error::{EngineError, Result};

/// Four non-negative tolerance numbers. At least one of `{atolx, rtolx}`
/// and at least one of `{atoly, rtoly}` must be positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub atolx: f64,
    pub atoly: f64,
    pub rtolx: f64,
    pub rtoly: f64,
}

/// The structuring element swept along the reference: half-width `x_len`,
/// half-height `y_len`, plus three fields the current engine carries
/// through unread (`base_x`, `base_y`, `ratio`), reserved for a future
/// relative/ratio mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub x_len: f64,
    pub y_len: f64,
    pub base_x: f64,
    pub base_y: f64,
    pub ratio: f64,
    /// `max(ref.x) - min(ref.x)`, kept alongside `base_y`/`ratio` for
    /// callers that want the raw ranges the resolver computed. `range_y`
    /// holds the true y range rather than a second copy of `range_x` --
    /// see DESIGN.md for the reasoning.
    pub range_x: f64,
    pub range_y: f64,
}

/// Computes `(xLen, yLen)` from the reference curve's x/y ranges and the
/// four tolerances.
pub fn resolve_rectangle(reference: &Curve, tol: &Tolerances) -> Result<Rectangle> {
    let bad_x = approx_eq(tol.atolx, 0.0) && approx_eq(tol.rtolx, 0.0);
    let bad_y = approx_eq(tol.atoly, 0.0) && approx_eq(tol.rtoly, 0.0);
    if bad_x || bad_y {
        return Err(EngineError::BadTolerance);
    }

    let (min_x, max_x) = reference.x_range();
    let (min_y, max_y) = reference.y_range();
    let range_x = max_x - min_x;
    let range_y = max_y - min_y;

    let x_len = if approx_eq(range_x, 0.0) {
        f64::max(1e-5, 1e-5 * max_x.abs())
    } else {
        f64::max(tol.atolx, tol.rtolx * range_x)
    };

    let y_len = if approx_eq(range_y, 0.0) {
        f64::max(1e-5, 1e-5 * max_y.abs())
    } else {
        f64::max(tol.atoly, tol.rtoly * range_y)
    };

    tracing::debug!(x_len, y_len, range_x, range_y, "resolved tube rectangle");

    Ok(Rectangle {
        x_len,
        y_len,
        base_x: 0.0,
        base_y: 0.0,
        ratio: 0.0,
        range_x,
        range_y,
    })
}
