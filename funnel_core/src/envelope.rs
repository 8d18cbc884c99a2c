//! Raw envelope builder: sweeps a tolerance rectangle along the
//! reference curve to produce one side of the tube before loop removal.
//!
//! Walks the reference polyline and emits the rectangle-corner points that
//! form a candidate lower/upper envelope. A single function is
//! parameterized by [`Side`] rather than duplicated for lower and upper.
//! The point accumulator is a plain growable `Vec<f64>` pair with
//! push/pop at the back, giving the same O(1) push/pop and direct
//! indexing the horizontal-continuation collapse needs without re-walking
//! a list.

use crate::curve::{approx_eq, signum3, Curve};
use crate::error::{EngineError, Result};
use crate::side::Side;

/// Builds the raw (possibly self-intersecting) lower or upper envelope of
/// `reference` under the rectangle half-dimensions `(x_len, y_len)`.
///
/// # Panics
/// Debug-asserts `reference.len() >= 2`. A shorter reference is a caller
/// bug (the top-level entry point validates curve length before reaching
/// here), not a recoverable input error.
pub fn build_raw_envelope(reference: &Curve, x_len: f64, y_len: f64, side: Side) -> Result<Curve> {
    let n = reference.len();
    debug_assert!(n >= 2, "reference curve must have at least two points");

    // Initial-duplicate skip: find the first index `b` where the reference
    // does not immediately repeat itself.
    let mut b = 0usize;
    while b + 1 < n
        && approx_eq(reference.x[b], reference.x[b + 1])
        && approx_eq(reference.y[b], reference.y[b + 1])
    {
        b += 1;
    }
    if b + 1 >= n {
        return Err(EngineError::DegenerateReference);
    }

    let mut s0 = signum3(reference.y[b + 1] - reference.y[b]);
    let mut m0 = slope(reference.x[b], reference.y[b], reference.x[b + 1], reference.y[b + 1], s0);

    let y_off = side.y_offset(y_len);
    let mut cx: Vec<f64> = Vec::with_capacity(n * 2);
    let mut cy: Vec<f64> = Vec::with_capacity(n * 2);

    // ----- Start emission -----
    cx.push(reference.x[b] - x_len);
    cy.push(reference.y[b] + y_off);
    if start_second_corner(side, s0) {
        cx.push(reference.x[b] + x_len);
        cy.push(reference.y[b] + y_off);
    }

    // ----- Iteration -----
    for i in (b + 1)..(n - 1) {
        if approx_eq(reference.x[i], reference.x[i + 1])
            && approx_eq(reference.y[i], reference.y[i + 1])
        {
            continue;
        }

        let s1 = signum3(reference.y[i + 1] - reference.y[i]);
        let m1 = slope(
            reference.x[i],
            reference.y[i],
            reference.x[i + 1],
            reference.y[i + 1],
            s1,
        );

        if !approx_eq(m0, m1) {
            let left = (reference.x[i] - x_len, reference.y[i] + y_off);
            let right = (reference.x[i] + x_len, reference.y[i] + y_off);

            match side {
                Side::Lower => {
                    if s0 != -1 && s1 != -1 {
                        cx.push(right.0);
                        cy.push(right.1);
                    } else if s0 != 1 && s1 != 1 {
                        cx.push(left.0);
                        cy.push(left.1);
                    } else if s0 == -1 && s1 == 1 {
                        cx.push(left.0);
                        cy.push(left.1);
                        cx.push(right.0);
                        cy.push(right.1);
                    } else if s0 == 1 && s1 == -1 {
                        cx.push(right.0);
                        cy.push(right.1);
                        cx.push(left.0);
                        cy.push(left.1);
                    }
                }
                Side::Upper => {
                    if s0 != -1 && s1 != -1 {
                        cx.push(left.0);
                        cy.push(left.1);
                    } else if s0 != 1 && s1 != 1 {
                        cx.push(right.0);
                        cy.push(right.1);
                    } else if s0 == 1 && s1 == -1 {
                        cx.push(left.0);
                        cy.push(left.1);
                        cx.push(right.0);
                        cy.push(right.1);
                    } else if s0 == -1 && s1 == 1 {
                        cx.push(right.0);
                        cy.push(right.1);
                        cx.push(left.0);
                        cy.push(left.1);
                    }
                }
            }

            collapse_horizontal_continuation(&mut cx, &mut cy, reference.y[i + 1] + y_off, s0, s1);
        }

        s0 = s1;
        m0 = m1;
    }

    // ----- End emission -----
    let last = n - 1;
    match side {
        Side::Lower => {
            if s0 == -1 {
                cx.push(reference.x[last] - x_len);
                cy.push(reference.y[last] + y_off);
            }
            cx.push(reference.x[last] + x_len);
            cy.push(reference.y[last] + y_off);
        }
        Side::Upper => {
            if s0 == 1 {
                cx.push(reference.x[last] - x_len);
                cy.push(reference.y[last] + y_off);
            }
            cx.push(reference.x[last] + x_len);
            cy.push(reference.y[last] + y_off);
        }
    }

    tracing::debug!(side = ?side, points = cx.len(), "built raw envelope");
    Ok(Curve::new(cx, cy))
}

/// `Δy/Δx`, falling back to the `±1e15` convention when `Δx ≈ 0`, sign
/// following the strict slope sign `s`.
#[inline]
fn slope(x0: f64, y0: f64, x1: f64, y1: f64, s: i8) -> f64 {
    if !approx_eq(x1, x0) {
        (y1 - y0) / (x1 - x0)
    } else if s > 0 {
        1e15
    } else {
        -1e15
    }
}

/// Whether the start emission adds a second corner: lower adds the
/// down-right corner when the initial slope is increasing (`s0 == 1`);
/// upper adds the top-right corner when it is decreasing (`s0 == -1`).
#[inline]
fn start_second_corner(side: Side, s0: i8) -> bool {
    match side {
        Side::Lower => s0 == 1,
        Side::Upper => s0 == -1,
    }
}

/// If the segment about to arrive at `reference.y[i+1] + y_off` would
/// continue horizontally at the tube y just emitted, strip the emission
/// just made -- two points if they came from the opposite-slope branch
/// (`s0 * s1 == -1`), one point otherwise.
fn collapse_horizontal_continuation(cx: &mut Vec<f64>, cy: &mut Vec<f64>, next_y: f64, s0: i8, s1: i8) {
    let len = cy.len();
    let last_y = cy[len - 1];
    if !approx_eq(next_y, last_y) {
        return;
    }

    let product = (s0 as f64) * (s1 as f64);
    if approx_eq(product, -1.0) {
        if len >= 3 && approx_eq(cy[len - 3], last_y) {
            cx.truncate(len - 2);
            cy.truncate(len - 2);
        }
    } else if len >= 2 && approx_eq(cy[len - 2], last_y) {
        cx.truncate(len - 1);
        cy.truncate(len - 1);
    }
}
