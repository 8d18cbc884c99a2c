//! Resolves self-intersecting and backward-x segments in a raw
//! envelope into a strictly x-monotone curve.
//!
//! Post-processes a raw envelope, finding segments that move backward in
//! x, locating the pair of segments whose intersection resolves the loop,
//! deleting the enclosed points, inserting the intersection, and
//! de-duplicating the seam. Operates on owned `Vec<f64>` buffers with
//! in-place splice/insert/remove, avoiding the O(N^2) copies a
//! resize-on-every-mutation scheme would incur.
//!
//! The index arithmetic below treats its own preconditions as
//! assertions rather than validated input: a malformed raw envelope
//! panics here rather than returning a recoverable error. A raw envelope
//! produced by [`crate::envelope::build_raw_envelope`] always satisfies
//! these preconditions, so the panics are unreachable in practice.

use crate::curve::{approx_eq, Curve};
use crate::side::Side;

/// Removes backward (self-intersecting) segments from a raw envelope,
/// returning a curve that is strictly non-decreasing in x with no
/// adjacent duplicates.
pub fn remove_loops(raw: Curve, side: Side) -> Curve {
    let mut x = raw.x;
    let mut y = raw.y;
    let mut j = 1usize;
    let mut loops_removed = 0u32;

    while x.len() >= 3 && j < x.len() - 2 {
        if x[j + 1] < x[j] {
            loops_removed += 1;
            j = resolve_backward_segment(&mut x, &mut y, j, side);
        }
        j += 1;
    }

    if loops_removed > 0 {
        tracing::debug!(side = ?side, loops_removed, "removed backward segments");
    }

    Curve::new(x, y)
}

/// Resolves the single backward segment found at `(j, j+1)`, mutating `x`/`y`
/// in place and returning the scan cursor the outer loop should resume from
/// (before its own unconditional `+= 1`).
fn resolve_backward_segment(x: &mut Vec<f64>, y: &mut Vec<f64>, j: usize, side: Side) -> usize {
    let re_size = x.len();
    debug_assert!(
        re_size >= 3 && j + 1 < re_size,
        "loop remover precondition violated: backward segment (j, j+1) is out of range (malformed raw envelope)"
    );

    // ---- Step A: locate entry index i ----
    let mut i = j;
    while i > 0 && x[j + 1] < x[i - 1] {
        i -= 1;
    }
    debug_assert!(
        i > 0,
        "loop remover precondition violated: entry index decremented to 0 while locating the backward segment's left shoulder (malformed raw envelope)"
    );
    let mut i_previous = i;

    // ---- Step B: locate exit index k ----
    let mut k_max = j + 1;
    while k_max < re_size - 1 && x[k_max] < x[j] {
        k_max += 1;
    }
    debug_assert!(
        k_max < re_size,
        "loop remover precondition violated: exit search index escaped the raw envelope bounds (malformed raw envelope)"
    );

    let mut k = j + 1;
    let mut y_cursor = y[i - 1];

    while k < k_max && side.k_should_advance(y_cursor, y[k]) {
        debug_assert!(
            i < re_size && k < re_size,
            "loop remover precondition violated: i/k walked out of the raw envelope while resolving a backward segment (malformed raw envelope)"
        );
        i_previous = i;
        k += 1;
        while i < j && advance_i_predicate(x, y, side, i, k, re_size) {
            i += 1;
        }
        y_cursor = interpolate_at(x, y, i, k);
    }

    // k located; i approximately located on the run (i_previous - 1, i).
    i = if i_previous > 1 { i_previous - 1 } else { i_previous };

    if !approx_eq(x[k], x[k - 1]) {
        y_cursor = (y[k] - y[k - 1]) / (x[k] - x[k - 1]) * (x[i] - x[k - 1]) + y[k - 1];
    }

    while (!approx_eq(x[k], x[k - 1]) && side.i_below_interpolated(y[i], y_cursor))
        || (approx_eq(x[k], x[k - 1]) && x[i] < x[k])
    {
        i += 1;
        if !approx_eq(x[k], x[k - 1]) {
            y_cursor = (y[k] - y[k - 1]) / (x[k] - x[k - 1]) * (x[i] - x[k - 1]) + y[k - 1];
        }
    }

    debug_assert!(
        i >= 1 && k >= 1 && i <= k && k < re_size,
        "loop remover precondition violated: entry/exit indices out of order or out of bounds before splicing (malformed raw envelope)"
    );

    // ---- Step C: intersection of segments (i-1, i) and (k-1, k) ----
    let (add_point, ix, iy) = intersection_point(x, y, i, k);

    // ---- Step D: delete the enclosed points [i, k) ----
    x.splice(i..k, std::iter::empty());
    y.splice(i..k, std::iter::empty());

    // ---- Step E: insert the intersection point, unless it already
    // coincides with the point now sitting at position i ----
    if add_point {
        let coincides = i < x.len() && approx_eq(x[i], ix) && approx_eq(y[i], iy);
        if !coincides {
            x.insert(i, ix);
            y.insert(i, iy);
        }
    }

    let mut next_j = i;

    // ---- Step F: deduplicate the seam ----
    if i > 0 && i < x.len() && approx_eq(x[i - 1], x[i]) && approx_eq(y[i - 1], y[i]) {
        x.remove(i);
        y.remove(i);
        next_j = i - 1;
    }

    next_j
}

#[inline]
fn interpolate_at(x: &[f64], y: &[f64], i: usize, k: usize) -> f64 {
    if !approx_eq(x[i], x[i - 1]) {
        (y[i] - y[i - 1]) / (x[i] - x[i - 1]) * (x[k] - x[i - 1]) + y[i - 1]
    } else {
        y[i]
    }
}

/// The composite predicate gating whether `i` should advance while
/// locating `k`: purely geometric (`X[i] < X[k]`), or a tie at equal x
/// broken by the side's y-preference, unless the point just beyond `k`
/// shows the tie is about to resolve itself on its own.
fn advance_i_predicate(x: &[f64], y: &[f64], side: Side, i: usize, k: usize, re_size: usize) -> bool {
    if x[i] < x[k] {
        return true;
    }
    if approx_eq(x[i], x[k]) && side.i_prefers_lower_y(y[i], y[k]) {
        let lookahead_resolves =
            k + 1 < re_size && approx_eq(x[k], x[k + 1]) && side.i_prefers_lower_y(y[k + 1], y[k]);
        return !lookahead_resolves;
    }
    false
}

/// Computes the intersection of segment `(i-1, i)` and `(k-1, k)`,
/// returning `(add_point, ix, iy)`. `add_point` is false when both
/// segments are vertical or have equal slope (no well-defined single
/// intersection).
fn intersection_point(x: &[f64], y: &[f64], i: usize, k: usize) -> (bool, f64, f64) {
    let i_vertical = approx_eq(x[i], x[i - 1]);
    let k_vertical = approx_eq(x[k], x[k - 1]);

    if i_vertical && k_vertical {
        (false, 0.0, 0.0)
    } else if i_vertical {
        let ix = x[i];
        let iy = y[k - 1] + ((x[i] - x[k - 1]) * (y[k] - y[k - 1])) / (x[k] - x[k - 1]);
        (true, ix, iy)
    } else if k_vertical {
        let ix = x[k];
        let iy = y[i - 1] + ((x[k] - x[i - 1]) * (y[i] - y[i - 1])) / (x[i] - x[i - 1]);
        (true, ix, iy)
    } else {
        let a1 = (y[i] - y[i - 1]) / (x[i] - x[i - 1]);
        let a2 = (y[k] - y[k - 1]) / (x[k] - x[k - 1]);
        if approx_eq(a1, a2) {
            (false, 0.0, 0.0)
        } else {
            let ix = (a1 * x[i - 1] - a2 * x[k - 1] - y[i - 1] + y[k - 1]) / (a1 - a2);
            let iy = if a1.abs() > a2.abs() {
                a2 * (ix - x[k - 1]) + y[k - 1]
            } else {
                a1 * (ix - x[i - 1]) + y[i - 1]
            };
            (true, ix, iy)
        }
    }
}
