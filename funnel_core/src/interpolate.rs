//! Piecewise-linear interpolation of an envelope curve onto an
//! arbitrary set of x values, with a monotone forward-only cursor.
//!
//! Resamples a source curve at a set of target x-coordinates with a
//! monotone cursor that only ever advances forward, matching how the
//! validator drives both tube edges across the test curve's own x
//! column.
//!
//! Two deliberate asymmetries, not relaxed into a tidier
//! clamp-both-ends interpolation:
//!   - Below the source's domain there is no guard at all: the first
//!     segment's slope is extrapolated backward.
//!   - At or above the source's last x, the scan stops outright and the
//!     result is shorter than `target_x` rather than padded with a
//!     clamped value -- callers must not assume `out.len() ==
//!     target_x.len()`.

use crate::curve::{approx_eq, Curve};

/// Interpolates `source` at each `target_x` in order, returning one y per
/// target up to (and not including) the first target at or beyond
/// `source.x[last]`. The result can therefore be shorter than
/// `target_x`; see the module docs for why this isn't a bug to paper
/// over.
///
/// An empty `source` has no y to report and returns an empty result
/// rather than panicking (see DESIGN.md for the reasoning). Callers
/// should not expect a nonempty result from an empty source.
pub fn interpolate(source: &Curve, target_x: &[f64]) -> Vec<f64> {
    if source.is_empty() {
        return Vec::new();
    }
    if source.len() == 1 {
        return vec![source.y[0]; target_x.len()];
    }

    let mut out = Vec::with_capacity(target_x.len());
    let mut cursor = 1usize;
    let last = source.len() - 1;

    for &tx in target_x {
        if tx > source.x[last] {
            break;
        }

        while source.x[cursor] < tx && cursor + 1 < source.len() {
            cursor += 1;
        }

        let (x0, y0) = (source.x[cursor - 1], source.y[cursor - 1]);
        let (x1, y1) = (source.x[cursor], source.y[cursor]);

        let y = if !approx_eq((x1 - x0) * (tx - x0), 0.0) {
            y0 + (y1 - y0) / (x1 - x0) * (tx - x0)
        } else {
            y0
        };
        out.push(y);
    }

    out
}
