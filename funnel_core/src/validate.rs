//! Compares a test curve against the lower/upper tube bounds and
//! reports a sparse and a dense error curve.
//!
//! Interpolates both tube edges onto the test curve's x column, then
//! flags every test sample that falls outside `[lower, upper]`.

use crate::curve::Curve;
use crate::interpolate::interpolate;

/// `original` holds only the out-of-tolerance samples (sparse);
/// `diff` holds one signed deviation per compared sample, `0.0` where
/// the test curve stayed inside the tube (dense, `diff.x == test.x`
/// truncated to however many samples were actually compared).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorReport {
    pub original: Curve,
    pub diff: Curve,
}

impl ErrorReport {
    pub fn is_within_tolerance(&self) -> bool {
        self.original.is_empty()
    }
}

/// Validates `test` against the tube bounded by `lower`/`upper`.
///
/// Both tube edges are interpolated onto `test`'s x column first; the
/// comparison itself then walks only as many samples as both
/// interpolations actually produced (the interpolator can truncate when
/// `test` outruns a tube edge's x domain -- see [`interpolate`]), rather
/// than trusting `test.len()` and risking an out-of-bounds read on a
/// truncated tube.
pub fn validate(lower: &Curve, upper: &Curve, test: &Curve) -> ErrorReport {
    let lower_y = interpolate(lower, &test.x);
    let upper_y = interpolate(upper, &test.x);
    let n = test.len().min(lower_y.len()).min(upper_y.len());

    let mut original = Curve::empty();
    let mut diff = Curve::empty();

    for i in 0..n {
        let ty = test.y[i];
        let deviation = if ty < lower_y[i] {
            lower_y[i] - ty
        } else if ty > upper_y[i] {
            ty - upper_y[i]
        } else {
            0.0
        };

        if deviation > 0.0 {
            original.push(test.x[i], deviation);
        }
        diff.push(test.x[i], deviation);
    }

    ErrorReport { original, diff }
}
