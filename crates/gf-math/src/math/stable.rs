//! Floor and clamp helpers that keep NaN visible.
//!
//! The estimator never validates its inputs, so these helpers must not turn a
//! NaN into a finite number. `f64::max`/`f64::min` would silently do that.

/// Raise `value` to `floor` when it falls below it.
///
/// NaN is returned unchanged.
#[inline]
pub fn floor_at(value: f64, floor: f64) -> f64 {
    if value < floor {
        floor
    } else {
        value
    }
}

/// Clamp `value` into `[lo, hi]`.
///
/// NaN is returned unchanged. Bounds are swapped if given in the wrong order.
#[inline]
pub fn clamp_to(value: f64, lo: f64, hi: f64) -> f64 {
    let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
    if value < lo {
        lo
    } else if value > hi {
        hi
    } else {
        value
    }
}

/// Absolute-tolerance comparison; false if either side is NaN.
#[inline]
pub fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() <= tol
}
