//! Score normalisation functions.
//! Every rule-based scorer builds on the clip-and-rescale below.

/// Min-max normalisation within a given range [min_val, max_val].
pub fn minmax_normalise(value: f64, min_val: f64, max_val: f64) -> f64 {
    if (max_val - min_val).abs() < 1e-10 || !value.is_finite() {
        return 0.5; // degenerate case
    }
    ((value - min_val) / (max_val - min_val)).clamp(0.0, 1.0)
}

/// Clip-normalise `value` onto [0, 1] over [lo, hi], optionally inverted
/// so that lower raw values score higher.
pub fn normalize(value: f64, lo: f64, hi: f64, invert: bool) -> f64 {
    let v = minmax_normalise(value, lo, hi);
    if invert { 1.0 - v } else { v }
}
