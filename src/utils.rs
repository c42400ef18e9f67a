/// Replace values within `epsilon` of the origin by an exact `0.0`.
///
/// Removes sampling noise and signed zeros from points found near `x = 0`.
#[inline]
pub fn snap_to_zero(x: f64, epsilon: f64) -> f64 {
    if x.abs() < epsilon {
        0.0
    } else {
        x
    }
}

/// Number of intervals of width `step` covering `[min, max]`.
///
/// The grid has `sample_count(..) + 1` points including both endpoints.
/// Rounding absorbs representation error in `(max - min) / step`.
#[inline]
pub fn sample_count(min: f64, max: f64, step: f64) -> usize {
    ((max - min) / step).round() as usize
}

/// The `i`-th grid point, `min + i * step`.
///
/// Computed directly from the index so no error accumulates along the grid.
#[inline]
pub fn sample_at(min: f64, step: f64, i: usize) -> f64 {
    min + i as f64 * step
}
