//! kernel::grid — evenly spaced sample grids.
//!
//! Conventions
//! -----------
//! - [`linspace`] with `endpoint = true` hits `stop` exactly on its last
//!   sample; with `endpoint = false` it stops one step short.
//! - [`arange`] is half-open: `start, start + step, …` while short of `stop`.
//! - No grid is longer than [`MAX_GRID_LEN`] samples.

/// Longest grid [`arange`] builds (2²⁷ samples, 1 GiB of `f64`).
pub const MAX_GRID_LEN: usize = 1 << 27;

/// `num` evenly spaced samples from `start` towards `stop`.
///
/// Examples
/// --------
/// ```rust
/// # use calibrated_data::kernel::grid::linspace;
/// assert_eq!(linspace(0.0, 1.0, 5, true), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
/// assert_eq!(linspace(0.0, 1.0, 4, false), vec![0.0, 0.25, 0.5, 0.75]);
/// ```
pub fn linspace(start: f64, stop: f64, num: usize, endpoint: bool) -> Vec<f64> {
    let divisions = if endpoint { num.saturating_sub(1) } else { num };
    if divisions == 0 {
        return if num == 0 { Vec::new() } else { vec![start] };
    }
    let step = (stop - start) / divisions as f64;
    let mut out: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
    if endpoint {
        if let Some(last) = out.last_mut() {
            *last = stop;
        }
    }
    out
}

/// `base` raised to each sample of `linspace(start, stop, num, endpoint)`.
pub fn logspace(start: f64, stop: f64, num: usize, endpoint: bool, base: f64) -> Vec<f64> {
    linspace(start, stop, num, endpoint).into_iter().map(|e| base.powf(e)).collect()
}

/// Half-open range with a fixed step.
///
/// Returns `None` for a zero or non-finite step, a non-finite sample count
/// and for more than [`MAX_GRID_LEN`] samples. A step pointing away from
/// `stop` gives an empty range.
pub fn arange(start: f64, stop: f64, step: f64) -> Option<Vec<f64>> {
    if step == 0.0 || !step.is_finite() {
        return None;
    }
    let count = ((stop - start) / step).ceil();
    if count.is_nan() || count > MAX_GRID_LEN as f64 {
        return None;
    }
    let count = if count > 0.0 { count as usize } else { 0 };
    Some((0..count).map(|i| start + i as f64 * step).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linspace_edge_counts() {
        assert!(linspace(0.0, 1.0, 0, true).is_empty());
        assert_eq!(linspace(3.0, 7.0, 1, true), vec![3.0]);
        assert_eq!(linspace(-1.0, 1.0, 3, true), vec![-1.0, 0.0, 1.0]);
    }

    #[test]
    fn logspace_uses_base() {
        let out = logspace(0.0, 2.0, 3, true, 10.0);
        assert_relative_eq!(out[0], 1.0);
        assert_relative_eq!(out[1], 10.0);
        assert_relative_eq!(out[2], 100.0);
    }

    #[test]
    // Purpose
    // -------
    // `arange` is half-open, supports negative steps, rejects step 0.
    //
    // Given
    // -----
    // - (0, 5, 2), (5, 0, -2), (0, 1, 0), (3, 1, 1).
    //
    // Expect
    // ------
    // - `[0, 2, 4]`, `[5, 3, 1]`, `None`, `[]`.
    fn arange_is_half_open() {
        assert_eq!(arange(0.0, 5.0, 2.0), Some(vec![0.0, 2.0, 4.0]));
        assert_eq!(arange(5.0, 0.0, -2.0), Some(vec![5.0, 3.0, 1.0]));
        assert_eq!(arange(0.0, 1.0, 0.0), None);
        assert_eq!(arange(3.0, 1.0, 1.0), Some(Vec::new()));
    }

    #[test]
    // Purpose
    // -------
    // Sample counts beyond the grid cap, or without a finite value, are
    // refused before anything is allocated.
    //
    // Given
    // -----
    // - (0, 1e300, 1e-300), (0, ∞, 1), a count one past `MAX_GRID_LEN` and a
    //   NaN start.
    //
    // Expect
    // ------
    // - `None` each time; a small range still yields its samples.
    fn arange_caps_sample_count() {
        assert_eq!(arange(0.0, 1e300, 1e-300), None);
        assert_eq!(arange(0.0, f64::INFINITY, 1.0), None);
        assert_eq!(arange(0.0, MAX_GRID_LEN as f64 + 1.0, 1.0), None);
        assert_eq!(arange(f64::NAN, 1.0, 1.0), None);
        assert_eq!(arange(0.0, 3.0, 1.0).map(|v| v.len()), Some(3));
    }
}
