//! kernel::stats — summary statistics and histogram binning.
//!
//! Purpose
//! -------
//! Provide the descriptive statistics the correlation, rescale and histogram
//! transforms need on `f64` working arrays.
//!
//! Conventions
//! -----------
//! - `std` is the population standard deviation (divisor `n`).
//! - Empty inputs yield `NaN` for mean/std and `None` for min/max/ptp.
//! - [`histogram`] bins like the common array-library routine: equal-width
//!   bins over `[min, max]`, the last bin closed on the right, and a
//!   degenerate range widened to `min ± 0.5`.
use ndarray::ArrayD;

pub fn mean(values: &ArrayD<f64>) -> f64 {
    values.sum() / values.len() as f64
}

pub fn std(values: &ArrayD<f64>) -> f64 {
    let m = mean(values);
    let var = values.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / values.len() as f64;
    var.sqrt()
}

pub fn min(values: &ArrayD<f64>) -> Option<f64> {
    values.iter().copied().reduce(f64::min)
}

pub fn max(values: &ArrayD<f64>) -> Option<f64> {
    values.iter().copied().reduce(f64::max)
}

/// Peak-to-peak range `max - min`.
pub fn ptp(values: &ArrayD<f64>) -> Option<f64> {
    Some(max(values)? - min(values)?)
}

/// Subtract the mean and divide by the standard deviation; data with zero
/// spread is returned unchanged.
pub fn normalize(values: &ArrayD<f64>) -> ArrayD<f64> {
    let s = std(values);
    if s != 0.0 {
        let m = mean(values);
        values.mapv(|v| (v - m) / s)
    } else {
        values.clone()
    }
}

/// Bin edges and counts over the finite values of `values`.
///
/// Returns `(edges, counts)` with `edges.len() == bins + 1`. Non-finite
/// values are not counted. With no finite values the range is `[0, 1]`.
///
/// Panics
/// ------
/// - If `bins == 0`.
pub fn histogram(values: &ArrayD<f64>, bins: usize) -> (Vec<f64>, Vec<i64>) {
    assert!(bins > 0, "histogram needs at least one bin");
    let finite = values.iter().copied().filter(|v| v.is_finite());
    let (mut lo, mut hi) = finite
        .clone()
        .fold(None, |acc: Option<(f64, f64)>, v| match acc {
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            None => Some((v, v)),
        })
        .unwrap_or((0.0, 1.0));
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let edges = crate::kernel::grid::linspace(lo, hi, bins + 1, true);
    let norm = bins as f64 / (hi - lo);
    let mut counts = vec![0i64; bins];
    for v in finite {
        let mut index = (((v - lo) * norm) as usize).min(bins - 1);
        if v < edges[index] && index > 0 {
            index -= 1;
        } else if index + 1 < bins && v >= edges[index + 1] {
            index += 1;
        }
        counts[index] += 1;
    }
    (edges, counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    #[test]
    fn summary_statistics() {
        let x = array![1.0, 2.0, 3.0, 4.0].into_dyn();
        assert_relative_eq!(mean(&x), 2.5);
        assert_relative_eq!(std(&x), 1.25_f64.sqrt());
        assert_eq!(ptp(&x), Some(3.0));
        assert_eq!(min(&ArrayD::<f64>::zeros(ndarray::IxDyn(&[0]))), None);
    }

    #[test]
    fn normalize_skips_flat_data() {
        let flat = array![2.0, 2.0].into_dyn();
        assert_eq!(normalize(&flat), flat);
        let x = array![1.0, 3.0].into_dyn();
        assert_eq!(normalize(&x), array![-1.0, 1.0].into_dyn());
    }

    #[test]
    // Purpose
    // -------
    // Counts follow equal-width bins with a closed last bin.
    //
    // Given
    // -----
    // - `[0, 1, 2, 3, 4]` in 4 bins.
    //
    // Expect
    // ------
    // - Edges `[0, 1, 2, 3, 4]`, counts `[1, 1, 1, 2]`.
    fn histogram_closes_last_bin() {
        let x = array![0.0, 1.0, 2.0, 3.0, 4.0].into_dyn();
        let (edges, counts) = histogram(&x, 4);
        assert_eq!(edges, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
        assert_eq!(counts, vec![1, 1, 1, 2]);
    }

    #[test]
    fn histogram_widens_degenerate_range_and_skips_nan() {
        let x = array![5.0, 5.0, f64::NAN].into_dyn();
        let (edges, counts) = histogram(&x, 2);
        assert_relative_eq!(edges[0], 4.5);
        assert_relative_eq!(edges[2], 5.5);
        assert_eq!(counts, vec![0, 2]);
    }
}
