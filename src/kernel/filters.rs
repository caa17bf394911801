//! kernel::filters — separable and rank filters with reflect boundaries.
//!
//! Purpose
//! -------
//! Provide the n-D spatial filters behind the filter transforms, all on
//! `ArrayD<f64>` working copies: 1-D correlation along an axis, sobel,
//! laplace, gaussian, uniform and median.
//!
//! Key behaviors
//! -------------
//! - Out-of-range samples are reflected about the array edge
//!   (`d c b a | a b c d | d c b a`).
//! - Kernels are centered at `len / 2`; even-length windows therefore reach
//!   one sample further back than forward.
//! - Separable filters apply their 1-D kernel along every axis in turn.
//!
//! Invariants & assumptions
//! ------------------------
//! - Inputs have at least one element on every axis.
//! - Filter sizes are clamped to `MIN_FILTER_SIZE..=MAX_FILTER_SIZE`.
//!
//! Testing notes
//! -------------
//! - Unit tests check boundary reflection, derivative signs, kernel
//!   normalization, and median rank selection on small hand-computed arrays.
use ndarray::{ArrayD, Axis};

/// Smallest median / uniform window.
pub const MIN_FILTER_SIZE: usize = 1;
/// Largest median / uniform window.
pub const MAX_FILTER_SIZE: usize = 999;
/// Gaussian kernels extend to `GAUSSIAN_TRUNCATE * sigma` on each side.
pub const GAUSSIAN_TRUNCATE: f64 = 4.0;

const DERIVATIVE: [f64; 3] = [-1.0, 0.0, 1.0];
const SMOOTH: [f64; 3] = [1.0, 2.0, 1.0];
const SECOND_DIFFERENCE: [f64; 3] = [1.0, -2.0, 1.0];

/// Clamp a requested window size into the supported range.
pub fn clamp_filter_size(size: usize) -> usize {
    size.clamp(MIN_FILTER_SIZE, MAX_FILTER_SIZE)
}

/// Map a possibly out-of-range index into `0..n` by mirror reflection.
#[inline]
pub fn reflect_index(index: isize, n: usize) -> usize {
    let period = 2 * n as isize;
    let m = index.rem_euclid(period);
    if m < n as isize { m as usize } else { (period - 1 - m) as usize }
}

/// Correlate every lane along `axis` with `weights`.
///
/// `out[i] = Σ_k weights[k] * in[reflect(i + k - len / 2)]`.
pub fn correlate1d(input: &ArrayD<f64>, axis: usize, weights: &[f64]) -> ArrayD<f64> {
    let n = input.len_of(Axis(axis));
    let center = (weights.len() / 2) as isize;
    let mut out = input.clone();
    let mut line = vec![0.0; n];
    for (src, mut dst) in input.lanes(Axis(axis)).into_iter().zip(out.lanes_mut(Axis(axis))) {
        for (l, v) in line.iter_mut().zip(src.iter()) {
            *l = *v;
        }
        for (i, d) in dst.iter_mut().enumerate() {
            *d = weights
                .iter()
                .enumerate()
                .map(|(k, w)| w * line[reflect_index(i as isize + k as isize - center, n)])
                .sum();
        }
    }
    out
}

/// Sobel edge filter: derivative along the last axis, `[1, 2, 1]` smoothing
/// along every other axis.
pub fn sobel(input: &ArrayD<f64>) -> ArrayD<f64> {
    let last = input.ndim().saturating_sub(1);
    let mut out = correlate1d(input, last, &DERIVATIVE);
    for axis in 0..last {
        out = correlate1d(&out, axis, &SMOOTH);
    }
    out
}

/// Discrete Laplacian: sum of `[1, -2, 1]` second differences over all axes.
pub fn laplace(input: &ArrayD<f64>) -> ArrayD<f64> {
    let mut out = ArrayD::<f64>::zeros(input.raw_dim());
    for axis in 0..input.ndim() {
        out += &correlate1d(input, axis, &SECOND_DIFFERENCE);
    }
    out
}

/// Normalized 1-D gaussian kernel of radius `round(truncate * sigma)`.
pub fn gaussian_kernel1d(sigma: f64) -> Vec<f64> {
    let radius = (GAUSSIAN_TRUNCATE * sigma + 0.5) as isize;
    let denom = 2.0 * sigma * sigma;
    let mut kernel: Vec<f64> =
        (-radius..=radius).map(|x| (-((x * x) as f64) / denom).exp()).collect();
    let sum: f64 = kernel.iter().sum();
    if sum > 0.0 {
        kernel.iter_mut().for_each(|w| *w /= sum);
    }
    kernel
}

/// Separable gaussian blur; `sigma <= 0` (or NaN) returns a copy.
pub fn gaussian(input: &ArrayD<f64>, sigma: f64) -> ArrayD<f64> {
    if sigma.is_nan() || sigma <= 0.0 {
        return input.clone();
    }
    let kernel = gaussian_kernel1d(sigma);
    let mut out = input.clone();
    for axis in 0..input.ndim() {
        out = correlate1d(&out, axis, &kernel);
    }
    out
}

/// Separable box average over a `size`-wide window on every axis.
pub fn uniform(input: &ArrayD<f64>, size: usize) -> ArrayD<f64> {
    let size = clamp_filter_size(size);
    let kernel = vec![1.0 / size as f64; size];
    let mut out = input.clone();
    for axis in 0..input.ndim() {
        out = correlate1d(&out, axis, &kernel);
    }
    out
}

fn advance(offset: &mut [usize], size: usize) -> bool {
    for o in offset.iter_mut().rev() {
        *o += 1;
        if *o < size {
            return true;
        }
        *o = 0;
    }
    false
}

/// Median over a `size`-wide hypercube window (the element of rank
/// `len / 2` of the sorted window).
pub fn median(input: &ArrayD<f64>, size: usize) -> ArrayD<f64> {
    let size = clamp_filter_size(size);
    let shape = input.shape().to_vec();
    let ndim = shape.len();
    let half = (size / 2) as isize;
    let mut window = Vec::with_capacity(size.saturating_pow(ndim as u32).min(1 << 20));
    let mut offset = vec![0usize; ndim];
    let mut source = vec![0usize; ndim];
    ArrayD::from_shape_fn(input.raw_dim(), |idx| {
        window.clear();
        offset.iter_mut().for_each(|o| *o = 0);
        loop {
            for k in 0..ndim {
                source[k] = reflect_index(idx[k] as isize + offset[k] as isize - half, shape[k]);
            }
            window.push(input[source.as_slice()]);
            if !advance(&mut offset, size) {
                break;
            }
        }
        let mid = window.len() / 2;
        let (_, value, _) = window.select_nth_unstable_by(mid, |a, b| a.total_cmp(b));
        *value
    })
}
