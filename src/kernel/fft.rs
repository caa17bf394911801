//! kernel::fft — n-D complex FFTs, 2-D real FFTs and frequency shifts.
//!
//! Purpose
//! -------
//! Wrap `rustfft` / `realfft` into the array-level operations the Fourier
//! transforms need: forward/inverse complex transforms over every axis of an
//! `ArrayD`, a 2-D real-input transform pair, and `fftshift` / `ifftshift`.
//!
//! Conventions
//! -----------
//! - [`fftn`] is unnormalized; [`ifftn`] and [`irfft2`] divide by the number
//!   of transformed elements, so `ifftn(fftn(x)) == x`.
//! - [`rfft2`] keeps the non-negative frequencies of the last axis
//!   (`w / 2 + 1` bins); [`irfft2`] needs the original width to undo it.
//! - Shifts act on every axis: `fftshift` moves index 0 to `n / 2`.
use ndarray::{Array2, ArrayD, Axis};
use num_complex::Complex64;
use realfft::RealFftPlanner;
use rustfft::FftPlanner;

fn transform_axis(
    arr: &mut ArrayD<Complex64>, axis: usize, inverse: bool, planner: &mut FftPlanner<f64>,
) {
    let n = arr.len_of(Axis(axis));
    let fft = if inverse { planner.plan_fft_inverse(n) } else { planner.plan_fft_forward(n) };
    let mut buffer = vec![Complex64::new(0.0, 0.0); n];
    for mut lane in arr.lanes_mut(Axis(axis)) {
        for (dst, src) in buffer.iter_mut().zip(lane.iter()) {
            *dst = *src;
        }
        fft.process(&mut buffer);
        for (dst, src) in lane.iter_mut().zip(buffer.iter()) {
            *dst = *src;
        }
    }
}

/// Unnormalized forward transform over every axis.
pub fn fftn(arr: &ArrayD<Complex64>) -> ArrayD<Complex64> {
    let mut out = arr.clone();
    let mut planner = FftPlanner::new();
    for axis in 0..out.ndim() {
        transform_axis(&mut out, axis, false, &mut planner);
    }
    out
}

/// Inverse transform over every axis, normalized by `1 / N`.
pub fn ifftn(arr: &ArrayD<Complex64>) -> ArrayD<Complex64> {
    let mut out = arr.clone();
    let mut planner = FftPlanner::new();
    for axis in 0..out.ndim() {
        transform_axis(&mut out, axis, true, &mut planner);
    }
    let scale = 1.0 / out.len().max(1) as f64;
    out.mapv_inplace(|v| v * scale);
    out
}

/// Forward 2-D transform of real data: real FFT along axis 1, complex FFT
/// along axis 0. Output shape is `(h, w / 2 + 1)`.
///
/// Returns `None` if `realfft` rejects a buffer.
pub fn rfft2(arr: &Array2<f64>) -> Option<Array2<Complex64>> {
    let (h, w) = arr.dim();
    let bins = w / 2 + 1;
    let mut real_planner = RealFftPlanner::<f64>::new();
    let r2c = real_planner.plan_fft_forward(w);
    let mut input = r2c.make_input_vec();
    let mut spectrum = r2c.make_output_vec();
    let mut out = Array2::<Complex64>::zeros((h, bins));
    for (row, mut out_row) in arr.rows().into_iter().zip(out.rows_mut()) {
        for (dst, src) in input.iter_mut().zip(row.iter()) {
            *dst = *src;
        }
        r2c.process(&mut input, &mut spectrum).ok()?;
        for (dst, src) in out_row.iter_mut().zip(spectrum.iter()) {
            *dst = *src;
        }
    }
    let mut out = out.into_dyn();
    transform_axis(&mut out, 0, false, &mut FftPlanner::new());
    out.into_dimensionality().ok()
}

/// Inverse of [`rfft2`], normalized by `1 / (h * w)`. `width` is the width of
/// the original real array.
///
/// The imaginary parts of the zero-frequency bin (and of the Nyquist bin for
/// even widths) are discarded, as a real output requires.
pub fn irfft2(spectrum: &Array2<Complex64>, width: usize) -> Option<Array2<f64>> {
    let h = spectrum.nrows();
    let mut columns = spectrum.clone().into_dyn();
    transform_axis(&mut columns, 0, true, &mut FftPlanner::new());
    let columns: Array2<Complex64> = columns.into_dimensionality().ok()?;

    let mut real_planner = RealFftPlanner::<f64>::new();
    let c2r = real_planner.plan_fft_inverse(width);
    let mut bins = c2r.make_input_vec();
    let mut output = c2r.make_output_vec();
    let last = bins.len() - 1;
    let mut out = Array2::<f64>::zeros((h, width));
    let scale = 1.0 / (h * width) as f64;
    for (row, mut out_row) in columns.rows().into_iter().zip(out.rows_mut()) {
        for (dst, src) in bins.iter_mut().zip(row.iter()) {
            *dst = *src;
        }
        bins[0].im = 0.0;
        if width % 2 == 0 {
            bins[last].im = 0.0;
        }
        c2r.process(&mut bins, &mut output).ok()?;
        for (dst, src) in out_row.iter_mut().zip(output.iter()) {
            *dst = *src * scale;
        }
    }
    Some(out)
}

fn roll<T: Clone>(arr: &ArrayD<T>, shifts: &[usize]) -> ArrayD<T> {
    let shape = arr.shape().to_vec();
    let mut source = vec![0usize; shape.len()];
    ArrayD::from_shape_fn(arr.raw_dim(), |idx| {
        for (k, src) in source.iter_mut().enumerate() {
            let n = shape[k];
            *src = (idx[k] + n - shifts[k]) % n;
        }
        arr[source.as_slice()].clone()
    })
}

/// Move the zero-frequency element of every axis to the center.
pub fn fftshift<T: Clone>(arr: &ArrayD<T>) -> ArrayD<T> {
    let shifts: Vec<usize> = arr.shape().iter().map(|&n| n / 2).collect();
    roll(arr, &shifts)
}

/// Inverse of [`fftshift`] (differs from it for odd extents).
pub fn ifftshift<T: Clone>(arr: &ArrayD<T>) -> ArrayD<T> {
    let shifts: Vec<usize> = arr.shape().iter().map(|&n| n - n / 2).collect();
    roll(arr, &shifts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{array, Array1};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Forward/inverse complex transforms and their normalization.
    // - Real 2-D transform round trip.
    // - Shift index conventions for odd and even extents.
    // -------------------------------------------------------------------------

    fn c(re: f64) -> Complex64 {
        Complex64::new(re, 0.0)
    }

    #[test]
    // Purpose
    // -------
    // The transform of a unit impulse is flat and unnormalized.
    //
    // Given
    // -----
    // - `[1, 0, 0, 0]`.
    //
    // Expect
    // ------
    // - `[1, 1, 1, 1]`.
    fn impulse_transforms_to_ones() {
        let x = array![c(1.0), c(0.0), c(0.0), c(0.0)].into_dyn();
        let y = fftn(&x);
        for v in y.iter() {
            assert_abs_diff_eq!(v.re, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(v.im, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn inverse_undoes_forward_in_2d() {
        let x = Array2::from_shape_fn((3, 4), |(i, j)| Complex64::new(i as f64, j as f64 * 0.5))
            .into_dyn();
        let back = ifftn(&fftn(&x));
        for (a, b) in x.iter().zip(back.iter()) {
            assert_abs_diff_eq!(a.re, b.re, epsilon = 1e-12);
            assert_abs_diff_eq!(a.im, b.im, epsilon = 1e-12);
        }
    }

    #[test]
    // Purpose
    // -------
    // `irfft2(rfft2(x))` reproduces real input for odd and even widths.
    //
    // Given
    // -----
    // - A 4×5 and a 3×6 ramp.
    //
    // Expect
    // ------
    // - Element-wise equality within 1e-12.
    fn real_transform_round_trips() {
        for (h, w) in [(4, 5), (3, 6)] {
            let x = Array2::from_shape_fn((h, w), |(i, j)| (i * w + j) as f64 * 0.25 - 1.0);
            let spectrum = rfft2(&x).unwrap();
            assert_eq!(spectrum.dim(), (h, w / 2 + 1));
            let back = irfft2(&spectrum, w).unwrap();
            for (a, b) in x.iter().zip(back.iter()) {
                assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    // Purpose
    // -------
    // Shift conventions match the usual definition for odd extents.
    //
    // Given
    // -----
    // - `[0, 1, 2, 3, 4]`.
    //
    // Expect
    // ------
    // - `fftshift` → `[3, 4, 0, 1, 2]`, `ifftshift` undoes it.
    fn shifts_follow_convention() {
        let x = Array1::from_vec(vec![0, 1, 2, 3, 4]).into_dyn();
        let shifted = fftshift(&x);
        assert_eq!(shifted.as_slice().unwrap(), &[3, 4, 0, 1, 2]);
        assert_eq!(ifftshift(&shifted), x);
        let even = Array1::from_vec(vec![0, 1, 2, 3]).into_dyn();
        assert_eq!(fftshift(&even).as_slice().unwrap(), &[2, 3, 0, 1]);
    }
}
