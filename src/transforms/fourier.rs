//! transforms::fourier — Fourier transforms, correlations and Fourier masks.
//!
//! Purpose
//! -------
//! Move calibrated values between real and reciprocal space and compute
//! FFT-based correlations, keeping the dimensional calibrations consistent
//! with the frequency axes the transforms produce.
//!
//! Key behaviors
//! -------------
//! - [`fft`]: centered, unitary forward transform of rank-1/2 numeric data.
//!   Axis calibrations become `(-0.5 / scale, 1 / (scale * n), "1/" + units)`.
//! - [`ifft`]: un-centers (`ifftshift`) then inverts, restoring the original
//!   scaling. Axis calibrations become `(0, 1 / (scale * n), toggled units)`.
//! - [`autocorrelate`] / [`crosscorrelate`]: normalized real 2-D
//!   correlations, centered on zero lag, uncalibrated.
//! - [`fourier_mask`]: makes a mask symmetric under the centered transform
//!   and multiplies it into the data.
//!
//! Invariants & assumptions
//! ------------------------
//! - Forward and inverse transforms are scaled by `1 / sqrt(N)` and
//!   `sqrt(N)`, so `ifft(fft(x)) == x` up to rounding.
//! - Transforms reset the intensity calibration and empty the metadata;
//!   `fourier_mask` passes both through.
//!
//! Conventions
//! -----------
//! - Spectra are always Complex128.
//! - Correlations are `Float64` and peak at `[h / 2, w / 2]` for zero lag.
use crate::{
    data::{
        reciprocal_units, toggle_reciprocal_units,
        validation::{reject, valid_descriptor, valid_descriptor_with_rank, valid_payload},
        ArrayData, Calibration, DataAndMetadata, DataDescriptor, DataType, Metadata, Payload,
    },
    kernel::{
        fft::{fftn, fftshift, ifftn, ifftshift, irfft2, rfft2},
        stats,
    },
};
use ndarray::{Array2, ArrayD, Ix2};
use num_complex::Complex64;

/// Numeric source descriptor of rank 1 or 2.
///
/// Panics
/// ------
/// - If the source has rank 3 or more.
fn spectral_descriptor(source: &DataAndMetadata, entry: &str) -> Option<DataDescriptor> {
    let descriptor = valid_descriptor(source, entry)?;
    if descriptor.data_type.is_color() {
        return reject(entry, "color data has no Fourier transform");
    }
    let rank = descriptor.rank();
    if rank > 2 {
        unimplemented!("{entry} of rank-{rank} data");
    }
    Some(descriptor)
}

/// Centered forward Fourier transform of rank-1 or rank-2 numeric data.
///
/// Parameters
/// ----------
/// - `source`: [`DataAndMetadata`]
///   Real or complex numeric value of rank 1 or 2.
///
/// Returns
/// -------
/// Complex128 value `fftshift(fftn(x) / sqrt(N))` with reciprocal-space
/// calibrations, an uncalibrated intensity and empty metadata. `None` for
/// an invalid or color source.
///
/// Panics
/// ------
/// - If the source has rank 3 or more.
///
/// Examples
/// --------
/// ```rust
/// # use calibrated_data::prelude::*;
/// # use calibrated_data::transforms::fourier::fft;
/// let x = DataAndMetadata::new(
///     Payload::from(ndarray::Array2::<f64>::ones((4, 4)).into_dyn()),
///     Calibration::new(0.0, 2.0, "counts"),
///     Some(vec![Calibration::new(0.0, 1.0, "nm"); 2]),
///     Metadata::new(),
/// )
/// .unwrap();
/// let spectrum = fft(&x).unwrap();
/// assert_eq!(spectrum.dimensional_calibrations()[0], Calibration::new(-0.5, 0.25, "1/nm"));
/// assert_eq!(spectrum.data_dtype(), Some(DataType::Complex128));
/// ```
pub fn fft(source: &DataAndMetadata) -> Option<DataAndMetadata> {
    let descriptor = spectral_descriptor(source, "fft")?;
    let calibrations = source
        .dimensional_calibrations()
        .iter()
        .zip(&descriptor.data_shape)
        .map(|(cal, &n)| {
            Calibration::new(
                -0.5 / cal.scale,
                1.0 / (cal.scale * n as f64),
                reciprocal_units(&cal.units),
            )
        })
        .collect();
    let src = source.clone();
    Some(DataAndMetadata::deferred(
        DataDescriptor::new(descriptor.data_shape, DataType::Complex128),
        move || {
            let data = valid_payload(&src, "fft")?.as_numeric()?;
            let scaling = 1.0 / (data.len() as f64).sqrt();
            let mut spectrum = fftn(&data.to_complex());
            spectrum.mapv_inplace(|v| v * scaling);
            Some(Payload::from(fftshift(&spectrum)))
        },
        Calibration::uncalibrated(),
        calibrations,
        Metadata::new(),
    ))
}

/// Inverse of [`fft`]: `ifftn(ifftshift(x)) * sqrt(N)`.
///
/// Axis calibrations become `(0, 1 / (scale * n), units)` with one leading
/// `"1/"` stripped from the units, or prepended when absent. Output is
/// Complex128 with an uncalibrated intensity and empty metadata.
///
/// Panics
/// ------
/// - If the source has rank 3 or more.
pub fn ifft(source: &DataAndMetadata) -> Option<DataAndMetadata> {
    let descriptor = spectral_descriptor(source, "ifft")?;
    let calibrations = source
        .dimensional_calibrations()
        .iter()
        .zip(&descriptor.data_shape)
        .map(|(cal, &n)| {
            Calibration::new(
                0.0,
                1.0 / (cal.scale * n as f64),
                toggle_reciprocal_units(&cal.units),
            )
        })
        .collect();
    let src = source.clone();
    Some(DataAndMetadata::deferred(
        DataDescriptor::new(descriptor.data_shape, DataType::Complex128),
        move || {
            let data = valid_payload(&src, "ifft")?.as_numeric()?;
            let scaling = (data.len() as f64).sqrt();
            let mut signal = ifftn(&ifftshift(&data.to_complex()));
            signal.mapv_inplace(|v| v * scaling);
            Some(Payload::from(signal))
        },
        Calibration::uncalibrated(),
        calibrations,
        Metadata::new(),
    ))
}

fn real_image_descriptor(source: &DataAndMetadata, entry: &str) -> Option<DataDescriptor> {
    let descriptor = valid_descriptor_with_rank(source, entry, 2)?;
    if !descriptor.data_type.is_real() {
        return reject(entry, format_args!("{:?} data is not real", descriptor.data_type));
    }
    Some(descriptor)
}

fn normalized_image(source: &DataAndMetadata, entry: &str) -> Option<Array2<f64>> {
    let data = valid_payload(source, entry)?.as_numeric()?.to_f64()?;
    stats::normalize(&data).into_dimensionality::<Ix2>().ok()
}

/// `fftshift(irfft2(rfft2(a) * conj(rfft2(b)))) / (h * w)`.
fn correlate(a: &Array2<f64>, b: &Array2<f64>) -> Option<ArrayD<f64>> {
    let (h, w) = a.dim();
    let product = rfft2(a)? * rfft2(b)?.mapv(|v| v.conj());
    let correlation = irfft2(&product, w)?;
    let scaling = 1.0 / (h * w) as f64;
    Some(fftshift(&correlation.into_dyn()).mapv(|v| v * scaling))
}

fn correlation_value<F>(descriptor: DataDescriptor, compute: F) -> DataAndMetadata
where
    F: FnOnce() -> Option<Payload> + Send + 'static,
{
    let rank = descriptor.rank();
    DataAndMetadata::deferred(
        DataDescriptor::new(descriptor.data_shape, DataType::Float64),
        compute,
        Calibration::uncalibrated(),
        vec![Calibration::uncalibrated(); rank],
        Metadata::new(),
    )
}

/// Normalized autocorrelation of real rank-2 data.
///
/// The data is shifted to zero mean and scaled to unit variance (skipped for
/// constant data) before correlating, so the zero-lag peak at
/// `[h / 2, w / 2]` is 1 for non-constant input. Complex or color sources
/// yield `None`.
pub fn autocorrelate(source: &DataAndMetadata) -> Option<DataAndMetadata> {
    let descriptor = real_image_descriptor(source, "autocorrelate")?;
    let src = source.clone();
    Some(correlation_value(descriptor, move || {
        let image = normalized_image(&src, "autocorrelate")?;
        correlate(&image, &image).map(Payload::from)
    }))
}

/// Normalized cross-correlation of two real rank-2 values of equal shape.
pub fn crosscorrelate(
    first: &DataAndMetadata, second: &DataAndMetadata,
) -> Option<DataAndMetadata> {
    let descriptor = real_image_descriptor(first, "crosscorrelate")?;
    let other = real_image_descriptor(second, "crosscorrelate")?;
    if descriptor.data_shape != other.data_shape {
        return reject(
            "crosscorrelate",
            format_args!("shapes {:?} and {:?} differ", descriptor.data_shape, other.data_shape),
        );
    }
    let (a, b) = (first.clone(), second.clone());
    Some(correlation_value(descriptor, move || {
        let first = normalized_image(&a, "crosscorrelate")?;
        let second = normalized_image(&b, "crosscorrelate")?;
        correlate(&first, &second).map(Payload::from)
    }))
}

/// Mask consistent with a centered transform of real data.
///
/// The quadrant below-right of the center is kept, the one below-left is
/// kept, and both are mirrored through the center into the upper half.
/// Rows `0`, `h / 2` and columns `0`, `w / 2` always pass.
fn symmetric_mask(mask: &Array2<f64>) -> Array2<f64> {
    let (h, w) = mask.dim();
    let (yh, xh) = (h / 2, w / 2);
    let mut out = Array2::<f64>::ones((h, w));
    for j in 0..h - 1 - yh {
        let (below, above) = (yh + 1 + j, yh - 1 - j);
        for l in 0..w - 1 - xh {
            let (right, left) = (xh + 1 + l, xh - 1 - l);
            out[[below, right]] = mask[[below, right]];
            out[[below, left]] = mask[[below, left]];
            out[[above, left]] = mask[[below, right]];
            out[[above, right]] = mask[[below, left]];
        }
    }
    out.row_mut(0).fill(1.0);
    out.row_mut(yh).fill(1.0);
    out.column_mut(0).fill(1.0);
    out.column_mut(xh).fill(1.0);
    out
}

/// Multiply rank-2 data by the symmetrized version of a real rank-2 mask.
///
/// Parameters
/// ----------
/// - `source`: numeric rank-2 value.
/// - `mask`: real rank-2 value of the same shape.
///
/// Returns
/// -------
/// Value with the source calibrations, intensity and metadata. Real data
/// becomes Float64; complex data keeps its element type. `None` on shape
/// mismatch or color / complex masks.
pub fn fourier_mask(source: &DataAndMetadata, mask: &DataAndMetadata) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor_with_rank(source, "fourier_mask", 2)?;
    let mask_descriptor = real_image_descriptor(mask, "fourier_mask")?;
    if descriptor.data_type.is_color() {
        return reject("fourier_mask", "color data cannot be masked");
    }
    if descriptor.data_shape != mask_descriptor.data_shape {
        return reject(
            "fourier_mask",
            format_args!(
                "mask shape {:?} differs from data shape {:?}",
                mask_descriptor.data_shape, descriptor.data_shape
            ),
        );
    }
    let dtype =
        if descriptor.data_type.is_complex() { descriptor.data_type } else { DataType::Float64 };
    let (src, mask_src) = (source.clone(), mask.clone());
    Some(DataAndMetadata::deferred(
        DataDescriptor::new(descriptor.data_shape, dtype),
        move || {
            let data = valid_payload(&src, "fourier_mask")?.as_numeric()?;
            let mask = valid_payload(&mask_src, "fourier_mask")?.as_numeric()?.to_f64()?;
            let mask = symmetric_mask(&mask.into_dimensionality::<Ix2>().ok()?).into_dyn();
            let masked = match data.to_f64() {
                Some(real) => ArrayData::Float64(real * &mask),
                None => {
                    let product = data.to_complex() * &mask.mapv(Complex64::from);
                    ArrayData::from_complex_as(dtype, &product)?
                }
            };
            Some(Payload::Numeric(masked))
        },
        source.intensity_calibration().clone(),
        source.dimensional_calibrations().to_vec(),
        source.metadata().clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use ndarray::{Array1, Array3};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Calibration and unit propagation through fft / ifft.
    // - Transform scaling, centering and the ifft(fft(x)) round trip.
    // - Correlation peak normalization and shape guards.
    // - Fourier mask symmetrization.
    //
    // They intentionally DO NOT cover:
    // - FFT numerics themselves (tested in `kernel::fft`).
    // -------------------------------------------------------------------------

    fn image(values: Array2<f64>, units: &str) -> DataAndMetadata {
        DataAndMetadata::new(
            Payload::from(values.into_dyn()),
            Calibration::new(0.0, 3.0, "e"),
            Some(vec![Calibration::new(0.0, 1.0, units); 2]),
            Metadata::new(),
        )
        .unwrap()
    }

    fn complex_data(value: &DataAndMetadata) -> ArrayD<Complex64> {
        value.data().and_then(Payload::as_numeric).map(ArrayData::to_complex).unwrap()
    }

    fn real_data(value: &DataAndMetadata) -> ArrayD<f64> {
        value.data().and_then(Payload::to_real_f64).unwrap()
    }

    fn ramp(h: usize, w: usize) -> Array2<f64> {
        Array2::from_shape_fn((h, w), |(i, j)| ((i * 7 + j * 3) % 5) as f64 + 0.5 * i as f64)
    }

    #[test]
    // Purpose
    // -------
    // A 4×4 value calibrated in nm transforms to centered 1/nm axes with an
    // uncalibrated intensity.
    //
    // Given
    // -----
    // - 4×4 ones, axis calibrations `(0, 1, "nm")`, intensity `(0, 3, "e")`.
    //
    // Expect
    // ------
    // - Axis calibrations `(-0.5, 0.25, "1/nm")`, intensity uncalibrated.
    // - The DC term `16 / 4 = 4` sits at the center `[2, 2]`.
    fn fft_moves_to_reciprocal_space() {
        let spectrum = fft(&image(Array2::ones((4, 4)), "nm")).unwrap();
        assert_eq!(
            spectrum.dimensional_calibrations(),
            vec![Calibration::new(-0.5, 0.25, "1/nm"); 2].as_slice()
        );
        assert_eq!(spectrum.intensity_calibration(), &Calibration::uncalibrated());
        assert!(spectrum.metadata().is_empty());
        let data = complex_data(&spectrum);
        assert_abs_diff_eq!(data[[2, 2]].re, 4.0, epsilon = 1e-12);
        assert_abs_diff_eq!(data[[0, 0]].norm(), 0.0, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // `ifft(fft(x))` reproduces the data and the units for odd and even
    // extents.
    //
    // Given
    // -----
    // - 4×4 and 3×5 ramps calibrated in nm.
    //
    // Expect
    // ------
    // - Real parts equal the input within 1e-10, imaginary parts vanish.
    // - Axis units back to "nm" with scale 1.
    fn inverse_round_trips_data_and_units() {
        for (h, w) in [(4, 4), (3, 5)] {
            let x = image(ramp(h, w), "nm");
            let back = ifft(&fft(&x).unwrap()).unwrap();
            let data = complex_data(&back);
            for (a, b) in ramp(h, w).iter().zip(data.iter()) {
                assert_abs_diff_eq!(*a, b.re, epsilon = 1e-10);
                assert_abs_diff_eq!(b.im, 0.0, epsilon = 1e-10);
            }
            for cal in back.dimensional_calibrations() {
                assert_eq!(cal.units, "nm");
                assert_relative_eq!(cal.scale, 1.0);
                assert_relative_eq!(cal.offset, 0.0);
            }
        }
    }

    #[test]
    fn fft_of_line_is_unitary() {
        let x = DataAndMetadata::from_payload(Payload::from(
            Array1::from(vec![1.0, 2.0, 3.0, 4.0]).into_dyn(),
        ));
        let spectrum = complex_data(&fft(&x).unwrap());
        let energy: f64 = spectrum.iter().map(|v| v.norm_sqr()).sum();
        assert_relative_eq!(energy, 30.0, epsilon = 1e-10);
    }

    #[test]
    fn fft_rejects_color() {
        let rgb = Payload::rgb(Array3::<u8>::zeros((2, 2, 3)).into_dyn()).unwrap();
        assert!(fft(&DataAndMetadata::from_payload(rgb)).is_none());
    }

    #[test]
    #[should_panic(expected = "rank-3")]
    fn fft_of_volume_is_unimplemented() {
        let volume = Payload::from(Array3::<f64>::zeros((2, 2, 2)).into_dyn());
        let _ = fft(&DataAndMetadata::from_payload(volume));
    }

    #[test]
    // Purpose
    // -------
    // The normalized autocorrelation peaks at 1 in the center and carries no
    // calibration.
    //
    // Given
    // -----
    // - A non-constant 6×5 calibrated image.
    //
    // Expect
    // ------
    // - `out[3, 2] == 1`, every other lag ≤ 1, Float64, uncalibrated axes.
    fn autocorrelation_peaks_at_zero_lag() {
        let out = autocorrelate(&image(ramp(6, 5), "nm")).unwrap();
        assert_eq!(out.data_dtype(), Some(DataType::Float64));
        assert!(out.dimensional_calibrations().iter().all(|c| !c.is_calibrated()));
        let data = real_data(&out);
        assert_relative_eq!(data[[3, 2]], 1.0, epsilon = 1e-10);
        assert!(data.iter().all(|&v| v <= 1.0 + 1e-10));
    }

    #[test]
    // Purpose
    // -------
    // Constant data skips the unit-variance scaling and still correlates to a
    // finite, uncalibrated result.
    //
    // Given
    // -----
    // - A calibrated 4×6 image filled with 2.0.
    //
    // Expect
    // ------
    // - Float64 output whose every lag is finite and equals `2.0² = 4.0`.
    // - Uncalibrated intensity and axes, empty metadata.
    fn autocorrelation_of_constant_image_is_finite() {
        let out = autocorrelate(&image(Array2::from_elem((4, 6), 2.0), "nm")).unwrap();
        assert_eq!(out.data_dtype(), Some(DataType::Float64));
        assert!(!out.intensity_calibration().is_calibrated());
        assert!(out.dimensional_calibrations().iter().all(|c| !c.is_calibrated()));
        assert!(out.metadata().is_empty());
        let data = real_data(&out);
        assert_eq!(data.shape(), &[4, 6]);
        for &v in data.iter() {
            assert!(v.is_finite());
            assert_relative_eq!(v, 4.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn crosscorrelation_of_self_matches_autocorrelation() {
        let x = image(ramp(4, 6), "nm");
        let cross = real_data(&crosscorrelate(&x, &x).unwrap());
        let auto = real_data(&autocorrelate(&x).unwrap());
        for (a, b) in cross.iter().zip(auto.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
        let other = image(ramp(4, 5), "nm");
        assert!(crosscorrelate(&x, &other).is_none());
    }

    #[test]
    fn correlations_reject_complex_data() {
        let data = Array2::from_elem((2, 2), Complex64::new(1.0, 1.0)).into_dyn();
        let value = DataAndMetadata::from_payload(Payload::from(data));
        assert!(autocorrelate(&value).is_none());
    }

    #[test]
    // Purpose
    // -------
    // The mask is mirrored through the center and the axis rows/columns
    // always pass.
    //
    // Given
    // -----
    // - 6×6 ones masked by zeros except `mask[4, 5] = 1`.
    //
    // Expect
    // ------
    // - `out[4, 5] == 1` and its mirror `out[2, 1] == 1`.
    // - Row 3 and column 3 (the centers) pass; `out[4, 4] == out[2, 2] == 0`.
    fn fourier_mask_mirrors_quadrants() {
        let mut mask = Array2::<f64>::zeros((6, 6));
        mask[[4, 5]] = 1.0;
        let out = fourier_mask(&image(Array2::ones((6, 6)), "nm"), &image(mask, "")).unwrap();
        let data = real_data(&out);
        assert_relative_eq!(data[[4, 5]], 1.0);
        assert_relative_eq!(data[[2, 1]], 1.0);
        assert_relative_eq!(data[[3, 4]], 1.0);
        assert_relative_eq!(data[[5, 3]], 1.0);
        assert_relative_eq!(data[[0, 5]], 1.0);
        assert_relative_eq!(data[[4, 4]], 0.0);
        assert_relative_eq!(data[[2, 2]], 0.0);
        assert_eq!(out.dimensional_calibrations()[0].units, "nm");
    }

    #[test]
    fn fourier_mask_keeps_complex_data_complex() {
        let data = Array2::from_elem((3, 3), Complex64::new(2.0, -1.0)).into_dyn();
        let value = DataAndMetadata::from_payload(Payload::from(data));
        let mask =
            DataAndMetadata::from_payload(Payload::from(Array2::<f64>::zeros((3, 3)).into_dyn()));
        let out = fourier_mask(&value, &mask).unwrap();
        assert_eq!(out.data_dtype(), Some(DataType::Complex128));
        // Only [2, 2] lies off the always-passing rows and columns.
        assert_eq!(complex_data(&out)[[2, 2]], Complex64::new(0.0, 0.0));
        assert_eq!(complex_data(&out)[[1, 2]], Complex64::new(2.0, -1.0));
    }
}
