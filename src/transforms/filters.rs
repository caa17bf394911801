//! transforms::filters — spatial filters with calibration pass-through.
//!
//! Purpose
//! -------
//! Expose the `kernel::filters` routines as catalog entries on calibrated
//! values: edge detection (sobel, laplace) and smoothing (gaussian, median,
//! uniform).
//!
//! Key behaviors
//! -------------
//! - Shape, calibrations, intensity calibration and metadata pass through;
//!   only the payload changes.
//! - Real data is filtered in `f64` and cast back to its element type.
//! - Complex data runs the linear filters on real and imaginary parts
//!   separately; the median has no complex counterpart and yields `None`.
//! - Color data is filtered per channel; R, G and B independently, alpha
//!   copied unchanged.
use crate::{
    data::{
        validation::{reject, valid_descriptor, valid_payload},
        DataAndMetadata, Payload,
    },
    kernel::filters,
};
use ndarray::{ArrayD, Axis};

/// Filter each of the R, G, B channels of a color array; alpha is kept.
fn filter_channels<F>(arr: &ArrayD<u8>, op: &F) -> ArrayD<u8>
where
    F: Fn(&ArrayD<f64>) -> ArrayD<f64>,
{
    let channel_axis = Axis(arr.ndim() - 1);
    let mut out = arr.clone();
    for c in 0..3 {
        let filtered = op(&arr.index_axis(channel_axis, c).mapv(f64::from));
        out.index_axis_mut(channel_axis, c).zip_mut_with(&filtered, |o, &v| *o = v as u8);
    }
    out
}

fn filter_payload<F>(payload: &Payload, op: F) -> Option<Payload>
where
    F: Fn(&ArrayD<f64>) -> ArrayD<f64>,
{
    match payload {
        Payload::Numeric(data) => data.map_linear(op).map(Payload::Numeric),
        Payload::Rgb(arr) => Some(Payload::Rgb(filter_channels(arr, &op))),
        Payload::Rgba(arr) => Some(Payload::Rgba(filter_channels(arr, &op))),
    }
}

/// Deferred filter of `source` with everything but the payload passed
/// through.
fn filtered<F>(source: &DataAndMetadata, entry: &'static str, op: F) -> Option<DataAndMetadata>
where
    F: Fn(&ArrayD<f64>) -> ArrayD<f64> + Send + 'static,
{
    let descriptor = valid_descriptor(source, entry)?;
    let src = source.clone();
    Some(DataAndMetadata::deferred(
        descriptor,
        move || filter_payload(valid_payload(&src, entry)?, op),
        source.intensity_calibration().clone(),
        source.dimensional_calibrations().to_vec(),
        source.metadata().clone(),
    ))
}

/// Sobel edge filter: derivative along the last data axis, `[1, 2, 1]`
/// smoothing along the others.
pub fn sobel(source: &DataAndMetadata) -> Option<DataAndMetadata> {
    filtered(source, "sobel", filters::sobel)
}

/// Discrete Laplacian (sum of second differences over every axis).
pub fn laplace(source: &DataAndMetadata) -> Option<DataAndMetadata> {
    filtered(source, "laplace", filters::laplace)
}

/// Gaussian blur with standard deviation `sigma` in pixels.
///
/// A non-positive `sigma` leaves the data unchanged.
pub fn gaussian_blur(source: &DataAndMetadata, sigma: f64) -> Option<DataAndMetadata> {
    filtered(source, "gaussian_blur", move |a| filters::gaussian(a, sigma))
}

/// Median over a `size`-wide window on every axis.
///
/// Parameters
/// ----------
/// - `source`: real or color value.
/// - `size`: window width, clamped to
///   `MIN_FILTER_SIZE..=MAX_FILTER_SIZE` (see `kernel::filters`).
///
/// Returns
/// -------
/// Filtered value with unchanged calibrations; `None` for complex data.
pub fn median_filter(source: &DataAndMetadata, size: usize) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor(source, "median_filter")?;
    if descriptor.data_type.is_complex() {
        return reject("median_filter", "complex data has no median");
    }
    filtered(source, "median_filter", move |a| filters::median(a, size))
}

/// Box average over a `size`-wide window on every axis (size clamped like
/// [`median_filter`]).
pub fn uniform_filter(source: &DataAndMetadata, size: usize) -> Option<DataAndMetadata> {
    filtered(source, "uniform_filter", move |a| filters::uniform(a, size))
}
