//! transforms::profile — intensity profiles along a line segment.
//!
//! Purpose
//! -------
//! Sample a rank-2 value along a segment given in fractional coordinates,
//! optionally averaging over a band of parallel lines, and return the result
//! as a rank-1 value calibrated like the source's second axis.
//!
//! Key behaviors
//! -------------
//! - Endpoints are converted to pixels as `trunc(n * fraction)` per axis.
//! - A segment of pixel length `L > 1` yields `floor(L)` samples evenly
//!   spaced from the start to the end, both included. Shorter segments
//!   yield a single zero.
//! - The band has `min(max(h, w), integration_width)` lines spaced one
//!   pixel apart, centered on the segment; the profile is their mean.
//! - Color data is profiled on its luminance; complex data is rejected.
//!
//! Conventions
//! -----------
//! - Points are `(y, x)`. Samples outside the grid read as 0.
use crate::{
    data::{
        validation::{reject, valid_descriptor_with_rank, valid_payload},
        Calibration, DataAndMetadata, DataDescriptor, DataType, Payload,
    },
    geometry::{FloatPoint, FloatVector},
    kernel::{
        grid,
        interpolate::{sample_linear, sample_nearest},
    },
    transforms::options::SampleMethod,
};
use ndarray::{Array1, Array2, ArrayD, Ix2};

/// Pixel position of a fractional point on an `h × w` grid.
fn pixel(point: FloatPoint, h: usize, w: usize) -> (f64, f64) {
    ((h as f64 * point.y).trunc(), (w as f64 * point.x).trunc())
}

/// Band-averaged samples along `start → end`; `count` samples, `lines`
/// parallel lines.
fn sample_band(
    image: &Array2<f64>, start: (f64, f64), end: (f64, f64), count: usize, lines: usize,
    method: SampleMethod,
) -> Array1<f64> {
    let length = (end.0 - start.0).hypot(end.1 - start.1);
    let (dy, dx) = ((end.0 - start.0) / length, (end.1 - start.1) / length);
    let half = (lines - 1) as f64 * 0.5;
    let along = grid::linspace(0.0, length, count, true);
    let across = grid::linspace(-half, half, lines, true);
    let sample = match method {
        SampleMethod::Nearest => sample_nearest,
        SampleMethod::Linear => sample_linear,
    };
    along
        .iter()
        .map(|&a| {
            let total: f64 = across
                .iter()
                .map(|&t| sample(image, start.0 + dy * a + dx * t, start.1 + dx * a - dy * t))
                .sum();
            total / lines as f64
        })
        .collect()
}

/// Profile of a rank-2 value along `vector`.
///
/// Parameters
/// ----------
/// - `source`: rank-2 real or color value.
/// - `vector`: [`FloatVector`]
///   Segment endpoints as fractions of the data extent.
/// - `integration_width`: `usize`
///   Number of parallel lines averaged; capped at the larger data extent.
/// - `method`: [`SampleMethod`]
///   Point sampler.
///
/// Returns
/// -------
/// `Float64` rank-1 value calibrated `(0, scale₁, units₁)` from the second
/// source axis; intensity calibration and metadata pass through. `None` for
/// other ranks or complex data.
///
/// Panics
/// ------
/// - If `integration_width == 0`.
pub fn line_profile(
    source: &DataAndMetadata, vector: FloatVector, integration_width: usize,
    method: SampleMethod,
) -> Option<DataAndMetadata> {
    assert!(integration_width > 0, "line_profile needs a positive integration width");
    let descriptor = valid_descriptor_with_rank(source, "line_profile", 2)?;
    if descriptor.data_type.is_complex() {
        return reject("line_profile", "complex data has no profile");
    }
    let (h, w) = (descriptor.data_shape[0], descriptor.data_shape[1]);
    let start = pixel(vector.start, h, w);
    let end = pixel(vector.end, h, w);
    let length = (end.0 - start.0).hypot(end.1 - start.1);
    let count = if length > 1.0 { length.floor() as usize } else { 1 };
    let lines = h.max(w).min(integration_width);

    let axis = &source.dimensional_calibrations()[1];
    let calibration = Calibration::new(0.0, axis.scale, axis.units.clone());
    let src = source.clone();
    Some(DataAndMetadata::deferred(
        DataDescriptor::new(vec![count], DataType::Float64),
        move || {
            if length <= 1.0 {
                return Some(Payload::from(Array1::<f64>::zeros(1).into_dyn()));
            }
            let values: ArrayD<f64> = valid_payload(&src, "line_profile")?.to_real_f64()?;
            let image = values.into_dimensionality::<Ix2>().ok()?;
            let profile = sample_band(&image, start, end, count, lines, method);
            Some(Payload::from(profile.into_dyn()))
        },
        source.intensity_calibration().clone(),
        vec![calibration],
        source.metadata().clone(),
    ))
}
