//! transforms::generators — values computed from coordinates alone.
//!
//! Purpose
//! -------
//! Build new values whose payload depends only on a shape: coordinate ramps
//! (`column`, `row`), the radial distance map (`radius`), constant fills and
//! 1-D sample grids.
//!
//! Key behaviors
//! -------------
//! - `column` / `row` / `radius` take a rank-2 source for its shape and pass
//!   its intensity calibration, dimensional calibrations and metadata
//!   through; the source payload itself is never read.
//! - `full`, `arange`, `linspace` and `logspace` produce uncalibrated values
//!   with empty metadata. Empty grids and grids longer than
//!   `kernel::grid::MAX_GRID_LEN` are absent.
//!
//! Conventions
//! -----------
//! - Axis `k` of a coordinate ramp samples `linspace(start, stop, n_k)`
//!   inclusive of both ends; the default range is `0..=n_k`.
use crate::{
    data::{
        validation::{reject, valid_descriptor_with_rank},
        ArrayData, DataAndMetadata, DataDescriptor, DataType, Payload, is_shape_and_dtype_valid,
    },
    kernel::grid,
};
use ndarray::{Array1, Array2, ArrayD, IxDyn};

/// Shared body of the rank-2 coordinate generators: `bounds(n)` gives the
/// sampled range of an axis of extent `n`, `combine(y, x)` the value.
fn coordinate_map<B, F>(
    source: &DataAndMetadata, entry: &str, bounds: B, combine: F,
) -> Option<DataAndMetadata>
where
    B: Fn(usize) -> (f64, f64),
    F: Fn(f64, f64) -> f64 + Send + 'static,
{
    let descriptor = valid_descriptor_with_rank(source, entry, 2)?;
    let (h, w) = (descriptor.data_shape[0], descriptor.data_shape[1]);
    let (y0, y1) = bounds(h);
    let (x0, x1) = bounds(w);
    Some(DataAndMetadata::deferred(
        DataDescriptor::new(vec![h, w], DataType::Float64),
        move || {
            let ys = grid::linspace(y0, y1, h, true);
            let xs = grid::linspace(x0, x1, w, true);
            let values = Array2::from_shape_fn((h, w), |(i, j)| combine(ys[i], xs[j]));
            Some(Payload::from(values.into_dyn()))
        },
        source.intensity_calibration().clone(),
        source.dimensional_calibrations().to_vec(),
        source.metadata().clone(),
    ))
}

/// Horizontal coordinate ramp with the shape of a rank-2 source.
///
/// Parameters
/// ----------
/// - `source`: rank-2 value supplying shape, calibrations and metadata.
/// - `start`, `stop`: `Option<f64>`
///   Sampled range, applied to both axes; defaults `0` and the axis extent.
///
/// Returns
/// -------
/// Float64 value whose element `[i, j]` is the `j`-th sample of the range
/// along axis 1; `None` when the source is not a valid rank-2 value.
pub fn column(
    source: &DataAndMetadata, start: Option<f64>, stop: Option<f64>,
) -> Option<DataAndMetadata> {
    let start = start.unwrap_or(0.0);
    coordinate_map(source, "column", |n| (start, stop.unwrap_or(n as f64)), |_, x| x)
}

/// Vertical coordinate ramp; the mirror of [`column`] along axis 0.
pub fn row(
    source: &DataAndMetadata, start: Option<f64>, stop: Option<f64>,
) -> Option<DataAndMetadata> {
    let start = start.unwrap_or(0.0);
    coordinate_map(source, "row", |n| (start, stop.unwrap_or(n as f64)), |y, _| y)
}

/// Distance from the center of a rank-2 grid.
///
/// Each axis spans `[-1, 1]` when `normalize` is set, otherwise
/// `[-n/2, n/2]` in pixels.
pub fn radius(source: &DataAndMetadata, normalize: bool) -> Option<DataAndMetadata> {
    coordinate_map(
        source,
        "radius",
        |n| {
            let half = if normalize { 1.0 } else { n as f64 * 0.5 };
            (-half, half)
        },
        |y, x| (y * y + x * x).sqrt(),
    )
}

/// Constant-valued, uncalibrated value of the given shape and element type.
///
/// Returns `None` for an invalid shape or a color element type.
pub fn full(shape: &[usize], value: f64, dtype: DataType) -> Option<DataAndMetadata> {
    if !is_shape_and_dtype_valid(shape, dtype) {
        return reject("full", format_args!("invalid shape {shape:?}"));
    }
    match ArrayData::from_f64_as(dtype, &ArrayD::from_elem(IxDyn(shape), value)) {
        Some(data) => Some(DataAndMetadata::from_payload(Payload::Numeric(data))),
        None => reject("full", format_args!("cannot fill a {dtype:?} payload")),
    }
}

/// Rank-1 value over `values`; an empty grid is absent like any other
/// zero-extent shape.
fn grid_value(entry: &str, values: Vec<f64>) -> Option<DataAndMetadata> {
    if values.is_empty() {
        return reject(entry, "empty grid");
    }
    Some(DataAndMetadata::from_payload(Payload::from(Array1::from(values).into_dyn())))
}

/// Sample count check shared by [`linspace`] and [`logspace`].
fn grid_len_ok(entry: &str, num: usize) -> bool {
    if num == 0 || num > grid::MAX_GRID_LEN {
        log::debug!("{entry}: {num} samples is outside 1..={}", grid::MAX_GRID_LEN);
        return false;
    }
    true
}

/// Half-open 1-D range `start, start + step, …` short of `stop`.
///
/// Returns `None` for a zero or non-finite step, for an empty range and for
/// more than `kernel::grid::MAX_GRID_LEN` samples.
pub fn arange(start: f64, stop: f64, step: f64) -> Option<DataAndMetadata> {
    let Some(values) = grid::arange(start, stop, step) else {
        return reject("arange", format_args!("cannot step from {start} to {stop} by {step}"));
    };
    grid_value("arange", values)
}

/// `num` evenly spaced samples from `start` to `stop`; `None` unless
/// `1 <= num <= kernel::grid::MAX_GRID_LEN`.
pub fn linspace(start: f64, stop: f64, num: usize, endpoint: bool) -> Option<DataAndMetadata> {
    if !grid_len_ok("linspace", num) {
        return None;
    }
    grid_value("linspace", grid::linspace(start, stop, num, endpoint))
}

/// `base` raised to `num` evenly spaced exponents from `start` to `stop`;
/// sample counts as for [`linspace`].
pub fn logspace(
    start: f64, stop: f64, num: usize, endpoint: bool, base: f64,
) -> Option<DataAndMetadata> {
    if !grid_len_ok("logspace", num) {
        return None;
    }
    grid_value("logspace", grid::logspace(start, stop, num, endpoint, base))
}
