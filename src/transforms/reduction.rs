//! transforms::reduction — sums, stacking, histograms and rescaling.
//!
//! Purpose
//! -------
//! Implement the transforms that collapse axes (`sum`), join several values
//! (`concatenate`, `hstack`, `vstack`) or replace the payload by a summary of
//! its values (`histogram`, `rescale`).
//!
//! Key behaviors
//! -------------
//! - Integer sums widen to `Int64` / `UInt64`; float and complex sums keep
//!   their element type. Color payloads are averaged over axis 0 instead.
//! - Joins keep the first input's intensity calibration and the calibration
//!   of the joined axis; every other axis becomes uncalibrated and the
//!   metadata is reset, because the inputs may disagree.
//! - `histogram` counts into `Int64` bins over the real (or luminance)
//!   values; `rescale` maps real data onto a target interval as `Float64`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Join inputs must agree on rank, element type and every extent except
//!   the joined one; any mismatch yields an absent result.
//! - Axes are removed in descending order so earlier indices stay valid.
use crate::{
    data::{
        payload::map_payload,
        validation::{reject, valid_descriptor, valid_payload},
        ArrayData, Calibration, DataAndMetadata, DataDescriptor, DataType, Metadata, Payload,
    },
    kernel::stats,
    transforms::options::{RescaleRange, SumAxis},
};
use ndarray::{Array1, ArrayD, ArrayViewD, Axis, IxDyn};

// ---- Shared reductions ----

/// Element type of a sum over `dtype`.
pub(crate) fn summed_dtype(dtype: DataType) -> DataType {
    match dtype {
        DataType::Int8 | DataType::Int16 | DataType::Int32 | DataType::Int64 => DataType::Int64,
        DataType::UInt8 | DataType::UInt16 | DataType::UInt32 | DataType::UInt64 => {
            DataType::UInt64
        }
        other => other,
    }
}

macro_rules! sum_over {
    ($arr:expr, $axes:expr) => {
        $axes.iter().rev().fold($arr, |acc, &axis| acc.sum_axis(Axis(axis)))
    };
}

/// Sum over the given (ascending, in-range) axes with integer widening.
pub(crate) fn sum_numeric_axes(data: &ArrayData, axes: &[usize]) -> ArrayData {
    match data {
        ArrayData::Int8(a) => ArrayData::Int64(sum_over!(a.mapv(i64::from), axes)),
        ArrayData::Int16(a) => ArrayData::Int64(sum_over!(a.mapv(i64::from), axes)),
        ArrayData::Int32(a) => ArrayData::Int64(sum_over!(a.mapv(i64::from), axes)),
        ArrayData::Int64(a) => ArrayData::Int64(sum_over!(a.clone(), axes)),
        ArrayData::UInt8(a) => ArrayData::UInt64(sum_over!(a.mapv(u64::from), axes)),
        ArrayData::UInt16(a) => ArrayData::UInt64(sum_over!(a.mapv(u64::from), axes)),
        ArrayData::UInt32(a) => ArrayData::UInt64(sum_over!(a.mapv(u64::from), axes)),
        ArrayData::UInt64(a) => ArrayData::UInt64(sum_over!(a.clone(), axes)),
        ArrayData::Float32(a) => ArrayData::Float32(sum_over!(a.clone(), axes)),
        ArrayData::Float64(a) => ArrayData::Float64(sum_over!(a.clone(), axes)),
        ArrayData::Complex64(a) => ArrayData::Complex64(sum_over!(a.clone(), axes)),
        ArrayData::Complex128(a) => ArrayData::Complex128(sum_over!(a.clone(), axes)),
    }
}

/// Per-channel average of a color array over axis 0, truncated to `u8`.
/// An empty axis averages to zeros.
pub(crate) fn average_leading_axis(arr: ArrayViewD<'_, u8>) -> ArrayD<u8> {
    match arr.mapv(f64::from).mean_axis(Axis(0)) {
        Some(mean) => mean.mapv(|v| v as u8),
        None => ArrayD::zeros(IxDyn(&arr.shape()[1..])),
    }
}

// ---- Sum ----

/// Sum over the axes selected by `axis`.
///
/// Parameters
/// ----------
/// - `source`: any valid value.
/// - `axis`: [`SumAxis`]
///   `All` reduces to a rank-0 value without calibrations; `Single` and
///   `Multiple` drop the calibrations of the reduced axes.
///
/// Returns
/// -------
/// Summed value with the source intensity calibration and metadata. Color
/// data is averaged over axis 0 whatever `axis` says, and needs rank ≥ 2.
/// `None` when an axis is out of range.
pub fn sum(source: &DataAndMetadata, axis: SumAxis) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor(source, "sum")?;
    let rank = descriptor.rank();
    let src = source.clone();
    let intensity = source.intensity_calibration().clone();
    let metadata = source.metadata().clone();

    if descriptor.data_type.is_color() {
        if rank < 2 {
            return reject("sum", "a color line has no axis left after averaging");
        }
        let averaged =
            DataDescriptor::new(descriptor.data_shape[1..].to_vec(), descriptor.data_type);
        let calibrations = source.dimensional_calibrations()[1..].to_vec();
        return Some(DataAndMetadata::deferred(
            averaged,
            move || match valid_payload(&src, "sum")? {
                Payload::Rgb(a) => Some(Payload::Rgb(average_leading_axis(a.view()))),
                Payload::Rgba(a) => Some(Payload::Rgba(average_leading_axis(a.view()))),
                Payload::Numeric(_) => reject("sum", "expected a color payload"),
            },
            intensity,
            calibrations,
            metadata,
        ));
    }

    let Some(axes) = axis.resolve(rank) else {
        return reject("sum", format_args!("{axis:?} is out of range for rank {rank}"));
    };
    let kept = |k: &usize| !axes.contains(k);
    let shape = (0..rank).filter(kept).map(|k| descriptor.data_shape[k]).collect();
    let calibrations =
        (0..rank).filter(kept).map(|k| source.dimensional_calibrations()[k].clone()).collect();
    Some(DataAndMetadata::deferred(
        DataDescriptor::new(shape, summed_dtype(descriptor.data_type)),
        move || {
            let data = valid_payload(&src, "sum")?.as_numeric()?;
            Some(Payload::Numeric(sum_numeric_axes(data, &axes)))
        },
        intensity,
        calibrations,
        metadata,
    ))
}

// ---- Joins ----

/// Descriptors of every join input; `None` if any input is invalid.
fn join_descriptors(values: &[DataAndMetadata], entry: &str) -> Option<Vec<DataDescriptor>> {
    if values.is_empty() {
        return reject(entry, "no inputs");
    }
    values.iter().map(|value| valid_descriptor(value, entry)).collect()
}

/// Join values along `axis`.
///
/// Parameters
/// ----------
/// - `values`: non-empty slice of values with one rank, one element type and
///   equal extents on every axis but `axis`.
/// - `axis`: `usize`
///   Joined data axis, `< rank`.
///
/// Returns
/// -------
/// Joined value with the first input's intensity calibration and its
/// calibration on `axis`; other axes uncalibrated; empty metadata.
pub fn concatenate(values: &[DataAndMetadata], axis: usize) -> Option<DataAndMetadata> {
    let descriptors = join_descriptors(values, "concatenate")?;
    let head = &descriptors[0];
    let rank = head.rank();
    if axis >= rank {
        return reject("concatenate", format_args!("axis {axis} is out of range for rank {rank}"));
    }
    let mut joined_extent = 0;
    for descriptor in &descriptors {
        if descriptor.data_type != head.data_type || descriptor.rank() != rank {
            return reject(
                "concatenate",
                format_args!(
                    "cannot join {:?} rank {} with {:?} rank {rank}",
                    descriptor.data_type,
                    descriptor.rank(),
                    head.data_type
                ),
            );
        }
        let aligned = (0..rank)
            .filter(|&k| k != axis)
            .all(|k| descriptor.data_shape[k] == head.data_shape[k]);
        if !aligned {
            return reject(
                "concatenate",
                format_args!(
                    "shape {:?} differs from {:?} off axis {axis}",
                    descriptor.data_shape, head.data_shape
                ),
            );
        }
        joined_extent += descriptor.data_shape[axis];
    }
    let mut shape = head.data_shape.clone();
    shape[axis] = joined_extent;

    let first = &values[0];
    let calibrations = first
        .dimensional_calibrations()
        .iter()
        .enumerate()
        .map(|(k, cal)| if k == axis { cal.clone() } else { Calibration::uncalibrated() })
        .collect();
    let sources = values.to_vec();
    Some(DataAndMetadata::deferred(
        DataDescriptor::new(shape, head.data_type),
        move || {
            let payloads = sources
                .iter()
                .map(|value| valid_payload(value, "concatenate"))
                .collect::<Option<Vec<_>>>()?;
            Payload::concatenate(&payloads, axis)
        },
        first.intensity_calibration().clone(),
        calibrations,
        Metadata::new(),
    ))
}

/// Join along axis 1, or along axis 0 for rank-1 inputs.
pub fn hstack(values: &[DataAndMetadata]) -> Option<DataAndMetadata> {
    let descriptors = join_descriptors(values, "hstack")?;
    let axis = if descriptors[0].rank() >= 2 { 1 } else { 0 };
    concatenate(values, axis)
}

/// Join along axis 0.
///
/// Rank-1 inputs of one length `n` are stacked as rows into a
/// `(values.len(), n)` value whose calibrations are
/// `[uncalibrated, first.cal[0]]`: the new row axis is uncalibrated and
/// the shared axis keeps the first input's calibration.
pub fn vstack(values: &[DataAndMetadata]) -> Option<DataAndMetadata> {
    let descriptors = join_descriptors(values, "vstack")?;
    let head = &descriptors[0];
    if head.rank() >= 2 {
        return concatenate(values, 0);
    }
    if let Some(other) = descriptors.iter().find(|d| *d != head) {
        return reject("vstack", format_args!("cannot stack {other:?} onto {head:?}"));
    }
    let first = &values[0];
    let calibrations =
        vec![Calibration::uncalibrated(), first.dimensional_calibrations()[0].clone()];
    let sources = values.to_vec();
    Some(DataAndMetadata::deferred(
        DataDescriptor::new(vec![values.len(), head.data_shape[0]], head.data_type),
        move || {
            let rows = sources
                .iter()
                .map(|value| {
                    let payload = valid_payload(value, "vstack")?;
                    Some(map_payload!(payload, a => a.view().insert_axis(Axis(0)).to_owned()))
                })
                .collect::<Option<Vec<Payload>>>()?;
            Payload::concatenate(&rows.iter().collect::<Vec<_>>(), 0)
        },
        first.intensity_calibration().clone(),
        calibrations,
        Metadata::new(),
    ))
}

// ---- Value summaries ----

/// Counts of the values in `bins` equal-width bins over `[min, max]`.
///
/// Color data is binned by luminance. Returns an `Int64` value of length
/// `bins` with one uncalibrated axis; intensity calibration and metadata
/// pass through. `None` for complex data or `bins == 0`.
pub fn histogram(source: &DataAndMetadata, bins: usize) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor(source, "histogram")?;
    if bins == 0 {
        return reject("histogram", "zero bins");
    }
    if descriptor.data_type.is_complex() {
        return reject("histogram", "complex data has no ordering");
    }
    let src = source.clone();
    Some(DataAndMetadata::deferred(
        DataDescriptor::new(vec![bins], DataType::Int64),
        move || {
            let values = valid_payload(&src, "histogram")?.to_real_f64()?;
            let (_, counts) = stats::histogram(&values, bins);
            Some(Payload::from(Array1::from(counts).into_dyn()))
        },
        source.intensity_calibration().clone(),
        vec![Calibration::uncalibrated()],
        source.metadata().clone(),
    ))
}

/// Map real data linearly onto `range`.
///
/// Parameters
/// ----------
/// - `source`: real numeric value (integer or float).
/// - `range`: [`RescaleRange`]
///   Target interval; the minimum maps to `low` and the maximum to `high`.
///
/// Returns
/// -------
/// `Float64` value with an uncalibrated intensity; dimensional calibrations
/// and metadata pass through. Constant data maps to `low` everywhere.
/// `None` for complex or color data.
///
/// Examples
/// --------
/// ```rust
/// # use calibrated_data::prelude::*;
/// # use calibrated_data::transforms::{options::RescaleRange, reduction::rescale};
/// let ramp = ndarray::array![2.0, 4.0, 6.0].into_dyn();
/// let x = DataAndMetadata::from_payload(Payload::from(ramp));
/// let y = rescale(&x, RescaleRange::new(-1.0, 1.0)).unwrap();
/// let values = y.data().and_then(Payload::to_real_f64).unwrap();
/// assert_eq!(values.iter().copied().collect::<Vec<_>>(), vec![-1.0, 0.0, 1.0]);
/// ```
pub fn rescale(source: &DataAndMetadata, range: RescaleRange) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor(source, "rescale")?;
    if !descriptor.data_type.is_real() {
        return reject("rescale", format_args!("{:?} is not real data", descriptor.data_type));
    }
    let src = source.clone();
    Some(DataAndMetadata::deferred(
        DataDescriptor::new(descriptor.data_shape, DataType::Float64),
        move || {
            let values = valid_payload(&src, "rescale")?.as_numeric()?.to_f64()?;
            let low = stats::min(&values)?;
            let ptp = stats::ptp(&values)?;
            let rescaled = if ptp == 0.0 {
                values.mapv(|_| range.low)
            } else {
                let m = range.span() / ptp;
                values.mapv(|v| (v - low) * m + range.low)
            };
            Some(Payload::from(rescaled))
        },
        Calibration::uncalibrated(),
        source.dimensional_calibrations().to_vec(),
        source.metadata().clone(),
    ))
}
