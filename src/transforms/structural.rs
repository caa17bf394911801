//! transforms::structural — reorder, cut, reduce and resample axes.
//!
//! Purpose
//! -------
//! Implement the transforms that change which axes exist, how long they are
//! or how they are ordered, together with the dimensional calibration
//! bookkeeping each of those changes implies.
//!
//! Key behaviors
//! -------------
//! - [`transpose_flip`] reverses axis order (and calibration order) and flips
//!   rank-2 data without touching calibrations.
//! - [`invert`] negates numeric data and inverts color channels.
//! - [`crop`] / [`crop_interval`] cut fractional ranges and shift the offsets
//!   of the cut axes by the fractional start, in calibrated units.
//! - [`slice_sum`] sums a band of axis 0 and drops that axis.
//! - [`pick`] extracts the axis-0 series at one (y, x) position of a stack.
//! - [`reshape`] keeps, drops or resets calibrations depending on how the
//!   rank changes.
//! - [`resample_2d`] interpolates to a new grid and rescales axis scales.
//!
//! Invariants & assumptions
//! ------------------------
//! - The output calibration count always equals the output rank.
//! - Results never share storage with the source payload.
//! - Color payloads keep their trailing channel axis through every
//!   structural operation.
//!
//! Conventions
//! -----------
//! - Fractional positions are multiplied by the axis extent and floored.
//! - Positions and sizes are `(y, x)` / `(height, width)`.
use crate::{
    data::{
        payload::{map_array, map_payload},
        validation::{reject, valid_descriptor, valid_descriptor_with_rank, valid_payload},
        ArrayData, Calibration, DataAndMetadata, DataDescriptor, DataType, Payload,
        is_shape_and_dtype_valid,
    },
    geometry::{FloatInterval, FloatPoint, FloatRect},
    kernel::interpolate::resize_bilinear,
    transforms::{
        options::{ReshapeDim, TransposeFlip},
        reduction::{average_leading_axis, sum_numeric_axes, summed_dtype},
    },
};
use ndarray::{Array2, ArrayD, Axis, Ix2, IxDyn, Slice};
use num_complex::{Complex32, Complex64};
use std::ops::Range;

/// Carry the source intensity calibration and metadata onto a deferred
/// result with new calibrations.
fn derived_value<F>(
    source: &DataAndMetadata, descriptor: DataDescriptor, calibrations: Vec<Calibration>,
    compute: F,
) -> DataAndMetadata
where
    F: FnOnce() -> Option<Payload> + Send + 'static,
{
    DataAndMetadata::deferred(
        descriptor,
        compute,
        source.intensity_calibration().clone(),
        calibrations,
        source.metadata().clone(),
    )
}

// ---- Transpose / flip ----

fn transpose_flip_array<T: Clone>(
    arr: &ArrayD<T>, rank: usize, options: TransposeFlip,
) -> ArrayD<T> {
    let mut view = arr.view();
    if options.transpose {
        let axes: Vec<usize> = (0..rank).rev().chain(rank..arr.ndim()).collect();
        view = view.permuted_axes(axes);
    }
    if rank == 2 {
        if options.flip_v {
            view.invert_axis(Axis(0));
        }
        if options.flip_h {
            view.invert_axis(Axis(1));
        }
    }
    view.as_standard_layout().into_owned()
}

/// Transpose and/or flip a value.
///
/// Parameters
/// ----------
/// - `source`: any valid value.
/// - `options`: [`TransposeFlip`]
///   `transpose` reverses every data axis; `flip_v` / `flip_h` reverse axis
///   0 / 1 of rank-2 data and are ignored for other ranks.
///
/// Returns
/// -------
/// Value with reversed calibrations when transposed, unchanged calibrations
/// otherwise. The payload is always a fresh copy.
pub fn transpose_flip(source: &DataAndMetadata, options: TransposeFlip) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor(source, "transpose_flip")?;
    let rank = descriptor.rank();
    let mut shape = descriptor.data_shape;
    let mut calibrations = source.dimensional_calibrations().to_vec();
    if options.transpose {
        shape.reverse();
        calibrations.reverse();
    }
    let src = source.clone();
    Some(derived_value(
        source,
        DataDescriptor::new(shape, descriptor.data_type),
        calibrations,
        move || {
            let payload = valid_payload(&src, "transpose_flip")?;
            Some(map_payload!(payload, a => transpose_flip_array(a, rank, options)))
        },
    ))
}

// ---- Invert ----

trait Invert: Copy {
    fn invert(self) -> Self;
}

macro_rules! impl_invert_wrapping {
    ($($t:ty),*) => {
        $(
            impl Invert for $t {
                fn invert(self) -> Self {
                    self.wrapping_neg()
                }
            }
        )*
    };
}

macro_rules! impl_invert_negate {
    ($($t:ty),*) => {
        $(
            impl Invert for $t {
                fn invert(self) -> Self {
                    -self
                }
            }
        )*
    };
}

impl_invert_wrapping!(i8, i16, i32, i64, u8, u16, u32, u64);
impl_invert_negate!(f32, f64, Complex32, Complex64);

fn invert_color(arr: &ArrayD<u8>) -> ArrayD<u8> {
    let channel_axis = Axis(arr.ndim() - 1);
    let mut out = arr.clone();
    for c in 0..3 {
        out.index_axis_mut(channel_axis, c).mapv_inplace(|v| 255 - v);
    }
    out
}

/// Negate numeric data (wrapping for integers); color data becomes
/// `255 - v` on R, G, B with alpha kept. Calibrations pass through.
pub fn invert(source: &DataAndMetadata) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor(source, "invert")?;
    let src = source.clone();
    Some(derived_value(source, descriptor, source.dimensional_calibrations().to_vec(), move || {
        let inverted = match valid_payload(&src, "invert")? {
            Payload::Numeric(data) => {
                Payload::Numeric(map_array!(data, a => a.mapv(Invert::invert)))
            }
            Payload::Rgb(a) => Payload::Rgb(invert_color(a)),
            Payload::Rgba(a) => Payload::Rgba(invert_color(a)),
        };
        Some(inverted)
    }))
}

// ---- Crop ----

/// Index of the fractional position `n * fraction`, floored and clamped to
/// `0..=n`.
fn fractional_index(n: usize, fraction: f64) -> usize {
    let position = (n as f64 * fraction).floor();
    if position.is_nan() || position <= 0.0 { 0 } else { (position as usize).min(n) }
}

fn slice_leading_axes<T: Clone>(arr: &ArrayD<T>, ranges: &[Range<usize>]) -> ArrayD<T> {
    arr.slice_each_axis(|axis| match ranges.get(axis.axis.index()) {
        Some(range) => Slice::from(range.clone()),
        None => Slice::from(..),
    })
    .to_owned()
}

/// Shifted calibration of an axis of extent `n` cut from fraction `start`.
fn shifted(calibration: &Calibration, n: usize, start: f64) -> Calibration {
    Calibration::new(
        calibration.offset + n as f64 * start * calibration.scale,
        calibration.scale,
        calibration.units.clone(),
    )
}

/// Deferred slice of the leading axes of `source`.
fn cropped(
    source: &DataAndMetadata, entry: &'static str, descriptor: &DataDescriptor,
    ranges: Vec<Range<usize>>, calibrations: Vec<Calibration>,
) -> Option<DataAndMetadata> {
    if ranges.iter().any(|r| r.is_empty()) {
        return reject(entry, format_args!("empty pixel range {ranges:?}"));
    }
    let mut shape = descriptor.data_shape.clone();
    for (extent, range) in shape.iter_mut().zip(&ranges) {
        *extent = range.len();
    }
    let src = source.clone();
    Some(derived_value(
        source,
        DataDescriptor::new(shape, descriptor.data_type),
        calibrations,
        move || {
            let payload = valid_payload(&src, entry)?;
            Some(map_payload!(payload, a => slice_leading_axes(a, &ranges)))
        },
    ))
}

/// Crop rank-2 data to a fractional rectangle.
///
/// Parameters
/// ----------
/// - `source`: rank-2 value (numeric or color).
/// - `bounds`: [`FloatRect`]
///   Origin and size as fractions of the data extent.
///
/// Returns
/// -------
/// Value of shape `floor(n * size)` (clamped to the data) whose axis
/// offsets are `offset + n * origin * scale`. `None` for other ranks or an
/// empty result.
///
/// Examples
/// --------
/// ```rust
/// # use calibrated_data::prelude::*;
/// # use calibrated_data::geometry::{FloatPoint, FloatRect, FloatSize};
/// # use calibrated_data::transforms::structural::crop;
/// let x = DataAndMetadata::new(
///     Payload::from(ndarray::Array2::<f32>::zeros((10, 10)).into_dyn()),
///     Calibration::uncalibrated(),
///     Some(vec![Calibration::new(0.0, 1.0, "nm"); 2]),
///     Metadata::new(),
/// )
/// .unwrap();
/// let bounds =
///     FloatRect::from_origin_and_size(FloatPoint::new(0.2, 0.0), FloatSize::new(0.5, 1.0));
/// let cut = crop(&x, bounds).unwrap();
/// assert_eq!(cut.data_shape(), Some(vec![5, 10]));
/// assert_eq!(cut.dimensional_calibrations()[0], Calibration::new(2.0, 1.0, "nm"));
/// ```
pub fn crop(source: &DataAndMetadata, bounds: FloatRect) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor_with_rank(source, "crop", 2)?;
    let origin = [bounds.origin.y, bounds.origin.x];
    let size = [bounds.size.height, bounds.size.width];
    let mut ranges = Vec::with_capacity(2);
    let mut calibrations = Vec::with_capacity(2);
    for (k, cal) in source.dimensional_calibrations().iter().enumerate() {
        let n = descriptor.data_shape[k];
        let first = fractional_index(n, origin[k]);
        let last = (first + fractional_index(n, size[k])).min(n);
        ranges.push(first..last);
        calibrations.push(shifted(cal, n, origin[k]));
    }
    cropped(source, "crop", &descriptor, ranges, calibrations)
}

/// Crop axis 0 to the fractional interval `[start, end)`; other axes and
/// their calibrations are unchanged.
pub fn crop_interval(source: &DataAndMetadata, interval: FloatInterval) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor(source, "crop_interval")?;
    let n = descriptor.data_shape[0];
    let first = fractional_index(n, interval.start);
    let last = fractional_index(n, interval.end).max(first);
    let mut calibrations = source.dimensional_calibrations().to_vec();
    calibrations[0] = shifted(&calibrations[0], n, interval.start);
    cropped(source, "crop_interval", &descriptor, vec![first..last], calibrations)
}

// ---- Slice sum / pick ----

/// Sum the band of axis 0 centered on `slice_center`, `slice_width` wide.
///
/// The band starts at `max(0, trunc(center - width / 2 + 0.5))` and is cut
/// at the end of the axis; an empty band sums to zeros. Axis 0 and its
/// calibration are dropped. Integer sums widen to 64 bits; color data is
/// averaged over the band instead.
pub fn slice_sum(
    source: &DataAndMetadata, slice_center: usize, slice_width: usize,
) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor(source, "slice_sum")?;
    if descriptor.data_type.is_color() && descriptor.rank() < 2 {
        return reject("slice_sum", "a color line has no axis left after summing");
    }
    let n = descriptor.data_shape[0];
    let start = (slice_center as f64 - slice_width as f64 * 0.5 + 0.5).trunc().max(0.0) as usize;
    let start = start.min(n);
    let band = start..start.saturating_add(slice_width).min(n);
    let dtype = summed_dtype(descriptor.data_type);
    let shape = descriptor.data_shape[1..].to_vec();
    let calibrations = source.dimensional_calibrations()[1..].to_vec();
    let src = source.clone();
    Some(derived_value(source, DataDescriptor::new(shape, dtype), calibrations, move || {
        let slice = Slice::from(band);
        let summed = match valid_payload(&src, "slice_sum")? {
            Payload::Numeric(data) => {
                let slab = map_array!(data, a => a.slice_axis(Axis(0), slice).to_owned());
                Payload::Numeric(sum_numeric_axes(&slab, &[0]))
            }
            Payload::Rgb(a) => Payload::Rgb(average_leading_axis(a.slice_axis(Axis(0), slice))),
            Payload::Rgba(a) => Payload::Rgba(average_leading_axis(a.slice_axis(Axis(0), slice))),
        };
        Some(summed)
    }))
}

/// Series along axis 0 at a fractional `(y, x)` position of a rank-3 stack.
///
/// The pixel is `(floor(y * n1), floor(x * n2))`; outside the frame the
/// result is zeros of length `n0`. Only the axis-0 calibration survives.
pub fn pick(source: &DataAndMetadata, position: FloatPoint) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor_with_rank(source, "pick", 3)?;
    let [n0, n1, n2] = [0, 1, 2].map(|k| descriptor.data_shape[k]);
    let y = (position.y * n1 as f64).floor();
    let x = (position.x * n2 as f64).floor();
    let pixel = if (0.0..n1 as f64).contains(&y) && (0.0..n2 as f64).contains(&x) {
        Some((y as usize, x as usize))
    } else {
        None
    };
    let picked = DataDescriptor::new(vec![n0], descriptor.data_type);
    let calibrations = source.dimensional_calibrations()[..1].to_vec();
    let src = source.clone();
    let zeros = picked.clone();
    Some(derived_value(source, picked, calibrations, move || {
        let payload = valid_payload(&src, "pick")?;
        let series = match pixel {
            Some((y, x)) => map_payload!(
                payload,
                a => a.view().index_axis_move(Axis(1), y).index_axis_move(Axis(1), x).to_owned()
            ),
            None => Payload::zeros(&zeros),
        };
        Some(series)
    }))
}

// ---- Reshape ----

/// Calibrations after a reshape from `source_shape` to the requested
/// dimensions.
///
/// - One more axis with an inferred extent: existing calibrations keep their
///   order, the inferred axis is uncalibrated.
/// - One fewer axis from a shape containing 1s: the calibrations of size-1
///   axes are dropped, if that leaves exactly the target rank.
/// - Anything else: every axis uncalibrated.
fn reshape_calibrations(
    calibrations: &[Calibration], source_shape: &[usize], dims: &[ReshapeDim],
) -> Vec<Calibration> {
    let rank = source_shape.len();
    if dims.len() == rank + 1 && dims.contains(&ReshapeDim::Infer) {
        let mut kept = calibrations.iter();
        return dims
            .iter()
            .map(|dim| match dim {
                ReshapeDim::Infer => Calibration::uncalibrated(),
                ReshapeDim::Fixed(_) => kept.next().cloned().unwrap_or_default(),
            })
            .collect();
    }
    if dims.len() + 1 == rank && source_shape.contains(&1) {
        let kept: Vec<Calibration> = calibrations
            .iter()
            .zip(source_shape)
            .filter(|(_, &n)| n != 1)
            .map(|(cal, _)| cal.clone())
            .collect();
        if kept.len() == dims.len() {
            return kept;
        }
    }
    vec![Calibration::uncalibrated(); dims.len()]
}

/// Concrete target shape; `None` if the element count cannot match.
fn resolve_shape(dims: &[ReshapeDim], element_count: usize) -> Option<Vec<usize>> {
    let inferred = dims.iter().filter(|d| **d == ReshapeDim::Infer).count();
    let fixed: usize = dims
        .iter()
        .map(|d| match d {
            ReshapeDim::Fixed(n) => *n,
            ReshapeDim::Infer => 1,
        })
        .product();
    let inferred_extent = match inferred {
        0 if fixed == element_count => 0,
        1 if fixed > 0 && element_count % fixed == 0 => element_count / fixed,
        _ => return None,
    };
    Some(
        dims.iter()
            .map(|d| match d {
                ReshapeDim::Fixed(n) => *n,
                ReshapeDim::Infer => inferred_extent,
            })
            .collect(),
    )
}

/// Reshape the data axes, keeping the element order.
///
/// Parameters
/// ----------
/// - `source`: any valid value; color payloads keep their channel axis.
/// - `dims`: `&[ReshapeDim]`
///   Target extents; at most one [`ReshapeDim::Infer`].
///
/// Returns
/// -------
/// Reshaped value (calibrations per [`reshape_calibrations`] rules);
/// `None` when the element count does not match or the target shape is
/// empty.
pub fn reshape(source: &DataAndMetadata, dims: &[ReshapeDim]) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor(source, "reshape")?;
    let Some(shape) = resolve_shape(dims, descriptor.element_count()) else {
        return reject(
            "reshape",
            format_args!("{dims:?} does not fit {} elements", descriptor.element_count()),
        );
    };
    if !is_shape_and_dtype_valid(&shape, descriptor.data_type) {
        return reject("reshape", format_args!("invalid target shape {shape:?}"));
    }
    let calibrations =
        reshape_calibrations(source.dimensional_calibrations(), &descriptor.data_shape, dims);
    let mut full_shape = shape.clone();
    full_shape.extend(descriptor.data_type.channel_count());
    let src = source.clone();
    Some(derived_value(
        source,
        DataDescriptor::new(shape, descriptor.data_type),
        calibrations,
        move || {
            let payload = valid_payload(&src, "reshape")?;
            Some(map_payload!(
                payload,
                a => a
                    .as_standard_layout()
                    .into_owned()
                    .into_shape_with_order(IxDyn(&full_shape))
                    .ok()?
            ))
        },
    ))
}

// ---- Resample ----

fn resize_real(arr: &ArrayD<f64>, height: usize, width: usize) -> Option<ArrayD<f64>> {
    let image = arr.clone().into_dimensionality::<Ix2>().ok()?;
    Some(resize_bilinear(&image, height, width).into_dyn())
}

fn resize_numeric(data: &ArrayData, height: usize, width: usize) -> Option<ArrayData> {
    match data.to_f64() {
        Some(real) => Some(ArrayData::Float64(resize_real(&real, height, width)?)),
        None => {
            let complex = data.to_complex();
            let re = resize_real(&complex.mapv(|v| v.re), height, width)?;
            let im = resize_real(&complex.mapv(|v| v.im), height, width)?;
            let mut out = ArrayD::<Complex64>::zeros(re.raw_dim());
            ndarray::Zip::from(&mut out).and(&re).and(&im).for_each(|o, &r, &i| {
                *o = Complex64::new(r, i);
            });
            Some(ArrayData::Complex128(out))
        }
    }
}

/// Resize every channel of a color image; values are rounded back to `u8`.
fn resize_color(arr: &ArrayD<u8>, height: usize, width: usize) -> Option<ArrayD<u8>> {
    let channels = arr.shape()[2];
    let mut out = ArrayD::<u8>::zeros(IxDyn(&[height, width, channels]));
    for c in 0..channels {
        let channel: Array2<f64> =
            arr.index_axis(Axis(2), c).mapv(f64::from).into_dimensionality::<Ix2>().ok()?;
        let resized = resize_bilinear(&channel, height, width);
        out.index_axis_mut(Axis(2), c).zip_mut_with(&resized.into_dyn(), |o, &v| {
            *o = v.round() as u8;
        });
    }
    Some(out)
}

/// Resample rank-2 data to `height × width` by bilinear interpolation.
///
/// Each axis scale becomes `scale * old_extent / new_extent`; offsets and
/// units are kept. An unchanged shape returns a copy of the data with its
/// element type; otherwise real data becomes Float64, complex data
/// Complex128 and color stays color. `None` for other ranks or a zero
/// target extent.
pub fn resample_2d(
    source: &DataAndMetadata, height: usize, width: usize,
) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor_with_rank(source, "resample_2d", 2)?;
    if height == 0 || width == 0 {
        return reject("resample_2d", format_args!("target shape ({height}, {width}) is empty"));
    }
    let target = [height, width];
    let calibrations = source
        .dimensional_calibrations()
        .iter()
        .zip(descriptor.data_shape.iter().zip(target))
        .map(|(cal, (&old, new))| {
            Calibration::new(cal.offset, cal.scale * old as f64 / new as f64, cal.units.clone())
        })
        .collect();
    let unchanged = descriptor.data_shape == target;
    let dtype = match descriptor.data_type {
        dtype if unchanged || dtype.is_color() => dtype,
        dtype if dtype.is_complex() => DataType::Complex128,
        _ => DataType::Float64,
    };
    let src = source.clone();
    Some(derived_value(
        source,
        DataDescriptor::new(target.to_vec(), dtype),
        calibrations,
        move || {
            let payload = valid_payload(&src, "resample_2d")?;
            if unchanged {
                return Some(payload.clone());
            }
            let resampled = match payload {
                Payload::Numeric(data) => Payload::Numeric(resize_numeric(data, height, width)?),
                Payload::Rgb(a) => Payload::Rgb(resize_color(a, height, width)?),
                Payload::Rgba(a) => Payload::Rgba(resize_color(a, height, width)?),
            };
            Some(resampled)
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        data::{Metadata, ScalarValue},
        geometry::FloatSize,
    };
    use approx::assert_relative_eq;
    use ndarray::{array, Array3, Array4};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Calibration reordering, shifting, dropping and rescaling for every
    //   structural transform.
    // - Payload layout after transpose, flip, crop, pick and reshape.
    // - Color payloads keeping their channel axis.
    // - Absent results for wrong ranks, empty crops and count mismatches.
    // -------------------------------------------------------------------------

    fn cal(offset: f64, scale: f64, units: &str) -> Calibration {
        Calibration::new(offset, scale, units)
    }

    fn value(payload: Payload, calibrations: Vec<Calibration>) -> DataAndMetadata {
        DataAndMetadata::new(payload, cal(0.0, 1.0, "e"), Some(calibrations), Metadata::new())
            .unwrap()
    }

    fn grid(h: usize, w: usize) -> DataAndMetadata {
        let data = Array2::from_shape_fn((h, w), |(i, j)| (i * w + j) as f64).into_dyn();
        value(Payload::from(data), vec![cal(0.0, 1.0, "nm"), cal(5.0, 0.5, "um")])
    }

    fn numeric(value: &DataAndMetadata) -> ArrayData {
        value.data().and_then(Payload::as_numeric).cloned().unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Transposing reverses axes and calibrations; flips only move data.
    //
    // Given
    // -----
    // - A 2×3 grid with calibrations (nm, um).
    //
    // Expect
    // ------
    // - Transposed: shape (3, 2), calibrations (um, nm), `t[2, 1] == x[1, 2]`.
    // - Flipped horizontally: calibrations unchanged, first row reversed.
    fn transpose_reverses_calibrations() {
        let x = grid(2, 3);
        let t = transpose_flip(&x, TransposeFlip::new(true, false, false)).unwrap();
        assert_eq!(t.data_shape(), Some(vec![3, 2]));
        assert_eq!(t.dimensional_calibrations()[0].units, "um");
        assert_eq!(numeric(&t).get(&[2, 1]), Some(ScalarValue::Float(5.0)));

        let f = transpose_flip(&x, TransposeFlip::new(false, false, true)).unwrap();
        assert_eq!(f.dimensional_calibrations(), x.dimensional_calibrations());
        assert_eq!(numeric(&f).get(&[0, 0]), Some(ScalarValue::Float(2.0)));
        let v = transpose_flip(&x, TransposeFlip::new(false, true, false)).unwrap();
        assert_eq!(numeric(&v).get(&[0, 0]), Some(ScalarValue::Float(3.0)));
    }

    #[test]
    fn transpose_keeps_color_channels_last() {
        let mut arr = Array3::<u8>::zeros((2, 3, 3));
        arr[[0, 2, 1]] = 9;
        let x = value(Payload::rgb(arr.into_dyn()).unwrap(), vec![cal(0.0, 1.0, ""); 2]);
        let t = transpose_flip(&x, TransposeFlip::new(true, false, false)).unwrap();
        match t.data().unwrap() {
            Payload::Rgb(a) => {
                assert_eq!(a.shape(), &[3, 2, 3]);
                assert_eq!(a[[2, 0, 1]], 9);
            }
            other => panic!("expected RGB, got {other:?}"),
        }
    }

    #[test]
    // Purpose
    // -------
    // Inversion wraps integers, negates floats and keeps alpha.
    //
    // Given
    // -----
    // - u8 `[0, 1, 255]`, f64 `[1.5]`, an RGBA pixel `(10, 20, 30, 40)`.
    //
    // Expect
    // ------
    // - `[0, 255, 1]`, `[-1.5]`, `(245, 235, 225, 40)`.
    fn invert_by_payload_kind() {
        let bytes = value(Payload::from(array![0u8, 1, 255].into_dyn()), vec![cal(0.0, 1.0, "")]);
        assert_eq!(
            numeric(&invert(&bytes).unwrap()),
            ArrayData::UInt8(array![0u8, 255, 1].into_dyn())
        );
        let floats = value(Payload::from(array![1.5f64].into_dyn()), vec![cal(0.0, 1.0, "")]);
        assert_eq!(
            numeric(&invert(&floats).unwrap()),
            ArrayData::Float64(array![-1.5].into_dyn())
        );
        let pixel = Array3::from_shape_vec((1, 1, 4), vec![10u8, 20, 30, 40]).unwrap();
        let rgba = value(Payload::rgba(pixel.into_dyn()).unwrap(), vec![cal(0.0, 1.0, ""); 2]);
        match invert(&rgba).unwrap().data().unwrap() {
            Payload::Rgba(a) => {
                assert_eq!(a.iter().copied().collect::<Vec<_>>(), [245, 235, 225, 40])
            }
            other => panic!("expected RGBA, got {other:?}"),
        }
    }

    #[test]
    fn malformed_color_payloads_are_absent() {
        let short = Payload::Rgb(Array2::<u8>::zeros((4, 2)).into_dyn());
        assert!(invert(&DataAndMetadata::from_payload(short)).is_none());
        let bare = Payload::Rgba(ArrayD::<u8>::zeros(IxDyn(&[])));
        let bare = DataAndMetadata::from_payload(bare);
        assert_eq!(bare.data_shape(), Some(Vec::new()));
        assert!(invert(&bare).is_none());
        assert!(transpose_flip(&bare, TransposeFlip::new(true, false, false)).is_none());
    }

    #[test]
    // Purpose
    // -------
    // Cropping shifts offsets by the fractional origin in calibrated units.
    //
    // Given
    // -----
    // - A 10×10 value with calibrations `(0, 1, "nm")`, `(5, 0.5, "um")`.
    // - Bounds origin `(0.2, 0.4)`, size `(0.5, 0.5)`.
    //
    // Expect
    // ------
    // - Shape (5, 5); calibrations `(2, 1, "nm")` and `(7, 0.5, "um")`.
    // - `out[0, 0] == x[2, 4]`.
    fn crop_shifts_offsets() {
        let x = grid(10, 10);
        let bounds =
            FloatRect::from_origin_and_size(FloatPoint::new(0.2, 0.4), FloatSize::new(0.5, 0.5));
        let out = crop(&x, bounds).unwrap();
        assert_eq!(out.data_shape(), Some(vec![5, 5]));
        assert_eq!(out.dimensional_calibrations(), &[cal(2.0, 1.0, "nm"), cal(7.0, 0.5, "um")]);
        assert_eq!(numeric(&out).get(&[0, 0]), Some(ScalarValue::Float(24.0)));
    }

    #[test]
    fn unit_crop_is_identity() {
        let x = grid(4, 6);
        let out = crop(&x, FloatRect::unit()).unwrap();
        assert_eq!(numeric(&out), numeric(&x));
        assert_eq!(out.dimensional_calibrations(), x.dimensional_calibrations());
    }

    #[test]
    fn empty_or_misranked_crops_are_absent() {
        let x = grid(4, 4);
        let sliver =
            FloatRect::from_origin_and_size(FloatPoint::new(0.0, 0.0), FloatSize::new(0.1, 1.0));
        assert!(crop(&x, sliver).is_none());
        let line = value(Payload::from(array![1.0, 2.0].into_dyn()), vec![cal(0.0, 1.0, "")]);
        assert!(crop(&line, FloatRect::unit()).is_none());
    }

    #[test]
    fn crop_interval_cuts_axis_zero_only() {
        let x = grid(10, 3);
        let out = crop_interval(&x, FloatInterval::new(0.5, 0.8)).unwrap();
        assert_eq!(out.data_shape(), Some(vec![3, 3]));
        assert_eq!(out.dimensional_calibrations()[0], cal(5.0, 1.0, "nm"));
        assert_eq!(out.dimensional_calibrations()[1], cal(5.0, 0.5, "um"));
        assert_eq!(numeric(&out).get(&[0, 0]), Some(ScalarValue::Float(15.0)));
    }

    #[test]
    // Purpose
    // -------
    // The slice band is centered, clipped, summed and axis 0 dropped.
    //
    // Given
    // -----
    // - A 4×3 u16 grid `x[i, j] = 3i + j`, center 1, width 2.
    //
    // Expect
    // ------
    // - Band rows 0..2, since the start is `trunc(1 - 1 + 0.5) = 0`.
    // - Output UInt64 `[3, 5, 7]`, calibrations `[um]`.
    fn slice_sum_drops_axis_zero() {
        let data = Array2::from_shape_fn((4, 3), |(i, j)| (3 * i + j) as u16).into_dyn();
        let x = value(Payload::from(data), vec![cal(0.0, 1.0, "nm"), cal(0.0, 1.0, "um")]);
        let out = slice_sum(&x, 1, 2).unwrap();
        assert_eq!(out.data_dtype(), Some(DataType::UInt64));
        assert_eq!(numeric(&out), ArrayData::UInt64(array![3u64, 5, 7].into_dyn()));
        assert_eq!(out.dimensional_calibrations(), &[cal(0.0, 1.0, "um")]);
        let past_end = slice_sum(&x, 10, 2).unwrap();
        assert_eq!(numeric(&past_end), ArrayData::UInt64(array![0u64, 0, 0].into_dyn()));
    }

    #[test]
    // Purpose
    // -------
    // Band bounds saturate instead of overflowing for extreme widths.
    //
    // Given
    // -----
    // - The 4×3 u16 grid `x[i, j] = 3i + j`; (center, width) of
    //   `(usize::MAX, usize::MAX)` and `(1, usize::MAX)`.
    //
    // Expect
    // ------
    // - The first band starts past the end and sums to zeros.
    // - The second band covers every row: `[18, 22, 26]`.
    fn slice_sum_saturates_extreme_widths() {
        let data = Array2::from_shape_fn((4, 3), |(i, j)| (3 * i + j) as u16).into_dyn();
        let x = value(Payload::from(data), vec![cal(0.0, 1.0, "nm"), cal(0.0, 1.0, "um")]);
        let beyond = slice_sum(&x, usize::MAX, usize::MAX).unwrap();
        assert_eq!(numeric(&beyond), ArrayData::UInt64(array![0u64, 0, 0].into_dyn()));
        let whole = slice_sum(&x, 1, usize::MAX).unwrap();
        assert_eq!(numeric(&whole), ArrayData::UInt64(array![18u64, 22, 26].into_dyn()));
    }

    #[test]
    // Purpose
    // -------
    // Picking reads the axis-0 series at a fractional pixel and keeps only
    // the axis-0 calibration.
    //
    // Given
    // -----
    // - A (3, 4, 5) stack `x[k, i, j] = 100k + 10i + j`, position (0.5, 0.5).
    //
    // Expect
    // ------
    // - Pixel (2, 2): `[22, 122, 222]`; outside the frame: zeros.
    fn pick_extracts_series() {
        let data = Array3::from_shape_fn((3, 4, 5), |(k, i, j)| (100 * k + 10 * i + j) as i32);
        let cals = vec![cal(0.0, 2.0, "eV"), cal(0.0, 1.0, "nm"), cal(0.0, 1.0, "nm")];
        let x = value(Payload::from(data.into_dyn()), cals);
        let out = pick(&x, FloatPoint::new(0.5, 0.5)).unwrap();
        assert_eq!(out.dimensional_calibrations(), &[cal(0.0, 2.0, "eV")]);
        assert_eq!(numeric(&out), ArrayData::Int32(array![22, 122, 222].into_dyn()));
        let outside = pick(&x, FloatPoint::new(1.0, 0.0)).unwrap();
        assert_eq!(numeric(&outside), ArrayData::Int32(array![0, 0, 0].into_dyn()));
        assert!(pick(&grid(2, 2), FloatPoint::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn pick_keeps_color_channels() {
        let x = value(
            Payload::rgb(Array4::<u8>::from_elem((2, 2, 2, 3), 4).into_dyn()).unwrap(),
            vec![cal(0.0, 1.0, ""); 3],
        );
        let out = pick(&x, FloatPoint::new(0.0, 0.0)).unwrap();
        assert_eq!(out.data_dtype(), Some(DataType::Rgb));
        assert_eq!(out.data().map(Payload::data_shape), Some(vec![2]));
    }

    #[test]
    // Purpose
    // -------
    // Adding an inferred axis keeps existing calibrations; dropping the
    // size-1 axis restores them exactly.
    //
    // Given
    // -----
    // - A 2×3 grid with calibrations (nm, um); dims `[2, 3, Infer]` then
    //   `[2, 3]`.
    //
    // Expect
    // ------
    // - Shape (2, 3, 1), calibrations (nm, um, uncalibrated).
    // - Back to (2, 3) with (nm, um).
    fn reshape_round_trips_calibrations() {
        let x = grid(2, 3);
        let dims = [ReshapeDim::Fixed(2), ReshapeDim::Fixed(3), ReshapeDim::Infer];
        let up = reshape(&x, &dims).unwrap();
        assert_eq!(up.data_shape(), Some(vec![2, 3, 1]));
        assert_eq!(up.dimensional_calibrations()[..2], x.dimensional_calibrations()[..]);
        assert!(!up.dimensional_calibrations()[2].is_calibrated());
        let down = reshape(&up, &[ReshapeDim::Fixed(2), ReshapeDim::Fixed(3)]).unwrap();
        assert_eq!(down.dimensional_calibrations(), x.dimensional_calibrations());
        assert_eq!(numeric(&down), numeric(&x));
    }

    #[test]
    fn reshape_resets_other_rank_changes_and_checks_counts() {
        let x = grid(2, 3);
        let flat = reshape(&x, &[ReshapeDim::Infer]).unwrap();
        assert_eq!(flat.data_shape(), Some(vec![6]));
        assert!(!flat.dimensional_calibrations()[0].is_calibrated());
        assert_eq!(numeric(&flat).get(&[4]), Some(ScalarValue::Float(4.0)));
        assert!(reshape(&x, &[ReshapeDim::Fixed(4), ReshapeDim::Infer]).is_none());
        assert!(reshape(&x, &[ReshapeDim::Infer, ReshapeDim::Infer]).is_none());
        assert!(reshape(&x, &[ReshapeDim::Fixed(5)]).is_none());
    }

    #[test]
    // Purpose
    // -------
    // Resampling rescales axis scales by old/new extent and interpolates.
    //
    // Given
    // -----
    // - A 2×2 u8 image `[[0, 2], [4, 6]]` with scales 1 and 0.5, resampled
    //   to 3×3.
    //
    // Expect
    // ------
    // - Float64 output with center 3; scales `2/3` and `1/3`.
    // - Same-shape resampling copies the data with its element type.
    fn resample_rescales_calibrations() {
        let x = value(
            Payload::from(array![[0u8, 2], [4, 6]].into_dyn()),
            vec![cal(1.0, 1.0, "nm"), cal(0.0, 0.5, "nm")],
        );
        let out = resample_2d(&x, 3, 3).unwrap();
        assert_eq!(out.data_dtype(), Some(DataType::Float64));
        assert_relative_eq!(out.dimensional_calibrations()[0].scale, 2.0 / 3.0);
        assert_relative_eq!(out.dimensional_calibrations()[1].scale, 1.0 / 3.0);
        assert_relative_eq!(out.dimensional_calibrations()[0].offset, 1.0);
        let data = out.data().and_then(Payload::to_real_f64).unwrap();
        assert_relative_eq!(data[[1, 1]], 3.0);
        let same = resample_2d(&x, 2, 2).unwrap();
        assert_eq!(same.data_dtype(), Some(DataType::UInt8));
        assert_eq!(numeric(&same), numeric(&x));
        assert!(resample_2d(&x, 0, 2).is_none());
    }

    #[test]
    fn resample_interpolates_color_channels() {
        let mut arr = Array3::<u8>::zeros((2, 2, 3));
        arr[[1, 1, 0]] = 200;
        let x = value(Payload::rgb(arr.into_dyn()).unwrap(), vec![cal(0.0, 1.0, ""); 2]);
        let out = resample_2d(&x, 3, 3).unwrap();
        match out.data().unwrap() {
            Payload::Rgb(a) => {
                assert_eq!(a.shape(), &[3, 3, 3]);
                assert_eq!(a[[1, 1, 0]], 50);
                assert_eq!(a[[2, 2, 0]], 200);
            }
            other => panic!("expected RGB, got {other:?}"),
        }
    }
}
