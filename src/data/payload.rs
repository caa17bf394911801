//! data::payload — dense n-D payloads over every supported element type.
//!
//! Purpose
//! -------
//! Hold the raw numeric data of a calibrated value. [`ArrayData`] stores one
//! `ndarray::ArrayD<T>` per supported element type; [`Payload`] is the closed
//! variant `{Numeric, Rgb, Rgba}` that every transform matches on once at
//! entry instead of re-inspecting shape and dtype.
//!
//! Key behaviors
//! -------------
//! - Dispatch macros ([`with_array!`], [`map_array!`], [`map_payload!`]) run
//!   element-type-generic code over every variant without boxing.
//! - Conversions to `f64` and complex working arrays, and casts back to a
//!   requested element type with saturating `as` semantics.
//! - Grayscale luminance for color payloads.
//! - Single-element reads as [`ScalarValue`].
//!
//! Invariants & assumptions
//! ------------------------
//! - `Rgb` / `Rgba` arrays always have a trailing channel axis of length 3 / 4
//!   and at least one data axis before it; the constructors enforce this.
//! - Payloads are never mutated after they are wrapped in a calibrated value;
//!   every operation here returns a new array.
//!
//! Conventions
//! -----------
//! - The channel order of color payloads is R, G, B, [A].
//! - Complex conversions to real (`cast` to a real type) keep the real part.
use crate::data::{
    dtype::{DataDescriptor, DataType},
    errors::{DataError, DataResult},
};
use ndarray::{ArrayD, Axis, IxDyn};
use num_complex::{Complex32, Complex64};

/// Rec. 709 luminance weights for R, G, B.
pub const LUMINANCE_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

/// ArrayData — a dense n-D array tagged with its element type.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    Int8(ArrayD<i8>),
    Int16(ArrayD<i16>),
    Int32(ArrayD<i32>),
    Int64(ArrayD<i64>),
    UInt8(ArrayD<u8>),
    UInt16(ArrayD<u16>),
    UInt32(ArrayD<u32>),
    UInt64(ArrayD<u64>),
    Float32(ArrayD<f32>),
    Float64(ArrayD<f64>),
    Complex64(ArrayD<Complex32>),
    Complex128(ArrayD<Complex64>),
}

/// Evaluate an expression over the array inside an [`ArrayData`], whatever
/// its element type. The expression must type-check for every element type.
macro_rules! with_array {
    ($data:expr, $arr:ident => $body:expr) => {
        match $data {
            $crate::data::payload::ArrayData::Int8($arr) => $body,
            $crate::data::payload::ArrayData::Int16($arr) => $body,
            $crate::data::payload::ArrayData::Int32($arr) => $body,
            $crate::data::payload::ArrayData::Int64($arr) => $body,
            $crate::data::payload::ArrayData::UInt8($arr) => $body,
            $crate::data::payload::ArrayData::UInt16($arr) => $body,
            $crate::data::payload::ArrayData::UInt32($arr) => $body,
            $crate::data::payload::ArrayData::UInt64($arr) => $body,
            $crate::data::payload::ArrayData::Float32($arr) => $body,
            $crate::data::payload::ArrayData::Float64($arr) => $body,
            $crate::data::payload::ArrayData::Complex64($arr) => $body,
            $crate::data::payload::ArrayData::Complex128($arr) => $body,
        }
    };
}

/// Like [`with_array!`], but re-wraps the resulting array in the same variant.
macro_rules! map_array {
    ($data:expr, $arr:ident => $body:expr) => {
        match $data {
            $crate::data::payload::ArrayData::Int8($arr) => {
                $crate::data::payload::ArrayData::Int8($body)
            }
            $crate::data::payload::ArrayData::Int16($arr) => {
                $crate::data::payload::ArrayData::Int16($body)
            }
            $crate::data::payload::ArrayData::Int32($arr) => {
                $crate::data::payload::ArrayData::Int32($body)
            }
            $crate::data::payload::ArrayData::Int64($arr) => {
                $crate::data::payload::ArrayData::Int64($body)
            }
            $crate::data::payload::ArrayData::UInt8($arr) => {
                $crate::data::payload::ArrayData::UInt8($body)
            }
            $crate::data::payload::ArrayData::UInt16($arr) => {
                $crate::data::payload::ArrayData::UInt16($body)
            }
            $crate::data::payload::ArrayData::UInt32($arr) => {
                $crate::data::payload::ArrayData::UInt32($body)
            }
            $crate::data::payload::ArrayData::UInt64($arr) => {
                $crate::data::payload::ArrayData::UInt64($body)
            }
            $crate::data::payload::ArrayData::Float32($arr) => {
                $crate::data::payload::ArrayData::Float32($body)
            }
            $crate::data::payload::ArrayData::Float64($arr) => {
                $crate::data::payload::ArrayData::Float64($body)
            }
            $crate::data::payload::ArrayData::Complex64($arr) => {
                $crate::data::payload::ArrayData::Complex64($body)
            }
            $crate::data::payload::ArrayData::Complex128($arr) => {
                $crate::data::payload::ArrayData::Complex128($body)
            }
        }
    };
}

/// Apply a structural (element-type-agnostic) array expression to every
/// payload variant. Color payloads keep their variant, so the expression
/// must leave the trailing channel axis alone.
macro_rules! map_payload {
    ($payload:expr, $arr:ident => $body:expr) => {
        match $payload {
            $crate::data::payload::Payload::Numeric(data) => {
                $crate::data::payload::Payload::Numeric($crate::data::payload::map_array!(
                    data,
                    $arr => $body
                ))
            }
            $crate::data::payload::Payload::Rgb($arr) => {
                $crate::data::payload::Payload::Rgb($body)
            }
            $crate::data::payload::Payload::Rgba($arr) => {
                $crate::data::payload::Payload::Rgba($body)
            }
        }
    };
}

pub(crate) use {map_array, map_payload, with_array};

/// RealElement — conversions between a real element type and `f64`.
///
/// `from_f64` uses Rust `as` semantics: saturating for integers, `NaN` → 0.
pub trait RealElement: Copy + Send + Sync + 'static {
    const DATA_TYPE: DataType;
    fn to_f64(self) -> f64;
    fn from_f64(value: f64) -> Self;
}

macro_rules! impl_real_element {
    ($($t:ty => $variant:ident),* $(,)?) => {
        $(
            impl RealElement for $t {
                const DATA_TYPE: DataType = DataType::$variant;

                #[inline]
                fn to_f64(self) -> f64 {
                    self as f64
                }

                #[inline]
                fn from_f64(value: f64) -> Self {
                    value as $t
                }
            }

            impl From<ArrayD<$t>> for ArrayData {
                fn from(arr: ArrayD<$t>) -> Self {
                    ArrayData::$variant(arr)
                }
            }
        )*
    };
}

impl_real_element!(
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => UInt8,
    u16 => UInt16,
    u32 => UInt32,
    u64 => UInt64,
    f32 => Float32,
    f64 => Float64,
);

impl From<ArrayD<Complex32>> for ArrayData {
    fn from(arr: ArrayD<Complex32>) -> Self {
        ArrayData::Complex64(arr)
    }
}

impl From<ArrayD<Complex64>> for ArrayData {
    fn from(arr: ArrayD<Complex64>) -> Self {
        ArrayData::Complex128(arr)
    }
}

fn cast_real<T: RealElement>(arr: &ArrayD<f64>) -> ArrayD<T> {
    arr.mapv(T::from_f64)
}

fn real_to_f64<T: RealElement>(arr: &ArrayD<T>) -> ArrayD<f64> {
    arr.mapv(T::to_f64)
}

impl ArrayData {
    /// Element type of this array.
    pub fn data_type(&self) -> DataType {
        match self {
            ArrayData::Int8(_) => DataType::Int8,
            ArrayData::Int16(_) => DataType::Int16,
            ArrayData::Int32(_) => DataType::Int32,
            ArrayData::Int64(_) => DataType::Int64,
            ArrayData::UInt8(_) => DataType::UInt8,
            ArrayData::UInt16(_) => DataType::UInt16,
            ArrayData::UInt32(_) => DataType::UInt32,
            ArrayData::UInt64(_) => DataType::UInt64,
            ArrayData::Float32(_) => DataType::Float32,
            ArrayData::Float64(_) => DataType::Float64,
            ArrayData::Complex64(_) => DataType::Complex64,
            ArrayData::Complex128(_) => DataType::Complex128,
        }
    }

    pub fn shape(&self) -> &[usize] {
        with_array!(self, a => a.shape())
    }

    pub fn ndim(&self) -> usize {
        with_array!(self, a => a.ndim())
    }

    pub fn len(&self) -> usize {
        with_array!(self, a => a.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All-zero array of the given element type; `None` for color types.
    pub fn zeros(dtype: DataType, shape: &[usize]) -> Option<ArrayData> {
        let dim = IxDyn(shape);
        let data = match dtype {
            DataType::Int8 => ArrayData::Int8(ArrayD::zeros(dim)),
            DataType::Int16 => ArrayData::Int16(ArrayD::zeros(dim)),
            DataType::Int32 => ArrayData::Int32(ArrayD::zeros(dim)),
            DataType::Int64 => ArrayData::Int64(ArrayD::zeros(dim)),
            DataType::UInt8 => ArrayData::UInt8(ArrayD::zeros(dim)),
            DataType::UInt16 => ArrayData::UInt16(ArrayD::zeros(dim)),
            DataType::UInt32 => ArrayData::UInt32(ArrayD::zeros(dim)),
            DataType::UInt64 => ArrayData::UInt64(ArrayD::zeros(dim)),
            DataType::Float32 => ArrayData::Float32(ArrayD::zeros(dim)),
            DataType::Float64 => ArrayData::Float64(ArrayD::zeros(dim)),
            DataType::Complex64 => ArrayData::Complex64(ArrayD::zeros(dim)),
            DataType::Complex128 => ArrayData::Complex128(ArrayD::zeros(dim)),
            DataType::Rgb | DataType::Rgba => return None,
        };
        Some(data)
    }

    /// Real working copy as `f64`; `None` for complex arrays.
    pub fn to_f64(&self) -> Option<ArrayD<f64>> {
        let out = match self {
            ArrayData::Int8(a) => real_to_f64(a),
            ArrayData::Int16(a) => real_to_f64(a),
            ArrayData::Int32(a) => real_to_f64(a),
            ArrayData::Int64(a) => real_to_f64(a),
            ArrayData::UInt8(a) => real_to_f64(a),
            ArrayData::UInt16(a) => real_to_f64(a),
            ArrayData::UInt32(a) => real_to_f64(a),
            ArrayData::UInt64(a) => real_to_f64(a),
            ArrayData::Float32(a) => real_to_f64(a),
            ArrayData::Float64(a) => a.clone(),
            ArrayData::Complex64(_) | ArrayData::Complex128(_) => return None,
        };
        Some(out)
    }

    /// Complex working copy; real arrays get a zero imaginary part.
    pub fn to_complex(&self) -> ArrayD<Complex64> {
        match self {
            ArrayData::Complex64(a) => a.mapv(|v| Complex64::new(v.re as f64, v.im as f64)),
            ArrayData::Complex128(a) => a.clone(),
            real => {
                let values = real.to_f64().unwrap_or_else(|| ArrayD::zeros(IxDyn(real.shape())));
                values.mapv(|v| Complex64::new(v, 0.0))
            }
        }
    }

    /// Wrap an `f64` array as the requested numeric type.
    ///
    /// Real targets use saturating `as` casts, complex targets get a zero
    /// imaginary part; color targets yield `None`.
    pub fn from_f64_as(dtype: DataType, arr: &ArrayD<f64>) -> Option<ArrayData> {
        let data = match dtype {
            DataType::Int8 => ArrayData::Int8(cast_real(arr)),
            DataType::Int16 => ArrayData::Int16(cast_real(arr)),
            DataType::Int32 => ArrayData::Int32(cast_real(arr)),
            DataType::Int64 => ArrayData::Int64(cast_real(arr)),
            DataType::UInt8 => ArrayData::UInt8(cast_real(arr)),
            DataType::UInt16 => ArrayData::UInt16(cast_real(arr)),
            DataType::UInt32 => ArrayData::UInt32(cast_real(arr)),
            DataType::UInt64 => ArrayData::UInt64(cast_real(arr)),
            DataType::Float32 => ArrayData::Float32(cast_real(arr)),
            DataType::Float64 => ArrayData::Float64(arr.clone()),
            DataType::Complex64 => {
                ArrayData::Complex64(arr.mapv(|v| Complex32::new(v as f32, 0.0)))
            }
            DataType::Complex128 => ArrayData::Complex128(arr.mapv(|v| Complex64::new(v, 0.0))),
            DataType::Rgb | DataType::Rgba => return None,
        };
        Some(data)
    }

    /// Wrap a complex array as the requested complex type (real targets keep
    /// the real part).
    pub fn from_complex_as(dtype: DataType, arr: &ArrayD<Complex64>) -> Option<ArrayData> {
        match dtype {
            DataType::Complex64 => {
                Some(ArrayData::Complex64(arr.mapv(|v| Complex32::new(v.re as f32, v.im as f32))))
            }
            DataType::Complex128 => Some(ArrayData::Complex128(arr.clone())),
            real => ArrayData::from_f64_as(real, &arr.mapv(|v| v.re)),
        }
    }

    /// Element type conversion; `None` when the target is a color type.
    pub fn cast(&self, dtype: DataType) -> Option<ArrayData> {
        if dtype == self.data_type() {
            return Some(self.clone());
        }
        match self.to_f64() {
            Some(real) => ArrayData::from_f64_as(dtype, &real),
            None => ArrayData::from_complex_as(dtype, &self.to_complex()),
        }
    }

    /// Apply a real-valued linear operation while keeping the element type.
    ///
    /// Real arrays run `op` once on their `f64` copy and are cast back;
    /// complex arrays run `op` on the real and imaginary parts separately.
    pub fn map_linear<F>(&self, op: F) -> Option<ArrayData>
    where
        F: Fn(&ArrayD<f64>) -> ArrayD<f64>,
    {
        match self.to_f64() {
            Some(real) => ArrayData::from_f64_as(self.data_type(), &op(&real)),
            None => {
                let complex = self.to_complex();
                let re = op(&complex.mapv(|v| v.re));
                let im = op(&complex.mapv(|v| v.im));
                let mut out = ArrayD::<Complex64>::zeros(IxDyn(re.shape()));
                ndarray::Zip::from(&mut out).and(&re).and(&im).for_each(|o, &r, &i| {
                    *o = Complex64::new(r, i);
                });
                ArrayData::from_complex_as(self.data_type(), &out)
            }
        }
    }

    /// Join arrays of one element type along `axis`.
    ///
    /// Returns `None` for an empty slice, mixed element types, an axis out of
    /// range or mismatched extents on the other axes.
    pub fn concatenate(parts: &[&ArrayData], axis: usize) -> Option<ArrayData> {
        macro_rules! join {
            ($($variant:ident),*) => {
                match parts.first()? {
                    $(
                        ArrayData::$variant(_) => {
                            let views = parts
                                .iter()
                                .map(|part| match part {
                                    ArrayData::$variant(a) => Some(a.view()),
                                    _ => None,
                                })
                                .collect::<Option<Vec<_>>>()?;
                            ndarray::concatenate(Axis(axis), &views).ok().map(ArrayData::$variant)
                        }
                    )*
                }
            };
        }
        join!(
            Int8, Int16, Int32, Int64, UInt8, UInt16, UInt32, UInt64, Float32, Float64, Complex64,
            Complex128
        )
    }

    /// Read one element.
    pub fn get(&self, index: &[usize]) -> Option<ScalarValue> {
        with_array!(self, a => a.get(IxDyn(index)).map(|v| ScalarValue::from(*v)))
    }
}

/// Payload — closed variant over numeric and color payloads.
///
/// Variants
/// --------
/// - `Numeric(ArrayData)`: every axis is a data axis.
/// - `Rgb(ArrayD<u8>)`: trailing channel axis of length 3.
/// - `Rgba(ArrayD<u8>)`: trailing channel axis of length 4.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Numeric(ArrayData),
    Rgb(ArrayD<u8>),
    Rgba(ArrayD<u8>),
}

impl From<ArrayData> for Payload {
    fn from(data: ArrayData) -> Self {
        Payload::Numeric(data)
    }
}

impl<T> From<ArrayD<T>> for Payload
where
    ArrayData: From<ArrayD<T>>,
{
    fn from(arr: ArrayD<T>) -> Self {
        Payload::Numeric(ArrayData::from(arr))
    }
}

fn check_channels(arr: &ArrayD<u8>, expected: usize) -> DataResult<()> {
    if arr.ndim() < 2 {
        return Err(DataError::MissingChannelAxis);
    }
    let actual = arr.shape()[arr.ndim() - 1];
    if actual != expected {
        return Err(DataError::ChannelCountMismatch { expected, actual });
    }
    Ok(())
}

impl Payload {
    /// Build an RGB payload; the last axis must have length 3.
    ///
    /// Errors
    /// ------
    /// - `DataError::MissingChannelAxis` when `arr.ndim() < 2`.
    /// - `DataError::ChannelCountMismatch` when the last axis is not 3 long.
    pub fn rgb(arr: ArrayD<u8>) -> DataResult<Self> {
        check_channels(&arr, 3)?;
        Ok(Payload::Rgb(arr))
    }

    /// Build an RGBA payload; the last axis must have length 4.
    pub fn rgba(arr: ArrayD<u8>) -> DataResult<Self> {
        check_channels(&arr, 4)?;
        Ok(Payload::Rgba(arr))
    }

    /// Numeric payload from a flat row-major buffer.
    ///
    /// Errors
    /// ------
    /// - `DataError::Shape` when `values.len()` differs from the product of
    ///   `shape`.
    ///
    /// Examples
    /// --------
    /// ```rust
    /// # use calibrated_data::data::{DataType, Payload};
    /// let payload = Payload::from_shape_vec(&[2, 3], vec![0u16; 6]).unwrap();
    /// assert_eq!(payload.data_shape(), vec![2, 3]);
    /// assert_eq!(payload.data_type(), DataType::UInt16);
    /// assert!(Payload::from_shape_vec(&[2, 3], vec![0u16; 5]).is_err());
    /// ```
    pub fn from_shape_vec<T>(shape: &[usize], values: Vec<T>) -> DataResult<Self>
    where
        ArrayData: From<ArrayD<T>>,
    {
        let arr = ArrayD::from_shape_vec(IxDyn(shape), values)?;
        Ok(Payload::from(arr))
    }

    /// Check the channel axis of a color payload; numeric payloads always
    /// pass.
    ///
    /// The color variants are public, so a payload built without
    /// [`Payload::rgb`] / [`Payload::rgba`] may carry a wrong or missing
    /// channel axis. [`DataAndMetadata::new`](crate::data::DataAndMetadata::new)
    /// and the transform guards run this check.
    ///
    /// Errors
    /// ------
    /// - `DataError::MissingChannelAxis` / `DataError::ChannelCountMismatch`
    ///   as for [`Payload::rgb`].
    pub fn check(&self) -> DataResult<()> {
        match self {
            Payload::Numeric(_) => Ok(()),
            Payload::Rgb(a) => check_channels(a, 3),
            Payload::Rgba(a) => check_channels(a, 4),
        }
    }

    pub fn data_type(&self) -> DataType {
        match self {
            Payload::Numeric(data) => data.data_type(),
            Payload::Rgb(_) => DataType::Rgb,
            Payload::Rgba(_) => DataType::Rgba,
        }
    }

    /// Shape of the data axes (channel axis excluded). A color array with no
    /// axis at all reports an empty shape.
    pub fn data_shape(&self) -> Vec<usize> {
        match self {
            Payload::Numeric(data) => data.shape().to_vec(),
            Payload::Rgb(a) | Payload::Rgba(a) => a.shape()[..a.ndim().saturating_sub(1)].to_vec(),
        }
    }

    /// Number of data axes.
    pub fn rank(&self) -> usize {
        match self {
            Payload::Numeric(data) => data.ndim(),
            Payload::Rgb(a) | Payload::Rgba(a) => a.ndim().saturating_sub(1),
        }
    }

    pub fn descriptor(&self) -> DataDescriptor {
        DataDescriptor::new(self.data_shape(), self.data_type())
    }

    pub fn is_color(&self) -> bool {
        !matches!(self, Payload::Numeric(_))
    }

    pub fn as_numeric(&self) -> Option<&ArrayData> {
        match self {
            Payload::Numeric(data) => Some(data),
            _ => None,
        }
    }

    /// All-zero payload matching a descriptor.
    pub fn zeros(descriptor: &DataDescriptor) -> Payload {
        let shape = &descriptor.data_shape;
        match descriptor.data_type.channel_count() {
            Some(channels) => {
                let mut full = shape.clone();
                full.push(channels);
                let arr = ArrayD::<u8>::zeros(IxDyn(&full));
                if channels == 3 { Payload::Rgb(arr) } else { Payload::Rgba(arr) }
            }
            None => match ArrayData::zeros(descriptor.data_type, shape) {
                Some(data) => Payload::Numeric(data),
                None => Payload::Numeric(ArrayData::Float64(ArrayD::zeros(IxDyn(shape)))),
            },
        }
    }

    /// Luminance of a color payload as `f64`; `None` for numeric payloads and
    /// for color payloads with a malformed channel axis.
    pub fn to_grayscale(&self) -> Option<ArrayD<f64>> {
        match self {
            Payload::Numeric(_) => None,
            Payload::Rgb(a) | Payload::Rgba(a) => {
                self.check().ok()?;
                let channel_axis = Axis(a.ndim() - 1);
                let mut gray = ArrayD::<f64>::zeros(IxDyn(&a.shape()[..a.ndim() - 1]));
                for (c, weight) in LUMINANCE_WEIGHTS.iter().enumerate() {
                    let channel = a.index_axis(channel_axis, c);
                    gray.zip_mut_with(&channel, |g, &v| *g += weight * v as f64);
                }
                Some(gray)
            }
        }
    }

    /// Real `f64` view of the payload: numeric real data as-is, color data
    /// as luminance. `None` for complex data.
    pub fn to_real_f64(&self) -> Option<ArrayD<f64>> {
        match self {
            Payload::Numeric(data) => data.to_f64(),
            _ => self.to_grayscale(),
        }
    }

    /// Join payloads of one kind along data axis `axis`; the channel axis of
    /// color payloads is never joined.
    pub fn concatenate(parts: &[&Payload], axis: usize) -> Option<Payload> {
        let first = parts.first()?;
        if let Payload::Numeric(_) = first {
            let arrays = parts.iter().map(|part| part.as_numeric()).collect::<Option<Vec<_>>>()?;
            return ArrayData::concatenate(&arrays, axis).map(Payload::Numeric);
        }
        if axis >= first.rank() {
            return None;
        }
        let views = parts
            .iter()
            .map(|part| match part {
                Payload::Rgb(a) | Payload::Rgba(a) if part.data_type() == first.data_type() => {
                    Some(a.view())
                }
                _ => None,
            })
            .collect::<Option<Vec<_>>>()?;
        let joined = ndarray::concatenate(Axis(axis), &views).ok()?;
        match first {
            Payload::Rgb(_) => Some(Payload::Rgb(joined)),
            _ => Some(Payload::Rgba(joined)),
        }
    }
}

/// ScalarValue — one element read out of a payload or produced by a
/// reduction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue {
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Complex(Complex64),
}

impl ScalarValue {
    /// Real value as `f64`; `None` for complex scalars.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            ScalarValue::Integer(v) => Some(v as f64),
            ScalarValue::Unsigned(v) => Some(v as f64),
            ScalarValue::Float(v) => Some(v),
            ScalarValue::Complex(_) => None,
        }
    }
}

impl std::fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScalarValue::Integer(v) => write!(f, "{v}"),
            ScalarValue::Unsigned(v) => write!(f, "{v}"),
            ScalarValue::Float(v) => write!(f, "{v}"),
            ScalarValue::Complex(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! impl_scalar_from {
    ($variant:ident as $target:ty: $($t:ty),*) => {
        $(
            impl From<$t> for ScalarValue {
                fn from(v: $t) -> Self {
                    ScalarValue::$variant(v as $target)
                }
            }
        )*
    };
}

impl_scalar_from!(Integer as i64: i8, i16, i32, i64);
impl_scalar_from!(Unsigned as u64: u8, u16, u32, u64);
impl_scalar_from!(Float as f64: f32, f64);

impl From<Complex32> for ScalarValue {
    fn from(v: Complex32) -> Self {
        ScalarValue::Complex(Complex64::new(v.re as f64, v.im as f64))
    }
}

impl From<Complex64> for ScalarValue {
    fn from(v: Complex64) -> Self {
        ScalarValue::Complex(v)
    }
}
