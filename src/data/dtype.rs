//! data::dtype — element types and up-front shape descriptors.
//!
//! Purpose
//! -------
//! Enumerate the element types a payload may carry ([`DataType`]) and the
//! descriptor ([`DataDescriptor`]) that lets a deferred value report its
//! shape and type without running its computation.
//!
//! Conventions
//! -----------
//! - `Rgb` / `Rgba` are 8-bit color encodings; their channel axis is not part
//!   of [`DataDescriptor::data_shape`].
//! - String names follow the usual array-library spellings (`"uint8"`,
//!   `"float64"`, `"complex128"`); the generic aliases `"int"`, `"float"`
//!   and `"complex"` resolve to the 64-bit / 128-bit types.

/// DataType — supported payload element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
    Float32,
    Float64,
    Complex64,
    Complex128,
    /// 8-bit color with a trailing channel axis of length 3.
    Rgb,
    /// 8-bit color with a trailing channel axis of length 4.
    Rgba,
}

impl DataType {
    /// Whether the type is one of the two color encodings.
    pub fn is_color(self) -> bool {
        matches!(self, DataType::Rgb | DataType::Rgba)
    }

    /// Whether the type is complex-valued.
    pub fn is_complex(self) -> bool {
        matches!(self, DataType::Complex64 | DataType::Complex128)
    }

    /// Whether the type is a real numeric (integer or floating point) type.
    pub fn is_real(self) -> bool {
        !self.is_color() && !self.is_complex()
    }

    /// Whether the type is an integer type.
    pub fn is_integer(self) -> bool {
        matches!(
            self,
            DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }

    /// Number of color channels (`None` for numeric types).
    pub fn channel_count(self) -> Option<usize> {
        match self {
            DataType::Rgb => Some(3),
            DataType::Rgba => Some(4),
            _ => None,
        }
    }
}

/// Parse a dtype name; unknown names fall back to `Float64`.
///
/// Examples
/// --------
/// ```rust
/// # use calibrated_data::data::dtype::{str_to_dtype, DataType};
/// assert_eq!(str_to_dtype("uint16"), DataType::UInt16);
/// assert_eq!(str_to_dtype("complex"), DataType::Complex128);
/// assert_eq!(str_to_dtype("bogus"), DataType::Float64);
/// ```
pub fn str_to_dtype(name: &str) -> DataType {
    match name {
        "int8" => DataType::Int8,
        "int16" => DataType::Int16,
        "int32" => DataType::Int32,
        "int" | "int64" => DataType::Int64,
        "uint8" => DataType::UInt8,
        "uint16" => DataType::UInt16,
        "uint32" => DataType::UInt32,
        "uint64" => DataType::UInt64,
        "float32" => DataType::Float32,
        "float" | "float64" => DataType::Float64,
        "complex64" => DataType::Complex64,
        "complex" | "complex128" => DataType::Complex128,
        _ => DataType::Float64,
    }
}

/// Canonical dtype name. Color types report their element type, `"uint8"`.
pub fn dtype_to_str(dtype: DataType) -> &'static str {
    match dtype {
        DataType::Int8 => "int8",
        DataType::Int16 => "int16",
        DataType::Int32 => "int32",
        DataType::Int64 => "int64",
        DataType::UInt8 | DataType::Rgb | DataType::Rgba => "uint8",
        DataType::UInt16 => "uint16",
        DataType::UInt32 => "uint32",
        DataType::UInt64 => "uint64",
        DataType::Float32 => "float32",
        DataType::Float64 => "float64",
        DataType::Complex64 => "complex64",
        DataType::Complex128 => "complex128",
    }
}

/// DataDescriptor — shape and element type of a (possibly deferred) payload.
///
/// Fields
/// ------
/// - `data_shape`: `Vec<usize>`
///   Extent of every data axis; excludes the color channel axis.
/// - `data_type`: [`DataType`]
///   Element type (or color encoding).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDescriptor {
    pub data_shape: Vec<usize>,
    pub data_type: DataType,
}

impl DataDescriptor {
    pub fn new(data_shape: Vec<usize>, data_type: DataType) -> Self {
        DataDescriptor { data_shape, data_type }
    }

    /// Number of data axes.
    pub fn rank(&self) -> usize {
        self.data_shape.len()
    }

    /// Number of data elements (color pixels count once).
    pub fn element_count(&self) -> usize {
        self.data_shape.iter().product()
    }
}
