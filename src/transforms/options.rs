//! transforms::options — typed parameters for catalog entries.
//!
//! Purpose
//! -------
//! Collect the small enums and option structs that parameterize transforms,
//! so call sites pass explicit, named choices instead of sentinel values
//! (`None` axes, `-1` wildcard extents, string distribution names).
//!
//! Key behaviors
//! -------------
//! - [`SumAxis`] selects the reduction axes of `sum`.
//! - [`RescaleRange`] is the target interval of `rescale`.
//! - [`TransposeFlip`] bundles the transpose / flip flags.
//! - [`SampleMethod`] picks the point sampler of `line_profile`.
//! - [`Distribution`] and [`DistributionFn`] select the function evaluated
//!   by `apply_distribution`.
//! - [`ReshapeDim`] is one requested extent of `reshape`, fixed or inferred.
//!
//! Conventions
//! -----------
//! - Every type with a natural identity setting implements `Default`:
//!   `SumAxis::All`, `RescaleRange { low: 0.0, high: 1.0 }`, no transpose or
//!   flips, and nearest-neighbor sampling.
//! - These are plain data carriers; range checks happen in the transforms.
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Axes reduced by `sum`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SumAxis {
    /// Reduce over every axis; the result has rank 0.
    #[default]
    All,
    Single(usize),
    Multiple(BTreeSet<usize>),
}

impl SumAxis {
    /// Sorted, deduplicated axes to reduce for a source of the given rank;
    /// `None` when any axis is out of range.
    pub fn resolve(&self, rank: usize) -> Option<Vec<usize>> {
        let axes: Vec<usize> = match self {
            SumAxis::All => (0..rank).collect(),
            SumAxis::Single(axis) => vec![*axis],
            SumAxis::Multiple(axes) => axes.iter().copied().collect(),
        };
        if axes.iter().all(|&axis| axis < rank) { Some(axes) } else { None }
    }
}

/// Target interval of `rescale`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RescaleRange {
    pub low: f64,
    pub high: f64,
}

impl RescaleRange {
    pub fn new(low: f64, high: f64) -> Self {
        RescaleRange { low, high }
    }

    pub fn span(&self) -> f64 {
        self.high - self.low
    }
}

impl Default for RescaleRange {
    fn default() -> Self {
        RescaleRange { low: 0.0, high: 1.0 }
    }
}

/// Transpose and flip flags for `transpose_flip`.
///
/// Flips only act on rank-2 data; `flip_v` reverses axis 0 and `flip_h`
/// reverses axis 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransposeFlip {
    pub transpose: bool,
    pub flip_v: bool,
    pub flip_h: bool,
}

impl TransposeFlip {
    pub fn new(transpose: bool, flip_v: bool, flip_h: bool) -> Self {
        TransposeFlip { transpose, flip_v, flip_h }
    }

    pub fn is_identity(&self) -> bool {
        !(self.transpose || self.flip_v || self.flip_h)
    }
}

/// Point sampler used along a line profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SampleMethod {
    /// Nearest grid point.
    #[default]
    Nearest,
    /// Bilinear interpolation between the four surrounding grid points.
    Linear,
}

/// Location/scale distribution family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Distribution {
    Normal,
    Cauchy,
    Laplace,
}

/// Function of a distribution evaluated element-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistributionFn {
    Pdf,
    LnPdf,
    Cdf,
}

/// One requested extent of a reshape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReshapeDim {
    Fixed(usize),
    /// Computed from the element count; at most one per request.
    Infer,
}

impl From<usize> for ReshapeDim {
    fn from(extent: usize) -> Self {
        ReshapeDim::Fixed(extent)
    }
}

impl ReshapeDim {
    /// Parse the signed wildcard convention: `-1` infers, other negative
    /// values are rejected.
    pub fn from_signed(extent: i64) -> Option<Self> {
        match extent {
            -1 => Some(ReshapeDim::Infer),
            n if n >= 0 => Some(ReshapeDim::Fixed(n as usize)),
            _ => None,
        }
    }
}
