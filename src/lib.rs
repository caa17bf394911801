//! calibrated_data — calibrated N-dimensional array transforms.
//!
//! Purpose
//! -------
//! Serve as the crate root for the calibrated value types and the transform
//! catalog built on them. A calibrated value pairs an n-D payload with an
//! intensity calibration and one dimensional calibration per data axis;
//! every transform computes new data together with correctly updated
//! calibrations (unit algebra, axis bookkeeping).
//!
//! Key behaviors
//! -------------
//! - [`data`]: calibrations, element types, payloads, deferred evaluation and
//!   the [`data::DataAndMetadata`] / [`data::ScalarAndMetadata`] values.
//! - [`geometry`]: fractional points, sizes, rectangles, intervals and
//!   vectors used as transform parameters.
//! - [`kernel`]: calibration-agnostic numerics on plain `ndarray` arrays.
//! - [`transforms`]: the catalog itself.
//!
//! Invariants & assumptions
//! ------------------------
//! - Values are immutable; transforms build new values and never mutate a
//!   source payload.
//! - Payloads are computed lazily, at most once, on first read; chaining
//!   transforms builds a graph of deferred computations.
//! - `dimensional_calibrations().len() == rank` for every value produced by
//!   this crate.
//!
//! Conventions
//! -----------
//! - "Absent" results are `None`. A transform that cannot run on its input
//!   logs the reason at debug level through the `log` facade; no logger is
//!   installed by the library.
//! - Positions and sizes are `(y, x)` / `(height, width)`, as fractions of
//!   the data extent unless stated otherwise.
//! - Color payloads (RGB / RGBA, 8 bits per channel) carry a trailing
//!   channel axis that is not a data axis and has no calibration.
//!
//! Downstream usage
//! ----------------
//! - `use calibrated_data::prelude::*;` brings the value types, geometry and
//!   every catalog entry into scope.
//!
//! Testing notes
//! -------------
//! - Each module carries unit tests; `tests/` holds pipeline tests that run
//!   chained transforms through the public API only.

pub mod data;
pub mod geometry;
pub mod kernel;
pub mod transforms;

pub mod prelude {
    pub use crate::data::prelude::*;
    pub use crate::geometry::{
        FloatInterval, FloatPoint, FloatRect, FloatSize, FloatVector, IntPoint, make_shape,
    };
    pub use crate::transforms::prelude::*;
}
