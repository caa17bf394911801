//! kernel — numeric building blocks on plain `ndarray` arrays.
//!
//! Purpose
//! -------
//! Hold the calibration-agnostic numerics the transform catalog is built on.
//! Nothing here knows about calibrations, metadata or deferred payloads;
//! every function takes and returns owned or borrowed arrays.
//!
//! Key behaviors
//! -------------
//! - [`fft`]: complex n-D transforms, 2-D real transforms, frequency shifts
//!   (`rustfft`, `realfft`).
//! - [`filters`]: reflect-boundary correlation, sobel, laplace, gaussian,
//!   uniform and median filters.
//! - [`interpolate`]: bilinear resize and point sampling.
//! - [`stats`]: mean / std / min / max / ptp and histogram binning.
//! - [`grid`]: linspace, logspace, arange.
//!
//! Conventions
//! -----------
//! - Working precision is `f64` (and `Complex64` for spectra); callers cast
//!   back to the source element type.

pub mod fft;
pub mod filters;
pub mod grid;
pub mod interpolate;
pub mod stats;
