//! transforms — the catalog of calibrated transforms.
//!
//! Purpose
//! -------
//! Group the pure functions that turn calibrated values into new calibrated
//! values. Each entry computes its output payload lazily and updates the
//! intensity calibration, dimensional calibrations and metadata eagerly.
//!
//! Key behaviors
//! -------------
//! - [`generators`]: coordinate ramps, radius maps, fills and 1-D grids.
//! - [`fourier`]: fft / ifft, auto- and cross-correlation, Fourier masks.
//! - [`filters`]: sobel, laplace, gaussian, median and uniform filters.
//! - [`structural`]: transpose/flip, invert, crops, slice sums, pick,
//!   reshape and resampling.
//! - [`reduction`]: sums, joins, histograms and rescaling.
//! - [`profile`]: line profiles.
//! - [`generic`]: payload adapters, distributions, element reads and casts.
//! - [`options`]: typed parameters shared by the entries above.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every entry validates its source first and returns `None` (logged at
//!   debug level) instead of failing; only `fft` / `ifft` on rank ≥ 3 and
//!   `line_profile` with a zero integration width panic.
//! - The output calibration count always equals the output rank.
//! - Source payloads are read, never mutated.
//!
//! Downstream usage
//! ----------------
//! - Import the entries through [`prelude`] or `crate::prelude`, chain them
//!   freely, and read the final payload with `DataAndMetadata::data`; the
//!   whole chain evaluates at that point.

pub mod filters;
pub mod fourier;
pub mod generators;
pub mod generic;
pub mod options;
pub mod profile;
pub mod reduction;
pub mod structural;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::filters::{gaussian_blur, laplace, median_filter, sobel, uniform_filter};
pub use self::fourier::{autocorrelate, crosscorrelate, fft, fourier_mask, ifft};
pub use self::generators::{arange, column, full, linspace, logspace, radius, row};
pub use self::generic::{
    apply_distribution, array_function, astype, data_shape, scalar_function, take_item,
};
pub use self::options::{
    Distribution, DistributionFn, RescaleRange, ReshapeDim, SampleMethod, SumAxis, TransposeFlip,
};
pub use self::profile::line_profile;
pub use self::reduction::{concatenate, histogram, hstack, rescale, sum, vstack};
pub use self::structural::{
    crop, crop_interval, invert, pick, resample_2d, reshape, slice_sum, transpose_flip,
};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::{
        apply_distribution, arange, array_function, astype, autocorrelate, column, concatenate,
        crop, crop_interval, crosscorrelate, data_shape, fft, fourier_mask, full, gaussian_blur,
        histogram, hstack, ifft, invert, laplace, line_profile, linspace, logspace,
        median_filter, pick, radius, resample_2d, rescale, reshape, row, scalar_function,
        slice_sum, sobel, sum, take_item, transpose_flip, uniform_filter, vstack, Distribution,
        DistributionFn, RescaleRange, ReshapeDim, SampleMethod, SumAxis, TransposeFlip,
    };
}
