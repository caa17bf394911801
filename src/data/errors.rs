//! data::errors — construction-time failures for calibrated values.
//!
//! Purpose
//! -------
//! Provide the error enum and result alias used when a calibrated value or a
//! payload is built from raw parts. Transform entries never return these
//! errors: a transform that cannot run yields an absent result (`None`)
//! instead, so that transform chains short-circuit without error plumbing.
//!
//! Key behaviors
//! -------------
//! - Define [`DataError`] with one variant per construction invariant
//!   (calibration count, color channel count, array shape).
//! - Attach human-readable `Display` messages that embed the offending
//!   values.
//! - Convert `ndarray::ShapeError` into [`DataError::Shape`] so `?` works at
//!   array-construction call sites such as `Payload::from_shape_vec`.
//!
//! Conventions
//! -----------
//! - Messages are phrased in terms of the violated invariant ("expected 2
//!   dimensional calibrations, got 3") rather than low-level details.
//! - Variants are small and cloneable so they can be compared in tests.
//!
//! Testing notes
//! -------------
//! - Unit tests verify that each variant's `Display` message embeds its
//!   payload and that `ShapeError` conversion preserves the message.

/// Result alias for construction paths that may produce [`DataError`].
pub type DataResult<T> = Result<T, DataError>;

/// DataError — invariant violations while building calibrated values.
///
/// Variants
/// --------
/// - `CalibrationCountMismatch { expected, actual }`
///   The number of dimensional calibrations differs from the payload rank.
/// - `ChannelCountMismatch { expected, actual }`
///   A color payload's trailing axis is not 3 (RGB) or 4 (RGBA) long.
/// - `MissingChannelAxis`
///   A color payload has no axis besides the channel axis.
/// - `Shape(String)`
///   An `ndarray` shape error (a flat buffer whose length does not match
///   the requested shape).
#[derive(Debug, Clone, PartialEq)]
pub enum DataError {
    // ---- Calibrations ----
    /// Dimensional calibration count must equal the payload rank.
    CalibrationCountMismatch { expected: usize, actual: usize },

    // ---- Color payloads ----
    /// Trailing channel axis has the wrong length.
    ChannelCountMismatch { expected: usize, actual: usize },

    /// Color payload needs at least one data axis plus the channel axis.
    MissingChannelAxis,

    // ---- ndarray passthrough ----
    Shape(String),
}

impl std::error::Error for DataError {}

impl std::fmt::Display for DataError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataError::CalibrationCountMismatch { expected, actual } => {
                write!(f, "Expected {expected} dimensional calibrations, got {actual}.")
            }
            DataError::ChannelCountMismatch { expected, actual } => {
                write!(
                    f,
                    "Color payload must have {expected} channels on its last axis, got {actual}."
                )
            }
            DataError::MissingChannelAxis => {
                write!(
                    f,
                    "Color payload must have at least one data axis before the channel axis."
                )
            }
            DataError::Shape(msg) => write!(f, "Array shape error: {msg}"),
        }
    }
}

impl From<ndarray::ShapeError> for DataError {
    fn from(err: ndarray::ShapeError) -> Self {
        DataError::Shape(err.to_string())
    }
}
