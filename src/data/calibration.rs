//! data::calibration — affine index → physical-quantity mapping.
//!
//! Purpose
//! -------
//! Define the [`Calibration`] value type `(offset, scale, units)` attached to
//! the intensity axis and to every data axis of a calibrated value, plus the
//! small unit-string algebra the Fourier transforms rely on.
//!
//! Key behaviors
//! -------------
//! - `physical = offset + index * scale`, and its inverse.
//! - Value equality over all three fields.
//! - [`reciprocal_units`] prepends `"1/"` (forward transform);
//!   [`toggle_reciprocal_units`] strips a leading `"1/"` or prepends one
//!   (inverse transform).
//!
//! Invariants & assumptions
//! ------------------------
//! - No validation is applied to `scale`; a zero or non-finite scale is a
//!   legal (if useless) calibration and propagates through arithmetic as IEEE
//!   values.
//! - The uncalibrated value is exactly `(0.0, 1.0, "")`.
//!
//! Conventions
//! -----------
//! - `units` is free text (e.g. `"nm"`, `"eV"`, `"1/nm"`); the crate never
//!   parses it beyond the `"1/"` prefix.
use serde::{Deserialize, Serialize};

/// Prefix marking reciprocal units (e.g. `"1/nm"`).
pub const RECIPROCAL_PREFIX: &str = "1/";

/// Calibration — affine map from array index to a physical quantity.
///
/// Fields
/// ------
/// - `offset`: `f64`
///   Physical value at index 0.
/// - `scale`: `f64`
///   Physical increment per index step.
/// - `units`: `String`
///   Unit label of the physical value; empty when unknown.
///
/// Notes
/// -----
/// - `Default` is the uncalibrated value `(0.0, 1.0, "")`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Calibration {
    pub offset: f64,
    pub scale: f64,
    pub units: String,
}

impl Default for Calibration {
    fn default() -> Self {
        Calibration::uncalibrated()
    }
}

impl Calibration {
    /// Construct a calibration from its three components.
    pub fn new(offset: f64, scale: f64, units: impl Into<String>) -> Self {
        Calibration { offset, scale, units: units.into() }
    }

    /// The "no physical meaning" calibration `(0.0, 1.0, "")`.
    pub fn uncalibrated() -> Self {
        Calibration { offset: 0.0, scale: 1.0, units: String::new() }
    }

    /// Whether this calibration differs from the uncalibrated value.
    pub fn is_calibrated(&self) -> bool {
        *self != Calibration::uncalibrated()
    }

    /// Map an index (possibly fractional) to its physical value.
    pub fn convert_to_calibrated_value(&self, index: f64) -> f64 {
        self.offset + index * self.scale
    }

    /// Map a physical value back to a (fractional) index.
    ///
    /// Returns `NaN` or ±∞ when `scale == 0.0`, matching plain IEEE division.
    pub fn convert_from_calibrated_value(&self, value: f64) -> f64 {
        (value - self.offset) / self.scale
    }

    /// Same offset and scale, different units.
    pub fn with_units(&self, units: impl Into<String>) -> Self {
        Calibration { offset: self.offset, scale: self.scale, units: units.into() }
    }
}

/// Units of the reciprocal space: `"nm"` → `"1/nm"`.
///
/// Applied unconditionally, so `"1/nm"` becomes `"1/1/nm"`; the forward
/// Fourier transform relies on exactly this behavior.
pub fn reciprocal_units(units: &str) -> String {
    format!("{RECIPROCAL_PREFIX}{units}")
}

/// Toggle between real and reciprocal units.
///
/// - `"1/nm"` → `"nm"` (one leading prefix stripped),
/// - `"nm"` → `"1/nm"`,
/// - `""` → `"1/"`.
pub fn toggle_reciprocal_units(units: &str) -> String {
    match units.strip_prefix(RECIPROCAL_PREFIX) {
        Some(rest) => rest.to_string(),
        None => reciprocal_units(units),
    }
}
