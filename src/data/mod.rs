//! data — calibrated values: calibrations, payloads, deferred evaluation.
//!
//! Purpose
//! -------
//! Bundle the value types every transform consumes and produces under one
//! namespace: [`Calibration`], [`DataType`] / [`DataDescriptor`], the
//! [`Payload`] closed variant, the deferred [`DataAndMetadata`] /
//! [`ScalarAndMetadata`] values, the validity predicate, and the
//! construction-time [`DataError`].
//!
//! Key behaviors
//! -------------
//! - [`calibration`]: affine index → physical map and `"1/"` unit algebra.
//! - [`dtype`]: element types, descriptors, dtype ↔ string mapping.
//! - [`payload`]: dense arrays over every element type, color payloads,
//!   scalar reads and conversions.
//! - [`lazy`]: shared, memoized thunks.
//! - [`data_and_metadata`]: the calibrated array and scalar values.
//! - [`validation`]: validity predicate and transform entry guards.
//! - [`errors`]: construction-time errors.
//!
//! Invariants & assumptions
//! ------------------------
//! - `dimensional_calibrations.len() == rank` for every value built through
//!   the public constructors.
//! - Payloads are never mutated once wrapped.
//!
//! Downstream usage
//! ----------------
//! - Build inputs with [`DataAndMetadata::new`] or
//!   [`DataAndMetadata::from_payload`], then hand them to the catalog in
//!   `crate::transforms`.

pub mod calibration;
pub mod data_and_metadata;
pub mod dtype;
pub mod errors;
pub mod lazy;
pub mod payload;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::calibration::{Calibration, reciprocal_units, toggle_reciprocal_units};
pub use self::data_and_metadata::{DataAndMetadata, Metadata, ScalarAndMetadata};
pub use self::dtype::{DataDescriptor, DataType, dtype_to_str, str_to_dtype};
pub use self::errors::{DataError, DataResult};
pub use self::lazy::Deferred;
pub use self::payload::{ArrayData, Payload, RealElement, ScalarValue};
pub use self::validation::{is_payload_valid, is_shape_and_dtype_valid};

// ---- Optional convenience prelude for downstream crates -------------------

pub mod prelude {
    pub use super::{
        ArrayData, Calibration, DataAndMetadata, DataDescriptor, DataError, DataResult, DataType,
        Metadata, Payload, ScalarAndMetadata, ScalarValue,
    };
}
