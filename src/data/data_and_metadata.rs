//! data::data_and_metadata — calibrated array and scalar values.
//!
//! Purpose
//! -------
//! Define [`DataAndMetadata`], the value every transform consumes and
//! produces: a deferred [`Payload`], its up-front [`DataDescriptor`], an
//! intensity calibration, one dimensional calibration per data axis, opaque
//! metadata and a capture timestamp. [`ScalarAndMetadata`] is the reduced,
//! single-scalar counterpart.
//!
//! Key behaviors
//! -------------
//! - Eager construction validates `dimensional_calibrations.len() == rank`
//!   and reports violations as [`DataError`].
//! - Crate-internal constructors build deferred values from a known
//!   descriptor plus a thunk, so a transform result can report its shape and
//!   calibrations before any numeric work happens.
//! - `data()` forces the payload once and memoizes it; clones share it.
//!
//! Invariants & assumptions
//! ------------------------
//! - Values are immutable after construction.
//! - For every transform except the generic array adapter the descriptor is
//!   known up front; the adapter derives it by evaluating the payload.
//! - `DataAndMetadata` is `Send + Sync`; a payload is computed at most once
//!   even when read from several threads.
//!
//! Conventions
//! -----------
//! - Timestamps are UTC and taken at construction.
//! - Metadata is a JSON object map; the crate never interprets its keys.
use crate::data::{
    calibration::Calibration,
    dtype::{DataDescriptor, DataType},
    errors::{DataError, DataResult},
    lazy::Deferred,
    payload::{Payload, ScalarValue},
};
use chrono::{DateTime, Utc};
use std::fmt;

/// Opaque key/value metadata carried alongside a payload.
pub type Metadata = serde_json::Map<String, serde_json::Value>;

#[derive(Debug, Clone)]
enum DescriptorSource {
    Known(DataDescriptor),
    Derived,
}

/// DataAndMetadata — a payload with its calibrations and metadata.
///
/// Fields
/// ------
/// - deferred payload (see [`DataAndMetadata::data`])
/// - descriptor: shape and element type, known up front or derived
/// - `intensity_calibration`: calibration of the value axis
/// - `dimensional_calibrations`: one calibration per data axis
/// - `metadata`: opaque [`Metadata`]
/// - `timestamp`: UTC capture time
#[derive(Clone)]
pub struct DataAndMetadata {
    payload: Deferred<Payload>,
    descriptor: DescriptorSource,
    intensity_calibration: Calibration,
    dimensional_calibrations: Vec<Calibration>,
    metadata: Metadata,
    timestamp: DateTime<Utc>,
}

impl DataAndMetadata {
    /// Build a value from an already-computed payload.
    ///
    /// Parameters
    /// ----------
    /// - `payload`: [`Payload`]
    ///   The data. Its rank is the number of data axes (color channel axis
    ///   excluded).
    /// - `intensity_calibration`: [`Calibration`]
    /// - `dimensional_calibrations`: `Option<Vec<Calibration>>`
    ///   One per data axis; `None` means every axis is uncalibrated.
    /// - `metadata`: [`Metadata`]
    ///
    /// Errors
    /// ------
    /// - `DataError::MissingChannelAxis` / `DataError::ChannelCountMismatch`
    ///   when a color payload has a malformed channel axis.
    /// - `DataError::CalibrationCountMismatch` when the calibration count
    ///   differs from the payload rank.
    pub fn new(
        payload: Payload, intensity_calibration: Calibration,
        dimensional_calibrations: Option<Vec<Calibration>>, metadata: Metadata,
    ) -> DataResult<Self> {
        payload.check()?;
        let descriptor = payload.descriptor();
        let dimensional_calibrations = match dimensional_calibrations {
            Some(calibrations) => {
                if calibrations.len() != descriptor.rank() {
                    return Err(DataError::CalibrationCountMismatch {
                        expected: descriptor.rank(),
                        actual: calibrations.len(),
                    });
                }
                calibrations
            }
            None => vec![Calibration::uncalibrated(); descriptor.rank()],
        };
        Ok(DataAndMetadata {
            payload: Deferred::ready(Some(payload)),
            descriptor: DescriptorSource::Known(descriptor),
            intensity_calibration,
            dimensional_calibrations,
            metadata,
            timestamp: Utc::now(),
        })
    }

    /// Uncalibrated value with empty metadata.
    ///
    /// The payload is not checked; a malformed color payload makes every
    /// transform of the value absent.
    pub fn from_payload(payload: Payload) -> Self {
        let rank = payload.rank();
        DataAndMetadata {
            descriptor: DescriptorSource::Known(payload.descriptor()),
            payload: Deferred::ready(Some(payload)),
            intensity_calibration: Calibration::uncalibrated(),
            dimensional_calibrations: vec![Calibration::uncalibrated(); rank],
            metadata: Metadata::new(),
            timestamp: Utc::now(),
        }
    }

    /// Deferred value with a known descriptor.
    ///
    /// Callers guarantee `dimensional_calibrations.len() == descriptor.rank()`.
    pub(crate) fn deferred<F>(
        descriptor: DataDescriptor, compute: F, intensity_calibration: Calibration,
        dimensional_calibrations: Vec<Calibration>, metadata: Metadata,
    ) -> Self
    where
        F: FnOnce() -> Option<Payload> + Send + 'static,
    {
        debug_assert_eq!(dimensional_calibrations.len(), descriptor.rank());
        DataAndMetadata {
            payload: Deferred::new(compute),
            descriptor: DescriptorSource::Known(descriptor),
            intensity_calibration,
            dimensional_calibrations,
            metadata,
            timestamp: Utc::now(),
        }
    }

    /// Deferred value whose descriptor is only known after evaluation.
    pub(crate) fn derived<F>(
        compute: F, intensity_calibration: Calibration, dimensional_calibrations: Vec<Calibration>,
        metadata: Metadata,
    ) -> Self
    where
        F: FnOnce() -> Option<Payload> + Send + 'static,
    {
        DataAndMetadata {
            payload: Deferred::new(compute),
            descriptor: DescriptorSource::Derived,
            intensity_calibration,
            dimensional_calibrations,
            metadata,
            timestamp: Utc::now(),
        }
    }

    /// Replace the capture timestamp.
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// The payload, evaluated on first access. `None` is an absent result.
    pub fn data(&self) -> Option<&Payload> {
        self.payload.get()
    }

    pub fn is_data_evaluated(&self) -> bool {
        self.payload.is_evaluated()
    }

    /// Shape and element type. Derived descriptors force evaluation and are
    /// `None` when the payload is absent.
    pub fn descriptor(&self) -> Option<DataDescriptor> {
        match &self.descriptor {
            DescriptorSource::Known(descriptor) => Some(descriptor.clone()),
            DescriptorSource::Derived => self.data().map(Payload::descriptor),
        }
    }

    pub fn data_shape(&self) -> Option<Vec<usize>> {
        self.descriptor().map(|d| d.data_shape)
    }

    pub fn data_dtype(&self) -> Option<DataType> {
        self.descriptor().map(|d| d.data_type)
    }

    pub fn rank(&self) -> Option<usize> {
        self.descriptor().map(|d| d.rank())
    }

    pub fn intensity_calibration(&self) -> &Calibration {
        &self.intensity_calibration
    }

    pub fn dimensional_calibrations(&self) -> &[Calibration] {
        &self.dimensional_calibrations
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

impl fmt::Debug for DataAndMetadata {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataAndMetadata")
            .field("descriptor", &self.descriptor)
            .field("evaluated", &self.is_data_evaluated())
            .field("intensity_calibration", &self.intensity_calibration)
            .field("dimensional_calibrations", &self.dimensional_calibrations)
            .field("timestamp", &self.timestamp)
            .finish()
    }
}

/// ScalarAndMetadata — a deferred scalar with its intensity calibration.
#[derive(Debug, Clone)]
pub struct ScalarAndMetadata {
    value: Deferred<ScalarValue>,
    intensity_calibration: Calibration,
    metadata: Metadata,
    timestamp: DateTime<Utc>,
}

impl ScalarAndMetadata {
    /// Wrap a scalar computation; it runs on the first call to `value()`.
    pub fn new<F>(compute: F, intensity_calibration: Calibration, metadata: Metadata) -> Self
    where
        F: FnOnce() -> Option<ScalarValue> + Send + 'static,
    {
        ScalarAndMetadata {
            value: Deferred::new(compute),
            intensity_calibration,
            metadata,
            timestamp: Utc::now(),
        }
    }

    /// Uncalibrated, already-computed scalar.
    pub fn from_value(value: ScalarValue) -> Self {
        ScalarAndMetadata {
            value: Deferred::ready(Some(value)),
            intensity_calibration: Calibration::uncalibrated(),
            metadata: Metadata::new(),
            timestamp: Utc::now(),
        }
    }

    pub fn value(&self) -> Option<ScalarValue> {
        self.value.get().copied()
    }

    pub fn is_value_evaluated(&self) -> bool {
        self.value.is_evaluated()
    }

    pub fn intensity_calibration(&self) -> &Calibration {
        &self.intensity_calibration
    }

    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array2, Array3, ArrayD, IxDyn};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Calibration-count and color channel validation on eager construction.
    // - Known vs derived descriptors and lazy evaluation.
    // - Scalar values.
    // -------------------------------------------------------------------------

    fn payload_3x4() -> Payload {
        Payload::from(Array2::<f64>::zeros((3, 4)).into_dyn())
    }

    #[test]
    // Purpose
    // -------
    // `new` rejects a calibration list whose length differs from the rank.
    //
    // Given
    // -----
    // - A rank-2 payload and three calibrations.
    //
    // Expect
    // ------
    // - `CalibrationCountMismatch { expected: 2, actual: 3 }`.
    fn new_checks_calibration_count() {
        let err = DataAndMetadata::new(
            payload_3x4(),
            Calibration::uncalibrated(),
            Some(vec![Calibration::uncalibrated(); 3]),
            Metadata::new(),
        )
        .unwrap_err();
        assert_eq!(err, DataError::CalibrationCountMismatch { expected: 2, actual: 3 });
    }

    #[test]
    // Purpose
    // -------
    // `new` rejects color payloads built around the checked constructors.
    //
    // Given
    // -----
    // - `Payload::Rgb` over a (4, 2) array and over a rank-0 array;
    //   `Payload::Rgba` over a (2, 2, 3) array.
    //
    // Expect
    // ------
    // - `ChannelCountMismatch { 3, 2 }`, `MissingChannelAxis` and
    //   `ChannelCountMismatch { 4, 3 }`.
    fn new_checks_color_channel_axis() {
        let build = |payload: Payload| {
            DataAndMetadata::new(payload, Calibration::uncalibrated(), None, Metadata::new())
                .unwrap_err()
        };
        assert_eq!(
            build(Payload::Rgb(Array2::<u8>::zeros((4, 2)).into_dyn())),
            DataError::ChannelCountMismatch { expected: 3, actual: 2 }
        );
        assert_eq!(
            build(Payload::Rgb(ArrayD::<u8>::zeros(IxDyn(&[])))),
            DataError::MissingChannelAxis
        );
        assert_eq!(
            build(Payload::Rgba(Array3::<u8>::zeros((2, 2, 3)).into_dyn())),
            DataError::ChannelCountMismatch { expected: 4, actual: 3 }
        );
    }

    #[test]
    fn missing_calibrations_default_to_uncalibrated() {
        let value = DataAndMetadata::new(
            payload_3x4(),
            Calibration::new(1.0, 2.0, "counts"),
            None,
            Metadata::new(),
        )
        .unwrap();
        let uncalibrated = vec![Calibration::uncalibrated(); 2];
        assert_eq!(value.dimensional_calibrations(), uncalibrated.as_slice());
        assert_eq!(value.data_shape(), Some(vec![3, 4]));
        assert_eq!(value.data_dtype(), Some(DataType::Float64));
        assert!(value.is_data_evaluated());
    }

    #[test]
    // Purpose
    // -------
    // A deferred value reports its descriptor without evaluating.
    //
    // Given
    // -----
    // - `deferred` with a (3, 4) Float64 descriptor.
    //
    // Expect
    // ------
    // - Shape readable while `is_data_evaluated()` stays false; reading
    //   `data()` flips it.
    fn deferred_descriptor_does_not_evaluate() {
        let value = DataAndMetadata::deferred(
            DataDescriptor::new(vec![3, 4], DataType::Float64),
            || Some(payload_3x4()),
            Calibration::uncalibrated(),
            vec![Calibration::uncalibrated(); 2],
            Metadata::new(),
        );
        assert_eq!(value.rank(), Some(2));
        assert!(!value.is_data_evaluated());
        assert!(value.data().is_some());
        assert!(value.is_data_evaluated());
    }

    #[test]
    fn derived_descriptor_forces_evaluation() {
        let value = DataAndMetadata::derived(
            || Some(payload_3x4()),
            Calibration::uncalibrated(),
            vec![Calibration::uncalibrated(); 2],
            Metadata::new(),
        );
        assert!(!value.is_data_evaluated());
        assert_eq!(value.data_shape(), Some(vec![3, 4]));
        assert!(value.is_data_evaluated());

        let absent = DataAndMetadata::derived(
            || None,
            Calibration::uncalibrated(),
            Vec::new(),
            Metadata::new(),
        );
        assert_eq!(absent.descriptor(), None);
    }

    #[test]
    fn scalar_value_is_deferred() {
        let scalar = ScalarAndMetadata::new(
            || Some(ScalarValue::Float(2.5)),
            Calibration::new(0.0, 1.0, "eV"),
            Metadata::new(),
        );
        assert!(!scalar.is_value_evaluated());
        assert_eq!(scalar.value(), Some(ScalarValue::Float(2.5)));
        assert_eq!(scalar.intensity_calibration().units, "eV");
    }

    #[test]
    fn values_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<DataAndMetadata>();
        assert_send_sync::<ScalarAndMetadata>();
    }
}
