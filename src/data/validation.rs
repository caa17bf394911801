//! data::validation — shape/dtype validity and transform entry guards.
//!
//! Purpose
//! -------
//! Centralize the validity predicate every transform applies to its source
//! before doing any work, and the small guard helpers that turn a failed
//! check into an absent result plus a `log::debug!` record.
//!
//! Invariants & assumptions
//! ------------------------
//! - A shape is valid when it has at least one axis and every extent is
//!   non-zero. Every [`DataType`] variant is a supported element type.
//! - A color payload is valid only with a trailing channel axis of length 3
//!   (RGB) or 4 (RGBA) after at least one data axis. Guards check payloads
//!   that are already evaluated; deferred payloads are checked when read.
//! - Guards never panic; they only return `None`.
use crate::data::{
    data_and_metadata::DataAndMetadata,
    dtype::{DataDescriptor, DataType},
    payload::Payload,
};
use std::fmt::Display;

/// Shape/dtype validity predicate: rank ≥ 1 and every extent > 0.
pub fn is_shape_and_dtype_valid(shape: &[usize], _dtype: DataType) -> bool {
    !shape.is_empty() && shape.iter().all(|&n| n > 0)
}

/// Validity predicate applied to a concrete payload: a well-formed channel
/// axis for color data, then the shape/dtype predicate on the data axes.
pub fn is_payload_valid(payload: &Payload) -> bool {
    payload.check().is_ok() && is_shape_and_dtype_valid(&payload.data_shape(), payload.data_type())
}

/// Log why `entry` cannot run and return an absent result.
pub(crate) fn reject<T>(entry: &str, reason: impl Display) -> Option<T> {
    log::debug!("{entry}: {reason}; returning absent result");
    None
}

/// Source descriptor if it is valid and matches the calibration count.
pub(crate) fn valid_descriptor(source: &DataAndMetadata, entry: &str) -> Option<DataDescriptor> {
    let Some(descriptor) = source.descriptor() else {
        return reject(entry, "source payload is absent");
    };
    if !is_shape_and_dtype_valid(&descriptor.data_shape, descriptor.data_type) {
        return reject(entry, format_args!("invalid source shape {:?}", descriptor.data_shape));
    }
    if source.is_data_evaluated() {
        if let Some(Err(err)) = source.data().map(Payload::check) {
            return reject(entry, err);
        }
    }
    if source.dimensional_calibrations().len() != descriptor.rank() {
        return reject(
            entry,
            format_args!(
                "{} dimensional calibrations for rank {}",
                source.dimensional_calibrations().len(),
                descriptor.rank()
            ),
        );
    }
    Some(descriptor)
}

/// Source descriptor, additionally requiring an exact rank.
pub(crate) fn valid_descriptor_with_rank(
    source: &DataAndMetadata, entry: &str, rank: usize,
) -> Option<DataDescriptor> {
    let descriptor = valid_descriptor(source, entry)?;
    if descriptor.rank() != rank {
        return reject(entry, format_args!("expected rank {rank}, got {}", descriptor.rank()));
    }
    Some(descriptor)
}

/// Evaluated source payload if present and valid. Used inside thunks.
pub(crate) fn valid_payload<'a>(source: &'a DataAndMetadata, entry: &str) -> Option<&'a Payload> {
    match source.data() {
        Some(payload) if is_payload_valid(payload) => Some(payload),
        Some(_) => reject(entry, "invalid source payload"),
        None => reject(entry, "source payload is absent"),
    }
}
