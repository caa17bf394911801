//! transforms::generic — escape hatches and small value helpers.
//!
//! Purpose
//! -------
//! Let callers run payload functions the catalog does not name while keeping
//! the calibration contract, and provide the element-level helpers used
//! alongside the catalog: distribution evaluation, element reads, shape
//! queries and element type casts.
//!
//! Key behaviors
//! -------------
//! - [`array_function`] defers an arbitrary payload → payload function and
//!   passes every calibration and the metadata through; its descriptor is
//!   only known once the function has run.
//! - [`scalar_function`] defers a payload → scalar reduction into a
//!   [`ScalarAndMetadata`].
//! - [`apply_distribution`] evaluates a `statrs` location/scale distribution
//!   element-wise into a fresh, uncalibrated value.
//!
//! Invariants & assumptions
//! ------------------------
//! - A function given to [`array_function`] that changes the rank breaks
//!   the calibration count; keeping the shape is the caller's contract.
use crate::{
    data::{
        validation::{reject, valid_descriptor, valid_payload},
        Calibration, DataAndMetadata, DataDescriptor, DataType, Metadata, Payload,
        ScalarAndMetadata, ScalarValue,
    },
    transforms::options::{Distribution, DistributionFn},
};
use ndarray::IxDyn;
use statrs::distribution::{Cauchy, Continuous, ContinuousCDF, Laplace, Normal};

// ---- Adapters ----

/// Apply `f` to the payload of `source`, lazily.
///
/// Calibrations, intensity calibration and metadata pass through unchanged.
/// The result is absent when the source payload is absent or `f` returns
/// `None`.
pub fn array_function<F>(source: &DataAndMetadata, f: F) -> DataAndMetadata
where
    F: FnOnce(&Payload) -> Option<Payload> + Send + 'static,
{
    let src = source.clone();
    DataAndMetadata::derived(
        move || f(src.data()?),
        source.intensity_calibration().clone(),
        source.dimensional_calibrations().to_vec(),
        source.metadata().clone(),
    )
}

/// Reduce the payload of `source` to one scalar, lazily; intensity
/// calibration and metadata pass through.
pub fn scalar_function<F>(source: &DataAndMetadata, f: F) -> ScalarAndMetadata
where
    F: FnOnce(&Payload) -> Option<ScalarValue> + Send + 'static,
{
    let src = source.clone();
    ScalarAndMetadata::new(
        move || f(src.data()?),
        source.intensity_calibration().clone(),
        source.metadata().clone(),
    )
}

// ---- Distributions ----

enum LocationScale {
    Normal(Normal),
    Cauchy(Cauchy),
    Laplace(Laplace),
}

fn evaluate<D>(dist: &D, function: DistributionFn, x: f64) -> f64
where
    D: Continuous<f64, f64> + ContinuousCDF<f64, f64>,
{
    match function {
        DistributionFn::Pdf => dist.pdf(x),
        DistributionFn::LnPdf => dist.ln_pdf(x),
        DistributionFn::Cdf => dist.cdf(x),
    }
}

impl LocationScale {
    fn new(family: Distribution, location: f64, scale: f64) -> Option<Self> {
        match family {
            Distribution::Normal => Normal::new(location, scale).ok().map(LocationScale::Normal),
            Distribution::Cauchy => Cauchy::new(location, scale).ok().map(LocationScale::Cauchy),
            Distribution::Laplace => {
                Laplace::new(location, scale).ok().map(LocationScale::Laplace)
            }
        }
    }

    fn evaluate(&self, function: DistributionFn, x: f64) -> f64 {
        match self {
            LocationScale::Normal(d) => evaluate(d, function, x),
            LocationScale::Cauchy(d) => evaluate(d, function, x),
            LocationScale::Laplace(d) => evaluate(d, function, x),
        }
    }
}

/// Evaluate a distribution function element-wise.
///
/// Parameters
/// ----------
/// - `source`: real numeric value; its elements are the evaluation points.
/// - `mean`, `stddev`: `f64`
///   Location and scale of the distribution; `stddev` must be positive and
///   finite.
/// - `family`: [`Distribution`]
/// - `function`: [`DistributionFn`]
///
/// Returns
/// -------
/// Uncalibrated `Float64` value of the source shape with empty metadata;
/// `None` for invalid parameters or non-real data.
///
/// Examples
/// --------
/// ```rust
/// # use calibrated_data::prelude::*;
/// # use calibrated_data::transforms::generic::apply_distribution;
/// # use calibrated_data::transforms::options::{Distribution, DistributionFn};
/// let x = DataAndMetadata::from_payload(Payload::from(ndarray::array![0.0, 1.0].into_dyn()));
/// let cdf =
///     apply_distribution(&x, 0.0, 1.0, Distribution::Normal, DistributionFn::Cdf).unwrap();
/// let values = cdf.data().and_then(Payload::to_real_f64).unwrap();
/// assert!((values[[0]] - 0.5).abs() < 1e-12);
/// ```
pub fn apply_distribution(
    source: &DataAndMetadata, mean: f64, stddev: f64, family: Distribution,
    function: DistributionFn,
) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor(source, "apply_distribution")?;
    if !descriptor.data_type.is_real() {
        return reject("apply_distribution", format_args!("{:?} is not real", descriptor.data_type));
    }
    if !(stddev.is_finite() && stddev > 0.0) {
        return reject("apply_distribution", format_args!("scale {stddev} is not positive"));
    }
    let Some(dist) = LocationScale::new(family, mean, stddev) else {
        return reject("apply_distribution", format_args!("{family:?}({mean}, {stddev})"));
    };
    let rank = descriptor.rank();
    let src = source.clone();
    Some(DataAndMetadata::deferred(
        DataDescriptor::new(descriptor.data_shape, DataType::Float64),
        move || {
            let values = valid_payload(&src, "apply_distribution")?.as_numeric()?.to_f64()?;
            Some(Payload::from(values.mapv(|x| dist.evaluate(function, x))))
        },
        Calibration::uncalibrated(),
        vec![Calibration::uncalibrated(); rank],
        Metadata::new(),
    ))
}

// ---- Element helpers ----

/// Read one element; color payloads are indexed including the channel axis
/// and read as `Unsigned`.
pub fn take_item(source: &DataAndMetadata, index: &[usize]) -> Option<ScalarValue> {
    match source.data()? {
        Payload::Numeric(data) => data.get(index),
        Payload::Rgb(a) | Payload::Rgba(a) => a.get(IxDyn(index)).map(|&v| ScalarValue::from(v)),
    }
}

/// Shape of the data axes of `source`.
pub fn data_shape(source: &DataAndMetadata) -> Option<Vec<usize>> {
    source.data_shape()
}

/// Cast numeric data to `dtype` (saturating for integers, real part for
/// complex → real); calibrations and metadata pass through. `None` for
/// color sources or color targets.
pub fn astype(source: &DataAndMetadata, dtype: DataType) -> Option<DataAndMetadata> {
    let descriptor = valid_descriptor(source, "astype")?;
    if descriptor.data_type.is_color() || dtype.is_color() {
        return reject(
            "astype",
            format_args!("cannot cast {:?} to {dtype:?}", descriptor.data_type),
        );
    }
    let src = source.clone();
    Some(DataAndMetadata::deferred(
        DataDescriptor::new(descriptor.data_shape, dtype),
        move || {
            let data = valid_payload(&src, "astype")?.as_numeric()?;
            data.cast(dtype).map(Payload::Numeric)
        },
        source.intensity_calibration().clone(),
        source.dimensional_calibrations().to_vec(),
        source.metadata().clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::ArrayData;
    use approx::assert_relative_eq;
    use ndarray::{array, Array3};
    use std::f64::consts::PI;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Calibration pass-through of the array and scalar adapters.
    // - Distribution values for each family and the parameter guard.
    // - Element reads, shape queries and casts.
    // -------------------------------------------------------------------------

    fn calibrated() -> DataAndMetadata {
        let mut metadata = Metadata::new();
        metadata.insert("site".into(), "B".into());
        DataAndMetadata::new(
            Payload::from(array![[1.0, -2.0], [3.5, 4.0]].into_dyn()),
            Calibration::new(0.0, 2.0, "counts"),
            Some(vec![Calibration::new(0.0, 0.1, "nm"), Calibration::new(0.0, 0.2, "nm")]),
            metadata,
        )
        .unwrap()
    }

    #[test]
    // Purpose
    // -------
    // The array adapter runs lazily and keeps every calibration.
    //
    // Given
    // -----
    // - A calibrated 2×2 value and a doubling function.
    //
    // Expect
    // ------
    // - Not evaluated until read; then doubled data with the source
    //   calibrations, intensity and metadata.
    fn array_function_passes_calibrations() {
        let source = calibrated();
        let doubled = array_function(&source, |payload| {
            payload.as_numeric()?.map_linear(|a| a * 2.0).map(Payload::Numeric)
        });
        assert!(!doubled.is_data_evaluated());
        assert_eq!(doubled.data_shape(), Some(vec![2, 2]));
        assert_eq!(doubled.dimensional_calibrations(), source.dimensional_calibrations());
        assert_eq!(doubled.intensity_calibration(), source.intensity_calibration());
        assert_eq!(doubled.metadata(), source.metadata());
        let values = doubled.data().and_then(Payload::to_real_f64).unwrap();
        assert_relative_eq!(values[[1, 0]], 7.0);
    }

    #[test]
    fn scalar_function_defers_reduction() {
        let source = calibrated();
        let total = scalar_function(&source, |payload| {
            Some(ScalarValue::from(payload.to_real_f64()?.sum()))
        });
        assert!(!total.is_value_evaluated());
        assert_eq!(total.value(), Some(ScalarValue::Float(6.5)));
        assert_eq!(total.intensity_calibration(), source.intensity_calibration());
    }

    #[test]
    // Purpose
    // -------
    // Each family evaluates its textbook density at the location.
    //
    // Given
    // -----
    // - Evaluation point 0 with location 0 and scale 1.
    //
    // Expect
    // ------
    // - Normal pdf `1/√(2π)`, Cauchy pdf `1/π`, Laplace ln-pdf `ln(1/2)`;
    //   the output is uncalibrated with empty metadata.
    fn distributions_at_location() {
        let zero = DataAndMetadata::new(
            Payload::from(array![0.0].into_dyn()),
            Calibration::new(0.0, 3.0, "x"),
            None,
            calibrated().metadata().clone(),
        )
        .unwrap();
        let at = |family, function| {
            let out = apply_distribution(&zero, 0.0, 1.0, family, function).unwrap();
            assert!(out.metadata().is_empty());
            assert!(!out.intensity_calibration().is_calibrated());
            out.data().and_then(Payload::to_real_f64).unwrap()[[0]]
        };
        assert_relative_eq!(
            at(Distribution::Normal, DistributionFn::Pdf),
            1.0 / (2.0 * PI).sqrt(),
            epsilon = 1e-12
        );
        let cauchy = at(Distribution::Cauchy, DistributionFn::Pdf);
        assert_relative_eq!(cauchy, 1.0 / PI, epsilon = 1e-12);
        assert_relative_eq!(
            at(Distribution::Laplace, DistributionFn::LnPdf),
            0.5_f64.ln(),
            epsilon = 1e-12
        );
        assert_relative_eq!(at(Distribution::Cauchy, DistributionFn::Cdf), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn distribution_guards() {
        let source = calibrated();
        assert!(
            apply_distribution(&source, 0.0, 0.0, Distribution::Normal, DistributionFn::Pdf)
                .is_none()
        );
        assert!(
            apply_distribution(&source, 0.0, f64::NAN, Distribution::Laplace, DistributionFn::Cdf)
                .is_none()
        );
    }

    #[test]
    fn element_reads_and_shapes() {
        let source = calibrated();
        assert_eq!(take_item(&source, &[0, 1]), Some(ScalarValue::Float(-2.0)));
        assert_eq!(take_item(&source, &[2, 0]), None);
        assert_eq!(data_shape(&source), Some(vec![2, 2]));

        let mut arr = Array3::<u8>::zeros((1, 2, 3));
        arr[[0, 1, 2]] = 77;
        let color = DataAndMetadata::from_payload(Payload::rgb(arr.into_dyn()).unwrap());
        assert_eq!(take_item(&color, &[0, 1, 2]), Some(ScalarValue::Unsigned(77)));
        assert_eq!(data_shape(&color), Some(vec![1, 2]));
    }

    #[test]
    // Purpose
    // -------
    // Casting keeps calibrations and truncates toward zero.
    //
    // Given
    // -----
    // - The calibrated f64 value `[[1, -2], [3.5, 4]]` cast to Int16.
    //
    // Expect
    // ------
    // - `[[1, -2], [3, 4]]` as Int16 with unchanged calibrations.
    fn astype_casts_and_keeps_calibrations() {
        let source = calibrated();
        let out = astype(&source, DataType::Int16).unwrap();
        assert_eq!(out.data_dtype(), Some(DataType::Int16));
        assert_eq!(out.dimensional_calibrations(), source.dimensional_calibrations());
        assert_eq!(
            out.data().and_then(Payload::as_numeric),
            Some(&ArrayData::Int16(array![[1i16, -2], [3, 4]].into_dyn()))
        );
        assert!(astype(&source, DataType::Rgb).is_none());
    }
}
