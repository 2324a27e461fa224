//! Vertical motion estimator
//!
//! Caches the latest accelerometer and rotation-vector samples and, once both
//! channels have delivered, turns every new sample into one gravity-compensated
//! vertical acceleration pushed to an [`EstimateSink`].

use log::{debug, trace, warn};

use crate::error::SampleError;
use crate::math::vertical_acceleration;
use crate::rotation::rotation_matrix_from_vector;
use crate::types::{
    AccelerometerSample, EstimatorSettings, RotationVectorSample, SensorKind, SensorReading,
    VerticalAcceleration,
};

/// Consumer of vertical acceleration estimates
///
/// Called synchronously on the thread that delivered the triggering sample.
/// Implementations must not block. Any `FnMut(VerticalAcceleration)` closure is
/// a sink.
pub trait EstimateSink {
    fn accept(&mut self, estimate: VerticalAcceleration);
}

impl<F> EstimateSink for F
where
    F: FnMut(VerticalAcceleration),
{
    fn accept(&mut self, estimate: VerticalAcceleration) {
        self(estimate)
    }
}

/// Sink that drops every estimate, for callers that only use return values
#[derive(Debug, Clone, Copy, Default)]
pub struct Discard;

impl EstimateSink for Discard {
    fn accept(&mut self, _estimate: VerticalAcceleration) {}
}

/// Push-driven vertical acceleration estimator
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use vertical_accel::{AccelerometerSample, RotationVectorSample, VerticalEstimator};
///
/// let mut values = Vec::new();
/// let mut estimator = VerticalEstimator::new(|estimate: vertical_accel::VerticalAcceleration| {
///     values.push(estimate.value)
/// });
///
/// // Not primed yet: nothing is emitted
/// assert!(estimator
///     .ingest_accelerometer(AccelerometerSample::new(Vector3::new(0.0, 0.0, 9.81)))
///     .is_none());
///
/// let estimate = estimator
///     .ingest_rotation_vector(RotationVectorSample::identity())
///     .unwrap();
/// assert!(estimate.value.abs() < 1e-4);
/// ```
pub struct VerticalEstimator<S> {
    /// Estimator settings
    settings: EstimatorSettings,
    /// Latest accelerometer sample, last write wins
    accelerometer: Option<AccelerometerSample>,
    /// Latest rotation-vector sample, last write wins
    rotation_vector: Option<RotationVectorSample>,
    /// Receiver of every emitted estimate
    sink: S,
}

impl VerticalEstimator<Discard> {
    /// Estimator whose results are only available as return values
    pub fn detached() -> Self {
        Self::new(Discard)
    }
}

impl<S: EstimateSink> VerticalEstimator<S> {
    /// Create an estimator with default settings
    pub fn new(sink: S) -> Self {
        Self::with_settings(EstimatorSettings::default(), sink)
    }

    pub fn with_settings(settings: EstimatorSettings, sink: S) -> Self {
        Self {
            settings,
            accelerometer: None,
            rotation_vector: None,
            sink,
        }
    }

    /// Store an accelerometer sample and emit an estimate if primed
    pub fn ingest_accelerometer(
        &mut self,
        sample: AccelerometerSample,
    ) -> Option<VerticalAcceleration> {
        let was_primed = self.is_primed();
        self.accelerometer = Some(sample);
        self.emit(was_primed, sample.timestamp())
    }

    /// Store a rotation-vector sample and emit an estimate if primed
    pub fn ingest_rotation_vector(
        &mut self,
        sample: RotationVectorSample,
    ) -> Option<VerticalAcceleration> {
        let was_primed = self.is_primed();
        self.rotation_vector = Some(sample);
        self.emit(was_primed, sample.timestamp())
    }

    /// Dispatch a sensor event to the matching channel
    pub fn ingest(&mut self, reading: SensorReading) -> Option<VerticalAcceleration> {
        match reading {
            SensorReading::Accelerometer(sample) => self.ingest_accelerometer(sample),
            SensorReading::RotationVector(sample) => self.ingest_rotation_vector(sample),
        }
    }

    /// Validate a raw platform value array and ingest it
    ///
    /// A malformed array is refused and logged; the cached sample of that
    /// channel stays in effect and nothing is emitted.
    pub fn ingest_raw(
        &mut self,
        kind: SensorKind,
        values: &[f32],
        timestamp: Option<u64>,
    ) -> Result<Option<VerticalAcceleration>, SampleError> {
        let reading = parse_reading(kind, values, self.settings.rotation_tolerance)
            .inspect_err(|err| warn!("skipping {kind} sample: {err}"))?;

        let reading = match (reading, timestamp) {
            (SensorReading::Accelerometer(sample), Some(ts)) => sample.with_timestamp(ts).into(),
            (SensorReading::RotationVector(sample), Some(ts)) => sample.with_timestamp(ts).into(),
            (reading, None) => reading,
        };

        Ok(self.ingest(reading))
    }

    /// Whether both channels have delivered at least one sample
    pub fn is_primed(&self) -> bool {
        self.accelerometer.is_some() && self.rotation_vector.is_some()
    }

    pub fn latest_accelerometer(&self) -> Option<AccelerometerSample> {
        self.accelerometer
    }

    pub fn latest_rotation_vector(&self) -> Option<RotationVectorSample> {
        self.rotation_vector
    }

    /// Compute the estimate for the cached samples without emitting it
    pub fn current(&self) -> Option<f32> {
        let accelerometer = self.accelerometer.as_ref()?;
        let rotation_vector = self.rotation_vector.as_ref()?;

        let rotation = rotation_matrix_from_vector(rotation_vector);
        Some(vertical_acceleration(
            &accelerometer.values(),
            &rotation,
            self.settings.gravity,
        ))
    }

    /// Discard both cached samples; the estimator must be primed again
    pub fn reset(&mut self) {
        debug!("resetting vertical estimator");
        self.accelerometer = None;
        self.rotation_vector = None;
    }

    pub fn settings(&self) -> EstimatorSettings {
        self.settings
    }

    /// Replace the settings, keeping the cached samples
    pub fn set_settings(&mut self, settings: EstimatorSettings) {
        self.settings = settings;
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    fn emit(&mut self, was_primed: bool, timestamp: Option<u64>) -> Option<VerticalAcceleration> {
        let value = self.current()?;
        if !was_primed {
            debug!("vertical estimator primed");
        }

        let estimate = VerticalAcceleration { value, timestamp };
        trace!("vertical acceleration {value:.4} m/s²");
        self.sink.accept(estimate);
        Some(estimate)
    }
}

impl Default for VerticalEstimator<Discard> {
    fn default() -> Self {
        Self::detached()
    }
}

fn parse_reading(
    kind: SensorKind,
    values: &[f32],
    rotation_tolerance: f32,
) -> Result<SensorReading, SampleError> {
    Ok(match kind {
        SensorKind::Accelerometer => AccelerometerSample::from_values(values)?.into(),
        SensorKind::RotationVector => {
            RotationVectorSample::from_values(values, rotation_tolerance)?.into()
        }
    })
}
