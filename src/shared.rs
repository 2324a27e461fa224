//! Thread-safe handle for hosts that deliver sensor channels from several threads

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::SampleError;
use crate::estimator::{EstimateSink, VerticalEstimator};
use crate::types::{
    AccelerometerSample, RotationVectorSample, SensorKind, SensorReading, VerticalAcceleration,
};

/// Cloneable, lock-protected [`VerticalEstimator`]
///
/// Every ingest stores the sample, computes and emits under one lock, so an
/// estimate never mixes a sample with a half-updated other channel. The sink
/// runs while the lock is held and must not call back into the handle.
///
/// # Example
/// ```
/// use std::thread;
/// use nalgebra::Vector3;
/// use vertical_accel::{
///     AccelerometerSample, RotationVectorSample, SharedEstimator, VerticalEstimator,
/// };
///
/// let shared = SharedEstimator::new(VerticalEstimator::detached());
/// let rotation = shared.clone();
/// thread::spawn(move || rotation.ingest_rotation_vector(RotationVectorSample::identity()))
///     .join()
///     .unwrap();
///
/// let estimate = shared
///     .ingest_accelerometer(AccelerometerSample::new(Vector3::new(0.0, 0.0, 9.81)))
///     .unwrap();
/// assert!(estimate.value.abs() < 1e-4);
/// ```
pub struct SharedEstimator<S> {
    inner: Arc<Mutex<VerticalEstimator<S>>>,
}

impl<S> Clone for SharedEstimator<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: EstimateSink> SharedEstimator<S> {
    pub fn new(estimator: VerticalEstimator<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(estimator)),
        }
    }

    pub fn ingest_accelerometer(&self, sample: AccelerometerSample) -> Option<VerticalAcceleration> {
        self.lock().ingest_accelerometer(sample)
    }

    pub fn ingest_rotation_vector(
        &self,
        sample: RotationVectorSample,
    ) -> Option<VerticalAcceleration> {
        self.lock().ingest_rotation_vector(sample)
    }

    pub fn ingest(&self, reading: SensorReading) -> Option<VerticalAcceleration> {
        self.lock().ingest(reading)
    }

    pub fn ingest_raw(
        &self,
        kind: SensorKind,
        values: &[f32],
        timestamp: Option<u64>,
    ) -> Result<Option<VerticalAcceleration>, SampleError> {
        self.lock().ingest_raw(kind, values, timestamp)
    }

    pub fn is_primed(&self) -> bool {
        self.lock().is_primed()
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    /// Run `f` with exclusive access to the estimator
    pub fn with<R>(&self, f: impl FnOnce(&mut VerticalEstimator<S>) -> R) -> R {
        f(&mut *self.lock())
    }

    // The state is two plain samples, so a panic in a sink leaves nothing
    // half-written worth refusing.
    fn lock(&self) -> MutexGuard<'_, VerticalEstimator<S>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
