//! Vertical acceleration from accelerometer and rotation-vector sensor streams
//!
//! This library turns two independently arriving sensor streams into a single
//! signal: acceleration along the Earth's vertical axis with gravity removed.
//! The latest rotation-vector sample is expanded into a device-to-Earth
//! rotation matrix, the latest accelerometer reading is rotated into the Earth
//! frame, and a fixed 9.81 m/s² is subtracted from its vertical component.
//!
//! # Features
//!
//! - Push-driven: every sensor event yields at most one estimate, and none
//!   until both channels have delivered
//! - Last-write-wins caching per channel, no buffering
//! - Validation of raw platform value arrays at the intake boundary
//! - Observer-style output through [`EstimateSink`], closures included
//! - [`SharedEstimator`] for hosts delivering channels from several threads
//!
//! # Quick Start
//!
//! ```rust
//! use nalgebra::Vector3;
//! use vertical_accel::{
//!     AccelerometerSample, RollingSeries, RotationVectorSample, VerticalEstimator,
//! };
//!
//! let mut estimator = VerticalEstimator::new(RollingSeries::default());
//!
//! // Sensor readings
//! let rotation = RotationVectorSample::identity();               // device level
//! let accelerometer = Vector3::new(1.0, 2.0, 11.81);             // m/s²
//!
//! estimator.ingest_rotation_vector(rotation);
//! let estimate = estimator
//!     .ingest_accelerometer(AccelerometerSample::new(accelerometer))
//!     .unwrap();
//!
//! assert!((estimate.value - 2.0).abs() < 1e-4);
//! assert_eq!(estimator.sink().len(), 1);
//! ```

mod error;
mod estimator;
mod math;
mod rotation;
pub mod series;
mod shared;
mod types;

// Re-export all public types and functions
pub use error::SampleError;
pub use estimator::{Discard, EstimateSink, VerticalEstimator};
pub use math::{GRAVITY, earth_frame, vertical_acceleration};
pub use rotation::{ORTHONORMAL_TOLERANCE, RotationMatrix, rotation_matrix_from_vector};
pub use series::RollingSeries;
pub use shared::SharedEstimator;
pub use types::*;
