//! Error types for sample validation

use thiserror::Error;

use crate::types::SensorKind;

/// Reasons a raw sensor reading is refused at the intake boundary.
///
/// A refused sample never reaches the estimator state, so the previously
/// cached sample of that channel stays in effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SampleError {
    /// The reading has the wrong number of components for its sensor kind.
    #[error("{kind} sample has {actual} components, expected {expected}")]
    InvalidLength {
        kind: SensorKind,
        expected: &'static str,
        actual: usize,
    },
    /// A component is NaN or infinite.
    #[error("{kind} sample component {index} is not finite")]
    NonFinite { kind: SensorKind, index: usize },
    /// The rotation vector does not describe a unit quaternion.
    #[error("rotation vector is degenerate (squared norm {norm_squared})")]
    DegenerateRotation { norm_squared: f32 },
}
