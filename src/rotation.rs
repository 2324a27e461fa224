//! Rotation matrix derivation from rotation-vector samples

use nalgebra::Matrix3;

use crate::types::RotationVectorSample;

/// Default tolerance for [`RotationMatrix::is_orthonormal`]
pub const ORTHONORMAL_TOLERANCE: f32 = 1e-5;

/// 3x3 device-to-Earth rotation matrix
///
/// Stored row-major as nine values, `R[r * 3 + c]` is row `r`, column `c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationMatrix([f32; 9]);

impl RotationMatrix {
    pub fn identity() -> Self {
        Self([
            1.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, //
            0.0, 0.0, 1.0,
        ])
    }

    pub fn from_row_major(values: [f32; 9]) -> Self {
        Self(values)
    }

    pub fn as_array(&self) -> &[f32; 9] {
        &self.0
    }

    /// Element at row `row`, column `column`
    pub fn get(&self, row: usize, column: usize) -> f32 {
        self.0[row * 3 + column]
    }

    pub fn to_matrix3(&self) -> Matrix3<f32> {
        Matrix3::from_row_slice(&self.0)
    }

    /// Whether `R · Rᵗ` is the identity within `tolerance`
    pub fn is_orthonormal(&self, tolerance: f32) -> bool {
        let m = self.to_matrix3();
        let deviation = m * m.transpose() - Matrix3::identity();
        deviation.iter().all(|v| v.abs() <= tolerance)
    }
}

impl From<&RotationVectorSample> for RotationMatrix {
    fn from(sample: &RotationVectorSample) -> Self {
        rotation_matrix_from_vector(sample)
    }
}

/// Derive the device-to-Earth rotation matrix from a rotation vector
///
/// Uses the quaternion expansion of the platform sensor service, so the
/// result matches what the host would obtain from its own sensor API.
///
/// # Example
/// ```
/// use vertical_accel::{RotationVectorSample, RotationMatrix, rotation_matrix_from_vector};
///
/// let matrix = rotation_matrix_from_vector(&RotationVectorSample::identity());
/// assert_eq!(matrix, RotationMatrix::identity());
/// ```
pub fn rotation_matrix_from_vector(sample: &RotationVectorSample) -> RotationMatrix {
    let (q0, q1, q2, q3) = (sample.w(), sample.x(), sample.y(), sample.z());

    let sq_q1 = 2.0 * q1 * q1;
    let sq_q2 = 2.0 * q2 * q2;
    let sq_q3 = 2.0 * q3 * q3;
    let q1_q2 = 2.0 * q1 * q2;
    let q3_q0 = 2.0 * q3 * q0;
    let q1_q3 = 2.0 * q1 * q3;
    let q2_q0 = 2.0 * q2 * q0;
    let q2_q3 = 2.0 * q2 * q3;
    let q1_q0 = 2.0 * q1 * q0;

    RotationMatrix([
        1.0 - sq_q2 - sq_q3,
        q1_q2 - q3_q0,
        q1_q3 + q2_q0,
        q1_q2 + q3_q0,
        1.0 - sq_q1 - sq_q3,
        q2_q3 - q1_q0,
        q1_q3 - q2_q0,
        q2_q3 + q1_q0,
        1.0 - sq_q1 - sq_q2,
    ])
}
