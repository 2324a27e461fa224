//! Frame transform and gravity compensation

use nalgebra::Vector3;

use crate::rotation::RotationMatrix;

/// Standard gravity subtracted from the vertical component, in m/s²
pub const GRAVITY: f32 = 9.81;

/// Rotate a device-frame vector into the Earth frame
///
/// Computes `w[i] = Σ a[j] * R[(i + j) + 2 * i]` over the row-major matrix.
/// The offset `(i + j) + 2 * i` equals `3 * i + j`, i.e. row `i`, column `j`,
/// so the result is the product `R · a`.
///
/// # Example
/// ```
/// use nalgebra::Vector3;
/// use vertical_accel::{RotationMatrix, earth_frame};
///
/// let a = Vector3::new(1.0, 2.0, 3.0);
/// assert_eq!(earth_frame(&a, &RotationMatrix::identity()), a);
/// ```
pub fn earth_frame(accelerometer: &Vector3<f32>, rotation: &RotationMatrix) -> Vector3<f32> {
    let r = rotation.as_array();
    let mut world = Vector3::zeros();
    for i in 0..3 {
        let mut sum = 0.0;
        for j in 0..3 {
            sum += accelerometer[j] * r[(i + j) + 2 * i];
        }
        world[i] = sum;
    }
    world
}

/// Earth-frame vertical acceleration with `gravity` removed
///
/// Takes the Z component of [`earth_frame`] and subtracts a constant bias.
/// No temporal filtering is applied.
pub fn vertical_acceleration(
    accelerometer: &Vector3<f32>,
    rotation: &RotationMatrix,
    gravity: f32,
) -> f32 {
    earth_frame(accelerometer, rotation).z - gravity
}
