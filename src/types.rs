//! Core types and settings for the vertical acceleration estimator

use core::fmt;
use core::time::Duration;

use nalgebra::{UnitQuaternion, Vector3};

use crate::error::SampleError;
use crate::math::GRAVITY;

/// Sensor channel feeding the estimator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorKind {
    /// Raw accelerometer, device frame, gravity included
    Accelerometer,
    /// Rotation vector relative to the Earth frame
    RotationVector,
}

impl fmt::Display for SensorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensorKind::Accelerometer => f.write_str("accelerometer"),
            SensorKind::RotationVector => f.write_str("rotation vector"),
        }
    }
}

/// Sensor delivery rate hint
///
/// Names the delivery rates a host can request from the platform sensor
/// service. The estimator is push-driven and never waits on this value; it is
/// carried in [`EstimatorSettings`] so the host registers its listeners with a
/// single source of truth.
///
/// # Example
/// ```
/// use core::time::Duration;
/// use vertical_accel::SensorDelay;
///
/// assert_eq!(SensorDelay::Game.sampling_period(), Duration::from_millis(20));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SensorDelay {
    /// As fast as the hardware delivers
    Fastest,
    /// Rate suitable for games (about 50 Hz)
    #[default]
    Game,
    /// Rate suitable for the user interface (about 15 Hz)
    Ui,
    /// Rate suitable for screen orientation changes (about 5 Hz)
    Normal,
}

impl SensorDelay {
    /// Nominal period between two samples of one channel
    pub fn sampling_period(&self) -> Duration {
        match self {
            SensorDelay::Fastest => Duration::ZERO,
            SensorDelay::Game => Duration::from_micros(20_000),
            SensorDelay::Ui => Duration::from_micros(66_667),
            SensorDelay::Normal => Duration::from_micros(200_000),
        }
    }
}

/// Estimator settings
///
/// # Example
/// ```
/// use vertical_accel::{EstimatorSettings, SensorDelay};
///
/// let settings = EstimatorSettings {
///     sensor_delay: SensorDelay::Fastest,
///     ..Default::default()
/// };
/// assert_eq!(settings.gravity, 9.81);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EstimatorSettings {
    /// Gravity subtracted from the vertical component, in m/s²
    ///
    /// A fixed constant, not the locally measured gravity. No filtering is
    /// applied to it.
    pub gravity: f32,
    /// Allowed deviation of the rotation quaternion's squared norm from 1
    ///
    /// Raw rotation vectors outside this tolerance are refused with
    /// [`SampleError::DegenerateRotation`].
    pub rotation_tolerance: f32,
    /// Delivery rate the host should request for both channels
    pub sensor_delay: SensorDelay,
}

impl Default for EstimatorSettings {
    fn default() -> Self {
        Self {
            gravity: GRAVITY,
            rotation_tolerance: 1e-2,
            sensor_delay: SensorDelay::default(),
        }
    }
}

/// Accelerometer reading in the device frame, in m/s², gravity included
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccelerometerSample {
    values: Vector3<f32>,
    timestamp: Option<u64>,
}

impl AccelerometerSample {
    pub fn new(values: Vector3<f32>) -> Self {
        Self {
            values,
            timestamp: None,
        }
    }

    /// Build a sample from a raw platform value array
    ///
    /// The array must hold exactly three finite values.
    ///
    /// # Example
    /// ```
    /// use vertical_accel::AccelerometerSample;
    ///
    /// assert!(AccelerometerSample::from_values(&[0.0, 0.0, 9.81]).is_ok());
    /// assert!(AccelerometerSample::from_values(&[0.0, 9.81]).is_err());
    /// ```
    pub fn from_values(values: &[f32]) -> Result<Self, SampleError> {
        let kind = SensorKind::Accelerometer;
        let [x, y, z] = values else {
            return Err(SampleError::InvalidLength {
                kind,
                expected: "3",
                actual: values.len(),
            });
        };
        check_finite(kind, values)?;
        Ok(Self::new(Vector3::new(*x, *y, *z)))
    }

    /// Attach the platform event time in nanoseconds
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn values(&self) -> Vector3<f32> {
        self.values
    }

    /// Magnitude of the reading in m/s²
    pub fn magnitude(&self) -> f32 {
        self.values.magnitude()
    }

    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }
}

/// Rotation vector reading
///
/// Holds the unit quaternion `(w, x, y, z)` describing the device orientation
/// relative to the Earth frame. Platform rotation vectors deliver the vector
/// part `(x, y, z)` and usually the scalar part `w`; a fifth heading-accuracy
/// value may follow and is ignored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationVectorSample {
    x: f32,
    y: f32,
    z: f32,
    w: f32,
    timestamp: Option<u64>,
}

impl RotationVectorSample {
    /// Orientation aligned with the Earth frame
    pub fn identity() -> Self {
        Self::from_quaternion(UnitQuaternion::identity())
    }

    pub fn from_quaternion(quaternion: UnitQuaternion<f32>) -> Self {
        Self {
            x: quaternion.i,
            y: quaternion.j,
            z: quaternion.k,
            w: quaternion.w,
            timestamp: None,
        }
    }

    /// Build a sample from a raw platform value array
    ///
    /// Accepts `[x, y, z]`, `[x, y, z, w]` or `[x, y, z, w, accuracy]`. When `w`
    /// is absent it is recovered as `sqrt(1 - x² - y² - z²)`, clamped at zero.
    /// `tolerance` bounds how far the squared norm may stray from 1.
    ///
    /// # Example
    /// ```
    /// use vertical_accel::RotationVectorSample;
    ///
    /// let half = core::f32::consts::FRAC_1_SQRT_2;
    /// let short = RotationVectorSample::from_values(&[half, 0.0, 0.0], 1e-2).unwrap();
    /// let full = RotationVectorSample::from_values(&[half, 0.0, 0.0, half], 1e-2).unwrap();
    /// assert!((short.w() - full.w()).abs() < 1e-6);
    /// ```
    pub fn from_values(values: &[f32], tolerance: f32) -> Result<Self, SampleError> {
        let kind = SensorKind::RotationVector;
        if !(3..=5).contains(&values.len()) {
            return Err(SampleError::InvalidLength {
                kind,
                expected: "3 to 5",
                actual: values.len(),
            });
        }
        // The accuracy estimate is allowed to be unknown.
        check_finite(kind, &values[..values.len().min(4)])?;

        let (x, y, z) = (values[0], values[1], values[2]);
        let vector_norm_squared = x * x + y * y + z * z;

        let w = match values.get(3) {
            Some(&w) => {
                let norm_squared = vector_norm_squared + w * w;
                if (norm_squared - 1.0).abs() > tolerance {
                    return Err(SampleError::DegenerateRotation { norm_squared });
                }
                w
            }
            None => {
                if vector_norm_squared > 1.0 + tolerance {
                    return Err(SampleError::DegenerateRotation {
                        norm_squared: vector_norm_squared,
                    });
                }
                let w_squared = 1.0 - vector_norm_squared;
                if w_squared > 0.0 { w_squared.sqrt() } else { 0.0 }
            }
        };

        Ok(Self {
            x,
            y,
            z,
            w,
            timestamp: None,
        })
    }

    /// Attach the platform event time in nanoseconds
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn z(&self) -> f32 {
        self.z
    }

    /// Scalar part of the quaternion
    pub fn w(&self) -> f32 {
        self.w
    }

    pub fn timestamp(&self) -> Option<u64> {
        self.timestamp
    }

    /// Orientation as a normalized nalgebra quaternion
    pub fn quaternion(&self) -> UnitQuaternion<f32> {
        UnitQuaternion::from_quaternion(nalgebra::Quaternion::new(
            self.w, self.x, self.y, self.z,
        ))
    }
}

/// A single sensor event of either kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SensorReading {
    Accelerometer(AccelerometerSample),
    RotationVector(RotationVectorSample),
}

impl SensorReading {
    pub fn kind(&self) -> SensorKind {
        match self {
            SensorReading::Accelerometer(_) => SensorKind::Accelerometer,
            SensorReading::RotationVector(_) => SensorKind::RotationVector,
        }
    }

    pub fn timestamp(&self) -> Option<u64> {
        match self {
            SensorReading::Accelerometer(sample) => sample.timestamp(),
            SensorReading::RotationVector(sample) => sample.timestamp(),
        }
    }
}

impl From<AccelerometerSample> for SensorReading {
    fn from(sample: AccelerometerSample) -> Self {
        SensorReading::Accelerometer(sample)
    }
}

impl From<RotationVectorSample> for SensorReading {
    fn from(sample: RotationVectorSample) -> Self {
        SensorReading::RotationVector(sample)
    }
}

/// Gravity-compensated acceleration along the Earth vertical axis
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalAcceleration {
    /// Acceleration in m/s², approximately zero at rest
    pub value: f32,
    /// Event time of the sample whose arrival produced this estimate
    pub timestamp: Option<u64>,
}

fn check_finite(kind: SensorKind, values: &[f32]) -> Result<(), SampleError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SampleError::NonFinite { kind, index }),
        None => Ok(()),
    }
}
