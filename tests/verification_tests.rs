use core::f32::consts::FRAC_PI_2;
use nalgebra::{UnitQuaternion, Vector3};
use vertical_accel::{
    AccelerometerSample, EstimatorSettings, GRAVITY, RollingSeries, RotationMatrix,
    RotationVectorSample, SensorReading, VerticalAcceleration, VerticalEstimator, earth_frame,
    rotation_matrix_from_vector, vertical_acceleration,
};

const EPSILON: f32 = 1e-4;

fn accel(x: f32, y: f32, z: f32) -> AccelerometerSample {
    AccelerometerSample::new(Vector3::new(x, y, z))
}

fn quarter_turn_about_x() -> RotationVectorSample {
    RotationVectorSample::from_quaternion(UnitQuaternion::from_axis_angle(
        &Vector3::x_axis(),
        FRAC_PI_2,
    ))
}

/// Only accelerometer samples: nothing is ever emitted
#[test]
fn test_no_emission_with_accelerometer_only() {
    let mut emitted = 0;
    let mut estimator = VerticalEstimator::new(|_: VerticalAcceleration| emitted += 1);

    for i in 0..50 {
        assert!(estimator.ingest_accelerometer(accel(0.0, 0.0, i as f32)).is_none());
    }
    assert!(!estimator.is_primed());
    drop(estimator);
    assert_eq!(emitted, 0);
}

/// Only rotation-vector samples: nothing is ever emitted
#[test]
fn test_no_emission_with_rotation_vector_only() {
    let mut estimator = VerticalEstimator::new(RollingSeries::default());

    for _ in 0..50 {
        assert!(estimator.ingest_rotation_vector(quarter_turn_about_x()).is_none());
        assert!(estimator.ingest_rotation_vector(RotationVectorSample::identity()).is_none());
    }
    assert!(estimator.sink().is_empty());
}

/// Once primed, every ingest emits exactly one estimate
#[test]
fn test_one_emission_per_event_after_priming() {
    let mut estimator = VerticalEstimator::new(RollingSeries::default());
    estimator.ingest_accelerometer(accel(0.0, 0.0, 9.81));
    estimator.ingest_accelerometer(accel(0.0, 0.0, 9.81));
    estimator.ingest_rotation_vector(RotationVectorSample::identity());

    for _ in 0..10 {
        estimator.ingest_accelerometer(accel(0.0, 0.0, 9.81));
        estimator.ingest_rotation_vector(RotationVectorSample::identity());
    }

    assert_eq!(estimator.sink().total(), 21);
}

/// A superseded accelerometer sample has no effect on the next estimate
#[test]
fn test_last_write_wins_accelerometer() {
    let mut estimator = VerticalEstimator::detached();
    estimator.ingest_accelerometer(accel(0.0, 0.0, 100.0));
    estimator.ingest_accelerometer(accel(0.0, 0.0, 12.81));

    let estimate = estimator
        .ingest_rotation_vector(RotationVectorSample::identity())
        .unwrap();
    assert!((estimate.value - 3.0).abs() < EPSILON);
    assert_eq!(
        estimator.latest_accelerometer().map(|s| s.values()),
        Some(Vector3::new(0.0, 0.0, 12.81))
    );
}

/// A superseded rotation sample has no effect on the next estimate
#[test]
fn test_last_write_wins_rotation_vector() {
    let mut estimator = VerticalEstimator::detached();
    estimator.ingest_rotation_vector(quarter_turn_about_x());
    estimator.ingest_rotation_vector(RotationVectorSample::identity());

    let estimate = estimator.ingest_accelerometer(accel(0.0, 5.0, 9.81)).unwrap();
    assert!(estimate.value.abs() < EPSILON);
}

/// Identity rotation reduces the estimate to `a.z - g`
#[test]
fn test_identity_rotation() {
    let readings = [
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, -2.0, 3.0),
        Vector3::new(-4.5, 7.25, 19.62),
        Vector3::new(100.0, 100.0, -9.81),
    ];

    for a in readings {
        let value = vertical_acceleration(&a, &RotationMatrix::identity(), GRAVITY);
        assert!((value - (a.z - 9.81)).abs() < EPSILON, "reading {a:?}");
    }
}

/// A 90° turn about X tells a row-oriented product from a column-oriented one
#[test]
fn test_quarter_turn_uses_literal_index_arithmetic() {
    let rotation = rotation_matrix_from_vector(&quarter_turn_about_x());
    let a = Vector3::new(0.0, 1.0, 2.0);

    // Row i, column j: w.z = R[6]·a.x + R[7]·a.y + R[8]·a.z = a.y
    let value = vertical_acceleration(&a, &rotation, GRAVITY);
    assert!((value - (1.0 - 9.81)).abs() < EPSILON);

    // Multiplying by the transpose would read R[2], R[5], R[8] instead
    let transposed = rotation.to_matrix3().transpose() * a;
    assert!((transposed.z - 9.81 - value).abs() > 1.0);

    let world = earth_frame(&a, &rotation);
    assert!((world - rotation.to_matrix3() * a).magnitude() < EPSILON);
}

/// Device stood on its edge at rest: gravity shows on device Y
#[test]
fn test_quarter_turn_at_rest() {
    let mut estimator = VerticalEstimator::detached();
    estimator.ingest_rotation_vector(quarter_turn_about_x());
    let estimate = estimator.ingest_accelerometer(accel(0.0, 9.81, 0.0)).unwrap();
    assert!(estimate.value.abs() < EPSILON);
}

/// Level device at rest reads zero
#[test]
fn test_gravity_compensation_at_rest() {
    let value = vertical_acceleration(
        &Vector3::new(0.0, 0.0, 9.81),
        &RotationMatrix::identity(),
        GRAVITY,
    );
    assert!(value.abs() < EPSILON);
}

/// Same inputs, same bits
#[test]
fn test_deterministic_output() {
    let rotation = RotationVectorSample::from_quaternion(UnitQuaternion::from_euler_angles(
        0.4, -0.25, 1.3,
    ));
    let sample = accel(0.37, -1.2, 9.6);

    let run = || {
        let mut estimator = VerticalEstimator::detached();
        estimator.ingest_rotation_vector(rotation);
        estimator.ingest_accelerometer(sample).unwrap().value
    };

    let first = run();
    for _ in 0..10 {
        assert_eq!(run().to_bits(), first.to_bits());
    }
}

/// Rotation first, then a lifted device
#[test]
fn test_rotation_then_accelerometer() {
    let mut estimator = VerticalEstimator::new(RollingSeries::default());
    assert!(estimator
        .ingest_rotation_vector(RotationVectorSample::identity())
        .is_none());

    let estimate = estimator.ingest_accelerometer(accel(1.0, 2.0, 11.81)).unwrap();
    assert!((estimate.value - 2.0).abs() < EPSILON);
    assert_eq!(estimator.sink().latest().map(|(i, _)| i), Some(0));
}

/// Accelerometer first: emission fires on the rotation sample
#[test]
fn test_accelerometer_then_rotation() {
    let mut estimator = VerticalEstimator::new(RollingSeries::default());
    assert!(estimator.ingest_accelerometer(accel(0.0, 0.0, 9.81)).is_none());
    assert!(estimator.sink().is_empty());

    let estimate = estimator
        .ingest_rotation_vector(RotationVectorSample::identity())
        .unwrap();
    assert!(estimate.value.abs() < EPSILON);
    assert_eq!(estimator.sink().len(), 1);
}

/// Tilted device at rest: the rotated reading still cancels gravity
#[test]
fn test_arbitrary_orientation_at_rest() {
    let orientations = [(0.3f32, 0.2f32, 0.0f32), (-0.8, 0.5, 2.0), (1.2, -0.3, -1.0)];

    for (roll, pitch, yaw) in orientations {
        let quaternion = UnitQuaternion::from_euler_angles(roll, pitch, yaw);
        // Gravity reaction expressed in the device frame
        let reading = quaternion.inverse() * Vector3::new(0.0, 0.0, GRAVITY);

        let mut estimator = VerticalEstimator::detached();
        estimator.ingest(SensorReading::from(RotationVectorSample::from_quaternion(quaternion)));
        let estimate = estimator.ingest(accel(reading.x, reading.y, reading.z).into()).unwrap();
        assert!(
            estimate.value.abs() < EPSILON,
            "orientation ({roll}, {pitch}, {yaw}) gave {}",
            estimate.value
        );
    }
}

/// Settings survive a round trip through the public API
#[test]
fn test_settings_processing() {
    let settings = EstimatorSettings {
        gravity: 9.8,
        ..Default::default()
    };
    let mut estimator = VerticalEstimator::with_settings(settings, RollingSeries::new(5));
    assert_eq!(estimator.settings().gravity, 9.8);

    estimator.ingest_rotation_vector(RotationVectorSample::identity());
    let estimate = estimator.ingest_accelerometer(accel(0.0, 0.0, 9.8)).unwrap();
    assert!(estimate.value.abs() < EPSILON);
}
