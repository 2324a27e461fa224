use nalgebra::Vector3;
use vertical_accel::{
    AccelerometerSample, RotationVectorSample, SensorDelay, VerticalAcceleration,
    VerticalEstimator,
};

fn main() {
    let period = SensorDelay::Game.sampling_period();

    let mut estimator = VerticalEstimator::new(|estimate: VerticalAcceleration| {
        println!("Vertical acceleration: {:+.3} m/s²", estimate.value);
    });

    // the rotation vector usually arrives on its own schedule
    estimator.ingest_rotation_vector(RotationVectorSample::identity()); // replace with the latest rotation vector

    for i in 0..10u32 {
        // this loop should repeat each time new accelerometer data is available
        let lift = if i < 5 { 1.0 } else { 0.0 };
        let accelerometer = Vector3::new(0.0, 0.0, 9.81 + lift); // replace this with actual accelerometer data in m/s²

        let timestamp = (period * i).as_nanos() as u64;
        estimator.ingest_accelerometer(AccelerometerSample::new(accelerometer).with_timestamp(timestamp));
    }
}
