//! Rolling vertical acceleration chart
//!
//! Drives the estimator with a synthetic stream at the game delivery rate
//! (a device carried up a flight of stairs, swaying as it goes), collects the
//! estimates in a [`RollingSeries`] and renders the visible window the way a
//! live chart would show it.
//!
//! Run with: `cargo run --example chart`

use nalgebra::{UnitQuaternion, Vector3};
use plotters::prelude::*;
use std::error::Error;
use std::f32::consts::PI;
use vertical_accel::{
    AccelerometerSample, RollingSeries, RotationVectorSample, SensorDelay, VerticalEstimator,
};

const DURATION: f32 = 8.0; // seconds
const Y_RANGE: f32 = 10.0; // m/s², symmetric axis bound

fn main() -> Result<(), Box<dyn Error>> {
    let period = SensorDelay::Game.sampling_period().as_secs_f32();
    let steps = (DURATION / period) as usize;

    let mut estimator = VerticalEstimator::new(RollingSeries::default());

    println!("Processing {} sample pairs at {:.0} Hz...", steps, 1.0 / period);

    for i in 0..steps {
        let time = i as f32 * period;
        let timestamp = (time * 1e9) as u64;

        let orientation = UnitQuaternion::from_euler_angles(
            0.3 * (time * 0.7 * 2.0 * PI).sin(),
            0.2 * (time * 0.4 * 2.0 * PI).cos(),
            0.1 * time,
        );
        // one step every 0.6 s
        let bounce = 2.5 * (time / 0.6 * 2.0 * PI).sin();
        let world = Vector3::new(0.0, 0.0, 9.81 + bounce);
        let device = orientation.inverse() * world;

        estimator.ingest_rotation_vector(
            RotationVectorSample::from_quaternion(orientation).with_timestamp(timestamp),
        );
        estimator.ingest_accelerometer(AccelerometerSample::new(device).with_timestamp(timestamp));
    }

    let series = estimator.into_sink();
    println!(
        "Collected {} estimates, showing the last {}",
        series.total(),
        series.len()
    );

    render(&series, "vertical_acceleration.png")?;
    println!("Chart saved to vertical_acceleration.png");

    Ok(())
}

fn render(series: &RollingSeries, path: &str) -> Result<(), Box<dyn Error>> {
    let Some((first, last)) = series.index_range() else {
        return Ok(());
    };

    let root = BitMapBackend::new(path, (1000, 400)).into_drawing_area();
    root.fill(&BLACK)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Sensor Chart", ("sans-serif", 20).into_font().color(&WHITE))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(50)
        .build_cartesian_2d(first..last.max(first + 1), -Y_RANGE..Y_RANGE)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .axis_style(WHITE)
        .label_style(("sans-serif", 12).into_font().color(&WHITE))
        .y_desc("m/s²")
        .draw()?;

    let holo_blue = RGBColor(51, 181, 229);
    chart
        .draw_series(LineSeries::new(series.points(), holo_blue.stroke_width(2)))?
        .label("Vertical Acceleration")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 10, y)], holo_blue));

    chart
        .configure_series_labels()
        .label_font(("sans-serif", 12).into_font().color(&WHITE))
        .border_style(WHITE)
        .draw()?;

    root.present()?;
    Ok(())
}
