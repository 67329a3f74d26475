//! Calibration walk-through against mock hardware.
//!
//! Builds one steering encoder of each supported kind, applies a zero
//! offset to both, and prints readings for a few control cycles. The
//! SparkMax data port is scripted to drop more offset writes than the
//! retry budget allows, so its offset fault and alert are raised.
//!
//! # Usage
//!
//! ```sh
//! RUST_LOG=debug cargo run --example calibration
//! ```

use anyhow::Context;
use swerve_encoders::encoders::{CanandcoderEncoder, SparkMaxEncoder};
use swerve_encoders::hal::{
    MockCanandcoder, MockMotor, MockSparkAbsoluteEncoder, MockSparkMax, RecordingAlerts,
};
use swerve_encoders::{AbsoluteEncoder, EncoderConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let alerts = RecordingAlerts::new();

    let front_left = EncoderConfig::default()
        .with_name("front_left")
        .with_zero_offset(0.125);
    let front_right = EncoderConfig::default()
        .with_name("front_right")
        .with_inverted(true)
        .with_zero_offset(47.5)
        .with_max_attempts(3);

    let mut steer_motor = MockMotor::spark_max(
        MockSparkMax::new(12).with_encoder(
            MockSparkAbsoluteEncoder::new()
                .with_position(133.0)
                .with_velocity(-20.0)
                .fail_next_offset_writes(3),
        ),
    );

    let canandcoder: Box<dyn AbsoluteEncoder + '_> = Box::new(CanandcoderEncoder::new(
        MockCanandcoder::new(21).with_position(0.4).with_velocity(0.5),
    ));
    let sparkmax: Box<dyn AbsoluteEncoder + '_> = Box::new(
        SparkMaxEncoder::<MockSparkMax, _>::with_config(&mut steer_motor, &alerts, &front_right)
            .context("building front_right encoder")?,
    );

    let mut modules = vec![
        (front_left.name.as_str(), canandcoder),
        (front_right.name.as_str(), sparkmax),
    ];

    for ((name, encoder), config) in modules.iter_mut().zip([&front_left, &front_right]) {
        let applied = encoder.apply_config(config);
        println!("{name}: calibration applied = {applied}");
    }

    for cycle in 0..3 {
        for (name, encoder) in modules.iter_mut() {
            let position = encoder.absolute_position();
            let velocity = encoder.velocity();
            println!(
                "cycle {cycle} {name}: {:.2} deg, {:.2} deg/s, fault = {:?}",
                position.as_degrees(),
                velocity.as_degrees_per_second(),
                encoder.active_fault()
            );
        }
    }

    for alert in alerts.snapshot().iter().filter(|a| a.active) {
        println!("[{}] {}", alert.category, alert.text);
    }

    Ok(())
}
