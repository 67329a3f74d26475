//! Integration tests for the encoder adapters

use approx::assert_relative_eq;
use swerve_encoders::{
    encoders::{CanandcoderEncoder, SparkMaxEncoder},
    hal::{MockCanandcoder, MockMotor, MockSparkAbsoluteEncoder, MockSparkMax, RecordingAlerts},
    AbsoluteEncoder, AngleUnit, EncoderConfig, EncoderError, EncoderFault,
};

#[test]
fn canandcoder_quarter_turn() {
    let driver = MockCanandcoder::new(10).with_position(0.25).with_velocity(2.0);
    let mut encoder = CanandcoderEncoder::new(driver);

    let position = encoder.absolute_position();
    assert_eq!(position.unit(), AngleUnit::Rotations);
    assert_eq!(position.value(), 0.25);
    assert_relative_eq!(position.as_degrees(), 90.0, epsilon = 1e-9);

    let velocity = encoder.velocity();
    assert_relative_eq!(velocity.as_degrees_per_second(), 720.0, epsilon = 1e-9);
}

#[test]
fn sparkmax_offset_succeeds_within_budget() {
    let alerts = RecordingAlerts::new();
    let spark = MockSparkMax::new(20)
        .with_encoder(MockSparkAbsoluteEncoder::new().fail_next_offset_writes(3));
    let mut motor = MockMotor::spark_max(spark);
    let config = EncoderConfig::default().with_max_attempts(4);
    let mut encoder =
        SparkMaxEncoder::<MockSparkMax, _>::with_config(&mut motor, &alerts, &config).unwrap();

    assert!(encoder.set_offset(47.5));
    assert!(!encoder.offset_fault().is_raised());
    assert_eq!(alerts.active_count(), 0);
}

#[test]
fn sparkmax_offset_fails_when_budget_too_small() {
    let alerts = RecordingAlerts::new();
    let spark = MockSparkMax::new(20)
        .with_encoder(MockSparkAbsoluteEncoder::new().fail_next_offset_writes(3));
    let mut motor = MockMotor::spark_max(spark);
    let config = EncoderConfig::default().with_max_attempts(3);
    let mut encoder =
        SparkMaxEncoder::<MockSparkMax, _>::with_config(&mut motor, &alerts, &config).unwrap();

    assert!(!encoder.set_offset(47.5));
    assert!(encoder.offset_fault().is_raised());
    assert!(!encoder.offset_fault().text().is_empty());
    assert_eq!(alerts.active_count(), 1);
    assert_eq!(encoder.active_fault(), Some(EncoderFault::ZeroOffset));
}

#[test]
fn sparkmax_construction_checks_motor_type() {
    let alerts = RecordingAlerts::new();

    let mut wrong = MockMotor::other("TalonFX");
    let err = SparkMaxEncoder::<MockSparkMax, _>::new(&mut wrong, 360.0, &alerts)
        .err()
        .expect("non-SparkMax motor must be rejected");
    assert!(matches!(err, EncoderError::MotorTypeMismatch { found: "TalonFX", .. }));

    let mut right = MockMotor::spark_max(MockSparkMax::new(3));
    let encoder = SparkMaxEncoder::<MockSparkMax, _>::new(&mut right, 360.0, &alerts).unwrap();
    assert_eq!(encoder.encoder().write_log.len(), 2);
}

#[test]
fn sparkmax_opens_duty_cycle_port_on_the_motor() {
    let alerts = RecordingAlerts::new();
    let mut motor = MockMotor::spark_max(MockSparkMax::new(3));
    let _encoder = SparkMaxEncoder::<MockSparkMax, _>::new(&mut motor, 360.0, &alerts).unwrap();

    let spark = motor.native_ref::<MockSparkMax>().unwrap();
    assert_eq!(spark.opened.len(), 1);
}

#[test]
fn heterogeneous_modules_share_one_contract() {
    let alerts = RecordingAlerts::new();
    let mut motor = MockMotor::spark_max(
        MockSparkMax::new(4).with_encoder(MockSparkAbsoluteEncoder::new().with_position(270.0)),
    );

    let mut modules: Vec<Box<dyn AbsoluteEncoder + '_>> = vec![
        Box::new(CanandcoderEncoder::new(
            MockCanandcoder::new(1).with_position(0.75),
        )),
        Box::new(SparkMaxEncoder::<MockSparkMax, _>::new(&mut motor, 360.0, &alerts).unwrap()),
    ];

    for module in modules.iter_mut() {
        assert_relative_eq!(module.absolute_position().as_degrees(), 270.0, epsilon = 1e-9);
        assert_eq!(module.active_fault(), None);
    }
}

#[test]
fn apply_config_sets_direction_and_offset() {
    let config = EncoderConfig::default()
        .with_name("front_left")
        .with_inverted(true)
        .with_zero_offset(0.125);

    let mut encoder = CanandcoderEncoder::new(MockCanandcoder::new(2));
    assert!(encoder.apply_config(&config));
    assert!(encoder.driver().inverted);
    assert_eq!(encoder.driver().zero_offset, 0.125);
}

#[test]
fn factory_reset_keeps_calibration() {
    let mut encoder = CanandcoderEncoder::new(MockCanandcoder::new(2));
    assert!(encoder.set_offset(0.33));

    encoder.factory_default();
    encoder.factory_default();

    assert_eq!(encoder.driver().zero_offset, 0.33);
}

#[test]
fn stale_reading_recovers() {
    let alerts = RecordingAlerts::new();
    let mut motor = MockMotor::spark_max(
        MockSparkMax::new(4).with_encoder(MockSparkAbsoluteEncoder::new().with_velocity(90.0)),
    );
    let mut encoder = SparkMaxEncoder::<MockSparkMax, _>::new(&mut motor, 360.0, &alerts).unwrap();
    assert_eq!(encoder.velocity().as_degrees_per_second(), 90.0);

    encoder.encoder_mut().fail_reads = true;
    assert_eq!(encoder.velocity().as_degrees_per_second(), 90.0);
    assert_eq!(encoder.active_fault(), Some(EncoderFault::StaleReading));

    encoder.encoder_mut().fail_reads = false;
    encoder.encoder_mut().velocity = 10.0;
    assert_eq!(encoder.velocity().as_degrees_per_second(), 10.0);
    assert_eq!(encoder.active_fault(), None);
}
