//! Edge case and boundary condition tests for the encoder adapters

use std::rc::Rc;

use swerve_encoders::{
    encoders::{CanandcoderEncoder, SparkMaxEncoder},
    hal::{MockCanandcoder, MockMotor, MockSparkAbsoluteEncoder, MockSparkMax, RecordingAlerts},
    AbsoluteEncoder, AlertSink, EncoderConfig, EncoderFault, NullAlerts, RevError,
};

// ============================================================================
// Attempt Budget Boundaries
// ============================================================================

#[test]
fn zero_attempt_budget_never_writes() {
    let alerts = RecordingAlerts::new();
    let mut motor = MockMotor::spark_max(MockSparkMax::new(1));
    let config = EncoderConfig::default().with_max_attempts(0);
    let mut encoder =
        SparkMaxEncoder::<MockSparkMax, _>::with_config(&mut motor, &alerts, &config).unwrap();

    // no conversion factor write was attempted, so configuration failed
    assert!(encoder.encoder().write_log.is_empty());
    assert!(encoder.configuration_fault().is_raised());

    assert!(!encoder.set_offset(1.0));
    assert_eq!(encoder.encoder().offset_attempts, 0);
    // no native error was observed
    assert!(encoder.offset_fault().text().ends_with("kUnknown"));
}

#[test]
fn single_attempt_budget() {
    let alerts = RecordingAlerts::new();
    let spark = MockSparkMax::new(1)
        .with_encoder(MockSparkAbsoluteEncoder::new().fail_next_offset_writes(1));
    let mut motor = MockMotor::spark_max(spark);
    let config = EncoderConfig::default().with_max_attempts(1);
    let mut encoder =
        SparkMaxEncoder::<MockSparkMax, _>::with_config(&mut motor, &alerts, &config).unwrap();

    assert!(!encoder.set_offset(2.0));
    assert!(encoder.set_offset(2.0));
    assert_eq!(encoder.encoder().offset_attempts, 2);
}

#[test]
fn default_budget_is_five_attempts() {
    let alerts = RecordingAlerts::new();
    let spark = MockSparkMax::new(1)
        .with_encoder(MockSparkAbsoluteEncoder::new().fail_next_offset_writes(u32::MAX));
    let mut motor = MockMotor::spark_max(spark);
    let mut encoder = SparkMaxEncoder::<MockSparkMax, _>::new(&mut motor, 360.0, &alerts).unwrap();

    assert_eq!(encoder.max_attempts(), 5);
    assert!(!encoder.set_offset(3.0));
    assert_eq!(encoder.encoder().offset_attempts, 5);
}

#[test]
fn only_velocity_factor_failing_still_raises_configuration_fault() {
    let alerts = RecordingAlerts::new();
    let mut template = MockSparkAbsoluteEncoder::new().fail_next_config_writes(2);
    template.config_error = RevError::ParamInvalid;
    let mut motor = MockMotor::spark_max(MockSparkMax::new(1).with_encoder(template));
    let config = EncoderConfig::default().with_max_attempts(2);
    let encoder =
        SparkMaxEncoder::<MockSparkMax, _>::with_config(&mut motor, &alerts, &config).unwrap();

    // velocity: 2 failed attempts; position: succeeds first time
    assert_eq!(encoder.encoder().write_log.len(), 3);
    assert_eq!(encoder.encoder().velocity_conversion_factor, 1.0);
    assert_eq!(encoder.encoder().position_conversion_factor, 360.0);
    let text = encoder.configuration_fault().text();
    assert!(text.contains("velocity"));
    assert!(text.contains("kParamInvalid"));
}

// ============================================================================
// Fault Flags
// ============================================================================

#[test]
fn configuration_fault_outranks_offset_fault() {
    let alerts = RecordingAlerts::new();
    let template = MockSparkAbsoluteEncoder::new()
        .fail_next_config_writes(u32::MAX)
        .fail_next_offset_writes(u32::MAX);
    let mut motor = MockMotor::spark_max(MockSparkMax::new(1).with_encoder(template));
    let mut encoder = SparkMaxEncoder::<MockSparkMax, _>::new(&mut motor, 360.0, &alerts).unwrap();
    assert!(!encoder.set_offset(0.0));

    assert!(encoder.configuration_fault().is_raised());
    assert!(encoder.offset_fault().is_raised());
    assert_eq!(encoder.active_fault(), Some(EncoderFault::Configuration));
    assert_eq!(alerts.active_count(), 2);
}

#[test]
fn faults_are_separate_alerts() {
    let alerts = RecordingAlerts::new();
    let mut motor = MockMotor::spark_max(MockSparkMax::new(1));
    let encoder = SparkMaxEncoder::<MockSparkMax, _>::new(&mut motor, 360.0, &alerts).unwrap();

    assert_ne!(
        encoder.configuration_fault().alert(),
        encoder.offset_fault().alert()
    );
    let all = alerts.snapshot();
    assert!(all.iter().all(|a| a.category == "Encoders"));
}

#[test]
fn shared_sink_across_encoders() {
    let alerts = Rc::new(RecordingAlerts::new());
    let mut front = MockMotor::spark_max(MockSparkMax::new(1));
    let mut back = MockMotor::spark_max(
        MockSparkMax::new(2)
            .with_encoder(MockSparkAbsoluteEncoder::new().fail_next_offset_writes(u32::MAX)),
    );

    let mut a = SparkMaxEncoder::<MockSparkMax, _>::new(&mut front, 360.0, alerts.clone()).unwrap();
    let mut b = SparkMaxEncoder::<MockSparkMax, _>::new(&mut back, 360.0, alerts.clone()).unwrap();

    assert!(a.set_offset(1.0));
    assert!(!b.set_offset(1.0));

    assert_eq!(alerts.len(), 4);
    assert_eq!(alerts.active_count(), 1);
    assert!(alerts.is_active(b.offset_fault().alert()));
}

#[test]
fn null_alerts_still_track_flags() {
    let spark = MockSparkMax::new(1)
        .with_encoder(MockSparkAbsoluteEncoder::new().fail_next_offset_writes(u32::MAX));
    let mut motor = MockMotor::spark_max(spark);
    let mut encoder = SparkMaxEncoder::<MockSparkMax, _>::new(&mut motor, 360.0, NullAlerts).unwrap();

    assert!(!encoder.set_offset(5.0));
    assert!(encoder.offset_fault().is_raised());
}

#[test]
fn alert_sink_is_object_safe() {
    let alerts = RecordingAlerts::new();
    let sink: &dyn AlertSink = &alerts;
    let mut motor = MockMotor::spark_max(MockSparkMax::new(1));
    let encoder = SparkMaxEncoder::<MockSparkMax, _>::new(&mut motor, 360.0, sink).unwrap();
    assert!(!encoder.configuration_fault().is_raised());
    assert_eq!(alerts.len(), 2);
}

// ============================================================================
// Readings
// ============================================================================

#[test]
fn canandcoder_position_at_turn_boundaries() {
    let mut encoder = CanandcoderEncoder::new(MockCanandcoder::new(1));
    assert_eq!(encoder.absolute_position().as_degrees(), 0.0);

    encoder.driver_mut().position = 0.999_999;
    let p = encoder.absolute_position();
    assert!(p.as_degrees() < 360.0);
    assert!(p.normalized().value() < 1.0);
}

#[test]
fn negative_velocity_keeps_sign() {
    let mut encoder = CanandcoderEncoder::new(MockCanandcoder::new(1).with_velocity(-0.5));
    assert_eq!(encoder.velocity().as_degrees_per_second(), -180.0);
}

#[test]
fn custom_conversion_factor_is_written() {
    let alerts = RecordingAlerts::new();
    let mut motor = MockMotor::spark_max(MockSparkMax::new(1));
    let encoder = SparkMaxEncoder::<MockSparkMax, _>::new(&mut motor, 1.0, &alerts).unwrap();
    assert_eq!(encoder.encoder().position_conversion_factor, 1.0);
    assert_eq!(encoder.encoder().velocity_conversion_factor, 1.0);
}

#[test]
fn canandcoder_rejected_offset_has_no_sticky_fault() {
    let mut driver = MockCanandcoder::new(1);
    driver.reject_settings = true;
    let mut encoder = CanandcoderEncoder::new(driver);
    assert!(!encoder.set_offset(0.5));
    assert_eq!(encoder.active_fault(), None);
}
