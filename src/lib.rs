//! # swerve-encoders
//!
//! Absolute encoder abstraction for swerve drive steering, with a bounded
//! retry discipline for configuration writes over an unreliable CAN bus.
//!
//! ## Features
//!
//! - **One contract**: [`AbsoluteEncoder`] covers every supported sensor
//! - **Unit-tagged readings**: measurements keep their native unit and convert on demand
//! - **Reads never fail**: a failed sensor read yields the last known value
//! - **Bounded retries**: configuration writes are repeated up to a fixed budget
//! - **Sticky faults**: exhausted writes raise a [`FaultFlag`] mirrored to an operator alert
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `units` - Angle and angular velocity measurements
//! - `retry` - Bounded retry over vendor success idioms
//! - `fault` - Sticky fault flags bound to alerts
//! - `traits` - Encoder contract, vendor driver seams, alert sink
//! - `encoders` - Canandcoder and SparkMax adapters
//! - `config` - Per-encoder configuration
//! - `hal` - Mock drivers and alert sink for testing
//!
//! ## Example
//!
//! ```rust
//! use swerve_encoders::{
//!     encoders::{CanandcoderEncoder, SparkMaxEncoder},
//!     hal::{MockCanandcoder, MockMotor, MockSparkMax, RecordingAlerts},
//!     AbsoluteEncoder,
//! };
//!
//! let alerts = RecordingAlerts::new();
//! let mut motor = MockMotor::spark_max(MockSparkMax::new(5));
//!
//! let mut modules: Vec<Box<dyn AbsoluteEncoder + '_>> = vec![
//!     Box::new(CanandcoderEncoder::new(MockCanandcoder::new(1).with_position(0.5))),
//!     Box::new(SparkMaxEncoder::<MockSparkMax, _>::new(&mut motor, 360.0, &alerts).unwrap()),
//! ];
//!
//! // Calibrate once
//! for module in modules.iter_mut() {
//!     module.configure(false);
//!     assert!(module.set_offset(0.0));
//! }
//!
//! // Read every control cycle
//! let first = modules[0].absolute_position();
//! assert!((first.as_degrees() - 180.0).abs() < 1e-9);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Per-encoder configuration.
pub mod config;
/// Absolute encoder adapters for supported sensors.
pub mod encoders;
/// Sticky fault flags bound to operator alerts.
pub mod fault;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Bounded retry for configuration writes.
pub mod retry;
/// Core traits for the encoder contract and its collaborators.
pub mod traits;
/// Unit-tagged angle and angular velocity measurements.
pub mod units;

// Re-exports for convenience
pub use config::EncoderConfig;
pub use encoders::{CanandcoderEncoder, SparkMaxEncoder};
pub use fault::{FaultFlag, FaultText};
pub use retry::{retry, retry_config, ConfigOutcome, RetryExhausted, MAX_CONFIG_ATTEMPTS};
pub use traits::{
    // Contract
    AbsoluteEncoder,
    // Vendor seams
    AbsoluteEncoderType,
    // Alerts
    AlertHandle,
    AlertSeverity,
    AlertSink,
    CanandcoderDriver,
    CanandcoderSettings,
    EncoderError,
    EncoderFault,
    NullAlerts,
    RevError,
    SparkAbsoluteEncoder,
    SparkMax,
    SwerveMotor,
};
pub use units::{AngleMeasurement, AngleUnit, AngularVelocityMeasurement, AngularVelocityUnit};
