//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for every vendor driver seam and the
//! alert collaborator, enabling development and testing on desktop without
//! a robot.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockCanandcoder`] | [`CanandcoderDriver`] | Settable readings, settings log, stored offset |
//! | [`MockSparkAbsoluteEncoder`] | [`SparkAbsoluteEncoder`] | Scripted write failures, write log |
//! | [`MockSparkMax`] | [`SparkMax`] | Hands out a configured data-port encoder |
//! | [`MockMotor`] | [`SwerveMotor`] | Holds a SparkMax or some other controller |
//! | [`RecordingAlerts`] | [`AlertSink`] | Records alert state and text |
//!
//! # Example
//!
//! ```rust
//! use swerve_encoders::hal::{MockSparkAbsoluteEncoder, MockSparkMax, MockMotor, RecordingAlerts};
//! use swerve_encoders::encoders::SparkMaxEncoder;
//! use swerve_encoders::traits::AbsoluteEncoder;
//!
//! let alerts = RecordingAlerts::new();
//! let spark = MockSparkMax::new(7)
//!     .with_encoder(MockSparkAbsoluteEncoder::new().with_position(200.0));
//! let mut motor = MockMotor::spark_max(spark);
//!
//! let mut encoder = SparkMaxEncoder::<MockSparkMax, _>::new(&mut motor, 360.0, &alerts).unwrap();
//! assert_eq!(encoder.absolute_position().as_degrees(), 200.0);
//! ```
//!
//! [`CanandcoderDriver`]: crate::traits::CanandcoderDriver
//! [`SparkAbsoluteEncoder`]: crate::traits::SparkAbsoluteEncoder
//! [`SparkMax`]: crate::traits::SparkMax
//! [`SwerveMotor`]: crate::traits::SwerveMotor
//! [`AlertSink`]: crate::traits::AlertSink

extern crate alloc;
use alloc::boxed::Box;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::any::Any;
use core::cell::RefCell;

use crate::traits::{
    AbsoluteEncoderType, AlertHandle, AlertSeverity, AlertSink, CanandcoderDriver,
    CanandcoderSettings, RevError, SparkAbsoluteEncoder, SparkMax, SwerveMotor,
};

// ============================================================================
// Canandcoder Mock
// ============================================================================

/// Mock Canandcoder.
///
/// Readings are set through public fields. Every settings write is recorded
/// in `settings_writes`, accepted or not.
#[derive(Debug, Clone, Default)]
pub struct MockCanandcoder {
    can_id: u8,
    /// Position returned by reads (rotations).
    pub position: f64,
    /// Velocity returned by reads (rotations/second).
    pub velocity: f64,
    /// Zero offset stored in the device.
    pub zero_offset: f64,
    /// Direction inversion stored in the device.
    pub inverted: bool,
    /// Reads fail while set.
    pub fail_reads: bool,
    /// Settings writes are not acknowledged while set.
    pub reject_settings: bool,
    /// Every settings write received.
    pub settings_writes: Vec<CanandcoderSettings>,
    /// Number of factory resets received.
    pub factory_resets: u32,
    /// Latched fault bits.
    pub sticky_faults: u32,
}

impl MockCanandcoder {
    /// Creates a mock bound to `can_id` with zeroed readings.
    pub fn new(can_id: u8) -> Self {
        Self {
            can_id,
            ..Self::default()
        }
    }

    /// Set the position reading
    pub fn with_position(mut self, rotations: f64) -> Self {
        self.position = rotations;
        self
    }

    /// Set the velocity reading
    pub fn with_velocity(mut self, rotations_per_second: f64) -> Self {
        self.velocity = rotations_per_second;
        self
    }
}

impl CanandcoderDriver for MockCanandcoder {
    type Error = &'static str;

    fn can_id(&self) -> u8 {
        self.can_id
    }

    fn reset_factory_defaults(&mut self, clear_zero_offset: bool) -> bool {
        self.factory_resets += 1;
        self.inverted = false;
        if clear_zero_offset {
            self.zero_offset = 0.0;
        }
        true
    }

    fn clear_sticky_faults(&mut self) {
        self.sticky_faults = 0;
    }

    fn set_settings(&mut self, settings: &CanandcoderSettings) -> bool {
        self.settings_writes.push(*settings);
        if self.reject_settings {
            return false;
        }
        if let Some(inverted) = settings.invert_direction {
            self.inverted = inverted;
        }
        if let Some(offset) = settings.zero_offset {
            self.zero_offset = offset;
        }
        true
    }

    fn abs_position(&mut self) -> Result<f64, Self::Error> {
        if self.fail_reads {
            Err("no position frame")
        } else {
            Ok(self.position)
        }
    }

    fn velocity(&mut self) -> Result<f64, Self::Error> {
        if self.fail_reads {
            Err("no velocity frame")
        } else {
            Ok(self.velocity)
        }
    }
}

// ============================================================================
// SparkMax Mocks
// ============================================================================

/// Mock SparkMax data-port encoder.
///
/// Conversion factor and zero offset writes can be scripted to fail a
/// number of times before succeeding. Every write attempt is logged in
/// `write_log` as `(setting, value)`.
#[derive(Debug, Clone)]
pub struct MockSparkAbsoluteEncoder {
    /// Position returned by reads (converted units).
    pub position: f64,
    /// Velocity returned by reads (converted units).
    pub velocity: f64,
    /// Current inversion.
    pub inverted: bool,
    /// Number of `set_inverted` calls.
    pub invert_calls: u32,
    /// Stored velocity conversion factor.
    pub velocity_conversion_factor: f64,
    /// Stored position conversion factor.
    pub position_conversion_factor: f64,
    /// Stored zero offset.
    pub zero_offset: f64,
    /// Remaining conversion factor writes that will fail.
    pub config_failures: u32,
    /// Error returned by failing conversion factor writes.
    pub config_error: RevError,
    /// Remaining zero offset writes that will fail.
    pub offset_failures: u32,
    /// Error returned by failing zero offset writes.
    pub offset_error: RevError,
    /// Number of `set_zero_offset` calls.
    pub offset_attempts: u32,
    /// Reads fail while set.
    pub fail_reads: bool,
    /// Every write attempt, successful or not.
    pub write_log: Vec<(&'static str, f64)>,
}

impl Default for MockSparkAbsoluteEncoder {
    fn default() -> Self {
        Self {
            position: 0.0,
            velocity: 0.0,
            inverted: false,
            invert_calls: 0,
            velocity_conversion_factor: 1.0,
            position_conversion_factor: 1.0,
            zero_offset: 0.0,
            config_failures: 0,
            config_error: RevError::Timeout,
            offset_failures: 0,
            offset_error: RevError::Timeout,
            offset_attempts: 0,
            fail_reads: false,
            write_log: Vec::new(),
        }
    }
}

impl MockSparkAbsoluteEncoder {
    /// Creates an encoder that accepts every write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the position reading
    pub fn with_position(mut self, position: f64) -> Self {
        self.position = position;
        self
    }

    /// Set the velocity reading
    pub fn with_velocity(mut self, velocity: f64) -> Self {
        self.velocity = velocity;
        self
    }

    /// Fail the next `count` conversion factor writes
    pub fn fail_next_config_writes(mut self, count: u32) -> Self {
        self.config_failures = count;
        self
    }

    /// Fail the next `count` zero offset writes
    pub fn fail_next_offset_writes(mut self, count: u32) -> Self {
        self.offset_failures = count;
        self
    }

    fn config_write(&mut self, setting: &'static str, value: f64) -> Result<(), RevError> {
        self.write_log.push((setting, value));
        if self.config_failures > 0 {
            self.config_failures -= 1;
            return Err(self.config_error);
        }
        Ok(())
    }

    fn read(&self, value: f64) -> Result<f64, RevError> {
        if self.fail_reads {
            Err(RevError::CanDisconnected)
        } else {
            Ok(value)
        }
    }
}

impl SparkAbsoluteEncoder for MockSparkAbsoluteEncoder {
    fn set_velocity_conversion_factor(&mut self, factor: f64) -> Result<(), RevError> {
        self.config_write("velocity_conversion_factor", factor)?;
        self.velocity_conversion_factor = factor;
        Ok(())
    }

    fn set_position_conversion_factor(&mut self, factor: f64) -> Result<(), RevError> {
        self.config_write("position_conversion_factor", factor)?;
        self.position_conversion_factor = factor;
        Ok(())
    }

    fn set_inverted(&mut self, inverted: bool) {
        self.invert_calls += 1;
        self.inverted = inverted;
    }

    fn set_zero_offset(&mut self, offset: f64) -> Result<(), RevError> {
        self.offset_attempts += 1;
        self.write_log.push(("zero_offset", offset));
        if self.offset_failures > 0 {
            self.offset_failures -= 1;
            return Err(self.offset_error);
        }
        self.zero_offset = offset;
        Ok(())
    }

    fn position(&mut self) -> Result<f64, RevError> {
        self.read(self.position)
    }

    fn velocity(&mut self) -> Result<f64, RevError> {
        self.read(self.velocity)
    }
}

/// Mock SparkMax controller.
///
/// Hands out a clone of its template encoder each time the data port is
/// opened.
#[derive(Debug, Clone, Default)]
pub struct MockSparkMax {
    /// CAN id of the controller.
    pub can_id: u8,
    /// Template for the data-port encoder.
    pub encoder: MockSparkAbsoluteEncoder,
    /// Data-port encoder types requested so far.
    pub opened: Vec<AbsoluteEncoderType>,
}

impl MockSparkMax {
    /// Creates a controller with a default data-port encoder.
    pub fn new(can_id: u8) -> Self {
        Self {
            can_id,
            ..Self::default()
        }
    }

    /// Set the data-port encoder template
    pub fn with_encoder(mut self, encoder: MockSparkAbsoluteEncoder) -> Self {
        self.encoder = encoder;
        self
    }
}

impl SparkMax for MockSparkMax {
    type AbsoluteEncoder = MockSparkAbsoluteEncoder;

    fn absolute_encoder(&mut self, kind: AbsoluteEncoderType) -> Self::AbsoluteEncoder {
        self.opened.push(kind);
        self.encoder.clone()
    }
}

/// Stand-in for a controller from another vendor.
#[derive(Debug, Clone, Copy, Default)]
pub struct OtherController;

/// Mock motor wrapper.
///
/// # Example
///
/// ```rust
/// use swerve_encoders::hal::{MockMotor, MockSparkMax};
/// use swerve_encoders::traits::SwerveMotor;
///
/// let mut motor = MockMotor::spark_max(MockSparkMax::new(3));
/// assert_eq!(motor.vendor_name(), "SparkMax");
/// assert!(motor.native_motor().downcast_mut::<MockSparkMax>().is_some());
///
/// let mut talon = MockMotor::other("TalonFX");
/// assert!(talon.native_motor().downcast_mut::<MockSparkMax>().is_none());
/// ```
pub struct MockMotor {
    native: Box<dyn Any>,
    vendor: &'static str,
}

impl MockMotor {
    /// Motor backed by a SparkMax.
    pub fn spark_max(spark: MockSparkMax) -> Self {
        Self {
            native: Box::new(spark),
            vendor: "SparkMax",
        }
    }

    /// Motor backed by a controller that is not a SparkMax.
    pub fn other(vendor: &'static str) -> Self {
        Self {
            native: Box::new(OtherController),
            vendor,
        }
    }

    /// Borrow the native controller as `T`, if it is one.
    pub fn native_ref<T: Any>(&self) -> Option<&T> {
        self.native.downcast_ref::<T>()
    }
}

impl core::fmt::Debug for MockMotor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MockMotor")
            .field("vendor", &self.vendor)
            .finish_non_exhaustive()
    }
}

impl SwerveMotor for MockMotor {
    fn native_motor(&mut self) -> &mut dyn Any {
        &mut *self.native
    }

    fn vendor_name(&self) -> &'static str {
        self.vendor
    }
}

// ============================================================================
// Alert Mocks
// ============================================================================

/// One alert captured by [`RecordingAlerts`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedAlert {
    /// Group the alert was filed under.
    pub category: String,
    /// Text at creation.
    pub message: String,
    /// Current text.
    pub text: String,
    /// Severity at creation.
    pub severity: AlertSeverity,
    /// Whether the alert is showing.
    pub active: bool,
}

/// Alert sink that records everything for later inspection.
///
/// # Example
///
/// ```rust
/// use swerve_encoders::hal::RecordingAlerts;
/// use swerve_encoders::traits::{AlertSeverity, AlertSink};
///
/// let alerts = RecordingAlerts::new();
/// let h = alerts.create("Encoders", "Offset", AlertSeverity::Warning);
/// alerts.set_text(h, "Offset Error: kTimeout");
/// alerts.set(h, true);
///
/// assert_eq!(alerts.active_count(), 1);
/// assert_eq!(alerts.text(h).as_deref(), Some("Offset Error: kTimeout"));
/// ```
#[derive(Debug, Default)]
pub struct RecordingAlerts {
    alerts: RefCell<Vec<RecordedAlert>>,
}

impl RecordingAlerts {
    /// Creates an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of alerts created.
    pub fn len(&self) -> usize {
        self.alerts.borrow().len()
    }

    /// Whether no alert has been created.
    pub fn is_empty(&self) -> bool {
        self.alerts.borrow().is_empty()
    }

    /// Number of alerts currently showing.
    pub fn active_count(&self) -> usize {
        self.alerts.borrow().iter().filter(|a| a.active).count()
    }

    /// Whether `handle` is showing. Unknown handles are inactive.
    pub fn is_active(&self, handle: AlertHandle) -> bool {
        self.get(handle).map(|a| a.active).unwrap_or(false)
    }

    /// Current text of `handle`.
    pub fn text(&self, handle: AlertHandle) -> Option<String> {
        self.get(handle).map(|a| a.text)
    }

    /// Category of `handle`.
    pub fn category(&self, handle: AlertHandle) -> Option<String> {
        self.get(handle).map(|a| a.category)
    }

    /// Snapshot of one alert.
    pub fn get(&self, handle: AlertHandle) -> Option<RecordedAlert> {
        self.alerts.borrow().get(handle.id() as usize).cloned()
    }

    /// Snapshot of every alert, in creation order.
    pub fn snapshot(&self) -> Vec<RecordedAlert> {
        self.alerts.borrow().clone()
    }
}

impl AlertSink for RecordingAlerts {
    fn create(&self, category: &str, message: &str, severity: AlertSeverity) -> AlertHandle {
        let mut alerts = self.alerts.borrow_mut();
        let handle = AlertHandle::new(alerts.len() as u32);
        alerts.push(RecordedAlert {
            category: category.to_string(),
            message: message.to_string(),
            text: message.to_string(),
            severity,
            active: false,
        });
        handle
    }

    fn set(&self, handle: AlertHandle, active: bool) {
        if let Some(alert) = self.alerts.borrow_mut().get_mut(handle.id() as usize) {
            alert.active = active;
        }
    }

    fn set_text(&self, handle: AlertHandle, text: &str) {
        if let Some(alert) = self.alerts.borrow_mut().get_mut(handle.id() as usize) {
            alert.text = text.to_string();
        }
    }
}
