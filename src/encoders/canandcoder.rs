//! Redux Canandcoder absolute encoder on the CAN bus.
//!
//! The Canandcoder reports position in rotations `[0, 1)` and velocity in
//! rotations per second. Settings writes return a plain acknowledgement
//! flag and are applied by the device atomically, so nothing here retries.

use core::any::Any;

use crate::encoders::LastKnown;
use crate::traits::{AbsoluteEncoder, CanandcoderDriver, CanandcoderSettings, EncoderFault};
use crate::units::{AngleMeasurement, AngularVelocityMeasurement};

/// Canandcoder steering encoder.
///
/// Construction only binds the driver; the device is not configured until
/// [`configure`](AbsoluteEncoder::configure) or
/// [`set_offset`](AbsoluteEncoder::set_offset) is called.
///
/// # Example
///
/// ```rust
/// use swerve_encoders::encoders::CanandcoderEncoder;
/// use swerve_encoders::hal::MockCanandcoder;
/// use swerve_encoders::traits::AbsoluteEncoder;
///
/// let driver = MockCanandcoder::new(11).with_velocity(2.0);
/// let mut encoder = CanandcoderEncoder::new(driver);
///
/// assert!((encoder.velocity().as_degrees_per_second() - 720.0).abs() < 1e-9);
/// assert!(encoder.set_offset(0.3));
/// assert_eq!(encoder.driver().zero_offset, 0.3);
/// ```
#[derive(Debug)]
pub struct CanandcoderEncoder<D> {
    driver: D,
    last: LastKnown,
}

impl<D: CanandcoderDriver> CanandcoderEncoder<D> {
    /// Wraps a driver already bound to its CAN id.
    pub fn new(driver: D) -> Self {
        tracing::info!(can_id = driver.can_id(), "canandcoder encoder created");
        Self {
            driver,
            last: LastKnown::default(),
        }
    }

    /// The underlying driver.
    #[inline]
    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Mutable access to the underlying driver.
    #[inline]
    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    /// Consumes the adapter, returning the driver.
    pub fn into_driver(self) -> D {
        self.driver
    }
}

impl<D: CanandcoderDriver + 'static> AbsoluteEncoder for CanandcoderEncoder<D> {
    fn factory_default(&mut self) {
        if !self.driver.reset_factory_defaults(false) {
            tracing::warn!(can_id = self.driver.can_id(), "factory reset not acknowledged");
        }
    }

    fn clear_sticky_faults(&mut self) {
        self.driver.clear_sticky_faults();
    }

    fn configure(&mut self, inverted: bool) {
        // The acknowledgement for this write carries no useful information.
        let _ = self
            .driver
            .set_settings(&CanandcoderSettings::new().with_invert_direction(inverted));
    }

    fn absolute_position(&mut self) -> AngleMeasurement {
        let read = self.driver.abs_position();
        AngleMeasurement::rotations(self.last.position(read))
    }

    fn velocity(&mut self) -> AngularVelocityMeasurement {
        let read = self.driver.velocity();
        AngularVelocityMeasurement::degrees_per_second(self.last.velocity(read) * 360.0)
    }

    fn set_offset(&mut self, offset: f64) -> bool {
        let applied = self
            .driver
            .set_settings(&CanandcoderSettings::new().with_zero_offset(offset));
        if applied {
            tracing::debug!(can_id = self.driver.can_id(), offset, "zero offset stored");
        } else {
            tracing::warn!(can_id = self.driver.can_id(), offset, "zero offset rejected");
        }
        applied
    }

    fn raw_encoder(&self) -> &dyn Any {
        &self.driver
    }

    fn active_fault(&self) -> Option<EncoderFault> {
        self.last.is_stale().then_some(EncoderFault::StaleReading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockCanandcoder;
    use crate::units::AngleUnit;
    use approx::assert_relative_eq;

    // =========================================================================
    // Read Path Tests
    // =========================================================================

    #[test]
    fn position_is_native_rotations() {
        let mut encoder = CanandcoderEncoder::new(MockCanandcoder::new(1).with_position(0.25));
        let m = encoder.absolute_position();
        assert_eq!(m.unit(), AngleUnit::Rotations);
        assert_eq!(m.value(), 0.25);
        assert_relative_eq!(m.as_degrees(), 90.0, epsilon = 1e-9);
    }

    #[test]
    fn velocity_is_scaled_to_degrees() {
        let mut encoder = CanandcoderEncoder::new(MockCanandcoder::new(1).with_velocity(2.0));
        let v = encoder.velocity();
        assert_eq!(v.value(), 720.0);
        assert_eq!(v.as_degrees_per_second(), 720.0);
    }

    #[test]
    fn failed_read_returns_last_known_position() {
        let mut encoder = CanandcoderEncoder::new(MockCanandcoder::new(1).with_position(0.6));
        assert_eq!(encoder.absolute_position().value(), 0.6);

        encoder.driver_mut().fail_reads = true;
        encoder.driver_mut().position = 0.9;
        assert_eq!(encoder.absolute_position().value(), 0.6);
        assert_eq!(encoder.active_fault(), Some(EncoderFault::StaleReading));

        encoder.driver_mut().fail_reads = false;
        assert_eq!(encoder.absolute_position().value(), 0.9);
        assert_eq!(encoder.active_fault(), None);
    }

    #[test]
    fn failed_read_before_any_success_is_zero() {
        let mut driver = MockCanandcoder::new(1).with_velocity(1.0);
        driver.fail_reads = true;
        let mut encoder = CanandcoderEncoder::new(driver);
        assert_eq!(encoder.velocity().value(), 0.0);
        assert_eq!(encoder.absolute_position().value(), 0.0);
    }

    // =========================================================================
    // Write Path Tests
    // =========================================================================

    #[test]
    fn construction_sends_nothing() {
        let encoder = CanandcoderEncoder::new(MockCanandcoder::new(4));
        assert!(encoder.driver().settings_writes.is_empty());
        assert_eq!(encoder.driver().can_id(), 4);
    }

    #[test]
    fn configure_writes_only_inversion() {
        let mut encoder = CanandcoderEncoder::new(MockCanandcoder::new(1));
        encoder.configure(true);
        assert_eq!(
            encoder.driver().settings_writes,
            vec![CanandcoderSettings::new().with_invert_direction(true)]
        );
        assert!(encoder.driver().inverted);
    }

    #[test]
    fn configure_is_single_write_even_when_rejected() {
        let mut driver = MockCanandcoder::new(1);
        driver.reject_settings = true;
        let mut encoder = CanandcoderEncoder::new(driver);
        encoder.configure(true);
        assert_eq!(encoder.driver().settings_writes.len(), 1);
    }

    #[test]
    fn set_offset_returns_raw_ack_without_retry() {
        let mut driver = MockCanandcoder::new(1);
        driver.reject_settings = true;
        let mut encoder = CanandcoderEncoder::new(driver);

        assert!(!encoder.set_offset(0.42));
        assert_eq!(encoder.driver().settings_writes.len(), 1);
        assert_eq!(encoder.driver().zero_offset, 0.0);

        encoder.driver_mut().reject_settings = false;
        assert!(encoder.set_offset(0.42));
        assert_eq!(encoder.driver().zero_offset, 0.42);
        assert_eq!(encoder.active_fault(), None);
    }

    #[test]
    fn factory_default_keeps_zero_offset() {
        let mut encoder = CanandcoderEncoder::new(MockCanandcoder::new(1));
        encoder.configure(true);
        assert!(encoder.set_offset(0.42));

        encoder.factory_default();

        assert_eq!(encoder.driver().factory_resets, 1);
        assert_eq!(encoder.driver().zero_offset, 0.42);
        assert!(!encoder.driver().inverted);
    }

    #[test]
    fn clear_sticky_faults_is_forwarded() {
        let mut encoder = CanandcoderEncoder::new(MockCanandcoder::new(1));
        encoder.driver_mut().sticky_faults = 0b101;
        encoder.clear_sticky_faults();
        assert_eq!(encoder.driver().sticky_faults, 0);
    }

    #[test]
    fn raw_encoder_downcasts_to_driver() {
        let encoder = CanandcoderEncoder::new(MockCanandcoder::new(9));
        let raw = encoder.raw_encoder();
        assert_eq!(raw.downcast_ref::<MockCanandcoder>().map(|d| d.can_id()), Some(9));
    }
}
