//! Absolute encoder contract.
//!
//! Swerve modules read steering angle from whichever absolute sensor is
//! fitted: a CAN-bus magnetic encoder, or a duty-cycle encoder plugged
//! into the steering motor controller. [`AbsoluteEncoder`] hides the
//! difference.
//!
//! # Reads never fail
//!
//! [`absolute_position`](AbsoluteEncoder::absolute_position) and
//! [`velocity`](AbsoluteEncoder::velocity) run every control cycle and
//! return a measurement unconditionally. When the vendor read fails the
//! adapter returns the last value it read successfully (`0.0` before the
//! first success) and reports [`EncoderFault::StaleReading`] until a read
//! succeeds again.
//!
//! # Writes report through return values and faults
//!
//! [`set_offset`](AbsoluteEncoder::set_offset) returns `false` when the
//! offset was not applied. Adapters that retry also raise a sticky fault,
//! visible through [`active_fault`](AbsoluteEncoder::active_fault) and the
//! alert sink the adapter was built with.
//!
//! # Example
//!
//! ```rust
//! use swerve_encoders::traits::AbsoluteEncoder;
//! use swerve_encoders::encoders::CanandcoderEncoder;
//! use swerve_encoders::hal::MockCanandcoder;
//!
//! let driver = MockCanandcoder::new(3).with_position(0.25);
//! let mut encoder: Box<dyn AbsoluteEncoder> = Box::new(CanandcoderEncoder::new(driver));
//!
//! let angle = encoder.absolute_position();
//! assert!((angle.as_degrees() - 90.0).abs() < 1e-9);
//! ```

use core::any::Any;

use crate::config::EncoderConfig;
use crate::units::{AngleMeasurement, AngularVelocityMeasurement};

/// Fault currently reported by an encoder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum EncoderFault {
    /// A construction-time configuration write ran out of attempts.
    Configuration,
    /// Storing the zero offset ran out of attempts.
    ZeroOffset,
    /// The last sensor read failed; measurements are last-known values.
    StaleReading,
}

impl EncoderFault {
    /// Returns the fault as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            EncoderFault::Configuration => "configuration",
            EncoderFault::ZeroOffset => "zero_offset",
            EncoderFault::StaleReading => "stale_reading",
        }
    }
}

/// Error building an encoder adapter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EncoderError {
    /// The motor handed to a motor-integrated encoder is the wrong controller.
    MotorTypeMismatch {
        /// Controller type the encoder lives in.
        expected: &'static str,
        /// Controller the motor wrapper actually holds.
        found: &'static str,
    },
}

impl core::fmt::Display for EncoderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            EncoderError::MotorTypeMismatch { expected, found } => write!(
                f,
                "motor given to the encoder is not a {} (found {})",
                expected, found
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncoderError {}

/// Absolute steering encoder.
///
/// Object safe: swerve modules usually hold `Box<dyn AbsoluteEncoder>`.
pub trait AbsoluteEncoder {
    /// Restores factory settings, keeping the stored zero offset.
    ///
    /// Best effort; a no-op on sensors without the capability.
    fn factory_default(&mut self);

    /// Clears latched hardware faults. Best effort.
    fn clear_sticky_faults(&mut self);

    /// Sets the counting direction.
    fn configure(&mut self, inverted: bool);

    /// Current absolute angle in the sensor's native unit.
    fn absolute_position(&mut self) -> AngleMeasurement;

    /// Current angular velocity.
    fn velocity(&mut self) -> AngularVelocityMeasurement;

    /// Stores `offset` as the sensor's zero point.
    ///
    /// Returns `true` if the sensor accepted it.
    fn set_offset(&mut self, offset: f64) -> bool;

    /// The vendor driver object, for vendor-specific calls.
    fn raw_encoder(&self) -> &dyn Any;

    /// Most severe fault currently reported, if any.
    ///
    /// Configuration faults outrank offset faults, which outrank stale
    /// readings.
    fn active_fault(&self) -> Option<EncoderFault> {
        None
    }

    /// Applies direction and, when present, the zero offset from `config`.
    ///
    /// Returns the result of [`set_offset`](Self::set_offset), or `true`
    /// when no offset is configured.
    fn apply_config(&mut self, config: &EncoderConfig) -> bool {
        self.configure(config.inverted);
        match config.zero_offset {
            Some(offset) => self.set_offset(offset),
            None => true,
        }
    }
}

impl<T: AbsoluteEncoder + ?Sized> AbsoluteEncoder for alloc::boxed::Box<T> {
    fn factory_default(&mut self) {
        (**self).factory_default()
    }

    fn clear_sticky_faults(&mut self) {
        (**self).clear_sticky_faults()
    }

    fn configure(&mut self, inverted: bool) {
        (**self).configure(inverted)
    }

    fn absolute_position(&mut self) -> AngleMeasurement {
        (**self).absolute_position()
    }

    fn velocity(&mut self) -> AngularVelocityMeasurement {
        (**self).velocity()
    }

    fn set_offset(&mut self, offset: f64) -> bool {
        (**self).set_offset(offset)
    }

    fn raw_encoder(&self) -> &dyn Any {
        (**self).raw_encoder()
    }

    fn active_fault(&self) -> Option<EncoderFault> {
        (**self).active_fault()
    }

    fn apply_config(&mut self, config: &EncoderConfig) -> bool {
        (**self).apply_config(config)
    }
}
