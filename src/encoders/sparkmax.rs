//! Duty-cycle absolute encoder on a REV SparkMax data port.
//!
//! The encoder is physically part of the steering motor controller, so the
//! adapter is built from the module's motor. Conversion factors are set at
//! construction so the controller reports degrees and degrees per second;
//! reads pass straight through.
//!
//! REV calls return a typed error and drop writes on a busy bus often
//! enough that every write with a result goes through
//! [`retry_config`](crate::retry::retry_config).

use alloc::format;
use core::any::{type_name, Any};

use crate::config::{EncoderConfig, ShortString};
use crate::encoders::LastKnown;
use crate::fault::FaultFlag;
use crate::retry::retry_config;
use crate::traits::{
    AbsoluteEncoder, AbsoluteEncoderType, AlertSeverity, AlertSink, EncoderError, EncoderFault,
    RevError, SparkAbsoluteEncoder, SparkMax, SwerveMotor,
};
use crate::units::{AngleMeasurement, AngularVelocityMeasurement};

const CONFIGURATION_FAILURE: &str = "Failure configuring SparkMax Analog Encoder";
const OFFSET_FAILURE: &str = "Failure to set Absolute Encoder Offset";

/// SparkMax data-port steering encoder.
///
/// `C` is the controller type the motor must hold; `A` is the alert sink.
///
/// # Example
///
/// ```rust
/// use swerve_encoders::encoders::SparkMaxEncoder;
/// use swerve_encoders::hal::{MockMotor, MockSparkMax, RecordingAlerts};
/// use swerve_encoders::traits::AbsoluteEncoder;
///
/// let alerts = RecordingAlerts::new();
/// let mut motor = MockMotor::spark_max(MockSparkMax::new(12));
///
/// let mut encoder = SparkMaxEncoder::<MockSparkMax, _>::new(&mut motor, 360.0, &alerts)
///     .expect("motor is a SparkMax");
///
/// assert!(encoder.set_offset(47.5));
/// assert!(!encoder.offset_fault().is_raised());
/// ```
pub struct SparkMaxEncoder<C: SparkMax, A> {
    encoder: C::AbsoluteEncoder,
    alerts: A,
    name: ShortString,
    max_attempts: u8,
    configuration_fault: FaultFlag,
    offset_fault: FaultFlag,
    last: LastKnown,
}

impl<C: SparkMax, A: AlertSink> SparkMaxEncoder<C, A> {
    /// Builds the encoder from `motor` with default settings and the given
    /// conversion factor.
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::MotorTypeMismatch`] if the motor does not
    /// hold a `C`.
    pub fn new(
        motor: &mut dyn SwerveMotor,
        conversion_factor: f64,
        alerts: A,
    ) -> Result<Self, EncoderError> {
        let config = EncoderConfig::default().with_conversion_factor(conversion_factor);
        Self::with_config(motor, alerts, &config)
    }

    /// Builds the encoder from `motor` using `config`.
    ///
    /// Writes the velocity and then the position conversion factor, each
    /// with up to `config.max_attempts` attempts. A write that never
    /// succeeds raises the configuration fault; construction still
    /// succeeds so the module stays drivable.
    ///
    /// Direction and zero offset in `config` are not applied here; use
    /// [`apply_config`](AbsoluteEncoder::apply_config).
    ///
    /// # Errors
    ///
    /// Returns [`EncoderError::MotorTypeMismatch`] if the motor does not
    /// hold a `C`.
    pub fn with_config(
        motor: &mut dyn SwerveMotor,
        alerts: A,
        config: &EncoderConfig,
    ) -> Result<Self, EncoderError> {
        let found = motor.vendor_name();
        let controller = motor.native_motor().downcast_mut::<C>().ok_or(
            EncoderError::MotorTypeMismatch {
                expected: type_name::<C>(),
                found,
            },
        )?;
        let encoder = controller.absolute_encoder(AbsoluteEncoderType::DutyCycle);

        let configuration_fault =
            FaultFlag::new(&alerts, CONFIGURATION_FAILURE, AlertSeverity::WarningTrace);
        let offset_fault = FaultFlag::new(&alerts, OFFSET_FAILURE, AlertSeverity::WarningTrace);

        let mut this = Self {
            encoder,
            alerts,
            name: config.name.clone(),
            max_attempts: config.max_attempts,
            configuration_fault,
            offset_fault,
            last: LastKnown::default(),
        };

        let factor = config.conversion_factor;
        this.configure_spark("velocity conversion factor", |e| {
            e.set_velocity_conversion_factor(factor)
        });
        this.configure_spark("position conversion factor", |e| {
            e.set_position_conversion_factor(factor)
        });

        tracing::info!(
            module = this.name.as_str(),
            conversion_factor = factor,
            configured = !this.configuration_fault.is_raised(),
            "sparkmax encoder created"
        );
        Ok(this)
    }

    /// Retries one configuration write; raises the configuration fault if
    /// every attempt fails.
    fn configure_spark<F>(&mut self, setting: &str, mut write: F) -> bool
    where
        F: FnMut(&mut C::AbsoluteEncoder) -> Result<(), RevError>,
    {
        match retry_config(self.max_attempts, || write(&mut self.encoder)) {
            Ok(attempt) => {
                tracing::debug!(module = self.name.as_str(), setting, attempt, "encoder configured");
                true
            }
            Err(exhausted) => {
                tracing::warn!(
                    module = self.name.as_str(),
                    setting,
                    %exhausted,
                    "encoder configuration failed"
                );
                let text = format!("{} ({}): {}", CONFIGURATION_FAILURE, setting, exhausted);
                self.configuration_fault
                    .raise_with_text(&self.alerts, &text);
                false
            }
        }
    }

    /// Fault raised when a conversion factor could not be written.
    #[inline]
    pub fn configuration_fault(&self) -> &FaultFlag {
        &self.configuration_fault
    }

    /// Fault raised when the zero offset could not be stored.
    #[inline]
    pub fn offset_fault(&self) -> &FaultFlag {
        &self.offset_fault
    }

    /// Lowers both fault flags and their alerts.
    pub fn clear_faults(&self) {
        self.configuration_fault.clear(&self.alerts);
        self.offset_fault.clear(&self.alerts);
    }

    /// Attempt budget for configuration writes.
    #[inline]
    pub fn max_attempts(&self) -> u8 {
        self.max_attempts
    }

    /// The data-port encoder handle.
    #[inline]
    pub fn encoder(&self) -> &C::AbsoluteEncoder {
        &self.encoder
    }

    /// Mutable access to the data-port encoder handle.
    #[inline]
    pub fn encoder_mut(&mut self) -> &mut C::AbsoluteEncoder {
        &mut self.encoder
    }
}

impl<C: SparkMax, A: AlertSink> AbsoluteEncoder for SparkMaxEncoder<C, A> {
    fn factory_default(&mut self) {
        // Not exposed for data-port encoders.
    }

    fn clear_sticky_faults(&mut self) {
        // Not exposed for data-port encoders.
    }

    fn configure(&mut self, inverted: bool) {
        self.encoder.set_inverted(inverted);
    }

    fn absolute_position(&mut self) -> AngleMeasurement {
        let read = self.encoder.position();
        AngleMeasurement::degrees(self.last.position(read))
    }

    fn velocity(&mut self) -> AngularVelocityMeasurement {
        let read = self.encoder.velocity();
        AngularVelocityMeasurement::degrees_per_second(self.last.velocity(read))
    }

    fn set_offset(&mut self, offset: f64) -> bool {
        match retry_config(self.max_attempts, || self.encoder.set_zero_offset(offset)) {
            Ok(attempt) => {
                tracing::debug!(module = self.name.as_str(), offset, attempt, "zero offset stored");
                true
            }
            Err(exhausted) => {
                let error = exhausted
                    .last_failure
                    .map(|e| e.as_str())
                    .unwrap_or(RevError::Unknown.as_str());
                tracing::warn!(
                    module = self.name.as_str(),
                    offset,
                    attempts = exhausted.attempts,
                    error,
                    "zero offset not stored"
                );
                let text = format!("{} Error: {}", OFFSET_FAILURE, error);
                self.offset_fault.raise_with_text(&self.alerts, &text);
                false
            }
        }
    }

    fn raw_encoder(&self) -> &dyn Any {
        &self.encoder
    }

    fn active_fault(&self) -> Option<EncoderFault> {
        if self.configuration_fault.is_raised() {
            Some(EncoderFault::Configuration)
        } else if self.offset_fault.is_raised() {
            Some(EncoderFault::ZeroOffset)
        } else if self.last.is_stale() {
            Some(EncoderFault::StaleReading)
        } else {
            None
        }
    }
}
