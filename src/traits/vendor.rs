//! Vendor driver seams.
//!
//! The encoder adapters never talk to a bus directly. They call into these
//! traits, which a vendor binding (or a mock from [`crate::hal::mock`])
//! implements. Each trait keeps the vendor's own success idiom:
//!
//! | Trait | Writes report | Reads report |
//! |-------|---------------|--------------|
//! | [`CanandcoderDriver`] | `bool` | `Result<f64, Self::Error>` |
//! | [`SparkAbsoluteEncoder`] | `Result<(), RevError>` | `Result<f64, RevError>` |
//!
//! Inversion on the SparkMax encoder reports nothing at all.

use core::any::Any;

// ============================================================================
// Redux Canandcoder
// ============================================================================

/// Settings write for a Canandcoder.
///
/// Only fields that are `Some` are sent; the rest of the device
/// configuration is left untouched.
///
/// # Example
///
/// ```rust
/// use swerve_encoders::traits::CanandcoderSettings;
///
/// let settings = CanandcoderSettings::new().with_invert_direction(true);
/// assert_eq!(settings.invert_direction, Some(true));
/// assert_eq!(settings.zero_offset, None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CanandcoderSettings {
    /// Reverse the counting direction.
    pub invert_direction: Option<bool>,
    /// Raw position, in rotations, that reads as zero.
    pub zero_offset: Option<f64>,
}

impl CanandcoderSettings {
    /// Creates an empty settings write.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set direction inversion
    pub fn with_invert_direction(mut self, inverted: bool) -> Self {
        self.invert_direction = Some(inverted);
        self
    }

    /// Set zero offset
    pub fn with_zero_offset(mut self, offset: f64) -> Self {
        self.zero_offset = Some(offset);
        self
    }
}

/// Driver for a Redux Canandcoder on the CAN bus.
pub trait CanandcoderDriver {
    /// Error type for sensor reads.
    type Error: core::fmt::Debug;

    /// CAN identifier the device was bound to.
    fn can_id(&self) -> u8;

    /// Restores factory settings.
    ///
    /// When `clear_zero_offset` is false the stored zero offset survives.
    fn reset_factory_defaults(&mut self, clear_zero_offset: bool) -> bool;

    /// Clears latched device faults.
    fn clear_sticky_faults(&mut self);

    /// Applies a settings write. Returns `true` if the device acknowledged it.
    fn set_settings(&mut self, settings: &CanandcoderSettings) -> bool;

    /// Absolute position in rotations, `[0, 1)`.
    fn abs_position(&mut self) -> Result<f64, Self::Error>;

    /// Velocity in rotations per second.
    fn velocity(&mut self) -> Result<f64, Self::Error>;
}

// ============================================================================
// REV SparkMax
// ============================================================================

/// Error codes returned by REV motor controller calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevError {
    /// Generic failure.
    Error,
    /// No response before the CAN timeout.
    Timeout,
    /// Parameter id does not exist.
    ParamInvalidId,
    /// Parameter value has the wrong type.
    ParamMismatchType,
    /// Parameter is read-only.
    ParamAccessMode,
    /// Parameter value out of range.
    ParamInvalid,
    /// Invalid request.
    Invalid,
    /// Device dropped off the bus.
    CanDisconnected,
    /// Data port is already in use for another sensor.
    DataPortAlreadyConfiguredDifferently,
    /// HAL call failed.
    HalError,
    /// Unclassified failure.
    Unknown,
}

impl RevError {
    /// Vendor name of the error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            RevError::Error => "kError",
            RevError::Timeout => "kTimeout",
            RevError::ParamInvalidId => "kParamInvalidID",
            RevError::ParamMismatchType => "kParamMismatchType",
            RevError::ParamAccessMode => "kParamAccessMode",
            RevError::ParamInvalid => "kParamInvalid",
            RevError::Invalid => "kInvalid",
            RevError::CanDisconnected => "kCANDisconnected",
            RevError::DataPortAlreadyConfiguredDifferently => {
                "kSparkMaxDataPortAlreadyConfiguredDifferently"
            }
            RevError::HalError => "kHALError",
            RevError::Unknown => "kUnknown",
        }
    }
}

impl core::fmt::Display for RevError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which absolute sensor on the data port to open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AbsoluteEncoderType {
    /// PWM duty-cycle absolute encoder (e.g. REV Through Bore).
    #[default]
    DutyCycle,
}

/// Absolute encoder attached to a SparkMax data port.
pub trait SparkAbsoluteEncoder {
    /// Scale applied to velocity readings.
    fn set_velocity_conversion_factor(&mut self, factor: f64) -> Result<(), RevError>;

    /// Scale applied to position readings.
    fn set_position_conversion_factor(&mut self, factor: f64) -> Result<(), RevError>;

    /// Reverse the sensor phase.
    fn set_inverted(&mut self, inverted: bool);

    /// Stores the zero offset in controller memory, in converted units.
    fn set_zero_offset(&mut self, offset: f64) -> Result<(), RevError>;

    /// Position after the conversion factor is applied.
    fn position(&mut self) -> Result<f64, RevError>;

    /// Velocity after the conversion factor is applied.
    fn velocity(&mut self) -> Result<f64, RevError>;
}

/// SparkMax motor controller.
pub trait SparkMax: Any {
    /// Handle type returned for the data port encoder.
    type AbsoluteEncoder: SparkAbsoluteEncoder + 'static;

    /// Opens the absolute encoder on the data port.
    fn absolute_encoder(&mut self, kind: AbsoluteEncoderType) -> Self::AbsoluteEncoder;
}

// ============================================================================
// Motor abstraction
// ============================================================================

/// Motor wrapper owned by a swerve module.
///
/// Encoders that live inside a motor controller are built from this. The
/// native object is type-erased; consumers downcast to the controller type
/// they require.
pub trait SwerveMotor {
    /// The vendor controller object.
    fn native_motor(&mut self) -> &mut dyn Any;

    /// Human-readable controller name, used in error messages.
    fn vendor_name(&self) -> &'static str;
}
