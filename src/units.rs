//! Unit-tagged angle and angular velocity measurements.
//!
//! Every encoder backend reports in its own native unit: the Canandcoder
//! speaks rotations, a SparkMax data-port encoder configured with a
//! conversion factor of 360 speaks degrees. Measurements carry the unit
//! they were produced in so nothing is rescaled until a caller asks for a
//! specific unit. Conversions go through [`uom`] quantities.
//!
//! # Canonical units
//!
//! Degrees for angles and degrees per second for angular velocity. Use
//! [`AngleMeasurement::as_degrees`] and
//! [`AngularVelocityMeasurement::as_degrees_per_second`] when the source
//! backend should not matter.
//!
//! # Example
//!
//! ```rust
//! use swerve_encoders::units::{AngleMeasurement, AngularVelocityMeasurement};
//!
//! let quarter = AngleMeasurement::rotations(0.25);
//! assert!((quarter.as_degrees() - 90.0).abs() < 1e-9);
//!
//! let spin = AngularVelocityMeasurement::rotations_per_second(2.0);
//! assert!((spin.as_degrees_per_second() - 720.0).abs() < 1e-9);
//! ```

use uom::si::angle::{degree, radian, revolution};
use uom::si::angular_velocity::{degree_per_second, radian_per_second, revolution_per_second};
use uom::si::f64::{Angle, AngularVelocity};

/// Native unit of an [`AngleMeasurement`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AngleUnit {
    /// Full turns; one turn is 1.0.
    Rotations,
    /// One turn is 360.0.
    Degrees,
    /// One turn is 2π.
    Radians,
}

impl AngleUnit {
    /// Magnitude of one full turn expressed in this unit.
    #[inline]
    pub const fn full_turn(&self) -> f64 {
        match self {
            AngleUnit::Rotations => 1.0,
            AngleUnit::Degrees => 360.0,
            AngleUnit::Radians => core::f64::consts::TAU,
        }
    }

    /// Short symbol used in logs and alert text.
    #[inline]
    pub const fn symbol(&self) -> &'static str {
        match self {
            AngleUnit::Rotations => "rot",
            AngleUnit::Degrees => "deg",
            AngleUnit::Radians => "rad",
        }
    }
}

/// Native unit of an [`AngularVelocityMeasurement`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AngularVelocityUnit {
    /// Full turns per second.
    RotationsPerSecond,
    /// Degrees per second (canonical).
    DegreesPerSecond,
    /// Radians per second.
    RadiansPerSecond,
}

impl AngularVelocityUnit {
    /// Short symbol used in logs and alert text.
    #[inline]
    pub const fn symbol(&self) -> &'static str {
        match self {
            AngularVelocityUnit::RotationsPerSecond => "rot/s",
            AngularVelocityUnit::DegreesPerSecond => "deg/s",
            AngularVelocityUnit::RadiansPerSecond => "rad/s",
        }
    }
}

/// An angle reading tagged with the unit it was produced in.
///
/// The stored magnitude is never rescaled; conversions happen on access.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngleMeasurement {
    value: f64,
    unit: AngleUnit,
}

impl AngleMeasurement {
    /// Creates a measurement from a raw value and its native unit.
    #[inline]
    pub const fn new(value: f64, unit: AngleUnit) -> Self {
        Self { value, unit }
    }

    /// Measurement in full rotations.
    #[inline]
    pub const fn rotations(value: f64) -> Self {
        Self::new(value, AngleUnit::Rotations)
    }

    /// Measurement in degrees.
    #[inline]
    pub const fn degrees(value: f64) -> Self {
        Self::new(value, AngleUnit::Degrees)
    }

    /// Measurement in radians.
    #[inline]
    pub const fn radians(value: f64) -> Self {
        Self::new(value, AngleUnit::Radians)
    }

    /// Raw magnitude in the native unit.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Native unit of this measurement.
    #[inline]
    pub const fn unit(&self) -> AngleUnit {
        self.unit
    }

    /// Converts to a [`uom`] angle quantity.
    pub fn as_angle(&self) -> Angle {
        match self.unit {
            AngleUnit::Rotations => Angle::new::<revolution>(self.value),
            AngleUnit::Degrees => Angle::new::<degree>(self.value),
            AngleUnit::Radians => Angle::new::<radian>(self.value),
        }
    }

    /// Value in degrees (canonical unit).
    pub fn as_degrees(&self) -> f64 {
        match self.unit {
            AngleUnit::Degrees => self.value,
            _ => self.as_angle().get::<degree>(),
        }
    }

    /// Value in full rotations.
    pub fn as_rotations(&self) -> f64 {
        match self.unit {
            AngleUnit::Rotations => self.value,
            _ => self.as_angle().get::<revolution>(),
        }
    }

    /// Value in radians.
    pub fn as_radians(&self) -> f64 {
        match self.unit {
            AngleUnit::Radians => self.value,
            _ => self.as_angle().get::<radian>(),
        }
    }

    /// Re-expresses this measurement in another unit.
    pub fn to_unit(&self, unit: AngleUnit) -> Self {
        let value = match unit {
            AngleUnit::Rotations => self.as_rotations(),
            AngleUnit::Degrees => self.as_degrees(),
            AngleUnit::Radians => self.as_radians(),
        };
        Self::new(value, unit)
    }

    /// Wraps the value into a single turn, keeping the native unit.
    ///
    /// The result lies in `[0, full_turn)`: `[0, 1)` rotations, `[0, 360)`
    /// degrees or `[0, 2π)` radians. Non-finite values are returned as-is.
    pub fn normalized(&self) -> Self {
        Self::new(wrap(self.value, self.unit.full_turn()), self.unit)
    }
}

impl Default for AngleMeasurement {
    fn default() -> Self {
        Self::degrees(0.0)
    }
}

impl From<AngleMeasurement> for Angle {
    fn from(m: AngleMeasurement) -> Self {
        m.as_angle()
    }
}

impl core::fmt::Display for AngleMeasurement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}

/// An angular velocity reading tagged with the unit it was produced in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngularVelocityMeasurement {
    value: f64,
    unit: AngularVelocityUnit,
}

impl AngularVelocityMeasurement {
    /// Creates a measurement from a raw value and its native unit.
    #[inline]
    pub const fn new(value: f64, unit: AngularVelocityUnit) -> Self {
        Self { value, unit }
    }

    /// Measurement in rotations per second.
    #[inline]
    pub const fn rotations_per_second(value: f64) -> Self {
        Self::new(value, AngularVelocityUnit::RotationsPerSecond)
    }

    /// Measurement in degrees per second.
    #[inline]
    pub const fn degrees_per_second(value: f64) -> Self {
        Self::new(value, AngularVelocityUnit::DegreesPerSecond)
    }

    /// Measurement in radians per second.
    #[inline]
    pub const fn radians_per_second(value: f64) -> Self {
        Self::new(value, AngularVelocityUnit::RadiansPerSecond)
    }

    /// Raw magnitude in the native unit.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.value
    }

    /// Native unit of this measurement.
    #[inline]
    pub const fn unit(&self) -> AngularVelocityUnit {
        self.unit
    }

    /// Converts to a [`uom`] angular velocity quantity.
    pub fn as_angular_velocity(&self) -> AngularVelocity {
        match self.unit {
            AngularVelocityUnit::RotationsPerSecond => {
                AngularVelocity::new::<revolution_per_second>(self.value)
            }
            AngularVelocityUnit::DegreesPerSecond => {
                AngularVelocity::new::<degree_per_second>(self.value)
            }
            AngularVelocityUnit::RadiansPerSecond => {
                AngularVelocity::new::<radian_per_second>(self.value)
            }
        }
    }

    /// Value in degrees per second (canonical unit).
    pub fn as_degrees_per_second(&self) -> f64 {
        match self.unit {
            AngularVelocityUnit::DegreesPerSecond => self.value,
            _ => self.as_angular_velocity().get::<degree_per_second>(),
        }
    }

    /// Value in rotations per second.
    pub fn as_rotations_per_second(&self) -> f64 {
        match self.unit {
            AngularVelocityUnit::RotationsPerSecond => self.value,
            _ => self.as_angular_velocity().get::<revolution_per_second>(),
        }
    }

    /// Value in radians per second.
    pub fn as_radians_per_second(&self) -> f64 {
        match self.unit {
            AngularVelocityUnit::RadiansPerSecond => self.value,
            _ => self.as_angular_velocity().get::<radian_per_second>(),
        }
    }
}

impl Default for AngularVelocityMeasurement {
    fn default() -> Self {
        Self::degrees_per_second(0.0)
    }
}

impl From<AngularVelocityMeasurement> for AngularVelocity {
    fn from(m: AngularVelocityMeasurement) -> Self {
        m.as_angular_velocity()
    }
}

impl core::fmt::Display for AngularVelocityMeasurement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} {}", self.value, self.unit.symbol())
    }
}

/// Wraps `value` into `[0, turn)`.
///
/// Uses `%` rather than `rem_euclid` so it stays available without `std`.
fn wrap(value: f64, turn: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let mut r = value % turn;
    if r < 0.0 {
        r += turn;
    }
    // -tiny + turn rounds up to exactly turn
    if r >= turn {
        r = 0.0;
    }
    r
}
