//! Encoder configuration.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`.
//!
//! # Example
//!
//! ```rust
//! use swerve_encoders::config::EncoderConfig;
//!
//! // Use defaults
//! let config = EncoderConfig::default();
//! assert_eq!(config.max_attempts, 5);
//!
//! // Or customize
//! let config = EncoderConfig::default()
//!     .with_name("front_left")
//!     .with_inverted(true)
//!     .with_zero_offset(47.5)
//!     .with_max_attempts(3);
//! assert_eq!(config.name.as_str(), "front_left");
//! ```

use heapless::String as HString;

use crate::retry::MAX_CONFIG_ATTEMPTS;

/// Maximum length for short config strings (module names)
pub const MAX_SHORT_STRING: usize = 32;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Conversion factor that makes a SparkMax data-port encoder report degrees.
pub const DEGREES_CONVERSION_FACTOR: f64 = 360.0;

/// Create a ShortString from a &str, truncating on a char boundary if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    let take = s.len().min(MAX_SHORT_STRING);
    let valid_end = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

/// Per-encoder configuration
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EncoderConfig {
    /// Module name used in log output (e.g., "front_left")
    pub name: ShortString,
    /// Attempts per configuration write before raising a fault
    pub max_attempts: u8,
    /// Whether the sensor counts in the reverse direction
    pub inverted: bool,
    /// Zero offset to store in the sensor, in its native position unit
    pub zero_offset: Option<f64>,
    /// Position/velocity scale for encoders that support one
    pub conversion_factor: f64,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            name: short_string("encoder"),
            max_attempts: MAX_CONFIG_ATTEMPTS,
            inverted: false,
            zero_offset: None,
            conversion_factor: DEGREES_CONVERSION_FACTOR,
        }
    }
}

impl EncoderConfig {
    /// Set the module name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Set the attempt budget for configuration writes
    pub fn with_max_attempts(mut self, attempts: u8) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set direction inversion
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Set the zero offset to apply
    pub fn with_zero_offset(mut self, offset: f64) -> Self {
        self.zero_offset = Some(offset);
        self
    }

    /// Set the conversion factor
    pub fn with_conversion_factor(mut self, factor: f64) -> Self {
        self.conversion_factor = factor;
        self
    }
}
