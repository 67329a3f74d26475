//! Absolute encoder backends.
//!
//! One adapter per vendor sensor, each implementing
//! [`AbsoluteEncoder`](crate::traits::AbsoluteEncoder) on top of a driver
//! trait from [`crate::traits::vendor`].
//!
//! | Adapter | Sensor | Native units |
//! |---------|--------|--------------|
//! | [`CanandcoderEncoder`] | Redux Canandcoder (CAN) | rotations, rotations/s |
//! | [`SparkMaxEncoder`] | Duty-cycle encoder on a SparkMax data port | degrees, degrees/s |

mod canandcoder;
mod sparkmax;

pub use canandcoder::CanandcoderEncoder;
pub use sparkmax::SparkMaxEncoder;

/// Last successful readings, substituted when a sensor read fails.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LastKnown {
    position: f64,
    velocity: f64,
    position_stale: bool,
    velocity_stale: bool,
}

impl LastKnown {
    /// Stores a fresh position or returns the previous one.
    pub(crate) fn position<E: core::fmt::Debug>(&mut self, read: Result<f64, E>) -> f64 {
        match read {
            Ok(value) => {
                self.position = value;
                self.position_stale = false;
            }
            Err(e) => {
                tracing::debug!(error = ?e, last = self.position, "position read failed");
                self.position_stale = true;
            }
        }
        self.position
    }

    /// Stores a fresh velocity or returns the previous one.
    pub(crate) fn velocity<E: core::fmt::Debug>(&mut self, read: Result<f64, E>) -> f64 {
        match read {
            Ok(value) => {
                self.velocity = value;
                self.velocity_stale = false;
            }
            Err(e) => {
                tracing::debug!(error = ?e, last = self.velocity, "velocity read failed");
                self.velocity_stale = true;
            }
        }
        self.velocity
    }

    /// Whether the most recent position or velocity read failed.
    pub(crate) fn is_stale(&self) -> bool {
        self.position_stale || self.velocity_stale
    }
}
