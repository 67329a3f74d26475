//! Trait definitions for the encoder contract and its collaborators.
//!
//! # Submodules
//!
//! - `encoder`: The [`AbsoluteEncoder`] contract every backend implements
//! - `vendor`: Driver seams for the Canandcoder and SparkMax
//! - `alert`: Operator alert sink used to surface sticky faults
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`AbsoluteEncoder`] | Uniform position/velocity reads and configuration |
//! | [`CanandcoderDriver`] | Redux Canandcoder CAN driver |
//! | [`SparkMax`] / [`SparkAbsoluteEncoder`] | REV SparkMax and its data-port encoder |
//! | [`SwerveMotor`] | Motor wrapper exposing its native controller |
//! | [`AlertSink`] | Operator alerts |

pub mod alert;
pub mod encoder;
pub mod vendor;

pub use alert::*;
pub use encoder::*;
pub use vendor::*;
