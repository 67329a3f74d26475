//! Hardware Abstraction Layer implementations.
//!
//! This module contains test doubles for the vendor driver traits and the
//! alert collaborator defined in [`crate::traits`]. Real vendor bindings
//! implement the same traits outside this crate.
//!
//! # Available Implementations
//!
//! - `mock`: Test implementations for desktop development

pub mod mock;

pub use mock::*;
