//! Operator alert interface.
//!
//! Encoders surface persistent configuration failures through an alert
//! collaborator (a dashboard, driver station console, or a recording mock
//! in tests). Adapters receive the sink at construction; nothing here is
//! global.
//!
//! # Example
//!
//! ```rust
//! use swerve_encoders::traits::{AlertSeverity, AlertSink};
//! use swerve_encoders::hal::RecordingAlerts;
//!
//! let alerts = RecordingAlerts::new();
//! let handle = alerts.create("Encoders", "Offset not applied", AlertSeverity::WarningTrace);
//! assert!(!alerts.is_active(handle));
//!
//! alerts.set(handle, true);
//! assert!(alerts.is_active(handle));
//! ```

use alloc::rc::Rc;

/// Severity of an operator alert.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AlertSeverity {
    /// Robot function is lost.
    Error,
    /// Error that should also print a stack trace where supported.
    ErrorTrace,
    /// Degraded but drivable.
    Warning,
    /// Warning that should also print a stack trace where supported.
    #[default]
    WarningTrace,
    /// Informational only.
    Info,
}

impl AlertSeverity {
    /// Returns the severity as a lowercase string.
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            AlertSeverity::Error => "error",
            AlertSeverity::ErrorTrace => "error_trace",
            AlertSeverity::Warning => "warning",
            AlertSeverity::WarningTrace => "warning_trace",
            AlertSeverity::Info => "info",
        }
    }
}

/// Opaque handle to an alert created by an [`AlertSink`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AlertHandle(u32);

impl AlertHandle {
    /// Wraps a sink-assigned identifier.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// The sink-assigned identifier.
    #[inline]
    pub const fn id(&self) -> u32 {
        self.0
    }
}

/// Alert collaborator.
///
/// Methods take `&self` so one sink can be shared by every encoder on the
/// robot; implementations use interior mutability as needed.
pub trait AlertSink {
    /// Registers a new, inactive alert.
    fn create(&self, category: &str, message: &str, severity: AlertSeverity) -> AlertHandle;

    /// Activates or deactivates an alert.
    fn set(&self, handle: AlertHandle, active: bool);

    /// Replaces the text shown for an alert.
    fn set_text(&self, handle: AlertHandle, text: &str);
}

impl<T: AlertSink + ?Sized> AlertSink for &T {
    fn create(&self, category: &str, message: &str, severity: AlertSeverity) -> AlertHandle {
        (**self).create(category, message, severity)
    }

    fn set(&self, handle: AlertHandle, active: bool) {
        (**self).set(handle, active)
    }

    fn set_text(&self, handle: AlertHandle, text: &str) {
        (**self).set_text(handle, text)
    }
}

impl<T: AlertSink + ?Sized> AlertSink for Rc<T> {
    fn create(&self, category: &str, message: &str, severity: AlertSeverity) -> AlertHandle {
        (**self).create(category, message, severity)
    }

    fn set(&self, handle: AlertHandle, active: bool) {
        (**self).set(handle, active)
    }

    fn set_text(&self, handle: AlertHandle, text: &str) {
        (**self).set_text(handle, text)
    }
}

/// Sink that drops every alert.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullAlerts;

impl AlertSink for NullAlerts {
    fn create(&self, _category: &str, _message: &str, _severity: AlertSeverity) -> AlertHandle {
        AlertHandle::new(0)
    }

    fn set(&self, _handle: AlertHandle, _active: bool) {}

    fn set_text(&self, _handle: AlertHandle, _text: &str) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct CountingSink {
        created: Cell<u32>,
        sets: Cell<u32>,
    }

    impl AlertSink for CountingSink {
        fn create(&self, _: &str, _: &str, _: AlertSeverity) -> AlertHandle {
            let id = self.created.get();
            self.created.set(id + 1);
            AlertHandle::new(id)
        }

        fn set(&self, _: AlertHandle, _: bool) {
            self.sets.set(self.sets.get() + 1);
        }

        fn set_text(&self, _: AlertHandle, _: &str) {}
    }

    #[test]
    fn severity_default_is_warning_trace() {
        assert_eq!(AlertSeverity::default(), AlertSeverity::WarningTrace);
    }

    #[test]
    fn severity_as_str() {
        assert_eq!(AlertSeverity::Error.as_str(), "error");
        assert_eq!(AlertSeverity::WarningTrace.as_str(), "warning_trace");
        assert_eq!(AlertSeverity::Info.as_str(), "info");
    }

    #[test]
    fn handle_roundtrips_id() {
        assert_eq!(AlertHandle::new(7).id(), 7);
    }

    #[test]
    fn reference_and_rc_forward_to_inner_sink() {
        let sink = CountingSink {
            created: Cell::new(0),
            sets: Cell::new(0),
        };
        let by_ref = &sink;
        let a = by_ref.create("Encoders", "a", AlertSeverity::Warning);
        by_ref.set(a, true);
        assert_eq!(sink.created.get(), 1);
        assert_eq!(sink.sets.get(), 1);

        let shared = Rc::new(CountingSink {
            created: Cell::new(10),
            sets: Cell::new(0),
        });
        let b = shared.create("Encoders", "b", AlertSeverity::Warning);
        assert_eq!(b.id(), 10);
    }

    #[test]
    fn null_alerts_accepts_everything() {
        let sink = NullAlerts;
        let h = sink.create("Encoders", "ignored", AlertSeverity::Error);
        sink.set(h, true);
        sink.set_text(h, "still ignored");
    }
}
