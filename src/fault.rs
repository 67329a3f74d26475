//! Sticky configuration fault flags.
//!
//! A [`FaultFlag`] is raised when a configuration write runs out of
//! attempts. It stays raised until something outside the encoder clears
//! it, and mirrors its state onto one alert created through the adapter's
//! [`AlertSink`].

use core::sync::atomic::{AtomicBool, Ordering};

use heapless::String as HString;

use crate::traits::{AlertHandle, AlertSeverity, AlertSink};

/// Maximum length of fault text.
pub const MAX_FAULT_TEXT: usize = 128;

/// Bounded fault description.
pub type FaultText = HString<MAX_FAULT_TEXT>;

/// Alert category shared by every encoder fault.
pub const ENCODER_ALERT_CATEGORY: &str = "Encoders";

/// Create a FaultText from a &str, truncating on a char boundary if too long
pub fn fault_text(s: &str) -> FaultText {
    let mut hs = FaultText::new();
    let take = s.len().min(MAX_FAULT_TEXT);
    let valid_end = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

/// Sticky fault bound to an operator alert.
#[derive(Debug)]
pub struct FaultFlag {
    alert: AlertHandle,
    raised: AtomicBool,
    text: FaultText,
}

impl FaultFlag {
    /// Registers the backing alert and returns a lowered flag.
    pub fn new<A: AlertSink>(alerts: &A, message: &str, severity: AlertSeverity) -> Self {
        let text = fault_text(message);
        let alert = alerts.create(ENCODER_ALERT_CATEGORY, &text, severity);
        Self {
            alert,
            raised: AtomicBool::new(false),
            text,
        }
    }

    /// Whether the flag is currently raised.
    #[inline]
    pub fn is_raised(&self) -> bool {
        self.raised.load(Ordering::Acquire)
    }

    /// Current description.
    #[inline]
    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Handle of the backing alert.
    #[inline]
    pub fn alert(&self) -> AlertHandle {
        self.alert
    }

    /// Raises the flag, keeping the current text.
    pub fn raise<A: AlertSink>(&self, alerts: &A) {
        self.raised.store(true, Ordering::Release);
        alerts.set(self.alert, true);
    }

    /// Replaces the text and raises the flag.
    pub fn raise_with_text<A: AlertSink>(&mut self, alerts: &A, text: &str) {
        self.text = fault_text(text);
        alerts.set_text(self.alert, &self.text);
        self.raise(alerts);
    }

    /// Lowers the flag and deactivates its alert.
    pub fn clear<A: AlertSink>(&self, alerts: &A) {
        self.raised.store(false, Ordering::Release);
        alerts.set(self.alert, false);
    }
}
