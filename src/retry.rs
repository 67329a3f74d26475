//! Bounded retry for configuration writes.
//!
//! Encoder configuration happens during startup and module calibration,
//! where a handful of extra bus round-trips is acceptable. Each write is
//! repeated until the native driver reports success or the attempt budget
//! is spent. There is no delay between attempts; the bound is the timeout.
//!
//! Vendor drivers disagree on how they report success: some return `bool`,
//! some a typed error enum, some nothing at all. [`ConfigOutcome`]
//! classifies each of those so one loop serves every backend.
//!
//! # Example
//!
//! ```rust
//! use swerve_encoders::retry::{retry, retry_config};
//!
//! let mut calls = 0;
//! assert!(retry(4, || {
//!     calls += 1;
//!     calls == 4
//! }));
//! assert_eq!(calls, 4);
//!
//! let exhausted = retry_config(3, || Err::<(), _>("timeout")).unwrap_err();
//! assert_eq!(exhausted.attempts, 3);
//! assert_eq!(exhausted.last_failure, Some("timeout"));
//! ```

/// Default number of attempts for every configuration write.
pub const MAX_CONFIG_ATTEMPTS: u8 = 5;

/// Classifies the native result of one configuration attempt.
pub trait ConfigOutcome {
    /// Detail carried by a failed attempt.
    type Failure;

    /// Returns `Ok(())` if the attempt succeeded.
    ///
    /// `Err(None)` means the attempt failed without saying why.
    fn into_outcome(self) -> Result<(), Option<Self::Failure>>;
}

impl ConfigOutcome for bool {
    type Failure = core::convert::Infallible;

    fn into_outcome(self) -> Result<(), Option<Self::Failure>> {
        if self {
            Ok(())
        } else {
            Err(None)
        }
    }
}

impl<T, E> ConfigOutcome for Result<T, E> {
    type Failure = E;

    fn into_outcome(self) -> Result<(), Option<E>> {
        self.map(|_| ()).map_err(Some)
    }
}

/// A call that reports nothing can only be assumed to have worked.
impl ConfigOutcome for () {
    type Failure = core::convert::Infallible;

    fn into_outcome(self) -> Result<(), Option<Self::Failure>> {
        Ok(())
    }
}

/// Returned when every attempt of a configuration write failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RetryExhausted<F> {
    /// Number of attempts made.
    pub attempts: u8,
    /// Last distinguishable native failure, if any attempt produced one.
    pub last_failure: Option<F>,
}

impl<F: core::fmt::Display> core::fmt::Display for RetryExhausted<F> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match &self.last_failure {
            Some(failure) => write!(f, "{} after {} attempts", failure, self.attempts),
            None => write!(f, "no success after {} attempts", self.attempts),
        }
    }
}

/// Runs `action` up to `attempts` times, stopping at the first `true`.
///
/// Returns `false` when the budget is exhausted, including when
/// `attempts` is zero (no call is made).
pub fn retry(attempts: u8, mut action: impl FnMut() -> bool) -> bool {
    (0..attempts).any(|_| action())
}

/// Runs `action` up to `attempts` times, stopping at the first success.
///
/// On success returns the 1-based attempt that succeeded. On exhaustion
/// returns the attempt count and the last native failure observed. A
/// failure without detail does not overwrite an earlier detailed one.
pub fn retry_config<O: ConfigOutcome>(
    attempts: u8,
    mut action: impl FnMut() -> O,
) -> Result<u8, RetryExhausted<O::Failure>> {
    let mut last_failure = None;
    for attempt in 1..=attempts {
        match action().into_outcome() {
            Ok(()) => return Ok(attempt),
            Err(failure) => {
                tracing::trace!(attempt, attempts, "configuration attempt failed");
                if failure.is_some() {
                    last_failure = failure;
                }
            }
        }
    }
    Err(RetryExhausted {
        attempts,
        last_failure,
    })
}
