use core::fmt;

/// Result type for timer operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors returned from timer operations.
///
/// `NotActive` and `TimeExpired` are the ordinary outcomes of polling a timer,
/// see [`Error::is_fault`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// An argument or configuration value is invalid.
    InvalidParameter,
    /// The timer is not initialized.
    InvalidHandle,
    /// The operation is not allowed in the current timer state.
    Denied,
    /// The timer is not running.
    NotActive,
    /// The timer interval has elapsed.
    TimeExpired,
    /// The tick source is not running.
    NotAvailable,
    /// The tick source failed to read the counter.
    Io,
}

impl Error {
    /// Get whether the error is a fault rather than an expected polling outcome.
    pub fn is_fault(&self) -> bool {
        !matches!(self, Error::NotActive | Error::TimeExpired)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidParameter => write!(f, "invalid parameter"),
            Error::InvalidHandle => write!(f, "timer not initialized"),
            Error::Denied => write!(f, "operation not allowed in timer state"),
            Error::NotActive => write!(f, "timer is inactive"),
            Error::TimeExpired => write!(f, "timer expired"),
            Error::NotAvailable => write!(f, "tick source not available"),
            Error::Io => write!(f, "tick source hardware error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Errors reported by a [`TickSource`](crate::TickSource).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SourceError {
    /// The counter has not been started.
    NotAvailable,
    /// The counter could not be read.
    Io,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::NotAvailable => write!(f, "tick source not available"),
            SourceError::Io => write!(f, "tick source hardware error"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SourceError {}

impl From<SourceError> for Error {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotAvailable => Error::NotAvailable,
            SourceError::Io => Error::Io,
        }
    }
}
