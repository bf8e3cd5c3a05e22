//! Crate error type

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// No storage backend is reachable (no window, storage disabled by the browser)
    StorageUnavailable,
    /// The backend refused a write (quota, private mode)
    StorageWrite { key: String, reason: String },
    /// Tuning overrides could not be parsed
    InvalidTuning(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StorageUnavailable => write!(f, "storage unavailable"),
            Self::StorageWrite { key, reason } => {
                write!(f, "failed to write storage key {key:?}: {reason}")
            }
            Self::InvalidTuning(reason) => write!(f, "invalid tuning overrides: {reason}"),
        }
    }
}

impl std::error::Error for Error {}
