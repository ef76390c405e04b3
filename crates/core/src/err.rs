//! Error types and utilities.

#[derive(thiserror::Error, Debug)]
/// Represents an error that can occur in this crate.
pub enum Error {
    /// An I/O error occurred.
    #[error("i/o error {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid timestamp {0:?}, expected YYYY-MM-DD HH:MM:SS[.fraction]")]
    InvalidTimestamp(String),

    #[error("invalid time range {0:?}, expected YYYY-MM-DD HH:MM:SS[+|-|~]<number><unit>")]
    InvalidRange(String),
}

/// A specialized [Result] type for this crate's operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;
