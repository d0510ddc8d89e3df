//! Error types shared by the vpx decoder crates.
//!
//! Codec crates define their own error enums and convert to and from
//! [`Error`] at crate boundaries.

use thiserror::Error;

/// Main error type for the vpx crates.
#[derive(Error, Debug)]
pub enum Error {
    /// Bitstream reading errors.
    #[error("Bitstream error: {0}")]
    Bitstream(#[from] BitstreamError),

    /// I/O errors raised by the underlying byte source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Codec-specific failure, carried as text across crate boundaries.
    #[error("Codec error: {0}")]
    Codec(String),
}

/// Errors raised while pulling bytes out of a bounded source.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BitstreamError {
    /// The source ran dry before the requested bytes arrived.
    #[error("Unexpected end of bitstream")]
    UnexpectedEnd,

    /// The request is larger than what is left of the byte budget.
    #[error("Read of {requested} bytes exceeds remaining budget of {remaining} bytes")]
    BudgetExceeded {
        /// Bytes requested by the caller.
        requested: usize,
        /// Bytes left in the budget.
        remaining: usize,
    },
}

impl Error {
    /// Returns true when the error means the input was shorter than needed.
    pub fn is_unexpected_end(&self) -> bool {
        matches!(self, Error::Bitstream(_))
    }
}

/// Result type alias using the vpx error type.
pub type Result<T> = std::result::Result<T, Error>;
