//! VP8 codec error types.

use thiserror::Error;

/// VP8 codec error.
#[derive(Debug, Error)]
pub enum Vp8Error {
    /// A read could not be satisfied within the frame's byte budget or the
    /// source's length. Covers raw header bytes and entropy-coded partitions.
    #[error("Unexpected end of VP8 stream")]
    UnexpectedEndOfStream,

    /// Well-delimited but non-conforming data.
    #[error("Invalid VP8 format: {0}")]
    InvalidFormat(String),

    /// Key frame larger than the configured limits.
    #[error("Frame dimensions {width}x{height} exceed maximum {max_width}x{max_height}")]
    DimensionsTooLarge {
        /// Frame width.
        width: u32,
        /// Frame height.
        height: u32,
        /// Maximum allowed width.
        max_width: u32,
        /// Maximum allowed height.
        max_height: u32,
    },

    /// Decoding was attempted before a source was bound with `init`.
    #[error("Decoder not initialized")]
    NotInitialized,

    /// `decode_frame` was called without a freshly decoded frame header.
    #[error("Frame header must be decoded before the frame")]
    MissingFrameHeader,

    /// IO error from the byte source.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Vp8Error {
    /// Check if this error means the input was cut short, as opposed to
    /// being corrupt or misused.
    pub fn is_truncation(&self) -> bool {
        matches!(self, Self::UnexpectedEndOfStream)
    }
}

impl From<vpx_core::Error> for Vp8Error {
    fn from(err: vpx_core::Error) -> Self {
        match err {
            vpx_core::Error::Bitstream(_) => Vp8Error::UnexpectedEndOfStream,
            vpx_core::Error::Io(e) => Vp8Error::Io(e),
            vpx_core::Error::Codec(msg) => Vp8Error::InvalidFormat(msg),
        }
    }
}

impl From<Vp8Error> for vpx_core::Error {
    fn from(err: Vp8Error) -> Self {
        match err {
            Vp8Error::UnexpectedEndOfStream => {
                vpx_core::Error::Bitstream(vpx_core::BitstreamError::UnexpectedEnd)
            }
            Vp8Error::Io(e) => vpx_core::Error::Io(e),
            other => vpx_core::Error::Codec(other.to_string()),
        }
    }
}

/// VP8 result type.
pub type Result<T> = std::result::Result<T, Vp8Error>;
