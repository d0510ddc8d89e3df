//! VP8 video codec implementation.
//!
//! This crate provides the front half of a VP8 decoder: the uncompressed
//! frame header, the boolean arithmetic decoder every later symbol goes
//! through, and the frame buffer decoded pixels are written into.
//!
//! ## Features
//!
//! - Key frame and interframe headers, with geometry carried across frames
//! - Boolean arithmetic decoder with deferred end-of-partition reporting
//! - Reusable 4:2:0 frame buffer laid out on the macroblock grid
//! - Byte-budgeted input over any `std::io::Read`
//!
//! Macroblock mode and residual decoding, the loop filter and the
//! coefficient partitions build on [`Vp8Decoder::first_partition`],
//! [`Vp8Decoder::frame_buffer_mut`] and the parsed [`FrameHeader`].
//!
//! ## Example
//!
//! ```no_run
//! use vpx_vp8::Vp8Decoder;
//!
//! # fn main() -> vpx_vp8::Result<()> {
//! # let data: Vec<u8> = Vec::new();
//! let mut decoder = Vp8Decoder::new();
//! decoder.init(&data[..], data.len());
//! let header = decoder.decode_frame_header()?;
//! let frame = decoder.decode_frame()?;
//! assert_eq!(frame.width, u32::from(header.width));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod bool_decoder;
mod decoder;
pub mod error;
mod frame;
mod header;

pub use bool_decoder::{BoolDecoder, UNIFORM_PROB};
pub use decoder::{Vp8Decoder, Vp8DecoderConfig};
pub use error::{Result, Vp8Error};
pub use frame::{FrameBuffer, FrameView, PlanesMut, MB_SAMPLES};
pub use header::{
    FrameHeader, LoopFilterType, ReconstructionFilter, SequenceGeometry, VersionProfile,
    FRAME_TAG_LEN, KEY_FRAME_HEADER_LEN, VP8_MAX_DIMENSION, VP8_SYNC_CODE,
};
