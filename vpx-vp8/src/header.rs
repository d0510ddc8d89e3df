//! VP8 uncompressed frame header parsing.
//!
//! Every frame starts with a 3-byte frame tag. Key frames follow it with a
//! 3-byte sync code and two 16-bit dimension fields:
//!
//! ```text
//! byte 0..3  frame tag (little endian)
//!            bit 0       inverted key frame flag (0 = key frame)
//!            bits 1-3    version
//!            bit 4       show frame
//!            bits 5-23   first partition length
//! byte 3..6  sync code 9d 01 2a           (key frames only)
//! byte 6..8  width  | horizontal scale << 14
//! byte 8..10 height | vertical scale << 14
//! ```

use std::io::Read;

use vpx_core::BoundedReader;

use crate::error::{Result, Vp8Error};

/// Key frame sync code.
pub const VP8_SYNC_CODE: [u8; 3] = [0x9D, 0x01, 0x2A];

/// Length of the frame tag common to all frames.
pub const FRAME_TAG_LEN: usize = 3;

/// Length of the key frame extension following the frame tag.
pub const KEY_FRAME_HEADER_LEN: usize = 7;

/// Largest width or height a key frame can carry.
pub const VP8_MAX_DIMENSION: u32 = 0x3FFF;

/// Reconstruction and loop filter variants selected by the version number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionProfile {
    /// Reconstruction filter used for motion compensation.
    pub reconstruction_filter: ReconstructionFilter,
    /// Loop filter type.
    pub loop_filter: LoopFilterType,
}

/// Motion compensation interpolation filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconstructionFilter {
    /// Six-tap bicubic filter.
    Bicubic,
    /// Bilinear filter.
    Bilinear,
    /// Full-pixel motion vectors only.
    None,
}

/// Loop filter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopFilterType {
    /// Normal loop filter.
    Normal,
    /// Simple loop filter.
    Simple,
    /// No loop filter.
    None,
}

/// Parsed VP8 frame header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameHeader {
    /// Key frame (intra-only, carries dimensions).
    pub key_frame: bool,
    /// Version number (0-7).
    pub version: u8,
    /// Whether the frame is meant to be displayed.
    pub show_frame: bool,
    /// Size in bytes of the first partition.
    pub first_partition_len: u32,
    /// Frame width in pixels.
    pub width: u16,
    /// Frame height in pixels.
    pub height: u16,
    /// Horizontal upscaling hint (0-3).
    pub x_scale: u8,
    /// Vertical upscaling hint (0-3).
    pub y_scale: u8,
}

impl FrameHeader {
    /// Parse a frame header from `reader`.
    ///
    /// Key frames update `geometry`; other frames take their dimensions from
    /// it. `geometry` is left untouched when parsing fails.
    pub fn parse<R: Read>(
        reader: &mut BoundedReader<R>,
        geometry: &mut SequenceGeometry,
    ) -> Result<Self> {
        let mut tag = [0u8; FRAME_TAG_LEN];
        reader.read_full(&mut tag)?;
        let mut header = Self::from_tag(tag);

        if !header.key_frame {
            header.apply_geometry(geometry);
            return Ok(header);
        }

        let mut ext = [0u8; KEY_FRAME_HEADER_LEN];
        reader.read_full(&mut ext)?;
        header.parse_key_frame_ext(&ext)?;

        geometry.update(&header);
        Ok(header)
    }

    /// Decode the 3-byte frame tag. Dimensions are left at zero.
    pub fn from_tag(tag: [u8; FRAME_TAG_LEN]) -> Self {
        let raw = u32::from_le_bytes([tag[0], tag[1], tag[2], 0]);
        Self {
            key_frame: raw & 1 == 0,
            version: ((raw >> 1) & 7) as u8,
            show_frame: (raw >> 4) & 1 != 0,
            first_partition_len: raw >> 5,
            ..Self::default()
        }
    }

    fn parse_key_frame_ext(&mut self, ext: &[u8; KEY_FRAME_HEADER_LEN]) -> Result<()> {
        if ext[..3] != VP8_SYNC_CODE {
            return Err(Vp8Error::InvalidFormat(format!(
                "bad sync code {:02x} {:02x} {:02x}",
                ext[0], ext[1], ext[2]
            )));
        }

        let width = u16::from_le_bytes([ext[3], ext[4]]);
        let height = u16::from_le_bytes([ext[5], ext[6]]);

        self.width = width & 0x3FFF;
        self.x_scale = (width >> 14) as u8;
        self.height = height & 0x3FFF;
        self.y_scale = (height >> 14) as u8;
        Ok(())
    }

    fn apply_geometry(&mut self, geometry: &SequenceGeometry) {
        self.width = geometry.width;
        self.height = geometry.height;
        self.x_scale = geometry.x_scale;
        self.y_scale = geometry.y_scale;
    }

    /// Number of 16x16 macroblocks across the frame.
    pub fn mb_width(&self) -> usize {
        (self.width as usize).div_ceil(16)
    }

    /// Number of 16x16 macroblocks down the frame.
    pub fn mb_height(&self) -> usize {
        (self.height as usize).div_ceil(16)
    }

    /// Bytes taken by the uncompressed header of this frame.
    pub fn header_len(&self) -> usize {
        if self.key_frame {
            FRAME_TAG_LEN + KEY_FRAME_HEADER_LEN
        } else {
            FRAME_TAG_LEN
        }
    }

    /// Filters implied by the version number, `None` for reserved versions.
    pub fn version_profile(&self) -> Option<VersionProfile> {
        let (reconstruction_filter, loop_filter) = match self.version {
            0 => (ReconstructionFilter::Bicubic, LoopFilterType::Normal),
            1 => (ReconstructionFilter::Bilinear, LoopFilterType::Simple),
            2 => (ReconstructionFilter::Bilinear, LoopFilterType::None),
            3 => (ReconstructionFilter::None, LoopFilterType::None),
            _ => return None,
        };
        Some(VersionProfile {
            reconstruction_filter,
            loop_filter,
        })
    }
}

/// Frame geometry established by the most recent key frame.
///
/// Lives for the whole sequence, while [`FrameHeader`] is per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SequenceGeometry {
    /// Frame width in pixels.
    pub width: u16,
    /// Frame height in pixels.
    pub height: u16,
    /// Horizontal upscaling hint.
    pub x_scale: u8,
    /// Vertical upscaling hint.
    pub y_scale: u8,
    /// Whether any key frame has been seen.
    pub established: bool,
}

impl SequenceGeometry {
    fn update(&mut self, header: &FrameHeader) {
        *self = Self {
            width: header.width,
            height: header.height,
            x_scale: header.x_scale,
            y_scale: header.y_scale,
            established: true,
        };
    }

    /// Forget the stored geometry.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
