//! VP8 frame decoder.
//!
//! Decoding one frame is `init`, `decode_frame_header` and then
//! `decode_frame`, in that order. A decoder is reused across frames: the
//! geometry from the last key frame, the frame buffer and the partition
//! allocation all carry over.

use std::io::Read;

use vpx_core::BoundedReader;

use crate::bool_decoder::BoolDecoder;
use crate::error::{Result, Vp8Error};
use crate::frame::{FrameBuffer, FrameView};
use crate::header::{FrameHeader, SequenceGeometry, VP8_MAX_DIMENSION};

/// VP8 decoder configuration.
#[derive(Debug, Clone)]
pub struct Vp8DecoderConfig {
    /// Maximum width accepted from a key frame.
    pub max_width: u32,
    /// Maximum height accepted from a key frame.
    pub max_height: u32,
}

impl Default for Vp8DecoderConfig {
    fn default() -> Self {
        Self {
            max_width: VP8_MAX_DIMENSION,
            max_height: VP8_MAX_DIMENSION,
        }
    }
}

/// VP8 video decoder.
pub struct Vp8Decoder<R> {
    /// Decoder configuration.
    config: Vp8DecoderConfig,
    /// Input bitstream, bound by `init`.
    reader: Option<BoundedReader<R>>,
    /// Geometry of the most recent key frame.
    geometry: SequenceGeometry,
    /// Header of the current frame, kept after `decode_frame`.
    header: Option<FrameHeader>,
    /// Set by `decode_frame_header`, cleared once `decode_frame` runs.
    header_pending: bool,
    /// First partition: frame-level headers and per-macroblock modes.
    first_partition: BoolDecoder,
    /// Color space bit of the last key frame.
    color_space: bool,
    /// Clamping type bit of the last key frame.
    clamping_required: bool,
    /// Frame storage.
    frame: FrameBuffer,
}

impl<R: Read> Vp8Decoder<R> {
    /// Create a new VP8 decoder.
    pub fn new() -> Self {
        Self::with_config(Vp8DecoderConfig::default())
    }

    /// Create a new VP8 decoder with configuration.
    pub fn with_config(config: Vp8DecoderConfig) -> Self {
        Self {
            config,
            reader: None,
            geometry: SequenceGeometry::default(),
            header: None,
            header_pending: false,
            first_partition: BoolDecoder::new(),
            color_space: false,
            clamping_required: false,
            frame: FrameBuffer::new(),
        }
    }

    /// Bind the decoder to read at most `max_bytes` bytes from `source`.
    ///
    /// No I/O happens here. Required before each frame, and after any error.
    pub fn init(&mut self, source: R, max_bytes: usize) {
        self.reader = Some(BoundedReader::new(source, max_bytes));
        self.header = None;
        self.header_pending = false;
    }

    /// Decode the frame header.
    pub fn decode_frame_header(&mut self) -> Result<FrameHeader> {
        self.header = None;
        self.header_pending = false;
        let reader = self.reader.as_mut().ok_or(Vp8Error::NotInitialized)?;

        let mut geometry = self.geometry;
        let header = FrameHeader::parse(reader, &mut geometry)?;

        if header.key_frame {
            self.check_dimensions(&header)?;
        } else if !geometry.established {
            tracing::warn!("Inter frame before any key frame, decoding with empty geometry");
        }

        tracing::debug!(
            key_frame = header.key_frame,
            version = header.version,
            show_frame = header.show_frame,
            first_partition_len = header.first_partition_len,
            width = header.width,
            height = header.height,
            "Parsed frame header"
        );

        self.geometry = geometry;
        self.header = Some(header);
        self.header_pending = true;
        Ok(header)
    }

    fn check_dimensions(&self, header: &FrameHeader) -> Result<()> {
        let (width, height) = (u32::from(header.width), u32::from(header.height));
        if width > self.config.max_width || height > self.config.max_height {
            return Err(Vp8Error::DimensionsTooLarge {
                width,
                height,
                max_width: self.config.max_width,
                max_height: self.config.max_height,
            });
        }
        Ok(())
    }

    /// Decode the frame whose header was just decoded.
    ///
    /// The returned view borrows the decoder's frame buffer and is valid
    /// until the decoder is next used.
    pub fn decode_frame(&mut self) -> Result<FrameView<'_>> {
        let header = match self.header {
            Some(header) if self.header_pending => header,
            _ => return Err(Vp8Error::MissingFrameHeader),
        };
        self.header_pending = false;

        self.frame.ensure_capacity(
            header.mb_width(),
            header.mb_height(),
            u32::from(header.width),
            u32::from(header.height),
        );

        self.parse_first_partition(&header)?;

        // Macroblock reconstruction consumes `first_partition` and writes
        // into `frame` from here.
        Ok(self.frame.view())
    }

    /// Load the first partition and read the frame-level fields at its start.
    fn parse_first_partition(&mut self, header: &FrameHeader) -> Result<()> {
        let reader = self.reader.as_mut().ok_or(Vp8Error::NotInitialized)?;

        let mut buf = self.first_partition.take_buffer();
        buf.clear();
        buf.resize(header.first_partition_len as usize, 0);
        reader.read_full(&mut buf)?;
        self.first_partition.init(buf);

        tracing::trace!(
            len = header.first_partition_len,
            "Initialized first partition"
        );

        if header.key_frame {
            // Recorded, but nothing downstream acts on them yet.
            self.color_space = self.first_partition.read_flag();
            self.clamping_required = !self.first_partition.read_flag();
        }

        // TODO: parse segmentation, loop filter and quantizer headers, then
        // initialize the coefficient partitions.
        if self.first_partition.is_exhausted() {
            return Err(Vp8Error::UnexpectedEndOfStream);
        }
        Ok(())
    }

    /// The first partition's decoder, positioned after the fields already
    /// consumed by `decode_frame`.
    pub fn first_partition(&mut self) -> &mut BoolDecoder {
        &mut self.first_partition
    }

    /// Frame storage, for reconstruction to write into.
    pub fn frame_buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }

    /// Frame storage.
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame
    }

    /// Header of the current frame.
    ///
    /// Set by a successful `decode_frame_header` and still available after
    /// `decode_frame`, until the next `init`.
    pub fn frame_header(&self) -> Option<&FrameHeader> {
        self.header.as_ref()
    }

    /// Geometry established by the most recent key frame.
    pub fn geometry(&self) -> &SequenceGeometry {
        &self.geometry
    }

    /// Color space bit of the most recent key frame (`false` is YUV).
    pub fn color_space(&self) -> bool {
        self.color_space
    }

    /// Whether the most recent key frame requires pixel clamping.
    pub fn clamping_required(&self) -> bool {
        self.clamping_required
    }

    /// Bytes left in the current frame's budget.
    pub fn remaining(&self) -> usize {
        self.reader.as_ref().map_or(0, BoundedReader::remaining)
    }

    /// Forget the stored geometry, as when starting a new stream.
    pub fn reset(&mut self) {
        self.geometry.reset();
        self.header = None;
        self.header_pending = false;
    }
}

impl<R: Read> Default for Vp8Decoder<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key_frame(partition: &[u8]) -> Vec<u8> {
        let tag = (1u32 << 4) | ((partition.len() as u32) << 5);
        let mut data = tag.to_le_bytes()[..3].to_vec();
        data.extend_from_slice(&[0x9D, 0x01, 0x2A, 0xB0, 0x00, 0x90, 0x00]);
        data.extend_from_slice(partition);
        data
    }

    #[test]
    fn test_decode_before_init() {
        let mut decoder = Vp8Decoder::<&[u8]>::new();
        assert!(matches!(decoder.decode_frame_header(), Err(Vp8Error::NotInitialized)));
    }

    #[test]
    fn test_decode_frame_requires_header() {
        let data = key_frame(&[0x00]);
        let mut decoder = Vp8Decoder::new();
        decoder.init(&data[..], data.len());
        assert!(matches!(decoder.decode_frame(), Err(Vp8Error::MissingFrameHeader)));
    }

    #[test]
    fn test_key_frame_decode() {
        let data = key_frame(&[0x00, 0x00]);
        let mut decoder = Vp8Decoder::new();
        decoder.init(&data[..], data.len());

        let header = decoder.decode_frame_header().unwrap();
        assert_eq!(header.first_partition_len, 2);

        let view = decoder.decode_frame().unwrap();
        assert_eq!((view.width, view.height), (176, 144));
        assert_eq!(view.y_stride, 176);
        assert!(!decoder.color_space());
        assert!(decoder.clamping_required());
        assert_eq!(decoder.remaining(), 0);
        assert_eq!(decoder.frame_header(), Some(&header));
    }

    #[test]
    fn test_decode_frame_runs_once_per_header() {
        let data = key_frame(&[0x00, 0x00]);
        let mut decoder = Vp8Decoder::new();
        decoder.init(&data[..], data.len());
        decoder.decode_frame_header().unwrap();
        decoder.decode_frame().unwrap();
        assert!(matches!(decoder.decode_frame(), Err(Vp8Error::MissingFrameHeader)));
        assert!(decoder.frame_header().is_some());

        decoder.init(&data[..], data.len());
        assert!(decoder.frame_header().is_none());
    }

    #[test]
    fn test_dimension_limit() {
        let data = key_frame(&[0x00]);
        let mut decoder = Vp8Decoder::with_config(Vp8DecoderConfig {
            max_width: 160,
            max_height: 4096,
        });
        decoder.init(&data[..], data.len());
        let err = decoder.decode_frame_header().unwrap_err();
        assert!(matches!(
            err,
            Vp8Error::DimensionsTooLarge {
                width: 176,
                max_width: 160,
                ..
            }
        ));
        assert!(!decoder.geometry().established);
    }

    #[test]
    fn test_consecutive_frames_share_buffer() {
        let data = key_frame(&[0x00; 8]);
        let mut decoder = Vp8Decoder::new();

        for _ in 0..3 {
            decoder.init(&data[..], data.len());
            decoder.decode_frame_header().unwrap();
            decoder.decode_frame().unwrap();
            assert_eq!(decoder.first_partition().len(), 8);
        }
        assert_eq!(decoder.frame_buffer().generation(), 1);
    }

    #[test]
    fn test_reset_forgets_geometry() {
        let data = key_frame(&[0x00]);
        let mut decoder = Vp8Decoder::new();
        decoder.init(&data[..], data.len());
        decoder.decode_frame_header().unwrap();
        assert!(decoder.geometry().established);
        decoder.reset();
        assert!(!decoder.geometry().established);
    }
}
