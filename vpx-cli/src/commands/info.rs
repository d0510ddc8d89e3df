//! Frame inspection command.

use clap::Args;
use console::style;
use serde::Serialize;
use std::path::PathBuf;
use vpx_vp8::{FrameHeader, Vp8Decoder, Vp8DecoderConfig, VP8_MAX_DIMENSION};

/// Per-frame information for display.
#[derive(Debug, Clone, Serialize)]
pub struct FrameInfo {
    /// File path.
    pub file: String,
    /// Frame size in bytes.
    pub size_bytes: usize,
    /// Frame type ("key" or "inter").
    #[serde(rename = "type")]
    pub frame_type: &'static str,
    /// Version number.
    pub version: u8,
    /// Show frame flag.
    pub show_frame: bool,
    /// First partition length in bytes.
    pub first_partition_len: u32,
    /// Frame width.
    pub width: u16,
    /// Frame height.
    pub height: u16,
    /// Horizontal scale.
    pub x_scale: u8,
    /// Vertical scale.
    pub y_scale: u8,
    /// Macroblocks across.
    pub mb_width: usize,
    /// Macroblocks down.
    pub mb_height: usize,
    /// Luma stride of the frame buffer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_stride: Option<usize>,
    /// Chroma stride of the frame buffer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uv_stride: Option<usize>,
    /// Error raised while decoding the frame, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FrameInfo {
    fn new(file: String, size_bytes: usize, header: &FrameHeader) -> Self {
        Self {
            file,
            size_bytes,
            frame_type: if header.key_frame { "key" } else { "inter" },
            version: header.version,
            show_frame: header.show_frame,
            first_partition_len: header.first_partition_len,
            width: header.width,
            height: header.height,
            x_scale: header.x_scale,
            y_scale: header.y_scale,
            mb_width: header.mb_width(),
            mb_height: header.mb_height(),
            y_stride: None,
            uv_stride: None,
            error: None,
        }
    }
}

/// Decode raw VP8 frames and report their headers.
#[derive(Args, Debug)]
pub struct CmdInfo {
    /// Raw VP8 frame files, decoded in order through one decoder.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Output in JSON format (one object per line).
    #[arg(long)]
    pub json: bool,

    /// Byte budget per frame (defaults to the file size).
    #[arg(long)]
    pub max_bytes: Option<usize>,

    /// Reject key frames wider than this.
    #[arg(long, default_value_t = VP8_MAX_DIMENSION)]
    pub max_width: u32,

    /// Reject key frames taller than this.
    #[arg(long, default_value_t = VP8_MAX_DIMENSION)]
    pub max_height: u32,
}

impl CmdInfo {
    /// Execute the info command.
    pub fn run(&self) -> anyhow::Result<()> {
        let frames = self
            .files
            .iter()
            .map(|path| {
                std::fs::read(path)
                    .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let mut decoder = Vp8Decoder::with_config(Vp8DecoderConfig {
            max_width: self.max_width,
            max_height: self.max_height,
        });

        let mut failures = 0usize;
        for (path, data) in self.files.iter().zip(&frames) {
            let budget = self.max_bytes.unwrap_or(data.len());
            decoder.init(&data[..], budget);

            let file = path.display().to_string();
            let header = match decoder.decode_frame_header() {
                Ok(header) => header,
                Err(e) => {
                    failures += 1;
                    self.report_error(&file, &e.to_string());
                    continue;
                }
            };

            let mut info = FrameInfo::new(file, data.len(), &header);
            match decoder.decode_frame() {
                Ok(frame) => {
                    info.y_stride = Some(frame.y_stride);
                    info.uv_stride = Some(frame.uv_stride);
                }
                Err(e) => {
                    failures += 1;
                    info.error = Some(e.to_string());
                }
            }
            self.report(&info)?;
        }

        if failures > 0 {
            anyhow::bail!("{} of {} frames failed to decode", failures, frames.len());
        }
        Ok(())
    }

    fn report(&self, info: &FrameInfo) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string(info)?);
            return Ok(());
        }

        println!("{}", style(&info.file).bold());
        println!("  Type:         {} (version {})", info.frame_type, info.version);
        println!("  Size:         {} bytes", info.size_bytes);
        println!("  Show frame:   {}", info.show_frame);
        println!("  Partition:    {} bytes", info.first_partition_len);
        println!(
            "  Dimensions:   {}x{} (scale {}/{})",
            info.width, info.height, info.x_scale, info.y_scale
        );
        println!("  Macroblocks:  {}x{}", info.mb_width, info.mb_height);
        if let (Some(y), Some(uv)) = (info.y_stride, info.uv_stride) {
            println!("  Strides:      Y {}  UV {}", y, uv);
        }
        if let Some(ref error) = info.error {
            println!("  {}        {}", style("Error:").red(), error);
        }
        Ok(())
    }

    fn report_error(&self, file: &str, message: &str) {
        if self.json {
            let error = serde_json::json!({
                "file": file,
                "error": message,
            });
            println!("{}", error);
        } else {
            println!("{}", style(file).bold());
            println!("  {}        {}", style("Error:").red(), message);
        }
    }
}
