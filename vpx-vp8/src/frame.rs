//! VP8 frame buffer.
//!
//! VP8 always uses 4:2:0 chroma subsampling, so each macroblock holds 16x16
//! luma samples and two 8x8 chroma blocks. The buffer is one allocation
//! carved into Y, U and V planes laid out on the macroblock grid; the
//! display rectangle may be smaller than the grid.

/// Luma samples per macroblock.
pub const MB_LUMA_SAMPLES: usize = 16 * 16;

/// Samples per chroma block of a macroblock.
pub const MB_CHROMA_SAMPLES: usize = 8 * 8;

/// Samples per macroblock across all three planes.
pub const MB_SAMPLES: usize = MB_LUMA_SAMPLES + 2 * MB_CHROMA_SAMPLES;

/// Plane offsets and strides for one macroblock grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct PlaneLayout {
    /// Macroblocks across.
    mb_width: usize,
    /// Macroblocks down.
    mb_height: usize,
}

impl PlaneLayout {
    fn mb_count(&self) -> usize {
        self.mb_width * self.mb_height
    }

    fn luma_len(&self) -> usize {
        self.mb_count() * MB_LUMA_SAMPLES
    }

    fn chroma_len(&self) -> usize {
        self.mb_count() * MB_CHROMA_SAMPLES
    }

    fn total_len(&self) -> usize {
        self.mb_count() * MB_SAMPLES
    }

    fn covers(&self, mb_width: usize, mb_height: usize) -> bool {
        self.mb_width >= mb_width && self.mb_height >= mb_height
    }
}

/// Reusable planar YUV 4:2:0 buffer for decoded frames.
///
/// The buffer only ever grows. Callers get borrowed views that live until
/// the decoder is next used mutably.
#[derive(Debug, Clone, Default)]
pub struct FrameBuffer {
    /// Backing storage for all three planes: Y, then U, then V.
    data: Vec<u8>,
    /// Macroblock grid the storage is laid out for.
    layout: PlaneLayout,
    /// Display width.
    width: u32,
    /// Display height.
    height: u32,
    /// Bumped on every reallocation.
    generation: u64,
}

impl FrameBuffer {
    /// Create an empty frame buffer. Nothing is allocated yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make sure the buffer covers an `mb_width` x `mb_height` macroblock
    /// grid and set the display rectangle to `width` x `height`.
    ///
    /// Returns `true` if the storage was reallocated. The new grid is the
    /// larger of the old and requested grid on each axis, so the buffer never
    /// shrinks.
    pub fn ensure_capacity(
        &mut self,
        mb_width: usize,
        mb_height: usize,
        width: u32,
        height: u32,
    ) -> bool {
        self.width = width;
        self.height = height;

        if self.layout.covers(mb_width, mb_height) {
            return false;
        }

        let layout = PlaneLayout {
            mb_width: self.layout.mb_width.max(mb_width),
            mb_height: self.layout.mb_height.max(mb_height),
        };

        tracing::debug!(
            mb_width = layout.mb_width,
            mb_height = layout.mb_height,
            bytes = layout.total_len(),
            "Reallocating frame buffer"
        );

        // Storage and layout are swapped together so plane views always
        // match the grid they were carved for.
        self.data = vec![0u8; layout.total_len()];
        self.layout = layout;
        self.generation += 1;
        true
    }

    /// Macroblocks across the allocated grid.
    pub fn mb_width(&self) -> usize {
        self.layout.mb_width
    }

    /// Macroblocks down the allocated grid.
    pub fn mb_height(&self) -> usize {
        self.layout.mb_height
    }

    /// Number of reallocations so far. Unchanged generation means the
    /// storage has not moved.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Luma stride in bytes.
    pub fn y_stride(&self) -> usize {
        self.layout.mb_width * 16
    }

    /// Chroma stride in bytes.
    pub fn uv_stride(&self) -> usize {
        self.layout.mb_width * 8
    }

    /// Total allocated bytes across all planes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Borrow the planes for reading.
    pub fn view(&self) -> FrameView<'_> {
        let luma = self.layout.luma_len();
        let chroma = self.layout.chroma_len();
        let (y, rest) = self.data.split_at(luma);
        let (u, v) = rest.split_at(chroma);
        FrameView {
            y,
            u,
            v,
            y_stride: self.y_stride(),
            uv_stride: self.uv_stride(),
            width: self.width,
            height: self.height,
        }
    }

    /// Borrow the planes for writing, as reconstruction does.
    pub fn planes_mut(&mut self) -> PlanesMut<'_> {
        let luma = self.layout.luma_len();
        let chroma = self.layout.chroma_len();
        let y_stride = self.y_stride();
        let uv_stride = self.uv_stride();
        let (y, rest) = self.data.split_at_mut(luma);
        let (u, v) = rest.split_at_mut(chroma);
        PlanesMut {
            y,
            u,
            v,
            y_stride,
            uv_stride,
        }
    }
}

/// Read-only view of a decoded frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    /// Y plane (luma).
    pub y: &'a [u8],
    /// U plane (chroma Cb).
    pub u: &'a [u8],
    /// V plane (chroma Cr).
    pub v: &'a [u8],
    /// Y plane stride.
    pub y_stride: usize,
    /// UV plane stride.
    pub uv_stride: usize,
    /// Display width.
    pub width: u32,
    /// Display height.
    pub height: u32,
}

impl FrameView<'_> {
    /// Get pixel at (x, y) in Y plane.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the plane's allocated rows.
    pub fn get_y(&self, x: usize, y: usize) -> u8 {
        self.y[y * self.y_stride + x]
    }

    /// Get pixel at (x, y) in U plane.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the plane's allocated rows.
    pub fn get_u(&self, x: usize, y: usize) -> u8 {
        self.u[y * self.uv_stride + x]
    }

    /// Get pixel at (x, y) in V plane.
    ///
    /// # Panics
    ///
    /// Panics if (x, y) lies outside the plane's allocated rows.
    pub fn get_v(&self, x: usize, y: usize) -> u8 {
        self.v[y * self.uv_stride + x]
    }

    /// Whether the view has no display area.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Mutable plane access for reconstruction.
#[derive(Debug)]
pub struct PlanesMut<'a> {
    /// Y plane (luma).
    pub y: &'a mut [u8],
    /// U plane (chroma Cb).
    pub u: &'a mut [u8],
    /// V plane (chroma Cr).
    pub v: &'a mut [u8],
    /// Y plane stride.
    pub y_stride: usize,
    /// UV plane stride.
    pub uv_stride: usize,
}
