//! VP8 boolean arithmetic decoder.
//!
//! Every symbol after the uncompressed frame header is carried through the
//! boolean decoder. It keeps a range and a value window, and each call to
//! [`BoolDecoder::read_bool`] narrows the range according to a probability
//! (0-255) that the next bit is zero.
//!
//! Running off the end of the partition is not an error at this level: the
//! missing bytes read as zero and a sticky exhaustion flag is raised. Callers
//! check [`BoolDecoder::is_exhausted`] once a decoding pass is complete.

/// Probability used for flags and literals that carry no learned model.
pub const UNIFORM_PROB: u8 = 128;

/// Boolean arithmetic decoder over one fully buffered partition.
#[derive(Debug, Clone)]
pub struct BoolDecoder {
    /// Partition bytes.
    buf: Vec<u8>,
    /// Next byte to pull into the value window.
    pos: usize,
    /// Value window; the byte above bit 8 is compared against the split.
    value: u32,
    /// Current range, kept in 128..=255 between reads.
    range: u32,
    /// Number of valid bits in the value window, counted from bit 15 down.
    bit_count: u32,
    /// Set once a read needed a byte past the end of `buf`.
    exhausted: bool,
}

impl BoolDecoder {
    /// Create a decoder with an empty partition.
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            pos: 0,
            value: 0,
            range: 255,
            bit_count: 0,
            exhausted: false,
        }
    }

    /// Start decoding `buf` from its first byte.
    ///
    /// The buffer is moved in, not copied. No byte is consumed until the
    /// first read, so an empty partition is valid until something reads it.
    pub fn init(&mut self, buf: Vec<u8>) {
        self.buf = buf;
        self.pos = 0;
        self.value = 0;
        self.range = 255;
        self.bit_count = 0;
        self.exhausted = false;
    }

    /// Pull the next byte into the window below the valid bits.
    #[inline]
    fn load_byte(&mut self) {
        let byte = match self.buf.get(self.pos) {
            Some(&b) => {
                self.pos += 1;
                b
            }
            None => {
                self.exhausted = true;
                0
            }
        };
        self.value |= u32::from(byte) << (8 - self.bit_count);
        self.bit_count += 8;
    }

    /// Read a single boolean whose probability of being `false` is
    /// `prob / 256`.
    #[inline]
    pub fn read_bool(&mut self, prob: u8) -> bool {
        if self.bit_count < 8 {
            self.load_byte();
        }

        let split = 1 + (((self.range - 1) * u32::from(prob)) >> 8);
        let big_split = split << 8;

        let bit = if self.value >= big_split {
            self.range -= split;
            self.value -= big_split;
            true
        } else {
            self.range = split;
            false
        };

        // Renormalize
        if self.range < 128 {
            let shift = self.range.leading_zeros() - 24;
            self.range <<= shift;
            self.value <<= shift;
            self.bit_count -= shift;
        }

        bit
    }

    /// Read a single flag (50% probability).
    #[inline]
    pub fn read_flag(&mut self) -> bool {
        self.read_bool(UNIFORM_PROB)
    }

    /// Read an `n`-bit unsigned literal, most significant bit first, every
    /// bit coded with the same probability.
    pub fn read_uint(&mut self, prob: u8, n: u32) -> u32 {
        debug_assert!(n <= 32, "cannot read more than 32 bits at once");
        let mut value = 0u32;
        for _ in 0..n {
            value = (value << 1) | u32::from(self.read_bool(prob));
        }
        value
    }

    /// Read a signed literal: `n` bits of magnitude followed by a sign flag.
    ///
    /// `n` is at most 31 so that every magnitude fits in an `i32`. Wider
    /// requests keep only the low 31 bits of the magnitude.
    pub fn read_signed(&mut self, prob: u8, n: u32) -> i32 {
        debug_assert!(n < 32, "signed magnitude is at most 31 bits");
        let magnitude = (self.read_uint(prob, n) & 0x7FFF_FFFF) as i32;
        if self.read_bool(prob) {
            -magnitude
        } else {
            magnitude
        }
    }

    /// Whether any read so far ran past the end of the partition.
    ///
    /// Stays set until the next [`init`](Self::init).
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Number of partition bytes pulled into the decoder so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Partition length in bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether the partition holds no bytes.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Take the partition buffer back so its allocation can be reused for
    /// the next frame. The decoder is left with an empty, exhausted-free
    /// partition.
    pub fn take_buffer(&mut self) -> Vec<u8> {
        let buf = std::mem::take(&mut self.buf);
        self.init(Vec::new());
        buf
    }
}

impl Default for BoolDecoder {
    fn default() -> Self {
        Self::new()
    }
}
