//! Shared test helpers: a reference boolean encoder and frame builders.

#![allow(dead_code)]

/// Boolean encoder following RFC 6386 section 7.3, used to produce
/// reference partitions for decoder traces.
pub struct BoolEncoder {
    output: Vec<u8>,
    range: u32,
    bottom: u32,
    bit_count: i32,
}

impl BoolEncoder {
    pub fn new() -> Self {
        Self {
            output: Vec::new(),
            range: 255,
            bottom: 0,
            bit_count: 24,
        }
    }

    fn add_one_to_output(&mut self) {
        for byte in self.output.iter_mut().rev() {
            if *byte == 255 {
                *byte = 0;
            } else {
                *byte += 1;
                return;
            }
        }
    }

    pub fn write_bool(&mut self, prob: u8, value: bool) {
        let split = 1 + (((self.range - 1) * u32::from(prob)) >> 8);

        if value {
            self.bottom = self.bottom.wrapping_add(split);
            self.range -= split;
        } else {
            self.range = split;
        }

        while self.range < 128 {
            self.range <<= 1;
            if self.bottom & (1 << 31) != 0 {
                self.add_one_to_output();
            }
            self.bottom <<= 1;
            self.bit_count -= 1;
            if self.bit_count == 0 {
                self.output.push((self.bottom >> 24) as u8);
                self.bottom &= (1 << 24) - 1;
                self.bit_count = 8;
            }
        }
    }

    pub fn write_uint(&mut self, prob: u8, value: u32, n: u32) {
        for i in (0..n).rev() {
            self.write_bool(prob, (value >> i) & 1 != 0);
        }
    }

    pub fn finish(mut self) -> Vec<u8> {
        let mut c = self.bit_count;
        let mut v = self.bottom;
        if v & (1 << (32 - c)) != 0 {
            self.add_one_to_output();
        }
        v <<= c & 7;
        c >>= 3;
        while c > 0 {
            v <<= 8;
            c -= 1;
        }
        for _ in 0..4 {
            self.output.push((v >> 24) as u8);
            v <<= 8;
        }
        self.output
    }
}

/// Encode `(probability, bit)` pairs into a partition.
pub fn encode_trace(trace: &[(u8, bool)]) -> Vec<u8> {
    let mut encoder = BoolEncoder::new();
    for &(prob, bit) in trace {
        encoder.write_bool(prob, bit);
    }
    encoder.finish()
}

/// Build a 3-byte frame tag.
pub fn frame_tag(key_frame: bool, version: u8, show_frame: bool, partition_len: u32) -> [u8; 3] {
    let raw = u32::from(!key_frame)
        | (u32::from(version & 7) << 1)
        | (u32::from(show_frame) << 4)
        | (partition_len << 5);
    let b = raw.to_le_bytes();
    [b[0], b[1], b[2]]
}

/// Build a complete key frame: header followed by `partition`.
pub fn key_frame(width: u16, height: u16, x_scale: u8, y_scale: u8, partition: &[u8]) -> Vec<u8> {
    let mut data = frame_tag(true, 0, true, partition.len() as u32).to_vec();
    data.extend_from_slice(&[0x9D, 0x01, 0x2A]);
    data.extend_from_slice(&(width | (u16::from(x_scale) << 14)).to_le_bytes());
    data.extend_from_slice(&(height | (u16::from(y_scale) << 14)).to_le_bytes());
    data.extend_from_slice(partition);
    data
}

/// Build a complete interframe: frame tag followed by `partition`.
pub fn inter_frame(partition: &[u8]) -> Vec<u8> {
    let mut data = frame_tag(false, 0, true, partition.len() as u32).to_vec();
    data.extend_from_slice(partition);
    data
}
