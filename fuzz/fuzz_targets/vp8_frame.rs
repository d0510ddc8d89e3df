#![no_main]

//! Fuzz target for the VP8 frame decoder.
//!
//! Feeds arbitrary frames through header and frame decoding, then keeps
//! reading from the first partition with arbitrary probabilities to shake
//! out bounds issues in the boolean decoder.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use vpx_vp8::{Vp8Decoder, Vp8DecoderConfig};

#[derive(Arbitrary, Debug)]
struct FrameInput {
    frames: Vec<Vec<u8>>,
    budget_slack: u8,
    probs: Vec<u8>,
}

fuzz_target!(|input: FrameInput| {
    // Limit work per input
    if input.frames.len() > 16 || input.probs.len() > 4096 {
        return;
    }

    let mut decoder = Vp8Decoder::with_config(Vp8DecoderConfig {
        max_width: 1024,
        max_height: 1024,
    });

    for data in &input.frames {
        let budget = data.len().saturating_sub(input.budget_slack as usize);
        decoder.init(&data[..], budget);

        if decoder.decode_frame_header().is_err() {
            continue;
        }

        let Ok(frame) = decoder.decode_frame() else {
            continue;
        };
        let (w, h) = (frame.width as usize, frame.height as usize);
        assert!(frame.y.len() >= w * h);
        assert!(frame.y_stride >= w);

        let partition = decoder.first_partition();
        for &prob in &input.probs {
            let _ = partition.read_bool(prob);
        }
        assert!(partition.position() <= partition.len());
    }
});
