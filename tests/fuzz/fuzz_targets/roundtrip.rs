//! Fuzz target for compress/decompress round trips.
//!
//! Any input must survive a framed round trip byte for byte.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

#[derive(Arbitrary, Debug)]
struct RoundtripInput {
    /// Buffer size selector
    buffer: u16,
    /// Raw data to compress
    data: Vec<u8>,
}

fuzz_target!(|input: RoundtripInput| {
    // Limit input size to avoid OOM
    if input.data.len() > 1024 * 1024 {
        return;
    }

    let options = bytehuff::HuffmanOptions::default().with_buffer_size(input.buffer as usize);
    let packed = bytehuff::compress_bytes(&input.data, &options).expect("compress failed");
    let restored = bytehuff::decompress_bytes(&packed, &options).expect("decompress failed");

    assert_eq!(restored, input.data, "round trip mismatch");
});
