//! Fuzz target for the decoder.
//!
//! Arbitrary bytes must produce either output or an error, never a panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for options in [
        bytehuff::HuffmanOptions::framed(),
        bytehuff::HuffmanOptions::bare(),
    ] {
        let mut output = Vec::new();
        if bytehuff::decompress(data, &mut output, &options).is_ok() {
            // Every decoded byte consumes at least one input bit.
            assert!(output.len() <= data.len() * 8, "output exceeds input bits");
        }
    }
});
