//! # bytehuff
//!
//! Lossless, byte-oriented file compression with per-file Huffman coding.
//!
//! A compressed stream is a self-describing code table followed by the
//! packed codes of every input byte. The table layout, the bit order and the
//! tie-breaking used to build the tree are fixed, so independent writers
//! produce byte-identical output for the same input.
//!
//! ## Pipeline
//!
//! - [`FrequencyTable`] counts bytes in bounded chunks.
//! - [`HuffmanTree`] merges the two lightest nodes until one root remains.
//! - [`CodeTable`] assigns each byte the path to its leaf.
//! - [`header`] writes and parses the table.
//! - [`BitWriter`] and [`BitReader`] pack and unpack single bits.
//! - [`DecodingTrie`] is rebuilt from the table to decode.
//!
//! ## Example
//!
//! ```rust
//! use bytehuff::{compress_bytes, decompress_bytes, HuffmanOptions};
//!
//! let options = HuffmanOptions::default();
//! let packed = compress_bytes(b"abracadabra", &options).unwrap();
//! let restored = decompress_bytes(&packed, &options).unwrap();
//! assert_eq!(restored, b"abracadabra");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod bits;
pub mod compress;
pub mod decode;
pub mod error;
pub mod header;
pub mod options;

pub use bits::BitWriter;
pub use compress::{
    compress, compress_bytes, compress_file, CodeTable, CompressStats, FrequencyTable,
    HuffmanNode, HuffmanTree,
};
pub use decode::{
    decompress, decompress_bytes, decompress_file, BitReader, DecodingTrie, DecompressStats,
};
pub use error::{Error, Result};
pub use options::{Framing, HuffmanOptions};
