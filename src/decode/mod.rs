//! Decompression: bit reader, decoding trie, and the decoder loop.

pub mod bit_reader;
pub mod trie;

pub use bit_reader::BitReader;
pub use trie::{DecodingTrie, Step};

use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use tracing::debug;

use crate::error::{Error, Result};
use crate::header;
use crate::options::{Framing, HuffmanOptions};

/// Summary of a decompression run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecompressStats {
    /// Bytes pulled from the compressed input.
    pub input_bytes: u64,
    /// Bytes written to the output.
    pub output_bytes: u64,
}

/// Decompress `input` into `output`.
///
/// `options.framing` must match the one used to compress.
pub fn decompress<R, W>(input: R, output: W, options: &HuffmanOptions) -> Result<DecompressStats>
where
    R: Read,
    W: Write,
{
    let mut reader = BitReader::with_capacity(input, options.chunk_size())?;
    let table = header::read_header(&mut reader)?;
    let expected = match options.framing {
        Framing::SymbolCount => Some(header::read_symbol_count(&mut reader)?),
        Framing::Bare => None,
    };
    let trie = DecodingTrie::from_table(&table)?;
    debug!(entries = table.len(), ?expected, "read code table");

    let mut sink = BufWriter::with_capacity(options.chunk_size(), output);
    let output_bytes = match expected {
        Some(count) => decode_exact(&trie, &mut reader, &mut sink, count)?,
        None => decode_to_end(&trie, &mut reader, &mut sink)?,
    };
    sink.flush()?;

    let stats = DecompressStats {
        input_bytes: reader.bytes_read(),
        output_bytes,
    };
    debug!(?stats, "decompression finished");
    Ok(stats)
}

/// Decode exactly `count` symbols; any bits left over are padding.
fn decode_exact<R: Read, W: Write>(
    trie: &DecodingTrie,
    reader: &mut BitReader<R>,
    sink: &mut W,
    count: u64,
) -> Result<u64> {
    if count > 0 && trie.is_empty() {
        return Err(Error::InvalidHeader(format!(
            "{count} symbols recorded but the code table is empty"
        )));
    }

    for decoded in 0..count {
        let mut node = trie.root();
        let symbol = loop {
            let bit = reader.next_bit().map_err(|e| match e {
                Error::Exhausted => Error::TruncatedPayload {
                    expected: count,
                    decoded,
                },
                other => other,
            })?;
            match trie.step(node, bit)? {
                Step::Inner(next) => node = next,
                Step::Symbol(symbol) => break symbol,
            }
        };
        sink.write_all(&[symbol])?;
    }
    Ok(count)
}

/// Decode until the input runs out. A walk left unfinished at the end is
/// trailing padding and is dropped.
fn decode_to_end<R: Read, W: Write>(
    trie: &DecodingTrie,
    reader: &mut BitReader<R>,
    sink: &mut W,
) -> Result<u64> {
    let mut node = trie.root();
    let mut decoded = 0u64;
    while reader.has_next() {
        let bit = reader.next_bit()?;
        match trie.step(node, bit)? {
            Step::Inner(next) => node = next,
            Step::Symbol(symbol) => {
                sink.write_all(&[symbol])?;
                decoded += 1;
                node = trie.root();
            }
        }
    }
    Ok(decoded)
}

/// Decompress an in-memory buffer.
pub fn decompress_bytes(data: &[u8], options: &HuffmanOptions) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    decompress(data, &mut output, options)?;
    Ok(output)
}

/// Decompress the file at `source` into a new file at `target`.
///
/// Both files are closed before this returns, on success or failure.
pub fn decompress_file(
    source: impl AsRef<Path>,
    target: impl AsRef<Path>,
    options: &HuffmanOptions,
) -> Result<DecompressStats> {
    let input = File::open(source.as_ref())?;
    let output = File::create(target.as_ref())?;
    decompress(input, output, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::compress_bytes;

    #[test]
    fn test_decompress_two_symbols_framed() {
        let compressed = compress_bytes(b"AAAB", &HuffmanOptions::framed()).unwrap();
        let restored = decompress_bytes(&compressed, &HuffmanOptions::framed()).unwrap();
        assert_eq!(restored, b"AAAB");
    }

    #[test]
    fn test_decompress_bare_stream_any_entry_order() {
        // Entries need not be sorted: 'B' -> 1 listed before 'A' -> 0.
        let bytes = [
            0x02, 0x00, //
            0x42, 0x01, 0x01, //
            0x41, 0x01, 0x00, //
            0b1000_1000, // 0001 0001
        ];
        let restored = decompress_bytes(&bytes, &HuffmanOptions::bare()).unwrap();
        assert_eq!(restored, b"AAABAAAB");
    }

    #[test]
    fn test_bare_padding_decodes_extra_symbols() {
        // With 'B' -> 0 the four zero padding bits read as four more 'B's.
        let compressed = compress_bytes(b"AAAB", &HuffmanOptions::bare()).unwrap();
        let restored = decompress_bytes(&compressed, &HuffmanOptions::bare()).unwrap();
        assert_eq!(restored, b"AAABBBBB");
    }

    #[test]
    fn test_bare_unfinished_walk_is_dropped() {
        // The all-zero code is four bits long, so two padding bits stop mid-path.
        let bytes = [
            0x05, 0x00, //
            b'a', 4, 0b0000_0000, // 0000
            b'b', 4, 0b0000_1000, // 0001
            b'c', 3, 0b0000_0100, // 001
            b'd', 2, 0b0000_0010, // 01
            b'e', 1, 0b0000_0001, // 1
            0b0011_1111, // six 'e' then 00
        ];
        let restored = decompress_bytes(&bytes, &HuffmanOptions::bare()).unwrap();
        assert_eq!(restored, b"eeeeee");
    }

    #[test]
    fn test_decompress_empty() {
        for options in [HuffmanOptions::framed(), HuffmanOptions::bare()] {
            let compressed = compress_bytes(&[], &options).unwrap();
            assert!(decompress_bytes(&compressed, &options).unwrap().is_empty());
        }
        // A bare header alone, with no payload.
        assert!(decompress_bytes(&[0x00, 0x00], &HuffmanOptions::bare())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_decompress_single_symbol_framed() {
        let data = vec![0xEE; 1000];
        let compressed = compress_bytes(&data, &HuffmanOptions::framed()).unwrap();
        assert_eq!(
            decompress_bytes(&compressed, &HuffmanOptions::framed()).unwrap(),
            data
        );
    }

    #[test]
    fn test_decompress_truncated_payload() {
        let data = b"hello huffman, hello bits".to_vec();
        let mut compressed = compress_bytes(&data, &HuffmanOptions::framed()).unwrap();
        compressed.truncate(compressed.len() - 3);
        assert!(matches!(
            decompress_bytes(&compressed, &HuffmanOptions::framed()),
            Err(Error::TruncatedPayload { expected: 25, .. })
        ));
    }

    #[test]
    fn test_decompress_count_without_table() {
        let mut bytes = vec![0x00, 0x00];
        bytes.extend_from_slice(&3u64.to_le_bytes());
        assert!(matches!(
            decompress_bytes(&bytes, &HuffmanOptions::framed()),
            Err(Error::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_decompress_bits_without_table() {
        assert!(matches!(
            decompress_bytes(&[0x00, 0x00, 0xFF], &HuffmanOptions::bare()),
            Err(Error::CorruptData(_))
        ));
    }

    #[test]
    fn test_decompress_stats() {
        let data = b"stats are fun".to_vec();
        let compressed = compress_bytes(&data, &HuffmanOptions::default()).unwrap();
        let mut output = Vec::new();
        let stats = decompress(&compressed[..], &mut output, &HuffmanOptions::default()).unwrap();
        assert_eq!(stats.output_bytes, data.len() as u64);
        assert_eq!(stats.input_bytes, compressed.len() as u64);
        assert_eq!(output, data);
    }
}
