//! Compression: frequency counting, tree and code construction, and the
//! two-pass encoder.

pub mod frequency;
pub mod huffman;

pub use frequency::FrequencyTable;
pub use huffman::{CodeTable, HuffmanNode, HuffmanTree};

use std::fs::File;
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tracing::debug;

use crate::bits::{fill_buffer, BitWriter};
use crate::error::{Error, Result};
use crate::header;
use crate::options::{Framing, HuffmanOptions};

/// Summary of a compression run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompressStats {
    /// Bytes read from the input (one pass).
    pub input_bytes: u64,
    /// Bytes written to the output, header included.
    pub output_bytes: u64,
    /// Distinct byte values in the input.
    pub distinct_symbols: usize,
}

/// Compress `input` into `output`.
///
/// The input is read twice: once to count byte frequencies and, after
/// seeking back to where it started, once to encode. Memory use is bounded
/// by `options.buffer_size` regardless of input length.
pub fn compress<R, W>(mut input: R, output: W, options: &HuffmanOptions) -> Result<CompressStats>
where
    R: Read + Seek,
    W: Write,
{
    let start = input.stream_position()?;
    let frequencies = FrequencyTable::from_reader(&mut input, options.chunk_size())?;
    let table = CodeTable::from_frequencies(&frequencies);
    debug!(
        bytes = frequencies.total(),
        distinct = frequencies.distinct(),
        max_code_length = table.max_code_length(),
        "built code table"
    );

    let mut writer = BitWriter::with_capacity(output, options.chunk_size());
    header::write_header(&mut writer, &table)?;
    if options.framing == Framing::SymbolCount {
        header::write_symbol_count(&mut writer, frequencies.total())?;
    }

    input.seek(SeekFrom::Start(start))?;
    let encoded = encode_payload(&mut input, &table, &mut writer, options.chunk_size())?;
    if encoded != frequencies.total() {
        return Err(Error::InputChanged(format!(
            "counted {} bytes but encoded {}",
            frequencies.total(),
            encoded
        )));
    }
    writer.flush()?;

    let stats = CompressStats {
        input_bytes: encoded,
        output_bytes: writer.bytes_written(),
        distinct_symbols: frequencies.distinct(),
    };
    debug!(?stats, "compression finished");
    Ok(stats)
}

/// Translate every byte of `input` into its code.
fn encode_payload<R: Read, W: Write>(
    input: &mut R,
    table: &CodeTable,
    writer: &mut BitWriter<W>,
    chunk_size: usize,
) -> Result<u64> {
    let lookup = table.lookup();
    let mut chunk = vec![0u8; chunk_size];
    let mut encoded = 0u64;
    loop {
        let n = fill_buffer(input, &mut chunk)?;
        if n == 0 {
            break;
        }
        for &byte in &chunk[..n] {
            let code = lookup[byte as usize].ok_or_else(|| {
                Error::InputChanged(format!("byte {byte:#04x} was not seen while counting"))
            })?;
            writer.write_bits(code)?;
        }
        encoded += n as u64;
    }
    Ok(encoded)
}

/// Compress an in-memory buffer.
pub fn compress_bytes(data: &[u8], options: &HuffmanOptions) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    compress(Cursor::new(data), &mut output, options)?;
    Ok(output)
}

/// Compress the file at `source` into a new file at `target`.
///
/// Both files are closed before this returns, on success or failure.
pub fn compress_file(
    source: impl AsRef<Path>,
    target: impl AsRef<Path>,
    options: &HuffmanOptions,
) -> Result<CompressStats> {
    let input = File::open(source.as_ref())?;
    let output = File::create(target.as_ref())?;
    compress(input, output, options)
}
