//! Code table serialization.
//!
//! Layout:
//!
//! ```text
//! [2 bytes]  entry count N, little-endian
//! N times:
//!   [1 byte]  symbol
//!   [1 byte]  code length L in bits
//!   [L bits]  the code, first bit first
//!   [P bits]  zero padding up to the next byte boundary
//! ```
//!
//! Streams written with [`Framing::SymbolCount`](crate::Framing::SymbolCount)
//! follow the table with the number of encoded symbols as an 8-byte
//! little-endian integer.

use std::io::{Read, Write};

use tracing::trace;

use crate::bits::BitWriter;
use crate::compress::huffman::CodeTable;
use crate::decode::bit_reader::BitReader;
use crate::error::{Error, Result};

/// Write `table` at the current (byte-aligned) position of `writer`.
pub fn write_header<W: Write>(writer: &mut BitWriter<W>, table: &CodeTable) -> Result<()> {
    let count = u16::try_from(table.len())
        .map_err(|_| Error::InvalidHeader(format!("{} entries do not fit in u16", table.len())))?;
    writer.write_short(count)?;

    for (symbol, code) in table.iter() {
        let length = u8::try_from(code.len()).map_err(|_| Error::CodeTooLong {
            symbol,
            length: code.len(),
        })?;
        writer.write_byte(symbol)?;
        writer.write_byte(length)?;
        writer.write_bits(code)?;
        while !writer.is_byte_aligned() {
            writer.write_bit(false)?;
        }
    }

    trace!(entries = count, "wrote code table");
    Ok(())
}

/// Parse a code table from the current (byte-aligned) position of `reader`.
pub fn read_header<R: Read>(reader: &mut BitReader<R>) -> Result<CodeTable> {
    let declared = reader.next_short().map_err(|e| match e {
        Error::Exhausted => Error::InvalidHeader("missing entry count".into()),
        other => other,
    })?;

    let mut table = CodeTable::new();
    for parsed in 0..declared {
        let truncated = |e: Error| match e {
            Error::Exhausted => Error::TruncatedHeader { declared, parsed },
            other => other,
        };

        let symbol = reader.next_byte().map_err(truncated)?;
        let length = reader.next_byte().map_err(truncated)?;
        let mut code = Vec::with_capacity(length as usize);
        for _ in 0..length {
            code.push(reader.next_bit().map_err(truncated)?);
        }
        while !reader.is_byte_aligned() {
            reader.next_bit().map_err(truncated)?;
        }

        if table.insert(symbol, code).is_some() {
            return Err(Error::InvalidHeader(format!(
                "symbol {symbol:#04x} appears more than once"
            )));
        }
    }

    trace!(entries = declared, "read code table");
    Ok(table)
}

/// Write the number of encoded symbols (8 bytes, little-endian).
pub fn write_symbol_count<W: Write>(writer: &mut BitWriter<W>, count: u64) -> Result<()> {
    for byte in count.to_le_bytes() {
        writer.write_byte(byte)?;
    }
    Ok(())
}

/// Read the number of encoded symbols written by [`write_symbol_count`].
pub fn read_symbol_count<R: Read>(reader: &mut BitReader<R>) -> Result<u64> {
    let mut bytes = [0u8; 8];
    for byte in bytes.iter_mut() {
        *byte = reader.next_byte().map_err(|e| match e {
            Error::Exhausted => Error::InvalidHeader("missing symbol count".into()),
            other => other,
        })?;
    }
    Ok(u64::from_le_bytes(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compress::frequency::FrequencyTable;

    fn code(bits: &str) -> Vec<bool> {
        bits.chars().map(|c| c == '1').collect()
    }

    fn encode(table: &CodeTable) -> Vec<u8> {
        let mut writer = BitWriter::new(Vec::new());
        write_header(&mut writer, table).unwrap();
        writer.finish().unwrap()
    }

    fn decode(bytes: &[u8]) -> Result<CodeTable> {
        let mut reader = BitReader::new(bytes)?;
        read_header(&mut reader)
    }

    #[test]
    fn test_header_layout_two_symbols() {
        let table = CodeTable::from_frequencies(&FrequencyTable::from_bytes(b"AAAB"));
        let bytes = encode(&table);
        assert_eq!(
            bytes,
            vec![
                0x02, 0x00, // two entries
                0x41, 0x01, 0b0000_0001, // 'A' -> 1
                0x42, 0x01, 0b0000_0000, // 'B' -> 0
            ]
        );
    }

    #[test]
    fn test_header_padding_is_per_entry() {
        let mut table = CodeTable::new();
        table.insert(0x10, code("101"));
        table.insert(0x20, code("11110000"));
        table.insert(0x30, code("011000001"));
        let bytes = encode(&table);

        assert_eq!(
            bytes,
            vec![
                0x03, 0x00, //
                0x10, 3, 0b0000_0101, //
                0x20, 8, 0b0000_1111, // exactly one byte, no padding byte
                0x30, 9, 0b0000_0110, 0b0000_0001,
            ]
        );
        assert_eq!(decode(&bytes).unwrap(), table);
    }

    #[test]
    fn test_header_empty_table() {
        let bytes = encode(&CodeTable::new());
        assert_eq!(bytes, vec![0x00, 0x00]);
        assert!(decode(&bytes).unwrap().is_empty());
    }

    #[test]
    fn test_header_roundtrip_all_symbols() {
        let data: Vec<u8> = (0..20_000u32).map(|i| ((i * 31) ^ (i >> 3)) as u8).collect();
        let table = CodeTable::from_frequencies(&FrequencyTable::from_bytes(&data));
        assert_eq!(decode(&encode(&table)).unwrap(), table);
    }

    #[test]
    fn test_header_roundtrip_long_code() {
        let mut table = CodeTable::new();
        table.insert(0xFF, vec![true; 255]);
        table.insert(0x00, vec![false]);
        assert_eq!(decode(&encode(&table)).unwrap(), table);
    }

    #[test]
    fn test_header_code_too_long() {
        let mut table = CodeTable::new();
        table.insert(9, vec![true; 256]);
        let mut writer = BitWriter::new(Vec::new());
        assert!(matches!(
            write_header(&mut writer, &table),
            Err(Error::CodeTooLong {
                symbol: 9,
                length: 256
            })
        ));
    }

    #[test]
    fn test_header_truncated() {
        // Declares three entries but only holds one.
        let bytes = [0x03, 0x00, 0x41, 0x01, 0x01];
        assert!(matches!(
            decode(&bytes),
            Err(Error::TruncatedHeader {
                declared: 3,
                parsed: 1
            })
        ));
    }

    #[test]
    fn test_header_truncated_inside_code() {
        let bytes = [0x01, 0x00, 0x41, 0x10, 0xFF];
        assert!(matches!(
            decode(&bytes),
            Err(Error::TruncatedHeader {
                declared: 1,
                parsed: 0
            })
        ));
    }

    #[test]
    fn test_header_missing_count() {
        assert!(matches!(decode(&[]), Err(Error::InvalidHeader(_))));
        assert!(matches!(decode(&[0x01]), Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn test_header_duplicate_symbol() {
        let bytes = [0x02, 0x00, 0x41, 0x01, 0x00, 0x41, 0x01, 0x01];
        assert!(matches!(decode(&bytes), Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn test_symbol_count_roundtrip() {
        let mut writer = BitWriter::new(Vec::new());
        write_symbol_count(&mut writer, 0x0102_0304_0506_0708).unwrap();
        let bytes = writer.finish().unwrap();
        assert_eq!(bytes, vec![8, 7, 6, 5, 4, 3, 2, 1]);

        let mut reader = BitReader::new(&bytes[..]).unwrap();
        assert_eq!(read_symbol_count(&mut reader).unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn test_symbol_count_missing() {
        let mut reader = BitReader::new(&[1u8, 2, 3][..]).unwrap();
        assert!(matches!(
            read_symbol_count(&mut reader),
            Err(Error::InvalidHeader(_))
        ));
    }
}
