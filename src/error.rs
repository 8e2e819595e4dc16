//! Error types for the bytehuff library.

use thiserror::Error;

/// Result type alias for bytehuff operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while compressing or decompressing.
#[derive(Debug, Error)]
pub enum Error {
    /// The underlying byte source or sink failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A byte-granular read or write was attempted off a byte boundary.
    #[error("unaligned {operation}: bit offset {bit_offset} is not a multiple of 8")]
    Unaligned {
        /// The operation that was attempted.
        operation: &'static str,
        /// Bit offset inside the current buffer.
        bit_offset: usize,
    },

    /// A bit or byte was requested after the input was exhausted.
    #[error("bit stream exhausted")]
    Exhausted,

    /// The input ended before every declared table entry was read.
    #[error("truncated header: declared {declared} entries, parsed {parsed}")]
    TruncatedHeader {
        /// Entry count stored in the header.
        declared: u16,
        /// Entries fully parsed before the input ran out.
        parsed: u16,
    },

    /// The header is structurally invalid.
    #[error("invalid header: {0}")]
    InvalidHeader(String),

    /// The code table cannot be turned into a decoding trie.
    #[error("invalid code table: {0}")]
    InvalidCodeTable(String),

    /// A code does not fit the one-byte length field.
    #[error("code for symbol {symbol:#04x} is {length} bits long, the header allows at most 255")]
    CodeTooLong {
        /// Symbol owning the code.
        symbol: u8,
        /// Length of its code in bits.
        length: usize,
    },

    /// The payload ended before the recorded number of symbols was decoded.
    #[error("truncated payload: expected {expected} symbols, decoded {decoded}")]
    TruncatedPayload {
        /// Symbol count stored in the header.
        expected: u64,
        /// Symbols decoded before the input ran out.
        decoded: u64,
    },

    /// The payload contains a bit path that matches no code.
    #[error("corrupt data: {0}")]
    CorruptData(String),

    /// The input differed between the counting pass and the encoding pass.
    #[error("input changed between passes: {0}")]
    InputChanged(String),
}
