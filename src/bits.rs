//! Bit-level output for the compressed stream.
//!
//! Bits are packed LSB first: the first bit written to a byte lands in bit 0.
//! The reader counterpart lives in [`crate::decode::bit_reader`].

use std::io::{self, Read, Write};

use crate::error::{Error, Result};

/// Default size of the internal byte buffer used by readers and writers.
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// A bit writer that accumulates bits in a fixed-size buffer and emits the
/// buffer to a byte sink each time it fills.
#[derive(Debug)]
pub struct BitWriter<W: Write> {
    inner: W,
    buffer: Box<[u8]>,
    bit_offset: usize,
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    /// Create a new bit writer with the default buffer size.
    pub fn new(inner: W) -> Self {
        Self::with_capacity(inner, DEFAULT_BUFFER_SIZE)
    }

    /// Create a new bit writer with a buffer of `capacity` bytes.
    ///
    /// A capacity of zero is treated as one.
    pub fn with_capacity(inner: W, capacity: usize) -> Self {
        Self {
            inner,
            buffer: vec![0u8; capacity.max(1)].into_boxed_slice(),
            bit_offset: 0,
            bytes_written: 0,
        }
    }

    /// Append a single bit.
    #[inline]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.emit_if_full()?;
        if bit {
            self.buffer[self.bit_offset / 8] |= 1 << (self.bit_offset % 8);
        }
        self.bit_offset += 1;
        self.emit_if_full()
    }

    /// Append every bit of `bits` in order.
    pub fn write_bits(&mut self, bits: &[bool]) -> Result<()> {
        for &bit in bits {
            self.write_bit(bit)?;
        }
        Ok(())
    }

    /// Append a whole byte. The cursor must be byte-aligned.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        if !self.is_byte_aligned() {
            return Err(Error::Unaligned {
                operation: "write_byte",
                bit_offset: self.bit_offset,
            });
        }
        self.emit_if_full()?;
        self.buffer[self.bit_offset / 8] = byte;
        self.bit_offset += 8;
        self.emit_if_full()
    }

    /// Append a 16-bit value, low byte first. The cursor must be byte-aligned.
    pub fn write_short(&mut self, value: u16) -> Result<()> {
        if !self.is_byte_aligned() {
            return Err(Error::Unaligned {
                operation: "write_short",
                bit_offset: self.bit_offset,
            });
        }
        for byte in value.to_le_bytes() {
            self.write_byte(byte)?;
        }
        Ok(())
    }

    /// Write out the partially filled buffer, rounded up to whole bytes, and
    /// flush the sink.
    ///
    /// Trailing bits of the last byte are zero. Bits written afterwards start
    /// on a fresh byte.
    pub fn flush(&mut self) -> Result<()> {
        let pending = self.bit_offset.div_ceil(8);
        if pending > 0 {
            self.inner.write_all(&self.buffer[..pending])?;
            self.bytes_written += pending as u64;
            self.buffer[..pending].fill(0);
            self.bit_offset = 0;
        }
        self.inner.flush()?;
        Ok(())
    }

    /// Flush any remaining bits and return the underlying sink.
    #[must_use = "the sink holds the encoded bytes"]
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.inner)
    }

    /// Returns true when the next write starts on a byte boundary.
    #[inline]
    pub fn is_byte_aligned(&self) -> bool {
        self.bit_offset % 8 == 0
    }

    /// Bit offset inside the current buffer.
    pub fn bit_offset(&self) -> usize {
        self.bit_offset
    }

    /// Bytes handed to the sink so far (not counting buffered bits).
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Hand a full buffer to the sink. The cursor only resets once the
    /// write succeeds, so after a sink error the next write retries the
    /// whole buffer.
    #[inline]
    fn emit_if_full(&mut self) -> Result<()> {
        if self.bit_offset == self.buffer.len() * 8 {
            self.inner.write_all(&self.buffer)?;
            self.bytes_written += self.buffer.len() as u64;
            self.buffer.fill(0);
            self.bit_offset = 0;
        }
        Ok(())
    }
}

/// Read from `source` until `buf` is full or the source is exhausted.
///
/// Returns the number of bytes read; zero means end of input. An error after
/// some bytes arrived ends the fill early; a persistent error shows up on the
/// next call.
pub(crate) fn fill_buffer<R: Read>(source: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) if filled > 0 => break,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
