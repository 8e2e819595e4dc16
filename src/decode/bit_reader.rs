//! Bit-level reader for the compressed stream.
//!
//! Mirrors [`crate::bits::BitWriter`]: bits are consumed LSB first from each
//! byte, and the internal buffer is refilled transparently at its boundary.

use std::io::{self, Read};

use crate::bits::{fill_buffer, DEFAULT_BUFFER_SIZE};
use crate::error::{Error, Result};

/// Bit reader over a byte source.
///
/// Construction reads one buffer ahead, so [`BitReader::has_next`] is exact
/// as long as the source does not fail.
///
/// A refill error never costs the value that triggered it: the value is
/// returned and the error is reported by the next read, which leaves the
/// reader ready to retry the refill after that.
pub struct BitReader<R: Read> {
    inner: R,
    buffer: Box<[u8]>,
    readable: usize,
    bit_offset: usize,
    bytes_read: u64,
    deferred: Option<io::Error>,
}

impl<R: Read> BitReader<R> {
    /// Create a reader with the default buffer size.
    pub fn new(inner: R) -> Result<Self> {
        Self::with_capacity(inner, DEFAULT_BUFFER_SIZE)
    }

    /// Create a reader with a buffer of `capacity` bytes (zero is treated as one).
    pub fn with_capacity(inner: R, capacity: usize) -> Result<Self> {
        let mut reader = Self {
            inner,
            buffer: vec![0u8; capacity.max(1)].into_boxed_slice(),
            readable: 0,
            bit_offset: 0,
            bytes_read: 0,
            deferred: None,
        };
        reader.refill()?;
        Ok(reader)
    }

    /// Returns true if at least one unread bit remains.
    ///
    /// After a failed refill this stays true until a retry succeeds.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.readable > 0
    }

    /// Read the next bit.
    #[inline]
    pub fn next_bit(&mut self) -> Result<bool> {
        self.resume()?;
        if !self.has_next() {
            return Err(Error::Exhausted);
        }
        let byte = self.buffer[self.bit_offset / 8];
        let bit = (byte >> (self.bit_offset % 8)) & 1 == 1;
        self.bit_offset += 1;
        self.refill_if_consumed();
        Ok(bit)
    }

    /// Read a whole byte. The cursor must be byte-aligned.
    pub fn next_byte(&mut self) -> Result<u8> {
        if !self.is_byte_aligned() {
            return Err(Error::Unaligned {
                operation: "next_byte",
                bit_offset: self.bit_offset,
            });
        }
        self.resume()?;
        if !self.has_next() {
            return Err(Error::Exhausted);
        }
        let byte = self.buffer[self.bit_offset / 8];
        self.bit_offset += 8;
        self.refill_if_consumed();
        Ok(byte)
    }

    /// Read a 16-bit value stored low byte first. The cursor must be byte-aligned.
    pub fn next_short(&mut self) -> Result<u16> {
        if !self.is_byte_aligned() {
            return Err(Error::Unaligned {
                operation: "next_short",
                bit_offset: self.bit_offset,
            });
        }
        let low = self.next_byte()?;
        let high = self.next_byte()?;
        Ok(u16::from_le_bytes([low, high]))
    }

    /// Returns true when the cursor sits on a byte boundary.
    #[inline]
    pub fn is_byte_aligned(&self) -> bool {
        self.bit_offset % 8 == 0
    }

    /// Total bytes pulled from the source so far, including read-ahead.
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    /// Report a deferred refill error, or retry the refill it interrupted.
    #[inline]
    fn resume(&mut self) -> Result<()> {
        if let Some(e) = self.deferred.take() {
            return Err(e.into());
        }
        if self.readable > 0 && self.bit_offset == self.readable * 8 {
            self.refill()?;
        }
        Ok(())
    }

    /// Refill once the buffer is consumed. A failure is kept for the next
    /// read so the value just taken is still returned.
    #[inline]
    fn refill_if_consumed(&mut self) {
        if self.bit_offset == self.readable * 8 {
            if let Err(e) = self.refill() {
                self.deferred = Some(e);
            }
        }
    }

    /// On failure the cursor and counters are left untouched.
    fn refill(&mut self) -> io::Result<()> {
        let readable = fill_buffer(&mut self.inner, &mut self.buffer)?;
        self.readable = readable;
        self.bit_offset = 0;
        self.bytes_read += readable as u64;
        Ok(())
    }
}
