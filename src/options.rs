//! Compression and decompression settings.

use crate::bits::DEFAULT_BUFFER_SIZE;

/// How the end of the payload is determined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Framing {
    /// The header is followed by the number of encoded symbols, so decoding
    /// stops exactly after the last one.
    #[default]
    SymbolCount,
    /// Baseline layout with no length field; decoding runs until the input
    /// is exhausted.
    ///
    /// The final byte is zero-padded, so if the padding spells out the code
    /// made only of zeros the decoder emits extra symbols. Use this only for
    /// interchange with writers that do not record a symbol count.
    Bare,
}

/// Settings shared by [`compress`](crate::compress()) and
/// [`decompress`](crate::decompress()).
///
/// Both sides must agree on [`framing`](Self::framing); the format carries no
/// marker for it. The buffer size only affects I/O granularity, never the
/// bytes produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanOptions {
    /// Bytes per read/write chunk (clamped to at least 1).
    pub buffer_size: usize,
    /// Payload framing.
    pub framing: Framing,
}

impl Default for HuffmanOptions {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            framing: Framing::SymbolCount,
        }
    }
}

impl HuffmanOptions {
    /// Framed preset (matches default).
    pub fn framed() -> Self {
        Self::default()
    }

    /// Baseline-format preset, byte-identical to writers without a symbol count.
    pub fn bare() -> Self {
        Self {
            framing: Framing::Bare,
            ..Self::default()
        }
    }

    /// Replace the buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size.max(1);
        self
    }

    pub(crate) fn chunk_size(&self) -> usize {
        self.buffer_size.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = HuffmanOptions::default();
        assert_eq!(options.buffer_size, 1024);
        assert_eq!(options.framing, Framing::SymbolCount);
        assert_eq!(options, HuffmanOptions::framed());
    }

    #[test]
    fn test_bare_preset() {
        let options = HuffmanOptions::bare().with_buffer_size(0);
        assert_eq!(options.framing, Framing::Bare);
        assert_eq!(options.buffer_size, 1);
    }

    #[test]
    fn test_chunk_size_clamped() {
        let options = HuffmanOptions {
            buffer_size: 0,
            framing: Framing::Bare,
        };
        assert_eq!(options.chunk_size(), 1);
    }
}
