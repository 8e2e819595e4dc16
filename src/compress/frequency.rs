//! Byte frequency counting.

use std::io::Read;

use crate::bits::fill_buffer;
use crate::error::Result;

/// Occurrence count of every byte value in an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Count bytes from `source`, reading `chunk_size` bytes at a time.
    ///
    /// The source is consumed to its end; memory use is bounded by the chunk.
    pub fn from_reader<R: Read>(source: &mut R, chunk_size: usize) -> Result<Self> {
        let mut table = Self::empty();
        let mut chunk = vec![0u8; chunk_size.max(1)];
        loop {
            let n = fill_buffer(source, &mut chunk)?;
            if n == 0 {
                break;
            }
            table.update(&chunk[..n]);
        }
        Ok(table)
    }

    /// Count bytes of an in-memory slice.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut table = Self::empty();
        table.update(data);
        table
    }

    fn empty() -> Self {
        Self { counts: [0; 256] }
    }

    #[inline]
    fn update(&mut self, data: &[u8]) {
        for &byte in data {
            self.counts[byte as usize] += 1;
        }
    }

    /// Occurrences of `symbol` (zero if absent).
    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    /// Present symbols and their counts, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter_map(|(symbol, &count)| (count > 0).then_some((symbol as u8, count)))
    }

    /// Number of distinct byte values present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Total number of bytes counted.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Returns true if no bytes were counted.
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::empty()
    }
}
