//! The Chunk type - one recognized token from the stream.

use bytes::Bytes;
use std::fmt;

/// A recognized chunk: the half-open byte range `[start, end)` of the source
/// together with the raw bytes of that range.
///
/// Successive chunks from one scanner have monotonically non-decreasing,
/// non-overlapping ranges; with a strategy that never skips, they partition
/// the source with no gaps. The payload is an owned copy taken at the moment
/// of recognition, so it stays valid after the scanner refills or shifts its
/// buffer.
///
/// # Example
///
/// ```
/// use scanrs::Chunk;
///
/// let chunk = Chunk::new(&b"hello\n"[..], 0);
/// assert_eq!(chunk.start(), 0);
/// assert_eq!(chunk.end(), 6);
/// assert_eq!(chunk.range(), 0..6);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// The chunk payload.
    pub data: Bytes,

    /// Source-absolute offset of the first byte.
    pub start: u64,
}

impl Chunk {
    /// Creates a chunk from a payload and its source-absolute start offset.
    pub fn new(data: impl Into<Bytes>, start: u64) -> Self {
        Self {
            data: data.into(),
            start,
        }
    }

    /// Returns the length of the chunk in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the chunk has no data.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns a reference to the chunk payload.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Returns the source-absolute start offset.
    pub fn start(&self) -> u64 {
        self.start
    }

    /// Returns the source-absolute end offset (exclusive).
    pub fn end(&self) -> u64 {
        self.start + self.data.len() as u64
    }

    /// Returns the chunk as a source-absolute range.
    pub fn range(&self) -> std::ops::Range<u64> {
        self.start()..self.end()
    }

    /// Consumes the chunk and returns the underlying payload.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Chunk([{}..{}), {} bytes)", self.start(), self.end(), self.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let chunk = Chunk::new(&b"hello"[..], 0);
        assert_eq!(chunk.len(), 5);
        assert!(!chunk.is_empty());
    }

    #[test]
    fn test_range() {
        let chunk = Chunk::new(&b"hello"[..], 100);
        assert_eq!(chunk.start(), 100);
        assert_eq!(chunk.end(), 105);
        assert_eq!(chunk.range(), 100..105);
    }

    #[test]
    fn test_into_data() {
        let chunk = Chunk::new(&b"hello"[..], 0);
        assert_eq!(chunk.into_data(), Bytes::from_static(b"hello"));
    }

    #[test]
    fn test_display() {
        let chunk = Chunk::new(&b"hello"[..], 100);
        let s = format!("{}", chunk);
        assert!(s.contains("[100..105)"));
        assert!(s.contains("5 bytes"));
    }
}
