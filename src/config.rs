//! Configuration for scanning behavior.
//!
//! - [`ScanConfig`] - Buffer capacity for the scanner

use crate::error::ScanError;

/// Default buffer capacity (64 KiB).
pub const DEFAULT_BUFFER_CAPACITY: usize = 64 * 1024;

/// Configuration for a buffered scan.
///
/// The single knob is the buffer capacity: the scanner never holds more than
/// `capacity` unconsumed bytes, and no chunk larger than `capacity` can be
/// recognized. A chunk that would exceed it surfaces as
/// [`ScanError::BufferTooSmall`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanConfig {
    capacity: usize,
}

impl ScanConfig {
    /// Creates a new configuration.
    ///
    /// Returns an error if `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self, ScanError> {
        if capacity == 0 {
            return Err(ScanError::InvalidConfig {
                message: "buffer capacity must be non-zero",
            });
        }
        Ok(Self { capacity })
    }

    /// Returns the buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_BUFFER_CAPACITY,
        }
    }
}
