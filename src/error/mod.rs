//! Error types for scanrs.

use std::fmt;

/// Errors that can halt a scan.
///
/// Every variant is sticky: once a scanner records one, no further chunk is
/// produced. A clean end of input is not an error and is reported through
/// [`Scanner::at_end`](crate::Scanner::at_end) instead.
#[derive(Debug)]
pub enum ScanError {
    /// An I/O error occurred while reading or positioning the source.
    Io(std::io::Error),

    /// The configured buffer is too small to hold one complete chunk.
    BufferTooSmall {
        /// The configured buffer capacity in bytes.
        capacity: usize,
    },

    /// The recognition strategy reported an error; propagated verbatim.
    Split(Box<dyn std::error::Error + Send + Sync>),

    /// Invalid configuration parameter.
    InvalidConfig {
        /// Description of what was invalid.
        message: &'static str,
    },
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanError::Io(e) => write!(f, "io error: {}", e),
            ScanError::BufferTooSmall { capacity } => {
                write!(f, "chunk is bigger than the {} byte buffer", capacity)
            }
            ScanError::Split(e) => write!(f, "split error: {}", e),
            ScanError::InvalidConfig { message } => {
                write!(f, "invalid config: {}", message)
            }
        }
    }
}

impl std::error::Error for ScanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScanError::Io(e) => Some(e),
            ScanError::Split(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ScanError {
    fn from(e: std::io::Error) -> Self {
        ScanError::Io(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let err: ScanError = io_err.into();
        assert!(matches!(err, ScanError::Io(_)));
    }

    #[test]
    fn test_buffer_too_small_display_names_capacity() {
        let err = ScanError::BufferTooSmall { capacity: 5 };
        assert!(err.to_string().contains('5'));
    }

    #[test]
    fn test_split_error_is_source() {
        let inner = std::io::Error::new(std::io::ErrorKind::InvalidData, "bad token");
        let err = ScanError::Split(Box::new(inner));
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("bad token"));
    }
}
