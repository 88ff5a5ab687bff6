//! Delimiter-based recognition strategies.

use super::{Split, SplitError, SplitStep};

/// Splits on a fixed single-byte delimiter.
///
/// Each chunk runs up to and including the delimiter. An unterminated
/// trailing token is emitted once end of input is reached.
///
/// # Example
///
/// ```
/// use scanrs::{DelimiterSplit, Scanner};
/// use std::io::Cursor;
///
/// let mut scanner = Scanner::new(Cursor::new(b"a;b;c".to_vec()), DelimiterSplit::new(b';'));
/// assert!(scanner.scan());
/// assert_eq!(&scanner.chunk().unwrap().data()[..], b"a;");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DelimiterSplit {
    delim: u8,
}

impl DelimiterSplit {
    /// Creates a strategy splitting on `delim`.
    pub fn new(delim: u8) -> Self {
        Self { delim }
    }

    /// Returns the delimiter byte.
    pub fn delimiter(&self) -> u8 {
        self.delim
    }
}

impl Split for DelimiterSplit {
    fn split(&mut self, window: &[u8], at_end: bool) -> Result<SplitStep, SplitError> {
        if let Some(i) = window.iter().position(|&b| b == self.delim) {
            return Ok(SplitStep::Token(i + 1));
        }
        if at_end && !window.is_empty() {
            // trailing token with no closing delimiter
            return Ok(SplitStep::Token(window.len()));
        }
        Ok(SplitStep::NeedMore)
    }
}

/// Splits on newlines; shorthand for `DelimiterSplit::new(b'\n')`.
pub fn lines() -> DelimiterSplit {
    DelimiterSplit::new(b'\n')
}

/// Splits on a multi-byte delimiter sequence.
///
/// Each chunk runs up to and including the sequence. Lookahead is implicit:
/// while more input may arrive, a partial match at the window's tail is left
/// unresolved ([`SplitStep::NeedMore`]) rather than guessed at. At end of
/// input the unterminated remainder is emitted as a final chunk.
#[derive(Debug, Clone)]
pub struct SequenceSplit {
    needle: Vec<u8>,
}

impl SequenceSplit {
    /// Creates a strategy splitting on `needle`.
    ///
    /// # Panics
    ///
    /// Panics if `needle` is empty.
    pub fn new(needle: impl Into<Vec<u8>>) -> Self {
        let needle = needle.into();
        assert!(!needle.is_empty(), "delimiter sequence must be non-empty");
        Self { needle }
    }

    /// Returns the delimiter sequence.
    pub fn sequence(&self) -> &[u8] {
        &self.needle
    }
}

impl Split for SequenceSplit {
    fn split(&mut self, window: &[u8], at_end: bool) -> Result<SplitStep, SplitError> {
        if window.len() >= self.needle.len() {
            if let Some(i) = window
                .windows(self.needle.len())
                .position(|w| w == self.needle.as_slice())
            {
                return Ok(SplitStep::Token(i + self.needle.len()));
            }
        }
        if at_end && !window.is_empty() {
            return Ok(SplitStep::Token(window.len()));
        }
        Ok(SplitStep::NeedMore)
    }
}
