//! Token recognition strategies.
//!
//! A [`Split`] decides, for a window of unconsumed bytes and an end-of-input
//! flag, whether a chunk ends inside that window. The scanner drives it over
//! the buffered bytes and handles refilling around it.
//!
//! - [`Split`] - The strategy trait (also implemented for closures)
//! - [`SplitStep`] - One recognition decision
//! - [`DelimiterSplit`] / [`lines`] - Fixed single-byte delimiter
//! - [`SequenceSplit`] - Multi-byte lookahead delimiter

mod delim;

pub use delim::{DelimiterSplit, SequenceSplit, lines};

/// Boxed error returned by a recognition strategy.
///
/// Propagated verbatim through [`ScanError::Split`](crate::ScanError::Split).
pub type SplitError = Box<dyn std::error::Error + Send + Sync>;

/// One recognition decision over a window of unconsumed bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitStep {
    /// The window is not long enough to decide; refill and ask again.
    ///
    /// With end of input set this means no further chunk can be recognized
    /// right now, and the scanner halts in its resumable end state.
    NeedMore,

    /// Consume the next `n` bytes without emitting a chunk.
    Skip(usize),

    /// Emit a chunk covering the next `n` bytes.
    ///
    /// The chunk spans the whole advanced range, delimiter included, so the
    /// chunks of a never-skipping strategy concatenate back to the input.
    Token(usize),
}

/// A token recognition strategy.
///
/// Implementations must behave as a pure function of `(window, at_end)`: the
/// scanner may probe the same window more than once (after compaction, or
/// after a resumed end of input) and expects the same answer. State is
/// allowed only if it is fully determined by the window itself.
///
/// `Skip(n)` and `Token(n)` must satisfy `1 <= n <= window.len()`; the
/// scanner panics on a violation, since ambiguity has its own answer
/// ([`SplitStep::NeedMore`]) and a zero-byte advance cannot make progress.
///
/// The trait is implemented for closures, so one-off grammars need no type:
///
/// ```
/// use scanrs::{Scanner, SplitError, SplitStep};
/// use std::io::Cursor;
///
/// // chunks of exactly four bytes, remainder at end of input
/// let quads = |window: &[u8], at_end: bool| -> Result<SplitStep, SplitError> {
///     if window.len() >= 4 {
///         Ok(SplitStep::Token(4))
///     } else if at_end && !window.is_empty() {
///         Ok(SplitStep::Token(window.len()))
///     } else {
///         Ok(SplitStep::NeedMore)
///     }
/// };
/// let mut scanner = Scanner::new(Cursor::new(b"abcdefghij".to_vec()), quads);
/// assert!(scanner.scan());
/// assert_eq!(&scanner.chunk().unwrap().data()[..], b"abcd");
/// ```
pub trait Split {
    /// Probes `window` for the next chunk boundary.
    ///
    /// `at_end` is true once the source has reported end of input; it is the
    /// strategy's last chance to emit a trailing token that has no closing
    /// delimiter.
    fn split(&mut self, window: &[u8], at_end: bool) -> Result<SplitStep, SplitError>;
}

impl<F> Split for F
where
    F: FnMut(&[u8], bool) -> Result<SplitStep, SplitError>,
{
    fn split(&mut self, window: &[u8], at_end: bool) -> Result<SplitStep, SplitError> {
        self(window, at_end)
    }
}
