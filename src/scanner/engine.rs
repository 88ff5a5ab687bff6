//! Core scanning engine - Scanner over a seekable byte source.
//!
//! This module implements the synchronous scanning API. A [`Scanner`] owns a
//! fixed-capacity buffer and tops it up from the source on demand, probing
//! the unconsumed bytes with the recognition strategy and yielding one chunk
//! per successful [`Scanner::scan`] call. Partially consumed data is
//! reclaimed by shifting it to the front of the buffer, so memory stays
//! bounded no matter how large the input is.
//!
//! # Example
//!
//! ```
//! use scanrs::{Scanner, lines};
//! use std::io::Cursor;
//!
//! let mut scanner = Scanner::new(Cursor::new(b"hello\nworld\n".to_vec()), lines());
//!
//! assert!(scanner.scan());
//! assert_eq!(scanner.chunk().unwrap().range(), 0..6);
//!
//! assert!(scanner.scan());
//! assert_eq!(scanner.chunk().unwrap().range(), 6..12);
//!
//! assert!(!scanner.scan());
//! assert!(scanner.last_error().is_none());
//! assert!(scanner.at_end());
//! ```

use std::io::{Read, Seek, SeekFrom};

use bytes::Bytes;

use crate::chunk::Chunk;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::split::{Split, SplitStep};

/// Terminal-state bookkeeping for the scan loop.
///
/// End of input and failure are deliberately separate states: end of input is
/// not fatal (the source may grow, see [`Scanner::resume`]) while a recorded
/// failure halts the scanner permanently.
#[derive(Debug)]
enum State {
    /// The source may still have bytes; keep refilling.
    Filling,
    /// End of input observed; draining what is buffered.
    Draining,
    /// Halted at end of input with nothing left to recognize. Resumable.
    Ended,
    /// Sticky failure; no further chunk will ever be produced.
    Failed(ScanError),
}

/// A pull-based scanner that splits a seekable byte source into chunks.
///
/// `Scanner` reads the source through a buffer of fixed capacity and drives
/// the recognition strategy over the unconsumed window. Each successful
/// [`scan`](Scanner::scan) yields exactly one chunk, retrievable through
/// [`chunk`](Scanner::chunk); chunk `N+1` always starts where chunk `N`
/// ended.
///
/// The seek bound on the source exists for two reasons: detecting exhaustion
/// when a read fills the buffer to exact capacity (a zero-length read can no
/// longer be observed), and re-synchronizing the position when a drained
/// source is [`resume`](Scanner::resume)d after growing.
///
/// Not safe for concurrent use; the scanner assumes a single caller.
///
/// # Example
///
/// ```
/// use scanrs::{Scanner, ScanConfig, lines};
/// use std::io::Cursor;
///
/// let config = ScanConfig::new(16).unwrap();
/// let mut scanner = Scanner::with_config(Cursor::new(b"a\nb\n".to_vec()), lines(), config);
///
/// let mut total = 0;
/// while scanner.scan() {
///     total += scanner.chunk().unwrap().len();
/// }
/// assert_eq!(total, 4);
/// assert!(scanner.last_error().is_none());
/// ```
pub struct Scanner<R, S> {
    source: R,
    split: S,
    buf: Box<[u8]>,
    read: usize,
    write: usize,
    consumed: u64,
    state: State,
    last: Option<Chunk>,
}

impl<R: Read + Seek, S: Split> Scanner<R, S> {
    /// Creates a scanner with the default buffer capacity.
    ///
    /// # Arguments
    ///
    /// * `source` - The seekable byte source to scan
    /// * `split` - The recognition strategy deciding where chunks end
    pub fn new(source: R, split: S) -> Self {
        Self::with_config(source, split, ScanConfig::default())
    }

    /// Creates a scanner with an explicit configuration.
    pub fn with_config(source: R, split: S, config: ScanConfig) -> Self {
        Self {
            source,
            split,
            buf: vec![0u8; config.capacity()].into_boxed_slice(),
            read: 0,
            write: 0,
            consumed: 0,
            state: State::Filling,
            last: None,
        }
    }

    /// Attempts to produce the next chunk.
    ///
    /// Returns `true` exactly when a new chunk is available through
    /// [`chunk`](Scanner::chunk). Returns `false` when no chunk can be
    /// produced right now: end of input was reached (check
    /// [`at_end`](Scanner::at_end)), or a sticky error occurred (check
    /// [`last_error`](Scanner::last_error)).
    ///
    /// May read from the source, shift buffered bytes to the front of the
    /// buffer, and update the cumulative offset.
    pub fn scan(&mut self) -> bool {
        loop {
            match self.state {
                State::Failed(_) | State::Ended => return false,
                State::Filling | State::Draining => {}
            }

            if matches!(self.state, State::Filling)
                && self.write < self.buf.len()
                && !self.fill()
            {
                return false;
            }

            let at_end = matches!(self.state, State::Draining);

            while self.read < self.write {
                let window_len = self.write - self.read;
                match self.split.split(&self.buf[self.read..self.write], at_end) {
                    Ok(SplitStep::Token(n)) => {
                        assert!(n > 0, "split returned a zero-length advance");
                        assert!(
                            n <= window_len,
                            "split advanced past the end of the buffered window"
                        );
                        let data = Bytes::copy_from_slice(&self.buf[self.read..self.read + n]);
                        self.last = Some(Chunk::new(data, self.consumed));
                        self.read += n;
                        self.consumed += n as u64;
                        return true;
                    }
                    Ok(SplitStep::Skip(n)) => {
                        assert!(n > 0, "split returned a zero-length advance");
                        assert!(
                            n <= window_len,
                            "split advanced past the end of the buffered window"
                        );
                        self.read += n;
                        self.consumed += n as u64;
                    }
                    Ok(SplitStep::NeedMore) => {
                        if at_end {
                            // stream ended before a chunk was recognized;
                            // latched for a possible resume
                            self.state = State::Ended;
                            return false;
                        }
                        break;
                    }
                    Err(e) => {
                        self.state = State::Failed(ScanError::Split(e));
                        return false;
                    }
                }
            }

            if self.read == 0 && self.write == self.buf.len() {
                // the entire buffer held no chunk
                self.state = State::Failed(ScanError::BufferTooSmall {
                    capacity: self.buf.len(),
                });
                return false;
            }

            if self.read == self.write {
                // buffered data exhausted
                if at_end {
                    self.state = State::Ended;
                    return false;
                }
                self.read = 0;
                self.write = 0;
            } else if self.read > 0 {
                // reclaim consumed space for the next read
                self.buf.copy_within(self.read..self.write, 0);
                self.write -= self.read;
                self.read = 0;
            }
        }
    }

    /// Returns the most recently produced chunk.
    ///
    /// `None` until the first successful [`scan`](Scanner::scan); afterwards
    /// the last chunk stays available, including past end of input.
    pub fn chunk(&self) -> Option<&Chunk> {
        self.last.as_ref()
    }

    /// Returns the sticky error, if any.
    ///
    /// `None` while scanning is still possible and when the scanner halted at
    /// a clean end of input.
    pub fn last_error(&self) -> Option<&ScanError> {
        match &self.state {
            State::Failed(e) => Some(e),
            _ => None,
        }
    }

    /// Returns true when the scanner has halted at end of input.
    ///
    /// This is the clean-termination signal: [`scan`](Scanner::scan) returned
    /// `false` and [`last_error`](Scanner::last_error) is `None`. The halt is
    /// latched; [`resume`](Scanner::resume) can re-arm the scanner if the
    /// source has grown.
    pub fn at_end(&self) -> bool {
        matches!(self.state, State::Ended)
    }

    /// Re-arms a scanner halted at end of input.
    ///
    /// Clears the end-of-input halt iff that is the current state (a sticky
    /// error is never cleared), re-queries the source position, and returns
    /// whether scanning can continue. Scanning picks up at the exact byte
    /// position reached: the cumulative offset is kept and no byte is
    /// duplicated or dropped, so a chunk may span the resume boundary.
    ///
    /// Intended for sources that grow after being drained, such as a log
    /// file being appended to.
    pub fn resume(&mut self) -> bool {
        if !matches!(self.state, State::Ended) {
            return false;
        }
        match self.source.stream_position() {
            Ok(_) => {
                self.state = State::Filling;
                true
            }
            Err(e) => {
                self.state = State::Failed(ScanError::Io(e));
                false
            }
        }
    }

    /// Returns the source-absolute offset of the first unconsumed byte.
    ///
    /// Equals the `end` of the last produced chunk plus any bytes consumed
    /// by [`SplitStep::Skip`].
    pub fn offset(&self) -> u64 {
        self.consumed
    }

    /// Returns the number of unconsumed bytes currently buffered.
    pub fn buffered(&self) -> usize {
        self.write - self.read
    }

    /// Returns the buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Reads more bytes into the free tail of the buffer.
    ///
    /// Returns `false` when a fatal I/O error was recorded. A zero-length
    /// read marks end of input; a read that fills the buffer to exact
    /// capacity triggers the position/size probe instead, because a source
    /// with no spare buffer space never gets the chance to report a zero
    /// read.
    fn fill(&mut self) -> bool {
        match self.source.read(&mut self.buf[self.write..]) {
            Ok(0) => {
                self.state = State::Draining;
                true
            }
            Ok(n) => {
                self.write += n;
                if self.write == self.buf.len() {
                    match self.at_source_end() {
                        Ok(true) => self.state = State::Draining,
                        Ok(false) => {}
                        Err(e) => {
                            self.state = State::Failed(ScanError::Io(e));
                            return false;
                        }
                    }
                }
                true
            }
            Err(e) => {
                self.state = State::Failed(ScanError::Io(e));
                false
            }
        }
    }

    /// Checks whether the source position has reached its total size.
    fn at_source_end(&mut self) -> std::io::Result<bool> {
        let pos = self.source.stream_position()?;
        let len = self.source.seek(SeekFrom::End(0))?;
        if pos != len {
            self.source.seek(SeekFrom::Start(pos))?;
        }
        Ok(pos == len)
    }
}
