//! Async stream adapter for scanning.
//!
//! Runs the same buffering, compaction, and end-of-input logic as the sync
//! [`Scanner`](crate::Scanner) over `futures_io::AsyncRead + AsyncSeek`. The
//! position/size probe that detects exhaustion on a buffer-filling read is a
//! small seek state machine here, since each seek may complete across
//! multiple polls.
//!
//! A finished stream is terminal: there is no resume on this surface. For
//! tailing a growing source, use the sync scanner's
//! [`resume`](crate::Scanner::resume).
//!
//! # Example
//!
//! ```ignore
//! use futures_util::StreamExt;
//! use scanrs::{scan_async, ScanConfig, lines};
//! use futures_io::{AsyncRead, AsyncSeek};
//!
//! async fn demo<R: AsyncRead + AsyncSeek + Unpin>(source: R) -> Result<(), scanrs::ScanError> {
//!     let mut stream = scan_async(source, lines(), ScanConfig::default());
//!
//!     while let Some(chunk) = stream.next().await {
//!         let chunk = chunk?;
//!         println!("chunk: {} bytes", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

use std::io::SeekFrom;
use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures_core::Stream;
use futures_io::{AsyncRead, AsyncSeek};
use pin_project_lite::pin_project;

use crate::chunk::Chunk;
use crate::config::ScanConfig;
use crate::error::ScanError;
use crate::split::{Split, SplitStep};

/// In-flight step of the end-of-source probe after a buffer-filling read.
#[derive(Debug, Clone, Copy)]
enum Probe {
    Idle,
    Position,
    End { pos: u64 },
    Restore { pos: u64 },
}

pin_project! {
    /// A stream that yields chunks from an async seekable source.
    ///
    /// Uses `futures_io::AsyncRead + AsyncSeek`, which is runtime-agnostic.
    /// Works with tokio (through `tokio_util::compat`), async-std, smol, or
    /// any futures-compatible runtime.
    ///
    /// Yields `Ok(chunk)` per recognized chunk, one `Err` on failure, and
    /// ends after a clean end of input.
    pub struct ScanStream<R, S> {
        #[pin]
        source: R,
        split: S,
        buf: Box<[u8]>,
        read: usize,
        write: usize,
        consumed: u64,
        at_end: bool,
        finished: bool,
        probe: Probe,
    }
}

impl<R, S> ScanStream<R, S> {
    /// Creates a scan stream from an async source.
    ///
    /// # Arguments
    ///
    /// * `source` - An async source implementing `AsyncRead + AsyncSeek`
    /// * `split` - The recognition strategy deciding where chunks end
    /// * `config` - The scan configuration
    pub fn new(source: R, split: S, config: ScanConfig) -> Self {
        Self {
            source,
            split,
            buf: vec![0u8; config.capacity()].into_boxed_slice(),
            read: 0,
            write: 0,
            consumed: 0,
            at_end: false,
            finished: false,
            probe: Probe::Idle,
        }
    }

    /// Returns the source-absolute offset of the first unconsumed byte.
    pub fn offset(&self) -> u64 {
        self.consumed
    }

    /// Returns the buffer capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }
}

impl<R: AsyncRead + AsyncSeek, S: Split> Stream for ScanStream<R, S> {
    type Item = Result<Chunk, ScanError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        loop {
            // Drive any in-flight end-of-source probe to completion before
            // trusting the end flag
            loop {
                let step = match *this.probe {
                    Probe::Idle => break,
                    Probe::Position => this.source.as_mut().poll_seek(cx, SeekFrom::Current(0)),
                    Probe::End { .. } => this.source.as_mut().poll_seek(cx, SeekFrom::End(0)),
                    Probe::Restore { pos } => {
                        this.source.as_mut().poll_seek(cx, SeekFrom::Start(pos))
                    }
                };
                let at = match step {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(Err(e)) => {
                        *this.finished = true;
                        return Poll::Ready(Some(Err(ScanError::Io(e))));
                    }
                    Poll::Ready(Ok(at)) => at,
                };
                *this.probe = match *this.probe {
                    Probe::Idle => unreachable!(),
                    Probe::Position => Probe::End { pos: at },
                    Probe::End { pos } => {
                        if pos == at {
                            *this.at_end = true;
                            Probe::Idle
                        } else {
                            Probe::Restore { pos }
                        }
                    }
                    Probe::Restore { .. } => Probe::Idle,
                };
            }

            // Probe the unconsumed window
            while *this.read < *this.write {
                let window_len = *this.write - *this.read;
                match this
                    .split
                    .split(&this.buf[*this.read..*this.write], *this.at_end)
                {
                    Ok(SplitStep::Token(n)) => {
                        assert!(n > 0, "split returned a zero-length advance");
                        assert!(
                            n <= window_len,
                            "split advanced past the end of the buffered window"
                        );
                        let data = Bytes::copy_from_slice(&this.buf[*this.read..*this.read + n]);
                        let chunk = Chunk::new(data, *this.consumed);
                        *this.read += n;
                        *this.consumed += n as u64;
                        return Poll::Ready(Some(Ok(chunk)));
                    }
                    Ok(SplitStep::Skip(n)) => {
                        assert!(n > 0, "split returned a zero-length advance");
                        assert!(
                            n <= window_len,
                            "split advanced past the end of the buffered window"
                        );
                        *this.read += n;
                        *this.consumed += n as u64;
                    }
                    Ok(SplitStep::NeedMore) => {
                        if *this.at_end {
                            // stream ended before another chunk was recognized
                            *this.finished = true;
                            return Poll::Ready(None);
                        }
                        break;
                    }
                    Err(e) => {
                        *this.finished = true;
                        return Poll::Ready(Some(Err(ScanError::Split(e))));
                    }
                }
            }

            if *this.read == 0 && *this.write == this.buf.len() {
                // the entire buffer held no chunk
                *this.finished = true;
                return Poll::Ready(Some(Err(ScanError::BufferTooSmall {
                    capacity: this.buf.len(),
                })));
            }

            if *this.read == *this.write {
                // buffered data exhausted
                if *this.at_end {
                    *this.finished = true;
                    return Poll::Ready(None);
                }
                *this.read = 0;
                *this.write = 0;
            } else if *this.read > 0 {
                // reclaim consumed space for the next read
                this.buf.copy_within(*this.read..*this.write, 0);
                *this.write -= *this.read;
                *this.read = 0;
            }

            // Refill the free tail of the buffer
            if !*this.at_end && *this.write < this.buf.len() {
                let write = *this.write;
                match this.source.as_mut().poll_read(cx, &mut this.buf[write..]) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(Err(e)) => {
                        *this.finished = true;
                        return Poll::Ready(Some(Err(ScanError::Io(e))));
                    }
                    Poll::Ready(Ok(0)) => *this.at_end = true,
                    Poll::Ready(Ok(n)) => {
                        *this.write += n;
                        if *this.write == this.buf.len() {
                            // exact fill; a zero read can no longer be
                            // observed, so query position against size
                            *this.probe = Probe::Position;
                        }
                    }
                }
            }
        }
    }
}

/// Creates a scan stream from an async seekable source.
///
/// Uses `futures_io::AsyncRead + AsyncSeek` for runtime-agnostic async I/O.
///
/// # Runtime Compatibility
///
/// For tokio users, `tokio_util::compat` converts tokio's I/O traits to the
/// futures ones:
///
/// ```ignore
/// use tokio_util::compat::TokioAsyncReadCompatExt;
/// use scanrs::{scan_async, ScanConfig, lines};
///
/// let file = tokio::fs::File::open("access.log").await?;
/// let stream = scan_async(file.compat(), lines(), ScanConfig::default());
/// ```
///
/// # Arguments
///
/// * `source` - An async source implementing `AsyncRead + AsyncSeek`
/// * `split` - The recognition strategy deciding where chunks end
/// * `config` - The scan configuration
///
/// # Returns
///
/// A [`ScanStream`] implementing `Stream<Item = Result<Chunk, ScanError>>`
pub fn scan_async<R: AsyncRead + AsyncSeek, S: Split>(
    source: R,
    split: S,
    config: ScanConfig,
) -> ScanStream<R, S> {
    ScanStream::new(source, split, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::split::lines;
    use futures_util::StreamExt;
    use futures_util::io::Cursor;

    async fn collect<R, S>(mut stream: ScanStream<R, S>) -> Vec<Chunk>
    where
        R: AsyncRead + AsyncSeek + Unpin,
        S: Split + Unpin,
    {
        let mut chunks = Vec::new();
        while let Some(chunk) = stream.next().await {
            chunks.push(chunk.unwrap());
        }
        chunks
    }

    #[tokio::test]
    async fn test_scan_stream_empty() {
        let stream = scan_async(Cursor::new(Vec::new()), lines(), ScanConfig::default());
        assert!(collect(stream).await.is_empty());
    }

    #[tokio::test]
    async fn test_scan_stream_lines() {
        let source = Cursor::new(b"hello\nworld\n".to_vec());
        let stream = scan_async(source, lines(), ScanConfig::default());

        let chunks = collect(stream).await;
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].range(), 0..6);
        assert_eq!(&chunks[0].data()[..], b"hello\n");
        assert_eq!(chunks[1].range(), 6..12);
        assert_eq!(&chunks[1].data()[..], b"world\n");
    }

    #[tokio::test]
    async fn test_scan_stream_exact_fill_detects_end() {
        // capacity equals the source size; the trailing token has no
        // delimiter and is only emitted once end of input is known
        let source = Cursor::new(b"ab\ncdef".to_vec());
        let stream = scan_async(source, lines(), ScanConfig::new(7).unwrap());

        let chunks = collect(stream).await;
        assert_eq!(chunks.len(), 2);
        assert_eq!(&chunks[0].data()[..], b"ab\n");
        assert_eq!(&chunks[1].data()[..], b"cdef");
    }

    #[tokio::test]
    async fn test_scan_stream_buffer_too_small() {
        let source = Cursor::new(b"hello\nworld\n".to_vec());
        let mut stream = scan_async(source, lines(), ScanConfig::new(5).unwrap());

        let first = stream.next().await.unwrap();
        assert!(matches!(
            first,
            Err(ScanError::BufferTooSmall { capacity: 5 })
        ));
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_scan_stream_matches_sync_scanner() {
        let data: Vec<u8> = (0..512u32)
            .flat_map(|i| {
                if i % 13 == 0 {
                    vec![b'\n']
                } else {
                    vec![(i % 256) as u8 | 1]
                }
            })
            .collect();

        let mut scanner = crate::Scanner::with_config(
            std::io::Cursor::new(data.clone()),
            lines(),
            ScanConfig::new(32).unwrap(),
        );
        let mut expected = Vec::new();
        while scanner.scan() {
            expected.push(scanner.chunk().unwrap().clone());
        }
        assert!(scanner.last_error().is_none());

        let stream = scan_async(Cursor::new(data), lines(), ScanConfig::new(32).unwrap());
        let chunks = collect(stream).await;

        assert_eq!(chunks, expected);
    }
}
