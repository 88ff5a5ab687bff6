//! scanrs
//!
//! Buffered stream scanning for Rust.
//!
//! `scanrs` reads a seekable byte source through a fixed-size buffer and
//! splits it into chunks with a caller-supplied recognition strategy. It
//! generalizes line-oriented scanning (split a file on newlines) to arbitrary
//! delimiter or token logic while keeping memory bounded regardless of input
//! size, and it can resume after end of input for sources that grow later
//! (log files being appended to).
//!
//! The crate intentionally:
//! - does NOT interpret chunk contents
//! - does NOT manage files or paths
//! - does NOT manage concurrency
//! - does NOT buffer more than its configured capacity
//!
//! It only does one thing: **Read bytes → yield delimited chunks**
//!
//! # Sync
//!
//! ```no_run
//! use std::fs::File;
//! use scanrs::{Scanner, lines};
//!
//! fn main() -> std::io::Result<()> {
//!     let file = File::open("access.log")?;
//!     let mut scanner = Scanner::new(file, lines());
//!
//!     while scanner.scan() {
//!         let chunk = scanner.chunk().unwrap();
//!         println!("[{}..{}) {} bytes", chunk.start(), chunk.end(), chunk.len());
//!     }
//!     if let Some(err) = scanner.last_error() {
//!         eprintln!("scan failed: {err}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Async (feature = "async-io")
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
//!         println!("chunk {} bytes", chunk.len());
//!     }
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod chunk;
mod config;
mod error;
mod scanner;
mod split;

#[cfg(feature = "async-io")]
mod async_stream;

//
// Public surface (intentionally tiny)
//

pub use chunk::Chunk;
pub use config::{DEFAULT_BUFFER_CAPACITY, ScanConfig};
pub use error::ScanError;
pub use scanner::Scanner;
pub use split::{DelimiterSplit, SequenceSplit, Split, SplitError, SplitStep, lines};

#[cfg(feature = "async-io")]
pub use async_stream::{ScanStream, scan_async};
