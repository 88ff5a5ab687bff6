//! Async streaming support for scanning.
//!
//! This module provides asynchronous scanning using the `futures-io`
//! `AsyncRead` and `AsyncSeek` traits, making it runtime-agnostic and
//! compatible with tokio, async-std, smol, and other async runtimes.
//!
//! - [`scan_async`] - Creates an async stream of chunks from an async source
//!
//! This module requires the `async-io` feature to be enabled.

mod stream;

pub use stream::{ScanStream, scan_async};
