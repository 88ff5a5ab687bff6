//! Line splitting example.
//!
//! Run with:
//!     cargo run --example lines -- /path/to/file

use std::env;
use std::fs::File;

use scanrs::{Scanner, lines};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| "Cargo.toml".to_string());

    println!("Scanning file: {}\n", path);

    let file = File::open(&path)?;
    let mut scanner = Scanner::new(file, lines());

    let mut total_chunks = 0;
    let mut total_bytes = 0;

    while scanner.scan() {
        let chunk = scanner.chunk().unwrap();
        total_chunks += 1;
        total_bytes += chunk.len();

        println!(
            "Chunk {}: [{:>8}..{:>8}), {:>6} bytes",
            total_chunks,
            chunk.start(),
            chunk.end(),
            chunk.len()
        );
    }

    if let Some(err) = scanner.last_error() {
        return Err(format!("scan failed: {}", err).into());
    }

    println!("\nTotal: {} chunks, {} bytes", total_chunks, total_bytes);
    Ok(())
}
