//! Follow a growing file, like `tail -f`.
//!
//! Scans the file line by line, and when the end is reached, waits and
//! resumes instead of quitting. Run with:
//!     cargo run --example tail -- /path/to/file

use std::env;
use std::fs::File;
use std::thread;
use std::time::Duration;

use scanrs::{Scanner, lines};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args().nth(1).ok_or("usage: tail <file>")?;

    let file = File::open(&path)?;
    let mut scanner = Scanner::new(file, lines());

    loop {
        while scanner.scan() {
            let chunk = scanner.chunk().unwrap();
            print!("{}", String::from_utf8_lossy(chunk.data()));
        }

        if let Some(err) = scanner.last_error() {
            return Err(format!("scan failed: {}", err).into());
        }

        thread::sleep(Duration::from_millis(500));
        if !scanner.resume() {
            break;
        }
    }

    Ok(())
}
