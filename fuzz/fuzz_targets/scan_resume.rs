#![no_main]

use libfuzzer_sys::fuzz_target;
use scanrs::{ScanConfig, Scanner, SplitError, SplitStep};
use std::cell::RefCell;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::rc::Rc;

/// A seekable source over shared bytes that can grow between scans.
struct SharedSource {
    data: Rc<RefCell<Vec<u8>>>,
    pos: u64,
}

impl Read for SharedSource {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let data = self.data.borrow();
        let pos = (self.pos as usize).min(data.len());
        let n = (&data[pos..]).read(buf)?;
        self.pos += n as u64;
        Ok(n)
    }
}

impl Seek for SharedSource {
    fn seek(&mut self, from: SeekFrom) -> io::Result<u64> {
        let len = self.data.borrow().len() as i64;
        let next = match from {
            SeekFrom::Start(p) => p as i64,
            SeekFrom::End(d) => len + d,
            SeekFrom::Current(d) => self.pos as i64 + d,
        };
        assert!(next >= 0, "seek before start");
        self.pos = next as u64;
        Ok(self.pos)
    }
}

// A token must end in a newline, even at end of input, so nothing is emitted
// early at the halt between the two phases.
fn strict_lines(window: &[u8], _at_end: bool) -> Result<SplitStep, SplitError> {
    match window.iter().position(|&b| b == b'\n') {
        Some(i) => Ok(SplitStep::Token(i + 1)),
        None => Ok(SplitStep::NeedMore),
    }
}

fuzz_target!(|input: (Vec<u8>, Vec<u8>)| {
    let (first, second) = input;
    let whole: Vec<u8> = first.iter().chain(second.iter()).copied().collect();

    let longest = whole
        .split(|&b| b == b'\n')
        .map(|seg| seg.len() + 1)
        .max()
        .unwrap_or(1);
    let config = ScanConfig::new(longest.max(8)).unwrap();

    // One-shot scan over the whole input
    let mut oneshot = Scanner::with_config(Cursor::new(whole.clone()), strict_lines, config);
    let mut expected = Vec::new();
    while oneshot.scan() {
        let chunk = oneshot.chunk().unwrap();
        expected.push((chunk.start(), chunk.end(), chunk.data().to_vec()));
    }
    assert!(oneshot.last_error().is_none());

    // Two-phase scan: drain the first part, grow the source, resume
    let data = Rc::new(RefCell::new(first));
    let source = SharedSource {
        data: Rc::clone(&data),
        pos: 0,
    };
    let mut scanner = Scanner::with_config(source, strict_lines, config);

    let mut chunks = Vec::new();
    while scanner.scan() {
        let chunk = scanner.chunk().unwrap();
        chunks.push((chunk.start(), chunk.end(), chunk.data().to_vec()));
    }
    assert!(scanner.at_end());
    assert!(scanner.last_error().is_none());

    data.borrow_mut().extend_from_slice(&second);
    assert!(scanner.resume());

    while scanner.scan() {
        let chunk = scanner.chunk().unwrap();
        chunks.push((chunk.start(), chunk.end(), chunk.data().to_vec()));
    }
    assert!(scanner.at_end());
    assert!(scanner.last_error().is_none());

    // No byte is duplicated or dropped across the resume boundary
    assert_eq!(chunks, expected);
});
