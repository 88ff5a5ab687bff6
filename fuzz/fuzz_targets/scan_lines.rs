#![no_main]

use libfuzzer_sys::fuzz_target;
use scanrs::{ScanConfig, Scanner, lines};
use std::io::Cursor;

fuzz_target!(|data: Vec<u8>| {
    // Capacity must fit the largest token; `len + 1` over-counts the
    // delimiter for the trailing segment, which is harmless.
    let longest = data
        .split(|&b| b == b'\n')
        .map(|seg| seg.len() + 1)
        .max()
        .unwrap_or(1);
    let capacities = [longest, longest + 1, longest * 2, longest.max(4096)];

    let mut reference: Option<Vec<(u64, u64, Vec<u8>)>> = None;

    for capacity in capacities {
        let mut scanner = Scanner::with_config(
            Cursor::new(data.clone()),
            lines(),
            ScanConfig::new(capacity).unwrap(),
        );

        let mut chunks = Vec::new();
        while scanner.scan() {
            let chunk = scanner.chunk().unwrap();
            chunks.push((chunk.start(), chunk.end(), chunk.data().to_vec()));
        }
        assert!(scanner.last_error().is_none());
        assert!(scanner.at_end());

        // Offsets form a gap-free partition starting at zero
        let mut expected_start = 0u64;
        for (start, end, bytes) in &chunks {
            assert_eq!(*start, expected_start);
            assert_eq!(*end - *start, bytes.len() as u64);
            expected_start = *end;
        }
        assert_eq!(expected_start, data.len() as u64);

        // Concatenation reproduces the input exactly
        let rebuilt: Vec<u8> = chunks.iter().flat_map(|(_, _, b)| b.clone()).collect();
        assert_eq!(rebuilt, data);

        // Chunks are identical regardless of buffer capacity
        match &reference {
            None => reference = Some(chunks),
            Some(expected) => assert_eq!(&chunks, expected),
        }
    }
});
