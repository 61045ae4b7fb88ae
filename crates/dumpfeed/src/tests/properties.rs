//! Property tests over arbitrary byte streams and split points.

use quickcheck::QuickCheck;

use crate::{ByteSource, SourceOptions};

fn source(data: &[u8]) -> ByteSource {
    ByteSource::from_bytes(data.to_vec(), SourceOptions::default())
}

#[test]
fn blob_reads_partition_the_stream() {
    fn prop(data: Vec<u8>, cut: usize) -> bool {
        let cut = cut % (data.len() + 1);
        let mut src = source(&data);
        let head = src.read_blob(cut as u64).unwrap().to_vec();
        let tail = src.read_blob(data.len() as u64).unwrap().to_vec();
        head.as_slice() == &data[..cut] && tail.as_slice() == &data[cut..]
    }
    QuickCheck::new().quickcheck(prop as fn(Vec<u8>, usize) -> bool);
}

#[test]
fn skip_advances_by_exactly_the_reported_count() {
    fn prop(data: Vec<u8>, cut: usize) -> bool {
        let cut = cut % (data.len() + 1);
        let mut src = source(&data);
        let skipped = src.skip_bytes(cut as u64);
        let rest = src.read_blob(data.len() as u64).unwrap().to_vec();
        skipped == cut as u64 && rest.as_slice() == &data[cut..]
    }
    QuickCheck::new().quickcheck(prop as fn(Vec<u8>, usize) -> bool);
}

#[test]
fn copy_forwards_byte_identical_content() {
    fn prop(data: Vec<u8>, cut: usize) -> bool {
        let cut = cut % (data.len() + 1);
        let mut src = source(&data);
        let mut sink = Vec::new();
        let copied = src.copy_bytes(cut as u64, &mut sink).unwrap();
        let rest = src.read_blob(data.len() as u64).unwrap().to_vec();
        copied == cut as u64
            && sink.as_slice() == &data[..cut]
            && rest.as_slice() == &data[cut..]
    }
    QuickCheck::new().quickcheck(prop as fn(Vec<u8>, usize) -> bool);
}

#[test]
fn requests_past_the_end_stop_there_without_error() {
    fn prop(data: Vec<u8>, extra: u8) -> bool {
        let want = data.len() as u64 + u64::from(extra) + 1;
        let mut skipper = source(&data);
        let mut copier = source(&data);
        let mut sink = Vec::new();
        let skipped = skipper.skip_bytes(want);
        let copied = copier.copy_bytes(want, &mut sink).unwrap();
        skipped == data.len() as u64
            && copied == data.len() as u64
            && sink.as_slice() == data.as_slice()
            && skipper.at_eof()
            && copier.at_eof()
            && !skipper.has_error()
            && !copier.has_error()
    }
    QuickCheck::new().quickcheck(prop as fn(Vec<u8>, u8) -> bool);
}

#[test]
fn peeking_is_invisible_to_byte_reads() {
    fn prop(data: Vec<u8>) -> bool {
        let mut plain = source(&data);
        let mut peeky = source(&data);
        loop {
            let ended = peeky.at_eof();
            let expected = plain.read_byte();
            let got = peeky.read_byte();
            if expected != got || ended != got.is_none() {
                return false;
            }
            if got.is_none() {
                return true;
            }
        }
    }
    QuickCheck::new().quickcheck(prop as fn(Vec<u8>) -> bool);
}

#[test]
fn line_reads_reconstruct_the_stream() {
    fn prop(raw: Vec<Vec<u8>>) -> bool {
        // Newline-free, bound-respecting lines; the join puts the
        // terminators back in.
        let lines: Vec<Vec<u8>> = raw
            .into_iter()
            .map(|line| {
                line.into_iter()
                    .filter(|byte| *byte != b'\n')
                    .take(100)
                    .collect()
            })
            .collect();
        let data = lines.join(&b'\n');

        let mut src = ByteSource::from_bytes(data, SourceOptions::default());
        let mut got: Vec<Vec<u8>> = Vec::new();
        while let Some(line) = src.read_line().unwrap() {
            got.push(line.to_vec());
        }

        // A trailing empty line owns no bytes, so it cannot be observed.
        let mut expect = lines;
        if expect.last().is_some_and(Vec::is_empty) {
            expect.pop();
        }
        got == expect
    }
    QuickCheck::new().quickcheck(prop as fn(Vec<Vec<u8>>) -> bool);
}
