//! `MemoryIo` stream contract tests.

use std::io::{Read, Seek, SeekFrom, Write};

use sparsemem::{Address, GapMode, Memory, MemoryIo};

#[test]
fn sequential_write_then_full_read() {
    let mut mem = Memory::new();
    {
        let mut io = mem.io();
        io.write_all(b"The quick brown fox").unwrap();
    }
    let mut io = mem.io();
    let mut buf = Vec::new();
    io.read_to_end(&mut buf).unwrap();
    assert_eq!(buf, b"The quick brown fox");
}

#[test]
fn seek_and_overwrite_mid_stream() {
    let mut mem = Memory::from_bytes(*b"0123456789", Address(0));
    let mut io = mem.io();
    io.seek(SeekFrom::Start(3)).unwrap();
    io.write_all(b"XYZ").unwrap();
    assert_eq!(io.tell(), Address(6));
    drop(io);
    assert_eq!(mem.to_bytes(None, None, None), b"012XYZ6789");
}

#[test]
fn readline_splits_on_newline_inclusive() {
    let mut mem = Memory::from_bytes(*b"first\nsecond\nthird", Address(0));
    let mut io = mem.io();
    assert_eq!(io.readline().unwrap(), b"first\n");
    assert_eq!(io.readline().unwrap(), b"second\n");
    assert_eq!(io.readline().unwrap(), b"third");
    assert_eq!(io.readline().unwrap(), b"");
}

#[test]
fn readlines_collects_every_remaining_line() {
    let mut mem = Memory::from_bytes(*b"a\nb\nc", Address(0));
    let mut io = mem.io();
    let lines = io.readlines().unwrap();
    assert_eq!(lines, vec![b"a\n".to_vec(), b"b\n".to_vec(), b"c".to_vec()]);
}

#[test]
fn skip_data_and_skip_hole_jump_over_runs() {
    let mut mem = Memory::from_blocks(vec![(Address(0), b"ab".to_vec()), (Address(5), b"xy".to_vec())], true);
    let mut io = MemoryIo::new(&mut mem);
    io.skip_data();
    assert_eq!(io.tell(), Address(2));
    io.skip_hole();
    assert_eq!(io.tell(), Address(5));
}

#[test]
fn peek_does_not_move_the_cursor() {
    let mut mem = Memory::from_bytes(*b"abcdef", Address(0));
    let mut io = mem.io();
    io.seek(SeekFrom::Start(2)).unwrap();
    let peeked = io.peek(3).unwrap();
    assert_eq!(peeked, b"cde");
    assert_eq!(io.tell(), Address(2));
}

#[test]
fn strict_gap_mode_surfaces_an_io_error() {
    let mut mem = Memory::from_blocks(vec![(Address(0), b"ab".to_vec()), (Address(3), b"c".to_vec())], true);
    let mut io = MemoryIo::new(&mut mem).with_gap_mode(GapMode::Strict);
    let mut buf = [0u8; 3];
    let err = io.read_exact(&mut buf).unwrap_err();
    assert_eq!(err.kind(), std::io::ErrorKind::InvalidData);
}

#[test]
fn truncate_shrinks_content_and_getvalue_reflects_it() {
    let mut mem = Memory::from_bytes(*b"abcdefgh", Address(0));
    let mut io = mem.io();
    io.truncate(4);
    assert_eq!(io.getvalue(), b"abcd");
}
