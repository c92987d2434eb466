//! Concrete boundary scenarios: a base layout `S1 = [(5, "abc"), (10, "xy")]`
//! put through each mutation in turn.

use sparsemem::{Address, Memory};

fn s1() -> Memory {
    Memory::from_blocks(
        vec![(Address(5), b"abc".to_vec()), (Address(10), b"xy".to_vec())],
        true,
    )
}

fn blocks(mem: &Memory) -> Vec<(i64, Vec<u8>)> {
    mem.blocks().map(|(addr, data)| (addr.0, data.to_vec())).collect()
}

#[test]
fn s2_write_overlapping_two_blocks_merges_them() {
    let mut mem = s1();
    mem.write(Address(7), b"ZZZZ");
    assert_eq!(blocks(&mem), vec![(5, b"abZZZZy".to_vec())]);
}

#[test]
fn s3_insert_in_the_middle_of_a_block_splits_and_shifts() {
    let mut mem = s1();
    mem.insert(Address(6), b"*");
    assert_eq!(blocks(&mem), vec![(5, b"a*bc".to_vec()), (11, b"xy".to_vec())]);
}

#[test]
fn s4_delete_spanning_the_gap_compacts_and_merges_the_seam() {
    let mut mem = s1();
    mem.delete(Address(6), Address(11));
    assert_eq!(blocks(&mem), vec![(5, b"ay".to_vec())]);
}

#[test]
fn s5_clear_leaves_a_gap_without_shifting() {
    let mut mem = s1();
    mem.clear(Address(6), Address(11));
    assert_eq!(blocks(&mem), vec![(5, b"a".to_vec()), (11, b"y".to_vec())]);
}

#[test]
fn s6_flood_fills_only_gaps_aligned_to_its_own_start() {
    let mut mem = s1();
    mem.flood(Address(4), Address(13), b".");
    assert_eq!(blocks(&mem), vec![(4, b".abc..xy.".to_vec())]);
}

#[test]
fn s7_write_past_bound_endex_is_silently_truncated() {
    let mut mem = Memory::with_bounds(Some(Address(0)), Some(Address(4)));
    mem.write(Address(2), b"abcd");
    assert_eq!(blocks(&mem), vec![(2, b"ab".to_vec())]);
}

#[test]
fn s8_shift_past_bound_start_discards_only_the_overflowing_byte() {
    let mut mem = s1().bound(Some(Address(0)), None);
    mem.shift(-6);
    // "abc" at 5 shifts to -1,0,1: only the 'a' at -1 falls outside bounds
    // and is discarded, leaving "bc" at 0. "xy" at 10 shifts to 4.
    assert_eq!(blocks(&mem), vec![(0, b"bc".to_vec()), (4, b"xy".to_vec())]);
}

#[test]
fn crop_drops_everything_outside_the_kept_range() {
    let mut mem = s1();
    mem.crop(Address(7), Address(11));
    assert_eq!(blocks(&mem), vec![(7, b"c".to_vec()), (10, b"x".to_vec())]);
}

#[test]
fn cut_extracts_and_clears_in_one_step() {
    let mut mem = s1();
    let cut = mem.cut(Address(5), Address(8), None);
    assert_eq!(cut.to_bytes(None, None, None), b"abc");
    assert_eq!(mem.peek(Address(6)), None);
    assert_eq!(mem.peek(Address(10)), Some(b'x'));
}

#[test]
fn reserve_opens_a_gap_without_writing_into_it() {
    let mut mem = s1();
    mem.reserve(Address(6), 3);
    assert_eq!(blocks(&mem), vec![(5, b"a".to_vec()), (9, b"bc".to_vec()), (13, b"xy".to_vec())]);
}

#[test]
fn append_and_extend_grow_past_content_endex() {
    let mut mem = Memory::from_bytes(*b"abc", Address(0));
    mem.append(b'd');
    mem.extend(b"ef", 1);
    assert_eq!(mem.to_bytes(None, None, None), b"abcd\0ef");
}

#[test]
fn find_and_count_locate_pattern_matches() {
    let mem = Memory::from_bytes(*b"abcabcabc", Address(0));
    assert_eq!(mem.find(b"bc", None, None).unwrap(), Address(1));
    assert_eq!(mem.rfind(b"bc", None, None).unwrap(), Address(7));
    assert_eq!(mem.count(b"abc", None, None), 3);
    assert!(mem.ofind(b"zz", None, None).is_none());
}

#[test]
fn index_and_rindex_search_populated_cells_for_a_single_value() {
    let mem = s1();
    assert_eq!(mem.index(b'x', None, None).unwrap(), Address(10));
    assert_eq!(mem.rindex(b'a', None, None).unwrap(), Address(5));
    assert!(mem.index(b'Q', None, None).is_err());
}

#[test]
fn equal_span_and_block_span_report_matching_granularity() {
    let mem = Memory::from_bytes(*b"aabbbc", Address(0));
    assert_eq!(mem.equal_span(Address(2)), (Address(2), Address(5), Some(b'b')));
    let (start, endex, populated) = mem.block_span(Address(2));
    assert_eq!((start, endex, populated), (Address(0), Address(6), true));
}

#[test]
fn contiguous_reports_whether_the_visible_span_is_one_solid_block() {
    assert!(Memory::from_bytes(*b"abc", Address(0)).contiguous());
    assert!(!s1().contiguous());
}

#[test]
fn hex_requires_contiguity() {
    assert!(Memory::from_bytes(*b"\xDE\xAD\xBE\xEF", Address(0)).hex().is_ok());
    assert!(s1().hex().is_err());
}

#[test]
fn s1_peek_content_size_and_intervals_match_the_base_layout() {
    let mem = s1();
    assert_eq!(mem.peek(Address(5)), Some(b'a'));
    assert_eq!(mem.peek(Address(8)), None);
    assert_eq!(mem.peek(Address(10)), Some(b'x'));
    assert_eq!(mem.content_size(), 5);
    assert_eq!(
        mem.intervals().collect::<Vec<_>>(),
        vec![(Address(5), Address(8)), (Address(10), Address(12))]
    );
}

#[test]
fn s1_gaps_report_none_on_the_open_ends() {
    let mem = s1();
    assert_eq!(
        mem.gaps(None, None).collect::<Vec<_>>(),
        vec![
            (None, Some(Address(5))),
            (Some(Address(8)), Some(Address(10))),
            (Some(Address(12)), None),
        ]
    );
}

#[test]
fn s5_bounds_override_start_endex_and_len() {
    let mem = s1().bound(Some(Address(6)), Some(Address(11)));
    assert_eq!(mem.start(), Address(6));
    assert_eq!(mem.endex(), Address(11));
    assert_eq!(mem.len(), 5);
    assert!(!mem.is_empty());
    assert_eq!(
        mem.to_blocks(None, None),
        vec![(Address(6), b"bc".to_vec()), (Address(10), b"x".to_vec())]
    );
}

#[test]
fn chop_retiles_blocks_into_fixed_width_windows() {
    let mem = Memory::from_bytes(*b"abcdefghij", Address(0));
    let tiles: Vec<_> = mem.chop(4, None, None, false).collect();
    assert_eq!(
        tiles,
        vec![
            (Address(0), b"abcd".to_vec()),
            (Address(4), b"efgh".to_vec()),
            (Address(8), b"ij".to_vec()),
        ]
    );
}
