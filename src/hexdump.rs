//! Hex/ASCII dump formatting, 16 columns per line: `{addr:08x}: {hex} |
//! {ascii}`. Populated bytes render normally in both fields; gap cells
//! render as `--` in the hex field (the unambiguous signal — `.` in the
//! ASCII field already does double duty for non-printable bytes, so it
//! can't also mean "absent").

use std::fmt::Write as _;

use crate::address::Address;
use crate::memory::Memory;

const COLUMNS: usize = 16;

impl Memory {
    /// Renders `[start, endex)` (default: [`Memory::span`]) as a multi-line
    /// hex/ASCII dump.
    #[must_use]
    pub fn hexdump(&self, start: Option<Address>, endex: Option<Address>) -> String {
        let (s, e) = self.resolve_range(start, endex);
        let mut out = String::new();
        let mut addr = s;
        while addr < e {
            let row_end = addr.saturating_add(COLUMNS as i64).min(e);
            write!(out, "{:08x}: ", addr.0).unwrap();

            let mut cursor = addr;
            while cursor < addr.saturating_add(COLUMNS as i64) {
                if cursor < row_end {
                    match self.peek(cursor) {
                        Some(byte) => write!(out, "{byte:02x} ").unwrap(),
                        None => out.push_str("-- "),
                    }
                } else {
                    out.push_str("   ");
                }
                cursor = cursor + 1;
            }

            out.push_str("| ");
            let mut cursor = addr;
            while cursor < row_end {
                match self.peek(cursor) {
                    Some(byte) if (0x20..0x7f).contains(&byte) => out.push(byte as char),
                    _ => out.push('.'),
                }
                cursor = cursor + 1;
            }
            out.push('\n');
            addr = row_end;
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hexdump_marks_gaps_distinctly_from_zero_bytes() {
        let mem = Memory::from_blocks(vec![(Address(0), vec![0x00, 0x41]), (Address(4), vec![0xff])], true);
        let dump = mem.hexdump(Some(Address(0)), Some(Address(5)));
        let line = dump.lines().next().unwrap();
        assert!(line.contains("00 41 -- -- ff"));
        assert!(line.ends_with(".A..."));
    }
}
