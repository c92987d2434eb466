//! Lazy iteration over a [`Memory`]'s sequence and mapping surfaces.
//!
//! `values`/`rvalues` walk every address in a range, gap cells included
//! (optionally filled from a repeating pattern); `keys`/`items` (and their
//! reverse forms) walk populated addresses only; `intervals`/`gaps`/`blocks`
//! walk at block granularity. `chop` re-tiles the populated blocks into
//! fixed-width windows.

use crate::address::Address;
use crate::block::Block;
use crate::memory::Memory;

/// Forward iterator over every address in `[start, endex)`, gaps included.
pub struct Values<'a> {
    blocks: &'a [Block],
    pattern: Option<&'a [u8]>,
    origin: Address,
    pos: Address,
    end: Address,
    idx: usize,
}

impl<'a> Iterator for Values<'a> {
    type Item = Option<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.end {
            return None;
        }
        while self.idx < self.blocks.len() && self.blocks[self.idx].endex() <= self.pos {
            self.idx += 1;
        }
        let value = if self.idx < self.blocks.len() && self.blocks[self.idx].start <= self.pos {
            let b = &self.blocks[self.idx];
            Some(b.data[(self.pos - b.start) as usize])
        } else {
            self.pattern.map(|p| {
                let phase = self.pos.saturating_distance(self.origin).rem_euclid(p.len() as i64);
                p[phase as usize]
            })
        };
        self.pos = self.pos + 1;
        Some(value)
    }
}

/// Reverse iterator over every address in `[start, endex)`, gaps included.
pub struct RValues<'a> {
    blocks: &'a [Block],
    pattern: Option<&'a [u8]>,
    origin: Address,
    start: Address,
    pos: Address,
    idx: isize,
}

impl<'a> Iterator for RValues<'a> {
    type Item = Option<u8>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos <= self.start {
            return None;
        }
        self.pos = self.pos - 1;
        while self.idx >= 0 && self.blocks[self.idx as usize].start > self.pos {
            self.idx -= 1;
        }
        let value = if self.idx >= 0 && self.blocks[self.idx as usize].endex() > self.pos {
            let b = &self.blocks[self.idx as usize];
            Some(b.data[(self.pos - b.start) as usize])
        } else {
            self.pattern.map(|p| {
                let phase = self.pos.saturating_distance(self.origin).rem_euclid(p.len() as i64);
                p[phase as usize]
            })
        };
        Some(value)
    }
}

impl Memory {
    /// Every address in `[start, endex)` (default: [`Memory::span`]), gap
    /// cells included. With `pattern`, gaps are filled cyclically, phase
    /// aligned to `start`; without one, gaps yield `None`.
    #[must_use]
    pub fn values<'a>(
        &'a self,
        start: Option<Address>,
        endex: Option<Address>,
        pattern: Option<&'a [u8]>,
    ) -> Values<'a> {
        let (s, e) = self.resolve_range(start, endex);
        let idx = self.blocks.block_index_start(s);
        Values {
            blocks: self.blocks.as_slice(),
            pattern,
            origin: s,
            pos: s,
            end: e,
            idx,
        }
    }

    /// Reverse counterpart of [`Memory::values`].
    #[must_use]
    pub fn rvalues<'a>(
        &'a self,
        start: Option<Address>,
        endex: Option<Address>,
        pattern: Option<&'a [u8]>,
    ) -> RValues<'a> {
        let (s, e) = self.resolve_range(start, endex);
        let idx = self.blocks.block_index_endex(e) as isize - 1;
        RValues {
            blocks: self.blocks.as_slice(),
            pattern,
            origin: s,
            start: s,
            pos: e,
            idx,
        }
    }

    /// Populated addresses only, in `[start, endex)` (default: [`Memory::span`]).
    #[must_use]
    pub fn keys(
        &self,
        start: Option<Address>,
        endex: Option<Address>,
    ) -> impl DoubleEndedIterator<Item = Address> + '_ {
        let (s, e) = self.resolve_range(start, endex);
        self.items_in(s, e).map(|(addr, _)| addr)
    }

    /// Populated addresses only, in `[start, endex)`, right to left.
    #[must_use]
    pub fn rkeys(
        &self,
        start: Option<Address>,
        endex: Option<Address>,
    ) -> impl Iterator<Item = Address> + '_ {
        self.keys(start, endex).rev()
    }

    /// `(address, byte)` pairs for populated addresses in `[start, endex)`.
    #[must_use]
    pub fn items(
        &self,
        start: Option<Address>,
        endex: Option<Address>,
    ) -> impl DoubleEndedIterator<Item = (Address, u8)> + '_ {
        let (s, e) = self.resolve_range(start, endex);
        self.items_in(s, e)
    }

    /// Like [`Memory::items`], right to left.
    #[must_use]
    pub fn ritems(
        &self,
        start: Option<Address>,
        endex: Option<Address>,
    ) -> impl Iterator<Item = (Address, u8)> + '_ {
        self.items(start, endex).rev()
    }

    /// The `(start, endex)` span of every block, ignoring bounds.
    #[must_use]
    pub fn intervals(&self) -> impl DoubleEndedIterator<Item = (Address, Address)> + '_ {
        self.blocks.iter().map(|b| (b.start, b.endex()))
    }

    /// The gap intervals inside `[start, endex)` (default:
    /// [`Memory::span`]). A gap touching an edge whose bound is absent —
    /// i.e. `start`/`endex` was left `None` and no [`crate::Bounds`] clamps
    /// that side — is reported with `None` on that open side, rather than
    /// the finite `content_start`/`content_endex` that clamps it internally.
    #[must_use]
    pub fn gaps(
        &self,
        start: Option<Address>,
        endex: Option<Address>,
    ) -> std::vec::IntoIter<(Option<Address>, Option<Address>)> {
        let open_start = start.is_none() && self.bounds.start().is_none();
        let open_endex = endex.is_none() && self.bounds.endex().is_none();
        let (s, e) = self.resolve_range(start, endex);

        let mut out = Vec::new();
        if self.blocks.is_empty() {
            if open_start || open_endex || s < e {
                let lo = if open_start { None } else { Some(s) };
                let hi = if open_endex { None } else { Some(e) };
                out.push((lo, hi));
            }
            return out.into_iter();
        }

        if open_start {
            out.push((None, Some(s)));
        }
        out.extend(self.gaps_within(s, e).into_iter().map(|(gs, ge)| (Some(gs), Some(ge))));
        if open_endex {
            out.push((Some(e), None));
        }
        out.into_iter()
    }

    /// `(start, data)` for every block, ignoring bounds.
    #[must_use]
    pub fn blocks(&self) -> impl DoubleEndedIterator<Item = (Address, &[u8])> + '_ {
        self.blocks.iter().map(|b| (b.start, b.data.as_slice()))
    }

    /// Alias of [`Memory::blocks`] — content is always reported without
    /// bounds applied, since bounds only ever clip, never hide, populated
    /// blocks.
    #[must_use]
    pub fn content_blocks(&self) -> impl DoubleEndedIterator<Item = (Address, &[u8])> + '_ {
        self.blocks()
    }

    /// Alias of [`Memory::items`] over the full content span.
    #[must_use]
    pub fn content_items(&self) -> impl DoubleEndedIterator<Item = (Address, u8)> + '_ {
        let (s, e) = self.content_span();
        self.items_in(s, e)
    }

    /// Alias of [`Memory::keys`] over the full content span.
    #[must_use]
    pub fn content_keys(&self) -> impl DoubleEndedIterator<Item = Address> + '_ {
        self.content_items().map(|(addr, _)| addr)
    }

    /// Alias of [`Memory::values`] over the full content span.
    #[must_use]
    pub fn content_values(&self) -> Values<'_> {
        let (s, e) = self.content_span();
        self.values(Some(s), Some(e), None)
    }

    /// Lazily re-tiles populated content into fixed-width `(addr, data)`
    /// windows of `step` bytes. When `align` is `true`, tile boundaries fall
    /// on multiples of `step` from address `0`, so the first tile of a
    /// block may be shorter than `step`; when `false`, tiling restarts at
    /// each block's own start.
    #[must_use]
    pub fn chop(
        &self,
        step: usize,
        start: Option<Address>,
        endex: Option<Address>,
        align: bool,
    ) -> impl Iterator<Item = (Address, Vec<u8>)> + '_ {
        assert!(step >= 1, "chop step must be >= 1");
        let (s, e) = self.resolve_range(start, endex);
        self.blocks.iter().flat_map(move |b| {
            let bstart = b.start.max(s);
            let bendex = b.endex().min(e);
            let mut tiles = Vec::new();
            if bstart < bendex {
                let skip = bstart.saturating_distance(b.start).max(0) as usize;
                let take = bendex.saturating_distance(bstart).max(0) as usize;
                let data = &b.data[skip..skip + take];
                let mut cursor = bstart;
                let mut offset = 0usize;
                if align {
                    let phase = cursor.saturating_distance(Address::ZERO).rem_euclid(step as i64) as usize;
                    if phase != 0 {
                        let first_len = (step - phase).min(data.len());
                        tiles.push((cursor, data[..first_len].to_vec()));
                        offset = first_len;
                        cursor = cursor.saturating_add(first_len as i64);
                    }
                }
                while offset < data.len() {
                    let len = step.min(data.len() - offset);
                    tiles.push((cursor, data[offset..offset + len].to_vec()));
                    cursor = cursor.saturating_add(len as i64);
                    offset += len;
                }
            }
            tiles
        })
    }
}
