//! The [`Memory`] façade: construction, the mutation algebra, and the
//! dual sequence/mapping query surface.

use error_stack::{Report, Result as ErResult};

use crate::address::Address;
use crate::block::{Block, BlockVector};
use crate::bounds::Bounds;
use crate::error::{ContiguityRequiredError, DataGapError, NotFoundError, OutOfBoundsError, ValueRangeError};

/// A sparse, byte-addressable virtual memory.
///
/// `Memory` is simultaneously an **ordered sequence** over `[start, endex)`
/// — where unpopulated positions contribute the absence sentinel — and a
/// **mapping** from [`Address`] to `u8` over populated addresses only. See
/// the crate documentation for the full model.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Memory {
    pub(crate) blocks: BlockVector,
    pub(crate) bounds: Bounds,
}

impl Memory {
    /// Creates an empty, unbounded memory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty memory with the given bounds.
    #[must_use]
    pub fn with_bounds(start: Option<Address>, endex: Option<Address>) -> Self {
        Self {
            blocks: BlockVector::new(),
            bounds: Bounds::new(start, endex),
        }
    }

    /// Builds a single contiguous block at `offset`.
    #[must_use]
    pub fn from_bytes(data: impl Into<Vec<u8>>, offset: Address) -> Self {
        let data = data.into();
        let blocks = if data.is_empty() {
            BlockVector::new()
        } else {
            BlockVector::from_sorted_unchecked(vec![Block::new(offset, data)])
        };
        Self {
            blocks,
            bounds: Bounds::UNBOUNDED,
        }
    }

    /// Builds from explicit `(start, data)` blocks. When `validate` is
    /// `true` the blocks are sorted and any that overlap or touch are
    /// merged (later blocks win on overlap); when `false`, the caller
    /// attests the blocks already satisfy I1–I3 and they are taken as-is.
    #[must_use]
    pub fn from_blocks(blocks: Vec<(Address, Vec<u8>)>, validate: bool) -> Self {
        let blocks: Vec<Block> = blocks
            .into_iter()
            .filter(|(_, data)| !data.is_empty())
            .map(|(start, data)| Block::new(start, data))
            .collect();
        let blocks = if validate {
            BlockVector::from_unsorted(blocks)
        } else {
            BlockVector::from_sorted_unchecked(blocks)
        };
        Self {
            blocks,
            bounds: Bounds::UNBOUNDED,
        }
    }

    /// Deep-copies `other`.
    #[must_use]
    pub fn from_memory(other: &Self) -> Self {
        other.clone()
    }

    /// Builds from `(address, byte)` pairs; later writes to the same
    /// address overwrite earlier ones, in iteration order.
    #[must_use]
    pub fn from_items(items: impl IntoIterator<Item = (Address, u8)>) -> Self {
        let mut mem = Self::new();
        for (addr, byte) in items {
            mem.blocks.write(addr, &[byte]);
        }
        mem
    }

    /// Builds from consecutive values starting at `offset`; `None` entries
    /// produce gaps.
    #[must_use]
    pub fn from_values(values: impl IntoIterator<Item = Option<u8>>, offset: Address) -> Self {
        let mut mem = Self::new();
        let mut addr = offset;
        for value in values {
            if let Some(byte) = value {
                mem.blocks.write(addr, &[byte]);
            }
            addr = addr + 1;
        }
        mem
    }

    /// Builds a single contiguous block at address `0` from a hex string
    /// (whitespace ignored).
    pub fn fromhex(hexstr: &str) -> ErResult<Self, ValueRangeError> {
        let cleaned: String = hexstr.chars().filter(|c| !c.is_whitespace()).collect();
        if cleaned.len() % 2 != 0 {
            return Err(Report::new(ValueRangeError)
                .attach_printable("hex string has an odd number of digits"));
        }
        let mut data = Vec::with_capacity(cleaned.len() / 2);
        let bytes = cleaned.as_bytes();
        for chunk in bytes.chunks(2) {
            let hi = (chunk[0] as char).to_digit(16);
            let lo = (chunk[1] as char).to_digit(16);
            match (hi, lo) {
                (Some(hi), Some(lo)) => data.push((hi * 16 + lo) as u8),
                _ => {
                    return Err(Report::new(ValueRangeError)
                        .attach_printable("non-hex-digit character in hex string"))
                }
            }
        }
        Ok(Self::from_bytes(data, Address::ZERO))
    }

    /// Replaces the active bounds, retroactively clipping any existing
    /// blocks that now fall outside them.
    pub fn set_bounds(&mut self, start: Option<Address>, endex: Option<Address>) {
        self.bounds = Bounds::new(start, endex);
        if let Some(s) = self.bounds.start() {
            self.blocks.carve(Address::MIN, s);
        }
        if let Some(e) = self.bounds.endex() {
            self.blocks.carve(e, Address::MAX);
        }
    }

    /// The currently active bounds.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Consumes `self` with new bounds applied (builder-style).
    #[must_use]
    pub fn bound(mut self, start: Option<Address>, endex: Option<Address>) -> Self {
        self.set_bounds(start, endex);
        self
    }

    // ---------------------------------------------------------------
    // Derived quantities
    // ---------------------------------------------------------------

    /// The first populated address, or the lower bound / `0` when empty.
    #[must_use]
    pub fn content_start(&self) -> Address {
        self.blocks
            .first()
            .map(|b| b.start)
            .unwrap_or_else(|| self.bounds.start().unwrap_or(Address::ZERO))
    }

    /// One past the last populated address, or the upper bound / `0` when
    /// empty.
    #[must_use]
    pub fn content_endex(&self) -> Address {
        self.blocks
            .last()
            .map(Block::endex)
            .unwrap_or_else(|| self.bounds.endex().unwrap_or(Address::ZERO))
    }

    /// `(content_start, content_endex)`.
    #[must_use]
    pub fn content_span(&self) -> (Address, Address) {
        (self.content_start(), self.content_endex())
    }

    /// Total populated byte count, ignoring bounds.
    #[must_use]
    pub fn content_size(&self) -> u64 {
        self.blocks.iter().map(|b| b.len() as u64).sum()
    }

    /// Number of blocks, ignoring bounds.
    #[must_use]
    pub fn content_parts(&self) -> usize {
        self.blocks.len()
    }

    /// The bounds-overridden start: `bound_start` if set, else
    /// [`Self::content_start`].
    #[must_use]
    pub fn start(&self) -> Address {
        self.bounds.start().unwrap_or_else(|| self.content_start())
    }

    /// The bounds-overridden endex: `bound_endex` if set, else
    /// [`Self::content_endex`].
    #[must_use]
    pub fn endex(&self) -> Address {
        self.bounds.endex().unwrap_or_else(|| self.content_endex())
    }

    /// `(start, endex)`.
    #[must_use]
    pub fn span(&self) -> (Address, Address) {
        (self.start(), self.endex())
    }

    /// `max(0, endex - start)`.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.endex().saturating_distance(self.start()).max(0) as u64
    }

    /// `true` if [`Self::len`] is zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `true` iff there is at most one block and the bounds-overridden span
    /// introduces no gap at either edge.
    #[must_use]
    pub fn contiguous(&self) -> bool {
        if self.is_empty() {
            return true;
        }
        self.blocks.len() <= 1 && self.gaps_within_span_are_empty()
    }

    fn gaps_within_span_are_empty(&self) -> bool {
        let (start, endex) = self.span();
        match self.blocks.first() {
            None => start >= endex,
            Some(first) => {
                let last_endex = self.blocks.last().map_or(first.endex(), Block::endex);
                first.start <= start && last_endex >= endex
            }
        }
    }

    // ---------------------------------------------------------------
    // Single-cell access
    // ---------------------------------------------------------------

    /// Reads a single cell. Bounds never fabricate data: an address outside
    /// bounds (or simply unpopulated) reads as absence.
    #[must_use]
    pub fn peek(&self, addr: Address) -> Option<u8> {
        let idx = self.blocks.block_index_at(addr)?;
        let block = &self.blocks.as_slice()[idx];
        Some(block.data[(addr - block.start) as usize])
    }

    /// Writes (or, for `None`, clears) a single cell. Fails if bounds are
    /// set and `addr` falls outside them.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub fn poke(&mut self, addr: Address, value: Option<u8>) -> ErResult<(), OutOfBoundsError> {
        if self.bounds.clip_point(addr).is_none() {
            return Err(Report::new(OutOfBoundsError)
                .attach_printable(format!("address {addr} is outside the active bounds")));
        }
        match value {
            Some(byte) => self.blocks.write(addr, &[byte]),
            None => self.blocks.carve(addr, addr + 1),
        }
        Ok(())
    }

    /// The current value at `addr`, for use as a `poke` backup.
    #[must_use]
    pub fn poke_backup(&self, addr: Address) -> (Address, Option<u8>) {
        (addr, self.peek(addr))
    }

    /// Restores a value previously captured by [`Self::poke_backup`].
    pub fn poke_restore(&mut self, backup: (Address, Option<u8>)) {
        let _ = self.poke(backup.0, backup.1);
    }

    // ---------------------------------------------------------------
    // Range mutation algebra
    // ---------------------------------------------------------------

    /// Overwrites `[start, start + src.len())`, clipped to bounds.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self, src)))]
    pub fn write(&mut self, start: Address, src: &[u8]) {
        if src.is_empty() {
            return;
        }
        let endex = start.saturating_add(src.len() as i64);
        if let Some((cs, ce)) = self.bounds.clip(start, endex) {
            let skip = cs.saturating_distance(start).max(0) as usize;
            let take = ce.saturating_distance(cs).max(0) as usize;
            if take > 0 {
                self.blocks.write(cs, &src[skip..skip + take]);
            }
        }
    }

    /// Overwrites `[start, start + src.len())` with another memory's
    /// content; `src`'s internal gaps remain gaps in `self`.
    pub fn write_memory(&mut self, start: Address, src: &Self) {
        if src.blocks.is_empty() {
            return;
        }
        let origin = src.content_start();
        let offset = start - origin;
        for block in src.blocks.iter() {
            self.write(block.start + offset, &block.data);
        }
    }

    /// Captures the pre-state of `[start, start + len)` for later restore.
    #[must_use]
    pub fn write_backup(&self, start: Address, len: usize) -> Self {
        self.extract(start, start.saturating_add(len as i64))
    }

    /// Restores a region previously captured by [`Self::write_backup`] (or
    /// by [`Self::clear_backup`] — the two share the same in-place
    /// restore).
    pub fn write_restore(&mut self, start: Address, endex: Address, backup: &Self) {
        self.clear(start, endex);
        self.write_memory(start, backup);
    }

    /// Shifts every byte at `start` or later right by `src.len()`, then
    /// writes `src` at `start`. Clipped to bounds.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self, src)))]
    pub fn insert(&mut self, at: Address, src: &[u8]) {
        if src.is_empty() {
            return;
        }
        let Some(at) = self.bounds.clip_point(at) else {
            return;
        };
        let data = if let Some(be) = self.bounds.endex() {
            let room = be.saturating_distance(at).max(0) as usize;
            &src[..room.min(src.len())]
        } else {
            src
        };
        if data.is_empty() {
            return;
        }
        self.blocks.insert(at, data);
        if let Some(be) = self.bounds.endex() {
            self.blocks.carve(be, Address::MAX);
        }
    }

    /// Like [`Self::insert`], but the inserted content is another memory —
    /// `src`'s internal gaps remain gaps.
    pub fn insert_memory(&mut self, at: Address, src: &Self) {
        if src.blocks.is_empty() {
            return;
        }
        let Some(at) = self.bounds.clip_point(at) else {
            return;
        };
        let (cs, ce) = src.span();
        let size = ce.saturating_distance(cs).max(0);
        self.blocks.reserve(at, size);
        self.write_memory(at, src);
        if let Some(be) = self.bounds.endex() {
            self.blocks.carve(be, Address::MAX);
        }
    }

    /// Captures `(addr, len)` for later restore via [`Self::insert_restore`].
    #[must_use]
    pub fn insert_backup(addr: Address, len: usize) -> (Address, usize) {
        (addr, len)
    }

    /// Restores by deleting the previously-inserted range.
    pub fn insert_restore(&mut self, backup: (Address, usize)) {
        let (addr, len) = backup;
        self.delete(addr, addr.saturating_add(len as i64));
    }

    /// Removes `[start, endex)` and shifts everything after it left to
    /// close the gap.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub fn delete(&mut self, start: Address, endex: Address) {
        let Some((cs, ce)) = self.bounds.clip(start, endex) else {
            return;
        };
        self.blocks.delete(cs, ce);
    }

    /// Captures `[start, endex)` for later restore via [`Self::delete_restore`].
    #[must_use]
    pub fn delete_backup(&self, start: Address, endex: Address) -> Self {
        self.extract(start, endex)
    }

    /// Restores a region previously removed by [`Self::delete`].
    pub fn delete_restore(&mut self, at: Address, backup: &Self) {
        self.insert_memory(at, backup);
    }

    /// Removes `[start, endex)`, leaving a gap (no shifting).
    pub fn clear(&mut self, start: Address, endex: Address) {
        let Some((cs, ce)) = self.bounds.clip(start, endex) else {
            return;
        };
        self.blocks.carve(cs, ce);
    }

    /// Captures `[start, endex)` for later restore via [`Self::clear_restore`].
    #[must_use]
    pub fn clear_backup(&self, start: Address, endex: Address) -> Self {
        self.extract(start, endex)
    }

    /// Restores a region previously cleared by [`Self::clear`].
    pub fn clear_restore(&mut self, start: Address, endex: Address, backup: &Self) {
        self.write_restore(start, endex, backup);
    }

    /// Drops everything outside `[start, endex)`, without shifting the
    /// survivors.
    pub fn crop(&mut self, start: Address, endex: Address) {
        match self.bounds.clip(start, endex) {
            Some((cs, ce)) => self.blocks.crop(cs, ce),
            None => self.blocks.carve(Address::MIN, Address::MAX),
        }
    }

    /// Extracts `[start, endex)` and then [`Self::clear`]s it in place.
    #[must_use]
    pub fn cut(&mut self, start: Address, endex: Address, bound: Option<Bounds>) -> Self {
        let extracted = self.extract_full(start, endex, None, 1, bound);
        self.clear(start, endex);
        extracted
    }

    /// Shifts everything at `at` or later right by `size`, leaving a gap.
    pub fn reserve(&mut self, at: Address, size: i64) {
        if size <= 0 {
            return;
        }
        let Some(at) = self.bounds.clip_point(at) else {
            return;
        };
        self.blocks.reserve(at, size);
    }

    /// Overwrites the full range with `pattern` repeated and aligned to
    /// `start`.
    pub fn fill(&mut self, start: Address, endex: Address, pattern: &[u8]) {
        assert!(!pattern.is_empty(), "fill pattern must be non-empty");
        let Some((cs, ce)) = self.bounds.clip(start, endex) else {
            return;
        };
        let len = ce.saturating_distance(cs).max(0) as usize;
        let mut data = Vec::with_capacity(len);
        for i in 0..len {
            let phase = (cs.saturating_distance(start) + i as i64).rem_euclid(pattern.len() as i64);
            data.push(pattern[phase as usize]);
        }
        self.blocks.write(cs, &data);
    }

    /// Writes `pattern` only into gaps within `[start, endex)`; already
    /// populated cells are untouched. The pattern phase is aligned to
    /// `start`, not to each gap's own start.
    pub fn flood(&mut self, start: Address, endex: Address, pattern: &[u8]) {
        assert!(!pattern.is_empty(), "flood pattern must be non-empty");
        for (gs, ge) in self.flood_backup(start, endex, pattern) {
            let len = ge.saturating_distance(gs).max(0) as usize;
            let mut data = Vec::with_capacity(len);
            for i in 0..len {
                let phase =
                    (gs.saturating_distance(start) + i as i64).rem_euclid(pattern.len() as i64);
                data.push(pattern[phase as usize]);
            }
            self.blocks.write(gs, &data);
        }
    }

    /// The gap intervals inside `[start, endex)`, i.e. what [`Self::flood`]
    /// would fill — also serves as `flood`'s backup token.
    #[must_use]
    pub fn flood_backup(&self, start: Address, endex: Address, _pattern: &[u8]) -> Vec<(Address, Address)> {
        let Some((cs, ce)) = self.bounds.clip(start, endex) else {
            return Vec::new();
        };
        self.gaps_within(cs, ce)
    }

    /// Restores gaps previously filled by [`Self::flood`] by re-clearing
    /// them.
    pub fn flood_restore(&mut self, backup: Vec<(Address, Address)>) {
        for (s, e) in backup {
            self.clear(s, e);
        }
    }

    /// Translates every block by `offset`. With bounds active, any portion
    /// that would fall outside them is discarded.
    #[cfg_attr(feature = "tracing", tracing::instrument(level = "trace", skip(self)))]
    pub fn shift(&mut self, offset: i64) {
        self.blocks.shift(offset);
        if let Some(s) = self.bounds.start() {
            self.blocks.carve(Address::MIN, s);
        }
        if let Some(e) = self.bounds.endex() {
            self.blocks.carve(e, Address::MAX);
        }
    }

    /// Captures whichever portion a [`Self::shift`] by `offset` would push
    /// outside the active bounds.
    #[must_use]
    pub fn shift_backup(&self, offset: i64) -> Self {
        let mut discarded = Self::new();
        if let Some(s) = self.bounds.start() {
            // Content landing below `s` after the shift is content currently
            // below `s - offset`.
            let threshold = s - offset;
            for block in self.extract(Address::MIN, threshold).blocks.into_vec() {
                discarded.blocks.insert_block_merging(block);
            }
        }
        if let Some(e) = self.bounds.endex() {
            let threshold = e - offset;
            for block in self.extract(threshold, Address::MAX).blocks.into_vec() {
                discarded.blocks.insert_block_merging(block);
            }
        }
        discarded
    }

    /// Restores the portion discarded by a [`Self::shift`] of `offset`.
    pub fn shift_restore(&mut self, offset: i64, backup: &Self) {
        self.shift(-offset);
        if !backup.blocks.is_empty() {
            self.write_memory(backup.content_start(), backup);
        }
    }

    /// Appends a single byte at [`Self::content_endex`].
    pub fn append(&mut self, value: u8) {
        let pos = self.content_endex();
        self.write(pos, &[value]);
    }

    /// Writes `src` at `content_endex + offset`.
    pub fn extend(&mut self, src: &[u8], offset: i64) {
        let pos = self.content_endex().saturating_add(offset);
        self.write(pos, src);
    }

    // ---------------------------------------------------------------
    // Extraction
    // ---------------------------------------------------------------

    /// Extracts `[start, endex)` as a new, unbounded memory.
    #[must_use]
    pub fn extract(&self, start: Address, endex: Address) -> Self {
        self.extract_full(start, endex, None, 1, None)
    }

    /// Like [`Self::extract`], but gaps in the window are materialised with
    /// the repeating `pattern`.
    #[must_use]
    pub fn extract_with_pattern(&self, start: Address, endex: Address, pattern: &[u8]) -> Self {
        self.extract_full(start, endex, Some(pattern), 1, None)
    }

    /// Like [`Self::extract`], but only every `step`-th address is kept
    /// (each surviving address becomes its own single-byte block, still at
    /// its original absolute address).
    #[must_use]
    pub fn extract_stepped(&self, start: Address, endex: Address, step: usize) -> Self {
        self.extract_full(start, endex, None, step, None)
    }

    /// The full form of extraction: optional gap-filling `pattern`,
    /// optional `step` subsampling, and an optional `bound` applied to the
    /// *result* (independent of `self`'s own bounds).
    #[must_use]
    pub fn extract_full(
        &self,
        start: Address,
        endex: Address,
        pattern: Option<&[u8]>,
        step: usize,
        bound: Option<Bounds>,
    ) -> Self {
        assert!(step >= 1, "extract step must be >= 1");
        let mut out = Self::new();
        if start < endex {
            for block in self.blocks.iter() {
                let bstart = block.start.max(start);
                let bendex = block.endex().min(endex);
                if bstart < bendex {
                    let skip = bstart.saturating_distance(block.start).max(0) as usize;
                    let take = bendex.saturating_distance(bstart).max(0) as usize;
                    out.blocks.write(bstart, &block.data[skip..skip + take]);
                }
            }
            if let Some(pattern) = pattern {
                if !pattern.is_empty() {
                    for (gs, ge) in out.gaps_within(start, endex) {
                        let len = ge.saturating_distance(gs).max(0) as usize;
                        let mut data = Vec::with_capacity(len);
                        for i in 0..len {
                            let phase = (gs.saturating_distance(start) + i as i64)
                                .rem_euclid(pattern.len() as i64);
                            data.push(pattern[phase as usize]);
                        }
                        out.blocks.write(gs, &data);
                    }
                }
            }
            if step > 1 {
                let mut kept = BlockVector::new();
                let mut addr = start;
                while addr < endex {
                    if let Some(value) = out.peek(addr) {
                        kept.write(addr, &[value]);
                    }
                    addr = addr.saturating_add(step as i64);
                }
                out.blocks = kept;
            }
        }
        if let Some(bound) = bound {
            out.bounds = bound;
        }
        out
    }

    pub(crate) fn gaps_within(&self, start: Address, endex: Address) -> Vec<(Address, Address)> {
        if start >= endex {
            return Vec::new();
        }
        let mut out = Vec::new();
        let mut cursor = start;
        let lo = self.blocks.block_index_start(start);
        for block in &self.blocks.as_slice()[lo..] {
            if block.start >= endex {
                break;
            }
            if block.start > cursor {
                out.push((cursor, block.start.min(endex)));
            }
            cursor = block.endex().max(cursor);
            if cursor >= endex {
                break;
            }
        }
        if cursor < endex {
            out.push((cursor, endex));
        }
        out
    }

    // ---------------------------------------------------------------
    // Search
    // ---------------------------------------------------------------

    pub(crate) fn resolve_range(&self, start: Option<Address>, endex: Option<Address>) -> (Address, Address) {
        (
            start.unwrap_or_else(|| self.start()),
            endex.unwrap_or_else(|| self.endex()),
        )
    }

    fn materialize(&self, start: Address, endex: Address) -> Vec<Option<u8>> {
        let len = endex.saturating_distance(start).max(0) as usize;
        let mut out = Vec::with_capacity(len);
        let mut addr = start;
        for _ in 0..len {
            out.push(self.peek(addr));
            addr = addr + 1;
        }
        out
    }

    /// Leftmost address where `pattern` matches contiguously, or absence.
    #[must_use]
    pub fn ofind(&self, pattern: &[u8], start: Option<Address>, endex: Option<Address>) -> Option<Address> {
        if pattern.is_empty() {
            return None;
        }
        let (s, e) = self.resolve_range(start, endex);
        let cells = self.materialize(s, e);
        cells
            .windows(pattern.len())
            .position(|w| w.iter().zip(pattern).all(|(c, p)| *c == Some(*p)))
            .map(|i| s + i as i64)
    }

    /// Rightmost address where `pattern` matches contiguously, or absence.
    #[must_use]
    pub fn rofind(&self, pattern: &[u8], start: Option<Address>, endex: Option<Address>) -> Option<Address> {
        if pattern.is_empty() {
            return None;
        }
        let (s, e) = self.resolve_range(start, endex);
        let cells = self.materialize(s, e);
        cells
            .windows(pattern.len())
            .rposition(|w| w.iter().zip(pattern).all(|(c, p)| *c == Some(*p)))
            .map(|i| s + i as i64)
    }

    /// Like [`Self::ofind`], but fails with [`NotFoundError`] instead of
    /// returning absence.
    pub fn find(
        &self,
        pattern: &[u8],
        start: Option<Address>,
        endex: Option<Address>,
    ) -> ErResult<Address, NotFoundError> {
        self.ofind(pattern, start, endex)
            .ok_or_else(|| Report::new(NotFoundError))
    }

    /// Like [`Self::rofind`], but fails with [`NotFoundError`] instead of
    /// returning absence.
    pub fn rfind(
        &self,
        pattern: &[u8],
        start: Option<Address>,
        endex: Option<Address>,
    ) -> ErResult<Address, NotFoundError> {
        self.rofind(pattern, start, endex)
            .ok_or_else(|| Report::new(NotFoundError))
    }

    /// The leftmost populated address holding `value`.
    pub fn index(
        &self,
        value: u8,
        start: Option<Address>,
        endex: Option<Address>,
    ) -> ErResult<Address, NotFoundError> {
        let (s, e) = self.resolve_range(start, endex);
        self.items_in(s, e)
            .find(|&(_, v)| v == value)
            .map(|(a, _)| a)
            .ok_or_else(|| Report::new(NotFoundError))
    }

    /// The rightmost populated address holding `value`.
    pub fn rindex(
        &self,
        value: u8,
        start: Option<Address>,
        endex: Option<Address>,
    ) -> ErResult<Address, NotFoundError> {
        let (s, e) = self.resolve_range(start, endex);
        self.items_in(s, e)
            .filter(|&(_, v)| v == value)
            .next_back()
            .map(|(a, _)| a)
            .ok_or_else(|| Report::new(NotFoundError))
    }

    pub(crate) fn items_in(&self, start: Address, endex: Address) -> impl DoubleEndedIterator<Item = (Address, u8)> + '_ {
        self.blocks
            .iter()
            .filter(move |b| b.endex() > start && b.start < endex)
            .flat_map(move |b| {
                let bstart = b.start.max(start);
                let bendex = b.endex().min(endex);
                let skip = bstart.saturating_distance(b.start).max(0) as usize;
                let take = bendex.saturating_distance(bstart).max(0) as usize;
                b.data[skip..skip + take]
                    .iter()
                    .enumerate()
                    .map(move |(i, &byte)| (bstart + i as i64, byte))
            })
    }

    /// Count of non-overlapping matches of `pattern` in `[start, endex)`.
    #[must_use]
    pub fn count(&self, pattern: &[u8], start: Option<Address>, endex: Option<Address>) -> usize {
        if pattern.is_empty() {
            return 0;
        }
        let (s, e) = self.resolve_range(start, endex);
        let cells = self.materialize(s, e);
        let mut count = 0;
        let mut i = 0;
        while i + pattern.len() <= cells.len() {
            if cells[i..i + pattern.len()]
                .iter()
                .zip(pattern)
                .all(|(c, p)| *c == Some(*p))
            {
                count += 1;
                i += pattern.len();
            } else {
                i += 1;
            }
        }
        count
    }

    /// The maximal run of equal bytes (or gap) surrounding `addr`.
    #[must_use]
    pub fn equal_span(&self, addr: Address) -> (Address, Address, Option<u8>) {
        match self.blocks.block_index_at(addr) {
            Some(idx) => {
                let b = &self.blocks.as_slice()[idx];
                let rel = (addr - b.start) as usize;
                let value = b.data[rel];
                let mut lo = rel;
                while lo > 0 && b.data[lo - 1] == value {
                    lo -= 1;
                }
                let mut hi = rel;
                while hi + 1 < b.data.len() && b.data[hi + 1] == value {
                    hi += 1;
                }
                (b.start + lo as i64, b.start + (hi + 1) as i64, Some(value))
            }
            None => {
                let (gs, ge, _) = self.block_span(addr);
                (gs, ge, None)
            }
        }
    }

    /// Like [`Self::equal_span`] but at block granularity: the containing
    /// block's span, or the containing gap's span.
    #[must_use]
    pub fn block_span(&self, addr: Address) -> (Address, Address, bool) {
        match self.blocks.block_index_at(addr) {
            Some(idx) => {
                let b = &self.blocks.as_slice()[idx];
                (b.start, b.endex(), true)
            }
            None => {
                let idx = self.blocks.block_index_endex(addr);
                let slice = self.blocks.as_slice();
                let gap_start = if idx > 0 {
                    slice[idx - 1].endex()
                } else {
                    self.bounds.start().unwrap_or(Address::MIN)
                };
                let gap_end = if idx < slice.len() {
                    slice[idx].start
                } else {
                    self.bounds.endex().unwrap_or(Address::MAX)
                };
                (gap_start, gap_end, false)
            }
        }
    }

    // ---------------------------------------------------------------
    // Conversion
    // ---------------------------------------------------------------

    /// Materialises `[start, endex)` (default: [`Self::span`]) into a plain
    /// buffer; gaps become `pattern`, or `0x00` if no pattern is given.
    #[must_use]
    pub fn to_bytes(&self, start: Option<Address>, endex: Option<Address>, pattern: Option<u8>) -> Vec<u8> {
        let (s, e) = self.resolve_range(start, endex);
        let fill = pattern.unwrap_or(0);
        let len = e.saturating_distance(s).max(0) as usize;
        let mut out = vec![fill; len];
        for (addr, byte) in self.items_in(s, e) {
            out[(addr - s) as usize] = byte;
        }
        out
    }

    /// The clipped block list as `(start, bytes)` pairs.
    #[must_use]
    pub fn to_blocks(&self, start: Option<Address>, endex: Option<Address>) -> Vec<(Address, Vec<u8>)> {
        let (s, e) = self.resolve_range(start, endex);
        self.extract(s, e)
            .blocks
            .into_vec()
            .into_iter()
            .map(|b| (b.start, b.data))
            .collect()
    }

    /// Reads `[start, endex)` into a plain buffer, failing with
    /// [`DataGapError`] instead of silently filling if any cell in the
    /// range is unpopulated. The strict counterpart to [`Self::to_bytes`].
    pub fn read_bytes(&self, start: Address, endex: Address) -> ErResult<Vec<u8>, DataGapError> {
        let len = endex.saturating_distance(start).max(0) as usize;
        let mut out = Vec::with_capacity(len);
        let mut addr = start;
        for _ in 0..len {
            match self.peek(addr) {
                Some(byte) => out.push(byte),
                None => {
                    return Err(Report::new(DataGapError)
                        .attach_printable(format!("address {addr} is unpopulated")))
                }
            }
            addr = addr + 1;
        }
        Ok(out)
    }

    /// Hex-encodes the full populated contiguous view. Fails with
    /// [`ContiguityRequiredError`] if the memory is not contiguous.
    pub fn hex(&self) -> ErResult<String, ContiguityRequiredError> {
        if !self.contiguous() {
            return Err(Report::new(ContiguityRequiredError)
                .attach_printable("hex() requires a single contiguous block"));
        }
        let bytes = self.to_bytes(None, None, None);
        Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }

    /// Verifies I1–I3 and that bounds enclose all block extents.
    pub fn validate(&self) -> ErResult<(), crate::error::InvariantBrokenError> {
        use crate::error::InvariantBrokenError;
        let slice = self.blocks.as_slice();
        for (i, block) in slice.iter().enumerate() {
            if block.data.is_empty() {
                return Err(Report::new(InvariantBrokenError).attach_printable("empty block"));
            }
            if let Some(next) = slice.get(i + 1) {
                if block.endex() >= next.start {
                    return Err(Report::new(InvariantBrokenError)
                        .attach_printable("blocks are unsorted, overlapping, or adjacent"));
                }
            }
        }
        if let Some(s) = self.bounds.start() {
            if let Some(first) = slice.first() {
                if first.start < s {
                    return Err(Report::new(InvariantBrokenError)
                        .attach_printable("a block starts before bound_start"));
                }
            }
        }
        if let Some(e) = self.bounds.endex() {
            if let Some(last) = slice.last() {
                if last.endex() > e {
                    return Err(Report::new(InvariantBrokenError)
                        .attach_printable("a block ends after bound_endex"));
                }
            }
        }
        Ok(())
    }
}
