//! A read-only, bounds-checked window onto a [`Memory`].
//!
//! [`MemoryView`] borrows `&Memory` for its own lifetime rather than using a
//! runtime borrow counter: since every mutating method on `Memory` takes
//! `&mut self`, the borrow checker already refuses to compile any attempt
//! to mutate the backing memory while a view over it is alive, and the
//! view's access is guaranteed to end (by an implicit `Drop`) no later than
//! the end of its scope. No runtime counter, no separate conflict error —
//! the compiler is the enforcement mechanism.

use crate::address::Address;
use crate::memory::Memory;

/// A read-only window `[start, endex)` onto a borrowed [`Memory`].
#[derive(Debug, Clone, Copy)]
pub struct MemoryView<'a> {
    memory: &'a Memory,
    start: Address,
    endex: Address,
}

impl<'a> MemoryView<'a> {
    pub(crate) fn new(memory: &'a Memory, start: Address, endex: Address) -> Self {
        let (start, endex) = if start <= endex { (start, endex) } else { (endex, start) };
        Self { memory, start, endex }
    }

    /// The view's window.
    #[must_use]
    pub fn span(&self) -> (Address, Address) {
        (self.start, self.endex)
    }

    /// `endex - start`.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.start.saturating_distance(self.endex).unsigned_abs()
    }

    /// `true` if the window is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.endex
    }

    /// Reads a single cell, or absence if `addr` falls outside the window
    /// or is unpopulated.
    #[must_use]
    pub fn peek(&self, addr: Address) -> Option<u8> {
        if addr < self.start || addr >= self.endex {
            return None;
        }
        self.memory.peek(addr)
    }

    /// Every address in the window, gaps included.
    #[must_use]
    pub fn values(&self) -> crate::iter::Values<'a> {
        self.memory.values(Some(self.start), Some(self.endex), None)
    }

    /// Populated addresses only, within the window.
    #[must_use]
    pub fn items(&self) -> impl DoubleEndedIterator<Item = (Address, u8)> + 'a {
        self.memory.items(Some(self.start), Some(self.endex))
    }

    /// Materialises the window into a plain buffer; gaps become `pattern`,
    /// or `0x00` if none given.
    #[must_use]
    pub fn to_bytes(&self, pattern: Option<u8>) -> Vec<u8> {
        self.memory.to_bytes(Some(self.start), Some(self.endex), pattern)
    }
}

impl Memory {
    /// Opens a read-only view over `[start, endex)`.
    #[must_use]
    pub fn view(&self, start: Address, endex: Address) -> MemoryView<'_> {
        MemoryView::new(self, start, endex)
    }
}
