//! The optional half-open `[bound_start, bound_endex)` clamp applied by
//! mutating operations.

use crate::address::Address;

/// An optional half-open address-range clamp.
///
/// When both ends are set, `bound_start <= bound_endex` is maintained by
/// [`Bounds::new`]; an inverted pair is swapped rather than rejected, since
/// a clamp is data, not a place errors should originate from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    start: Option<Address>,
    endex: Option<Address>,
}

impl Bounds {
    /// An unbounded clamp (equivalent to having no bounds at all).
    pub const UNBOUNDED: Self = Self {
        start: None,
        endex: None,
    };

    /// Creates a bounds clamp, swapping the pair if given in reverse order.
    #[must_use]
    pub fn new(start: Option<Address>, endex: Option<Address>) -> Self {
        match (start, endex) {
            (Some(s), Some(e)) if s > e => Self {
                start: Some(e),
                endex: Some(s),
            },
            _ => Self { start, endex },
        }
    }

    /// The lower clamp, if any.
    #[must_use]
    pub fn start(&self) -> Option<Address> {
        self.start
    }

    /// The upper clamp, if any.
    #[must_use]
    pub fn endex(&self) -> Option<Address> {
        self.endex
    }

    /// `true` if neither end is set.
    #[must_use]
    pub fn is_unbounded(&self) -> bool {
        self.start.is_none() && self.endex.is_none()
    }

    /// Clips `[start, endex)` to this clamp. Returns `None` if the clipped
    /// range would be empty (start >= endex after clipping).
    #[must_use]
    pub fn clip(&self, start: Address, endex: Address) -> Option<(Address, Address)> {
        let start = self.start.map_or(start, |b| b.max(start));
        let endex = self.endex.map_or(endex, |b| b.min(endex));
        (start < endex).then_some((start, endex))
    }

    /// Clips a single address to this clamp, returning `None` if it falls
    /// outside.
    #[must_use]
    pub fn clip_point(&self, addr: Address) -> Option<Address> {
        if self.start.is_some_and(|b| addr < b) || self.endex.is_some_and(|b| addr >= b) {
            return None;
        }
        Some(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_pair_is_swapped() {
        let b = Bounds::new(Some(Address(10)), Some(Address(4)));
        assert_eq!(b.start(), Some(Address(4)));
        assert_eq!(b.endex(), Some(Address(10)));
    }

    #[test]
    fn clip_narrows_to_tighter_side() {
        let b = Bounds::new(Some(Address(2)), Some(Address(8)));
        assert_eq!(b.clip(Address(0), Address(10)), Some((Address(2), Address(8))));
        assert_eq!(b.clip(Address(3), Address(5)), Some((Address(3), Address(5))));
        assert_eq!(b.clip(Address(20), Address(30)), None);
    }
}
