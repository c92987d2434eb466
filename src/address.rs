//! Address and byte primitives.
//!
//! An [`Address`] names a cell in the virtual space. Per the design note that
//! arbitrary-precision addressing may be statically restricted to a 64-bit
//! signed integer where that is sufficient, this crate backs `Address` with
//! `i64` and audits every place the range can be exceeded (shift, insert,
//! reserve) rather than scattering unchecked casts through the algebra.

use core::fmt;
use core::ops::{Add, Sub};

/// A signed address into the sparse virtual space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Address(pub i64);

impl Address {
    /// The smallest representable address.
    pub const MIN: Self = Self(i64::MIN);
    /// The largest representable address.
    pub const MAX: Self = Self(i64::MAX);
    /// The address `0`.
    pub const ZERO: Self = Self(0);

    /// Returns `self + offset`, or `None` on overflow.
    #[must_use]
    pub fn checked_add(self, offset: i64) -> Option<Self> {
        self.0.checked_add(offset).map(Self)
    }

    /// Returns `self + offset`, saturating at [`Address::MIN`]/[`Address::MAX`].
    #[must_use]
    pub fn saturating_add(self, offset: i64) -> Self {
        Self(self.0.saturating_add(offset))
    }

    /// Returns the distance `self - other` as an `i64`, saturating rather
    /// than panicking when the true distance would overflow.
    #[must_use]
    pub fn saturating_distance(self, other: Self) -> i64 {
        self.0.saturating_sub(other.0)
    }

    /// Returns the checked distance `self - other`.
    #[must_use]
    pub fn checked_distance(self, other: Self) -> Option<i64> {
        self.0.checked_sub(other.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<i64> for Address {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Address> for i64 {
    fn from(value: Address) -> Self {
        value.0
    }
}

impl Add<i64> for Address {
    type Output = Self;

    fn add(self, rhs: i64) -> Self::Output {
        Self(self.0 + rhs)
    }
}

impl Sub<i64> for Address {
    type Output = Self;

    fn sub(self, rhs: i64) -> Self::Output {
        Self(self.0 - rhs)
    }
}

impl Sub for Address {
    type Output = i64;

    fn sub(self, rhs: Self) -> Self::Output {
        self.0 - rhs.0
    }
}

/// A populated cell's value. Absence (`None`) is a distinct state from any
/// byte value and must never be represented as a stored `0`.
pub type MaybeByte = Option<u8>;

#[cfg(test)]
mod tests {
    use super::Address;

    #[test]
    fn saturating_add_clamps() {
        assert_eq!(Address::MAX.saturating_add(10), Address::MAX);
        assert_eq!(Address::MIN.saturating_add(-10), Address::MIN);
    }

    #[test]
    fn distance_is_signed() {
        assert_eq!(Address(5).saturating_distance(Address(10)), -5);
        assert_eq!(Address(10).saturating_distance(Address(5)), 5);
    }
}
