//! Error context types.
//!
//! Each failure kind named in the algebra is a unit (or small-data) context
//! type implementing [`error_stack::Context`], propagated as
//! `error_stack::Result<T, SomeError>`. Detail is attached at the call site
//! with `.attach_printable(...)` rather than carried as fields on the error
//! type itself — this keeps the context types stable while still giving
//! callers a legible report.

use core::fmt;

use error_stack::Context;

/// An address or range lies outside the currently active [`crate::Bounds`]
/// for a mutating operation that cannot clip.
#[derive(Debug)]
#[must_use]
pub struct OutOfBoundsError;

impl fmt::Display for OutOfBoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("address or range lies outside the active bounds")
    }
}

impl Context for OutOfBoundsError {}

/// A lookup (`find`/`index`/`rindex`) could not locate its target.
#[derive(Debug)]
#[must_use]
pub struct NotFoundError;

impl fmt::Display for NotFoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("no matching pattern or address was found")
    }
}

impl Context for NotFoundError {}

/// A read that requires contiguous content encountered an empty cell.
#[derive(Debug)]
#[must_use]
pub struct DataGapError;

impl fmt::Display for DataGapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("the requested range contains an unpopulated gap")
    }
}

impl Context for DataGapError {}

/// A byte assignment fell outside `0..=255`, or a `size`/`step` argument was
/// negative or zero where a positive value is required.
#[derive(Debug)]
#[must_use]
pub struct ValueRangeError;

impl fmt::Display for ValueRangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("value lies outside its permitted range")
    }
}

impl Context for ValueRangeError {}

/// [`crate::Memory::validate`] detected a block-collection or bounds
/// invariant violation.
#[derive(Debug)]
#[must_use]
pub struct InvariantBrokenError;

impl fmt::Display for InvariantBrokenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("block collection invariant is broken")
    }
}

impl Context for InvariantBrokenError {}

/// An operation that requires a single contiguous block found multiple
/// blocks, or a gap, instead.
#[derive(Debug)]
#[must_use]
pub struct ContiguityRequiredError;

impl fmt::Display for ContiguityRequiredError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("operation requires a single contiguous block")
    }
}

impl Context for ContiguityRequiredError {}
