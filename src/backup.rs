//! The backup/restore mechanism.
//!
//! Every destructive [`Memory`] operation has a `*_backup`/`*_restore` pair,
//! defined alongside the operation itself in `memory.rs`:
//!
//! | mutation | backup token | restore |
//! |---|---|---|
//! | [`Memory::write`] | [`Memory::write_backup`] → `Memory` | [`Memory::write_restore`] |
//! | [`Memory::insert`] | [`Memory::insert_backup`] → `(Address, usize)` | [`Memory::insert_restore`] |
//! | [`Memory::delete`] | [`Memory::delete_backup`] → `Memory` | [`Memory::delete_restore`] |
//! | [`Memory::clear`] | [`Memory::clear_backup`] → `Memory` | [`Memory::clear_restore`] |
//! | [`Memory::shift`] | [`Memory::shift_backup`] → `Memory` | [`Memory::shift_restore`] |
//! | [`Memory::flood`] | [`Memory::flood_backup`] → `Vec<(Address, Address)>` | [`Memory::flood_restore`] |
//! | [`Memory::poke`] | [`Memory::poke_backup`] → `(Address, Option<u8>)` | [`Memory::poke_restore`] |
//!
//! There is deliberately no global undo journal (Non-goal: transactional
//! rollback beyond per-op backup) — callers compose these pairs themselves
//! when they need multi-step undo, the same way the operations themselves
//! compose.
//!
//! A backup is captured *before* its matching mutation runs; the token is
//! whatever is cheapest to both capture and replay faithfully — most
//! mutations capture a shadow [`Memory`] (via [`Memory::extract`]), but
//! `insert`/`poke` get by with a plain tuple since their undo is a single
//! narrower operation that needs no byte content at all.

pub use crate::memory::Memory;
