//! Versioned per-column storage within one block.
//!
//! A [`ColumnBlock`] multiplexes the three kinds of physical files that
//! back one column of one block — a data file, an updates (delta and
//! tombstone) log, and a grow-only collection of secondary index files —
//! and binds data and updates to a timestamp "generation". Every file is
//! shared-owned: concurrent scan and compaction paths acquire extra
//! references through the `open_*` operations while the creating
//! transaction releases its own reference independently, and the physical
//! teardown happens exactly once, after the last holder lets go.

pub mod column_block;

pub use column_block::{ColumnBlock, OwnerBlock};
pub use strata_result::{Error, Result};
