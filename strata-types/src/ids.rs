//! Identifiers shared across strata crates.

/// Identifies one column within its owning block.
///
/// Column ids are assigned by the enclosing block when it allocates
/// per-column storage and are baked into every file name the column block
/// creates, so they must never change over a block's lifetime.
pub type ColumnId = u32;

/// Identifies one block within its owning segment.
///
/// Like [`ColumnId`], the block id is part of the on-disk naming contract.
pub type BlockId = u64;
