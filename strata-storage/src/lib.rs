//! Storage seam and lifetime primitives for column-block files.
//!
//! This crate defines what the column-block layer needs from the physical
//! segment collaborator — named file allocation, byte reads and writes,
//! header stamping, teardown — plus the explicit reference-counting model
//! that governs every file's lifetime, and the deterministic on-disk
//! naming contract. Byte-level layout and compression stay on the other
//! side of the [`segment::SegmentFile`] seam.

pub mod handle;
pub mod naming;
pub mod refcount;
pub mod segment;
pub mod types;

pub use handle::FileHandle;
pub use refcount::Refs;
pub use segment::{MemFile, MemSegmentStore, SegmentFile, SegmentStore};
pub use types::{FileName, FileStat};
