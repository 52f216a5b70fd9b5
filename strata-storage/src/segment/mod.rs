//! Seam between column blocks and the physical segment implementation.
//!
//! The traits model what this layer needs from the collaborator that owns
//! actual bytes: named allocation, reads and writes, header stamping, and
//! teardown. Compression and on-medium layout stay on the other side of
//! the seam; files are created raw by default.

use strata_result::Result;
use strata_types::ColumnId;

use crate::handle::FileHandle;
use crate::types::FileStat;

pub mod mem_segment;
pub use mem_segment::*;

/// One byte-addressable file owned by a segment.
pub trait SegmentFile: Send + Sync + 'static {
    /// Copy payload bytes from the start of the file into `buf`; returns
    /// the number of bytes copied. A fresh file yields zero bytes.
    fn read(&self, buf: &mut [u8]) -> Result<usize>;

    /// Append `buf` to the payload; returns the number of bytes written.
    fn write(&self, buf: &[u8]) -> Result<usize>;

    /// Size metadata. Does not mutate state.
    fn stat(&self) -> FileStat;

    /// Stamp the header's index-slot-count field.
    fn set_index_slot_count(&self, n: u32);

    /// Stamp the header's column field. Index files record the owning
    /// column id here; data and updates files record the owning block's
    /// column count.
    fn set_column_id(&self, id: ColumnId);

    /// Release the backing storage. Best-effort and infallible at this
    /// layer; failures are a diagnostic concern, not a returnable error.
    fn destroy(&self);
}

/// Allocates named files within one segment's storage.
pub trait SegmentStore: Send + Sync + 'static {
    type File: SegmentFile;

    /// Allocate the named file and hand back the creator's reference.
    fn new_file(&self, name: &[u8]) -> Result<FileHandle<Self::File>>;
}
