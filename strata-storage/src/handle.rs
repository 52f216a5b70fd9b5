//! Reference-counted handle over one segment file.

use std::sync::Arc;

use strata_result::Result;
use strata_types::ColumnId;

use crate::refcount::Refs;
use crate::segment::SegmentFile;
use crate::types::FileStat;

/// Shared-ownership handle over a [`SegmentFile`].
///
/// Any number of holders may share the file; [`retain`](FileHandle::retain)
/// hands out a new handle and [`release`](FileHandle::release) consumes
/// one. The release that takes the count to zero destroys the backing
/// file. There is no implicit drop: a handle that is never released keeps
/// the file alive, and a released handle cannot be used again because
/// `release` takes it by value.
pub struct FileHandle<F: SegmentFile> {
    shared: Arc<Shared<F>>,
}

struct Shared<F> {
    file: F,
    refs: Refs,
}

impl<F: SegmentFile> FileHandle<F> {
    /// Wrap a freshly allocated file; the creator holds the first
    /// reference.
    pub fn new(file: F) -> Self {
        Self {
            shared: Arc::new(Shared {
                file,
                refs: Refs::new(),
            }),
        }
    }

    /// Acquire an additional reference for a new holder.
    #[must_use]
    pub fn retain(&self) -> FileHandle<F> {
        self.shared.refs.retain();
        FileHandle {
            shared: Arc::clone(&self.shared),
        }
    }

    /// Drop this holder's reference; the last release tears down the
    /// backing file.
    pub fn release(self) {
        if self.shared.refs.release() {
            self.shared.file.destroy();
        }
    }

    /// Copy payload bytes from the start of the file into `buf`; returns
    /// the number of bytes copied.
    pub fn read(&self, buf: &mut [u8]) -> Result<usize> {
        self.shared.file.read(buf)
    }

    /// Append `buf` to the payload; returns the number of bytes written.
    pub fn write(&self, buf: &[u8]) -> Result<usize> {
        self.shared.file.write(buf)
    }

    /// Size metadata. Does not mutate state.
    pub fn stat(&self) -> FileStat {
        self.shared.file.stat()
    }

    /// Stamp the header's index-slot-count field.
    pub fn set_index_slot_count(&self, n: u32) {
        self.shared.file.set_index_slot_count(n);
    }

    /// Stamp the header's column field.
    pub fn set_column_id(&self, id: ColumnId) {
        self.shared.file.set_column_id(id);
    }

    /// Current reference count, for diagnostics and tests.
    pub fn ref_count(&self) -> u64 {
        self.shared.refs.count()
    }

    /// Access the underlying file for implementation-specific inspection.
    pub fn file(&self) -> &F {
        &self.shared.file
    }
}
