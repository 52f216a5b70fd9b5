use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use rustc_hash::FxHashSet;

use strata_result::Result;
use strata_types::ColumnId;

use super::{SegmentFile, SegmentStore};
use crate::handle::FileHandle;
use crate::types::{FileName, FileStat};

/// In-memory segment store used for tests/benchmarks.
///
/// Tracks which names are live and how many files were torn down, so
/// lifetime tests can observe allocation and destruction from the outside.
pub struct MemSegmentStore {
    registry: Arc<Registry>,
}

struct Registry {
    live: RwLock<FxHashSet<FileName>>,
    destroyed: AtomicU64,
}

impl Default for MemSegmentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemSegmentStore {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(Registry {
                live: RwLock::new(FxHashSet::default()),
                destroyed: AtomicU64::new(0),
            }),
        }
    }

    /// Number of live (allocated and not yet destroyed) files.
    pub fn file_count(&self) -> usize {
        self.registry
            .live
            .read()
            .expect("MemSegmentStore registry read lock poisoned")
            .len()
    }

    /// Number of files torn down so far.
    pub fn destroyed_count(&self) -> u64 {
        self.registry.destroyed.load(Ordering::Relaxed)
    }

    /// Whether a file with this exact name is currently live.
    pub fn contains(&self, name: &[u8]) -> bool {
        self.registry
            .live
            .read()
            .expect("MemSegmentStore registry read lock poisoned")
            .contains(name)
    }
}

impl SegmentStore for MemSegmentStore {
    type File = MemFile;

    fn new_file(&self, name: &[u8]) -> Result<FileHandle<MemFile>> {
        self.registry
            .live
            .write()
            .expect("MemSegmentStore registry write lock poisoned")
            .insert(name.to_vec());
        Ok(FileHandle::new(MemFile {
            name: name.to_vec(),
            index_slot_count: AtomicU32::new(0),
            column: AtomicU32::new(0),
            payload: RwLock::new(Vec::new()),
            registry: Arc::clone(&self.registry),
        }))
    }
}

/// One in-memory file: a header pair plus an append-only payload.
pub struct MemFile {
    name: FileName,
    index_slot_count: AtomicU32,
    column: AtomicU32,
    payload: RwLock<Vec<u8>>,
    registry: Arc<Registry>,
}

impl MemFile {
    /// Header field as last stamped, for test inspection.
    pub fn index_slot_count(&self) -> u32 {
        self.index_slot_count.load(Ordering::Relaxed)
    }

    /// Header field as last stamped, for test inspection.
    pub fn column(&self) -> u32 {
        self.column.load(Ordering::Relaxed)
    }

    /// The name the file was allocated under.
    pub fn name(&self) -> &[u8] {
        &self.name
    }
}

impl SegmentFile for MemFile {
    fn read(&self, buf: &mut [u8]) -> Result<usize> {
        let payload = self
            .payload
            .read()
            .expect("MemFile payload read lock poisoned");
        let n = buf.len().min(payload.len());
        buf[..n].copy_from_slice(&payload[..n]);
        Ok(n)
    }

    fn write(&self, buf: &[u8]) -> Result<usize> {
        let mut payload = self
            .payload
            .write()
            .expect("MemFile payload write lock poisoned");
        payload.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn stat(&self) -> FileStat {
        let payload = self
            .payload
            .read()
            .expect("MemFile payload read lock poisoned");
        FileStat {
            size: payload.len() as u64,
        }
    }

    fn set_index_slot_count(&self, n: u32) {
        self.index_slot_count.store(n, Ordering::Relaxed);
    }

    fn set_column_id(&self, id: ColumnId) {
        self.column.store(id, Ordering::Relaxed);
    }

    fn destroy(&self) {
        self.registry
            .live
            .write()
            .expect("MemSegmentStore registry write lock poisoned")
            .remove(&self.name);
        self.registry.destroyed.fetch_add(1, Ordering::Relaxed);
    }
}
