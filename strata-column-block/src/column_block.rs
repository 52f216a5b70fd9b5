use std::sync::{Arc, RwLock};

use strata_result::{Error, Result};
use strata_storage::naming;
use strata_storage::{FileHandle, FileStat, Refs, SegmentFile, SegmentStore};
use strata_types::{BlockId, ColumnId, Timestamp};

const LOCK_POISONED: &str = "column block state lock poisoned";

/// Identity of the owning block as seen by this layer: enough to name
/// files and stamp headers without depending on the enclosing block type.
#[derive(Clone, Copy, Debug)]
pub struct OwnerBlock {
    pub id: BlockId,
    /// Total number of columns the owning block holds.
    pub column_count: u32,
}

/// One secondary-index file, addressed purely by position in the owning
/// column block. Positions never shift: the collection grows by appending
/// and is never reordered or compacted, since the position is baked into
/// the file name.
struct IndexSlot<F: SegmentFile> {
    file: FileHandle<F>,
}

struct BlockState<F: SegmentFile> {
    ts: Timestamp,
    data: Option<FileHandle<F>>,
    updates: Option<FileHandle<F>>,
    indexes: Vec<IndexSlot<F>>,
    destroyed: bool,
}

impl<F: SegmentFile> BlockState<F> {
    fn data(&self) -> Result<&FileHandle<F>> {
        self.live()?;
        self.data
            .as_ref()
            .ok_or_else(|| Error::Internal("no generation bound".into()))
    }

    fn updates(&self) -> Result<&FileHandle<F>> {
        self.live()?;
        self.updates
            .as_ref()
            .ok_or_else(|| Error::Internal("no generation bound".into()))
    }

    fn index(&self, slot: usize) -> Result<&FileHandle<F>> {
        self.live()?;
        match self.indexes.get(slot) {
            Some(s) => Ok(&s.file),
            None => Err(Error::invalid_parameter(format!(
                "index slot {slot} out of range ({} allocated)",
                self.indexes.len()
            ))),
        }
    }

    fn live(&self) -> Result<()> {
        if self.destroyed {
            return Err(Error::Internal("column block already destroyed".into()));
        }
        Ok(())
    }
}

/// Storage for a single column of one block.
///
/// The block owns one data file and one updates file bound to the current
/// timestamp generation, plus a grow-only collection of index slots. Its
/// own lifetime is reference counted: [`create`](ColumnBlock::create)
/// hands the creator the first reference, [`retain`](ColumnBlock::retain)
/// adds one for any other holder, and the [`close`](ColumnBlock::close)
/// that drops the last reference destroys the block and every file it
/// still owns, exactly once.
///
/// Writers are serialized per generation by the enclosing engine; this
/// type only guarantees that the reference counts and the state swap in
/// [`bind_generation`](ColumnBlock::bind_generation) are safe under
/// concurrency.
pub struct ColumnBlock<S: SegmentStore> {
    store: Arc<S>,
    owner: OwnerBlock,
    col: ColumnId,
    refs: Refs,
    state: RwLock<BlockState<S::File>>,
}

impl<S: SegmentStore> ColumnBlock<S> {
    /// Allocate storage for column `col` of `owner` with `index_count`
    /// eagerly created index slots.
    ///
    /// Data and updates files are not allocated until a generation is
    /// bound. The creator holds the first reference; pair with
    /// [`close`](Self::close).
    pub fn create(
        store: Arc<S>,
        owner: OwnerBlock,
        index_count: usize,
        col: ColumnId,
    ) -> Result<Arc<Self>> {
        let mut indexes = Vec::with_capacity(index_count);
        for slot in 0..index_count {
            match Self::new_slot(&store, owner, col, slot, index_count as u32) {
                Ok(s) => indexes.push(s),
                Err(e) => {
                    for s in indexes {
                        s.file.release();
                    }
                    return Err(e);
                }
            }
        }
        Ok(Arc::new(Self {
            store,
            owner,
            col,
            refs: Refs::new(),
            state: RwLock::new(BlockState {
                ts: Timestamp::default(),
                data: None,
                updates: None,
                indexes,
                destroyed: false,
            }),
        }))
    }

    fn new_slot(
        store: &S,
        owner: OwnerBlock,
        col: ColumnId,
        slot: usize,
        total: u32,
    ) -> Result<IndexSlot<S::File>> {
        let file = store.new_file(&naming::index_file_name(col, owner.id, slot))?;
        // Index headers record the total slot count at creation time and
        // the owning column id.
        file.set_index_slot_count(total);
        file.set_column_id(col);
        Ok(IndexSlot { file })
    }

    /// Grow the index collection to `target` slots.
    ///
    /// Existing slots, their contents, and their headers are untouched;
    /// new slots get backing files stamped with the grown total. No-op
    /// when `target` does not exceed the current length.
    pub fn grow_indexes(&self, target: usize) -> Result<()> {
        let mut state = self.state.write().expect(LOCK_POISONED);
        state.live()?;
        while state.indexes.len() < target {
            let slot = state.indexes.len();
            let new = Self::new_slot(&self.store, self.owner, self.col, slot, target as u32)?;
            state.indexes.push(new);
        }
        Ok(())
    }

    /// Bind a new generation: allocate that generation's data and updates
    /// files, then swap them in together with `ts`.
    ///
    /// Allocation happens before any state changes, so on failure the
    /// previously bound generation stays fully bound. The block's own
    /// references to the prior generation's files are released; an opener
    /// that retained them beforehand keeps them alive until its own
    /// release.
    pub fn bind_generation(&self, ts: Timestamp) -> Result<()> {
        let mut state = self.state.write().expect(LOCK_POISONED);
        state.live()?;
        let slot_count = state.indexes.len() as u32;

        // Data/updates headers record the current slot count and the
        // owning block's column count.
        let data = self
            .store
            .new_file(&naming::data_file_name(self.col, self.owner.id, ts))?;
        data.set_index_slot_count(slot_count);
        data.set_column_id(self.owner.column_count);

        let updates = match self
            .store
            .new_file(&naming::updates_file_name(self.col, self.owner.id, ts))
        {
            Ok(f) => f,
            Err(e) => {
                data.release();
                return Err(e);
            }
        };
        updates.set_index_slot_count(slot_count);
        updates.set_column_id(self.owner.column_count);

        tracing::trace!(
            block = self.owner.id,
            col = self.col,
            ts = ?ts,
            "binding column block generation"
        );
        if let Some(old) = state.data.replace(data) {
            old.release();
        }
        if let Some(old) = state.updates.replace(updates) {
            old.release();
        }
        state.ts = ts;
        Ok(())
    }

    /// Timestamp of the currently bound generation; empty before the
    /// first [`bind_generation`](Self::bind_generation).
    pub fn read_ts(&self) -> Timestamp {
        self.state.read().expect(LOCK_POISONED).ts
    }

    /// Append `buf` to the current generation's data file.
    pub fn write_data(&self, buf: &[u8]) -> Result<()> {
        self.state.read().expect(LOCK_POISONED).data()?.write(buf)?;
        Ok(())
    }

    /// Read from the start of the current generation's data file into
    /// `buf`.
    pub fn read_data(&self, buf: &mut [u8]) -> Result<()> {
        self.state.read().expect(LOCK_POISONED).data()?.read(buf)?;
        Ok(())
    }

    /// Append `buf` to the current generation's updates file.
    pub fn write_updates(&self, buf: &[u8]) -> Result<()> {
        self.state
            .read()
            .expect(LOCK_POISONED)
            .updates()?
            .write(buf)?;
        Ok(())
    }

    /// Read from the start of the current generation's updates file into
    /// `buf`.
    pub fn read_updates(&self, buf: &mut [u8]) -> Result<()> {
        self.state
            .read()
            .expect(LOCK_POISONED)
            .updates()?
            .read(buf)?;
        Ok(())
    }

    /// Append `buf` to index slot `slot`.
    ///
    /// Fails with [`Error::InvalidParameter`] before any I/O when `slot`
    /// is outside the allocated range.
    pub fn write_index(&self, slot: usize, buf: &[u8]) -> Result<()> {
        self.state
            .read()
            .expect(LOCK_POISONED)
            .index(slot)?
            .write(buf)?;
        Ok(())
    }

    /// Read from the start of index slot `slot` into `buf`.
    ///
    /// Fails with [`Error::InvalidParameter`] before any I/O when `slot`
    /// is outside the allocated range.
    pub fn read_index(&self, slot: usize, buf: &mut [u8]) -> Result<()> {
        self.state
            .read()
            .expect(LOCK_POISONED)
            .index(slot)?
            .read(buf)?;
        Ok(())
    }

    /// Size metadata of the current generation's data file.
    pub fn stat_data(&self) -> Result<FileStat> {
        Ok(self.state.read().expect(LOCK_POISONED).data()?.stat())
    }

    /// Number of index slots currently allocated.
    pub fn index_slot_count(&self) -> usize {
        self.state.read().expect(LOCK_POISONED).indexes.len()
    }

    /// Share the current generation's data file.
    ///
    /// Bumps the file's reference count, not the block's; the caller
    /// releases the returned handle when done.
    pub fn open_data(&self) -> Result<FileHandle<S::File>> {
        Ok(self.state.read().expect(LOCK_POISONED).data()?.retain())
    }

    /// Share the current generation's updates file; see
    /// [`open_data`](Self::open_data).
    pub fn open_updates(&self) -> Result<FileHandle<S::File>> {
        Ok(self.state.read().expect(LOCK_POISONED).updates()?.retain())
    }

    /// Share index slot `slot`'s file; see [`open_data`](Self::open_data).
    pub fn open_index(&self, slot: usize) -> Result<FileHandle<S::File>> {
        Ok(self.state.read().expect(LOCK_POISONED).index(slot)?.retain())
    }

    /// Add a reference to the block itself on behalf of a new holder.
    pub fn retain(&self) {
        self.refs.retain();
    }

    /// Release one reference against the block itself.
    ///
    /// The release that drops the last reference destroys the block and
    /// every file it still owns, exactly once.
    pub fn close(&self) {
        if self.refs.release() {
            self.destroy();
        }
    }

    /// Reference count of the block itself, for diagnostics and tests.
    pub fn ref_count(&self) -> u64 {
        self.refs.count()
    }

    fn destroy(&self) {
        let mut state = self.state.write().expect(LOCK_POISONED);
        tracing::debug!(
            block = self.owner.id,
            col = self.col,
            ts = ?state.ts,
            "destroying column block"
        );
        if let Some(data) = state.data.take() {
            data.release();
        }
        for slot in state.indexes.drain(..) {
            slot.file.release();
        }
        if let Some(updates) = state.updates.take() {
            updates.release();
        }
        state.destroyed = true;
    }
}
