//! Deterministic on-disk file names.
//!
//! The patterns are a stable contract shared with external tooling:
//!
//! | purpose | pattern |
//! |---|---|
//! | index slot `i` | `{col}_{block}_{i}.idx` |
//! | data at generation `ts` | `{col}_{block}_{ts}.blk` |
//! | updates at generation `ts` | `{col}_{block}_{ts}.update` |
//!
//! The `{ts}` segment is the raw 12-byte timestamp serialization, not a
//! decimal rendering, which is why names are byte strings rather than
//! UTF-8. Slot positions never shift, so an index name identifies its slot
//! for the life of the column block.

use strata_types::{BlockId, ColumnId, Timestamp};

use crate::types::FileName;

const INDEX_SUFFIX: &[u8] = b".idx";
const DATA_SUFFIX: &[u8] = b".blk";
const UPDATES_SUFFIX: &[u8] = b".update";

/// Name of the index file backing slot `slot` of a column.
pub fn index_file_name(col: ColumnId, block: BlockId, slot: usize) -> FileName {
    let mut name = format!("{col}_{block}_{slot}").into_bytes();
    name.extend_from_slice(INDEX_SUFFIX);
    name
}

/// Name of the data file for one generation.
pub fn data_file_name(col: ColumnId, block: BlockId, ts: Timestamp) -> FileName {
    generation_file_name(col, block, ts, DATA_SUFFIX)
}

/// Name of the updates file for one generation.
pub fn updates_file_name(col: ColumnId, block: BlockId, ts: Timestamp) -> FileName {
    generation_file_name(col, block, ts, UPDATES_SUFFIX)
}

fn generation_file_name(
    col: ColumnId,
    block: BlockId,
    ts: Timestamp,
    suffix: &[u8],
) -> FileName {
    let mut name = format!("{col}_{block}_").into_bytes();
    name.extend_from_slice(&ts.to_bytes());
    name.extend_from_slice(suffix);
    name
}

/// Recover the generation timestamp embedded in a data or updates name.
///
/// Returns `None` when the name does not end with `_<12 ts bytes>` plus
/// one of the generation suffixes.
pub fn generation_timestamp(name: &[u8]) -> Option<Timestamp> {
    let stem = name
        .strip_suffix(DATA_SUFFIX)
        .or_else(|| name.strip_suffix(UPDATES_SUFFIX))?;
    if stem.len() <= Timestamp::LEN {
        return None;
    }
    let (prefix, raw) = stem.split_at(stem.len() - Timestamp::LEN);
    if prefix.last() != Some(&b'_') {
        return None;
    }
    let raw: [u8; Timestamp::LEN] = raw.try_into().ok()?;
    Some(Timestamp::from_bytes(raw))
}
