/// Size metadata for one segment file, as reported by
/// [`stat`](crate::segment::SegmentFile::stat).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FileStat {
    /// Payload bytes written so far; the header region is not counted.
    pub size: u64,
}

/// On-disk file name within a segment.
///
/// Raw bytes rather than UTF-8: data and updates names embed the 12-byte
/// timestamp serialization verbatim.
pub type FileName = Vec<u8>;
