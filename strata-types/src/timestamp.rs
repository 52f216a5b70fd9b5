//! Hybrid logical clock timestamp.
//!
//! A [`Timestamp`] pairs a nanosecond-resolution physical component with a
//! logical tie-breaker so that events sharing one physical tick still have
//! a total, monotonic order. The serialized form doubles as a stable sort
//! key and as a file-name segment, so its byte layout is an on-disk
//! contract and is pinned by tests.

use std::sync::OnceLock;

/// Hybrid logical clock value used to version column-block generations and
/// order transactions.
///
/// The total order is `(physical, logical)` lexicographic with `physical`
/// dominant. Field order below is load-bearing: it makes the derived `Ord`
/// exactly that order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    physical: i64,
    logical: u32,
}

impl Timestamp {
    /// Number of bytes in the serialized form.
    pub const LEN: usize = 12;

    /// Infinite-future marker: greater than or equal to every timestamp.
    pub const MAX: Timestamp = Timestamp {
        physical: i64::MAX,
        logical: u32::MAX,
    };

    #[inline]
    pub const fn new(physical: i64, logical: u32) -> Self {
        Self { physical, logical }
    }

    /// Reserved low value tagging system-owned data.
    ///
    /// Initialized exactly once for the whole process on first use and
    /// immutable afterward.
    pub fn system_reserved() -> Timestamp {
        static SYSTEM_RESERVED: OnceLock<Timestamp> = OnceLock::new();
        *SYSTEM_RESERVED.get_or_init(|| Timestamp::new(1, 0))
    }

    /// Wall/logical time component, nanosecond resolution.
    #[inline]
    pub const fn physical(&self) -> i64 {
        self.physical
    }

    /// Tie-breaker within one physical tick.
    #[inline]
    pub const fn logical(&self) -> u32 {
        self.logical
    }

    /// True iff both components are zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.physical == 0 && self.logical == 0
    }

    /// Successor in the total order.
    ///
    /// Increments the logical tie-breaker; when it is saturated, carries
    /// into `physical` and resets `logical` to zero.
    ///
    /// # Panics
    ///
    /// When `physical` is already `i64::MAX` and a carry is required. At
    /// nanosecond resolution that value is unreachable in practice, and
    /// wrapping silently would corrupt the total order.
    #[must_use]
    pub fn next(&self) -> Timestamp {
        if self.logical == u32::MAX {
            let physical = self
                .physical
                .checked_add(1)
                .expect("timestamp physical component overflowed");
            Timestamp {
                physical,
                logical: 0,
            }
        } else {
            Timestamp {
                physical: self.physical,
                logical: self.logical + 1,
            }
        }
    }

    /// Predecessor in the total order; exact mirror of [`next`](Self::next).
    ///
    /// # Panics
    ///
    /// When `physical` is already `i64::MIN` and a borrow is required.
    #[must_use]
    pub fn prev(&self) -> Timestamp {
        if self.logical == 0 {
            let physical = self
                .physical
                .checked_sub(1)
                .expect("timestamp physical component underflowed");
            Timestamp {
                physical,
                logical: u32::MAX,
            }
        } else {
            Timestamp {
                physical: self.physical,
                logical: self.logical - 1,
            }
        }
    }

    /// Serialize to the fixed 12-byte layout: `logical` little-endian in
    /// bytes `[0, 4)`, `physical` little-endian in bytes `[4, 12)`.
    ///
    /// The result is embedded verbatim in data/updates file names, so the
    /// layout must never change.
    #[inline]
    pub fn to_bytes(&self) -> [u8; Self::LEN] {
        let mut buf = [0u8; Self::LEN];
        buf[..4].copy_from_slice(&self.logical.to_le_bytes());
        buf[4..].copy_from_slice(&self.physical.to_le_bytes());
        buf
    }

    /// Exact inverse of [`to_bytes`](Self::to_bytes).
    #[inline]
    pub const fn from_bytes(b: [u8; Self::LEN]) -> Timestamp {
        let logical = u32::from_le_bytes([b[0], b[1], b[2], b[3]]);
        let physical = i64::from_le_bytes([b[4], b[5], b[6], b[7], b[8], b[9], b[10], b[11]]);
        Timestamp { physical, logical }
    }
}
