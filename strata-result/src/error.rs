use std::{fmt, io};
use thiserror::Error;

/// Unified error type for all strata operations.
///
/// Errors propagate upward through the call stack using Rust's `?` operator.
/// This layer performs no local recovery: every failure is returned to the
/// immediate caller, and retry policy belongs to the enclosing engine.
///
/// `Error` is `Send` and `Sync` so failures can cross thread boundaries,
/// which matters for concurrent scan and compaction paths.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error reported by the physical file collaborator.
    ///
    /// Wraps the underlying `io::Error` unchanged. Raised while allocating,
    /// reading, or writing segment files; never retried at this layer.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An index-slot address is outside the currently allocated range.
    ///
    /// Always detected locally before any I/O is attempted. The message
    /// names the offending slot and the allocated count.
    ///
    /// # Recovery
    ///
    /// Recoverable: grow the index collection or fix the address and retry.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Internal error indicating a bug or unexpected state.
    ///
    /// Examples: reading a column block before any generation was bound, or
    /// using a block after its last reference was released.
    #[error("An internal operation failed: {0}")]
    Internal(String),
}

impl Error {
    /// Create an [`Error::InvalidParameter`] from any displayable value.
    ///
    /// # Examples
    ///
    /// ```
    /// use strata_result::Error;
    ///
    /// let err = Error::invalid_parameter("index slot 9 out of range (2 allocated)");
    /// assert!(matches!(err, Error::InvalidParameter(_)));
    /// ```
    #[inline]
    pub fn invalid_parameter<M: fmt::Display>(msg: M) -> Self {
        Error::InvalidParameter(msg.to_string())
    }
}
