//! Error types and result definitions for the strata storage engine.
//!
//! This crate provides the unified error type ([`Error`]) and result alias
//! ([`Result<T>`]) used throughout the strata crates. Every operation that
//! can fail returns `Result<T>`; failures propagate upward with the `?`
//! operator and are never retried or swallowed below the enclosing engine.
//!
//! # Error Categories
//!
//! The set of variants is deliberately closed:
//!
//! - **I/O failures** ([`Error::Io`]): anything the physical file
//!   collaborator reports, wrapped unchanged.
//! - **Addressing errors** ([`Error::InvalidParameter`]): an index-slot
//!   address outside the allocated range, detected before any I/O.
//! - **Internal errors** ([`Error::Internal`]): violated invariants, such
//!   as operating on a column block with no bound generation.

pub mod error;
pub mod result;

pub use error::Error;
pub use result::Result;
