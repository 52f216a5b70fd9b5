use crate::error::Error;

/// Result type alias used throughout strata.
///
/// Shorthand for `std::result::Result<T, Error>`; every strata operation
/// that can fail returns this type.
pub type Result<T> = std::result::Result<T, Error>;
