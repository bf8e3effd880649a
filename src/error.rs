//! Driver Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Errors from the library crates are
//! kept as children of these, so the printed tree shows the full cause.

use derive_more::{Display, Error};
use pantry_recipe::RecipeId;
use pantry_store::error::{Error as StoreError, ErrorKind as StoreErrorKind};

/// A driver error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for driver operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The configuration could not be loaded, or the log filter is invalid.
    #[display("configuration error")]
    Config,
    /// A command-line value was rejected before reaching the store.
    #[display("invalid argument")]
    Argument,
    /// The requested recipe doesn't exist.
    #[display("recipe not found: {_0}")]
    NotFound(#[error(not(source))] RecipeId),
    /// The store rejected or failed the operation.
    #[display("recipe store error")]
    Store,
    /// Writing output or preparing the database directory failed.
    #[display("I/O error")]
    Io,
}
impl ErrorKind {
    /// Convert a store error into a driver error, preserving the store's
    /// `Exn` frame as a child in the error tree.
    #[track_caller]
    pub fn store(err: StoreError) -> Error {
        let kind = match &*err {
            StoreErrorKind::NotFound(id) => ErrorKind::NotFound(*id),
            _ => ErrorKind::Store,
        };
        err.raise(kind)
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Store | Self::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_is_kept() {
        let err = ErrorKind::store(StoreError::from(StoreErrorKind::NotFound(RecipeId::new(4))));
        assert_eq!(*err, ErrorKind::NotFound(RecipeId::new(4)));
        assert_eq!((*err).to_string(), "recipe not found: 4");
        let err = ErrorKind::store(StoreError::from(StoreErrorKind::Persistence));
        assert_eq!(*err, ErrorKind::Store);
        assert!(err.is_retryable());
    }
}
