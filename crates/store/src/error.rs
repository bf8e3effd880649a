//! Store Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction.
//!
//! Every variant falls in one of three groups, which is all a front-end needs
//! to decide what to do next:
//! - **validation** ([`ErrorKind::Validation`]): re-prompt or reject the input;
//! - **not found** ([`ErrorKind::NotFound`]): the id doesn't (or no longer) exist;
//! - **persistence** (everything else): the database failed, the transaction
//!   was rolled back and the store is still usable.

use derive_more::{Display, Error};
use pantry_recipe::RecipeId;
use pantry_recipe::error::{Error as RecipeError, ErrorKind as RecipeErrorKind};

/// A store error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error)]
pub enum ErrorKind {
    /// The recipe (or the change to it) failed validation.
    #[display("invalid recipe: {_0}")]
    Validation(RecipeErrorKind),
    /// No recipe with this id exists.
    #[display("recipe not found: {_0}")]
    NotFound(#[error(not(source))] RecipeId),
    /// The database could not be reached, or a write could not be committed.
    #[display("database error")]
    Persistence,
    #[display("database migration error")]
    Migration,
    /// A stored row can't be turned back into a valid recipe.
    #[display("invalid stored data: {_0}")]
    InvalidData(#[error(not(source))] &'static str),
}
impl ErrorKind {
    /// Convert a recipe validation error into a store error, preserving the
    /// recipe crate's `Exn` frame as a child in the error tree.
    #[track_caller]
    pub fn validation(err: RecipeError) -> Error {
        let inner = (*err).clone();
        err.raise(ErrorKind::Validation(inner))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Storage failures, including data that was stored but can't be read back.
    pub fn is_persistence(&self) -> bool {
        matches!(self, Self::Persistence | Self::Migration | Self::InvalidData(_))
    }

    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Busy or briefly unavailable databases are worth another go.
        matches!(self, Self::Persistence)
    }
}
