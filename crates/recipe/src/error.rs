//! Recipe Error Types
//!
//! This module provides structured errors using `exn` for automatic location
//! tracking and error tree construction. Every variant here is a validation
//! failure: the input is unusable as given and the caller should re-prompt or
//! reject it.

use derive_more::{Display, Error};

/// A recipe validation error with automatic location tracking.
pub type Error = exn::Exn<ErrorKind>;
/// Result type alias for recipe operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Actionable error categories.
///
/// These describe what the caller should *do*, not what went wrong internally.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// The recipe name is empty (or only whitespace).
    #[display("recipe name must not be empty")]
    EmptyName,
    /// The recipe name exceeds the column limit.
    #[display("recipe name is {_0} characters long, maximum is 50")]
    NameTooLong(#[error(not(source))] usize),
    /// A recipe needs at least one ingredient.
    #[display("recipe must have at least one ingredient")]
    NoIngredients,
    /// An ingredient token is empty, usually from a stray delimiter.
    #[display("ingredient must not be empty")]
    EmptyIngredient,
    /// An ingredient contains the storage delimiter.
    #[display("ingredient must not contain a comma: {_0}")]
    DelimiterInIngredient(#[error(not(source))] String),
    /// The flattened ingredient list exceeds the column limit.
    #[display("ingredient list is {_0} characters long, maximum is 255")]
    IngredientsTooLong(#[error(not(source))] usize),
    /// Cooking time must be at least one minute.
    #[display("cooking time must be positive, found {_0}")]
    NonPositiveCookingTime(#[error(not(source))] i64),
    /// Cooking time does not fit the supported range.
    #[display("cooking time is out of range: {_0}")]
    CookingTimeOutOfRange(#[error(not(source))] i64),
    /// A value could not be parsed from text.
    #[display("failed to parse field '{field}', found value: {value}")]
    ParseError {
        /// The field that failed to parse.
        field: &'static str,
        /// The offending input.
        value: String,
    },
}

impl ErrorKind {
    /// Returns `true` if retrying might succeed.
    pub fn is_retryable(&self) -> bool {
        // Retrying the same input gives the same answer.
        false
    }
}
