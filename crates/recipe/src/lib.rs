//! Recipe entity and difficulty rules.
//!
//! A [`Recipe`] is a validated name, an ordered list of [`Ingredients`] and a
//! [`CookingTime`]. Its [`Difficulty`] is not an input: it is derived from the
//! cooking time and ingredient count by [`classify`], and recomputed whenever
//! either of those changes. Nothing in this crate performs I/O.
//!
//! # Validation
//! Raw input is checked when building the field types:
//! - names are trimmed and must be 1 to 50 characters;
//! - ingredients are trimmed, non-empty, comma-free, at least one of them,
//!   and must fit 255 characters once flattened with `", "`;
//! - cooking time is a positive number of minutes.
//!
//! Failures are reported as [`error::ErrorKind`] values.

mod change;
mod difficulty;
pub mod error;
pub mod models;
mod search;

pub use crate::change::{Change, Field};
pub use crate::difficulty::{Difficulty, LONG_COOKING_TIME_MINUTES, MANY_INGREDIENTS, classify};
pub use crate::models::{CookingTime, Ingredients, Name, Recipe, RecipeId, SavedRecipe};
pub use crate::search::{MatchMode, SearchTerms};
