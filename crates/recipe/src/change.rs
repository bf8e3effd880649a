//! Field-level changes to an existing recipe.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::error::{Error, ErrorKind, Result};
use crate::models::DELIMITER;
use exn::ResultExt;

/// The user-editable fields of a recipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    CookingTime,
    Ingredients,
}
impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::CookingTime => "cooking time",
            Field::Ingredients => "ingredients",
        }
    }

    /// Whether changing this field changes the recipe's difficulty.
    pub fn affects_difficulty(&self) -> bool {
        matches!(self, Field::CookingTime | Field::Ingredients)
    }
}
impl FromStr for Field {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "name" => Self::Name,
            "cooking time" | "cooking_time" | "cooking-time" | "time" => Self::CookingTime,
            "ingredients" => Self::Ingredients,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "field",
                value: s.to_string()
            }),
        })
    }
}
impl Display for Field {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A new value for one field, as primitive (not yet validated) input.
///
/// Validation happens when the change is applied with
/// [`Recipe::apply`](crate::Recipe::apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Name(String),
    CookingTime(i64),
    Ingredients(Vec<String>),
}
impl Change {
    /// Builds a change from console text for the given field.
    ///
    /// Cooking time must be an integer; ingredients are comma-separated.
    pub fn parse(field: Field, raw: impl AsRef<str>) -> Result<Self> {
        let raw = raw.as_ref();
        Ok(match field {
            Field::Name => Self::Name(raw.to_string()),
            // Range checks are left to `apply`, only the number is parsed here.
            Field::CookingTime => Self::CookingTime(raw.trim().parse::<i64>().or_raise(|| ErrorKind::ParseError {
                field: "cooking time",
                value: raw.to_string(),
            })?),
            Field::Ingredients => match raw.trim().is_empty() {
                true => Self::Ingredients(Vec::new()),
                false => Self::Ingredients(raw.split(DELIMITER).map(str::to_string).collect()),
            },
        })
    }

    pub fn field(&self) -> Field {
        match self {
            Change::Name(_) => Field::Name,
            Change::CookingTime(_) => Field::CookingTime,
            Change::Ingredients(_) => Field::Ingredients,
        }
    }
}
