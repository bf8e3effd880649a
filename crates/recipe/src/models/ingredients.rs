use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::error::{Error, ErrorKind, Result};

/// Character that separates ingredients in the flattened form.
pub const DELIMITER: char = ',';
/// Separator used when flattening ingredients for storage.
pub const SEPARATOR: &str = ", ";
/// Maximum length of the flattened ingredient list (`VARCHAR(255)`).
pub const MAX_FLATTENED_LENGTH: usize = 255;

/// An ordered, non-empty list of ingredient names.
///
/// Each ingredient is trimmed and can't contain the [`DELIMITER`], so the list
/// survives a trip through the flattened `", "`-joined storage form intact.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ingredients(Vec<String>);
impl Ingredients {
    pub fn new<I, S>(ingredients: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens = ingredients
            .into_iter()
            .map(|ingredient| Self::token(ingredient.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        if tokens.is_empty() {
            exn::bail!(ErrorKind::NoIngredients);
        }
        let length = tokens.iter().map(|t| t.chars().count()).sum::<usize>() + SEPARATOR.len() * (tokens.len() - 1);
        if length > MAX_FLATTENED_LENGTH {
            exn::bail!(ErrorKind::IngredientsTooLong(length));
        }
        Ok(Self(tokens))
    }

    /// Parses a delimited list such as `"Tea Leaves, Sugar, Water"`.
    ///
    /// Both the storage form and looser user input (`"tea leaves,sugar"`) are
    /// accepted. An empty segment, from a doubled or trailing comma, is an
    /// error rather than silently dropped.
    pub fn parse(flattened: impl AsRef<str>) -> Result<Self> {
        let flattened = flattened.as_ref();
        if flattened.trim().is_empty() {
            exn::bail!(ErrorKind::NoIngredients);
        }
        Self::new(flattened.split(DELIMITER))
    }

    fn token(ingredient: &str) -> Result<String> {
        let token = ingredient.trim();
        if token.is_empty() {
            exn::bail!(ErrorKind::EmptyIngredient);
        }
        if token.contains(DELIMITER) {
            exn::bail!(ErrorKind::DelimiterInIngredient(token.to_string()));
        }
        Ok(token.to_string())
    }

    /// The storage form: ingredients joined with `", "`.
    pub fn flatten(&self) -> String {
        self.0.join(SEPARATOR)
    }

    /// Number of ingredients; never zero.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`, there for the sake of [`len`](Self::len).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether one of the ingredients equals `name`, ignoring case.
    pub fn contains(&self, name: impl AsRef<str>) -> bool {
        let name = name.as_ref().trim().to_lowercase();
        self.0.iter().any(|ingredient| ingredient.to_lowercase() == name)
    }
}
impl FromStr for Ingredients {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::parse(s)
    }
}
impl<'a> IntoIterator for &'a Ingredients {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
impl From<Ingredients> for Vec<String> {
    fn from(ingredients: Ingredients) -> Self {
        ingredients.0
    }
}
impl Display for Ingredients {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.flatten())
    }
}
