//! Ingredient search terms and matching rules.

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::error::{Error, ErrorKind};
use crate::models::{Ingredients, Recipe};

/// How a search term is compared against a recipe's ingredients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(rename_all = "lowercase"))]
pub enum MatchMode {
    /// The term must equal a whole ingredient, ignoring case.
    #[default]
    Token,
    /// The term may appear anywhere in the flattened ingredient list,
    /// ignoring case. "egg" matches "Eggplant" and even spans separators.
    Substring,
}
impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::Token => "token",
            MatchMode::Substring => "substring",
        }
    }
}
impl FromStr for MatchMode {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "token" | "exact" => Self::Token,
            "substring" | "legacy" => Self::Substring,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "match mode",
                value: s.to_string()
            }),
        })
    }
}
impl Display for MatchMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized set of ingredient search terms.
///
/// Terms are trimmed, blank terms are dropped and duplicates (ignoring case)
/// collapse into the first spelling seen. Order of first appearance is kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchTerms(Vec<String>);
impl SearchTerms {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for term in terms {
            let term = term.as_ref().trim();
            if term.is_empty() {
                continue;
            }
            let lowered = term.to_lowercase();
            if !normalized.iter().any(|seen| seen.to_lowercase() == lowered) {
                normalized.push(term.to_string());
            }
        }
        Self(normalized)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}
impl<S: AsRef<str>> FromIterator<S> for SearchTerms {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
impl<'a> IntoIterator for &'a SearchTerms {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Ingredients {
    /// Whether any of the terms matches these ingredients (logical OR).
    ///
    /// An empty set of terms matches nothing.
    pub fn matches_any(&self, terms: &SearchTerms, mode: MatchMode) -> bool {
        match mode {
            MatchMode::Token => terms.iter().any(|term| self.contains(term)),
            MatchMode::Substring => {
                let haystack = self.flatten().to_lowercase();
                terms.iter().any(|term| haystack.contains(&term.to_lowercase()))
            },
        }
    }
}

impl Recipe {
    /// See [`Ingredients::matches_any`].
    pub fn matches_any(&self, terms: &SearchTerms, mode: MatchMode) -> bool {
        self.ingredients().matches_any(terms, mode)
    }
}
