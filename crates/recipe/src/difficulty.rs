use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use crate::error::{Error, ErrorKind};

/// Recipes cooking for this many minutes or longer are "long".
pub const LONG_COOKING_TIME_MINUTES: u32 = 10;
/// Recipes with this many ingredients or more are "busy".
pub const MANY_INGREDIENTS: usize = 4;

/// How hard a recipe is to make.
///
/// Never set directly: always derived from cooking time and ingredient count
/// via [`Difficulty::classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Difficulty {
    /// Quick, with few ingredients.
    Easy,
    /// Quick, with many ingredients.
    Medium,
    /// Slow, with few ingredients.
    Intermediate,
    /// Slow, with many ingredients.
    Hard,
}
impl Difficulty {
    /// Classifies a recipe by its cooking time (minutes) and ingredient count.
    ///
    /// | cooking time | ingredients | difficulty     |
    /// |--------------|-------------|----------------|
    /// | < 10         | < 4         | `Easy`         |
    /// | < 10         | ≥ 4         | `Medium`       |
    /// | ≥ 10         | < 4         | `Intermediate` |
    /// | ≥ 10         | ≥ 4         | `Hard`         |
    ///
    /// ```rust
    /// use pantry_recipe::Difficulty;
    /// assert_eq!(Difficulty::classify(10, 4), Difficulty::Hard);
    /// assert_eq!(Difficulty::classify(9, 3), Difficulty::Easy);
    /// ```
    #[must_use]
    pub const fn classify(cooking_time: u32, ingredient_count: usize) -> Self {
        let long = cooking_time >= LONG_COOKING_TIME_MINUTES;
        let busy = ingredient_count >= MANY_INGREDIENTS;
        match (long, busy) {
            (false, false) => Self::Easy,
            (false, true) => Self::Medium,
            (true, false) => Self::Intermediate,
            (true, true) => Self::Hard,
        }
    }

    /// Returns the persisted (and display) form of the difficulty.
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Hard => "Hard",
        }
    }
}

/// Free-function form of [`Difficulty::classify`].
#[must_use]
pub const fn classify(cooking_time: u32, ingredient_count: usize) -> Difficulty {
    Difficulty::classify(cooking_time, ingredient_count)
}

impl FromStr for Difficulty {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Older data was written in lowercase.
        Ok(match s.trim().to_lowercase().as_str() {
            "easy" => Self::Easy,
            "medium" => Self::Medium,
            "intermediate" => Self::Intermediate,
            "hard" => Self::Hard,
            _ => exn::bail!(ErrorKind::ParseError {
                field: "difficulty",
                value: s.to_string()
            }),
        })
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}
