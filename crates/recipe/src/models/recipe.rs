use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use super::{CookingTime, Ingredients, Name};
use crate::change::{Change, Field};
use crate::difficulty::Difficulty;
use crate::error::{Error, ErrorKind, Result};
use exn::ResultExt;

/// Identifier assigned by the store when a recipe is first inserted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(transparent))]
pub struct RecipeId(i64);
impl RecipeId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> i64 {
        self.0
    }
}
impl From<i64> for RecipeId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}
impl From<RecipeId> for i64 {
    fn from(id: RecipeId) -> Self {
        id.0
    }
}
impl FromStr for RecipeId {
    type Err = Error;
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let id = s.trim().parse::<i64>().or_raise(|| ErrorKind::ParseError {
            field: "id",
            value: s.to_string(),
        })?;
        Ok(Self(id))
    }
}
impl Display for RecipeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.0)
    }
}

/// A recipe, before or after it has been stored.
///
/// Fields are private so that [`difficulty`](Self::difficulty) can only ever
/// be the classification of the current cooking time and ingredients. It is
/// recomputed by every constructor and by [`apply`](Self::apply).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Recipe {
    name: Name,
    ingredients: Ingredients,
    cooking_time: CookingTime,
    difficulty: Difficulty,
}
impl Recipe {
    /// Validates raw input and builds a recipe from it.
    ///
    /// ```rust
    /// use pantry_recipe::{Difficulty, Recipe};
    /// let tea = Recipe::new("Tea", ["Tea Leaves", "Sugar", "Water"], 5).unwrap();
    /// assert_eq!(tea.difficulty(), Difficulty::Easy);
    /// assert!(Recipe::new("", ["x"], 5).is_err());
    /// ```
    pub fn new<I, S>(name: impl AsRef<str>, ingredients: I, cooking_time: i64) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_parts(
            Name::new(name)?,
            Ingredients::new(ingredients)?,
            CookingTime::new(cooking_time)?,
        ))
    }

    /// Builds a recipe from already-validated parts.
    pub fn from_parts(name: Name, ingredients: Ingredients, cooking_time: CookingTime) -> Self {
        let difficulty = Difficulty::classify(cooking_time.minutes(), ingredients.len());
        Self { name, ingredients, cooking_time, difficulty }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn ingredients(&self) -> &Ingredients {
        &self.ingredients
    }

    pub fn cooking_time(&self) -> CookingTime {
        self.cooking_time
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn set_name(&mut self, name: Name) {
        self.name = name;
    }

    pub fn set_ingredients(&mut self, ingredients: Ingredients) {
        self.ingredients = ingredients;
        self.recompute();
    }

    pub fn set_cooking_time(&mut self, cooking_time: CookingTime) {
        self.cooking_time = cooking_time;
        self.recompute();
    }

    /// Validates and applies a single field change, returning the field that
    /// was changed.
    ///
    /// The recipe is unchanged if validation fails.
    pub fn apply(&mut self, change: Change) -> Result<Field> {
        let field = change.field();
        match change {
            Change::Name(name) => self.set_name(Name::new(name)?),
            Change::CookingTime(minutes) => self.set_cooking_time(CookingTime::new(minutes)?),
            Change::Ingredients(ingredients) => self.set_ingredients(Ingredients::new(ingredients)?),
        }
        Ok(field)
    }

    fn recompute(&mut self) {
        self.difficulty = Difficulty::classify(self.cooking_time.minutes(), self.ingredients.len());
        tracing::trace!(difficulty = %self.difficulty, "Recomputed recipe difficulty");
    }
}

/// A recipe together with the identifier the store assigned to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SavedRecipe {
    pub id: RecipeId,
    pub recipe: Recipe,
}
impl SavedRecipe {
    pub fn new(id: RecipeId, recipe: Recipe) -> Self {
        Self { id, recipe }
    }
}
impl std::ops::Deref for SavedRecipe {
    type Target = Recipe;
    fn deref(&self) -> &Self::Target {
        &self.recipe
    }
}
