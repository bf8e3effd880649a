use crate::error::{Error, ErrorKind};
use exn::ResultExt;
use pantry_recipe::{CookingTime, Difficulty, Ingredients, Name, Recipe, RecipeId, SavedRecipe};

/// One row of the `final_recipes` table.
#[derive(Debug, sqlx::FromRow)]
pub(crate) struct RecipeRow {
    pub(crate) id: i64,
    pub(crate) name: String,
    pub(crate) ingredients: String,
    pub(crate) cooking_time: i64,
    pub(crate) difficulty: String,
}

/// Column values for a recipe that has not been given an id yet.
pub(crate) struct NewRecipeRow {
    pub(crate) name: String,
    pub(crate) ingredients: String,
    pub(crate) cooking_time: i64,
    pub(crate) difficulty: &'static str,
}
impl From<&Recipe> for NewRecipeRow {
    fn from(recipe: &Recipe) -> Self {
        Self {
            name: recipe.name().to_string(),
            ingredients: recipe.ingredients().flatten(),
            cooking_time: i64::from(recipe.cooking_time()),
            difficulty: recipe.difficulty().as_str(),
        }
    }
}

impl TryFrom<RecipeRow> for SavedRecipe {
    type Error = Error;
    fn try_from(row: RecipeRow) -> Result<Self, Self::Error> {
        let name = Name::new(&row.name).or_raise(|| ErrorKind::InvalidData("name"))?;
        let ingredients = Ingredients::parse(&row.ingredients).or_raise(|| ErrorKind::InvalidData("ingredients"))?;
        let cooking_time = CookingTime::new(row.cooking_time).or_raise(|| ErrorKind::InvalidData("cooking time"))?;
        let stored = row.difficulty.parse::<Difficulty>().or_raise(|| ErrorKind::InvalidData("difficulty"))?;
        let recipe = Recipe::from_parts(name, ingredients, cooking_time);
        if stored != recipe.difficulty() {
            // Rows written elsewhere may disagree; the rule always wins.
            tracing::warn!(
                id = row.id,
                stored = %stored,
                derived = %recipe.difficulty(),
                "Stored difficulty is stale; using derived difficulty"
            );
        }
        Ok(SavedRecipe::new(RecipeId::new(row.id), recipe))
    }
}
