mod recipe;

pub(crate) use self::recipe::{NewRecipeRow, RecipeRow};
