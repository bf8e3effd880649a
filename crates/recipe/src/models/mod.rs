mod cooking_time;
mod ingredients;
mod name;
mod recipe;

pub use self::cooking_time::CookingTime;
pub use self::ingredients::{DELIMITER, Ingredients, MAX_FLATTENED_LENGTH, SEPARATOR};
pub use self::name::{MAX_NAME_LENGTH, Name};
pub use self::recipe::{Recipe, RecipeId, SavedRecipe};
