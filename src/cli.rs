//! Command-line definitions.

use clap::{Args, Parser, Subcommand};
use pantry_recipe::models::DELIMITER;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "pantry")]
#[command(version, about = "Store, search and classify recipes", long_about = None)]
pub struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,
    /// Database file, overriding the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a new recipe
    Add(AddArgs),
    /// List every recipe
    List,
    /// Show a single recipe
    Show { id: i64 },
    /// Print the number of stored recipes
    Count,
    /// Find recipes that use any of the given ingredients
    Search {
        #[arg(required = true, value_name = "INGREDIENT")]
        terms: Vec<String>,
        /// Match anywhere in the ingredient list, not just whole ingredients
        #[arg(long)]
        substring: bool,
    },
    /// List every ingredient used by at least one recipe
    Ingredients,
    /// Change one field of a recipe: name, cooking-time or ingredients
    Update {
        id: i64,
        field: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Delete a recipe
    Delete { id: i64 },
}

#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(long)]
    pub name: String,
    /// Cooking time in minutes
    #[arg(long, allow_negative_numbers = true, value_name = "MINUTES")]
    pub cooking_time: i64,
    /// One ingredient; repeat the flag for more
    #[arg(long = "ingredient", value_name = "INGREDIENT", required_unless_present = "ingredients")]
    pub ingredient: Vec<String>,
    /// Comma-separated ingredients
    #[arg(long, value_name = "LIST", conflicts_with = "ingredient")]
    pub ingredients: Option<String>,
}
impl AddArgs {
    /// Ingredients from whichever flag was used.
    pub fn ingredient_list(&self) -> Vec<String> {
        match &self.ingredients {
            Some(list) if list.trim().is_empty() => Vec::new(),
            Some(list) => list.split(DELIMITER).map(str::to_string).collect(),
            None => self.ingredient.clone(),
        }
    }
}
