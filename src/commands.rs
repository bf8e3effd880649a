//! One store operation per command, printed as plain text.

use crate::cli::Command;
use crate::error::{ErrorKind, Result};
use exn::{OptionExt, ResultExt};
use pantry_recipe::{Change, Field, MatchMode, RecipeId, SavedRecipe};
use pantry_store::Repository;
use std::io::Write;

pub async fn execute<W: Write>(repo: &Repository, command: Command, out: &mut W) -> Result<()> {
    match command {
        Command::Add(args) => {
            let id = repo
                .create(&args.name, args.ingredient_list(), args.cooking_time)
                .await
                .map_err(ErrorKind::store)?;
            writeln!(out, "Added recipe {id}").or_raise(|| ErrorKind::Io)
        },
        Command::List => {
            let recipes = repo.list_all().await.map_err(ErrorKind::store)?;
            write_summaries(out, &recipes)
        },
        Command::Show { id } => {
            let id = RecipeId::new(id);
            let saved = repo
                .get_by_id(id)
                .await
                .map_err(ErrorKind::store)?
                .ok_or_raise(|| ErrorKind::NotFound(id))?;
            write_detail(out, &saved)
        },
        Command::Count => {
            let count = repo.count().await.map_err(ErrorKind::store)?;
            writeln!(out, "{count}").or_raise(|| ErrorKind::Io)
        },
        Command::Search { terms, substring } => {
            let mode = match substring {
                true => MatchMode::Substring,
                false => repo.match_mode(),
            };
            let recipes = repo
                .search_by_ingredients_with(&terms, mode)
                .await
                .map_err(ErrorKind::store)?;
            write_summaries(out, &recipes)
        },
        Command::Ingredients => {
            for ingredient in repo.list_ingredients().await.map_err(ErrorKind::store)? {
                writeln!(out, "{ingredient}").or_raise(|| ErrorKind::Io)?;
            }
            Ok(())
        },
        Command::Update { id, field, value } => {
            let field = field.parse::<Field>().or_raise(|| ErrorKind::Argument)?;
            let change = Change::parse(field, &value).or_raise(|| ErrorKind::Argument)?;
            let saved = repo
                .update_field(RecipeId::new(id), change)
                .await
                .map_err(ErrorKind::store)?;
            write_detail(out, &saved)
        },
        Command::Delete { id } => {
            let id = RecipeId::new(id);
            repo.delete(id).await.map_err(ErrorKind::store)?;
            writeln!(out, "Deleted recipe {id}").or_raise(|| ErrorKind::Io)
        },
    }
}

fn write_summaries<W: Write>(out: &mut W, recipes: &[SavedRecipe]) -> Result<()> {
    if recipes.is_empty() {
        return writeln!(out, "No recipes found.").or_raise(|| ErrorKind::Io);
    }
    for saved in recipes {
        writeln!(
            out,
            "{:>4}  {} ({}, {}): {}",
            saved.id.get(),
            saved.name(),
            saved.cooking_time(),
            saved.difficulty(),
            saved.ingredients()
        )
        .or_raise(|| ErrorKind::Io)?;
    }
    Ok(())
}

fn write_detail<W: Write>(out: &mut W, saved: &SavedRecipe) -> Result<()> {
    writeln!(
        out,
        "Recipe {}: {}\n  Cooking time: {}\n  Ingredients:  {}\n  Difficulty:   {}",
        saved.id,
        saved.name(),
        saved.cooking_time(),
        saved.ingredients(),
        saved.difficulty()
    )
    .or_raise(|| ErrorKind::Io)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::AddArgs;
    use pantry_store::Database;

    async fn repo() -> Repository {
        let repo = Database::connect_in_memory().await.unwrap().repository();
        repo.create("Tea", ["Tea Leaves", "Sugar", "Water"], 5).await.unwrap();
        repo.create("Coffee", ["Coffee Powder", "Sugar", "Water"], 5).await.unwrap();
        repo
    }

    async fn run(repo: &Repository, command: Command) -> Result<String> {
        let mut out = Vec::new();
        execute(repo, command, &mut out).await?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_add_then_show() {
        let repo = repo().await;
        let add = AddArgs {
            name: "Toast".to_string(),
            cooking_time: 3,
            ingredient: Vec::new(),
            ingredients: Some("Bread, Butter".to_string()),
        };
        assert_eq!(run(&repo, Command::Add(add)).await.unwrap(), "Added recipe 3\n");
        let shown = run(&repo, Command::Show { id: 3 }).await.unwrap();
        assert_eq!(
            shown,
            "Recipe 3: Toast\n  Cooking time: 3 min\n  Ingredients:  Bread, Butter\n  Difficulty:   Easy\n"
        );
    }

    #[tokio::test]
    async fn test_add_invalid_is_store_error() {
        let repo = repo().await;
        let add = AddArgs {
            name: "  ".to_string(),
            cooking_time: 3,
            ingredient: vec!["Bread".to_string()],
            ingredients: None,
        };
        let err = run(&repo, Command::Add(add)).await.unwrap_err();
        assert_eq!(*err, ErrorKind::Store);
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let repo = repo().await;
        let listed = run(&repo, Command::List).await.unwrap();
        assert_eq!(listed.lines().count(), 2);
        assert!(listed.lines().next().unwrap().contains("Tea (5 min, Easy): Tea Leaves, Sugar, Water"));
        assert_eq!(run(&repo, Command::Count).await.unwrap(), "2\n");
    }

    #[tokio::test]
    async fn test_search_modes() {
        let repo = repo().await;
        let terms = vec!["tea".to_string()];
        let token = run(&repo, Command::Search { terms: terms.clone(), substring: false }).await.unwrap();
        assert_eq!(token, "No recipes found.\n");
        let substring = run(&repo, Command::Search { terms, substring: true }).await.unwrap();
        assert!(substring.contains("Tea"));
        assert!(!substring.contains("Coffee"));
    }

    #[tokio::test]
    async fn test_ingredients() {
        let repo = repo().await;
        let listed = run(&repo, Command::Ingredients).await.unwrap();
        assert_eq!(listed, "Coffee Powder\nSugar\nTea Leaves\nWater\n");
    }

    #[tokio::test]
    async fn test_update_reclassifies() {
        let repo = repo().await;
        let command = Command::Update {
            id: 1,
            field: "cooking-time".to_string(),
            value: "12".to_string(),
        };
        let shown = run(&repo, command).await.unwrap();
        assert!(shown.ends_with("Difficulty:   Intermediate\n"));
    }

    #[tokio::test]
    async fn test_update_bad_field_is_argument_error() {
        let repo = repo().await;
        let command = Command::Update {
            id: 1,
            field: "difficulty".to_string(),
            value: "Easy".to_string(),
        };
        assert_eq!(*run(&repo, command).await.unwrap_err(), ErrorKind::Argument);
    }

    #[tokio::test]
    async fn test_missing_ids_are_not_found() {
        let repo = repo().await;
        let missing = ErrorKind::NotFound(RecipeId::new(9));
        assert_eq!(*run(&repo, Command::Show { id: 9 }).await.unwrap_err(), missing);
        assert_eq!(*run(&repo, Command::Delete { id: 9 }).await.unwrap_err(), missing);
        run(&repo, Command::Delete { id: 2 }).await.unwrap();
        let err = run(&repo, Command::Delete { id: 2 }).await.unwrap_err();
        assert_eq!(*err, ErrorKind::NotFound(RecipeId::new(2)));
    }
}
