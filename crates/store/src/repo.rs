//! Repository for [`Recipe`] records.
//!
//! Every write runs in its own transaction. If any step fails the transaction
//! is rolled back before the error is returned, so a failed operation never
//! leaves a partially-written recipe behind and the repository stays usable.

use crate::Database;
use crate::error::{Error, ErrorKind, Result};
use crate::models::{NewRecipeRow, RecipeRow};
use exn::{OptionExt, ResultExt};
use pantry_recipe::{Change, Ingredients, MatchMode, Recipe, RecipeId, SavedRecipe, SearchTerms};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};
use std::collections::BTreeMap;
use tracing::instrument;

/// Create, query, update and delete recipes.
///
/// The repository never decides a recipe's difficulty on its own: it writes
/// whatever the [`Recipe`] derived, and changes go through
/// [`Recipe::apply`] so the derived value is recomputed before it is stored.
#[derive(Debug, Clone)]
pub struct Repository {
    pool: SqlitePool,
    match_mode: MatchMode,
}
impl From<&Database> for Repository {
    fn from(db: &Database) -> Self {
        Self::new(db.pool().clone())
    }
}
impl Repository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool, match_mode: MatchMode::default() }
    }

    /// Use a different rule for [`search_by_ingredients`](Self::search_by_ingredients).
    #[must_use]
    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Start a write transaction.
    ///
    /// `BEGIN IMMEDIATE` takes the write lock up front, so a second writer
    /// waits on the busy timeout instead of failing when it tries to upgrade
    /// a read snapshot.
    async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        self.pool.begin_with("BEGIN IMMEDIATE").await.or_raise(|| ErrorKind::Persistence)
    }

    /// Commit on success, roll back on failure. Either way the outcome of the
    /// operation is returned unchanged (unless the commit itself fails).
    async fn finish<T>(tx: Transaction<'static, Sqlite>, outcome: Result<T>) -> Result<T> {
        match outcome {
            Ok(value) => {
                tx.commit().await.or_raise(|| ErrorKind::Persistence)?;
                Ok(value)
            },
            Err(err) => {
                let kind: &ErrorKind = &err;
                tracing::warn!(error = %kind, "Rolling back recipe transaction");
                if let Err(rollback) = tx.rollback().await {
                    tracing::warn!(error = %rollback, "Rollback failed; the connection will discard the transaction");
                }
                Err(err)
            },
        }
    }

    // =========================================================================
    // Create
    // =========================================================================

    /// Validate the input, classify it and store it as a new recipe.
    ///
    /// Returns the id the database assigned.
    pub async fn create<I, S>(&self, name: impl AsRef<str>, ingredients: I, cooking_time: i64) -> Result<RecipeId>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let recipe = Recipe::new(name, ingredients, cooking_time).map_err(ErrorKind::validation)?;
        self.insert(&recipe).await
    }

    /// Store an already-built recipe, returning its new id.
    #[instrument(skip_all, fields(name = %recipe.name(), id))]
    pub async fn insert(&self, recipe: &Recipe) -> Result<RecipeId> {
        let row = NewRecipeRow::from(recipe);
        let mut tx = self.begin().await?;
        let outcome = Self::insert_row(&mut tx, row).await;
        let id = Self::finish(tx, outcome).await?;
        tracing::Span::current().record("id", id.get());
        tracing::info!(difficulty = %recipe.difficulty(), "Recipe created");
        Ok(id)
    }

    async fn insert_row(conn: &mut SqliteConnection, row: NewRecipeRow) -> Result<RecipeId> {
        let result = sqlx::query(include_str!("../queries/insert_recipe.sql"))
            .bind(row.name)
            .bind(row.ingredients)
            .bind(row.cooking_time)
            .bind(row.difficulty)
            .execute(conn)
            .await
            .or_raise(|| ErrorKind::Persistence)?;
        Ok(RecipeId::new(result.last_insert_rowid()))
    }

    // =========================================================================
    // Get/List
    // =========================================================================

    /// Get a recipe by its id.
    ///
    /// A missing id is `Ok(None)`; only storage failures are errors.
    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: RecipeId) -> Result<Option<SavedRecipe>> {
        let row: Option<RecipeRow> = sqlx::query_as(include_str!("../queries/get_by_id.sql"))
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .or_raise(|| ErrorKind::Persistence)?;
        row.map(SavedRecipe::try_from).transpose()
    }

    /// List every recipe, in id (insertion) order.
    ///
    /// Reads the table afresh on every call.
    #[instrument(skip(self), fields(count))]
    pub async fn list_all(&self) -> Result<Vec<SavedRecipe>> {
        let rows: Vec<RecipeRow> = sqlx::query_as(include_str!("../queries/list_all.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Persistence)?;
        tracing::Span::current().record("count", rows.len());
        rows.into_iter().map(SavedRecipe::try_from).collect()
    }

    /// Number of stored recipes.
    pub async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar(include_str!("../queries/count.sql"))
            .fetch_one(&self.pool)
            .await
            .or_raise(|| ErrorKind::Persistence)?;
        u64::try_from(count).or_raise(|| ErrorKind::InvalidData("count"))
    }

    // =========================================================================
    // Search
    // =========================================================================

    /// Recipes matching any of the terms, using the repository's
    /// [`MatchMode`] (token matching unless configured otherwise).
    ///
    /// No terms, or no matches, is an empty list rather than an error.
    pub async fn search_by_ingredients<I, S>(&self, terms: I) -> Result<Vec<SavedRecipe>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.search_by_ingredients_with(terms, self.match_mode).await
    }

    /// [`search_by_ingredients`](Self::search_by_ingredients) with an explicit
    /// [`MatchMode`].
    pub async fn search_by_ingredients_with<I, S>(&self, terms: I, mode: MatchMode) -> Result<Vec<SavedRecipe>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = SearchTerms::new(terms);
        self.search(&terms, mode).await
    }

    #[instrument(skip(self), fields(matches))]
    async fn search(&self, terms: &SearchTerms, mode: MatchMode) -> Result<Vec<SavedRecipe>> {
        if terms.is_empty() {
            return Ok(Vec::new());
        }
        // SQLite only folds ASCII case, so matching happens on parsed recipes.
        let rows: Vec<RecipeRow> = sqlx::query_as(include_str!("../queries/list_all.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Persistence)?;
        tracing::debug!(candidates = rows.len(), "Searching recipes by ingredient");
        let mut recipes = Vec::new();
        for row in rows {
            let saved = SavedRecipe::try_from(row)?;
            if saved.matches_any(terms, mode) {
                recipes.push(saved);
            }
        }
        tracing::Span::current().record("matches", recipes.len());
        Ok(recipes)
    }

    /// Every distinct ingredient across all recipes.
    ///
    /// Spellings that differ only by case are listed once, using the first
    /// spelling found. The list is sorted ignoring case.
    pub async fn list_ingredients(&self) -> Result<Vec<String>> {
        let flattened: Vec<String> = sqlx::query_scalar(include_str!("../queries/list_ingredients.sql"))
            .fetch_all(&self.pool)
            .await
            .or_raise(|| ErrorKind::Persistence)?;
        let mut distinct = BTreeMap::new();
        for ingredients in flattened {
            let ingredients = Ingredients::parse(&ingredients).or_raise(|| ErrorKind::InvalidData("ingredients"))?;
            for ingredient in Vec::<String>::from(ingredients) {
                distinct.entry(ingredient.to_lowercase()).or_insert(ingredient);
            }
        }
        Ok(distinct.into_values().collect())
    }

    // =========================================================================
    // Update
    // =========================================================================

    /// Change one field of a stored recipe and persist it.
    ///
    /// The row is read, changed through [`Recipe::apply`] (recomputing the
    /// difficulty if cooking time or ingredients changed) and written back in
    /// a single transaction. Returns the updated recipe.
    #[instrument(skip(self, change), fields(field = %change.field()))]
    pub async fn update_field(&self, id: RecipeId, change: Change) -> Result<SavedRecipe> {
        let reclassified = change.field().affects_difficulty();
        let mut tx = self.begin().await?;
        let outcome = Self::update_row(&mut tx, id, change).await;
        let saved = Self::finish(tx, outcome).await?;
        tracing::info!(difficulty = %saved.difficulty(), reclassified, "Recipe updated");
        Ok(saved)
    }

    async fn update_row(conn: &mut SqliteConnection, id: RecipeId, change: Change) -> Result<SavedRecipe> {
        let row: Option<RecipeRow> = sqlx::query_as(include_str!("../queries/get_by_id.sql"))
            .bind(id.get())
            .fetch_optional(&mut *conn)
            .await
            .or_raise(|| ErrorKind::Persistence)?;
        let mut saved = SavedRecipe::try_from(row.ok_or_raise(|| ErrorKind::NotFound(id))?)?;
        saved.recipe.apply(change).map_err(ErrorKind::validation)?;
        let row = NewRecipeRow::from(&saved.recipe);
        let result = sqlx::query(include_str!("../queries/update_recipe.sql"))
            .bind(row.name)
            .bind(row.ingredients)
            .bind(row.cooking_time)
            .bind(row.difficulty)
            .bind(id.get())
            .execute(&mut *conn)
            .await
            .or_raise(|| ErrorKind::Persistence)?;
        if result.rows_affected() == 0 {
            exn::bail!(ErrorKind::NotFound(id));
        }
        Ok(saved)
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Delete a recipe by id.
    ///
    /// Deleting an id that doesn't exist, including one that was already
    /// deleted, is [`ErrorKind::NotFound`].
    #[instrument(skip(self))]
    pub async fn delete(&self, id: RecipeId) -> Result<()> {
        let mut tx = self.begin().await?;
        let outcome = Self::delete_row(&mut tx, id).await;
        Self::finish(tx, outcome).await?;
        tracing::info!("Recipe deleted");
        Ok(())
    }

    async fn delete_row(conn: &mut SqliteConnection, id: RecipeId) -> Result<()> {
        let result = sqlx::query(include_str!("../queries/delete_by_id.sql"))
            .bind(id.get())
            .execute(conn)
            .await
            .or_raise(|| ErrorKind::Persistence)?;
        match result.rows_affected() {
            0 => Err(Error::from(ErrorKind::NotFound(id))),
            _ => Ok(()),
        }
    }
}
