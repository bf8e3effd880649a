//! SQLite persistence for recipes.
//!
//! This crate owns the `final_recipes` table: opening (and migrating) the
//! database, and the create/read/update/delete/search operations on it.
//!
//! # Architecture
//! - [`Database`] owns the connection pool and runs the embedded migrations.
//! - [`Repository`] performs the operations. Each write is one transaction,
//!   rolled back on failure, so an error never leaves a half-written row.
//!
//! Rows are converted to and from [`pantry_recipe::Recipe`] at the boundary;
//! a row that no longer validates is reported as
//! [`ErrorKind::InvalidData`](error::ErrorKind::InvalidData) rather than
//! handed out.

mod db;
pub mod error;
mod models;
mod repo;

pub use crate::db::{DEFAULT_MAX_CONNECTIONS, Database};
pub use crate::repo::Repository;
