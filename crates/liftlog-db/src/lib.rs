//! Storage access layer for liftlog.
//!
//! SQLite pool construction, embedded migrations, row structs, and
//! per-table query functions. Query functions are generic over
//! [`sqlx::SqliteExecutor`] so they run equally against a pool or inside
//! a transaction, and they return plain [`sqlx::Error`] so the service
//! layer can classify constraint violations into its own taxonomy.

pub mod config;
pub mod models;
pub mod pool;
pub mod queries;
