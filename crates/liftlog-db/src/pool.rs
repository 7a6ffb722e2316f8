use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use tracing::{info, warn};

use crate::config::DbConfig;

/// Migrations embedded at compile time from `crates/liftlog-db/migrations/`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!();

/// Number of connection attempts before giving up.
const CONNECT_ATTEMPTS: u32 = 3;

/// Upper bound on the backoff between connection attempts.
const MAX_BACKOFF: Duration = Duration::from_secs(2);

/// Build connection options for the given config.
///
/// Foreign-key enforcement is switched on for every connection; without it
/// SQLite silently accepts orphaning writes. File-backed databases get WAL
/// journaling and are created on first use.
fn connect_options(config: &DbConfig) -> Result<SqliteConnectOptions> {
    let mut options = SqliteConnectOptions::from_str(&config.database_url)
        .with_context(|| format!("invalid database URL {:?}", config.database_url))?
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(5));

    if !config.is_in_memory() {
        options = options
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal);
    }

    Ok(options)
}

/// Create a connection pool with sensible defaults.
///
/// Transient connection failures are retried up to [`CONNECT_ATTEMPTS`]
/// times with capped backoff; this is the only place in the storage layer
/// where automatic retry happens.
pub async fn create_pool(config: &DbConfig) -> Result<SqlitePool> {
    let options = connect_options(config)?;

    let mut backoff = Duration::from_millis(250);
    let mut last_err = None;

    for attempt in 1..=CONNECT_ATTEMPTS {
        match SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(10))
            .connect_with(options.clone())
            .await
        {
            Ok(pool) => return Ok(pool),
            Err(e) => {
                warn!(attempt, error = %e, "database connection attempt failed");
                last_err = Some(e);
                if attempt < CONNECT_ATTEMPTS {
                    tokio::time::sleep(backoff).await;
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                }
            }
        }
    }

    Err(last_err.expect("at least one attempt was made")).with_context(|| {
        format!(
            "failed to connect to database at {} after {CONNECT_ATTEMPTS} attempts",
            config.database_url
        )
    })
}

/// Create a single-connection in-memory pool.
///
/// An in-memory SQLite database exists per connection, so the pool is
/// capped at one connection to keep every caller on the same database.
pub async fn create_memory_pool() -> Result<SqlitePool> {
    let options = connect_options(&DbConfig::new("sqlite::memory:"))?;
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
        .context("failed to create in-memory database")?;
    Ok(pool)
}

/// Run all pending embedded migrations against the pool.
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    MIGRATOR
        .run(pool)
        .await
        .context("failed to run database migrations")?;

    info!("migrations applied successfully");
    Ok(())
}

/// Return the row count for every user-defined table.
///
/// Useful for the `liftlog init` success message.
pub async fn table_counts(pool: &SqlitePool) -> Result<Vec<(String, i64)>> {
    let tables: Vec<(String,)> = sqlx::query_as(
        "SELECT name FROM sqlite_master \
         WHERE type = 'table' \
           AND name NOT LIKE 'sqlite_%' \
           AND name NOT LIKE '_sqlx_%' \
         ORDER BY name",
    )
    .fetch_all(pool)
    .await
    .context("failed to list tables")?;

    let mut counts = Vec::with_capacity(tables.len());
    for (table_name,) in &tables {
        // Table names come from sqlite_master so they are safe identifiers.
        let query = format!("SELECT COUNT(*) FROM {table_name}");
        let count: (i64,) = sqlx::query_as(&query)
            .fetch_one(pool)
            .await
            .with_context(|| format!("failed to count rows in {table_name}"))?;
        counts.push((table_name.clone(), count.0));
    }
    Ok(counts)
}
