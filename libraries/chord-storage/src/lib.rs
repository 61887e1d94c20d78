//! Chord Storage
//!
//! `SQLite` persistence layer for the Chord music catalog.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each entity owns its own query module
//!   (`users`, `artists`, `albums`, `songs`)
//! - **Cascade Deletes**: artist ⇒ albums ⇒ songs, enforced with foreign
//!   keys so a delete is a single atomic statement
//!
//! # Example
//!
//! ```rust,no_run
//! use chord_storage::{create_pool, run_migrations};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://chord.db").await?;
//! run_migrations(&pool).await?;
//!
//! let artists = chord_storage::artists::get_all(&pool).await?;
//! # Ok(())
//! # }
//! ```

mod error;

// Vertical slices
pub mod albums;
pub mod artists;
pub mod songs;
pub mod users;

pub use error::StorageError;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// Foreign-key enforcement is switched on for every connection; the
/// cascade-delete semantics of the schema depend on it.
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    // An in-memory database exists per connection; keep a single one so
    // every query sees the same schema.
    let max_connections = if database_url.contains(":memory:") { 1 } else { 5 };

    let pool = SqlitePoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}
