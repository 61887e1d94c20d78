//! User account and credential queries

use crate::error::Result;
use crate::StorageError;
use chord_core::types::{Role, User, UserId};
use sqlx::{Row, SqlitePool};

fn map_user(row: &sqlx::sqlite::SqliteRow) -> Result<User> {
    let role: String = row.get("role");
    Ok(User {
        id: row.get("id"),
        email: row.get("email"),
        role: role
            .parse::<Role>()
            .map_err(|e| StorageError::CorruptRow(e.to_string()))?,
        created_at: row.get("created_at"),
    })
}

/// Create a new user account
///
/// Credentials are stored separately via [`set_password_hash`].
pub async fn create(pool: &SqlitePool, email: &str, role: Role) -> Result<User> {
    let result = sqlx::query("INSERT INTO users (email, role) VALUES (?, ?)")
        .bind(email)
        .bind(role.as_str())
        .execute(pool)
        .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("User", id))
}

pub async fn get_by_id(pool: &SqlitePool, id: UserId) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, email, role, created_at FROM users WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(map_user).transpose()
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>> {
    let row = sqlx::query("SELECT id, email, role, created_at FROM users WHERE email = ?")
        .bind(email)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(map_user).transpose()
}

/// Get all users
pub async fn get_all(pool: &SqlitePool) -> Result<Vec<User>> {
    let rows = sqlx::query("SELECT id, email, role, created_at FROM users ORDER BY email")
        .fetch_all(pool)
        .await?;

    rows.iter().map(map_user).collect()
}

/// Get a user's password hash for authentication
///
/// Returns `None` if the user has no credentials set.
pub async fn get_password_hash(pool: &SqlitePool, user_id: UserId) -> Result<Option<String>> {
    let row = sqlx::query("SELECT password_hash FROM user_credentials WHERE user_id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

    Ok(row.map(|r| r.get("password_hash")))
}

/// Create or update a user's credentials
///
/// The hash must already be computed by the caller; this module never
/// sees plaintext passwords.
pub async fn set_password_hash(
    pool: &SqlitePool,
    user_id: UserId,
    password_hash: &str,
) -> Result<()> {
    sqlx::query(
        "INSERT INTO user_credentials (user_id, password_hash, updated_at)
         VALUES (?, ?, datetime('now'))
         ON CONFLICT(user_id)
         DO UPDATE SET password_hash = excluded.password_hash, updated_at = datetime('now')",
    )
    .bind(user_id)
    .bind(password_hash)
    .execute(pool)
    .await?;

    Ok(())
}
