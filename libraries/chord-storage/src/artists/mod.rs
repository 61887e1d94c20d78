//! Artist queries

use crate::error::Result;
use crate::StorageError;
use chord_core::types::{Artist, ArtistId, CreateArtist, UpdateArtist, UserId};
use sqlx::{Row, SqlitePool};

fn map_artist(row: &sqlx::sqlite::SqliteRow) -> Artist {
    Artist {
        id: row.get("id"),
        publisher_id: row.get("publisher_id"),
        name: row.get("name"),
        bio: row.get("bio"),
        birth_date: row.get("birth_date"),
        country: row.get("country"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const COLUMNS: &str = "id, publisher_id, name, bio, birth_date, country, created_at, updated_at";

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Artist>> {
    let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM artists ORDER BY id"))
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(map_artist).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: ArtistId) -> Result<Option<Artist>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM artists WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(map_artist))
}

/// Get every artist owned by the given publisher, in insertion order
pub async fn get_by_publisher(pool: &SqlitePool, publisher_id: UserId) -> Result<Vec<Artist>> {
    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM artists WHERE publisher_id = ? ORDER BY id"
    ))
    .bind(publisher_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(map_artist).collect())
}

pub async fn create(pool: &SqlitePool, artist: CreateArtist) -> Result<Artist> {
    let result = sqlx::query(
        "INSERT INTO artists (publisher_id, name, bio, birth_date, country)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(artist.publisher_id)
    .bind(&artist.name)
    .bind(&artist.bio)
    .bind(&artist.birth_date)
    .bind(&artist.country)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Artist", id))
}

/// Apply a partial update; absent fields are left untouched.
///
/// `publisher_id` is immutable and deliberately not part of the patch.
pub async fn update(pool: &SqlitePool, id: ArtistId, patch: UpdateArtist) -> Result<Artist> {
    let mut sets = Vec::new();
    if patch.name.is_some() {
        sets.push("name = ?");
    }
    if patch.bio.is_some() {
        sets.push("bio = ?");
    }
    if patch.birth_date.is_some() {
        sets.push("birth_date = ?");
    }
    if patch.country.is_some() {
        sets.push("country = ?");
    }

    if !sets.is_empty() {
        sets.push("updated_at = datetime('now')");
        let sql = format!("UPDATE artists SET {} WHERE id = ?", sets.join(", "));

        let mut query = sqlx::query(&sql);
        if let Some(name) = &patch.name {
            query = query.bind(name);
        }
        if let Some(bio) = &patch.bio {
            query = query.bind(bio);
        }
        if let Some(birth_date) = &patch.birth_date {
            query = query.bind(birth_date);
        }
        if let Some(country) = &patch.country {
            query = query.bind(country);
        }
        query.bind(id).execute(pool).await?;
    }

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Artist", id))
}

/// Delete an artist; albums and songs underneath it go with it
pub async fn delete(pool: &SqlitePool, id: ArtistId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
