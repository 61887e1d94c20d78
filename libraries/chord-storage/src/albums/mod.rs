//! Album queries

use crate::error::Result;
use crate::StorageError;
use chord_core::types::{Album, AlbumId, ArtistId, CreateAlbum, UpdateAlbum};
use sqlx::{Row, SqlitePool};

fn map_album(row: &sqlx::sqlite::SqliteRow) -> Album {
    Album {
        id: row.get("id"),
        artist_id: row.get("artist_id"),
        title: row.get("title"),
        release_date: row.get("release_date"),
        cover_path: row.get("cover_path"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

const COLUMNS: &str = "id, artist_id, title, release_date, cover_path, created_at, updated_at";

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Album>> {
    let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM albums ORDER BY id"))
        .fetch_all(pool)
        .await?;

    Ok(rows.iter().map(map_album).collect())
}

pub async fn get_by_id(pool: &SqlitePool, id: AlbumId) -> Result<Option<Album>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM albums WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(map_album))
}

pub async fn get_by_artist(pool: &SqlitePool, artist_id: ArtistId) -> Result<Vec<Album>> {
    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM albums WHERE artist_id = ? ORDER BY id"
    ))
    .bind(artist_id)
    .fetch_all(pool)
    .await?;

    Ok(rows.iter().map(map_album).collect())
}

pub async fn create(pool: &SqlitePool, album: CreateAlbum) -> Result<Album> {
    let result = sqlx::query(
        "INSERT INTO albums (artist_id, title, release_date, cover_path)
         VALUES (?, ?, ?, ?)",
    )
    .bind(album.artist_id)
    .bind(&album.title)
    .bind(&album.release_date)
    .bind(&album.cover_path)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Album", id))
}

/// Apply a partial update; absent fields are left untouched
pub async fn update(pool: &SqlitePool, id: AlbumId, patch: UpdateAlbum) -> Result<Album> {
    let mut sets = Vec::new();
    if patch.title.is_some() {
        sets.push("title = ?");
    }
    if patch.release_date.is_some() {
        sets.push("release_date = ?");
    }

    if !sets.is_empty() {
        sets.push("updated_at = datetime('now')");
        let sql = format!("UPDATE albums SET {} WHERE id = ?", sets.join(", "));

        let mut query = sqlx::query(&sql);
        if let Some(title) = &patch.title {
            query = query.bind(title);
        }
        if let Some(release_date) = &patch.release_date {
            query = query.bind(release_date);
        }
        query.bind(id).execute(pool).await?;
    }

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Album", id))
}

/// Delete an album; its songs go with it
pub async fn delete(pool: &SqlitePool, id: AlbumId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM albums WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
