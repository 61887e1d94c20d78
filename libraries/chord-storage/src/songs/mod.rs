//! Song queries

use crate::error::Result;
use crate::StorageError;
use chord_core::types::{AlbumId, CreateSong, Genre, Song, SongId, UpdateSong};
use sqlx::{Row, SqlitePool};

fn map_song(row: &sqlx::sqlite::SqliteRow) -> Result<Song> {
    let genre: String = row.get("genre");
    Ok(Song {
        id: row.get("id"),
        album_id: row.get("album_id"),
        title: row.get("title"),
        genre: genre
            .parse::<Genre>()
            .map_err(|e| StorageError::CorruptRow(e.to_string()))?,
        duration_secs: row.get("duration_secs"),
        likes: row.get("likes"),
        audio_path: row.get("audio_path"),
        cover_path: row.get("cover_path"),
        release_date: row.get("release_date"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

const COLUMNS: &str = "id, album_id, title, genre, duration_secs, likes, audio_path, cover_path, \
                       release_date, created_at, updated_at";

pub async fn get_all(pool: &SqlitePool) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!("SELECT {COLUMNS} FROM songs ORDER BY id"))
        .fetch_all(pool)
        .await?;

    rows.iter().map(map_song).collect()
}

pub async fn get_by_id(pool: &SqlitePool, id: SongId) -> Result<Option<Song>> {
    let row = sqlx::query(&format!("SELECT {COLUMNS} FROM songs WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(map_song).transpose()
}

pub async fn get_by_album(pool: &SqlitePool, album_id: AlbumId) -> Result<Vec<Song>> {
    let rows = sqlx::query(&format!(
        "SELECT {COLUMNS} FROM songs WHERE album_id = ? ORDER BY id"
    ))
    .bind(album_id)
    .fetch_all(pool)
    .await?;

    rows.iter().map(map_song).collect()
}

pub async fn create(pool: &SqlitePool, song: CreateSong) -> Result<Song> {
    let result = sqlx::query(
        "INSERT INTO songs (album_id, title, genre, duration_secs, audio_path, cover_path, release_date)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(song.album_id)
    .bind(&song.title)
    .bind(song.genre.as_str())
    .bind(song.duration_secs)
    .bind(&song.audio_path)
    .bind(&song.cover_path)
    .bind(&song.release_date)
    .execute(pool)
    .await?;

    let id = result.last_insert_rowid();

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Song", id))
}

/// Apply a partial update; absent fields are left untouched
pub async fn update(pool: &SqlitePool, id: SongId, patch: UpdateSong) -> Result<Song> {
    let mut sets = Vec::new();
    if patch.title.is_some() {
        sets.push("title = ?");
    }
    if patch.genre.is_some() {
        sets.push("genre = ?");
    }
    if patch.duration_secs.is_some() {
        sets.push("duration_secs = ?");
    }
    if patch.likes.is_some() {
        sets.push("likes = ?");
    }
    if patch.release_date.is_some() {
        sets.push("release_date = ?");
    }

    if !sets.is_empty() {
        sets.push("updated_at = datetime('now')");
        let sql = format!("UPDATE songs SET {} WHERE id = ?", sets.join(", "));

        let mut query = sqlx::query(&sql);
        if let Some(title) = &patch.title {
            query = query.bind(title);
        }
        if let Some(genre) = patch.genre {
            query = query.bind(genre.as_str());
        }
        if let Some(duration_secs) = patch.duration_secs {
            query = query.bind(duration_secs);
        }
        if let Some(likes) = patch.likes {
            query = query.bind(likes);
        }
        if let Some(release_date) = &patch.release_date {
            query = query.bind(release_date);
        }
        query.bind(id).execute(pool).await?;
    }

    get_by_id(pool, id)
        .await?
        .ok_or_else(|| StorageError::not_found("Song", id))
}

pub async fn delete(pool: &SqlitePool, id: SongId) -> Result<bool> {
    let result = sqlx::query("DELETE FROM songs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
