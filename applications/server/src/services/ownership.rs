//! Ownership resolution
//!
//! Walks the fixed-depth parent chain song → album → artist → publisher to
//! answer "which user owns this entity". The schema bounds the walk at
//! three hops, so there is no cycle handling.

use crate::error::{Result, ServerError};
use chord_core::types::{Album, Song, UserId};
use chord_storage::{albums, artists};
use sqlx::SqlitePool;

use super::EntityKind;

/// Reference to a catalog entity by kind and id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i64,
}

/// Resolve the owning user of any catalog entity
///
/// Returns `Ok(None)` for a song with no parent album ("unowned" is a
/// valid answer, not an error). A dangling reference to a missing
/// intermediate entity fails with `NotFound` naming that entity.
pub async fn resolve_owner(pool: &SqlitePool, entity: EntityRef) -> Result<Option<UserId>> {
    match entity.kind {
        EntityKind::Artist => {
            let artist = artists::get_by_id(pool, entity.id)
                .await?
                .ok_or_else(|| ServerError::NotFound(format!("Artist not found: {}", entity.id)))?;
            Ok(Some(artist.publisher_id))
        }
        EntityKind::Album => {
            let album = albums::get_by_id(pool, entity.id)
                .await?
                .ok_or_else(|| ServerError::NotFound(format!("Album not found: {}", entity.id)))?;
            Ok(Some(album_owner(pool, &album).await?))
        }
        EntityKind::Song => {
            let song = chord_storage::songs::get_by_id(pool, entity.id)
                .await?
                .ok_or_else(|| ServerError::NotFound(format!("Song not found: {}", entity.id)))?;
            song_owner(pool, &song).await
        }
    }
}

/// Owner of an already-fetched album: its artist's publisher
pub async fn album_owner(pool: &SqlitePool, album: &Album) -> Result<UserId> {
    let artist = artists::get_by_id(pool, album.artist_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Artist not found: {}", album.artist_id)))?;
    Ok(artist.publisher_id)
}

/// Owner of an already-fetched song, `None` when it has no parent album
pub async fn song_owner(pool: &SqlitePool, song: &Song) -> Result<Option<UserId>> {
    let Some(album_id) = song.album_id else {
        return Ok(None);
    };
    let album = albums::get_by_id(pool, album_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Album not found: {album_id}")))?;
    Ok(Some(album_owner(pool, &album).await?))
}
