//! Song types

use super::{AlbumId, Genre};
use serde::{Deserialize, Serialize};

pub type SongId = i64;

/// A song
///
/// `album_id` is optional: a song without an album has no resolvable
/// owner and is managed by admins only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    pub id: SongId,
    pub album_id: Option<AlbumId>,
    pub title: String,
    pub genre: Genre,
    pub duration_secs: Option<i64>,
    pub likes: i64,
    pub audio_path: String,
    pub cover_path: Option<String>,
    pub release_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new song
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSong {
    pub album_id: Option<AlbumId>,
    pub title: String,
    pub genre: Genre,
    pub duration_secs: Option<i64>,
    pub audio_path: String,
    pub cover_path: Option<String>,
    pub release_date: Option<String>,
}

/// Partial update for a song; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateSong {
    pub title: Option<String>,
    pub genre: Option<Genre>,
    pub duration_secs: Option<i64>,
    pub likes: Option<i64>,
    pub release_date: Option<String>,
}
