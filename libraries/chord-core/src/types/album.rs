//! Album types

use super::ArtistId;
use serde::{Deserialize, Serialize};

pub type AlbumId = i64;

/// An album
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Album {
    pub id: AlbumId,
    pub artist_id: ArtistId,
    pub title: String,
    pub release_date: Option<String>,
    pub cover_path: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new album
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAlbum {
    pub artist_id: ArtistId,
    pub title: String,
    pub release_date: Option<String>,
    pub cover_path: Option<String>,
}

/// Partial update for an album; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAlbum {
    pub title: Option<String>,
    pub release_date: Option<String>,
}
