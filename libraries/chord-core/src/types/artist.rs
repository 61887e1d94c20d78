//! Artist types

use super::UserId;
use serde::{Deserialize, Serialize};

pub type ArtistId = i64;

/// An artist
///
/// `publisher_id` is the owning publisher account. It is set at creation
/// and never changes afterwards; there is deliberately no corresponding
/// field on [`UpdateArtist`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Artist {
    pub id: ArtistId,
    pub publisher_id: UserId,
    pub name: String,
    pub bio: Option<String>,
    pub birth_date: Option<String>,
    pub country: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Data for creating a new artist
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateArtist {
    pub publisher_id: UserId,
    pub name: String,
    pub bio: Option<String>,
    pub birth_date: Option<String>,
    pub country: Option<String>,
}

/// Partial update for an artist; absent fields are left untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateArtist {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub birth_date: Option<String>,
    pub country: Option<String>,
}
