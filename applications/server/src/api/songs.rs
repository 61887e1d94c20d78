/// Songs API routes
use crate::{
    api::{ensure_allowed, require_id, upload},
    error::{Result, ServerError},
    middleware::CurrentUser,
    services::{authorization, ownership, Action, EntityKind},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use bytes::Bytes;
use chord_core::types::{CreateSong, Genre, Song, UpdateSong};
use chord_storage::{albums, songs};
use serde::Deserialize;

use super::artists::{IdQuery, IsOwnerResponse};

#[derive(Debug, Deserialize)]
pub struct AlbumIdQuery {
    pub album_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateSongRequest {
    pub album_id: Option<i64>,
    pub title: String,
    pub genre: Option<String>,
    pub duration_secs: Option<i64>,
    pub release_date: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditSongRequest {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub duration_secs: Option<i64>,
    pub likes: Option<i64>,
    pub release_date: Option<String>,
}

fn parse_genre(raw: &str) -> Result<Genre> {
    raw.parse::<Genre>()
        .map_err(|_| ServerError::validation("genre", format!("unknown genre: {raw}")))
}

/// GET /api/songs/get?id=
pub async fn get_song(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<IdQuery>,
) -> Result<Json<Song>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Read(EntityKind::Song)),
        "Insufficient role",
    )?;
    let id = require_id(query.id, EntityKind::Song)?;

    let song = songs::get_by_id(&app_state.pool, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Song not found: {id}")))?;
    Ok(Json(song))
}

/// GET /api/songs/list
pub async fn list_songs(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Song>>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Read(EntityKind::Song)),
        "Insufficient role",
    )?;

    let songs = songs::get_all(&app_state.pool).await?;
    Ok(Json(songs))
}

/// GET /api/songs/list_by_album?album_id=
pub async fn list_songs_by_album(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<AlbumIdQuery>,
) -> Result<Json<Vec<Song>>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Read(EntityKind::Song)),
        "Insufficient role",
    )?;
    let album_id = require_id(query.album_id, EntityKind::Album)?;

    let songs = songs::get_by_album(&app_state.pool, album_id).await?;
    Ok(Json(songs))
}

/// POST /api/songs/create
///
/// multipart/form-data with a `metadata` JSON part, a required `audio`
/// file part, and an optional `cover` image part.
pub async fn create_song(
    State(app_state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Song>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Create(EntityKind::Song)),
        "Only admins and publishers can create songs",
    )?;

    let mut parsed = upload::parse(&headers, body).await?;
    let req: CreateSongRequest = parsed.metadata_as()?;

    let album_id = require_id(req.album_id, EntityKind::Album)?;
    if req.title.trim().is_empty() {
        return Err(ServerError::validation("title", "must not be empty"));
    }
    let genre = match req.genre.as_deref() {
        Some(raw) => parse_genre(raw)?,
        None => Genre::default(),
    };

    let album = albums::get_by_id(&app_state.pool, album_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Album not found: {album_id}")))?;

    // A publisher can only add songs to albums they own
    let owner = ownership::album_owner(&app_state.pool, &album).await?;
    ensure_allowed(
        authorization::may_mutate_owned(user.role(), user.id(), Some(owner)),
        "You do not own this album",
    )?;

    let audio = parsed
        .files
        .remove("audio")
        .ok_or_else(|| ServerError::BadRequest("Missing audio file".to_string()))?;

    // Blob writes land before the insert; a failed insert may orphan them
    let audio_path = app_state
        .file_storage
        .store_audio(&audio.extension, &audio.data)
        .await?;

    let cover_path = match parsed.files.remove("cover") {
        Some(file) => Some(
            app_state
                .file_storage
                .store_song_cover(&file.extension, &file.data)
                .await?,
        ),
        None => None,
    };

    let song = songs::create(
        &app_state.pool,
        CreateSong {
            album_id: Some(album_id),
            title: req.title,
            genre,
            duration_secs: req.duration_secs,
            audio_path,
            cover_path,
            release_date: req.release_date,
        },
    )
    .await?;

    tracing::info!(song_id = song.id, album_id, "created song");
    Ok(Json(song))
}

/// POST /api/songs/edit?id=
pub async fn edit_song(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<IdQuery>,
    Json(req): Json<EditSongRequest>,
) -> Result<Json<Song>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Edit(EntityKind::Song)),
        "Only admins and publishers can edit songs",
    )?;
    let id = require_id(query.id, EntityKind::Song)?;

    let song = songs::get_by_id(&app_state.pool, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Song not found: {id}")))?;

    let owner = ownership::song_owner(&app_state.pool, &song).await?;
    ensure_allowed(
        authorization::may_mutate_owned(user.role(), user.id(), owner),
        "You do not own this song",
    )?;

    if let Some(title) = &req.title {
        if title.trim().is_empty() {
            return Err(ServerError::validation("title", "must not be empty"));
        }
    }
    if let Some(likes) = req.likes {
        if likes < 0 {
            return Err(ServerError::validation("likes", "must be non-negative"));
        }
    }
    let genre = match req.genre.as_deref() {
        Some(raw) => Some(parse_genre(raw)?),
        None => None,
    };

    let updated = songs::update(
        &app_state.pool,
        id,
        UpdateSong {
            title: req.title,
            genre,
            duration_secs: req.duration_secs,
            likes: req.likes,
            release_date: req.release_date,
        },
    )
    .await?;
    Ok(Json(updated))
}

/// DELETE /api/songs/delete?id=
pub async fn delete_song(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<IdQuery>,
) -> Result<Json<serde_json::Value>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Delete(EntityKind::Song)),
        "Only admins and publishers can delete songs",
    )?;
    let id = require_id(query.id, EntityKind::Song)?;

    let song = songs::get_by_id(&app_state.pool, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Song not found: {id}")))?;

    let owner = ownership::song_owner(&app_state.pool, &song).await?;
    ensure_allowed(
        authorization::may_mutate_owned(user.role(), user.id(), owner),
        "You do not own this song",
    )?;

    songs::delete(&app_state.pool, id).await?;

    // Best-effort blob cleanup; the record is already gone
    if let Err(e) = app_state.file_storage.delete(&song.audio_path).await {
        tracing::warn!("Failed to remove audio {}: {e}", song.audio_path);
    }
    if let Some(cover_path) = &song.cover_path {
        if let Err(e) = app_state.file_storage.delete(cover_path).await {
            tracing::warn!("Failed to remove song cover {cover_path}: {e}");
        }
    }

    tracing::info!(song_id = id, "deleted song");
    Ok(Json(serde_json::json!({ "success": true })))
}

/// GET /api/songs/is_owner?id=
///
/// Informational, never a gate: non-publishers always get `false`, and a
/// song without an album is owned by nobody.
pub async fn is_owner_song(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<IdQuery>,
) -> Result<Json<IsOwnerResponse>> {
    let id = require_id(query.id, EntityKind::Song)?;

    let song = songs::get_by_id(&app_state.pool, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Song not found: {id}")))?;

    let owner = ownership::song_owner(&app_state.pool, &song).await?;
    let is_owner = authorization::is_owner(user.role(), user.id(), owner);
    Ok(Json(IsOwnerResponse { is_owner }))
}
