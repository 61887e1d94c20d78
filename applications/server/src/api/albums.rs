/// Albums API routes
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
use chord_core::types::{Album, CreateAlbum, UpdateAlbum};
use chord_storage::{albums, artists};
use serde::Deserialize;

use super::artists::{IdQuery, IsOwnerResponse};

#[derive(Debug, Deserialize)]
pub struct ArtistIdQuery {
    pub artist_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAlbumRequest {
    pub artist_id: Option<i64>,
    pub title: String,
    pub release_date: Option<String>,
}

/// GET /api/albums/get?id=
pub async fn get_album(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<IdQuery>,
) -> Result<Json<Album>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Read(EntityKind::Album)),
        "Insufficient role",
    )?;
    let id = require_id(query.id, EntityKind::Album)?;

    let album = albums::get_by_id(&app_state.pool, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Album not found: {id}")))?;
    Ok(Json(album))
}

/// GET /api/albums/list
pub async fn list_albums(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Album>>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Read(EntityKind::Album)),
        "Insufficient role",
    )?;

    let albums = albums::get_all(&app_state.pool).await?;
    Ok(Json(albums))
}

/// GET /api/albums/list_by_artist?artist_id=
pub async fn list_albums_by_artist(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<ArtistIdQuery>,
) -> Result<Json<Vec<Album>>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Read(EntityKind::Album)),
        "Insufficient role",
    )?;
    let artist_id = require_id(query.artist_id, EntityKind::Artist)?;

    let albums = albums::get_by_artist(&app_state.pool, artist_id).await?;
    Ok(Json(albums))
}

/// POST /api/albums/create
///
/// Accepts a JSON body, or multipart/form-data with a `metadata` JSON part
/// and an optional `cover` image part.
pub async fn create_album(
    State(app_state): State<AppState>,
    user: CurrentUser,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Album>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Create(EntityKind::Album)),
        "Only admins and publishers can create albums",
    )?;

    let (req, cover) = if upload::is_multipart(&headers) {
        let mut parsed = upload::parse(&headers, body).await?;
        let req: CreateAlbumRequest = parsed.metadata_as()?;
        (req, parsed.files.remove("cover"))
    } else {
        let req: CreateAlbumRequest = serde_json::from_slice(&body)
            .map_err(|e| ServerError::BadRequest(format!("Invalid body: {e}")))?;
        (req, None)
    };

    let artist_id = require_id(req.artist_id, EntityKind::Artist)?;
    if req.title.trim().is_empty() {
        return Err(ServerError::validation("title", "must not be empty"));
    }

    let artist = artists::get_by_id(&app_state.pool, artist_id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Artist not found: {artist_id}")))?;

    // A publisher can only add albums to their own artists
    ensure_allowed(
        authorization::may_mutate_owned(user.role(), user.id(), Some(artist.publisher_id)),
        "You do not own this artist",
    )?;

    let cover_path = match cover {
        Some(file) => Some(
            app_state
                .file_storage
                .store_album_cover(&file.extension, &file.data)
                .await?,
        ),
        None => None,
    };

    let album = albums::create(
        &app_state.pool,
        CreateAlbum {
            artist_id,
            title: req.title,
            release_date: req.release_date,
            cover_path,
        },
    )
    .await?;

    tracing::info!(album_id = album.id, artist_id, "created album");
    Ok(Json(album))
}

/// POST /api/albums/edit?id=
pub async fn edit_album(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<IdQuery>,
    Json(patch): Json<UpdateAlbum>,
) -> Result<Json<Album>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Edit(EntityKind::Album)),
        "Only admins and publishers can edit albums",
    )?;
    let id = require_id(query.id, EntityKind::Album)?;

    let album = albums::get_by_id(&app_state.pool, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Album not found: {id}")))?;

    let owner = ownership::album_owner(&app_state.pool, &album).await?;
    ensure_allowed(
        authorization::may_mutate_owned(user.role(), user.id(), Some(owner)),
        "You do not own this album",
    )?;

    if let Some(title) = &patch.title {
        if title.trim().is_empty() {
            return Err(ServerError::validation("title", "must not be empty"));
        }
    }

    let updated = albums::update(&app_state.pool, id, patch).await?;
    Ok(Json(updated))
}

/// DELETE /api/albums/delete?id=
///
/// Cascades to the album's songs.
pub async fn delete_album(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<IdQuery>,
) -> Result<Json<serde_json::Value>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Delete(EntityKind::Album)),
        "Only admins and publishers can delete albums",
    )?;
    let id = require_id(query.id, EntityKind::Album)?;

    let album = albums::get_by_id(&app_state.pool, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Album not found: {id}")))?;

    let owner = ownership::album_owner(&app_state.pool, &album).await?;
    ensure_allowed(
        authorization::may_mutate_owned(user.role(), user.id(), Some(owner)),
        "You do not own this album",
    )?;

    albums::delete(&app_state.pool, id).await?;

    // Blobs of cascade-deleted songs are reclaimed out-of-band; only the
    // album's own cover is cleaned up here.
    if let Some(cover_path) = &album.cover_path {
        if let Err(e) = app_state.file_storage.delete(cover_path).await {
            tracing::warn!("Failed to remove album cover {cover_path}: {e}");
        }
    }

    tracing::info!(album_id = id, "deleted album");
    Ok(Json(serde_json::json!({ "success": true })))
}

/// GET /api/albums/is_owner?id=
///
/// Informational, never a gate: non-publishers always get `false`.
pub async fn is_owner_album(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<IdQuery>,
) -> Result<Json<IsOwnerResponse>> {
    let id = require_id(query.id, EntityKind::Album)?;

    let album = albums::get_by_id(&app_state.pool, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Album not found: {id}")))?;

    let owner = ownership::album_owner(&app_state.pool, &album).await?;
    let is_owner = authorization::is_owner(user.role(), user.id(), Some(owner));
    Ok(Json(IsOwnerResponse { is_owner }))
}
