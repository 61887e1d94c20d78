/// Artists API routes
use crate::{
    api::{ensure_allowed, require_id},
    error::{Result, ServerError},
    middleware::CurrentUser,
    services::{authorization, Action, EntityKind},
    state::AppState,
};
use axum::{
    extract::{Query, State},
    Json,
};
use chord_core::types::{Artist, CreateArtist, UpdateArtist};
use chord_storage::artists;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateArtistRequest {
    pub name: String,
    pub bio: Option<String>,
    pub birth_date: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct IsOwnerResponse {
    pub is_owner: bool,
}

/// GET /api/artists/get?id=
pub async fn get_artist(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<IdQuery>,
) -> Result<Json<Artist>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Read(EntityKind::Artist)),
        "Insufficient role",
    )?;
    let id = require_id(query.id, EntityKind::Artist)?;

    let artist = artists::get_by_id(&app_state.pool, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Artist not found: {id}")))?;
    Ok(Json(artist))
}

/// GET /api/artists/list
pub async fn list_artists(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Artist>>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Read(EntityKind::Artist)),
        "Insufficient role",
    )?;

    let artists = artists::get_all(&app_state.pool).await?;
    Ok(Json(artists))
}

/// POST /api/artists/create
pub async fn create_artist(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<CreateArtistRequest>,
) -> Result<Json<Artist>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Create(EntityKind::Artist)),
        "Only publishers can create artists",
    )?;

    if req.name.trim().is_empty() {
        return Err(ServerError::validation("name", "must not be empty"));
    }

    // The creating publisher becomes the owner, permanently
    let artist = artists::create(
        &app_state.pool,
        CreateArtist {
            publisher_id: user.id(),
            name: req.name,
            bio: req.bio,
            birth_date: req.birth_date,
            country: req.country,
        },
    )
    .await?;

    tracing::info!(artist_id = artist.id, publisher_id = user.id(), "created artist");
    Ok(Json(artist))
}

/// POST /api/artists/edit?id=
pub async fn edit_artist(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<IdQuery>,
    Json(patch): Json<UpdateArtist>,
) -> Result<Json<Artist>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Edit(EntityKind::Artist)),
        "Only admins and publishers can edit artists",
    )?;
    let id = require_id(query.id, EntityKind::Artist)?;

    let artist = artists::get_by_id(&app_state.pool, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Artist not found: {id}")))?;

    ensure_allowed(
        authorization::may_mutate_owned(user.role(), user.id(), Some(artist.publisher_id)),
        "You do not own this artist",
    )?;

    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(ServerError::validation("name", "must not be empty"));
        }
    }

    let updated = artists::update(&app_state.pool, id, patch).await?;
    Ok(Json(updated))
}

/// DELETE /api/artists/delete?id=
///
/// Cascades to the artist's albums and their songs.
pub async fn delete_artist(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<IdQuery>,
) -> Result<Json<serde_json::Value>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::Delete(EntityKind::Artist)),
        "Only admins and publishers can delete artists",
    )?;
    let id = require_id(query.id, EntityKind::Artist)?;

    let artist = artists::get_by_id(&app_state.pool, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Artist not found: {id}")))?;

    ensure_allowed(
        authorization::may_mutate_owned(user.role(), user.id(), Some(artist.publisher_id)),
        "You do not own this artist",
    )?;

    artists::delete(&app_state.pool, id).await?;

    tracing::info!(artist_id = id, "deleted artist");
    Ok(Json(serde_json::json!({ "success": true })))
}

/// GET /api/artists/my_artists
pub async fn my_artists(
    State(app_state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<Vec<Artist>>> {
    ensure_allowed(
        authorization::authorize(Some(user.role()), Action::ListOwned),
        "Only admins and publishers can list owned artists",
    )?;

    // Narrower than the generic write rule: an admin owns no artists
    if user.role() != chord_core::types::Role::Publisher {
        return Err(ServerError::Forbidden(
            "Only publishers can access their artists".to_string(),
        ));
    }

    let artists = artists::get_by_publisher(&app_state.pool, user.id()).await?;
    Ok(Json(artists))
}

/// GET /api/artists/is_owner?id=
///
/// Informational, never a gate: non-publishers always get `false`.
pub async fn is_owner_artist(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Query(query): Query<IdQuery>,
) -> Result<Json<IsOwnerResponse>> {
    let id = require_id(query.id, EntityKind::Artist)?;

    let artist = artists::get_by_id(&app_state.pool, id)
        .await?
        .ok_or_else(|| ServerError::NotFound(format!("Artist not found: {id}")))?;

    let is_owner = authorization::is_owner(user.role(), user.id(), Some(artist.publisher_id));
    Ok(Json(IsOwnerResponse { is_owner }))
}
