/// Account and session API routes
use crate::{
    error::{Result, ServerError},
    middleware::{auth::SESSION_COOKIE, CurrentUser},
    state::AppState,
};
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    Json,
};
use chord_core::types::{Role, User};
use chord_storage::users;
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

fn validate_password(field: &str, password: &str) -> Result<()> {
    if password.len() < 8 {
        return Err(ServerError::validation(
            field,
            "must be at least 8 characters",
        ));
    }
    Ok(())
}

/// POST /api/register
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<User>> {
    let email = req.email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(ServerError::validation("email", "must be a valid address"));
    }
    validate_password("password", &req.password)?;

    let role = match req.role.as_deref() {
        None => Role::User,
        Some(raw) => raw
            .parse::<Role>()
            .map_err(|_| ServerError::validation("role", format!("unknown role: {raw}")))?,
    };

    if users::find_by_email(&app_state.pool, email).await?.is_some() {
        return Err(ServerError::validation("email", "already registered"));
    }

    let user = users::create(&app_state.pool, email, role).await?;

    let password_hash = app_state.auth_service.hash_password(&req.password)?;
    users::set_password_hash(&app_state.pool, user.id, &password_hash).await?;

    tracing::info!(user_id = user.id, role = %user.role, "registered user");
    Ok(Json(user))
}

/// POST /api/login
///
/// On success the signed session token is returned in the body and set as
/// an httponly cookie.
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let user = users::find_by_email(&app_state.pool, req.email.trim())
        .await?
        .ok_or_else(|| ServerError::Auth("Invalid email or password".to_string()))?;

    let password_hash = users::get_password_hash(&app_state.pool, user.id)
        .await?
        .ok_or_else(|| ServerError::Auth("Invalid email or password".to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&req.password, &password_hash)?
    {
        return Err(ServerError::Auth("Invalid email or password".to_string()));
    }

    let token = app_state.auth_service.create_token(user.id)?;
    let cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; Path=/; Max-Age={}; SameSite=Lax",
        app_state.auth_service.token_lifetime_secs()
    );

    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(LoginResponse { token }),
    ))
}

/// GET /api/user
pub async fn me(user: CurrentUser) -> Json<User> {
    Json(user.0)
}

/// POST /api/logout
///
/// Revocation is the client discarding its token; the server clears the
/// cookie and keeps no blacklist.
pub async fn logout() -> impl IntoResponse {
    let cookie = format!("{SESSION_COOKIE}=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax");
    (
        [(header::SET_COOKIE, cookie)],
        Json(serde_json::json!({ "message": "success" })),
    )
}

/// POST /api/change-password
pub async fn change_password(
    State(app_state): State<AppState>,
    user: CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<serde_json::Value>> {
    let current_hash = users::get_password_hash(&app_state.pool, user.id())
        .await?
        .ok_or_else(|| ServerError::Auth("No credentials on record".to_string()))?;

    if !app_state
        .auth_service
        .verify_password(&req.old_password, &current_hash)?
    {
        return Err(ServerError::Auth("Incorrect password".to_string()));
    }

    validate_password("new_password", &req.new_password)?;

    let new_hash = app_state.auth_service.hash_password(&req.new_password)?;
    users::set_password_hash(&app_state.pool, user.id(), &new_hash).await?;

    Ok(Json(serde_json::json!({ "message": "success" })))
}
