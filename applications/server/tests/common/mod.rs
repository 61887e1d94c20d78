/// Common test utilities and fixtures
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use chord_core::types::{Role, User};
use chord_server::{
    api, middleware,
    services::{AuthService, FileStorage},
    state::AppState,
};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

/// Test user credentials
pub mod fixtures {
    pub const PASSWORD: &str = "TestPassword123!";
    pub const JWT_SECRET: &str = "test-secret-key";
}

/// Build the full application router against an in-memory database
pub async fn create_test_app() -> (Router, AppState, TempDir) {
    let pool = chord_storage::create_pool("sqlite::memory:").await.unwrap();
    chord_storage::run_migrations(&pool).await.unwrap();

    let temp_dir = TempDir::new().unwrap();
    let file_storage = FileStorage::new(temp_dir.path().to_path_buf());
    file_storage.initialize().await.unwrap();

    let auth_service = Arc::new(AuthService::new(fixtures::JWT_SECRET.to_string(), 1));

    let app_state = AppState::new(pool, auth_service, Arc::new(file_storage));

    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login))
        .route("/logout", post(api::auth::logout));

    let protected_routes = Router::new()
        .route("/user", get(api::auth::me))
        .route("/change-password", post(api::auth::change_password))
        .route("/artists/get", get(api::artists::get_artist))
        .route("/artists/list", get(api::artists::list_artists))
        .route("/artists/my_artists", get(api::artists::my_artists))
        .route("/artists/is_owner", get(api::artists::is_owner_artist))
        .route("/artists/create", post(api::artists::create_artist))
        .route("/artists/edit", post(api::artists::edit_artist))
        .route("/artists/delete", delete(api::artists::delete_artist))
        .route("/albums/get", get(api::albums::get_album))
        .route("/albums/list", get(api::albums::list_albums))
        .route("/albums/list_by_artist", get(api::albums::list_albums_by_artist))
        .route("/albums/is_owner", get(api::albums::is_owner_album))
        .route("/albums/create", post(api::albums::create_album))
        .route("/albums/edit", post(api::albums::edit_album))
        .route("/albums/delete", delete(api::albums::delete_album))
        .route("/songs/get", get(api::songs::get_song))
        .route("/songs/list", get(api::songs::list_songs))
        .route("/songs/list_by_album", get(api::songs::list_songs_by_album))
        .route("/songs/is_owner", get(api::songs::is_owner_song))
        .route("/songs/create", post(api::songs::create_song))
        .route("/songs/edit", post(api::songs::edit_song))
        .route("/songs/delete", delete(api::songs::delete_song))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::auth_middleware,
        ));

    let app = Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .with_state(app_state.clone());

    (app, app_state, temp_dir)
}

/// Create a user with credentials directly through storage
pub async fn seed_user(state: &AppState, email: &str, role: Role) -> User {
    let user = chord_storage::users::create(&state.pool, email, role)
        .await
        .unwrap();
    let hash = state.auth_service.hash_password(fixtures::PASSWORD).unwrap();
    chord_storage::users::set_password_hash(&state.pool, user.id, &hash)
        .await
        .unwrap();
    user
}

/// Seed a user and hand back a valid session token for them
pub async fn seed_user_with_token(state: &AppState, email: &str, role: Role) -> (User, String) {
    let user = seed_user(state, email, role).await;
    let token = state.auth_service.create_token(user.id).unwrap();
    (user, token)
}

/// GET with a session cookie
pub fn get_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::COOKIE, format!("session={token}"))
        .body(Body::empty())
        .unwrap()
}

/// POST a JSON body with a session cookie
pub fn post_json(uri: &str, token: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, format!("session={token}"))
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// POST a JSON body without credentials
pub fn post_json_public(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("POST")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// DELETE with a session cookie
pub fn delete_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method("DELETE")
        .header(header::COOKIE, format!("session={token}"))
        .body(Body::empty())
        .unwrap()
}

const MULTIPART_BOUNDARY: &str = "chord-test-boundary";

/// Build a multipart/form-data POST with a metadata part and file parts
pub fn post_multipart(
    uri: &str,
    token: &str,
    metadata: &serde_json::Value,
    files: &[(&str, &str, &[u8])], // (field name, filename, bytes)
) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();

    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"metadata\"\r\n\r\n",
    );
    body.extend_from_slice(metadata.to_string().as_bytes());
    body.extend_from_slice(b"\r\n");

    for (name, filename, data) in files {
        body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}\r\n").as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/octet-stream\r\n\r\n");
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{MULTIPART_BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .uri(uri)
        .method("POST")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={MULTIPART_BOUNDARY}"),
        )
        .header(header::COOKIE, format!("session={token}"))
        .body(Body::from(body))
        .unwrap()
}

/// Run a request against the app and return (status, parsed JSON body)
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null)
    };
    (status, json)
}
