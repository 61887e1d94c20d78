/// Chord Server - music catalog API
use axum::{
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use chord_core::types::Role;
use chord_server::{
    api,
    config::ServerConfig,
    middleware,
    services::{AuthService, FileStorage},
    state::AppState,
};
use clap::{Parser, Subcommand};
use std::{net::SocketAddr, sync::Arc};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chord-server")]
#[command(about = "Chord music catalog server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Create a new user account
    AddUser {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Password
        #[arg(short, long)]
        password: String,
        /// Role: admin, publisher or user
        #[arg(short, long, default_value = "user")]
        role: String,
    },
    /// List all users
    ListUsers,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "chord_server=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve => {
            serve().await?;
        }
        Commands::AddUser {
            email,
            password,
            role,
        } => {
            add_user(&email, &password, &role).await?;
        }
        Commands::ListUsers => {
            list_users().await?;
        }
    }

    Ok(())
}

async fn serve() -> anyhow::Result<()> {
    // Load configuration
    let config = ServerConfig::load()?;
    config.validate()?;

    tracing::info!("Starting Chord Server");
    tracing::info!("Host: {}", config.server.host);
    tracing::info!("Port: {}", config.server.port);

    // Initialize database
    let pool = chord_storage::create_pool(&config.storage.database_url).await?;
    chord_storage::run_migrations(&pool).await?;
    tracing::info!("Database connected");

    // Initialize file storage
    let file_storage = FileStorage::new(config.storage.media_storage_path.clone());
    file_storage.initialize().await?;
    let file_storage = Arc::new(file_storage);
    tracing::info!("File storage initialized");

    // Initialize auth service
    let auth_service = Arc::new(AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_expiration_hours,
    ));
    tracing::info!("Auth service initialized");

    // Build application state
    let app_state = AppState::new(pool, auth_service, file_storage);

    // Build router
    let app = create_router(app_state);

    // Create server address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    tracing::info!("Server listening on {}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn create_router(app_state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/register", post(api::auth::register))
        .route("/login", post(api::auth::login))
        .route("/logout", post(api::auth::logout));

    // Protected routes (auth required)
    let protected_routes = Router::new()
        // Account
        .route("/user", get(api::auth::me))
        .route("/change-password", post(api::auth::change_password))
        // Artists
        .route("/artists/get", get(api::artists::get_artist))
        .route("/artists/list", get(api::artists::list_artists))
        .route("/artists/my_artists", get(api::artists::my_artists))
        .route("/artists/is_owner", get(api::artists::is_owner_artist))
        .route("/artists/create", post(api::artists::create_artist))
        .route("/artists/edit", post(api::artists::edit_artist))
        .route("/artists/delete", delete(api::artists::delete_artist))
        // Albums
        .route("/albums/get", get(api::albums::get_album))
        .route("/albums/list", get(api::albums::list_albums))
        .route("/albums/list_by_artist", get(api::albums::list_albums_by_artist))
        .route("/albums/is_owner", get(api::albums::is_owner_album))
        .route("/albums/create", post(api::albums::create_album))
        .route("/albums/edit", post(api::albums::edit_album))
        .route("/albums/delete", delete(api::albums::delete_album))
        // Songs
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

    // Combine routes
    Router::new()
        .nest("/api", public_routes.merge(protected_routes))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

async fn add_user(email: &str, password: &str, role: &str) -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    config.validate()?;

    let pool = chord_storage::create_pool(&config.storage.database_url).await?;
    chord_storage::run_migrations(&pool).await?;

    let role = role.parse::<Role>()?;

    let auth_service = AuthService::new(
        config.auth.jwt_secret.clone(),
        config.auth.token_expiration_hours,
    );

    let user = chord_storage::users::create(&pool, email, role).await?;
    let password_hash = auth_service
        .hash_password(password)
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    chord_storage::users::set_password_hash(&pool, user.id, &password_hash).await?;

    println!("Created user {} ({}) with role {}", user.id, user.email, user.role);

    Ok(())
}

async fn list_users() -> anyhow::Result<()> {
    let config = ServerConfig::load()?;
    let pool = chord_storage::create_pool(&config.storage.database_url).await?;
    chord_storage::run_migrations(&pool).await?;

    let users = chord_storage::users::get_all(&pool).await?;

    println!("Users:");
    for user in users {
        println!("  {} - {} [{}]", user.id, user.email, user.role);
    }

    Ok(())
}
