//! Chord Server Library
//!
//! Music catalog API with role-based authorization and an
//! ownership-resolution chain (song → album → artist → publisher).
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

// Re-export commonly used types for convenience
pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use services::{auth::AuthService, file_storage::FileStorage};
pub use state::AppState;
