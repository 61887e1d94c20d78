/// API route modules
pub mod albums;
pub mod artists;
pub mod auth;
pub mod health;
pub mod songs;
pub mod upload;

use crate::error::{Result, ServerError};
use crate::services::{Decision, EntityKind};

/// Require the id query parameter every single-entity route takes
pub(crate) fn require_id(id: Option<i64>, kind: EntityKind) -> Result<i64> {
    id.ok_or_else(|| ServerError::BadRequest(format!("{} ID is required", kind.name())))
}

/// Turn an engine decision into a handler result
pub(crate) fn ensure_allowed(decision: Decision, message: &str) -> Result<()> {
    match decision {
        Decision::Allow => Ok(()),
        Decision::Deny => Err(ServerError::Forbidden(message.to_string())),
    }
}
