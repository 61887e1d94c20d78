/// Server services
pub mod auth;
pub mod authorization;
pub mod file_storage;
pub mod ownership;

pub use auth::AuthService;
pub use authorization::{authorize, is_owner, may_mutate_owned, Action, Decision, EntityKind};
pub use file_storage::FileStorage;
