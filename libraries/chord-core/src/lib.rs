//! Chord Core
//!
//! Domain types and error handling for the Chord music catalog.
//!
//! This crate defines:
//! - **Domain Types**: `User`, `Artist`, `Album`, `Song` and their
//!   create/patch companions
//! - **Access Control Vocabulary**: `Role` and the fixed `Genre` set
//! - **Error Handling**: Unified `ChordError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use chord_core::types::{CreateArtist, Role};
//!
//! let role: Role = "publisher".parse().unwrap();
//! assert_eq!(role, Role::Publisher);
//!
//! let artist = CreateArtist {
//!     publisher_id: 1,
//!     name: "Nina Simone".to_string(),
//!     bio: None,
//!     birth_date: None,
//!     country: Some("US".to_string()),
//! };
//! assert_eq!(artist.name, "Nina Simone");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod types;

// Re-export commonly used types
pub use error::{ChordError, Result};

pub use types::{
    Album, AlbumId, Artist, ArtistId, CreateAlbum, CreateArtist, CreateSong, Genre, Role, Song,
    SongId, UpdateAlbum, UpdateArtist, UpdateSong, User, UserId,
};
