/// File storage service - manages audio and cover assets on disk
///
/// Blob writes happen before the owning record is inserted; a blob
/// orphaned by a failed insert is left for out-of-band cleanup rather
/// than retried or rolled back here.
use crate::error::Result;
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

const AUDIO_DIR: &str = "audio";
const ALBUM_COVER_DIR: &str = "covers/albums";
const SONG_COVER_DIR: &str = "covers/songs";

#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    /// Initialize storage directories
    pub async fn initialize(&self) -> Result<()> {
        for dir in &[AUDIO_DIR, ALBUM_COVER_DIR, SONG_COVER_DIR] {
            fs::create_dir_all(self.base_path.join(dir)).await?;
        }
        Ok(())
    }

    /// Store an uploaded audio file, returning its relative path
    pub async fn store_audio(&self, extension: &str, data: &[u8]) -> Result<String> {
        self.store(AUDIO_DIR, extension, data).await
    }

    /// Store a song cover image, returning its relative path
    pub async fn store_song_cover(&self, extension: &str, data: &[u8]) -> Result<String> {
        self.store(SONG_COVER_DIR, extension, data).await
    }

    /// Store an album cover image, returning its relative path
    pub async fn store_album_cover(&self, extension: &str, data: &[u8]) -> Result<String> {
        self.store(ALBUM_COVER_DIR, extension, data).await
    }

    /// Delete a stored asset by its relative path
    pub async fn delete(&self, relative_path: &str) -> Result<()> {
        fs::remove_file(self.absolute(relative_path)).await?;
        Ok(())
    }

    /// Absolute filesystem path of a stored asset
    pub fn absolute(&self, relative_path: &str) -> PathBuf {
        self.base_path.join(relative_path)
    }

    async fn store(&self, dir: &str, extension: &str, data: &[u8]) -> Result<String> {
        let filename = format!("{}.{}", Uuid::new_v4(), extension);
        let relative = format!("{dir}/{filename}");
        let path = self.base_path.join(dir).join(&filename);

        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&path, data).await?;
        Ok(relative)
    }
}
