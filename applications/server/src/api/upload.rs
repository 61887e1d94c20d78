/// Multipart upload parsing shared by the catalog routes
use crate::error::{Result, ServerError};
use axum::http::{header, HeaderMap};
use bytes::Bytes;
use std::collections::HashMap;

/// A file part of a multipart request
#[derive(Debug)]
pub struct UploadedFile {
    pub extension: String,
    pub data: Vec<u8>,
}

/// Parsed multipart form: file parts by field name, plus the JSON
/// `metadata` text part
#[derive(Debug, Default)]
pub struct Upload {
    pub files: HashMap<String, UploadedFile>,
    pub metadata: Option<String>,
}

impl Upload {
    /// Deserialize the `metadata` part into a request type
    pub fn metadata_as<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        let raw = self
            .metadata
            .as_deref()
            .ok_or_else(|| ServerError::BadRequest("Missing metadata".to_string()))?;
        serde_json::from_str(raw)
            .map_err(|e| ServerError::BadRequest(format!("Invalid metadata: {e}")))
    }
}

/// Whether a request body is multipart/form-data
pub fn is_multipart(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"))
}

/// Parse a multipart body into files and metadata
pub async fn parse(headers: &HeaderMap, body: Bytes) -> Result<Upload> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("Missing Content-Type".to_string()))?;

    if !content_type.starts_with("multipart/form-data") {
        return Err(ServerError::BadRequest(
            "Expected multipart/form-data".to_string(),
        ));
    }

    let boundary = content_type
        .split("boundary=")
        .nth(1)
        .ok_or_else(|| ServerError::BadRequest("Missing boundary".to_string()))?;

    // Convert Bytes to a stream for multer
    let stream = futures_util::stream::once(async move { Ok::<_, std::io::Error>(body) });
    let mut multipart = multer::Multipart::new(stream, boundary);

    let mut upload = Upload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServerError::BadRequest(format!("Failed to parse multipart: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();

        if let Some(filename) = field.file_name() {
            let extension = std::path::Path::new(filename)
                .extension()
                .and_then(|e| e.to_str())
                .unwrap_or("bin")
                .to_string();

            let data = field
                .bytes()
                .await
                .map_err(|e| ServerError::BadRequest(format!("Failed to read file: {e}")))?
                .to_vec();

            upload.files.insert(name, UploadedFile { extension, data });
        } else if name == "metadata" {
            upload.metadata = Some(field.text().await.map_err(|e| {
                ServerError::BadRequest(format!("Failed to read metadata: {e}"))
            })?);
        }
    }

    Ok(upload)
}
