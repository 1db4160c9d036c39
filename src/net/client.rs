use std::path::Path;
use std::path::PathBuf;

use chrono::Utc;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;

use crate::config::Config;

/// Errors surfaced to the screen.
///
/// Only two kinds matter to the user: gallery access being refused, and a
/// network failure. Non-2xx statuses, transport errors and unreadable files
/// all fold into `Network`; the user sees a single generic alert either way.
/// The payload is a rendered string so messages stay cheap to clone.
#[derive(Debug, Clone, Error)]
pub enum GalleryError {
    #[error("access to the selected image was denied")]
    PermissionDenied,
    #[error("network request failed: {0}")]
    Network(String),
}

/// Shape of the listing endpoint's response body.
#[derive(Debug, Deserialize)]
struct ListingResponse {
    images: Vec<String>,
}

/// HTTP client for the gallery endpoint.
///
/// The same URL serves both operations: POST uploads, GET lists. The inner
/// reqwest client is reference-counted, so cloning this is cheap and each
/// async task gets its own copy.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            endpoint: config.endpoint.clone(),
        }
    }

    /// Upload one local image as a multipart form.
    ///
    /// The body has a single part named "file" carrying the raw bytes, a
    /// filename derived from the current timestamp and the file's extension,
    /// and an `image/<extension>` MIME type. Any non-2xx status counts as a
    /// failure. No timeout is configured; a hung server leaves the upload
    /// indicator showing.
    pub async fn upload(self, path: PathBuf) -> Result<(), GalleryError> {
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| GalleryError::Network(format!("could not read {}: {e}", path.display())))?;

        let filename = upload_filename(&path, Utc::now().timestamp_millis());
        let mime = mime_type(&path);

        let part = Part::bytes(bytes)
            .file_name(filename)
            .mime_str(&mime)
            .map_err(|e| GalleryError::Network(e.to_string()))?;
        let form = Form::new().part("file", part);

        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCEPT, "application/json")
            .multipart(form)
            .send()
            .await
            .map_err(|e| GalleryError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GalleryError::Network(format!(
                "server returned {}",
                response.status()
            )));
        }

        Ok(())
    }

    /// Fetch the current listing of uploaded image URLs, in server order.
    pub async fn fetch_images(self) -> Result<Vec<String>, GalleryError> {
        let response = self
            .http
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| GalleryError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GalleryError::Network(format!(
                "server returned {}",
                response.status()
            )));
        }

        let listing: ListingResponse = response
            .json()
            .await
            .map_err(|e| GalleryError::Network(e.to_string()))?;

        Ok(listing.images)
    }

    /// Download the raw bytes of one gallery image, for thumbnail decoding.
    pub async fn fetch_bytes(self, url: String) -> Result<Vec<u8>, GalleryError> {
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| GalleryError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(GalleryError::Network(format!(
                "server returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| GalleryError::Network(e.to_string()))?;

        Ok(bytes.to_vec())
    }
}

/// Derive the upload filename from a timestamp and the file's extension.
/// Files without an extension default to "jpg".
pub fn upload_filename(path: &Path, timestamp_millis: i64) -> String {
    format!("image-{timestamp_millis}.{}", file_extension(path))
}

/// Infer the MIME type from the file extension, `image/jpg` by default.
pub fn mime_type(path: &Path) -> String {
    format!("image/{}", file_extension(path))
}

fn file_extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_else(|| "jpg".to_string())
}
