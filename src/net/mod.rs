/// Remote gallery access module
///
/// This module handles:
/// - Uploading a local image as a multipart form (POST)
/// - Fetching the listing of uploaded image URLs (GET)
/// - Downloading image bytes for the grid thumbnails

pub mod client;

pub use client::{ApiClient, GalleryError};
