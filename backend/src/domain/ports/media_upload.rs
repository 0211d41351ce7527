//! Driving port for the upload gateway.
use std::fs::File;

use async_trait::async_trait;

use crate::domain::{BlobReference, Error, MediaKind, MediaType};

/// A fully received upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub kind: MediaKind,
    pub declared_mime: String,
    pub original_filename: Option<String>,
    pub bytes: Vec<u8>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MediaUpload: Send + Sync {
    /// Check that `declared_mime` is allowed for `kind`.
    ///
    /// Adapters call this before reading the body so a wrong type is rejected
    /// without buffering the payload.
    fn accept(&self, kind: MediaKind, declared_mime: &str) -> Result<MediaType, Error>;

    /// Validate and persist an upload, returning its stable reference.
    async fn store(&self, request: UploadRequest) -> Result<BlobReference, Error>;

    /// Open a stored blob by kind and name.
    async fn fetch(&self, kind: MediaKind, name: &str) -> Result<File, Error>;
}
