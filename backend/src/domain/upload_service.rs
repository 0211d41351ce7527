//! Upload gateway: validates media type and size, then stores the payload
//! under a generated name and returns its stable reference.

use std::fs::File;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{BlobStore, MediaUpload, UploadRequest};
use crate::domain::{
    BlobReference, Error, MAX_UPLOAD_BYTES, MediaKind, MediaType, blob_name, is_safe_blob_name,
    random_suffix,
};

/// Service implementing [`MediaUpload`] over a [`BlobStore`].
#[derive(Clone)]
pub struct UploadService<B> {
    blobs: Arc<B>,
    clock: Arc<dyn Clock>,
}

impl<B> UploadService<B> {
    /// Wire the service over a blob store; the clock stamps blob names.
    #[must_use]
    pub fn new(blobs: Arc<B>, clock: Arc<dyn Clock>) -> Self {
        Self { blobs, clock }
    }
}

/// Error returned for payloads above [`MAX_UPLOAD_BYTES`].
pub fn payload_too_large() -> Error {
    Error::payload_too_large("File size exceeds limit")
}

#[async_trait]
impl<B> MediaUpload for UploadService<B>
where
    B: BlobStore,
{
    fn accept(&self, kind: MediaKind, declared_mime: &str) -> Result<MediaType, Error> {
        match MediaType::from_mime(declared_mime) {
            Some(media) if media.kind() == kind => Ok(media),
            _ => Err(Error::unsupported_media_type("Invalid file type")),
        }
    }

    async fn store(&self, request: UploadRequest) -> Result<BlobReference, Error> {
        let UploadRequest {
            kind,
            declared_mime,
            original_filename,
            bytes,
        } = request;
        let media = self.accept(kind, &declared_mime)?;
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(payload_too_large());
        }

        let name = blob_name(
            self.clock.utc().timestamp_millis(),
            random_suffix(),
            original_filename.as_deref(),
            media,
        );
        let size = bytes.len();
        self.blobs.put(kind, &name, bytes).await?;
        let reference = BlobReference::new(kind, &name);
        info!(%reference, size, mime = media.mime(), "upload stored");
        Ok(reference)
    }

    async fn fetch(&self, kind: MediaKind, name: &str) -> Result<File, Error> {
        if !is_safe_blob_name(name) {
            return Err(Error::not_found("File not found"));
        }
        Ok(self.blobs.open(kind, name).await?)
    }
}
