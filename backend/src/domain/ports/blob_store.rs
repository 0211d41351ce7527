//! Port for binary asset storage.
use std::fs::File;

use async_trait::async_trait;

use crate::domain::MediaKind;

use super::define_port_error;

define_port_error! {
    /// Errors raised by blob store adapters.
    pub enum BlobStoreError {
        /// The blob name is not a single safe path segment.
        InvalidName { name: String } => "invalid blob name: {name}" as InvalidRequest,
        /// No blob exists under the name.
        NotFound { name: String } => "File not found" as NotFound,
        /// The underlying storage failed.
        Io { message: String } => "blob storage failed: {message}" as InternalError,
    }
}

/// Append-only store keyed by kind and name.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `bytes` under `kind/name`.
    async fn put(&self, kind: MediaKind, name: &str, bytes: Vec<u8>) -> Result<(), BlobStoreError>;

    /// Open a stored blob for reading. Callers stream from the handle rather
    /// than buffering the whole blob.
    async fn open(&self, kind: MediaKind, name: &str) -> Result<File, BlobStoreError>;
}
