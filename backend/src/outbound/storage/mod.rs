//! Filesystem blob store scoped to the upload directory with `cap-std`.
//!
//! Every path is resolved relative to the opened upload directory handle, so
//! a crafted name cannot escape it even if validation were bypassed.

use std::fs::File;
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use tracing::warn;

use crate::domain::ports::{BlobStore, BlobStoreError};
use crate::domain::{MediaKind, TraceId, is_safe_blob_name};

const KINDS: [MediaKind; 2] = [MediaKind::Thumbnail, MediaKind::Video];

/// Blob store writing one file per blob under `<root>/<kind>/<name>`.
#[derive(Debug, Clone)]
pub struct CapStdBlobStore {
    root: Arc<Dir>,
}

impl CapStdBlobStore {
    /// Open (creating if needed) `root` and its per-kind subdirectories.
    pub fn open(root: impl AsRef<Path>) -> io::Result<Self> {
        let root = root.as_ref();
        Dir::create_ambient_dir_all(root, ambient_authority())?;
        let dir = Dir::open_ambient_dir(root, ambient_authority())?;
        for kind in KINDS {
            dir.create_dir_all(kind.directory())?;
        }
        Ok(Self {
            root: Arc::new(dir),
        })
    }
}

fn blob_path(kind: MediaKind, name: &str) -> Result<PathBuf, BlobStoreError> {
    if !is_safe_blob_name(name) {
        return Err(BlobStoreError::invalid_name(name));
    }
    Ok(Path::new(kind.directory()).join(name))
}

fn join_failure(error: tokio::task::JoinError) -> BlobStoreError {
    BlobStoreError::io(format!("blocking task failed: {error}"))
}

/// Create `path` exclusively and fill it with `write`. A failed write removes
/// the partial file so the name never resolves to truncated bytes.
fn write_exclusive<F>(root: &Dir, path: &Path, write: F) -> io::Result<()>
where
    F: FnOnce(&mut cap_std::fs::File) -> io::Result<()>,
{
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = root.open_with(path, &options)?;
    if let Err(err) = write(&mut file) {
        drop(file);
        if let Err(cleanup) = root.remove_file(path) {
            warn!(error = %cleanup, path = %path.display(), "failed to remove partial blob");
        }
        return Err(err);
    }
    Ok(())
}

fn open_regular(root: &Dir, path: &Path) -> io::Result<File> {
    let file = root.open(path)?;
    if !file.metadata()?.is_file() {
        return Err(io::Error::from(io::ErrorKind::NotFound));
    }
    Ok(file.into_std())
}

#[async_trait]
impl BlobStore for CapStdBlobStore {
    async fn put(&self, kind: MediaKind, name: &str, bytes: Vec<u8>) -> Result<(), BlobStoreError> {
        let path = blob_path(kind, name)?;
        let root = Arc::clone(&self.root);
        TraceId::spawn_blocking(move || {
            write_exclusive(&root, &path, |file| {
                file.write_all(&bytes)?;
                file.sync_all()
            })
        })
        .await
        .map_err(join_failure)?
        .map_err(|err| {
            warn!(error = %err, blob = name, "failed to write blob");
            BlobStoreError::io(err.to_string())
        })
    }

    async fn open(&self, kind: MediaKind, name: &str) -> Result<File, BlobStoreError> {
        let path = blob_path(kind, name)?;
        let root = Arc::clone(&self.root);
        TraceId::spawn_blocking(move || open_regular(&root, &path))
            .await
            .map_err(join_failure)?
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound | io::ErrorKind::IsADirectory => {
                    BlobStoreError::not_found(name)
                }
                _ => BlobStoreError::io(err.to_string()),
            })
    }
}
