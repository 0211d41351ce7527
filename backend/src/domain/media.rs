//! Media upload vocabulary: the two upload kinds, the allowed media types,
//! and the naming scheme for stored blobs.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Maximum accepted upload size in bytes (100 MiB).
pub const MAX_UPLOAD_BYTES: usize = 100 * 1024 * 1024;

/// Upper bound (exclusive) of the random component of a blob name.
const RANDOM_SUFFIX_BOUND: u32 = 1_000_000_000;

/// Longest extension accepted from a client-provided filename.
const MAX_EXTENSION_LEN: usize = 8;

/// What an upload is for. Each kind has its own namespace in the blob store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Thumbnail,
    Video,
}

impl MediaKind {
    /// Directory segment under the upload root.
    #[must_use]
    pub const fn directory(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnails",
            Self::Video => "videos",
        }
    }

    /// Multipart field name carrying the file.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::Video => "video",
        }
    }

    /// Key under which the reference is returned to clients.
    #[must_use]
    pub const fn response_key(self) -> &'static str {
        match self {
            Self::Thumbnail => "thumbnail",
            Self::Video => "videoUrl",
        }
    }

    /// Message returned when the multipart field is absent.
    #[must_use]
    pub const fn missing_message(self) -> &'static str {
        match self {
            Self::Thumbnail => "Thumbnail file is required",
            Self::Video => "Video file is required",
        }
    }
}

impl FromStr for MediaKind {
    type Err = ();

    /// Parses the directory segment used in stored references.
    fn from_str(segment: &str) -> Result<Self, Self::Err> {
        match segment {
            "thumbnails" => Ok(Self::Thumbnail),
            "videos" => Ok(Self::Video),
            _ => Err(()),
        }
    }
}

/// Allowed media types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaType {
    Jpeg,
    Png,
    Webp,
    Mp4,
    Webm,
    Matroska,
}

impl MediaType {
    /// Recognise a declared MIME type, ignoring parameters and case.
    #[must_use]
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim().to_ascii_lowercase();
        match essence.as_str() {
            "image/jpeg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            "image/webp" => Some(Self::Webp),
            "video/mp4" => Some(Self::Mp4),
            "video/webm" => Some(Self::Webm),
            "video/mkv" | "video/x-matroska" => Some(Self::Matroska),
            _ => None,
        }
    }

    /// Upload kind this media type belongs to.
    #[must_use]
    pub const fn kind(self) -> MediaKind {
        match self {
            Self::Jpeg | Self::Png | Self::Webp => MediaKind::Thumbnail,
            Self::Mp4 | Self::Webm | Self::Matroska => MediaKind::Video,
        }
    }

    /// Canonical extension, including the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => ".jpg",
            Self::Png => ".png",
            Self::Webp => ".webp",
            Self::Mp4 => ".mp4",
            Self::Webm => ".webm",
            Self::Matroska => ".mkv",
        }
    }

    #[must_use]
    pub const fn mime(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Webp => "image/webp",
            Self::Mp4 => "video/mp4",
            Self::Webm => "video/webm",
            Self::Matroska => "video/x-matroska",
        }
    }
}

/// Guess a content type from a stored blob name.
#[must_use]
pub fn content_type_for(name: &str) -> &'static str {
    let extension = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        _ => "application/octet-stream",
    }
}

/// Whether `name` is a single safe path segment produced by [`blob_name`].
#[must_use]
pub fn is_safe_blob_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '.' || c == '_')
}

/// Build a stored blob name `<unix-millis>-<random><ext>`.
///
/// The extension comes from `original_filename` when it is short and ASCII
/// alphanumeric, otherwise from `media_type`.
///
/// # Examples
/// ```
/// use skillforge::domain::{MediaType, blob_name};
///
/// let name = blob_name(1_700_000_000_000, 42, Some("cover.PNG"), MediaType::Png);
/// assert_eq!(name, "1700000000000-42.PNG");
/// ```
#[must_use]
pub fn blob_name(
    unix_millis: i64,
    random: u32,
    original_filename: Option<&str>,
    media_type: MediaType,
) -> String {
    let extension = original_filename
        .and_then(safe_extension)
        .unwrap_or_else(|| media_type.extension().to_owned());
    format!("{unix_millis}-{}{extension}", random % RANDOM_SUFFIX_BOUND)
}

/// Draw the random component of a blob name.
#[must_use]
pub fn random_suffix() -> u32 {
    rand::Rng::gen_range(&mut rand::thread_rng(), 0..RANDOM_SUFFIX_BOUND)
}

fn safe_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let valid = !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric());
    valid.then(|| format!(".{ext}"))
}

/// Stable reference to a stored blob, e.g. `/uploads/videos/<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BlobReference(String);

impl BlobReference {
    #[must_use]
    pub fn new(kind: MediaKind, name: &str) -> Self {
        Self(format!("/uploads/{}/{name}", kind.directory()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BlobReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
