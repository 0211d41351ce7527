//! Multipart upload handlers and the blob read-back route.
//!
//! ```text
//! POST /api/courses/upload-thumbnail   educator, multipart field `thumbnail`
//! POST /api/lessons/upload-video       educator, multipart field `video`
//! GET  /uploads/{kind}/{name}          public
//! ```
//!
//! The declared type is checked before any body bytes are read, and the body
//! is streamed into memory only up to [`MAX_UPLOAD_BYTES`]. Stored blobs are
//! streamed back with `Range` support so video players can seek.

use actix_files::NamedFile;
use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::http::header::{self, HeaderValue};
use actix_web::{HttpRequest, HttpResponse, get, post, web};
use futures_util::TryStreamExt as _;
use serde_json::{Map, Value, json};
use tracing::debug;

use crate::domain::ports::UploadRequest;
use crate::domain::upload_service::payload_too_large;
use crate::domain::{BlobReference, Error, MAX_UPLOAD_BYTES, MediaKind, RolePolicy, content_type_for};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::Authenticated;
use crate::inbound::http::envelope::ok;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

const IMMUTABLE: &str = "public, max-age=31536000, immutable";

fn malformed_form(err: MultipartError) -> Error {
    debug!(error = %err, "rejected multipart body");
    Error::invalid_request("Invalid multipart body")
        .with_details(json!({ "code": "invalid_multipart" }))
}

fn missing_file(kind: MediaKind) -> Error {
    Error::invalid_request(kind.missing_message()).with_details(json!({
        "field": kind.field_name(),
        "code": "missing_field",
    }))
}

async fn read_limited(field: &mut Field) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(malformed_form)? {
        if bytes.len() + chunk.len() > MAX_UPLOAD_BYTES {
            return Err(payload_too_large());
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Find the `kind` file field, validate its type, then store its bytes.
///
/// Other fields are skipped.
async fn receive(
    state: &HttpState,
    kind: MediaKind,
    mut form: Multipart,
) -> Result<BlobReference, Error> {
    while let Some(mut field) = form.try_next().await.map_err(malformed_form)? {
        if field.name() != Some(kind.field_name()) {
            continue;
        }
        let declared_mime = field
            .content_type()
            .map(|mime| mime.essence_str().to_owned())
            .unwrap_or_default();
        state.uploads.accept(kind, &declared_mime)?;
        let original_filename = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_owned);
        let bytes = read_limited(&mut field).await?;
        return state
            .uploads
            .store(UploadRequest {
                kind,
                declared_mime,
                original_filename,
                bytes,
            })
            .await;
    }
    Err(missing_file(kind))
}

fn uploaded(kind: MediaKind, reference: BlobReference) -> HttpResponse {
    let mut data = Map::new();
    data.insert(
        kind.response_key().to_owned(),
        Value::String(reference.to_string()),
    );
    ok(data)
}

async fn upload(
    state: web::Data<HttpState>,
    caller: Authenticated,
    form: Multipart,
    kind: MediaKind,
) -> ApiResult<HttpResponse> {
    caller.require(RolePolicy::EDUCATOR)?;
    let reference = receive(&state, kind, form).await?;
    Ok(uploaded(kind, reference))
}

/// Upload a course thumbnail image.
#[utoipa::path(
    post,
    path = "/api/courses/upload-thumbnail",
    request_body(content_type = "multipart/form-data", description = "Field `thumbnail`: jpeg, png or webp"),
    responses(
        (status = 200, description = "Reference under `data.thumbnail`"),
        (status = 400, description = "Missing file or invalid file type", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not an educator", body = ErrorSchema),
        (status = 413, description = "File size exceeds limit", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["uploads"],
    operation_id = "uploadThumbnail"
)]
#[post("/courses/upload-thumbnail")]
pub async fn upload_thumbnail(
    state: web::Data<HttpState>,
    caller: Authenticated,
    form: Multipart,
) -> ApiResult<HttpResponse> {
    upload(state, caller, form, MediaKind::Thumbnail).await
}

/// Upload a lesson video.
#[utoipa::path(
    post,
    path = "/api/lessons/upload-video",
    request_body(content_type = "multipart/form-data", description = "Field `video`: mp4, webm or mkv"),
    responses(
        (status = 200, description = "Reference under `data.videoUrl`"),
        (status = 400, description = "Missing file or invalid file type", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not an educator", body = ErrorSchema),
        (status = 413, description = "File size exceeds limit", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["uploads"],
    operation_id = "uploadVideo"
)]
#[post("/lessons/upload-video")]
pub async fn upload_video(
    state: web::Data<HttpState>,
    caller: Authenticated,
    form: Multipart,
) -> ApiResult<HttpResponse> {
    upload(state, caller, form, MediaKind::Video).await
}

/// Serve a stored blob by the reference returned at upload time.
#[utoipa::path(
    get,
    path = "/uploads/{kind}/{name}",
    params(
        ("kind" = String, Path, description = "`thumbnails` or `videos`"),
        ("name" = String, Path, description = "Stored blob name")
    ),
    responses(
        (status = 200, description = "Blob bytes"),
        (status = 206, description = "Requested byte range"),
        (status = 404, description = "File not found", body = ErrorSchema)
    ),
    tags = ["uploads"],
    operation_id = "serveUpload",
    security([])
)]
#[get("/uploads/{kind}/{name}")]
pub async fn serve_upload(
    req: HttpRequest,
    state: web::Data<HttpState>,
    path: web::Path<(String, String)>,
) -> ApiResult<HttpResponse> {
    let (segment, name) = path.into_inner();
    let kind: MediaKind = segment
        .parse()
        .map_err(|()| Error::not_found("File not found"))?;
    let file = state.uploads.fetch(kind, &name).await?;
    let named = NamedFile::from_file(file, &name).map_err(|err| {
        debug!(error = %err, blob = %name, "failed to stat blob");
        Error::internal("Failed to read file")
    })?;

    let mut response = named.into_response(&req);
    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type_for(&name)),
    );
    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static(IMMUTABLE));
    Ok(response)
}
