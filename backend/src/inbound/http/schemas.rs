//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. The
//! wrappers here mirror the JSON shape of their domain counterparts and exist
//! only for documentation; they derive `Serialize` so utoipa reads the same
//! serde renames the domain types use.

#![expect(
    dead_code,
    reason = "Schema wrappers are never constructed; utoipa only reads their shape"
)]

use serde::Serialize;
use utoipa::ToSchema;

/// Stable machine-readable error codes returned in error envelopes.
#[derive(Serialize, ToSchema)]
#[schema(as = ErrorCode)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// Authentication failed or is missing.
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    Forbidden,
    /// The requested resource does not exist or is not visible.
    NotFound,
    /// The write conflicts with current state.
    Conflict,
    /// Uploaded media type is not allowed for this upload.
    UnsupportedMediaType,
    /// Uploaded payload exceeds the size limit.
    PayloadTooLarge,
    /// The backing store is unreachable.
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// Failure envelope.
#[derive(Serialize, ToSchema)]
#[schema(as = ErrorEnvelope)]
#[serde(rename_all = "camelCase")]
pub struct ErrorSchema {
    /// Always `false`.
    success: bool,
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    #[schema(example = "All fields are required")]
    message: String,
    /// Correlates this response with server logs; equals the `trace-id` header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details such as the offending `field`.
    details: Option<serde_json::Value>,
}

/// Public projection of a user.
#[derive(Serialize, ToSchema)]
#[schema(as = UserSummary)]
pub struct UserSummarySchema {
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    id: String,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "ada@example.com")]
    email: String,
    #[schema(example = "educator")]
    role: String,
}

/// Registration or login result.
#[derive(Serialize, ToSchema)]
#[schema(as = AuthSession)]
pub struct AuthSessionSchema {
    /// HS256 bearer token.
    token: String,
    user: UserSummarySchema,
}

/// Course document.
#[derive(Serialize, ToSchema)]
#[schema(as = Course)]
#[serde(rename_all = "camelCase")]
pub struct CourseSchema {
    id: String,
    title: String,
    description: String,
    #[schema(example = "/uploads/thumbnails/1700000000000-42.png")]
    thumbnail: String,
    educator_id: String,
    /// Lesson ids in insertion order.
    lessons: Vec<String>,
    enrolled_students: Vec<String>,
    is_published: bool,
    #[schema(format = DateTime)]
    created_at: String,
    #[schema(format = DateTime)]
    updated_at: String,
}

/// Published course with its educator's display name.
#[derive(Serialize, ToSchema)]
#[schema(as = PublishedCourse)]
#[serde(rename_all = "camelCase")]
pub struct PublishedCourseSchema {
    #[serde(flatten)]
    course: CourseSchema,
    educator_name: Option<String>,
}

/// Lesson document.
#[derive(Serialize, ToSchema)]
#[schema(as = Lesson)]
#[serde(rename_all = "camelCase")]
pub struct LessonSchema {
    id: String,
    title: String,
    /// Parent course id.
    course: String,
    #[schema(example = "/uploads/videos/1700000000000-42.mp4")]
    video_url: String,
    order: i32,
    /// Length in seconds.
    duration: i64,
    #[schema(format = DateTime)]
    created_at: String,
    #[schema(format = DateTime)]
    updated_at: String,
}

/// Published course with its lessons in `order`.
#[derive(Serialize, ToSchema)]
#[schema(as = CourseDetail)]
pub struct CourseDetailSchema {
    course: PublishedCourseSchema,
    lessons: Vec<LessonSchema>,
}
