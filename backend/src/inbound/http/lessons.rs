//! Lesson HTTP handlers.
//!
//! ```text
//! POST /api/lessons/{courseId}   educator + owner
//! GET  /api/lessons/{courseId}   any authenticated caller
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{LessonDraft, LessonValidationError, RolePolicy};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{Authenticated, require_course_owner};
use crate::inbound::http::envelope::{created, ok};
use crate::inbound::http::error::json_body;
use crate::inbound::http::schemas::{ErrorSchema, LessonSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, lesson_validation_error, parse_course_id};

const COURSE_ID: FieldName = FieldName::new("courseId");

/// Request payload for `POST /api/lessons/{courseId}`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LessonRequest {
    pub title: Option<String>,
    /// Reference returned by `POST /api/lessons/upload-video`.
    pub video_url: Option<String>,
    pub order: Option<i32>,
    /// Length in seconds; defaults to zero.
    pub duration: Option<i64>,
}

impl TryFrom<&LessonRequest> for LessonDraft {
    type Error = LessonValidationError;

    fn try_from(value: &LessonRequest) -> Result<Self, Self::Error> {
        Self::try_new(
            value.title.as_deref(),
            value.video_url.as_deref(),
            value.order,
            value.duration,
        )
    }
}

/// Add a lesson to a course the caller owns.
#[utoipa::path(
    post,
    path = "/api/lessons/{courseId}",
    params(("courseId" = String, Path, description = "Parent course identifier")),
    request_body = LessonRequest,
    responses(
        (status = 201, description = "Lesson created", body = LessonSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller does not own the course", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "addLesson"
)]
#[post("/lessons/{course_id}")]
pub async fn add_lesson(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
    payload: Result<web::Json<LessonRequest>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let identity = caller.require(RolePolicy::EDUCATOR)?;
    let course_id = parse_course_id(&path, COURSE_ID)?;
    require_course_owner(&state, &course_id, &identity).await?;
    let request = json_body(payload)?;
    let draft = LessonDraft::try_from(&request).map_err(|err| lesson_validation_error(&err))?;
    let lesson = state.lessons.add_lesson(&course_id, &identity, draft).await?;
    Ok(created(lesson))
}

/// List a course's lessons in ascending `order`.
#[utoipa::path(
    get,
    path = "/api/lessons/{courseId}",
    params(("courseId" = String, Path, description = "Parent course identifier")),
    responses(
        (status = 200, description = "Lessons in order", body = [LessonSchema]),
        (status = 400, description = "Invalid ID format", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["lessons"],
    operation_id = "listLessons"
)]
#[get("/lessons/{course_id}")]
pub async fn list_lessons(
    state: web::Data<HttpState>,
    _caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let course_id = parse_course_id(&path, COURSE_ID)?;
    let lessons = state.lessons_query.list_by_course(&course_id).await?;
    Ok(ok(lessons))
}
