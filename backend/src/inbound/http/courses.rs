//! Course HTTP handlers.
//!
//! ```text
//! POST  /api/courses                       educator
//! GET   /api/courses/educator              educator
//! PATCH /api/courses/{courseId}/publish    educator + owner
//! GET   /api/courses                       student
//! POST  /api/courses/{courseId}/enroll     student
//! GET   /api/courses/{courseId}            any authenticated caller
//! ```
//!
//! `GET /courses/educator` must be registered before `GET /courses/{courseId}`
//! so the literal segment wins.

use actix_web::{HttpResponse, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{CourseDraft, RolePolicy};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{Authenticated, require_course_owner};
use crate::inbound::http::envelope::{acknowledged, created, ok};
use crate::inbound::http::error::json_body;
use crate::inbound::http::schemas::{
    CourseDetailSchema, CourseSchema, ErrorSchema, PublishedCourseSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, course_validation_error, parse_course_id};

const COURSE_ID: FieldName = FieldName::new("courseId");

/// Request payload for `POST /api/courses`.
///
/// Fields are optional on the wire so a missing field is reported as a
/// validation failure rather than a JSON decoding error.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CourseRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// Reference returned by `POST /api/courses/upload-thumbnail`.
    pub thumbnail: Option<String>,
}

impl TryFrom<&CourseRequest> for CourseDraft {
    type Error = crate::domain::CourseValidationError;

    fn try_from(value: &CourseRequest) -> Result<Self, Self::Error> {
        Self::try_new(
            value.title.as_deref(),
            value.description.as_deref(),
            value.thumbnail.as_deref(),
        )
    }
}

/// Create an unpublished course owned by the caller.
#[utoipa::path(
    post,
    path = "/api/courses",
    request_body = CourseRequest,
    responses(
        (status = 201, description = "Course created", body = CourseSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not an educator", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "createCourse"
)]
#[post("/courses")]
pub async fn create_course(
    state: web::Data<HttpState>,
    caller: Authenticated,
    payload: Result<web::Json<CourseRequest>, actix_web::Error>,
) -> ApiResult<HttpResponse> {
    let identity = caller.require(RolePolicy::EDUCATOR)?;
    let request = json_body(payload)?;
    let draft = CourseDraft::try_from(&request).map_err(|err| course_validation_error(&err))?;
    let course = state.courses.create_course(&identity.user_id, draft).await?;
    Ok(created(course))
}

/// List the caller's own courses, newest first.
#[utoipa::path(
    get,
    path = "/api/courses/educator",
    responses(
        (status = 200, description = "Courses owned by the caller", body = [CourseSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not an educator", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listEducatorCourses"
)]
#[get("/courses/educator")]
pub async fn list_educator_courses(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<HttpResponse> {
    let identity = caller.require(RolePolicy::EDUCATOR)?;
    let courses = state.courses_query.list_by_owner(&identity.user_id).await?;
    Ok(ok(courses))
}

/// Publish a course. Re-publishing succeeds and changes nothing.
#[utoipa::path(
    patch,
    path = "/api/courses/{courseId}/publish",
    params(("courseId" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course published"),
        (status = 400, description = "Invalid ID format", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller does not own the course", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "publishCourse"
)]
#[patch("/courses/{course_id}/publish")]
pub async fn publish_course(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let identity = caller.require(RolePolicy::EDUCATOR)?;
    let course_id = parse_course_id(&path, COURSE_ID)?;
    require_course_owner(&state, &course_id, &identity).await?;
    state.courses.publish(&course_id, &identity).await?;
    Ok(acknowledged("Course published"))
}

/// List published courses with their educator's name, newest first.
#[utoipa::path(
    get,
    path = "/api/courses",
    responses(
        (status = 200, description = "Published courses", body = [PublishedCourseSchema]),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not a student", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "listPublishedCourses"
)]
#[get("/courses")]
pub async fn list_published_courses(
    state: web::Data<HttpState>,
    caller: Authenticated,
) -> ApiResult<HttpResponse> {
    caller.require(RolePolicy::STUDENT)?;
    let courses = state.courses_query.list_published().await?;
    Ok(ok(courses))
}

/// Enroll the calling student in a published course.
#[utoipa::path(
    post,
    path = "/api/courses/{courseId}/enroll",
    params(("courseId" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Enrolled successfully"),
        (status = 400, description = "Invalid ID format", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Caller is not a student", body = ErrorSchema),
        (status = 404, description = "Course not available", body = ErrorSchema),
        (status = 409, description = "Already enrolled", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "enrollInCourse"
)]
#[post("/courses/{course_id}/enroll")]
pub async fn enroll(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let identity = caller.require(RolePolicy::STUDENT)?;
    let course_id = parse_course_id(&path, COURSE_ID)?;
    state.courses.enroll(&course_id, &identity.user_id).await?;
    Ok(acknowledged("Enrolled successfully"))
}

/// Fetch a published course together with its lessons in `order`.
#[utoipa::path(
    get,
    path = "/api/courses/{courseId}",
    params(("courseId" = String, Path, description = "Course identifier")),
    responses(
        (status = 200, description = "Course with lessons", body = CourseDetailSchema),
        (status = 400, description = "Invalid ID format", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 404, description = "Course not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["courses"],
    operation_id = "getCourse"
)]
#[get("/courses/{course_id}")]
pub async fn get_course(
    state: web::Data<HttpState>,
    caller: Authenticated,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    caller.require(RolePolicy::ANY)?;
    let course_id = parse_course_id(&path, COURSE_ID)?;
    let detail = state.courses_query.get_with_lessons(&course_id).await?;
    Ok(ok(detail))
}

#[cfg(test)]
#[path = "courses_tests.rs"]
mod tests;
