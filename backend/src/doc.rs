//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `crate::inbound::http`, the
//! schema wrappers from [`crate::inbound::http::schemas`], and the bearer
//! security scheme. Swagger UI serves it at `/docs` in debug builds.

use crate::inbound::http::accounts::{LoginRequest, RegisterRequest};
use crate::inbound::http::courses::CourseRequest;
use crate::inbound::http::lessons::LessonRequest;
use crate::inbound::http::schemas::{
    AuthSessionSchema, CourseDetailSchema, CourseSchema, ErrorCodeSchema, ErrorSchema,
    LessonSchema, PublishedCourseSchema, UserSummarySchema,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Enrich the generated document with the bearer token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        let bearer = HttpBuilder::new()
            .scheme(HttpAuthScheme::Bearer)
            .bearer_format("JWT")
            .description(Some(
                "Token returned by POST /api/auth/register or /api/auth/login.",
            ))
            .build();
        components.add_security_scheme("BearerToken", SecurityScheme::Http(bearer));
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "SkillForge LMS API",
        description = "Course catalogue, lessons, enrollment and media uploads for educators and students."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("BearerToken" = [])),
    paths(
        crate::inbound::http::accounts::register,
        crate::inbound::http::accounts::login,
        crate::inbound::http::courses::create_course,
        crate::inbound::http::courses::list_educator_courses,
        crate::inbound::http::courses::publish_course,
        crate::inbound::http::courses::list_published_courses,
        crate::inbound::http::courses::enroll,
        crate::inbound::http::courses::get_course,
        crate::inbound::http::lessons::add_lesson,
        crate::inbound::http::lessons::list_lessons,
        crate::inbound::http::uploads::upload_thumbnail,
        crate::inbound::http::uploads::upload_video,
        crate::inbound::http::uploads::serve_upload,
        crate::inbound::http::health::banner,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        RegisterRequest,
        LoginRequest,
        CourseRequest,
        LessonRequest,
        AuthSessionSchema,
        UserSummarySchema,
        CourseSchema,
        PublishedCourseSchema,
        CourseDetailSchema,
        LessonSchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "auth", description = "Registration and login"),
        (name = "courses", description = "Course catalogue and enrollment"),
        (name = "lessons", description = "Lessons within a course"),
        (name = "uploads", description = "Thumbnail and video uploads"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
