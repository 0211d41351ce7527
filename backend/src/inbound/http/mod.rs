//! HTTP inbound adapter exposing REST endpoints.
//!
//! Handlers translate requests into driving-port calls on [`state::HttpState`]
//! and wrap results in the JSON envelope from [`envelope`].

pub mod accounts;
pub mod auth;
pub mod courses;
pub mod envelope;
pub mod error;
pub mod health;
pub mod lessons;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub(crate) mod test_utils;
pub mod uploads;
pub(crate) mod validation;

use actix_web::web;

pub use error::{ApiResult, expose_internal_causes, json_config};

/// Register every `/api` route. Mount inside `web::scope("/api")`.
///
/// Literal segments are registered before `{courseId}` captures so
/// `/courses/educator` and `/lessons/upload-video` are never parsed as ids.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use skillforge::inbound::http::configure_api;
///
/// let app = App::new().service(web::scope("/api").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(accounts::register)
        .service(accounts::login)
        .service(uploads::upload_thumbnail)
        .service(courses::create_course)
        .service(courses::list_educator_courses)
        .service(courses::publish_course)
        .service(courses::list_published_courses)
        .service(courses::enroll)
        .service(courses::get_course)
        .service(uploads::upload_video)
        .service(lessons::add_lesson)
        .service(lessons::list_lessons);
}

/// Register the whole HTTP surface: banner, probes, uploaded blobs, and the
/// `/api` scope.
///
/// The caller supplies `web::Data<HttpState>` and `web::Data<HealthState>`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(health::banner)
        .service(health::ready)
        .service(health::live)
        .service(uploads::serve_upload)
        .service(web::scope("/api").configure(configure_api));
}
