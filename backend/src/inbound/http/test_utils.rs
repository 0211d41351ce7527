//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, web};

use crate::domain::ports::{
    MockCourseCommand, MockCourseQuery, MockLessonCommand, MockLessonQuery, MockLoginService,
    MockMediaUpload, MockRegistrationService, MockTokenResolver,
};
use crate::domain::{Error, Identity, Role, UserId};

use super::error::json_config;
use super::state::{HttpState, HttpStatePorts};

pub(crate) const TOKEN: &str = "test-token";

/// Mock for every driving port, consumed into an [`HttpState`].
///
/// Mocks with no expectations panic when called, so each test only sets up
/// the ports its route should reach.
#[derive(Default)]
pub(crate) struct MockPorts {
    pub registration: MockRegistrationService,
    pub login: MockLoginService,
    pub tokens: MockTokenResolver,
    pub courses: MockCourseCommand,
    pub courses_query: MockCourseQuery,
    pub lessons: MockLessonCommand,
    pub lessons_query: MockLessonQuery,
    pub uploads: MockMediaUpload,
}

impl MockPorts {
    /// Resolve [`TOKEN`] to a fresh identity with `role`.
    pub(crate) fn signed_in(role: Role) -> (Self, Identity) {
        let identity = Identity::new(UserId::random(), role);
        let mut ports = Self::default();
        ports
            .tokens
            .expect_resolve()
            .withf(|token| token == TOKEN)
            .returning(move |_| Ok(identity));
        (ports, identity)
    }

    /// Reject every token as invalid.
    pub(crate) fn rejecting_tokens() -> Self {
        let mut ports = Self::default();
        ports
            .tokens
            .expect_resolve()
            .returning(|_| Err(Error::unauthorized("Not authorized, token invalid")));
        ports
    }

    pub(crate) fn into_state(self) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(HttpStatePorts {
            registration: Arc::new(self.registration),
            login: Arc::new(self.login),
            tokens: Arc::new(self.tokens),
            courses: Arc::new(self.courses),
            courses_query: Arc::new(self.courses_query),
            lessons: Arc::new(self.lessons),
            lessons_query: Arc::new(self.lessons_query),
            uploads: Arc::new(self.uploads),
        }))
    }
}

/// `Authorization` header carrying [`TOKEN`].
pub(crate) fn bearer() -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {TOKEN}"))
}

/// App serving every `/api` route against `state`.
pub(crate) fn test_app(
    state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(state)
        .app_data(json_config())
        .service(web::scope("/api").configure(super::configure_api))
}
