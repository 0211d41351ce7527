//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CourseCommand, CourseQuery, LessonCommand, LessonQuery, LoginService, MediaUpload,
    RegistrationService, TokenResolver,
};

/// Parameter object bundling all port implementations for HTTP handlers.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenResolver>,
    pub courses: Arc<dyn CourseCommand>,
    pub courses_query: Arc<dyn CourseQuery>,
    pub lessons: Arc<dyn LessonCommand>,
    pub lessons_query: Arc<dyn LessonQuery>,
    pub uploads: Arc<dyn MediaUpload>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub registration: Arc<dyn RegistrationService>,
    pub login: Arc<dyn LoginService>,
    pub tokens: Arc<dyn TokenResolver>,
    pub courses: Arc<dyn CourseCommand>,
    pub courses_query: Arc<dyn CourseQuery>,
    pub lessons: Arc<dyn LessonCommand>,
    pub lessons_query: Arc<dyn LessonQuery>,
    pub uploads: Arc<dyn MediaUpload>,
}

impl From<HttpStatePorts> for HttpState {
    fn from(ports: HttpStatePorts) -> Self {
        Self::new(ports)
    }
}

impl HttpState {
    /// Construct state from a ports bundle.
    pub fn new(ports: HttpStatePorts) -> Self {
        let HttpStatePorts {
            registration,
            login,
            tokens,
            courses,
            courses_query,
            lessons,
            lessons_query,
            uploads,
        } = ports;
        Self {
            registration,
            login,
            tokens,
            courses,
            courses_query,
            lessons,
            lessons_query,
            uploads,
        }
    }
}
