//! Port for course document persistence.
//!
//! State transitions that must be atomic per course (publish, enroll, lesson
//! attachment) are exposed as single calls so adapters can apply them as one
//! conditional write instead of a read-modify-write in the service.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Course, CourseId, LessonId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by course repository adapters.
    pub enum CoursePersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "course repository connection failed: {message}" as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "course repository query failed: {message}" as InternalError,
    }
}

/// Outcome of an atomic enrollment write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnrollmentWrite {
    /// The student was appended.
    Enrolled,
    /// The student was already present; nothing changed.
    AlreadyEnrolled,
    /// The course is absent or unpublished; nothing changed.
    Unavailable,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persist a newly created course.
    async fn insert(&self, course: &Course) -> Result<(), CoursePersistenceError>;

    /// Fetch a course by identifier, published or not.
    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CoursePersistenceError>;

    /// Courses owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Course>, CoursePersistenceError>;

    /// Published courses, newest first.
    async fn list_published(&self) -> Result<Vec<Course>, CoursePersistenceError>;

    /// Set `isPublished` to true. Returns `false` when the course is absent.
    async fn mark_published(
        &self,
        id: &CourseId,
        now: DateTime<Utc>,
    ) -> Result<bool, CoursePersistenceError>;

    /// Append `student` to the enrollment set if the course is published and
    /// the student is not yet present, as one atomic step.
    async fn add_enrollment(
        &self,
        id: &CourseId,
        student: &UserId,
        now: DateTime<Utc>,
    ) -> Result<EnrollmentWrite, CoursePersistenceError>;

    /// Append a lesson reference unless already present. Returns `false` when
    /// the course is absent.
    async fn attach_lesson(
        &self,
        id: &CourseId,
        lesson: &LessonId,
        now: DateTime<Utc>,
    ) -> Result<bool, CoursePersistenceError>;
}
