//! Driving port for course mutations.
use async_trait::async_trait;

use crate::domain::{Course, CourseDraft, CourseId, Error, Identity, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseCommand: Send + Sync {
    /// Create an unpublished course owned by `owner`.
    async fn create_course(&self, owner: &UserId, draft: CourseDraft) -> Result<Course, Error>;

    /// Publish a course. Only its owner may do so.
    async fn publish(&self, course_id: &CourseId, requester: &Identity) -> Result<(), Error>;

    /// Enroll `student` in a published course.
    async fn enroll(&self, course_id: &CourseId, student: &UserId) -> Result<(), Error>;
}
