//! Driving port for lesson creation.
use async_trait::async_trait;

use crate::domain::{CourseId, Error, Identity, Lesson, LessonDraft};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonCommand: Send + Sync {
    /// Add a lesson to a course owned by `requester`.
    async fn add_lesson(
        &self,
        course_id: &CourseId,
        requester: &Identity,
        draft: LessonDraft,
    ) -> Result<Lesson, Error>;
}
