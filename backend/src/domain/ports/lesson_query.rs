//! Driving port for lesson reads.
use async_trait::async_trait;

use crate::domain::{CourseId, Error, Lesson};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonQuery: Send + Sync {
    /// Lessons of a course, ascending by order with ties in creation order.
    async fn list_by_course(&self, course_id: &CourseId) -> Result<Vec<Lesson>, Error>;
}
