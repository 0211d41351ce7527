//! Port for lesson persistence.
use async_trait::async_trait;

use crate::domain::{CourseId, Lesson};

use super::define_port_error;

define_port_error! {
    /// Errors raised by lesson repository adapters.
    pub enum LessonPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "lesson repository connection failed: {message}" as ServiceUnavailable,
        /// Query or mutation failed during execution.
        Query { message: String } => "lesson repository query failed: {message}" as InternalError,
        /// The parent course vanished before the lesson could be attached.
        CourseMissing { course_id: String } => "Course not found" as NotFound,
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Store `lesson` and append its id to the parent course's lesson list as
    /// one atomic unit. Neither write is visible if the other fails.
    async fn insert_for_course(&self, lesson: &Lesson) -> Result<(), LessonPersistenceError>;

    /// All lessons whose parent is `course_id`, in creation order.
    async fn list_by_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<Lesson>, LessonPersistenceError>;
}
