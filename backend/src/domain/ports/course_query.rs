//! Driving port for course reads.
use async_trait::async_trait;

use crate::domain::{Course, CourseDetail, CourseId, Error, PublishedCourse, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CourseQuery: Send + Sync {
    /// Courses owned by `owner`, newest first.
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Course>, Error>;

    /// Published courses with educator names, newest first.
    async fn list_published(&self) -> Result<Vec<PublishedCourse>, Error>;

    /// A published course with its lessons sorted by order.
    ///
    /// Unpublished and absent courses are indistinguishable: both are
    /// `NotFound`.
    async fn get_with_lessons(&self, course_id: &CourseId) -> Result<CourseDetail, Error>;

    /// Owner of a course, for the ownership step. `NotFound` when absent.
    async fn course_owner(&self, course_id: &CourseId) -> Result<UserId, Error>;
}
