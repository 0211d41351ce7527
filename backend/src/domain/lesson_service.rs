//! Lesson aggregate manager.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::info;

use crate::domain::ports::{CourseRepository, LessonCommand, LessonQuery, LessonRepository};
use crate::domain::{
    CourseId, Error, Identity, Lesson, LessonDraft, LessonId, ensure_owner, sort_by_order,
};

/// Lesson service implementing [`LessonCommand`] and [`LessonQuery`].
#[derive(Clone)]
pub struct LessonService<C, L> {
    courses: Arc<C>,
    lessons: Arc<L>,
    clock: Arc<dyn Clock>,
}

impl<C, L> LessonService<C, L> {
    /// Wire the service over the course and lesson repositories.
    #[must_use]
    pub fn new(courses: Arc<C>, lessons: Arc<L>, clock: Arc<dyn Clock>) -> Self {
        Self {
            courses,
            lessons,
            clock,
        }
    }
}

#[async_trait]
impl<C, L> LessonCommand for LessonService<C, L>
where
    C: CourseRepository,
    L: LessonRepository,
{
    async fn add_lesson(
        &self,
        course_id: &CourseId,
        requester: &Identity,
        draft: LessonDraft,
    ) -> Result<Lesson, Error> {
        let course = self
            .courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| Error::not_found("Course not found"))?;
        ensure_owner(&course.educator_id, requester)?;

        let lesson = Lesson::create(LessonId::random(), *course_id, draft, self.clock.utc());
        self.lessons.insert_for_course(&lesson).await?;
        info!(
            %course_id,
            lesson_id = %lesson.id,
            order = lesson.order,
            "lesson added"
        );
        Ok(lesson)
    }
}

#[async_trait]
impl<C, L> LessonQuery for LessonService<C, L>
where
    C: CourseRepository,
    L: LessonRepository,
{
    async fn list_by_course(&self, course_id: &CourseId) -> Result<Vec<Lesson>, Error> {
        let mut lessons = self.lessons.list_by_course(course_id).await?;
        sort_by_order(&mut lessons);
        Ok(lessons)
    }
}
