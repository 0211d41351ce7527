//! Course aggregate manager.
//!
//! Implements the course driving ports. Publish and enroll are delegated to
//! single atomic repository writes; the service only decides which error a
//! refused write surfaces as.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::{info, warn};

use crate::domain::ports::{
    CourseCommand, CourseQuery, CourseRepository, EnrollmentWrite, LessonRepository,
    UserRepository,
};
use crate::domain::{
    Course, CourseDetail, CourseDraft, CourseId, Error, Identity, Lesson, PublishedCourse,
    UserId, ensure_owner, sort_by_order,
};

const COURSE_NOT_FOUND: &str = "Course not found";
const COURSE_NOT_AVAILABLE: &str = "Course not available";

/// Course service implementing [`CourseCommand`] and [`CourseQuery`].
#[derive(Clone)]
pub struct CourseService<C, L, U> {
    courses: Arc<C>,
    lessons: Arc<L>,
    users: Arc<U>,
    clock: Arc<dyn Clock>,
}

impl<C, L, U> CourseService<C, L, U> {
    /// Wire the service over its repositories and clock.
    #[must_use]
    pub fn new(courses: Arc<C>, lessons: Arc<L>, users: Arc<U>, clock: Arc<dyn Clock>) -> Self {
        Self {
            courses,
            lessons,
            users,
            clock,
        }
    }
}

impl<C, L, U> CourseService<C, L, U>
where
    C: CourseRepository,
    L: LessonRepository,
    U: UserRepository,
{
    async fn find_course(&self, course_id: &CourseId) -> Result<Course, Error> {
        self.courses
            .find_by_id(course_id)
            .await?
            .ok_or_else(|| Error::not_found(COURSE_NOT_FOUND))
    }

    async fn educator_name(&self, educator: &UserId) -> Result<Option<String>, Error> {
        let user = self.users.find_by_id(educator).await?;
        Ok(user.map(|u| u.display_name.to_string()))
    }

    /// Re-attach lessons that point at `course` but are missing from its
    /// lesson list. Repair failures are logged and do not fail the read.
    async fn reconcile_lessons(&self, course: &mut Course, lessons: &[Lesson]) {
        for lesson in lessons {
            if course.lesson_ids.contains(&lesson.id) {
                continue;
            }
            warn!(
                course_id = %course.id,
                lesson_id = %lesson.id,
                "lesson missing from course lesson list; repairing"
            );
            let now = self.clock.utc();
            match self.courses.attach_lesson(&course.id, &lesson.id, now).await {
                Ok(_) => {
                    course.attach_lesson(lesson.id, now);
                }
                Err(err) => warn!(
                    course_id = %course.id,
                    lesson_id = %lesson.id,
                    error = %err,
                    "failed to repair lesson reference"
                ),
            }
        }
    }
}

#[async_trait]
impl<C, L, U> CourseCommand for CourseService<C, L, U>
where
    C: CourseRepository,
    L: LessonRepository,
    U: UserRepository,
{
    async fn create_course(&self, owner: &UserId, draft: CourseDraft) -> Result<Course, Error> {
        let course = Course::create(CourseId::random(), draft, *owner, self.clock.utc());
        self.courses.insert(&course).await?;
        info!(course_id = %course.id, educator_id = %owner, "course created");
        Ok(course)
    }

    async fn publish(&self, course_id: &CourseId, requester: &Identity) -> Result<(), Error> {
        let course = self.find_course(course_id).await?;
        ensure_owner(&course.educator_id, requester)?;
        if !self
            .courses
            .mark_published(course_id, self.clock.utc())
            .await?
        {
            return Err(Error::not_found(COURSE_NOT_FOUND));
        }
        info!(%course_id, "course published");
        Ok(())
    }

    async fn enroll(&self, course_id: &CourseId, student: &UserId) -> Result<(), Error> {
        match self
            .courses
            .add_enrollment(course_id, student, self.clock.utc())
            .await?
        {
            EnrollmentWrite::Enrolled => {
                info!(%course_id, student_id = %student, "student enrolled");
                Ok(())
            }
            EnrollmentWrite::AlreadyEnrolled => Err(Error::conflict("Already enrolled")),
            EnrollmentWrite::Unavailable => Err(Error::not_found(COURSE_NOT_AVAILABLE)),
        }
    }
}

#[async_trait]
impl<C, L, U> CourseQuery for CourseService<C, L, U>
where
    C: CourseRepository,
    L: LessonRepository,
    U: UserRepository,
{
    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Course>, Error> {
        Ok(self.courses.list_by_owner(owner).await?)
    }

    async fn list_published(&self) -> Result<Vec<PublishedCourse>, Error> {
        let courses = self.courses.list_published().await?;
        let mut names: HashMap<UserId, Option<String>> = HashMap::new();
        let mut published = Vec::with_capacity(courses.len());
        for course in courses {
            let educator_name = match names.get(&course.educator_id) {
                Some(name) => name.clone(),
                None => {
                    let name = self.educator_name(&course.educator_id).await?;
                    names.insert(course.educator_id, name.clone());
                    name
                }
            };
            published.push(PublishedCourse {
                course,
                educator_name,
            });
        }
        Ok(published)
    }

    async fn get_with_lessons(&self, course_id: &CourseId) -> Result<CourseDetail, Error> {
        let mut course = self.find_course(course_id).await?;
        if !course.is_published {
            return Err(Error::not_found(COURSE_NOT_FOUND));
        }
        let mut lessons = self.lessons.list_by_course(course_id).await?;
        self.reconcile_lessons(&mut course, &lessons).await;
        sort_by_order(&mut lessons);
        let educator_name = self.educator_name(&course.educator_id).await?;
        Ok(CourseDetail {
            course: PublishedCourse {
                course,
                educator_name,
            },
            lessons,
        })
    }

    async fn course_owner(&self, course_id: &CourseId) -> Result<UserId, Error> {
        Ok(self.find_course(course_id).await?.educator_id)
    }
}
