//! PostgreSQL-backed `CourseRepository` implementation.
//!
//! Enrollment and lesson attachment are single conditional `UPDATE`
//! statements, so the check and the append happen atomically in the row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Timestamptz, Uuid as SqlUuid};
use diesel_async::{AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{CoursePersistenceError, CourseRepository, EnrollmentWrite};
use crate::domain::{Course, CourseId, LessonId, UserId};

use super::diesel_error_mapping::StoreFailure;
use super::models::{CourseRow, NewCourseRow};
use super::pool::DbPool;
use super::schema::courses;

const ENROLL_SQL: &str = "UPDATE courses \
     SET enrolled_student_ids = array_append(enrolled_student_ids, $2), updated_at = $3 \
     WHERE id = $1 AND is_published AND NOT ($2 = ANY(enrolled_student_ids))";

pub(super) const ATTACH_LESSON_SQL: &str = "UPDATE courses \
     SET lesson_ids = array_append(lesson_ids, $2), updated_at = $3 \
     WHERE id = $1 AND NOT ($2 = ANY(lesson_ids))";

/// Diesel-backed implementation of the [`CourseRepository`] port.
#[derive(Clone)]
pub struct DieselCourseRepository {
    pool: DbPool,
}

impl DieselCourseRepository {
    /// Wrap a pool; connections are checked out per call.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_failure(failure: impl Into<StoreFailure>) -> CoursePersistenceError {
    failure
        .into()
        .into_port_error(CoursePersistenceError::connection, CoursePersistenceError::query)
}

async fn load(
    conn: &mut AsyncPgConnection,
    id: &CourseId,
) -> Result<Option<Course>, CoursePersistenceError> {
    let row = courses::table
        .find(id.as_uuid())
        .select(CourseRow::as_select())
        .first(conn)
        .await
        .optional()
        .map_err(map_failure)?;
    Ok(row.map(Course::from))
}

#[async_trait]
impl CourseRepository for DieselCourseRepository {
    async fn insert(&self, course: &Course) -> Result<(), CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        diesel::insert_into(courses::table)
            .values(NewCourseRow::from(course))
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        load(&mut conn, id).await
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Course>, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let rows = courses::table
            .filter(courses::educator_id.eq(owner.as_uuid()))
            .order((courses::created_at.desc(), courses::created_seq.desc()))
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn list_published(&self) -> Result<Vec<Course>, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let rows = courses::table
            .filter(courses::is_published.eq(true))
            .order((courses::created_at.desc(), courses::created_seq.desc()))
            .select(CourseRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(rows.into_iter().map(Course::from).collect())
    }

    async fn mark_published(
        &self,
        id: &CourseId,
        now: DateTime<Utc>,
    ) -> Result<bool, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let updated = diesel::update(courses::table.find(id.as_uuid()))
            .set((courses::is_published.eq(true), courses::updated_at.eq(now)))
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(updated > 0)
    }

    async fn add_enrollment(
        &self,
        id: &CourseId,
        student: &UserId,
        now: DateTime<Utc>,
    ) -> Result<EnrollmentWrite, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let appended = sql_query(ENROLL_SQL)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<SqlUuid, _>(*student.as_uuid())
            .bind::<Timestamptz, _>(now)
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        if appended > 0 {
            return Ok(EnrollmentWrite::Enrolled);
        }

        // Nothing changed; classify why from the current row.
        Ok(match load(&mut conn, id).await? {
            Some(course) if course.is_published => EnrollmentWrite::AlreadyEnrolled,
            _ => EnrollmentWrite::Unavailable,
        })
    }

    async fn attach_lesson(
        &self,
        id: &CourseId,
        lesson: &LessonId,
        now: DateTime<Utc>,
    ) -> Result<bool, CoursePersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let appended = sql_query(ATTACH_LESSON_SQL)
            .bind::<SqlUuid, _>(*id.as_uuid())
            .bind::<SqlUuid, _>(*lesson.as_uuid())
            .bind::<Timestamptz, _>(now)
            .execute(&mut conn)
            .await
            .map_err(map_failure)?;
        if appended > 0 {
            return Ok(true);
        }
        Ok(load(&mut conn, id).await?.is_some())
    }
}
