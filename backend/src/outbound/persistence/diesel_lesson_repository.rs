//! PostgreSQL-backed `LessonRepository` implementation.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sql_query;
use diesel::sql_types::{Timestamptz, Uuid as SqlUuid};
use diesel_async::RunQueryDsl;

use crate::domain::ports::{LessonPersistenceError, LessonRepository};
use crate::domain::{CourseId, Lesson};

use super::diesel_course_repository::ATTACH_LESSON_SQL;
use super::diesel_error_mapping::StoreFailure;
use super::models::{LessonRow, NewLessonRow};
use super::pool::DbPool;
use super::schema::lessons;

/// Diesel-backed implementation of the [`LessonRepository`] port.
#[derive(Clone)]
pub struct DieselLessonRepository {
    pool: DbPool,
}

impl DieselLessonRepository {
    /// Wrap a pool; connections are checked out per call.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Failure inside the lesson transaction. Returning it rolls back.
#[derive(Debug)]
enum TxError {
    CourseMissing,
    Diesel(diesel::result::Error),
}

impl From<diesel::result::Error> for TxError {
    fn from(error: diesel::result::Error) -> Self {
        Self::Diesel(error)
    }
}

fn map_failure(failure: impl Into<StoreFailure>) -> LessonPersistenceError {
    failure
        .into()
        .into_port_error(LessonPersistenceError::connection, LessonPersistenceError::query)
}

#[async_trait]
impl LessonRepository for DieselLessonRepository {
    async fn insert_for_course(&self, lesson: &Lesson) -> Result<(), LessonPersistenceError> {
        use diesel_async::AsyncConnection as _;
        use diesel_async::scoped_futures::ScopedFutureExt as _;

        let row = NewLessonRow::from(lesson);
        let course_id = *lesson.course_id.as_uuid();
        let lesson_id = *lesson.id.as_uuid();
        let now = lesson.created_at;
        let mut conn = self.pool.get().await.map_err(map_failure)?;

        // The parent update runs first so a missing course aborts before the
        // lesson row exists.
        conn.transaction::<_, TxError, _>(|conn| {
            async move {
                let attached = sql_query(ATTACH_LESSON_SQL)
                    .bind::<SqlUuid, _>(course_id)
                    .bind::<SqlUuid, _>(lesson_id)
                    .bind::<Timestamptz, _>(now)
                    .execute(conn)
                    .await?;
                if attached == 0 {
                    return Err(TxError::CourseMissing);
                }
                diesel::insert_into(lessons::table)
                    .values(&row)
                    .execute(conn)
                    .await?;
                Ok(())
            }
            .scope_boxed()
        })
        .await
        .map_err(|err| match err {
            TxError::CourseMissing => {
                LessonPersistenceError::course_missing(lesson.course_id.to_string())
            }
            TxError::Diesel(error) => map_failure(error),
        })
    }

    async fn list_by_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<Lesson>, LessonPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_failure)?;
        let rows = lessons::table
            .filter(lessons::course_id.eq(course_id.as_uuid()))
            .order(lessons::created_seq.asc())
            .select(LessonRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_failure)?;
        Ok(rows.into_iter().map(Lesson::from).collect())
    }
}
