//! Internal Diesel row structs and their conversions to domain types.
//!
//! Row types never leave the persistence layer.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::{
    Course, CourseId, DisplayName, EmailAddress, Lesson, LessonId, PasswordHash, User, UserId,
};

use super::schema::{courses, lessons, users};

/// A stored row that no longer satisfies domain validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {table} row {id}: {reason}")]
pub(crate) struct RowConversionError {
    pub table: &'static str,
    pub id: Uuid,
    pub reason: String,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub display_name: String,
    pub email: String,
    pub role: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub display_name: &'a str,
    pub email: &'a str,
    pub role: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a User> for NewUserRow<'a> {
    fn from(user: &'a User) -> Self {
        Self {
            id: *user.id.as_uuid(),
            display_name: user.display_name.as_ref(),
            email: user.email.as_ref(),
            role: user.role.as_str(),
            password_hash: user.password_hash.as_str(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl TryFrom<UserRow> for User {
    type Error = RowConversionError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let invalid = move |reason: String| RowConversionError {
            table: "users",
            id,
            reason,
        };
        Ok(Self {
            id: UserId::from_uuid(row.id),
            display_name: DisplayName::new(&row.display_name)
                .map_err(|err| invalid(err.to_string()))?,
            email: EmailAddress::new(&row.email).map_err(|err| invalid(err.to_string()))?,
            role: row.role.parse().map_err(|err: crate::domain::UserValidationError| {
                invalid(err.to_string())
            })?,
            password_hash: PasswordHash::new(row.password_hash),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = courses)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CourseRow {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub educator_id: Uuid,
    pub lesson_ids: Vec<Uuid>,
    pub enrolled_student_ids: Vec<Uuid>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = courses)]
pub(crate) struct NewCourseRow<'a> {
    pub id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
    pub thumbnail: &'a str,
    pub educator_id: Uuid,
    pub lesson_ids: Vec<Uuid>,
    pub enrolled_student_ids: Vec<Uuid>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Course> for NewCourseRow<'a> {
    fn from(course: &'a Course) -> Self {
        Self {
            id: *course.id.as_uuid(),
            title: &course.title,
            description: &course.description,
            thumbnail: &course.thumbnail,
            educator_id: *course.educator_id.as_uuid(),
            lesson_ids: course.lesson_ids.iter().map(|id| *id.as_uuid()).collect(),
            enrolled_student_ids: course
                .enrolled_student_ids
                .iter()
                .map(|id| *id.as_uuid())
                .collect(),
            is_published: course.is_published,
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

impl From<CourseRow> for Course {
    fn from(row: CourseRow) -> Self {
        Self {
            id: CourseId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            thumbnail: row.thumbnail,
            educator_id: UserId::from_uuid(row.educator_id),
            lesson_ids: row.lesson_ids.into_iter().map(LessonId::from_uuid).collect(),
            enrolled_student_ids: row
                .enrolled_student_ids
                .into_iter()
                .map(UserId::from_uuid)
                .collect(),
            is_published: row.is_published,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = lessons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct LessonRow {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: String,
    pub video_url: String,
    pub position: i32,
    pub duration_seconds: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = lessons)]
pub(crate) struct NewLessonRow<'a> {
    pub id: Uuid,
    pub course_id: Uuid,
    pub title: &'a str,
    pub video_url: &'a str,
    pub position: i32,
    pub duration_seconds: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<'a> From<&'a Lesson> for NewLessonRow<'a> {
    fn from(lesson: &'a Lesson) -> Self {
        Self {
            id: *lesson.id.as_uuid(),
            course_id: *lesson.course_id.as_uuid(),
            title: &lesson.title,
            video_url: &lesson.video_url,
            position: lesson.order,
            duration_seconds: lesson.duration,
            created_at: lesson.created_at,
            updated_at: lesson.updated_at,
        }
    }
}

impl From<LessonRow> for Lesson {
    fn from(row: LessonRow) -> Self {
        Self {
            id: LessonId::from_uuid(row.id),
            title: row.title,
            course_id: CourseId::from_uuid(row.course_id),
            video_url: row.video_url,
            order: row.position,
            duration: row.duration_seconds,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
