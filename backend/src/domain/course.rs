//! Course aggregate.
//!
//! A course is owned by exactly one educator for its whole life. It starts as
//! a draft and can only move forward to published. Students join the
//! enrollment set only while the course is published.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::lesson::{Lesson, LessonId};
use super::UserId;

/// Stable course identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(Uuid);

impl CourseId {
    /// Parse a course identifier from a path segment.
    ///
    /// # Errors
    /// Returns the parse failure when `raw` is not a UUID.
    pub fn parse(raw: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(raw.trim()).map(Self)
    }

    /// Generate a fresh random identifier.
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap a stored UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Borrow the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures for new course payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CourseValidationError {
    /// A required field was absent or blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },
}

/// Validated input for course creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDraft {
    title: String,
    description: String,
    thumbnail: String,
}

impl CourseDraft {
    /// Validate raw course fields. Every field is required and trimmed.
    ///
    /// # Examples
    /// ```
    /// use skillforge::domain::CourseDraft;
    ///
    /// let draft = CourseDraft::try_new(
    ///     Some("  Rust 101 "),
    ///     Some("Ownership and borrowing"),
    ///     Some("/uploads/thumbnails/1-2.png"),
    /// )
    /// .unwrap();
    /// assert_eq!(draft.title(), "Rust 101");
    /// ```
    pub fn try_new(
        title: Option<&str>,
        description: Option<&str>,
        thumbnail: Option<&str>,
    ) -> Result<Self, CourseValidationError> {
        Ok(Self {
            title: required("title", title)?,
            description: required("description", description)?,
            thumbnail: required("thumbnail", thumbnail)?,
        })
    }

    /// Trimmed course title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Trimmed course description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Thumbnail reference, usually an `/uploads/thumbnails/` path.
    #[must_use]
    pub fn thumbnail(&self) -> &str {
        &self.thumbnail
    }
}

fn required(field: &'static str, value: Option<&str>) -> Result<String, CourseValidationError> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
        .ok_or(CourseValidationError::MissingField { field })
}

/// Reasons a student cannot be added to a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum EnrollmentError {
    /// The course is still a draft.
    #[error("course is not published")]
    NotPublished,
    /// The student is already in the enrollment set.
    #[error("student is already enrolled")]
    AlreadyEnrolled,
}

/// Course document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub educator_id: UserId,
    #[serde(rename = "lessons")]
    pub lesson_ids: Vec<LessonId>,
    #[serde(rename = "enrolledStudents")]
    pub enrolled_student_ids: Vec<UserId>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Course {
    /// Build a new unpublished course with no lessons or students.
    ///
    /// # Examples
    /// ```
    /// use chrono::Utc;
    /// use skillforge::domain::{Course, CourseDraft, CourseId, UserId};
    ///
    /// let draft = CourseDraft::try_new(Some("Rust 101"), Some("Ownership"), Some("/t.png"))
    ///     .unwrap();
    /// let owner = UserId::random();
    /// let course = Course::create(CourseId::random(), draft, owner, Utc::now());
    /// assert!(!course.is_published);
    /// assert!(course.is_owned_by(&owner));
    /// assert!(!course.is_enrolled(&UserId::random()));
    /// ```
    #[must_use]
    pub fn create(id: CourseId, draft: CourseDraft, owner: UserId, now: DateTime<Utc>) -> Self {
        let CourseDraft {
            title,
            description,
            thumbnail,
        } = draft;
        Self {
            id,
            title,
            description,
            thumbnail,
            educator_id: owner,
            lesson_ids: Vec::new(),
            enrolled_student_ids: Vec::new(),
            is_published: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether `user` is the educator who created the course.
    #[must_use]
    pub fn is_owned_by(&self, user: &UserId) -> bool {
        self.educator_id == *user
    }

    /// Whether `student` already appears in the enrollment set.
    #[must_use]
    pub fn is_enrolled(&self, student: &UserId) -> bool {
        self.enrolled_student_ids.contains(student)
    }

    /// Mark the course as published. Publishing twice is a no-op apart from
    /// the timestamp.
    pub fn publish(&mut self, now: DateTime<Utc>) {
        self.is_published = true;
        self.updated_at = now;
    }

    /// Add `student` to the enrollment set.
    pub fn enroll(&mut self, student: UserId, now: DateTime<Utc>) -> Result<(), EnrollmentError> {
        if !self.is_published {
            return Err(EnrollmentError::NotPublished);
        }
        if self.is_enrolled(&student) {
            return Err(EnrollmentError::AlreadyEnrolled);
        }
        self.enrolled_student_ids.push(student);
        self.updated_at = now;
        Ok(())
    }

    /// Append a lesson reference unless it is already present.
    ///
    /// Returns `true` when the reference was added.
    pub fn attach_lesson(&mut self, lesson: LessonId, now: DateTime<Utc>) -> bool {
        if self.lesson_ids.contains(&lesson) {
            return false;
        }
        self.lesson_ids.push(lesson);
        self.updated_at = now;
        true
    }
}

/// Course annotated with the owning educator's display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishedCourse {
    #[serde(flatten)]
    pub course: Course,
    pub educator_name: Option<String>,
}

/// A published course together with its lessons, sorted by `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseDetail {
    pub course: PublishedCourse,
    pub lessons: Vec<Lesson>,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::{fixture, rstest};
    use serde_json::json;

    #[fixture]
    fn draft() -> CourseDraft {
        CourseDraft::try_new(Some("Rust"), Some("Intro"), Some("/uploads/thumbnails/a.png"))
            .expect("valid draft")
    }

    #[fixture]
    fn course(draft: CourseDraft) -> Course {
        Course::create(CourseId::random(), draft, UserId::random(), Utc::now())
    }

    #[rstest]
    #[case(None, Some("d"), Some("t"), "title")]
    #[case(Some("  "), Some("d"), Some("t"), "title")]
    #[case(Some("x"), None, Some("t"), "description")]
    #[case(Some("x"), Some("d"), Some(""), "thumbnail")]
    fn draft_requires_every_field(
        #[case] title: Option<&str>,
        #[case] description: Option<&str>,
        #[case] thumbnail: Option<&str>,
        #[case] field: &str,
    ) {
        let err = CourseDraft::try_new(title, description, thumbnail).expect_err("missing field");
        let CourseValidationError::MissingField { field: actual } = err;
        assert_eq!(actual, field);
    }

    #[rstest]
    fn new_course_is_an_empty_draft(course: Course) {
        assert!(!course.is_published);
        assert!(course.lesson_ids.is_empty());
        assert!(course.enrolled_student_ids.is_empty());
        assert_eq!(course.created_at, course.updated_at);
    }

    #[rstest]
    fn publish_is_monotonic(mut course: Course) {
        course.publish(Utc::now());
        course.publish(Utc::now());
        assert!(course.is_published);
    }

    #[rstest]
    fn enrollment_requires_publication(mut course: Course) {
        let student = UserId::random();
        assert_eq!(
            course.enroll(student, Utc::now()),
            Err(EnrollmentError::NotPublished)
        );
        assert!(course.enrolled_student_ids.is_empty());
    }

    #[rstest]
    fn enrollment_is_set_like(mut course: Course) {
        let student = UserId::random();
        course.publish(Utc::now());
        assert_eq!(course.enroll(student, Utc::now()), Ok(()));
        assert_eq!(
            course.enroll(student, Utc::now()),
            Err(EnrollmentError::AlreadyEnrolled)
        );
        assert_eq!(course.enrolled_student_ids, vec![student]);
    }

    #[rstest]
    fn attach_lesson_ignores_duplicates(mut course: Course) {
        let lesson = LessonId::random();
        assert!(course.attach_lesson(lesson, Utc::now()));
        assert!(!course.attach_lesson(lesson, Utc::now()));
        assert_eq!(course.lesson_ids, vec![lesson]);
    }

    #[rstest]
    fn published_course_serialises_flat_with_educator_name(course: Course) {
        let educator = course.educator_id;
        let value = serde_json::to_value(PublishedCourse {
            course,
            educator_name: Some("Ada".to_owned()),
        })
        .expect("serialise");
        assert_eq!(value["educatorName"], json!("Ada"));
        assert_eq!(value["educatorId"], json!(educator.to_string()));
        assert_eq!(value["isPublished"], json!(false));
        assert_eq!(value["lessons"], json!([]));
        assert_eq!(value["enrolledStudents"], json!([]));
    }
}
