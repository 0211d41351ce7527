//! Lesson entity.
//!
//! Lessons are append-only children of a course. Ordering is caller-supplied:
//! duplicates and gaps are accepted, and listings sort stably so that equal
//! positions keep their creation order.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::CourseId;

/// Stable lesson identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LessonId(Uuid);

impl LessonId {
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

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Validation failures for new lesson payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LessonValidationError {
    /// A required field was absent or blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },
    /// Duration was below zero.
    #[error("duration must not be negative")]
    NegativeDuration,
}

impl LessonValidationError {
    /// Name of the offending request field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } => field,
            Self::NegativeDuration => "duration",
        }
    }
}

/// Validated input for lesson creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonDraft {
    title: String,
    video_url: String,
    order: i32,
    duration: i64,
}

impl LessonDraft {
    /// Validate raw lesson fields.
    ///
    /// `title`, `video_url`, and `order` are required. `duration` defaults to
    /// zero seconds.
    pub fn try_new(
        title: Option<&str>,
        video_url: Option<&str>,
        order: Option<i32>,
        duration: Option<i64>,
    ) -> Result<Self, LessonValidationError> {
        let title = non_blank("title", title)?;
        let video_url = non_blank("videoUrl", video_url)?;
        let order = order.ok_or(LessonValidationError::MissingField { field: "order" })?;
        let duration = duration.unwrap_or(0);
        if duration < 0 {
            return Err(LessonValidationError::NegativeDuration);
        }
        Ok(Self {
            title,
            video_url,
            order,
            duration,
        })
    }

    /// Trimmed lesson title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Video reference, usually an `/uploads/videos/` path.
    #[must_use]
    pub fn video_url(&self) -> &str {
        &self.video_url
    }

    /// Position within the course; lower plays first.
    #[must_use]
    pub fn order(&self) -> i32 {
        self.order
    }

    /// Length in seconds.
    #[must_use]
    pub fn duration(&self) -> i64 {
        self.duration
    }
}

fn non_blank(field: &'static str, value: Option<&str>) -> Result<String, LessonValidationError> {
    value
        .map(str::trim)
        .filter(|trimmed| !trimmed.is_empty())
        .map(str::to_owned)
        .ok_or(LessonValidationError::MissingField { field })
}

/// Lesson document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: LessonId,
    pub title: String,
    #[serde(rename = "course")]
    pub course_id: CourseId,
    pub video_url: String,
    pub order: i32,
    /// Length in seconds.
    pub duration: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Lesson {
    /// Build a lesson belonging to `course_id` from a validated draft.
    #[must_use]
    pub fn create(id: LessonId, course_id: CourseId, draft: LessonDraft, now: DateTime<Utc>) -> Self {
        let LessonDraft {
            title,
            video_url,
            order,
            duration,
        } = draft;
        Self {
            id,
            title,
            course_id,
            video_url,
            order,
            duration,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Sort lessons ascending by `order`, keeping the existing relative order of
/// ties. Callers pass lessons in creation order.
pub fn sort_by_order(lessons: &mut [Lesson]) {
    lessons.sort_by_key(|lesson| lesson.order);
}
