//! In-process document store implementing the repository ports.
//!
//! Used when no database URL is configured and by the integration tests. All
//! three collections sit behind one lock, so the compound writes
//! (enrollment, lesson insertion with its course reference) are atomic.

use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::ports::{
    CoursePersistenceError, CourseRepository, EnrollmentWrite, LessonPersistenceError,
    LessonRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{
    Course, CourseId, EmailAddress, EnrollmentError, Lesson, LessonId, User, UserId,
};

#[derive(Debug, Default)]
struct Collections {
    users: Vec<User>,
    // Insertion order doubles as the tie-break for equal timestamps.
    courses: Vec<Course>,
    lessons: Vec<Lesson>,
}

impl Collections {
    fn course_mut(&mut self, id: &CourseId) -> Option<&mut Course> {
        self.courses.iter_mut().find(|course| course.id == *id)
    }

    fn newest_first<'a>(courses: impl DoubleEndedIterator<Item = &'a Course>) -> Vec<Course> {
        let mut listed: Vec<Course> = courses.rev().cloned().collect();
        listed.sort_by_key(|course| Reverse(course.created_at));
        listed
    }
}

/// Shared, cloneable in-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    inner: Arc<RwLock<Collections>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryDocumentStore {
    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        let mut state = self.inner.write().await;
        if state.users.iter().any(|existing| existing.email == user.email) {
            return Err(UserPersistenceError::duplicate_email(user.email.as_ref()));
        }
        state.users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserPersistenceError> {
        let state = self.inner.read().await;
        Ok(state.users.iter().find(|user| user.id == *id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<User>, UserPersistenceError> {
        let state = self.inner.read().await;
        Ok(state.users.iter().find(|user| user.email == *email).cloned())
    }
}

#[async_trait]
impl CourseRepository for MemoryDocumentStore {
    async fn insert(&self, course: &Course) -> Result<(), CoursePersistenceError> {
        self.inner.write().await.courses.push(course.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CourseId) -> Result<Option<Course>, CoursePersistenceError> {
        let state = self.inner.read().await;
        Ok(state.courses.iter().find(|course| course.id == *id).cloned())
    }

    async fn list_by_owner(&self, owner: &UserId) -> Result<Vec<Course>, CoursePersistenceError> {
        let state = self.inner.read().await;
        Ok(Collections::newest_first(
            state.courses.iter().filter(|course| course.is_owned_by(owner)),
        ))
    }

    async fn list_published(&self) -> Result<Vec<Course>, CoursePersistenceError> {
        let state = self.inner.read().await;
        Ok(Collections::newest_first(
            state.courses.iter().filter(|course| course.is_published),
        ))
    }

    async fn mark_published(
        &self,
        id: &CourseId,
        now: DateTime<Utc>,
    ) -> Result<bool, CoursePersistenceError> {
        let mut state = self.inner.write().await;
        Ok(state.course_mut(id).map(|course| course.publish(now)).is_some())
    }

    async fn add_enrollment(
        &self,
        id: &CourseId,
        student: &UserId,
        now: DateTime<Utc>,
    ) -> Result<EnrollmentWrite, CoursePersistenceError> {
        let mut state = self.inner.write().await;
        let Some(course) = state.course_mut(id) else {
            return Ok(EnrollmentWrite::Unavailable);
        };
        Ok(match course.enroll(*student, now) {
            Ok(()) => EnrollmentWrite::Enrolled,
            Err(EnrollmentError::AlreadyEnrolled) => EnrollmentWrite::AlreadyEnrolled,
            Err(EnrollmentError::NotPublished) => EnrollmentWrite::Unavailable,
        })
    }

    async fn attach_lesson(
        &self,
        id: &CourseId,
        lesson: &LessonId,
        now: DateTime<Utc>,
    ) -> Result<bool, CoursePersistenceError> {
        let mut state = self.inner.write().await;
        Ok(state
            .course_mut(id)
            .map(|course| course.attach_lesson(*lesson, now))
            .is_some())
    }
}

#[async_trait]
impl LessonRepository for MemoryDocumentStore {
    async fn insert_for_course(&self, lesson: &Lesson) -> Result<(), LessonPersistenceError> {
        let mut state = self.inner.write().await;
        let Some(course) = state.course_mut(&lesson.course_id) else {
            return Err(LessonPersistenceError::course_missing(
                lesson.course_id.to_string(),
            ));
        };
        course.attach_lesson(lesson.id, lesson.created_at);
        state.lessons.push(lesson.clone());
        Ok(())
    }

    async fn list_by_course(
        &self,
        course_id: &CourseId,
    ) -> Result<Vec<Lesson>, LessonPersistenceError> {
        let state = self.inner.read().await;
        Ok(state
            .lessons
            .iter()
            .filter(|lesson| lesson.course_id == *course_id)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    //! Behavioural coverage for the in-memory store.
    use super::*;
    use crate::domain::{
        CourseDraft, DisplayName, ErrorCode, LessonDraft, PasswordHash, Role,
    };
    use chrono::{Duration, TimeZone};
    use rstest::{fixture, rstest};

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0)
            .single()
            .expect("valid timestamp")
    }

    fn user(email: &str) -> User {
        User {
            id: UserId::random(),
            display_name: DisplayName::new("Ada").expect("valid name"),
            email: EmailAddress::new(email).expect("valid email"),
            role: Role::Educator,
            password_hash: PasswordHash::new("$argon2id$stub"),
            created_at: at(0),
            updated_at: at(0),
        }
    }

    fn course(owner: UserId, title: &str, now: DateTime<Utc>) -> Course {
        let draft = CourseDraft::try_new(Some(title), Some("About"), Some("/uploads/thumbnails/t.png"))
            .expect("valid draft");
        Course::create(CourseId::random(), draft, owner, now)
    }

    fn lesson(course_id: CourseId, title: &str, order: i32) -> Lesson {
        let draft = LessonDraft::try_new(Some(title), Some("/uploads/videos/v.mp4"), Some(order), None)
            .expect("valid draft");
        Lesson::create(LessonId::random(), course_id, draft, at(10))
    }

    #[fixture]
    fn store() -> MemoryDocumentStore {
        MemoryDocumentStore::new()
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected(store: MemoryDocumentStore) {
        UserRepository::insert(&store, &user("ada@example.com"))
            .await
            .expect("first insert");
        let err = UserRepository::insert(&store, &user("ada@example.com"))
            .await
            .expect_err("duplicate must fail");
        assert!(matches!(err, UserPersistenceError::DuplicateEmail { .. }));
        assert_eq!(err.code(), ErrorCode::Conflict);
    }

    #[rstest]
    #[tokio::test]
    async fn listings_are_newest_first_with_insertion_tie_break(store: MemoryDocumentStore) {
        let owner = UserId::random();
        let older = course(owner, "Older", at(0));
        let first_tied = course(owner, "First tied", at(60));
        let second_tied = course(owner, "Second tied", at(60));
        for item in [&older, &first_tied, &second_tied] {
            CourseRepository::insert(&store, item).await.expect("insert");
        }
        CourseRepository::insert(&store, &course(UserId::random(), "Other", at(120)))
            .await
            .expect("insert");

        let titles: Vec<String> = store
            .list_by_owner(&owner)
            .await
            .expect("list")
            .into_iter()
            .map(|c| c.title)
            .collect();
        assert_eq!(titles, ["Second tied", "First tied", "Older"]);
    }

    #[rstest]
    #[tokio::test]
    async fn enrollment_outcomes(store: MemoryDocumentStore) {
        let draft = course(UserId::random(), "Rust", at(0));
        let id = draft.id;
        let student = UserId::random();
        CourseRepository::insert(&store, &draft).await.expect("insert");

        let unpublished = store.add_enrollment(&id, &student, at(1)).await.expect("write");
        assert_eq!(unpublished, EnrollmentWrite::Unavailable);

        assert!(store.mark_published(&id, at(2)).await.expect("publish"));
        let first = store.add_enrollment(&id, &student, at(3)).await.expect("write");
        let second = store.add_enrollment(&id, &student, at(4)).await.expect("write");
        assert_eq!(first, EnrollmentWrite::Enrolled);
        assert_eq!(second, EnrollmentWrite::AlreadyEnrolled);

        let stored = CourseRepository::find_by_id(&store, &id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored.enrolled_student_ids, vec![student]);
    }

    #[rstest]
    #[tokio::test]
    async fn concurrent_enrollment_admits_the_student_once(store: MemoryDocumentStore) {
        let draft = course(UserId::random(), "Rust", at(0));
        let id = draft.id;
        CourseRepository::insert(&store, &draft).await.expect("insert");
        store.mark_published(&id, at(1)).await.expect("publish");

        let student = UserId::random();
        let attempts = (0..8).map(|_| {
            let shared = store.clone();
            tokio::spawn(async move { shared.add_enrollment(&id, &student, at(2)).await })
        });
        let mut enrolled = 0;
        for handle in attempts.collect::<Vec<_>>() {
            if handle.await.expect("join").expect("write") == EnrollmentWrite::Enrolled {
                enrolled += 1;
            }
        }
        assert_eq!(enrolled, 1);
    }

    #[rstest]
    #[tokio::test]
    async fn lesson_insert_updates_the_parent_course(store: MemoryDocumentStore) {
        let parent = course(UserId::random(), "Rust", at(0));
        let id = parent.id;
        CourseRepository::insert(&store, &parent).await.expect("insert");

        let intro = lesson(id, "Intro", 2);
        let setup = lesson(id, "Setup", 1);
        store.insert_for_course(&intro).await.expect("insert");
        store.insert_for_course(&setup).await.expect("insert");

        let stored = CourseRepository::find_by_id(&store, &id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored.lesson_ids, vec![intro.id, setup.id]);
        let listed = store.list_by_course(&id).await.expect("list");
        assert_eq!(listed, vec![intro, setup]);
    }

    #[rstest]
    #[tokio::test]
    async fn lesson_for_missing_course_leaves_no_trace(store: MemoryDocumentStore) {
        let orphan_course = CourseId::random();
        let orphan = lesson(orphan_course, "Lost", 1);
        let err = store
            .insert_for_course(&orphan)
            .await
            .expect_err("missing course");
        assert_eq!(err.code(), ErrorCode::NotFound);
        assert!(store.list_by_course(&orphan_course).await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn attaching_twice_keeps_one_reference(store: MemoryDocumentStore) {
        let parent = course(UserId::random(), "Rust", at(0));
        let id = parent.id;
        CourseRepository::insert(&store, &parent).await.expect("insert");
        let lesson_id = LessonId::random();
        let later = at(0) + Duration::seconds(5);

        assert!(store.attach_lesson(&id, &lesson_id, later).await.expect("attach"));
        assert!(store.attach_lesson(&id, &lesson_id, later).await.expect("attach"));
        assert!(!store
            .attach_lesson(&CourseId::random(), &lesson_id, later)
            .await
            .expect("attach"));

        let stored = CourseRepository::find_by_id(&store, &id)
            .await
            .expect("find")
            .expect("present");
        assert_eq!(stored.lesson_ids, vec![lesson_id]);
    }
}
