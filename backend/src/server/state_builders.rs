//! Builders wiring repositories, security adapters, and domain services into
//! the HTTP state.

use std::io;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::info;

use skillforge::domain::ports::{CourseRepository, LessonRepository, UserRepository};
use skillforge::domain::{CourseService, IdentityService, LessonService, UploadService};
use skillforge::inbound::http::state::{HttpState, HttpStatePorts};
use skillforge::outbound::memory::MemoryDocumentStore;
use skillforge::outbound::persistence::{
    DieselCourseRepository, DieselLessonRepository, DieselUserRepository,
};
use skillforge::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer};
use skillforge::outbound::storage::CapStdBlobStore;

use super::ServerConfig;

/// Repository adapters backing the three aggregates.
struct Repositories<U, C, L> {
    users: Arc<U>,
    courses: Arc<C>,
    lessons: Arc<L>,
}

/// Adapters shared regardless of the repository backend.
struct SharedAdapters {
    hasher: Arc<Argon2PasswordHasher>,
    tokens: Arc<JwtTokenIssuer>,
    blobs: Arc<CapStdBlobStore>,
    clock: Arc<dyn Clock>,
}

fn wire<U, C, L>(repos: Repositories<U, C, L>, shared: SharedAdapters) -> HttpState
where
    U: UserRepository + 'static,
    C: CourseRepository + 'static,
    L: LessonRepository + 'static,
{
    let Repositories {
        users,
        courses,
        lessons,
    } = repos;
    let SharedAdapters {
        hasher,
        tokens,
        blobs,
        clock,
    } = shared;

    let identity = Arc::new(IdentityService::new(
        users.clone(),
        hasher,
        tokens,
        clock.clone(),
    ));
    let course_service = Arc::new(CourseService::new(
        courses.clone(),
        lessons.clone(),
        users,
        clock.clone(),
    ));
    let lesson_service = Arc::new(LessonService::new(courses, lessons, clock.clone()));
    let uploads = Arc::new(UploadService::new(blobs, clock));

    HttpState::new(HttpStatePorts {
        registration: identity.clone(),
        login: identity.clone(),
        tokens: identity,
        courses: course_service.clone(),
        courses_query: course_service,
        lessons: lesson_service.clone(),
        lessons_query: lesson_service,
        uploads,
    })
}

/// Build the HTTP state, choosing Diesel repositories when a pool is
/// configured and the in-memory document store otherwise.
///
/// # Errors
/// Returns [`io::Error`] when the upload directory cannot be opened.
pub(super) fn build_http_state(config: &ServerConfig) -> io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let shared = SharedAdapters {
        hasher: Arc::new(Argon2PasswordHasher::new()),
        tokens: Arc::new(JwtTokenIssuer::new(
            &config.token_key,
            config.token_ttl,
            clock.clone(),
        )),
        blobs: Arc::new(CapStdBlobStore::open(&config.upload_dir)?),
        clock,
    };

    let state = match &config.db_pool {
        Some(pool) => {
            info!("using PostgreSQL repositories");
            wire(
                Repositories {
                    users: Arc::new(DieselUserRepository::new(pool.clone())),
                    courses: Arc::new(DieselCourseRepository::new(pool.clone())),
                    lessons: Arc::new(DieselLessonRepository::new(pool.clone())),
                },
                shared,
            )
        }
        None => {
            info!("no database configured; using the in-memory document store");
            let store = Arc::new(MemoryDocumentStore::new());
            wire(
                Repositories {
                    users: store.clone(),
                    courses: store.clone(),
                    lessons: store,
                },
                shared,
            )
        }
    };
    Ok(state)
}
