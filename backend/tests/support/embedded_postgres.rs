//! Embedded PostgreSQL for the Diesel adapter suites.
//!
//! One shared cluster serves every suite. A template database carries the
//! migrated schema and each test clones it, so tests never observe each
//! other's rows.
//!
//! When the cluster cannot start, suites fail loudly unless
//! `SKIP_TEST_CLUSTER` is truthy, in which case they print a skip marker.

use std::fmt::Display;
use std::future::Future;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock, PoisonError};
use std::thread;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use pg_embedded_setup_unpriv::test_support::{hash_directory, shared_cluster_handle};
use pg_embedded_setup_unpriv::{ClusterHandle, TemporaryDatabase};
use rstest::fixture;
use skillforge::domain::ports::UserRepository;
use skillforge::domain::{
    Course, CourseDraft, CourseId, DisplayName, EmailAddress, PasswordHash, Role, User, UserId,
};
use skillforge::outbound::persistence::{
    DbPool, DieselCourseRepository, DieselLessonRepository, DieselUserRepository, PoolConfig,
    run_migrations,
};
use tokio::runtime::Runtime;
use uuid::Uuid;

static TEMPLATE_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

const TEMPLATE_PREFIX: &str = "skillforge_template";
const RETRIES: u32 = 5;
const RETRY_DELAY: Duration = Duration::from_millis(500);

fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// Skip (with `SKIP_TEST_CLUSTER`) or fail the suite when setup fails.
pub fn handle_cluster_setup_failure<T>(reason: impl Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

fn retry<T, E: std::fmt::Debug>(
    label: &str,
    mut step: impl FnMut() -> Result<T, E>,
) -> Result<T, String> {
    let mut attempt = 1;
    loop {
        match step() {
            Ok(value) => return Ok(value),
            Err(err) if attempt < RETRIES => {
                eprintln!("pg-embed: {label} failed on attempt {attempt}/{RETRIES}: {err:?}");
                thread::sleep(RETRY_DELAY);
                attempt += 1;
            }
            Err(err) => return Err(format!("{label}: {err:?}")),
        }
    }
}

fn template_name() -> Result<String, String> {
    let migrations = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("migrations");
    let hash = hash_directory(migrations).map_err(|err| format!("hash migrations: {err}"))?;
    let short = hash.get(..8).unwrap_or(&hash);
    Ok(format!("{TEMPLATE_PREFIX}_{short}"))
}

fn ensure_template(cluster: &ClusterHandle) -> Result<String, String> {
    let name = template_name()?;
    let _lock = TEMPLATE_LOCK
        .get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    let exists = cluster
        .database_exists(name.as_str())
        .map_err(|err| format!("template check: {err:?}"))?;
    if !exists {
        cluster
            .create_database(name.as_str())
            .map_err(|err| format!("create template: {err:?}"))?;
        let url = cluster.connection().database_url(&name);
        run_migrations(&url).map_err(|err| format!("migrate template: {err}"))?;
    }
    Ok(name)
}

/// Clone a freshly migrated database for one test.
pub fn migrated_database() -> Result<TemporaryDatabase, String> {
    let cluster = retry("start cluster", shared_cluster_handle)?;
    retry("clone template", || {
        let template = ensure_template(cluster)?;
        let name = format!("test_{}", Uuid::new_v4().simple());
        cluster
            .temporary_database_from_template(name.as_str(), template.as_str())
            .map_err(|err| format!("{err:?}"))
    })
}

/// Diesel adapters over one cloned database.
pub struct Harness {
    runtime: Runtime,
    pub users: DieselUserRepository,
    pub courses: DieselCourseRepository,
    pub lessons: DieselLessonRepository,
    _database: TemporaryDatabase,
}

impl Harness {
    fn setup() -> Result<Self, String> {
        let runtime = Runtime::new().map_err(|err| err.to_string())?;
        let database = migrated_database()?;
        let config = PoolConfig::new(database.url().to_string())
            .with_max_size(2)
            .with_min_idle(Some(1));
        let pool = runtime
            .block_on(DbPool::new(config))
            .map_err(|err| err.to_string())?;

        Ok(Self {
            runtime,
            users: DieselUserRepository::new(pool.clone()),
            courses: DieselCourseRepository::new(pool.clone()),
            lessons: DieselLessonRepository::new(pool),
            _database: database,
        })
    }

    /// Drive an adapter future to completion on the harness runtime.
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    /// Persist a user with `role` and return its id.
    pub fn user(&self, role: Role) -> UserId {
        let now = Utc::now();
        let user = User {
            id: UserId::random(),
            display_name: DisplayName::new("Diesel Test User").expect("display name"),
            email: EmailAddress::new(format!("{}@example.com", Uuid::new_v4().simple()))
                .expect("email"),
            role,
            password_hash: PasswordHash::new("$argon2id$not-a-real-hash"),
            created_at: now,
            updated_at: now,
        };
        self.block_on(self.users.insert(&user)).expect("insert user");
        user.id
    }
}

/// Fresh harness, or `None` when the cluster is unavailable and skipping is
/// enabled.
#[fixture]
pub fn harness() -> Option<Harness> {
    match Harness::setup() {
        Ok(harness) => Some(harness),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

/// Fixed instant used where ordering ties matter.
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

/// An unpublished course owned by `owner`, not yet stored.
pub fn draft_course(owner: UserId, title: &str, now: DateTime<Utc>) -> Course {
    let draft = CourseDraft::try_new(
        Some(title),
        Some("Stored through Diesel"),
        Some("/uploads/thumbnails/1-1.png"),
    )
    .expect("valid course draft");
    Course::create(CourseId::random(), draft, owner, now)
}
