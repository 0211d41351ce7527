//! Domain primitives, aggregates, and services.
//!
//! Purpose: define the strongly typed entities of the course catalogue and the
//! services that enforce ownership, publication, and enrollment rules. The
//! domain depends only on the ports in [`ports`]; adapters live in
//! `crate::inbound` and `crate::outbound`.
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - User, Role, Identity: who is calling and what they may do.
//! - Course, Lesson: the catalogue aggregates.
//! - MediaKind, MediaType, BlobReference: upload vocabulary.
//! - IdentityService, CourseService, LessonService, UploadService: use-cases
//!   implementing the driving ports.

pub mod access;
pub mod auth;
pub mod course;
pub mod course_service;
pub mod error;
pub mod identity_service;
pub mod lesson;
pub mod lesson_service;
pub mod media;
pub mod ports;
pub mod trace_id;
pub mod upload_service;
pub mod user;

pub use self::access::{Identity, RolePolicy, ensure_owner};
pub use self::auth::{
    AccessToken, AuthSession, CredentialValidationError, LoginCredentials, PasswordHash,
    Registration,
};
pub use self::course::{
    Course, CourseDetail, CourseDraft, CourseId, CourseValidationError, EnrollmentError,
    PublishedCourse,
};
pub use self::course_service::CourseService;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::identity_service::IdentityService;
pub use self::lesson::{Lesson, LessonDraft, LessonId, LessonValidationError, sort_by_order};
pub use self::lesson_service::LessonService;
pub use self::media::{
    BlobReference, MAX_UPLOAD_BYTES, MediaKind, MediaType, blob_name, content_type_for,
    is_safe_blob_name, random_suffix,
};
pub use self::trace_id::TraceId;
pub use self::upload_service::UploadService;
pub use self::user::{
    DisplayName, EmailAddress, Role, User, UserId, UserSummary, UserValidationError,
};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use skillforge::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("Access denied"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
