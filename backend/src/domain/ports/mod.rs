//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, hashing, tokens, blobs) are implemented in
//! `crate::outbound`. Driving ports are implemented by the domain services and
//! consumed by `crate::inbound`.

mod macros;
pub(crate) use macros::define_port_error;

mod blob_store;
mod course_command;
mod course_query;
mod course_repository;
mod lesson_command;
mod lesson_query;
mod lesson_repository;
mod login_service;
mod media_upload;
mod password_hasher;
mod registration_service;
mod token_issuer;
mod token_resolver;
mod user_repository;

#[cfg(test)]
pub use blob_store::MockBlobStore;
pub use blob_store::{BlobStore, BlobStoreError};
#[cfg(test)]
pub use course_command::MockCourseCommand;
pub use course_command::CourseCommand;
#[cfg(test)]
pub use course_query::MockCourseQuery;
pub use course_query::CourseQuery;
#[cfg(test)]
pub use course_repository::MockCourseRepository;
pub use course_repository::{CoursePersistenceError, CourseRepository, EnrollmentWrite};
#[cfg(test)]
pub use lesson_command::MockLessonCommand;
pub use lesson_command::LessonCommand;
#[cfg(test)]
pub use lesson_query::MockLessonQuery;
pub use lesson_query::LessonQuery;
#[cfg(test)]
pub use lesson_repository::MockLessonRepository;
pub use lesson_repository::{LessonPersistenceError, LessonRepository};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::LoginService;
#[cfg(test)]
pub use media_upload::MockMediaUpload;
pub use media_upload::{MediaUpload, UploadRequest};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHasher, PasswordHasherError};
#[cfg(test)]
pub use registration_service::MockRegistrationService;
pub use registration_service::RegistrationService;
#[cfg(test)]
pub use token_issuer::MockTokenIssuer;
pub use token_issuer::{TokenClaims, TokenError, TokenIssuer};
#[cfg(test)]
pub use token_resolver::MockTokenResolver;
pub use token_resolver::TokenResolver;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
