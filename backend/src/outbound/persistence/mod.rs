//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` and `bb8` pooling.
//!
//! - Repository implementations only translate between Diesel rows and domain
//!   types. No business rules live here.
//! - Row structs (`models.rs`) and the schema (`schema.rs`) stay private to
//!   this module.
//! - Every database failure is classified once in `diesel_error_mapping` and
//!   then mapped to the port's error type.
//!
//! # Example
//!
//! ```ignore
//! use skillforge::outbound::persistence::{DbPool, DieselCourseRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/skillforge")).await?;
//! let courses = DieselCourseRepository::new(pool);
//! ```

mod diesel_course_repository;
mod diesel_error_mapping;
mod diesel_lesson_repository;
mod diesel_user_repository;
mod models;
mod pool;
mod schema;

pub use diesel_course_repository::DieselCourseRepository;
pub use diesel_lesson_repository::DieselLessonRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use pool::{DbPool, PoolConfig, PoolError, run_migrations};
