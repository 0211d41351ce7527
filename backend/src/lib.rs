//! SkillForge backend library: course catalogue, lessons, enrollment and
//! media uploads behind a hexagonal boundary.
//!
//! - [`domain`]: entities, services, and ports.
//! - [`inbound`]: actix-web adapters driving the domain.
//! - [`outbound`]: persistence, security, and storage adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
