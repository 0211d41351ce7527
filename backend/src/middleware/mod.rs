//! Request middleware.

pub mod cors;
pub mod trace;

pub use cors::{CorsPolicy, InvalidOrigin};
pub use trace::Trace;
