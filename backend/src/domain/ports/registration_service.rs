//! Driving port for account registration.
use async_trait::async_trait;

use crate::domain::{AuthSession, Error, Registration};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationService: Send + Sync {
    /// Create an account and return a token for it.
    async fn register(&self, registration: &Registration) -> Result<AuthSession, Error>;
}
