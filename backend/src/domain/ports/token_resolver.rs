//! Driving port used by the identity step of the authorization chain.
use async_trait::async_trait;

use crate::domain::{Error, Identity};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenResolver: Send + Sync {
    /// Resolve a raw bearer token to the caller's identity.
    ///
    /// The role is taken from the stored user, not from the token.
    async fn resolve(&self, token: &str) -> Result<Identity, Error>;
}
