//! Port for minting and verifying bearer tokens.
use chrono::{DateTime, Utc};

use crate::domain::{AccessToken, Role, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by token adapters.
    pub enum TokenError {
        /// The token could not be decoded.
        Malformed => "token is malformed" as Unauthorized,
        /// The token's expiry has passed.
        Expired => "token has expired" as Unauthorized,
        /// The signature does not match the signing key.
        InvalidSignature => "token signature is invalid" as Unauthorized,
        /// A token could not be produced.
        Signing { message: String } => "token signing failed: {message}" as InternalError,
    }
}

/// Verified token contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub subject: UserId,
    /// Role at issue time. Resolution trusts the stored user instead.
    pub role: Role,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

#[cfg_attr(test, mockall::automock)]
pub trait TokenIssuer: Send + Sync {
    /// Mint a signed token for `subject`.
    fn issue(&self, subject: &UserId, role: Role) -> Result<AccessToken, TokenError>;

    /// Verify signature and expiry and return the claims.
    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError>;
}
