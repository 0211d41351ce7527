//! HS256 JWT implementation of the [`TokenIssuer`] port.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ports::{TokenClaims, TokenError, TokenIssuer};
use crate::domain::{AccessToken, Role, UserId};

use super::token_config::TokenKey;

/// Claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    sub: String,
    role: Role,
    iat: i64,
    exp: i64,
    jti: String,
}

/// Signs and verifies HS256 bearer tokens.
///
/// Expiry is checked against the injected clock rather than the library's
/// wall-clock check, so tests can pin time.
pub struct JwtTokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl JwtTokenIssuer {
    pub fn new(key: &TokenKey, ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        Self {
            encoding: EncodingKey::from_secret(key.as_bytes()),
            decoding: DecodingKey::from_secret(key.as_bytes()),
            ttl,
            clock,
        }
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["sub", "exp", "iat"]);
        validation
    }
}

fn timestamp(seconds: i64) -> Result<DateTime<Utc>, TokenError> {
    DateTime::from_timestamp(seconds, 0).ok_or_else(TokenError::malformed)
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, subject: &UserId, role: Role) -> Result<AccessToken, TokenError> {
        let now = self.clock.utc();
        let claims = AccessClaims {
            sub: subject.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| TokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims = jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &Self::validation())
            .map(|data| data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::InvalidSignature => TokenError::invalid_signature(),
                ErrorKind::ExpiredSignature => TokenError::expired(),
                _ => TokenError::malformed(),
            })?;

        if claims.exp <= self.clock.utc().timestamp() {
            return Err(TokenError::expired());
        }
        let subject = UserId::new(&claims.sub).map_err(|_| TokenError::malformed())?;
        Ok(TokenClaims {
            subject,
            role: claims.role,
            issued_at: timestamp(claims.iat)?,
            expires_at: timestamp(claims.exp)?,
        })
    }
}
