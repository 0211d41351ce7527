//! Argon2id implementation of the [`PasswordHasher`] port.
//!
//! Hashing is CPU-bound, so both operations run on the blocking pool with the
//! request's trace id carried across.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{self, SaltString};
use argon2::{Argon2, PasswordHasher as _, PasswordVerifier as _};
use async_trait::async_trait;
use zeroize::Zeroizing;

use crate::domain::ports::{PasswordHasher, PasswordHasherError};
use crate::domain::{PasswordHash, TraceId};

/// Argon2id hasher with the crate's default parameters.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    pub const fn new() -> Self {
        Self
    }
}

fn join_failure(error: tokio::task::JoinError) -> PasswordHasherError {
    PasswordHasherError::hashing(format!("blocking task failed: {error}"))
}

#[async_trait]
impl PasswordHasher for Argon2PasswordHasher {
    async fn hash(&self, password: &str) -> Result<PasswordHash, PasswordHasherError> {
        let secret = Zeroizing::new(password.to_owned());
        TraceId::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(secret.as_bytes(), &salt)
                .map(|phc| PasswordHash::new(phc.to_string()))
                .map_err(|err| PasswordHasherError::hashing(err.to_string()))
        })
        .await
        .map_err(join_failure)?
    }

    async fn verify(
        &self,
        password: &str,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHasherError> {
        let secret = Zeroizing::new(password.to_owned());
        let stored = hash.as_str().to_owned();
        TraceId::spawn_blocking(move || {
            let parsed = argon2::PasswordHash::new(&stored)
                .map_err(|err| PasswordHasherError::malformed_hash(err.to_string()))?;
            match Argon2::default().verify_password(secret.as_bytes(), &parsed) {
                Ok(()) => Ok(true),
                Err(password_hash::Error::Password) => Ok(false),
                Err(err) => Err(PasswordHasherError::hashing(err.to_string())),
            }
        })
        .await
        .map_err(join_failure)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn hashes_are_argon2id_and_verify() {
        let hasher = Argon2PasswordHasher::new();
        let hash = hasher.hash("correct horse").await.expect("hash");
        assert!(hash.as_str().starts_with("$argon2id$"));
        assert!(hasher.verify("correct horse", &hash).await.expect("verify"));
        assert!(!hasher.verify("wrong horse", &hash).await.expect("verify"));
    }

    #[rstest]
    #[tokio::test]
    async fn salts_differ_between_hashes() {
        let hasher = Argon2PasswordHasher::new();
        let first = hasher.hash("same").await.expect("hash");
        let second = hasher.hash("same").await.expect("hash");
        assert_ne!(first.as_str(), second.as_str());
    }

    #[rstest]
    #[tokio::test]
    async fn malformed_hash_is_an_error() {
        let err = Argon2PasswordHasher::new()
            .verify("pw", &PasswordHash::new("not-a-hash"))
            .await
            .expect_err("malformed");
        assert!(matches!(err, PasswordHasherError::MalformedHash { .. }));
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_account_hash_parses_and_never_matches() {
        let decoy = PasswordHash::new(crate::domain::identity_service::UNKNOWN_ACCOUNT_HASH);
        let matched = Argon2PasswordHasher::new()
            .verify("correct horse", &decoy)
            .await
            .expect("decoy hash is well formed");
        assert!(!matched);
    }
}
