//! Credential and identity service.
//!
//! Implements registration, login, and token resolution over the user
//! repository, the password hasher, and the token issuer. It is the only
//! component that sees credential hashes.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::{debug, info};

use crate::domain::ports::{
    LoginService, PasswordHasher, RegistrationService, TokenIssuer, TokenResolver,
    UserPersistenceError, UserRepository,
};
use crate::domain::{
    AuthSession, Error, Identity, LoginCredentials, PasswordHash, Registration, User, UserId,
};

const INVALID_CREDENTIALS: &str = "invalid credentials";
const EMAIL_TAKEN: &str = "Email already registered";

/// Well-formed Argon2id hash that no password matches. Unknown emails are
/// verified against it so both login failures cost one hash computation.
pub(crate) const UNKNOWN_ACCOUNT_HASH: &str = "$argon2id$v=19$m=19456,t=2,p=1$c2tpbGxmb3JnZS1kdW1teQ$AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8";

/// Identity service implementing the registration, login, and token
/// resolution driving ports.
#[derive(Clone)]
pub struct IdentityService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
    clock: Arc<dyn Clock>,
}

impl<U, H, T> IdentityService<U, H, T> {
    /// Wire the service over the user store and credential adapters.
    #[must_use]
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>, clock: Arc<dyn Clock>) -> Self {
        Self {
            users,
            hasher,
            tokens,
            clock,
        }
    }
}

impl<U, H, T> IdentityService<U, H, T>
where
    T: TokenIssuer,
{
    fn open_session(&self, user: &User) -> Result<AuthSession, Error> {
        let token = self.tokens.issue(&user.id, user.role)?;
        Ok(AuthSession {
            token,
            user: user.summary(),
        })
    }
}

fn email_taken() -> Error {
    Error::invalid_request(EMAIL_TAKEN).with_details(json!({
        "field": "email",
        "code": "duplicate",
    }))
}

fn map_insert_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict(EMAIL_TAKEN),
        other => other.into(),
    }
}

#[async_trait]
impl<U, H, T> RegistrationService for IdentityService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn register(&self, registration: &Registration) -> Result<AuthSession, Error> {
        if self.users.find_by_email(registration.email()).await?.is_some() {
            debug!("registration rejected: email already registered");
            return Err(email_taken());
        }

        let password_hash = self.hasher.hash(registration.password()).await?;
        let now = self.clock.utc();
        let user = User {
            id: UserId::random(),
            display_name: registration.name().clone(),
            email: registration.email().clone(),
            role: registration.role(),
            password_hash,
            created_at: now,
            updated_at: now,
        };
        self.users.insert(&user).await.map_err(map_insert_error)?;
        info!(user_id = %user.id, role = %user.role, "user registered");
        self.open_session(&user)
    }
}

#[async_trait]
impl<U, H, T> LoginService for IdentityService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, Error> {
        let Some(user) = self.users.find_by_email(credentials.email()).await? else {
            let decoy = PasswordHash::new(UNKNOWN_ACCOUNT_HASH);
            if let Err(err) = self.hasher.verify(credentials.password(), &decoy).await {
                debug!(error = %err, "decoy credential check failed");
            }
            debug!("login rejected: unknown email");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };
        if !self
            .hasher
            .verify(credentials.password(), &user.password_hash)
            .await?
        {
            debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }
        self.open_session(&user)
    }
}

#[async_trait]
impl<U, H, T> TokenResolver for IdentityService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher,
    T: TokenIssuer,
{
    async fn resolve(&self, token: &str) -> Result<Identity, Error> {
        let claims = self.tokens.verify(token).map_err(|err| {
            debug!(reason = %err, "bearer token rejected");
            Error::unauthorized("Not authorized, token invalid")
        })?;
        let Some(user) = self.users.find_by_id(&claims.subject).await? else {
            debug!(user_id = %claims.subject, "bearer token subject no longer exists");
            return Err(Error::unauthorized("Not authorized, user not found"));
        };
        Ok(Identity::new(user.id, user.role))
    }
}
