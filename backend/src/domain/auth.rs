//! Credential primitives for registration, login, and bearer tokens.
//!
//! Inbound adapters hand raw, optional strings to the constructors here; the
//! constructors decide what counts as missing or malformed so handlers never
//! duplicate those rules.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{DisplayName, EmailAddress, Role, UserSummary, UserValidationError};

/// Validation failures for registration and login payloads.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialValidationError {
    /// A required field was absent or blank.
    #[error("{field} is required")]
    MissingField { field: &'static str },
    /// A field was present but malformed.
    #[error("{field}: {source}")]
    InvalidField {
        field: &'static str,
        source: UserValidationError,
    },
}

impl CredentialValidationError {
    /// Name of the offending payload field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field } | Self::InvalidField { field, .. } => field,
        }
    }

    /// Machine-readable reason, suitable for error details.
    #[must_use]
    pub fn reason(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing",
            Self::InvalidField { .. } => "invalid",
        }
    }
}

fn required<'a>(
    field: &'static str,
    value: Option<&'a str>,
) -> Result<&'a str, CredentialValidationError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => Ok(raw),
        _ => Err(CredentialValidationError::MissingField { field }),
    }
}

fn invalid(field: &'static str) -> impl FnOnce(UserValidationError) -> CredentialValidationError {
    move |source| CredentialValidationError::InvalidField { field, source }
}

/// Validated registration request.
///
/// # Examples
/// ```
/// use skillforge::domain::{Registration, Role};
///
/// let reg = Registration::try_from_parts(
///     Some("Ada"),
///     Some("ADA@example.com"),
///     Some("hunter22"),
///     Some("educator"),
/// )
/// .unwrap();
/// assert_eq!(reg.email().as_ref(), "ada@example.com");
/// assert_eq!(reg.role(), Role::Educator);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: DisplayName,
    email: EmailAddress,
    password: Zeroizing<String>,
    role: Role,
}

impl Registration {
    /// Validate raw registration fields. All four are required.
    pub fn try_from_parts(
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
        role: Option<&str>,
    ) -> Result<Self, CredentialValidationError> {
        let name = required("name", name)?;
        let email = required("email", email)?;
        let password = required("password", password)?;
        let role = required("role", role)?;

        Ok(Self {
            name: DisplayName::new(name).map_err(invalid("name"))?,
            email: EmailAddress::new(email).map_err(invalid("email"))?,
            password: Zeroizing::new(password.to_owned()),
            role: role.trim().parse().map_err(invalid("role"))?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &DisplayName {
        &self.name
    }

    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Validated login credentials.
///
/// ## Invariants
/// - `email` is normalised the same way as at registration.
/// - `password` keeps caller-provided whitespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, CredentialValidationError> {
        let email = required("email", email)?;
        let password = match password {
            Some(raw) if !raw.is_empty() => raw,
            _ => return Err(CredentialValidationError::MissingField { field: "password" }),
        };
        Ok(Self {
            email: EmailAddress::new(email).map_err(invalid("email"))?,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Normalised email used for the user lookup.
    #[must_use]
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Opaque credential hash in PHC string format.
///
/// The `Debug` output is redacted so hashes never reach logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    #[must_use]
    pub fn new(phc: impl Into<String>) -> Self {
        Self(phc.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Signed bearer token handed to clients.
#[derive(Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// Result of a successful registration or login.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AuthSession {
    pub token: AccessToken,
    pub user: UserSummary,
}
