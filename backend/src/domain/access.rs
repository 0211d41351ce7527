//! Authorization primitives: the resolved caller identity and the role and
//! ownership checks applied to it.
//!
//! Each check is an independent function so a route can compose exactly the
//! steps it needs. Every check is read-only; a rejection never mutates state.

use serde::Serialize;

use super::{Error, Role, UserId};

/// Caller identity produced by resolving a bearer token.
///
/// Handlers receive this value from the identity step and pass it explicitly
/// into service calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub user_id: UserId,
    pub role: Role,
}

impl Identity {
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }
}

/// Set of roles a route admits.
///
/// # Examples
/// ```
/// use skillforge::domain::{Identity, Role, RolePolicy, UserId};
///
/// let student = Identity::new(UserId::random(), Role::Student);
/// assert!(RolePolicy::EDUCATOR.check(&student).is_err());
/// assert!(RolePolicy::ANY.check(&student).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePolicy {
    student: bool,
    educator: bool,
}

impl RolePolicy {
    /// Educators only.
    pub const EDUCATOR: Self = Self {
        student: false,
        educator: true,
    };
    /// Students only.
    pub const STUDENT: Self = Self {
        student: true,
        educator: false,
    };
    /// Any authenticated caller.
    pub const ANY: Self = Self {
        student: true,
        educator: true,
    };

    /// Whether `role` belongs to the allow-set.
    #[must_use]
    pub const fn admits(self, role: Role) -> bool {
        match role {
            Role::Student => self.student,
            Role::Educator => self.educator,
        }
    }

    /// Role step of the authorization chain.
    pub fn check(self, identity: &Identity) -> Result<(), Error> {
        if self.admits(identity.role) {
            return Ok(());
        }
        tracing::debug!(
            user_id = %identity.user_id,
            role = %identity.role,
            "role rejected by route policy"
        );
        Err(Error::forbidden("Access denied"))
    }
}

/// Ownership step of the authorization chain.
///
/// Callers load the resource first so that an absent resource surfaces as
/// `NotFound` before ownership is considered.
pub fn ensure_owner(owner: &UserId, identity: &Identity) -> Result<(), Error> {
    if *owner == identity.user_id {
        return Ok(());
    }
    tracing::debug!(
        user_id = %identity.user_id,
        owner_id = %owner,
        "ownership check rejected caller"
    );
    Err(Error::forbidden("Not authorized"))
}
