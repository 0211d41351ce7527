//! Shared classification of pool and Diesel failures.
//!
//! Repositories translate a [`StoreFailure`] into their own port error so the
//! logging and classification rules live in one place.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Coarse failure category shared by all Diesel repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum StoreFailure {
    /// The database could not be reached.
    Connection(String),
    /// A unique constraint rejected a write; carries the constraint name.
    UniqueViolation(Option<String>),
    /// Any other query failure.
    Query(String),
}

impl StoreFailure {
    /// Map into a repository error, given constructors for each category.
    ///
    /// Unique violations fall back to `query` unless the caller handles them.
    pub fn into_port_error<E>(
        self,
        connection: impl FnOnce(String) -> E,
        query: impl FnOnce(String) -> E,
    ) -> E {
        match self {
            Self::Connection(message) => connection(message),
            Self::UniqueViolation(constraint) => query(format!(
                "unique constraint violated: {}",
                constraint.as_deref().unwrap_or("unknown")
            )),
            Self::Query(message) => query(message),
        }
    }
}

impl From<PoolError> for StoreFailure {
    fn from(error: PoolError) -> Self {
        Self::Connection(error.into_message())
    }
}

impl From<DieselError> for StoreFailure {
    fn from(error: DieselError) -> Self {
        match &error {
            DieselError::DatabaseError(kind, info) => {
                debug!(?kind, message = info.message(), "diesel operation failed");
            }
            _ => debug!(
                error_type = %std::any::type_name_of_val(&error),
                "diesel operation failed"
            ),
        }

        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                Self::UniqueViolation(info.constraint_name().map(str::to_owned))
            }
            DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
                Self::Connection("database connection error".to_owned())
            }
            DieselError::NotFound => Self::Query("record not found".to_owned()),
            DieselError::QueryBuilderError(_) => Self::Query("database query error".to_owned()),
            _ => Self::Query("database error".to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for failure classification.
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn pool_errors_are_connection_failures() {
        let failure = StoreFailure::from(PoolError::checkout("timed out"));
        assert_eq!(failure, StoreFailure::Connection("timed out".to_owned()));
    }

    #[rstest]
    fn not_found_is_a_query_failure() {
        let failure = StoreFailure::from(DieselError::NotFound);
        assert_eq!(failure, StoreFailure::Query("record not found".to_owned()));
    }

    #[rstest]
    fn unhandled_unique_violation_becomes_query_error() {
        let mapped: String = StoreFailure::UniqueViolation(Some("users_email_key".to_owned()))
            .into_port_error(|m| format!("conn:{m}"), |m| format!("query:{m}"));
        assert_eq!(mapped, "query:unique constraint violated: users_email_key");
    }
}
