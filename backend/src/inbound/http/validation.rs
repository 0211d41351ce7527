//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain constructors decide what is missing or malformed; these helpers
//! only turn their typed failures into `invalid_request` envelopes with a
//! stable `details` shape: `{ "field": .., "code": .. }`.

use serde_json::json;

use crate::domain::{
    CourseId, CourseValidationError, CredentialValidationError, Error, LessonValidationError,
};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidField,
    InvalidUuid,
    NegativeDuration,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidField => "invalid_field",
            Self::InvalidUuid => "invalid_uuid",
            Self::NegativeDuration => "negative_duration",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(message: impl Into<String>, field: &str, code: ErrorCode) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field,
        "code": code.as_str(),
    }))
}

/// Parse a path segment naming a course.
pub(crate) fn parse_course_id(value: &str, field: FieldName) -> Result<CourseId, Error> {
    CourseId::parse(value).map_err(|_| {
        Error::invalid_request("Invalid ID format").with_details(json!({
            "field": field.as_str(),
            "value": value,
            "code": ErrorCode::InvalidUuid.as_str(),
        }))
    })
}

pub(crate) fn course_validation_error(err: &CourseValidationError) -> Error {
    match err {
        CourseValidationError::MissingField { field } => {
            field_error("All fields are required", field, ErrorCode::MissingField)
        }
    }
}

pub(crate) fn lesson_validation_error(err: &LessonValidationError) -> Error {
    match err {
        LessonValidationError::MissingField { field } => {
            field_error("Required fields missing", field, ErrorCode::MissingField)
        }
        LessonValidationError::NegativeDuration => field_error(
            "Duration must not be negative",
            err.field(),
            ErrorCode::NegativeDuration,
        ),
    }
}

pub(crate) fn credential_validation_error(err: &CredentialValidationError) -> Error {
    match err {
        CredentialValidationError::MissingField { field } => {
            field_error("All fields are required", field, ErrorCode::MissingField)
        }
        CredentialValidationError::InvalidField { field, source } => {
            field_error(source.to_string(), field, ErrorCode::InvalidField)
        }
    }
}
