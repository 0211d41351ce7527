//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error type HTTP-agnostic while allowing Actix
//! handlers to turn domain failures into consistent JSON envelopes and status
//! codes. This is the only place an [`ErrorCode`] becomes a status.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode, web};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::{debug, error};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

const INTERNAL_MESSAGE: &str = "Internal server error";

static EXPOSE_INTERNAL_CAUSES: AtomicBool = AtomicBool::new(false);

/// Keep the original message of internal errors under `details.cause`.
///
/// Set once at startup from the `development` setting.
pub fn expose_internal_causes(enabled: bool) {
    EXPOSE_INTERNAL_CAUSES.store(enabled, Ordering::Relaxed);
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::UnsupportedMediaType => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error, expose_cause: bool) -> Error {
    if !matches!(error.code(), ErrorCode::InternalError) {
        return error.clone();
    }
    error!(message = error.message(), trace_id = ?error.trace_id(), "internal error");
    let mut redacted = Error::internal(INTERNAL_MESSAGE);
    if let Some(id) = error.trace_id() {
        redacted = redacted.with_trace_id(id.to_owned());
    }
    if expose_cause {
        redacted = redacted.with_details(json!({ "cause": error.message() }));
    }
    redacted
}

/// Wire shape of a failed response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ErrorEnvelope<'a> {
    success: bool,
    code: ErrorCode,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    trace_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a Value>,
}

impl<'a> From<&'a Error> for ErrorEnvelope<'a> {
    fn from(error: &'a Error) -> Self {
        Self {
            success: false,
            code: error.code(),
            message: error.message(),
            trace_id: error.trace_id(),
            details: error.details(),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }

        let presented =
            redact_if_internal(self, EXPOSE_INTERNAL_CAUSES.load(Ordering::Relaxed));
        builder.json(ErrorEnvelope::from(&presented))
    }
}

fn invalid_body() -> Error {
    Error::invalid_request("Invalid request body").with_details(json!({ "code": "invalid_json" }))
}

/// JSON extractor configuration reporting malformed bodies as
/// `invalid_request` envelopes.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        debug!(error = %err, "rejected JSON body");
        invalid_body().into()
    })
}

/// Unwrap a JSON body extracted as `Result<web::Json<T>, _>`.
///
/// Handlers behind the authorization chain take the body this way and call
/// this only after the role and ownership steps, so a malformed body never
/// outranks `Forbidden`.
pub(crate) fn json_body<T>(payload: Result<web::Json<T>, actix_web::Error>) -> Result<T, Error> {
    payload
        .map(web::Json::into_inner)
        .map_err(|err| err.as_error::<Error>().cloned().unwrap_or_else(invalid_body))
}
