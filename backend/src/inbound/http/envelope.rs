//! Success envelope shared by every JSON endpoint.
//!
//! Failures are rendered by the `ResponseError` impl in `error.rs`; both
//! shapes carry a boolean `success` so clients branch on one field.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use serde::Serialize;

/// `{ "success": true, "data"?: .., "message"?: .. }`
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

impl Envelope<()> {
    pub fn message(message: &'static str) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message),
        }
    }
}

/// 200 with `data`.
pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    respond(StatusCode::OK, Envelope::data(data))
}

/// 201 with `data`.
pub fn created<T: Serialize>(data: T) -> HttpResponse {
    respond(StatusCode::CREATED, Envelope::data(data))
}

/// 200 with only a human-readable `message`.
pub fn acknowledged(message: &'static str) -> HttpResponse {
    respond(StatusCode::OK, Envelope::message(message))
}

fn respond<T: Serialize>(status: StatusCode, body: Envelope<T>) -> HttpResponse {
    HttpResponse::build(status).json(body)
}
