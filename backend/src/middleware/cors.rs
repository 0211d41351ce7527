//! Cross-origin resource sharing for browser clients.
//!
//! The web client is usually served from a different origin than the API, so
//! every route answers preflight requests. Without configuration any origin
//! is admitted.

use actix_cors::Cors;
use actix_web::http::Uri;

use crate::domain::TRACE_ID_HEADER;

const PREFLIGHT_MAX_AGE_SECS: usize = 60 * 60;

/// An origin that is not an absolute `scheme://host[:port]` URL.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CORS origin: {origin}")]
pub struct InvalidOrigin {
    pub origin: String,
}

/// Which browser origins may call the API.
///
/// # Examples
/// ```
/// use skillforge::middleware::CorsPolicy;
///
/// assert_eq!(CorsPolicy::parse("*").unwrap(), CorsPolicy::AnyOrigin);
/// assert_eq!(
///     CorsPolicy::parse("https://app.example.com, http://localhost:5173").unwrap(),
///     CorsPolicy::Origins(vec![
///         "https://app.example.com".to_owned(),
///         "http://localhost:5173".to_owned(),
///     ]),
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin, answered with a wildcard.
    #[default]
    AnyOrigin,
    /// Only the listed origins.
    Origins(Vec<String>),
}

impl CorsPolicy {
    /// Parse a comma-separated origin list. Blank input or a `*` entry admits
    /// any origin.
    ///
    /// # Errors
    /// Returns [`InvalidOrigin`] for the first entry that is not an absolute
    /// origin URL.
    pub fn parse(raw: &str) -> Result<Self, InvalidOrigin> {
        let entries: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect();
        if entries.is_empty() || entries.contains(&"*") {
            return Ok(Self::AnyOrigin);
        }
        entries
            .into_iter()
            .map(normalise_origin)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Origins)
    }

    /// Build the actix middleware enforcing this policy.
    #[must_use]
    pub fn middleware(&self) -> Cors {
        let cors = Cors::default()
            .allow_any_method()
            .allow_any_header()
            .expose_headers([TRACE_ID_HEADER])
            .max_age(PREFLIGHT_MAX_AGE_SECS);
        match self {
            Self::AnyOrigin => cors.allow_any_origin().send_wildcard(),
            Self::Origins(origins) => origins
                .iter()
                .fold(cors, |cors, origin| cors.allowed_origin(origin)),
        }
    }
}

fn normalise_origin(entry: &str) -> Result<String, InvalidOrigin> {
    let invalid = || InvalidOrigin {
        origin: entry.to_owned(),
    };
    let trimmed = entry.trim_end_matches('/');
    let uri: Uri = trimmed.parse().map_err(|_| invalid())?;
    let bare = uri
        .path_and_query()
        .is_none_or(|path| path.as_str().is_empty() || path.as_str() == "/");
    if uri.scheme().is_none() || uri.host().is_none() || !bare {
        return Err(invalid());
    }
    Ok(trimmed.to_owned())
}
