//! Authorization chain for HTTP handlers.
//!
//! The identity step is an extractor, so a handler that names
//! [`Authenticated`] in its signature never runs for an anonymous caller. The
//! role and ownership steps are plain calls the handler makes in order; each
//! returns the first failure and performs no writes.

use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, dev::Payload, web};
use futures_util::future::LocalBoxFuture;

use crate::domain::{CourseId, Error, Identity, RolePolicy, ensure_owner};

use super::state::HttpState;

const BEARER_PREFIX: &str = "Bearer ";

/// Caller identity resolved from an `Authorization: Bearer` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authenticated(pub Identity);

impl Authenticated {
    /// Role step: keep the identity only when `policy` admits it.
    pub fn require(self, policy: RolePolicy) -> Result<Identity, Error> {
        policy.check(&self.0)?;
        Ok(self.0)
    }

    pub fn identity(&self) -> &Identity {
        &self.0
    }
}

fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(BEARER_PREFIX)?.trim();
    (!token.is_empty()).then(|| token.to_owned())
}

impl FromRequest for Authenticated {
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        Box::pin(async move {
            let Some(token) = token else {
                return Err(Error::unauthorized("Not authorized, token missing"));
            };
            let state =
                state.ok_or_else(|| Error::internal("HTTP state is not registered"))?;
            state.tokens.resolve(&token).await.map(Self)
        })
    }
}

/// Ownership step: load the course owner and compare it to `identity`.
///
/// An absent course surfaces as `NotFound` before ownership is considered.
pub async fn require_course_owner(
    state: &HttpState,
    course_id: &CourseId,
    identity: &Identity,
) -> Result<(), Error> {
    let owner = state.courses_query.course_owner(course_id).await?;
    ensure_owner(&owner, identity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, Role, UserId};
    use crate::inbound::http::test_utils::{MockPorts, TOKEN};
    use actix_web::test::TestRequest;
    use rstest::rstest;

    async fn extract(req: TestRequest, ports: MockPorts) -> Result<Authenticated, Error> {
        let (req, mut payload) = req.app_data(ports.into_state()).to_http_parts();
        Authenticated::from_request(&req, &mut payload).await
    }

    #[rstest]
    #[case(None)]
    #[case(Some("Basic dXNlcjpwYXNz"))]
    #[case(Some("Bearer "))]
    #[case(Some("bearer test-token"))]
    #[actix_web::test]
    async fn missing_or_foreign_schemes_are_unauthenticated(#[case] header: Option<&str>) {
        let mut req = TestRequest::default();
        if let Some(value) = header {
            req = req.insert_header((header::AUTHORIZATION, value));
        }
        let err = extract(req, MockPorts::default())
            .await
            .expect_err("anonymous caller rejected");
        assert_eq!(err.code(), ErrorCode::Unauthorized);
        assert_eq!(err.message(), "Not authorized, token missing");
    }

    #[rstest]
    #[actix_web::test]
    async fn valid_token_yields_identity() {
        let (ports, identity) = MockPorts::signed_in(Role::Educator);
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, format!("Bearer {TOKEN}")));
        let extracted = extract(req, ports).await.expect("resolved");
        assert_eq!(extracted.identity(), &identity);
    }

    #[rstest]
    #[actix_web::test]
    async fn resolver_failures_pass_through() {
        let req = TestRequest::default()
            .insert_header((header::AUTHORIZATION, "Bearer forged"));
        let err = extract(req, MockPorts::rejecting_tokens())
            .await
            .expect_err("forged token rejected");
        assert_eq!(err.message(), "Not authorized, token invalid");
    }

    #[rstest]
    fn role_step_rejects_students_from_educator_routes() {
        let student = Authenticated(Identity::new(UserId::random(), Role::Student));
        let err = student.require(RolePolicy::EDUCATOR).expect_err("forbidden");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(err.message(), "Access denied");
    }

    #[rstest]
    #[actix_web::test]
    async fn ownership_step_reports_missing_course_before_ownership() {
        let mut ports = MockPorts::default();
        ports
            .courses_query
            .expect_course_owner()
            .returning(|_| Err(Error::not_found("Course not found")));
        let state = ports.into_state();
        let identity = Identity::new(UserId::random(), Role::Educator);

        let err = require_course_owner(&state, &CourseId::random(), &identity)
            .await
            .expect_err("missing course");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    #[actix_web::test]
    async fn ownership_step_rejects_other_educators() {
        let owner = UserId::random();
        let mut ports = MockPorts::default();
        ports
            .courses_query
            .expect_course_owner()
            .returning(move |_| Ok(owner));
        let state = ports.into_state();
        let stranger = Identity::new(UserId::random(), Role::Educator);

        let err = require_course_owner(&state, &CourseId::random(), &stranger)
            .await
            .expect_err("stranger rejected");
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert_eq!(err.message(), "Not authorized");

        let me = Identity::new(owner, Role::Educator);
        assert!(require_course_owner(&state, &CourseId::random(), &me).await.is_ok());
    }
}
