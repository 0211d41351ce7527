//! Shared helpers for backend integration tests.
//!
//! Integration tests compile as separate crates, so this module wires the
//! in-memory adapters into a full [`HttpState`] and offers small request
//! helpers for driving the HTTP surface with `actix_web::test`.

#![allow(dead_code, reason = "each test crate uses a different subset")]

pub mod embedded_postgres;

use std::sync::Arc;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::middleware::Compat;
use actix_web::{App, test, web};
use mockable::{Clock, DefaultClock};
use serde_json::{Value, json};
use skillforge::Trace;
use skillforge::domain::{CourseService, IdentityService, LessonService, UploadService};
use skillforge::inbound::http::configure;
use skillforge::inbound::http::health::HealthState;
use skillforge::inbound::http::state::{HttpState, HttpStatePorts};
use skillforge::middleware::CorsPolicy;
use skillforge::outbound::memory::MemoryDocumentStore;
use skillforge::outbound::security::{Argon2PasswordHasher, JwtTokenIssuer, TokenKey};
use skillforge::outbound::storage::CapStdBlobStore;
use tempfile::TempDir;
use uuid::Uuid;

/// A fully wired application backed by the in-memory document store.
pub struct World {
    pub state: web::Data<HttpState>,
    pub health: web::Data<HealthState>,
    _uploads: TempDir,
}

impl World {
    pub fn new() -> Self {
        let uploads = tempfile::tempdir().expect("upload tempdir");
        let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
        let store = Arc::new(MemoryDocumentStore::new());
        let hasher = Arc::new(Argon2PasswordHasher::new());
        let tokens = Arc::new(JwtTokenIssuer::new(
            &TokenKey::ephemeral(),
            chrono::Duration::hours(1),
            clock.clone(),
        ));
        let blobs = Arc::new(CapStdBlobStore::open(uploads.path()).expect("open blob store"));

        let identity = Arc::new(IdentityService::new(
            store.clone(),
            hasher,
            tokens,
            clock.clone(),
        ));
        let courses = Arc::new(CourseService::new(
            store.clone(),
            store.clone(),
            store.clone(),
            clock.clone(),
        ));
        let lessons = Arc::new(LessonService::new(store.clone(), store, clock.clone()));
        let media = Arc::new(UploadService::new(blobs, clock));

        let state = HttpState::new(HttpStatePorts {
            registration: identity.clone(),
            login: identity.clone(),
            tokens: identity,
            courses: courses.clone(),
            courses_query: courses,
            lessons: lessons.clone(),
            lessons_query: lessons,
            uploads: media,
        });
        let health = HealthState::new();
        health.mark_ready();

        Self {
            state: web::Data::new(state),
            health: web::Data::new(health),
            _uploads: uploads,
        }
    }

    /// Application factory mirroring the production middleware stack.
    pub fn app(
        &self,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        > + use<>,
    > {
        App::new()
            .app_data(self.state.clone())
            .app_data(self.health.clone())
            .wrap(Compat::new(CorsPolicy::AnyOrigin.middleware()))
            .wrap(Trace)
            .configure(configure)
    }
}

/// A signed-in caller.
pub struct Session {
    pub token: String,
    pub user_id: String,
}

/// Build a JSON request, optionally carrying a bearer token.
pub fn json_request(
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> test::TestRequest {
    let mut request = match method {
        "GET" => test::TestRequest::get(),
        "POST" => test::TestRequest::post(),
        "PATCH" => test::TestRequest::patch(),
        other => panic!("unsupported method {other}"),
    }
    .uri(uri);
    if let Some(token) = token {
        request = request.insert_header((header::AUTHORIZATION, format!("Bearer {token}")));
    }
    if let Some(body) = body {
        request = request.set_json(body);
    }
    request
}

/// Send a request and decode the JSON envelope.
pub async fn send<S, B>(app: &S, request: test::TestRequest) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let response = test::call_service(app, request.to_request()).await;
    let status = response.status();
    (status, test::read_body_json(response).await)
}

/// Register a fresh account with a unique email and return its session.
pub async fn register<S, B>(app: &S, name: &str, role: &str) -> Session
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let email = format!("{}@example.com", Uuid::new_v4().simple());
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/auth/register",
            None,
            Some(json!({
                "name": name,
                "email": email,
                "password": "correct horse battery staple",
                "role": role,
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "registration failed: {body}");
    Session {
        token: body["data"]["token"]
            .as_str()
            .expect("token in session")
            .to_owned(),
        user_id: body["data"]["user"]["id"]
            .as_str()
            .expect("user id in session")
            .to_owned(),
    }
}

/// Create a draft course owned by `educator` and return its id.
pub async fn create_course<S, B>(app: &S, educator: &Session, title: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/api/courses",
            Some(&educator.token),
            Some(json!({
                "title": title,
                "description": "An introduction",
                "thumbnail": "/uploads/thumbnails/x.png",
            })),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "course creation failed: {body}");
    body["data"]["id"].as_str().expect("course id").to_owned()
}

/// Add a lesson and return the response status and envelope.
pub async fn add_lesson<S, B>(
    app: &S,
    caller: &Session,
    course_id: &str,
    title: &str,
    order: i32,
) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    send(
        app,
        json_request(
            "POST",
            &format!("/api/lessons/{course_id}"),
            Some(&caller.token),
            Some(json!({
                "title": title,
                "videoUrl": format!("/uploads/videos/{title}.mp4"),
                "order": order,
                "duration": 120,
            })),
        ),
    )
    .await
}

/// Publish `course_id` as `caller`.
pub async fn publish<S, B>(app: &S, caller: &Session, course_id: &str) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    send(
        app,
        json_request(
            "PATCH",
            &format!("/api/courses/{course_id}/publish"),
            Some(&caller.token),
            None,
        ),
    )
    .await
}

/// Titles of a JSON array of lessons, in response order.
pub fn lesson_titles(lessons: &Value) -> Vec<String> {
    lessons
        .as_array()
        .expect("lesson array")
        .iter()
        .map(|lesson| lesson["title"].as_str().expect("lesson title").to_owned())
        .collect()
}
