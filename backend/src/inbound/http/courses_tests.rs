//! Tests for course HTTP handlers.

use super::*;
use crate::domain::{Course, CourseId, Error, Role, UserId};
use crate::inbound::http::test_utils::{MockPorts, bearer, test_app};
use actix_web::http::{StatusCode, header};
use actix_web::test as actix_test;
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::{Value, json};

fn sample_course(owner: UserId) -> Course {
    let draft = CourseDraft::try_new(
        Some("Rust 101"),
        Some("Ownership and borrowing"),
        Some("/uploads/thumbnails/1-2.png"),
    )
    .expect("valid draft");
    let now = Utc
        .with_ymd_and_hms(2026, 1, 10, 9, 0, 0)
        .single()
        .expect("valid timestamp");
    Course::create(CourseId::random(), draft, owner, now)
}

async fn send(ports: MockPorts, request: actix_test::TestRequest) -> (StatusCode, Value) {
    let app = actix_test::init_service(test_app(ports.into_state())).await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body = actix_test::read_body_json(response).await;
    (status, body)
}

#[rstest]
#[actix_web::test]
async fn create_course_returns_created_course() {
    let (mut ports, identity) = MockPorts::signed_in(Role::Educator);
    ports
        .courses
        .expect_create_course()
        .withf(move |owner, draft| *owner == identity.user_id && draft.title() == "Rust 101")
        .times(1)
        .returning(|owner, _| Ok(sample_course(*owner)));

    let request = actix_test::TestRequest::post()
        .uri("/api/courses")
        .insert_header(bearer())
        .set_json(json!({
            "title": " Rust 101 ",
            "description": "Ownership and borrowing",
            "thumbnail": "/uploads/thumbnails/1-2.png",
        }));
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["isPublished"], false);
    assert_eq!(body["data"]["educatorId"], identity.user_id.to_string());
    assert_eq!(body["data"]["lessons"], json!([]));
}

#[rstest]
#[actix_web::test]
async fn create_course_requires_every_field() {
    let (ports, _) = MockPorts::signed_in(Role::Educator);
    let request = actix_test::TestRequest::post()
        .uri("/api/courses")
        .insert_header(bearer())
        .set_json(json!({"title": "Rust 101", "description": "   "}));
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");
    assert_eq!(body["details"]["field"], "description");
}

#[rstest]
#[actix_web::test]
async fn students_cannot_create_courses() {
    let (ports, _) = MockPorts::signed_in(Role::Student);
    let request = actix_test::TestRequest::post()
        .uri("/api/courses")
        .insert_header(bearer())
        .set_json(json!({"title": "t", "description": "d", "thumbnail": "x"}));
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied");
}

#[rstest]
#[case::truncated("{\"title\": ")]
#[case::wrong_type("{\"title\": 7, \"description\": [], \"thumbnail\": \"x\"}")]
#[actix_web::test]
async fn students_are_forbidden_before_the_body_is_decoded(#[case] payload: &'static str) {
    let (mut ports, _) = MockPorts::signed_in(Role::Student);
    ports.courses.expect_create_course().never();
    let request = actix_test::TestRequest::post()
        .uri("/api/courses")
        .insert_header(bearer())
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(payload);
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], "forbidden");
}

#[rstest]
#[actix_web::test]
async fn educators_with_malformed_bodies_get_invalid_json() {
    let (mut ports, _) = MockPorts::signed_in(Role::Educator);
    ports.courses.expect_create_course().never();
    let request = actix_test::TestRequest::post()
        .uri("/api/courses")
        .insert_header(bearer())
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{\"title\": ");
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
    assert_eq!(body["details"]["code"], "invalid_json");
}

#[rstest]
#[actix_web::test]
async fn anonymous_callers_are_rejected_before_any_port_runs() {
    let request = actix_test::TestRequest::get().uri("/api/courses");
    let (status, body) = send(MockPorts::default(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Not authorized, token missing");
}

#[rstest]
#[actix_web::test]
async fn educator_listing_is_not_captured_by_the_id_route() {
    let (mut ports, identity) = MockPorts::signed_in(Role::Educator);
    ports
        .courses_query
        .expect_list_by_owner()
        .withf(move |owner| *owner == identity.user_id)
        .times(1)
        .returning(|owner| Ok(vec![sample_course(*owner)]));

    let request = actix_test::TestRequest::get()
        .uri("/api/courses/educator")
        .insert_header(bearer());
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().map(Vec::len), Some(1));
}

#[rstest]
#[actix_web::test]
async fn publish_by_owner_acknowledges() {
    let (mut ports, identity) = MockPorts::signed_in(Role::Educator);
    let course = sample_course(identity.user_id);
    let course_id = course.id;
    ports
        .courses_query
        .expect_course_owner()
        .returning(move |_| Ok(identity.user_id));
    ports
        .courses
        .expect_publish()
        .withf(move |id, requester| *id == course_id && *requester == identity)
        .times(1)
        .returning(|_, _| Ok(()));

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/api/courses/{course_id}/publish"))
        .insert_header(bearer());
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true, "message": "Course published"}));
}

#[rstest]
#[actix_web::test]
async fn publish_by_another_educator_is_forbidden_without_writing() {
    let (mut ports, _) = MockPorts::signed_in(Role::Educator);
    let owner = UserId::random();
    ports
        .courses_query
        .expect_course_owner()
        .returning(move |_| Ok(owner));
    ports.courses.expect_publish().never();

    let request = actix_test::TestRequest::patch()
        .uri(&format!("/api/courses/{}/publish", CourseId::random()))
        .insert_header(bearer());
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Not authorized");
}

#[rstest]
#[case("/api/courses/64f0c0ffee0000000000beef/publish")]
#[case("/api/courses/not-an-id/publish")]
#[actix_web::test]
async fn malformed_course_ids_are_validation_errors(#[case] uri: &str) {
    let (ports, _) = MockPorts::signed_in(Role::Educator);
    let request = actix_test::TestRequest::patch()
        .uri(uri)
        .insert_header(bearer());
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid ID format");
    assert_eq!(body["details"]["field"], "courseId");
}

#[rstest]
#[actix_web::test]
async fn published_listing_is_for_students_only() {
    let (ports, _) = MockPorts::signed_in(Role::Educator);
    let request = actix_test::TestRequest::get()
        .uri("/api/courses")
        .insert_header(bearer());
    let (status, _) = send(ports, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[rstest]
#[case(Ok(()), StatusCode::OK)]
#[case(Err(Error::conflict("Already enrolled")), StatusCode::CONFLICT)]
#[case(Err(Error::not_found("Course not available")), StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn enroll_maps_service_outcomes(
    #[case] outcome: Result<(), Error>,
    #[case] expected: StatusCode,
) {
    let (mut ports, identity) = MockPorts::signed_in(Role::Student);
    ports
        .courses
        .expect_enroll()
        .withf(move |_, student| *student == identity.user_id)
        .times(1)
        .return_once(move |_, _| outcome);

    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/courses/{}/enroll", CourseId::random()))
        .insert_header(bearer());
    let (status, body) = send(ports, request).await;

    assert_eq!(status, expected);
    if status == StatusCode::OK {
        assert_eq!(body["message"], "Enrolled successfully");
    }
}

#[rstest]
#[actix_web::test]
async fn educators_cannot_enroll() {
    let (mut ports, _) = MockPorts::signed_in(Role::Educator);
    ports.courses.expect_enroll().never();
    let request = actix_test::TestRequest::post()
        .uri(&format!("/api/courses/{}/enroll", CourseId::random()))
        .insert_header(bearer());
    let (status, _) = send(ports, request).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[rstest]
#[case(Role::Student)]
#[case(Role::Educator)]
#[actix_web::test]
async fn course_detail_is_open_to_any_role(#[case] role: Role) {
    let (mut ports, _) = MockPorts::signed_in(role);
    ports
        .courses_query
        .expect_get_with_lessons()
        .returning(|_| Err(Error::not_found("Course not found")));

    let request = actix_test::TestRequest::get()
        .uri(&format!("/api/courses/{}", CourseId::random()))
        .insert_header(bearer());
    let (status, body) = send(ports, request).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Course not found");
}
