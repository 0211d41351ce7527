//! Multipart uploads stored on disk and served back under `/uploads`.

use actix_web::http::{StatusCode, header};
use actix_web::test;
use rstest::{fixture, rstest};

mod support;

use support::{Session, World, register, send};

const BOUNDARY: &str = "skillforge-upload-boundary";

#[fixture]
fn world() -> World {
    World::new()
}

struct Part<'a> {
    field: &'a str,
    filename: &'a str,
    mime: &'a str,
    body: &'a [u8],
}

fn multipart(session: &Session, uri: &str, part: Part<'_>) -> test::TestRequest {
    let Part {
        field,
        filename,
        mime,
        body,
    } = part;
    let mut payload = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; \
         filename=\"{filename}\"\r\nContent-Type: {mime}\r\n\r\n"
    )
    .into_bytes();
    payload.extend_from_slice(body);
    payload.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());

    test::TestRequest::post()
        .uri(uri)
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", session.token)))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        ))
        .set_payload(payload)
}

#[rstest]
#[actix_web::test]
async fn uploaded_thumbnail_is_served_back(world: World) {
    let app = test::init_service(world.app()).await;
    let educator = register(&app, "Ada Lovelace", "educator").await;

    let (status, body) = send(
        &app,
        multipart(
            &educator,
            "/api/courses/upload-thumbnail",
            Part {
                field: "thumbnail",
                filename: "cover.png",
                mime: "image/png",
                body: b"\x89PNG fake image",
            },
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "upload failed: {body}");
    let reference = body["data"]["thumbnail"]
        .as_str()
        .expect("thumbnail reference")
        .to_owned();
    assert!(reference.starts_with("/uploads/thumbnails/"));
    assert!(reference.ends_with(".png"));

    let response =
        test::call_service(&app, test::TestRequest::get().uri(&reference).to_request()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok()),
        Some("image/png")
    );
    let bytes = test::read_body(response).await;
    assert_eq!(bytes.as_ref(), b"\x89PNG fake image");
}

#[rstest]
#[actix_web::test]
async fn uploaded_video_supports_seeking(world: World) {
    let app = test::init_service(world.app()).await;
    let educator = register(&app, "Ada Lovelace", "educator").await;

    let (status, body) = send(
        &app,
        multipart(
            &educator,
            "/api/lessons/upload-video",
            Part {
                field: "video",
                filename: "intro.mp4",
                mime: "video/mp4",
                body: b"0123456789",
            },
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "upload failed: {body}");
    let reference = body["data"]["videoUrl"]
        .as_str()
        .expect("video reference")
        .to_owned();

    let request = test::TestRequest::get()
        .uri(&reference)
        .insert_header((header::RANGE, "bytes=4-"))
        .to_request();
    let response = test::call_service(&app, request).await;
    assert_eq!(response.status(), StatusCode::PARTIAL_CONTENT);
    assert_eq!(
        response
            .headers()
            .get(header::ACCEPT_RANGES)
            .and_then(|value| value.to_str().ok()),
        Some("bytes")
    );
    let bytes = test::read_body(response).await;
    assert_eq!(bytes.as_ref(), b"456789");
}

#[rstest]
#[actix_web::test]
async fn video_upload_rejects_images(world: World) {
    let app = test::init_service(world.app()).await;
    let educator = register(&app, "Ada Lovelace", "educator").await;

    let (status, body) = send(
        &app,
        multipart(
            &educator,
            "/api/lessons/upload-video",
            Part {
                field: "video",
                filename: "still.png",
                mime: "image/png",
                body: b"not a video",
            },
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "unsupported_media_type");
}

#[rstest]
#[actix_web::test]
async fn students_cannot_upload(world: World) {
    let app = test::init_service(world.app()).await;
    let student = register(&app, "Grace Hopper", "student").await;

    let (status, _) = send(
        &app,
        multipart(
            &student,
            "/api/lessons/upload-video",
            Part {
                field: "video",
                filename: "clip.mp4",
                mime: "video/mp4",
                body: b"mp4",
            },
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[rstest]
#[case::unknown_kind("/uploads/documents/1-1.pdf")]
#[case::missing_blob("/uploads/videos/1-1.mp4")]
#[actix_web::test]
async fn unknown_uploads_are_not_found(#[case] uri: &str, world: World) {
    let app = test::init_service(world.app()).await;

    let (status, body) = send(&app, test::TestRequest::get().uri(uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "not_found");
}
