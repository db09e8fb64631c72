//! Integration tests for detail resolution against the JSON API strategy.

use chrono::{Datelike, Utc};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ghostarchive_source::config::Config;
use ghostarchive_source::error::SourceError;
use ghostarchive_source::source::GhostArchiveSource;

const VIDEO_ID: &str = "dQw4w9WgXcQ";
const WATCH_URL: &str = "https://www.youtube.com/watch?v=dQw4w9WgXcQ";

fn enable(server: &MockServer) -> GhostArchiveSource {
    GhostArchiveSource::enable(Config::for_testing(&server.uri()))
        .expect("Failed to enable source")
}

fn record_body() -> serde_json::Value {
    json!({
        "id": VIDEO_ID,
        "title": "Never Gonna Give You Up",
        "thumbnail": "https://example.com/thumb.jpg",
        "channelId": "UCuAXFkgsw1L7xaCfnd5JJOw",
        "channel": "Rick Astley",
        "channelAvatar": "https://example.com/avatar.jpg",
        "published": "October 25, 2009",
        "disabled": false,
        "description": "The official video",
        "source": "https://cdn.example.com/video.mp4"
    })
}

#[tokio::test]
async fn test_resolve_archived_record() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/varchive/{VIDEO_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(record_body()))
        .expect(1)
        .mount(&server)
        .await;

    let source = enable(&server);
    // A YouTube URL resolves through the archive's identifier space
    let details = source
        .get_content_details(WATCH_URL)
        .await
        .expect("resolution should succeed");

    assert_eq!(details.id.value, VIDEO_ID);
    assert_eq!(details.title, "Never Gonna Give You Up");
    assert_eq!(details.description, "The official video");
    assert_eq!(details.url, format!("{}/varchive/{VIDEO_ID}", server.uri()));
    assert_eq!(details.thumbnails.len(), 1);
    assert_eq!(details.thumbnails[0].url, "https://example.com/thumb.jpg");

    assert_eq!(details.author.id.value, "UCuAXFkgsw1L7xaCfnd5JJOw");
    assert_eq!(details.author.name, "Rick Astley");
    assert_eq!(
        details.author.url.as_deref(),
        Some(format!("{}/channel/UCuAXFkgsw1L7xaCfnd5JJOw", server.uri()).as_str())
    );

    assert_eq!(details.upload_date.year(), 2009);
    assert_eq!(details.upload_date.month(), 10);
    assert_eq!(details.duration, 0);
    assert_eq!(details.view_count, -1);
    assert!(!details.is_live);

    assert_eq!(details.video.sources.len(), 1);
    let video = &details.video.sources[0];
    assert_eq!(video.url, "https://cdn.example.com/video.mp4");
    assert_eq!(video.container, "video/mp4");
}

#[tokio::test]
async fn test_resolve_falls_back_to_cdn_media_url() {
    let server = MockServer::start().await;
    let mut body = record_body();
    body.as_object_mut().unwrap().remove("source");
    Mock::given(method("GET"))
        .and(path(format!("/varchive/{VIDEO_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let source = enable(&server);
    let details = source.get_content_details(WATCH_URL).await.unwrap();

    assert_eq!(
        details.video.sources[0].url,
        format!("{}/video/{VIDEO_ID}/{VIDEO_ID}.mp4", server.uri())
    );
}

#[tokio::test]
async fn test_resolve_not_archived_submits_and_requires_captcha() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/varchive/{VIDEO_ID}")))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": true, "code": 404})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/archive2"))
        .and(query_param("archive", WATCH_URL))
        .and(header("referer", format!("{}/", server.uri()).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string("captcha page"))
        .expect(1)
        .mount(&server)
        .await;

    let source = enable(&server);
    let err = source
        .get_content_details(&format!("https://youtu.be/{VIDEO_ID}"))
        .await
        .expect_err("unarchived content must not resolve");

    match err {
        SourceError::CaptchaRequired { url, body } => {
            assert!(url.contains("/archive2"), "submission url was {url}");
            assert!(
                url.contains(&urlencoding::encode(WATCH_URL).into_owned()),
                "submission url must embed the original watch URL, got {url}"
            );
            assert_eq!(body, "captcha page");
        }
        other => panic!("expected CaptchaRequired, got {other:?}"),
    }
}

#[tokio::test]
async fn test_resolve_error_envelope_with_404_code() {
    // Some deployments answer 200 with an error envelope instead of a 404
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/varchive/{VIDEO_ID}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"error": true, "code": 404})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/archive2"))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .expect(1)
        .mount(&server)
        .await;

    let source = enable(&server);
    let err = source.get_content_details(WATCH_URL).await.unwrap_err();
    assert!(matches!(err, SourceError::CaptchaRequired { .. }));
}

#[tokio::test]
async fn test_resolve_disabled_record_is_unavailable() {
    let server = MockServer::start().await;
    let mut body = record_body();
    body["disabled"] = json!(true);
    Mock::given(method("GET"))
        .and(path(format!("/varchive/{VIDEO_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;
    // The disabled branch must never trigger an archive request
    Mock::given(method("GET"))
        .and(path("/archive2"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let source = enable(&server);
    let err = source.get_content_details(WATCH_URL).await.unwrap_err();
    assert!(matches!(err, SourceError::Unavailable));
}

#[tokio::test]
async fn test_resolve_unparseable_date_substitutes_now() {
    let server = MockServer::start().await;
    let mut body = record_body();
    body["published"] = json!("sometime last week");
    Mock::given(method("GET"))
        .and(path(format!("/varchive/{VIDEO_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let source = enable(&server);
    let details = source.get_content_details(WATCH_URL).await.unwrap();

    let age = (Utc::now() - details.upload_date).num_seconds().abs();
    assert!(age < 5, "timestamp should be close to call time, was {age}s off");
}

#[tokio::test]
async fn test_resolve_missing_title_synthesizes_one() {
    let server = MockServer::start().await;
    let mut body = record_body();
    body.as_object_mut().unwrap().remove("title");
    body.as_object_mut().unwrap().remove("channelId");
    body.as_object_mut().unwrap().remove("channel");
    Mock::given(method("GET"))
        .and(path(format!("/varchive/{VIDEO_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let source = enable(&server);
    let details = source.get_content_details(WATCH_URL).await.unwrap();

    assert_eq!(details.title, format!("Video {VIDEO_ID}"));
    assert_eq!(details.author.name, "Unknown");
    assert!(details.author.url.is_none());
}

#[tokio::test]
async fn test_resolve_malformed_body_is_fetch_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/varchive/{VIDEO_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>definitely not json"))
        .mount(&server)
        .await;

    let source = enable(&server);
    let err = source.get_content_details(WATCH_URL).await.unwrap_err();
    assert!(matches!(err, SourceError::FetchFailed { .. }));
}

#[tokio::test]
async fn test_resolve_server_error_is_fetch_failed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/varchive/{VIDEO_ID}")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let source = enable(&server);
    let err = source.get_content_details(WATCH_URL).await.unwrap_err();
    assert!(matches!(err, SourceError::FetchFailed { .. }));
}

#[tokio::test]
async fn test_resolve_unrecognized_url_is_invalid() {
    let server = MockServer::start().await;
    let source = enable(&server);

    let err = source
        .get_content_details("https://example.com/watch?v=dQw4w9WgXcQ")
        .await
        .unwrap_err();
    assert!(matches!(err, SourceError::InvalidUrl(_)));
}
