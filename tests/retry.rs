mod common;

use common::{client_for, CountingTokens, FRESH_TOKEN, STALE_TOKEN};
use mirror_api::api::TimelineApi;
use mirror_api::models::TimelineItem;
use mirror_api::ApiError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sample_item() -> TimelineItem {
    TimelineItem::builder().text("hi").build().unwrap()
}

#[tokio::test]
async fn post_refreshes_token_once_on_401_and_succeeds() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/timeline"))
        .and(header("authorization", format!("Bearer {STALE_TOKEN}")))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid Credentials"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/timeline"))
        .and(header("authorization", format!("Bearer {FRESH_TOKEN}")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "kind": "mirror#timelineItem",
                "id": "item-1",
                "text": "hi"
            })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let tokens = CountingTokens::new();
    let client = client_for(&server.uri(), tokens.clone());

    let created = client.insert_item(&sample_item()).await.unwrap();
    assert_eq!(created.id.as_deref(), Some("item-1"));
    assert_eq!(tokens.refresh_count(), 1);
}

#[tokio::test]
async fn post_fails_after_second_401_without_looping() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/timeline"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid Credentials"))
        .expect(2)
        .mount(&server)
        .await;

    let tokens = CountingTokens::new();
    let client = client_for(&server.uri(), tokens.clone());

    let err = client.insert_item(&sample_item()).await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 401, .. }));
    assert_eq!(tokens.refresh_count(), 1);
}

#[tokio::test]
async fn server_error_never_triggers_refresh() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/timeline"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = CountingTokens::new();
    let client = client_for(&server.uri(), tokens.clone());

    let err = client.insert_item(&sample_item()).await.unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 500, .. }));
    assert_eq!(tokens.refresh_count(), 0);
}

#[tokio::test]
async fn failed_refresh_propagates_without_second_attempt() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/timeline"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid Credentials"))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = CountingTokens::failing();
    let client = client_for(&server.uri(), tokens.clone());

    let err = client.insert_item(&sample_item()).await.unwrap_err();
    assert!(matches!(err, ApiError::Refresh(_)));
    assert_eq!(tokens.refresh_count(), 1);
}

#[tokio::test]
async fn get_retries_with_refreshed_token_too() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/timeline"))
        .and(header("authorization", format!("Bearer {STALE_TOKEN}")))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/timeline"))
        .and(header("authorization", format!("Bearer {FRESH_TOKEN}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "kind": "mirror#timeline",
            "items": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let tokens = CountingTokens::new();
    let client = client_for(&server.uri(), tokens.clone());

    let page = client.list_page(None).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(tokens.refresh_count(), 1);
}
