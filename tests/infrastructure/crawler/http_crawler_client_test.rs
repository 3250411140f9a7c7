use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use podrelay::application::ports::{CrawlerClient, CrawlerError};
use podrelay::infrastructure::crawler::HttpCrawlerClient;
use podrelay::infrastructure::http_retry::RetryPolicy;

async fn start_mock_crawler(
    status: u16,
    response_body: &'static str,
    received: Arc<Mutex<Option<serde_json::Value>>>,
) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let app = Router::new()
        .route(
            "/api/crawler/parse",
            post(move |Json(body): Json<serde_json::Value>| {
                let received = Arc::clone(&received);
                async move {
                    *received.lock().unwrap() = Some(body);
                    let status = StatusCode::from_u16(status).unwrap();
                    (
                        status,
                        [(axum::http::header::CONTENT_TYPE, "application/json")],
                        response_body,
                    )
                        .into_response()
                }
            }),
        )
        .route("/api/crawler/health", get(|| async { "ok" }));

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (format!("http://{}", addr), shutdown_tx)
}

fn client(base_url: &str) -> HttpCrawlerClient {
    HttpCrawlerClient::new(base_url, Duration::from_secs(5))
        .unwrap()
        .with_retry(RetryPolicy {
            max_retries: 0,
            wait: Duration::from_millis(1),
        })
}

#[tokio::test]
async fn given_successful_parse_when_relaying_then_returns_episode() {
    let body = r#"{
        "success": true,
        "data": {
            "episode_id": "ep-1",
            "title": "Episode One",
            "podcast_name": "The Show",
            "audio_url": "https://cdn.example.com/ep1.m4a",
            "duration": 3600,
            "cover_image": "https://cdn.example.com/cover.jpg"
        }
    }"#;
    let received = Arc::new(Mutex::new(None));
    let (base_url, shutdown_tx) = start_mock_crawler(200, body, received.clone()).await;

    let episode = client(&base_url)
        .parse_episode("https://www.xiaoyuzhoufm.com/episode/ep-1", Some(5))
        .await
        .unwrap();

    assert_eq!(episode.episode_id, "ep-1");
    assert_eq!(episode.title, "Episode One");
    assert_eq!(episode.podcast_name.as_deref(), Some("The Show"));
    assert_eq!(episode.duration, 3600);
    assert!(episode.show_notes.is_none());

    let request = received.lock().unwrap().clone().unwrap();
    assert_eq!(request["url"], "https://www.xiaoyuzhoufm.com/episode/ep-1");
    assert_eq!(request["wait_time"], 5);
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_no_wait_time_when_relaying_then_field_is_omitted() {
    let body = r#"{"success": true, "data": {"episode_id": "e", "audio_url": "u"}}"#;
    let received = Arc::new(Mutex::new(None));
    let (base_url, shutdown_tx) = start_mock_crawler(200, body, received.clone()).await;

    client(&base_url).parse_episode("https://x", None).await.unwrap();

    let request = received.lock().unwrap().clone().unwrap();
    assert!(request.get("wait_time").is_none());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_unsuccessful_parse_when_relaying_then_returns_parse_failed() {
    let body = r#"{"success": false, "error": "page not found"}"#;
    let (base_url, shutdown_tx) =
        start_mock_crawler(200, body, Arc::new(Mutex::new(None))).await;

    let result = client(&base_url).parse_episode("https://x", None).await;

    assert!(matches!(result, Err(CrawlerError::ParseFailed(reason)) if reason == "page not found"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_success_without_data_when_relaying_then_returns_parse_failed() {
    let (base_url, shutdown_tx) =
        start_mock_crawler(200, r#"{"success": true}"#, Arc::new(Mutex::new(None))).await;

    let result = client(&base_url).parse_episode("https://x", None).await;

    assert!(matches!(result, Err(CrawlerError::ParseFailed(_))));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_error_status_when_relaying_then_returns_status_error() {
    let (base_url, shutdown_tx) =
        start_mock_crawler(500, "boom", Arc::new(Mutex::new(None))).await;

    let result = client(&base_url).parse_episode("https://x", None).await;

    assert!(matches!(result, Err(CrawlerError::Status { status: 500, ref body }) if body == "boom"));
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_running_crawler_when_health_checking_then_succeeds() {
    let (base_url, shutdown_tx) =
        start_mock_crawler(200, "{}", Arc::new(Mutex::new(None))).await;

    assert!(client(&format!("{}/", base_url)).health_check().await.is_ok());
    shutdown_tx.send(()).ok();
}

#[tokio::test]
async fn given_trailing_slash_when_creating_client_then_base_url_is_trimmed() {
    let client = client("http://localhost:8001/");
    assert_eq!(client.base_url(), "http://localhost:8001");
}
