// tests/api_http.rs
//
// HTTP-level tests for the public API Router without opening sockets.
// We exercise the router directly via tower::ServiceExt::oneshot.
//
// Covered:
// - GET /health
// - GET /api/events (success, empty day, validation errors, upstream failure)
// - GET /api/today
// - GET / (page)
// - unknown path -> JSON 404

use async_trait::async_trait;
use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value as Json;
use tower::ServiceExt as _; // for `oneshot`

use this_day_in_history::api::{self, AppState};
use this_day_in_history::history::{FetchError, FixtureMonthSource, MonthDataset, MonthSource};

const BODY_LIMIT: usize = 1024 * 1024; // 1MB, safe for tests
const JULY: &str = include_str!("fixtures/month_07.json");

/// Source that always fails, standing in for an unreachable upstream.
struct DownSource;

#[async_trait]
impl MonthSource for DownSource {
    async fn fetch_month(&self, _month: u32) -> Result<MonthDataset, FetchError> {
        Err(FetchError::Status(502))
    }

    fn name(&self) -> &'static str {
        "down"
    }
}

fn fixture_router() -> Router {
    api::router(AppState::new(FixtureMonthSource::from_fixture(JULY)))
}

fn down_router() -> Router {
    api::router(AppState::new(DownSource))
}

async fn get(app: Router, uri: &str) -> (StatusCode, String) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("build request");
    let resp = app.oneshot(req).await.expect("oneshot");
    let status = resp.status();
    let bytes = body::to_bytes(resp.into_body(), BODY_LIMIT)
        .await
        .expect("read body")
        .to_vec();
    (status, String::from_utf8(bytes).expect("utf8"))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, Json) {
    let (status, body) = get(app, uri).await;
    let v = serde_json::from_str(&body).unwrap_or_else(|e| panic!("json ({e}): {body}"));
    (status, v)
}

#[tokio::test]
async fn health_returns_ok() {
    let (status, body) = get(fixture_router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.trim(), "OK");
}

#[tokio::test]
async fn events_returns_ranked_payload() {
    let (status, v) = get_json(fixture_router(), "/api/events?month=7&day=1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    assert_eq!(v["date"], "7月1日");

    let data = v["data"].as_array().expect("data array");
    assert_eq!(data.len(), 5);
    assert_eq!(data[0]["year"], 1997);
    assert_eq!(data[0]["title"], "Hong Kong handover to China");
    assert_eq!(data[0]["importance_score"], 145.0);

    let scores: Vec<f64> = data
        .iter()
        .map(|e| e["importance_score"].as_f64().unwrap())
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
}

#[tokio::test]
async fn events_for_unknown_day_is_empty_success() {
    let (status, v) = get_json(fixture_router(), "/api/events?month=7&day=31").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    assert_eq!(v["data"], serde_json::json!([]));
    assert_eq!(v["date"], "7月31日");
}

#[tokio::test]
async fn events_validation_errors_are_400() {
    let cases = [
        ("/api/events", "请提供月份和日期参数"),
        ("/api/events?month=7", "请提供月份和日期参数"),
        ("/api/events?month=abc&day=1", "请提供月份和日期参数"),
        ("/api/events?month=0&day=1", "请提供月份和日期参数"),
        ("/api/events?month=13&day=1", "月份必须在1-12之间"),
        ("/api/events?month=7&day=32", "日期必须在1-31之间"),
    ];
    for (uri, msg) in cases {
        let (status, v) = get_json(fixture_router(), uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(v["error"], msg, "{uri}");
    }
}

#[tokio::test]
async fn events_upstream_failure_is_500() {
    let (status, v) = get_json(down_router(), "/api/events?month=7&day=1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(v["error"], "获取历史事件失败，请稍后重试");
    assert!(v.get("data").is_none());
}

#[tokio::test]
async fn today_has_success_shape() {
    let (status, v) = get_json(fixture_router(), "/api/today").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["success"], true);
    assert!(v["data"].is_array());
    assert!(v["date"].as_str().unwrap().ends_with('日'));
}

#[tokio::test]
async fn today_upstream_failure_is_500() {
    let (status, v) = get_json(down_router(), "/api/today").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(v["error"], "获取历史事件失败");
}

#[tokio::test]
async fn index_page_renders_even_when_upstream_is_down() {
    let (status, html) = get(down_router(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("历史上的今天"));
    assert!(html.contains("empty-state"));
}

#[tokio::test]
async fn unknown_path_is_json_404() {
    let (status, v) = get_json(fixture_router(), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(v["error"], "页面不存在");
}
