use std::collections::HashMap;
use std::num::IntErrorKind;
use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Datelike, Local};
use serde::Serialize;
use tower_http::{cors::CorsLayer, services::ServeDir};

use crate::history::{self, MonthSource, ScoredEvent};
use crate::page;

pub const STATIC_DIR: &str = "static";

/// Shared per-process state. The source is immutable; requests never coordinate.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn MonthSource>,
}

impl AppState {
    pub fn new(source: impl MonthSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/health", get(|| async { "OK" }))
        .route("/api/events", get(events))
        .route("/api/today", get(today))
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .fallback(not_found)
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    MissingParams,
    MonthOutOfRange,
    DayOutOfRange,
    /// Fetch failed for `/api/events`.
    FetchFailed,
    /// Fetch failed for `/api/today` (shorter message).
    TodayFailed,
    NotFound,
}

impl ApiError {
    pub fn status(self) -> StatusCode {
        match self {
            ApiError::MissingParams | ApiError::MonthOutOfRange | ApiError::DayOutOfRange => {
                StatusCode::BAD_REQUEST
            }
            ApiError::FetchFailed | ApiError::TodayFailed => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ApiError::MissingParams => "请提供月份和日期参数",
            ApiError::MonthOutOfRange => "月份必须在1-12之间",
            ApiError::DayOutOfRange => "日期必须在1-31之间",
            ApiError::FetchFailed => "获取历史事件失败，请稍后重试",
            ApiError::TodayFailed => "获取历史事件失败",
            ApiError::NotFound => "页面不存在",
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody { error: self.message() })).into_response()
    }
}

#[derive(Serialize)]
struct EventsResp {
    success: bool,
    data: Vec<ScoredEvent>,
    date: String,
}

impl EventsResp {
    fn ok(month: u32, day: u32, data: Vec<ScoredEvent>) -> Json<Self> {
        Json(Self {
            success: true,
            data,
            date: history::date_label(month, day),
        })
    }
}

/// Integer query value. Overflowing digit strings saturate so they fail the range
/// check instead of reading as missing.
fn query_int(v: &str) -> Option<i64> {
    match v.trim().parse::<i64>() {
        Ok(n) => Some(n),
        Err(e) => match e.kind() {
            IntErrorKind::PosOverflow => Some(i64::MAX),
            IntErrorKind::NegOverflow => Some(i64::MIN),
            _ => None,
        },
    }
}

/// Validate `month`/`day` query params. Missing, non-integer and zero values are all
/// "missing"; anything else must be in 1..=12 / 1..=31. No calendar check.
pub fn parse_month_day(q: &HashMap<String, String>) -> Result<(u32, u32), ApiError> {
    let int = |k: &str| q.get(k).and_then(|v| query_int(v));
    let (Some(month), Some(day)) = (int("month"), int("day")) else {
        return Err(ApiError::MissingParams);
    };
    if month == 0 || day == 0 {
        return Err(ApiError::MissingParams);
    }
    if !(1..=12).contains(&month) {
        return Err(ApiError::MonthOutOfRange);
    }
    if !(1..=31).contains(&day) {
        return Err(ApiError::DayOutOfRange);
    }
    Ok((month as u32, day as u32))
}

async fn events(
    State(state): State<AppState>,
    Query(q): Query<HashMap<String, String>>,
) -> Result<Json<EventsResp>, ApiError> {
    let (month, day) = parse_month_day(&q)?;
    let data = history::get_events(state.source.as_ref(), month, day)
        .await
        .map_err(|_| ApiError::FetchFailed)?;
    Ok(EventsResp::ok(month, day, data))
}

async fn today(State(state): State<AppState>) -> Result<Json<EventsResp>, ApiError> {
    let now = Local::now().date_naive();
    let data = history::get_events_on(state.source.as_ref(), now)
        .await
        .map_err(|_| ApiError::TodayFailed)?;
    Ok(EventsResp::ok(now.month(), now.day(), data))
}

async fn index(State(state): State<AppState>) -> Html<String> {
    let now = Local::now().date_naive();
    let events = history::get_events_on(state.source.as_ref(), now).await.ok();
    Html(page::render_index(
        &history::date_label(now.month(), now.day()),
        &now.format("%Y-%m-%d").to_string(),
        events.as_deref(),
    ))
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}
