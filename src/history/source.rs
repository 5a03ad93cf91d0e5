// src/history/source.rs
use std::time::{Duration, Instant};

use async_trait::async_trait;
use metrics::{counter, histogram};
use thiserror::Error;

use super::types::{month_key, MonthDataset};
use crate::config::{HistoryConfig, DEFAULT_USER_AGENT};

/// Why a month could not be fetched. Never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("upstream returned HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Anything that can hand out a month's events.
#[async_trait]
pub trait MonthSource: Send + Sync {
    async fn fetch_month(&self, month: u32) -> Result<MonthDataset, FetchError>;
    fn name(&self) -> &'static str;
}

/// Upstream HTTP source: one GET of `{base_url}/{MM}.json` per call.
#[derive(Clone)]
pub struct HttpMonthSource {
    client: reqwest::Client,
    base_url: String,
    timeout: Duration,
}

impl HttpMonthSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> anyhow::Result<Self> {
        Self::with_user_agent(base_url, timeout, DEFAULT_USER_AGENT)
    }

    pub fn with_user_agent(
        base_url: impl Into<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            timeout,
        })
    }

    pub fn from_config(cfg: &HistoryConfig) -> anyhow::Result<Self> {
        Self::with_user_agent(cfg.base_url.clone(), cfg.timeout(), &cfg.user_agent)
    }

    pub fn month_url(&self, month: u32) -> String {
        format!(
            "{}/{}.json",
            self.base_url.trim_end_matches('/'),
            month_key(month)
        )
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout)
        } else {
            FetchError::Network(e)
        }
    }
}

#[async_trait]
impl MonthSource for HttpMonthSource {
    async fn fetch_month(&self, month: u32) -> Result<MonthDataset, FetchError> {
        let url = self.month_url(month);
        let t0 = Instant::now();
        counter!("history_fetch_total").increment(1);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = resp.text().await.map_err(|e| self.classify(e))?;
        histogram!("history_fetch_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);
        tracing::debug!(target: "history", %url, bytes = body.len(), "fetched month dataset");

        MonthDataset::from_json(month, &body)
    }

    fn name(&self) -> &'static str {
        "http"
    }
}

/// Serves a fixed upstream-shaped JSON body; used offline and in tests.
#[derive(Debug, Clone)]
pub struct FixtureMonthSource {
    body: String,
}

impl FixtureMonthSource {
    pub fn from_fixture(content: &str) -> Self {
        Self {
            body: content.to_string(),
        }
    }
}

#[async_trait]
impl MonthSource for FixtureMonthSource {
    async fn fetch_month(&self, month: u32) -> Result<MonthDataset, FetchError> {
        counter!("history_fetch_total").increment(1);
        MonthDataset::from_json(month, &self.body)
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
