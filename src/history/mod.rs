// src/history/mod.rs
//! "This day in history" core: fetch a month, pick the day, clean + score + rank.
//!
//! `Err(FetchError)` means the fetch failed (retry later); `Ok(vec![])` means the
//! fetch succeeded and nothing is known for that day. Callers must not conflate them.

pub mod clean;
pub mod rank;
pub mod score;
pub mod source;
pub mod types;

pub use source::{FetchError, FixtureMonthSource, HttpMonthSource, MonthSource};
pub use types::{day_key, month_key, MonthDataset, RawEvent, ScoredEvent};

use chrono::{Datelike, Local, NaiveDate};
use metrics::{counter, describe_counter, describe_histogram};
use once_cell::sync::OnceCell;

/// One-time metrics registration (so series show up on /metrics).
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("history_fetch_total", "Month datasets requested from a source.");
        describe_counter!(
            "history_fetch_errors_total",
            "Month fetches that failed (network, timeout, status, malformed)."
        );
        describe_counter!(
            "history_events_returned_total",
            "Ranked events handed back to callers."
        );
        describe_histogram!("history_fetch_ms", "Upstream fetch time in milliseconds.");
    });
}

/// Raw events for one day. Absent day key -> empty vec.
pub async fn fetch_day(
    source: &dyn MonthSource,
    month: u32,
    day: u32,
) -> Result<Vec<RawEvent>, FetchError> {
    let ds = source.fetch_month(month).await?;
    Ok(ds.day(day).to_vec())
}

/// Top events for `month`/`day`, best first, at most `rank::TOP_K`.
pub async fn get_events(
    source: &dyn MonthSource,
    month: u32,
    day: u32,
) -> Result<Vec<ScoredEvent>, FetchError> {
    ensure_metrics_described();

    let raw = match fetch_day(source, month, day).await {
        Ok(raw) => raw,
        Err(e) => {
            tracing::warn!(target: "history", error = %e, source = source.name(), month, day, "fetching history events failed");
            counter!("history_fetch_errors_total").increment(1);
            return Err(e);
        }
    };

    let ranked = rank::rank_events(&raw);
    counter!("history_events_returned_total").increment(ranked.len() as u64);
    tracing::debug!(target: "history", month, day, raw = raw.len(), count = ranked.len(), "ranked events");
    Ok(ranked)
}

pub async fn get_events_on(
    source: &dyn MonthSource,
    date: NaiveDate,
) -> Result<Vec<ScoredEvent>, FetchError> {
    get_events(source, date.month(), date.day()).await
}

/// Same as [`get_events`] for the current local date.
pub async fn get_today_events(source: &dyn MonthSource) -> Result<Vec<ScoredEvent>, FetchError> {
    get_events_on(source, Local::now().date_naive()).await
}

/// Display label used by the page and the API, e.g. `7月1日`.
pub fn date_label(month: u32, day: u32) -> String {
    format!("{month}月{day}日")
}
