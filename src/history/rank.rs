// src/history/rank.rs
//! Raw day events -> cleaned, scored, top-K list.
//!
//! Malformed items (empty `year` or `title`, or a year made of digit-like
//! characters that do not parse, e.g. "²") are dropped one by one; a bad item
//! never fails the batch.

use super::clean::clean_text;
use super::score::{classify_year, importance_score, parse_year, YearKind};
use super::types::{RawEvent, ScoredEvent};

/// Max number of events returned per day.
pub const TOP_K: usize = 5;

/// Score a single raw event, or `None` when it is malformed.
pub fn process_event(ev: &RawEvent) -> Option<ScoredEvent> {
    if ev.year.is_empty() || ev.title.is_empty() {
        return None;
    }
    if classify_year(&ev.year) == YearKind::Unparseable {
        return None;
    }
    Some(ScoredEvent {
        year: parse_year(&ev.year),
        title: clean_text(&ev.title),
        desc: clean_text(&ev.desc),
        importance_score: importance_score(&ev.year, &ev.title, &ev.desc),
    })
}

/// Process, sort by score descending (stable, so ties keep input order) and cap at `TOP_K`.
pub fn rank_events(raw: &[RawEvent]) -> Vec<ScoredEvent> {
    let mut scored: Vec<ScoredEvent> = raw.iter().filter_map(process_event).collect();
    let dropped = raw.len() - scored.len();
    if dropped > 0 {
        tracing::debug!(target: "history", dropped, "skipped malformed events");
    }

    scored.sort_by(|a, b| b.importance_score.total_cmp(&a.importance_score));
    scored.truncate(TOP_K);
    scored
}
