// src/history/types.rs
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::FetchError;

/// One event as the upstream delivers it. Fields are kept verbatim (markup included).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEvent {
    pub year: String,
    pub title: String,
    pub desc: String,
}

impl RawEvent {
    pub fn new(year: &str, title: &str, desc: &str) -> Self {
        Self {
            year: year.to_string(),
            title: title.to_string(),
            desc: desc.to_string(),
        }
    }

    /// Lenient extraction from an arbitrary JSON item.
    /// Strings are taken as-is, numbers as their decimal text, anything else reads as "".
    pub fn from_value(v: &Value) -> Self {
        fn field(v: &Value, key: &str) -> String {
            match v.get(key) {
                Some(Value::String(s)) => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => String::new(),
            }
        }
        Self {
            year: field(v, "year"),
            title: field(v, "title"),
            desc: field(v, "desc"),
        }
    }
}

/// Cleaned + scored event, the unit returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredEvent {
    pub year: i64,
    pub title: String,
    pub desc: String,
    pub importance_score: f64,
}

/// Zero-padded month key, e.g. `7` -> `"07"`.
pub fn month_key(month: u32) -> String {
    format!("{month:02}")
}

/// Zero-padded "MMDD" day key, e.g. `(7, 1)` -> `"0701"`.
pub fn day_key(month: u32, day: u32) -> String {
    format!("{month:02}{day:02}")
}

/// All events of one month, indexed by "MMDD" day key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthDataset {
    pub month: u32,
    days: BTreeMap<String, Vec<RawEvent>>,
}

impl MonthDataset {
    pub fn new(month: u32) -> Self {
        Self {
            month,
            days: BTreeMap::new(),
        }
    }

    pub fn insert_day(&mut self, day: u32, events: Vec<RawEvent>) {
        self.days.insert(day_key(self.month, day), events);
    }

    /// Parse an upstream body shaped `{ "MM": { "MMDD": [ {year,title,desc}, .. ] } }`.
    ///
    /// The body must be a JSON object. A missing month, a month entry that is not an
    /// object, or a day entry that is not an array just contribute no days.
    pub fn from_json(month: u32, body: &str) -> Result<Self, FetchError> {
        let root: Value = serde_json::from_str(body)
            .map_err(|e| FetchError::Malformed(format!("invalid json: {e}")))?;
        let root = root
            .as_object()
            .ok_or_else(|| FetchError::Malformed("top-level value is not an object".into()))?;

        let mut ds = Self::new(month);
        let Some(days) = root.get(&month_key(month)).and_then(Value::as_object) else {
            return Ok(ds);
        };

        for (key, entry) in days {
            match entry.as_array() {
                Some(items) => {
                    let events = items.iter().map(RawEvent::from_value).collect();
                    ds.days.insert(key.clone(), events);
                }
                None => {
                    tracing::debug!(target: "history", day_key = %key, "day entry is not an array, ignoring");
                }
            }
        }
        Ok(ds)
    }

    /// Events for `day`, or an empty slice when the day key is absent.
    pub fn day(&self, day: u32) -> &[RawEvent] {
        self.days
            .get(&day_key(self.month, day))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}
