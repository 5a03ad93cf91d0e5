// src/config/mod.rs
pub mod history;

pub use history::{HistoryConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT};
