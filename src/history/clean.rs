// src/history/clean.rs
use once_cell::sync::OnceCell;
use regex::Regex;

/// Strip markup tags, collapse whitespace runs to one space, trim.
///
/// A single leftmost pass of `<[^>]+>` already leaves no tag behind (`<<b>i>` -> `i>`),
/// so cleaning is idempotent.
pub fn clean_text(s: &str) -> String {
    if s.is_empty() {
        return String::new();
    }

    static RE_TAGS: OnceCell<Regex> = OnceCell::new();
    let re_tags = RE_TAGS.get_or_init(|| Regex::new(r"<[^>]+>").unwrap());

    let out = re_tags.replace_all(s, "");

    static RE_WS: OnceCell<Regex> = OnceCell::new();
    let re_ws = RE_WS.get_or_init(|| Regex::new(r"\s+").unwrap());
    re_ws.replace_all(&out, " ").trim().to_string()
}
