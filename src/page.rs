// src/page.rs
//! Server-rendered index page. The date picker talks to `/api/events` via `/static/js/main.js`.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::history::ScoredEvent;

const EMPTY_STATE: &str = r#"<div class="empty-state"><p>该日期暂无历史事件记录</p></div>"#;

fn render_event(ev: &ScoredEvent) -> String {
    let desc = if ev.desc.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="event-desc">{}</p>"#, encode_text(&ev.desc))
    };
    format!(
        r#"<div class="event-card" data-score="{score}"><div class="event-year">{year}年</div><div class="event-content"><h3 class="event-title">{title}</h3>{desc}</div></div>"#,
        score = ev.importance_score,
        year = ev.year,
        title = encode_text(&ev.title),
    )
}

/// Render the whole page. `events` is `None` when today's fetch failed; it renders
/// like an empty day.
pub fn render_index(date_label: &str, iso_date: &str, events: Option<&[ScoredEvent]>) -> String {
    let cards = match events {
        Some(evs) if !evs.is_empty() => evs.iter().map(render_event).collect::<String>(),
        _ => EMPTY_STATE.to_string(),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>历史上的今天</title>
<link rel="stylesheet" href="/static/css/style.css">
</head>
<body>
<header>
<h1>历史上的今天</h1>
<div class="date-picker">
<input type="date" id="dateInput" value="{iso}">
<button id="todayBtn" type="button">今天</button>
</div>
<h2 id="currentDate">{label}</h2>
</header>
<main>
<div id="loadingIndicator" class="loading">加载中…</div>
<div id="eventsContainer">{cards}</div>
<div id="errorToast" class="toast"><span id="errorMessage"></span></div>
</main>
<script src="/static/js/main.js"></script>
</body>
</html>
"#,
        iso = encode_double_quoted_attribute(iso_date),
        label = encode_text(date_label),
    )
}
