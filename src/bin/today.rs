// src/bin/today.rs
// Command-line demo: print today's top events, then the events of July 1.
// Usage: cargo run --bin today
use anyhow::Result;
use chrono::{Datelike, Local};
use this_day_in_history::config::HistoryConfig;
use this_day_in_history::history::{self, HttpMonthSource, ScoredEvent};
use tracing_subscriber::EnvFilter;

fn print_events(events: &[ScoredEvent]) {
    println!("\nFound {} events:", events.len());
    for (i, ev) in events.iter().enumerate() {
        println!("\n{}. {}年 - {}", i + 1, ev.year, ev.title);
        if !ev.desc.is_empty() {
            println!("   {}", ev.desc);
        }
        println!("   importance: {}", ev.importance_score);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("history=info")),
        )
        .init();

    let cfg = HistoryConfig::load_default()?;
    let source = HttpMonthSource::from_config(&cfg)?;

    let now = Local::now().date_naive();
    println!("Today ({}):", history::date_label(now.month(), now.day()));
    match history::get_today_events(&source).await {
        Ok(evs) if evs.is_empty() => println!("No events recorded for today."),
        Ok(evs) => print_events(&evs),
        Err(e) => println!("Could not fetch history events: {e}"),
    }

    println!("\n\nJuly 1 ({}):", history::date_label(7, 1));
    match history::get_events(&source, 7, 1).await {
        Ok(evs) if evs.is_empty() => println!("No events recorded for July 1."),
        Ok(evs) => print_events(&evs),
        Err(e) => println!("Could not fetch history events: {e}"),
    }

    Ok(())
}
