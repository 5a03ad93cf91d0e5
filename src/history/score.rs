// src/history/score.rs
//! Importance heuristic.
//!
//! Score = year component + title-length component + desc-length component.
//! Lengths are measured on the raw (uncleaned) strings, in characters.
//! The thresholds are part of the output contract; do not tune them.

use unicode_general_category::{get_general_category, GeneralCategory};

/// How the upstream `year` text reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearKind {
    /// Only Unicode decimal digits (`Nd`: ASCII, fullwidth, Arabic-Indic, ..).
    Digits(i64),
    /// Anything else ("前221", "-44", "Ⅻ"); scores as free text, year 0.
    Text,
    /// Digit-like characters that are not decimal digits ("²", "①"). The item is dropped.
    Unparseable,
}

fn is_decimal(c: char) -> bool {
    get_general_category(c) == GeneralCategory::DecimalNumber
}

/// Value of an `Nd` char. Decimal digits come in contiguous runs starting at zero,
/// so the value is the distance to the start of the run, mod 10.
pub fn decimal_value(c: char) -> Option<u32> {
    if c.is_ascii_digit() {
        return c.to_digit(10);
    }
    if !is_decimal(c) {
        return None;
    }
    let mut start = c as u32;
    while let Some(prev) = start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal(prev) {
            break;
        }
        start -= 1;
    }
    Some((c as u32 - start) % 10)
}

pub fn classify_year(year: &str) -> YearKind {
    if year.is_empty() {
        return YearKind::Text;
    }
    let mut value: i64 = 0;
    let mut digit_like = true;
    let mut all_decimal = true;
    for c in year.chars() {
        match decimal_value(c) {
            Some(d) => {
                value = value
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(i64::from(d)))
                    .unwrap_or(i64::MAX);
            }
            None => {
                all_decimal = false;
                digit_like &= get_general_category(c) == GeneralCategory::OtherNumber;
            }
        }
    }
    if all_decimal {
        YearKind::Digits(value)
    } else if digit_like {
        YearKind::Unparseable
    } else {
        YearKind::Text
    }
}

/// `true` when `s` is non-empty and made only of decimal digits.
pub fn is_all_digits(s: &str) -> bool {
    matches!(classify_year(s), YearKind::Digits(_))
}

/// Parsed year for output: the integer value for an all-digit string, 0 otherwise.
/// Digit strings beyond `i64` saturate.
pub fn parse_year(year: &str) -> i64 {
    match classify_year(year) {
        YearKind::Digits(y) => y,
        _ => 0,
    }
}

pub fn year_component(year: &str) -> f64 {
    match classify_year(year) {
        YearKind::Digits(y) if y >= 1900 => 100.0,
        YearKind::Digits(y) if y >= 1800 => 80.0,
        YearKind::Digits(y) if y >= 1500 => 60.0,
        YearKind::Digits(_) => 40.0,
        _ => 30.0,
    }
}

pub fn title_component(title: &str) -> f64 {
    match title.chars().count() {
        10..=50 => 20.0,
        n if n > 50 => 15.0,
        _ => 10.0,
    }
}

pub fn desc_component(desc: &str) -> f64 {
    match desc.chars().count() {
        n if n > 100 => 25.0,
        n if n > 50 => 20.0,
        _ => 15.0,
    }
}

pub fn importance_score(year: &str, title: &str, desc: &str) -> f64 {
    year_component(year) + title_component(title) + desc_component(desc)
}
