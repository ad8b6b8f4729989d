//! Cell and line formatting. Absent values render as [`NOT_AVAILABLE`];
//! zero is a real value and renders as `0`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::document::FontStyle;
use super::metrics::text_width_mm;

pub const NOT_AVAILABLE: &str = "N/A";

/// Longest cell text rendered without truncation, in characters.
pub const MAX_CELL_CHARS: usize = 20;
const TRUNCATED_KEEP: usize = 17;

pub fn text_or_na(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}

pub fn count(value: Option<u64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.into(), |v| v.to_string())
}

/// Table form of a wait time: `12.5m`.
pub fn minutes_short(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.into(), |v| format!("{v:.1}m"))
}

/// Cover form of a wait time: `12.5 minutes`.
pub fn minutes_long(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.into(), |v| format!("{v:.1} minutes"))
}

/// Satisfaction on the 0–5 scale: `4.2/5.0`.
pub fn rating(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.into(), |v| format!("{v:.1}/5.0"))
}

/// A 0–1 ratio as a percentage: `0.853` → `85.3%`.
pub fn ratio_percent(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.into(), |v| format!("{:.1}%", v * 100.0))
}

/// A value that is already a percentage: `21.04` → `21.0%`.
pub fn percent(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.into(), |v| format!("{v:.1}%"))
}

pub fn decimal2(value: Option<f64>) -> String {
    value.map_or_else(|| NOT_AVAILABLE.into(), |v| format!("{v:.2}"))
}

/// Cuts cell text longer than [`MAX_CELL_CHARS`] to 17 characters plus `...`.
pub fn truncate_cell(text: &str) -> String {
    if text.chars().count() > MAX_CELL_CHARS {
        let kept: String = text.chars().take(TRUNCATED_KEEP).collect();
        format!("{kept}...")
    } else {
        text.to_string()
    }
}

/// `M/D/YYYY`, the en-US short date.
pub fn short_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

/// `M/D/YYYY, h:mm:ss AM`
pub fn short_datetime(at: NaiveDateTime) -> String {
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Renders an ISO timestamp or date as a short date; anything unparseable is
/// returned unchanged.
pub fn iso_date_or_raw(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(at) = DateTime::parse_from_rfc3339(trimmed) {
        return short_date(at.date_naive());
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return short_date(at.date());
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return short_date(date);
    }
    raw.to_string()
}

/// Word-wraps `text` so that no line is wider than `max_width` millimetres.
/// A single word wider than the limit gets a line of its own.
pub fn wrap_text(text: &str, max_width: f32, size: f32, style: FontStyle) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() {
            let candidate = format!("{current} {word}");
            if text_width_mm(&candidate, size, style) > max_width {
                lines.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
