//! Presentation helpers shared by all reports
//!
//! These only affect how numbers are printed; budget checks always use the
//! raw values.

use crate::metrics::Direction;

/// Render a duration in milliseconds.
///
/// Below one second as whole milliseconds, below ten seconds with two
/// decimal seconds, otherwise with one decimal second.
pub fn format_ms(value: f64) -> String {
    if value < 1000.0 {
        format!("{:.0} ms", value)
    } else if value < 10_000.0 {
        format!("{:.2} s", value / 1000.0)
    } else {
        format!("{:.1} s", value / 1000.0)
    }
}

/// Render a byte count with binary unit steps.
pub fn format_bytes(value: f64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut index = 0;
    let mut size = value;
    while size >= 1024.0 && index < UNITS.len() - 1 {
        size /= 1024.0;
        index += 1;
    }
    let decimals = if index == 0 {
        0
    } else if size < 10.0 {
        2
    } else {
        1
    };
    format!("{:.*} {}", decimals, size, UNITS[index])
}

/// Render a count as a rounded integer.
pub fn format_count(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// Render a unitless value with a fixed number of decimals.
pub fn format_float(value: f64, digits: usize) -> String {
    format!("{:.*}", digits, value)
}

/// Render an optional value, `n/a` when absent.
pub fn or_na(value: Option<f64>, fmt: impl Fn(f64) -> String) -> String {
    value.map(fmt).unwrap_or_else(|| "n/a".to_string())
}

/// Status marker for a value against a threshold.
pub fn status_icon(value: Option<f64>, threshold: f64, direction: Direction) -> &'static str {
    match value {
        None => "•",
        Some(v) if direction.within(v, threshold) => "✅",
        Some(_) => "⚠️",
    }
}

/// Marker for a precomputed pass/fail flag.
pub fn flag(ok: Option<bool>) -> &'static str {
    match ok {
        None => "•",
        Some(true) => "✅",
        Some(false) => "⚠️",
    }
}
