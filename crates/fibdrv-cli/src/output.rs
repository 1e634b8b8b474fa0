//! Client output formatting.

use std::time::Duration;

/// Format a duration for display.
#[must_use]
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 0.000_001 {
        format!("{}ns", d.as_nanos())
    } else if secs < 0.001 {
        format!("{:.2}µs", secs * 1_000_000.0)
    } else if secs < 1.0 {
        format!("{:.2}ms", secs * 1000.0)
    } else {
        format!("{secs:.3}s")
    }
}

/// Format a number with thousand separators.
#[must_use]
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Line printed for the elapsed-time query.
#[must_use]
pub fn write_line(path: &str, returned: u64) -> String {
    format!("Writing to {path}, returned the sequence {returned}")
}

/// Line printed for each read.
#[must_use]
pub fn read_line(path: &str, offset: u64, value: u64) -> String {
    format!("Reading from {path} at offset {offset}, returned the sequence {value}.")
}
