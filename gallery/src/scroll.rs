//! Scroll offset codec for the session scroll record.
//!
//! Values are written as the decimal form of the viewport's vertical offset
//! and read back with base-10 integer-prefix semantics: leading whitespace is
//! skipped, an optional sign is accepted, and parsing stops at the first
//! non-digit. `"120.5"` therefore restores to `120`, and `"abc"` restores to
//! nothing at all.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

/// Parse a stored scroll record into a vertical offset.
///
/// Returns `None` when the value has no leading digits.
#[must_use]
pub fn parse_scroll_offset(raw: &str) -> Option<f64> {
    let trimmed = raw.trim_start_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = unsigned
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(unsigned.len());
    if end == 0 {
        return None;
    }

    let magnitude: f64 = unsigned[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Format a vertical offset for storage.
///
/// Integral offsets carry no fractional part; negative zero is written as `0`.
#[must_use]
pub fn format_scroll_offset(offset: f64) -> String {
    if offset == 0.0 {
        return "0".to_owned();
    }
    format!("{offset}")
}
