use super::*;

// =============================================================
// parse_scroll_offset
// =============================================================

#[test]
fn parses_plain_integer() {
    assert_eq!(parse_scroll_offset("640"), Some(640.0));
}

#[test]
fn parses_zero() {
    assert_eq!(parse_scroll_offset("0"), Some(0.0));
}

#[test]
fn non_numeric_is_unparsable() {
    assert_eq!(parse_scroll_offset("abc"), None);
}

#[test]
fn empty_is_unparsable() {
    assert_eq!(parse_scroll_offset(""), None);
    assert_eq!(parse_scroll_offset("   "), None);
}

#[test]
fn lone_sign_is_unparsable() {
    assert_eq!(parse_scroll_offset("-"), None);
    assert_eq!(parse_scroll_offset("+"), None);
}

#[test]
fn fractional_value_truncates_to_integer_prefix() {
    assert_eq!(parse_scroll_offset("120.75"), Some(120.0));
}

#[test]
fn trailing_garbage_is_ignored() {
    assert_eq!(parse_scroll_offset("42px"), Some(42.0));
}

#[test]
fn leading_whitespace_is_skipped() {
    assert_eq!(parse_scroll_offset("  \t\n15"), Some(15.0));
}

#[test]
fn sign_is_honored() {
    assert_eq!(parse_scroll_offset("-8"), Some(-8.0));
    assert_eq!(parse_scroll_offset("+8"), Some(8.0));
}

#[test]
fn hex_prefix_reads_as_zero() {
    assert_eq!(parse_scroll_offset("0x10"), Some(0.0));
}

#[test]
fn inner_whitespace_stops_parsing() {
    assert_eq!(parse_scroll_offset("12 34"), Some(12.0));
}

// =============================================================
// format_scroll_offset
// =============================================================

#[test]
fn integral_offset_has_no_fraction() {
    assert_eq!(format_scroll_offset(480.0), "480");
}

#[test]
fn fractional_offset_keeps_fraction() {
    assert_eq!(format_scroll_offset(480.5), "480.5");
}

#[test]
fn negative_zero_formats_as_zero() {
    assert_eq!(format_scroll_offset(-0.0), "0");
}

#[test]
fn formatted_offset_parses_back() {
    for offset in [0.0, 1.0, 333.0, 12_000.0] {
        assert_eq!(parse_scroll_offset(&format_scroll_offset(offset)), Some(offset));
    }
}
