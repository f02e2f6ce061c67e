use super::*;

#[test]
fn similarity_precision() {
    assert_eq!(similarity(Some(0.123_456), 4, "n/a"), "0.1235");
    assert_eq!(similarity(Some(0.5), 3, "n/a"), "0.500");
    assert_eq!(similarity(None, 4, "n/a"), "n/a");
}

#[test]
fn truncation_counts_characters() {
    assert_eq!(truncate_chars("abcdef", 3), "abc…");
    assert_eq!(truncate_chars("abc", 3), "abc");
    assert_eq!(truncate_chars("ééé", 2), "éé…");
    assert!(exceeds("abcd", 3));
    assert!(!exceeds("abc", 3));
}

#[test]
fn missing_values_render_as_dash() {
    assert_eq!(chunk_index(None), "-");
    assert_eq!(chunk_index(Some(7)), "7");
    assert_eq!(timestamp(None), "-");
    assert_eq!(timestamp(Some("")), "-");
}

#[test]
fn timestamp_passes_through_without_browser() {
    assert_eq!(timestamp(Some("2024-05-01T10:00:00Z")), "2024-05-01T10:00:00Z");
}
