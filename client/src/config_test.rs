use super::*;

#[test]
fn missing_values_use_defaults() {
    let config = ClientConfig::from_values(None, None, None, None, None);
    assert_eq!(config.backend_url, "");
    assert_eq!(config.admin_upload_key, None);
    assert_eq!(config.max_upload_mb, 50);
    assert!(!config.identity_configured());
}

#[test]
fn values_are_trimmed_and_blank_key_is_none() {
    let config = ClientConfig::from_values(
        Some(" http://localhost:8787 "),
        Some("https://x.supabase.co"),
        Some("anon"),
        Some("   "),
        Some("20"),
    );
    assert_eq!(config.backend_url, "http://localhost:8787");
    assert_eq!(config.admin_upload_key, None);
    assert_eq!(config.max_upload_mb, 20);
    assert_eq!(config.max_upload_bytes(), 20 * 1024 * 1024);
    assert!(config.identity_configured());
}

#[test]
fn invalid_upload_limit_falls_back() {
    assert_eq!(parse_max_upload_mb(Some("lots")), 50);
    assert_eq!(parse_max_upload_mb(Some("0")), 50);
}
