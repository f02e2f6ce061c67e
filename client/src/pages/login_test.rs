use super::*;

#[test]
fn validate_credentials_trims_email() {
    assert_eq!(
        validate_credentials("  a@b.com  ", "secret"),
        Ok(("a@b.com".to_owned(), "secret".to_owned()))
    );
}

#[test]
fn validate_credentials_requires_both_fields() {
    assert_eq!(validate_credentials("   ", "secret"), Err(MISSING_CREDENTIALS));
    assert_eq!(validate_credentials("a@b.com", ""), Err(MISSING_CREDENTIALS));
}

#[test]
fn validate_credentials_keeps_password_whitespace() {
    assert_eq!(
        validate_credentials("a@b.com", " pw "),
        Ok(("a@b.com".to_owned(), " pw ".to_owned()))
    );
}

#[test]
fn failure_message_falls_back_when_blank() {
    assert_eq!(failure_message("Invalid login credentials"), "Invalid login credentials");
    assert_eq!(failure_message("  "), "Gagal login.");
}

#[test]
fn unconfigured_identity_shows_warning() {
    let bare = ClientConfig::from_values(None, None, None, None, None);
    assert_eq!(config_warning(&bare), Some(IDENTITY_NOT_CONFIGURED));

    let half = ClientConfig::from_values(None, Some("https://x.supabase.co"), None, None, None);
    assert_eq!(config_warning(&half), Some(IDENTITY_NOT_CONFIGURED));

    let ready = ClientConfig::from_values(None, Some("https://x.supabase.co"), Some("anon"), None, None);
    assert_eq!(config_warning(&ready), None);
}
