use super::*;

/// # Safety
/// Tests must run with `--test-threads=1` to avoid env races.
unsafe fn clear_server_env() {
    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("BACKEND_URL");
        std::env::remove_var("PROXY_TIMEOUT_SECS");
        std::env::remove_var("PROXY_CONNECT_TIMEOUT_SECS");
        std::env::remove_var("PROXY_MAX_BODY_MB");
    }
}

#[test]
fn from_env_uses_defaults() {
    unsafe { clear_server_env() };

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);
    assert_eq!(cfg.proxy_timeout, Duration::from_secs(DEFAULT_PROXY_TIMEOUT_SECS));
    assert_eq!(cfg.proxy_connect_timeout, Duration::from_secs(DEFAULT_PROXY_CONNECT_TIMEOUT_SECS));
    assert_eq!(cfg.max_body_bytes, 64 * 1024 * 1024);
}

#[test]
fn from_env_parses_overrides() {
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "8080");
        std::env::set_var("BACKEND_URL", "https://rag.example.test/base/");
        std::env::set_var("PROXY_TIMEOUT_SECS", "30");
        std::env::set_var("PROXY_CONNECT_TIMEOUT_SECS", " 3 ");
        std::env::set_var("PROXY_MAX_BODY_MB", "8");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, 8080);
    assert_eq!(cfg.backend_url, "https://rag.example.test/base");
    assert_eq!(cfg.proxy_timeout, Duration::from_secs(30));
    assert_eq!(cfg.proxy_connect_timeout, Duration::from_secs(3));
    assert_eq!(cfg.max_body_bytes, 8 * 1024 * 1024);

    unsafe { clear_server_env() };
}

#[test]
fn from_env_rejects_bad_port() {
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "not-a-port");
    }

    assert_eq!(
        ServerConfig::from_env(),
        Err(ConfigError::Invalid { var: "PORT", value: "not-a-port".into() })
    );

    unsafe { clear_server_env() };
}

#[test]
fn blank_values_fall_back_to_defaults() {
    unsafe {
        clear_server_env();
        std::env::set_var("PORT", "");
        std::env::set_var("BACKEND_URL", "  ");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.backend_url, DEFAULT_BACKEND_URL);

    unsafe { clear_server_env() };
}

#[test]
fn backend_url_requires_http_scheme() {
    assert_eq!(
        normalize_backend_url("localhost:8787"),
        Err(ConfigError::BackendScheme("localhost:8787".into()))
    );
    assert_eq!(normalize_backend_url("http://x.test///").unwrap(), "http://x.test");
}
