//! Build-time client configuration.
//!
//! SYSTEM CONTEXT
//! ==============
//! The browser bundle cannot read process environment at runtime, so every
//! setting is captured with `option_env!` when the crate is compiled. Empty
//! values mean "not configured".
//!
//! | variable                  | meaning                                   |
//! |---------------------------|-------------------------------------------|
//! | `TUTOR_BACKEND_URL`       | backend base URL; empty = same origin     |
//! | `TUTOR_SUPABASE_URL`      | identity service base URL                 |
//! | `TUTOR_SUPABASE_ANON_KEY` | identity service anonymous key            |
//! | `TUTOR_ADMIN_UPLOAD_KEY`  | optional `x-admin-upload-key` for uploads |
//! | `TUTOR_MAX_UPLOAD_MB`     | upload size limit, default 50             |

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use api::documents::DEFAULT_MAX_UPLOAD_MB;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub backend_url: String,
    pub supabase_url: String,
    pub supabase_anon_key: String,
    pub admin_upload_key: Option<String>,
    pub max_upload_mb: u64,
}

impl ClientConfig {
    /// Configuration baked into this build.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("TUTOR_BACKEND_URL"),
            option_env!("TUTOR_SUPABASE_URL"),
            option_env!("TUTOR_SUPABASE_ANON_KEY"),
            option_env!("TUTOR_ADMIN_UPLOAD_KEY"),
            option_env!("TUTOR_MAX_UPLOAD_MB"),
        )
    }

    pub(crate) fn from_values(
        backend_url: Option<&str>,
        supabase_url: Option<&str>,
        anon_key: Option<&str>,
        admin_upload_key: Option<&str>,
        max_upload_mb: Option<&str>,
    ) -> Self {
        Self {
            backend_url: clean(backend_url).unwrap_or_default(),
            supabase_url: clean(supabase_url).unwrap_or_default(),
            supabase_anon_key: clean(anon_key).unwrap_or_default(),
            admin_upload_key: clean(admin_upload_key),
            max_upload_mb: parse_max_upload_mb(max_upload_mb),
        }
    }

    pub fn max_upload_bytes(&self) -> u64 {
        self.max_upload_mb.saturating_mul(1024 * 1024)
    }

    /// Whether the identity service can be reached at all.
    pub fn identity_configured(&self) -> bool {
        !self.supabase_url.is_empty() && !self.supabase_anon_key.is_empty()
    }
}

fn clean(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|v| !v.is_empty()).map(str::to_owned)
}

fn parse_max_upload_mb(raw: Option<&str>) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|mb| *mb > 0)
        .unwrap_or(DEFAULT_MAX_UPLOAD_MB)
}
