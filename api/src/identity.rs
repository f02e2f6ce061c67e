//! Identity service client: password auth, profiles, chat history.
//!
//! SYSTEM CONTEXT
//! ==============
//! The identity service is a Supabase-compatible backend: GoTrue endpoints
//! under `/auth/v1` and PostgREST tables under `/rest/v1`. Every request
//! carries the project `apikey`; table reads authenticate with the session
//! token when there is one and fall back to the anon key otherwise.
//!
//! TRADE-OFFS
//! ==========
//! Only the handful of calls the UI needs are modeled. Tokens are refreshed
//! once, when a stored session is restored past its expiry; a token that
//! expires while the page is open surfaces as a failed read.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse, Transport, ensure_success};
use crate::types::{ChatSummary, HistoryMessage, Profile, Session};

#[cfg(test)]
#[path = "identity_test.rs"]
mod identity_test;

const PGRST_SINGLE: &str = "application/vnd.pgrst.object+json";

/// Best message from a GoTrue error body.
fn auth_error_message(response: &HttpResponse) -> String {
    let body = response.json_lenient();
    ["error_description", "msg", "message", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str).filter(|s| !s.is_empty()))
        .map_or_else(|| format!("HTTP {}", response.status), str::to_owned)
}

pub struct IdentityClient<T> {
    transport: T,
    base_url: String,
    anon_key: String,
}

impl<T: Transport> IdentityClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { transport, base_url, anon_key: anon_key.into() }
    }

    fn request(&self, request: HttpRequest, token: Option<&str>) -> HttpRequest {
        let token = token.filter(|t| !t.is_empty()).unwrap_or(self.anon_key.as_str());
        request.header("apikey", self.anon_key.clone()).bearer(Some(token))
    }

    async fn auth_call(&self, request: HttpRequest) -> Result<Value, ApiError> {
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            let message = auth_error_message(&response);
            tracing::warn!(status = response.status, %message, "identity request failed");
            return Err(ApiError::Identity(message));
        }
        response.json_value()
    }

    /// # Errors
    ///
    /// [`ApiError::Identity`] for rejected credentials.
    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let url = format!("{}/auth/v1/token?grant_type=password", self.base_url);
        let request = self.request(HttpRequest::post(url), None).json(json!({ "email": email, "password": password }));
        let body = self.auth_call(request).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    /// Exchange a refresh token for a fresh session.
    ///
    /// # Errors
    ///
    /// [`ApiError::Identity`] when the refresh token is revoked or unknown.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Session, ApiError> {
        let url = format!("{}/auth/v1/token?grant_type=refresh_token", self.base_url);
        let request = self.request(HttpRequest::post(url), None).json(json!({ "refresh_token": refresh_token }));
        let body = self.auth_call(request).await?;
        serde_json::from_value(body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    /// Register an account with `full_name` user metadata.
    ///
    /// Returns the new session when the service confirms immediately, `None`
    /// when email confirmation is pending.
    ///
    /// # Errors
    ///
    /// [`ApiError::Identity`] when the service rejects the sign-up.
    pub async fn sign_up(&self, email: &str, password: &str, full_name: &str) -> Result<Option<Session>, ApiError> {
        let url = format!("{}/auth/v1/signup", self.base_url);
        let body = json!({ "email": email, "password": password, "data": { "full_name": full_name } });
        let request = self.request(HttpRequest::post(url), None).json(body);
        let body = self.auth_call(request).await?;
        if body.get("access_token").and_then(Value::as_str).is_none() {
            return Ok(None);
        }
        serde_json::from_value(body).map(Some).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    /// Revoke the session server-side.
    ///
    /// # Errors
    ///
    /// Transport failures and rejected tokens.
    pub async fn sign_out(&self, session: &Session) -> Result<(), ApiError> {
        let url = format!("{}/auth/v1/logout", self.base_url);
        let request = self.request(HttpRequest::post(url), Some(&session.access_token));
        let response = self.transport.send(request).await?;
        if response.is_success() { Ok(()) } else { Err(ApiError::Identity(auth_error_message(&response))) }
    }

    async fn rest_rows<R: DeserializeOwned>(&self, query: &str, token: Option<&str>) -> Result<Vec<R>, ApiError> {
        let url = format!("{}/rest/v1/{query}", self.base_url);
        let response = ensure_success(self.transport.send(self.request(HttpRequest::get(url), token)).await?)?;
        let body = response.json_value()?;
        serde_json::from_value(body).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    /// The `profiles` row of `session`'s user; `None` when there is no row.
    ///
    /// # Errors
    ///
    /// Transport and status errors other than 406 (no row).
    pub async fn fetch_profile(&self, session: &Session) -> Result<Option<Profile>, ApiError> {
        let url = format!("{}/rest/v1/profiles?id=eq.{}&select=*", self.base_url, session.user_id());
        let request = self.request(HttpRequest::get(url), Some(&session.access_token)).header("Accept", PGRST_SINGLE);
        let response = self.transport.send(request).await?;
        if response.status == 406 {
            return Ok(None);
        }
        let response = ensure_success(response)?;
        let body = response.json_value()?;
        if body.is_null() {
            return Ok(None);
        }
        serde_json::from_value(body).map(Some).map_err(|e| ApiError::Malformed(e.to_string()))
    }

    /// Saved chats of the signed-in user, newest first.
    ///
    /// # Errors
    ///
    /// Transport, status and decode errors.
    pub async fn list_chats(&self, session: &Session) -> Result<Vec<ChatSummary>, ApiError> {
        let query = format!("chats?select=id,title,created_at&user_id=eq.{}&order=created_at.desc&limit=200", session.user_id());
        self.rest_rows(&query, Some(&session.access_token)).await
    }

    /// Messages of one chat, oldest first.
    ///
    /// # Errors
    ///
    /// Transport, status and decode errors.
    pub async fn list_messages(&self, session: &Session, chat_id: &str) -> Result<Vec<HistoryMessage>, ApiError> {
        let query = format!("messages?select=role,content,created_at&chat_id=eq.{chat_id}&order=created_at.asc");
        self.rest_rows(&query, Some(&session.access_token)).await
    }
}
