use super::*;
use crate::http::{Method, RequestBody};
use crate::testing::{FakeTransport, json_response};
use crate::types::{Role, SessionUser};
use futures::executor::block_on;

fn session() -> Session {
    Session {
        access_token: "user-token".into(),
        refresh_token: None,
        expires_in: None,
        expires_at: None,
        token_type: None,
        user: SessionUser { id: "u-1".into(), email: Some("a@b.c".into()) },
    }
}

fn session_json() -> Value {
    json!({
        "access_token": "user-token",
        "token_type": "bearer",
        "expires_in": 3600,
        "refresh_token": "r",
        "user": { "id": "u-1", "email": "a@b.c" }
    })
}

#[test]
fn sign_in_posts_credentials_with_apikey() {
    let fake = FakeTransport::new().respond(json_response(200, &session_json()));
    let client = IdentityClient::new(&fake, "https://proj.supabase.co/", "anon");
    let session = block_on(client.sign_in_with_password("a@b.c", "rahasia")).unwrap();
    assert_eq!(session.access_token, "user-token");
    assert_eq!(session.email(), Some("a@b.c"));

    let requests = fake.requests();
    let req = &requests[0];
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, "https://proj.supabase.co/auth/v1/token?grant_type=password");
    assert_eq!(req.header_value("apikey"), Some("anon"));
    assert_eq!(req.header_value("Authorization"), Some("Bearer anon"));
    assert_eq!(req.body, RequestBody::Json(json!({ "email": "a@b.c", "password": "rahasia" })));
}

#[test]
fn sign_in_error_uses_description() {
    let fake = FakeTransport::new()
        .respond(json_response(400, &json!({ "error": "invalid_grant", "error_description": "Invalid login credentials" })));
    let client = IdentityClient::new(&fake, "https://proj.supabase.co", "anon");
    let err = block_on(client.sign_in_with_password("a@b.c", "salah")).unwrap_err();
    assert_eq!(err, ApiError::Identity("Invalid login credentials".into()));
}

#[test]
fn refresh_exchanges_refresh_token() {
    let fake = FakeTransport::new().respond(json_response(200, &session_json()));
    let client = IdentityClient::new(&fake, "https://proj.supabase.co", "anon");
    let session = block_on(client.refresh("old-refresh")).unwrap();
    assert_eq!(session.access_token, "user-token");
    assert_eq!(session.refresh_token.as_deref(), Some("r"));

    let requests = fake.requests();
    let req = &requests[0];
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.url, "https://proj.supabase.co/auth/v1/token?grant_type=refresh_token");
    assert_eq!(req.header_value("apikey"), Some("anon"));
    assert_eq!(req.body, RequestBody::Json(json!({ "refresh_token": "old-refresh" })));
}

#[test]
fn refresh_with_revoked_token_is_identity_error() {
    let fake = FakeTransport::new()
        .respond(json_response(400, &json!({ "error": "invalid_grant", "error_description": "Invalid Refresh Token" })));
    let client = IdentityClient::new(&fake, "https://proj.supabase.co", "anon");
    let err = block_on(client.refresh("gone")).unwrap_err();
    assert_eq!(err, ApiError::Identity("Invalid Refresh Token".into()));
}

#[test]
fn sign_up_without_session_returns_none() {
    let fake = FakeTransport::new().respond(json_response(200, &json!({ "id": "u-2", "email": "x@y.z" })));
    let client = IdentityClient::new(&fake, "https://proj.supabase.co", "anon");
    let result = block_on(client.sign_up("x@y.z", "pw123456", "Budi")).unwrap();
    assert_eq!(result, None);
    let requests = fake.requests();
    let RequestBody::Json(body) = &requests[0].body else { panic!("expected json body") };
    assert_eq!(body["data"]["full_name"], "Budi");
}

#[test]
fn sign_up_error_uses_msg() {
    let fake = FakeTransport::new().respond(json_response(422, &json!({ "code": 422, "msg": "User already registered" })));
    let client = IdentityClient::new(&fake, "https://proj.supabase.co", "anon");
    let err = block_on(client.sign_up("x@y.z", "pw", "Budi")).unwrap_err();
    assert_eq!(err.to_string(), "User already registered");
}

#[test]
fn fetch_profile_uses_session_token_and_single_object() {
    let fake = FakeTransport::new().respond(json_response(200, &json!({ "id": "u-1", "role": "admin", "full_name": "Ani" })));
    let client = IdentityClient::new(&fake, "https://proj.supabase.co", "anon");
    let profile = block_on(client.fetch_profile(&session())).unwrap().unwrap();
    assert_eq!(profile.role(), Role::Admin);

    let requests = fake.requests();
    assert_eq!(requests[0].url, "https://proj.supabase.co/rest/v1/profiles?id=eq.u-1&select=*");
    assert_eq!(requests[0].header_value("accept"), Some("application/vnd.pgrst.object+json"));
    assert_eq!(requests[0].header_value("authorization"), Some("Bearer user-token"));
}

#[test]
fn fetch_profile_406_is_no_row() {
    let fake = FakeTransport::new().respond(json_response(406, &json!({ "code": "PGRST116" })));
    let client = IdentityClient::new(&fake, "https://proj.supabase.co", "anon");
    assert_eq!(block_on(client.fetch_profile(&session())).unwrap(), None);
}

#[test]
fn fetch_profile_other_errors_propagate() {
    let fake = FakeTransport::new().respond(json_response(500, &json!({ "message": "db down" })));
    let client = IdentityClient::new(&fake, "https://proj.supabase.co", "anon");
    let err = block_on(client.fetch_profile(&session())).unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[test]
fn history_queries_order_rows() {
    let fake = FakeTransport::new()
        .respond(json_response(200, &json!([{ "id": 7, "title": "Fisika", "created_at": "2024-01-02" }])))
        .respond(json_response(200, &json!([{ "role": "user", "content": "halo", "created_at": "2024-01-02" }])));
    let client = IdentityClient::new(&fake, "https://proj.supabase.co", "anon");

    let chats = block_on(client.list_chats(&session())).unwrap();
    assert_eq!(chats[0].id, "7");
    let messages = block_on(client.list_messages(&session(), &chats[0].id)).unwrap();
    assert!(messages[0].is_user());

    let requests = fake.requests();
    assert!(requests[0].url.ends_with("chats?select=id,title,created_at&user_id=eq.u-1&order=created_at.desc&limit=200"));
    assert!(requests[1].url.ends_with("messages?select=role,content,created_at&chat_id=eq.7&order=created_at.asc"));
}

#[test]
fn sign_out_sends_session_token() {
    let fake = FakeTransport::new().respond(json_response(204, &json!(null)));
    let client = IdentityClient::new(&fake, "https://proj.supabase.co", "anon");
    block_on(client.sign_out(&session())).unwrap();
    assert_eq!(fake.requests()[0].header_value("authorization"), Some("Bearer user-token"));
}
