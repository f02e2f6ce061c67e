use super::*;
use api::types::SessionUser;

fn session(user: &str) -> Session {
    Session {
        access_token: format!("tok-{user}"),
        refresh_token: None,
        expires_in: None,
        expires_at: None,
        token_type: None,
        user: SessionUser { id: user.to_owned(), email: Some(format!("{user}@kampus.ac.id")) },
    }
}

fn profile(id: &str, role: &str) -> Profile {
    Profile { id: id.to_owned(), role: Some(role.to_owned()), ..Profile::default() }
}

#[test]
fn default_is_uninitialized_and_signed_out() {
    let state = AuthState::default();
    assert!(!state.initialized);
    assert!(!state.signed_in());
    assert_eq!(state.role(), Role::User);
}

#[test]
fn signing_in_starts_profile_load() {
    let mut state = AuthState::default();
    let generation = state.apply_session(Some(session("a")));
    assert!(state.initialized);
    assert!(state.loading_profile);
    assert_eq!(state.access_token().as_deref(), Some("tok-a"));

    assert!(state.apply_profile(generation, Some(profile("a", "admin"))));
    assert!(!state.loading_profile);
    assert!(state.is_admin());
}

#[test]
fn stale_profile_is_discarded() {
    let mut state = AuthState::default();
    let first = state.apply_session(Some(session("a")));
    let second = state.apply_session(Some(session("b")));

    assert!(!state.apply_profile(first, Some(profile("a", "admin"))));
    assert!(state.profile.is_none());
    assert!(state.loading_profile);

    assert!(state.apply_profile(second, Some(profile("b", "user"))));
    assert_eq!(state.profile.as_ref().map(|p| p.id.as_str()), Some("b"));
}

#[test]
fn profile_after_sign_out_is_discarded() {
    let mut state = AuthState::default();
    let generation = state.apply_session(Some(session("a")));
    state.apply_session(None);
    assert!(!state.apply_profile(generation, Some(profile("a", "admin"))));
    assert!(!state.loading_profile);
    assert!(state.profile.is_none());
}

#[test]
fn missing_profile_row_ends_loading_as_user() {
    let mut state = AuthState::default();
    let generation = state.apply_session(Some(session("a")));
    assert!(state.apply_profile(generation, None));
    assert!(!state.loading_profile);
    assert_eq!(state.role(), Role::User);
    assert_eq!(state.display_name(), "a@kampus.ac.id");
}

#[test]
fn restore_keeps_live_session() {
    let mut live = session("a");
    live.expires_at = Some(10_000);
    assert_eq!(restore_plan(Some(live.clone()), 5_000), Restore::Publish(Some(live)));
    assert_eq!(restore_plan(Some(session("b")), 5_000), Restore::Publish(Some(session("b"))));
    assert_eq!(restore_plan(None, 5_000), Restore::Publish(None));
}

#[test]
fn restore_refreshes_expired_session() {
    let mut stale = session("a");
    stale.expires_at = Some(1);
    stale.refresh_token = Some("r".into());
    assert_eq!(restore_plan(Some(stale), 5_000), Restore::Refresh("r".into()));
}

#[test]
fn expired_session_without_refresh_token_is_signed_out() {
    let mut stale = session("a");
    stale.expires_at = Some(1);
    let Restore::Publish(published) = restore_plan(Some(stale), 5_000) else {
        panic!("expected publish");
    };
    let mut state = AuthState::default();
    state.apply_session(published);
    assert!(state.initialized);
    assert!(!state.signed_in());
    assert_eq!(
        crate::util::route_guard::decide_route(&state, None),
        crate::util::route_guard::RouteDecision::RedirectToLogin
    );
}
