use std::cell::RefCell;

use super::*;
use crate::net::api::{PROFESSORS_TABLE, USER_ROLES_TABLE};
use crate::net::backend::BackendError;
use crate::net::backend_mock::{MockBackend, session_for};
use crate::net::types::ProfileStatus;

fn make_profile(id: &str, email: &str) -> UserProfile {
    serde_json::from_value(serde_json::json!({
        "id": id,
        "user_id": "u-1",
        "name": "Ana",
        "email": email,
        "plan": "free",
        "max_students": 10
    }))
    .unwrap()
}

// =============================================================
// AuthState
// =============================================================

#[test]
fn auth_state_default_is_loading_and_uninitialized() {
    let state = AuthState::default();
    assert!(state.user.is_none());
    assert!(state.session.is_none());
    assert!(state.loading);
    assert!(!state.initialized);
}

#[test]
fn settle_records_user_and_clears_loading() {
    let mut state = AuthState::default();
    let user = build_auth_user(&session_for("u-1").user, None, None);
    state.settle(Some(user.clone()), Some(session_for("u-1")));
    assert_eq!(state.user, Some(user));
    assert!(!state.loading);
    assert!(state.initialized);
}

#[test]
fn begin_refresh_keeps_user_visible() {
    let mut state = AuthState::default();
    let user = build_auth_user(&session_for("u-1").user, None, None);
    state.settle(Some(user), None);
    state.begin_refresh();
    assert!(state.loading);
    assert!(state.initialized);
    assert!(state.user.is_some());
}

#[test]
fn profile_id_requires_non_empty_profile_id() {
    let identity = session_for("u-1").user;
    let mut state = AuthState::default();
    assert_eq!(state.profile_id(), None);

    state.settle(Some(build_auth_user(&identity, None, None)), None);
    assert_eq!(state.profile_id(), None);

    state.settle(Some(build_auth_user(&identity, None, Some(make_profile("", "a@b.com")))), None);
    assert_eq!(state.profile_id(), None);

    state.settle(Some(build_auth_user(&identity, None, Some(make_profile("p-1", "a@b.com")))), None);
    assert_eq!(state.profile_id().as_deref(), Some("p-1"));
    assert_eq!(state.profile().map(|p| p.status), Some(ProfileStatus::Active));
}

// =============================================================
// build_auth_user
// =============================================================

#[test]
fn build_auth_user_maps_admin_role() {
    let user = build_auth_user(&session_for("u-1").user, Some(UserRole::Admin), None);
    assert_eq!(user.role, AuthRole::Admin);
    assert_eq!(user.id, "u-1");
}

#[test]
fn build_auth_user_defaults_to_professor() {
    let identity = session_for("u-1").user;
    assert_eq!(build_auth_user(&identity, Some(UserRole::Teacher), None).role, AuthRole::Professor);
    assert_eq!(build_auth_user(&identity, None, None).role, AuthRole::Professor);
}

#[test]
fn build_auth_user_falls_back_to_profile_email() {
    let mut identity = session_for("u-1").user;
    identity.email = None;
    let user = build_auth_user(&identity, None, Some(make_profile("p-1", "ana@example.com")));
    assert_eq!(user.email.as_deref(), Some("ana@example.com"));
}

// =============================================================
// load_auth_user
// =============================================================

#[tokio::test]
async fn load_auth_user_without_session_is_signed_out() {
    let backend = MockBackend::new();
    assert_eq!(load_auth_user(&backend).await, (None, None));
    assert!(backend.selects().is_empty());
}

#[tokio::test]
async fn load_auth_user_session_error_is_signed_out() {
    let backend = MockBackend::new();
    backend.fail_session(BackendError::Request("offline".to_owned()));
    assert_eq!(load_auth_user(&backend).await, (None, None));
}

#[tokio::test]
async fn load_auth_user_combines_role_and_profile() {
    let backend = MockBackend::new();
    backend.set_session(Some(session_for("u-1")));
    backend.set_row(USER_ROLES_TABLE, "u-1", Ok(serde_json::json!({ "role": "admin" })));
    backend.set_row(
        PROFESSORS_TABLE,
        "u-1",
        Ok(serde_json::to_value(make_profile("p-1", "ana@example.com")).unwrap()),
    );

    let (user, session) = load_auth_user(&backend).await;
    let user = user.unwrap();
    assert_eq!(user.role, AuthRole::Admin);
    assert_eq!(user.profile.map(|p| p.id).as_deref(), Some("p-1"));
    assert_eq!(session, Some(session_for("u-1")));
}

#[tokio::test]
async fn load_auth_user_missing_rows_degrade_to_professor_without_profile() {
    let backend = MockBackend::new();
    backend.set_session(Some(session_for("u-1")));

    let (user, session) = load_auth_user(&backend).await;
    let user = user.unwrap();
    assert_eq!(user.role, AuthRole::Professor);
    assert!(user.profile.is_none());
    assert_eq!(user.email.as_deref(), Some("u-1@example.com"));
    assert!(session.is_some());
}

// =============================================================
// AuthLoader
// =============================================================

fn recording_loader(backend: &Rc<MockBackend>) -> (AuthLoader, Rc<RefCell<Vec<Option<String>>>>) {
    let settled = Rc::new(RefCell::new(Vec::new()));
    let sink = settled.clone();
    let loader = AuthLoader::new(backend.clone(), move |user: Option<AuthUser>, _session| {
        sink.borrow_mut().push(user.map(|u| u.id));
    });
    (loader, settled)
}

#[tokio::test]
async fn reload_settles_with_current_user() {
    let backend = Rc::new(MockBackend::new());
    backend.set_session(Some(session_for("u-1")));
    let (loader, settled) = recording_loader(&backend);

    loader.reload().await;
    assert_eq!(*settled.borrow(), vec![Some("u-1".to_owned())]);
}

#[tokio::test]
async fn stale_reload_cannot_restore_signed_out_user() {
    let backend = Rc::new(MockBackend::new());
    backend.set_session(Some(session_for("u-1")));
    let gate = backend.gate_next_select();
    let (loader, settled) = recording_loader(&backend);

    let slow = loader.reload();
    let fast = async {
        assert_eq!(backend.selects().len(), 1, "first reload should be parked on the role lookup");
        backend.set_session(None);
        loader.reload().await;
        assert_eq!(*settled.borrow(), vec![None]);
        gate.send(()).unwrap();
    };
    tokio::join!(slow, fast);

    assert_eq!(*settled.borrow(), vec![None]);
}
