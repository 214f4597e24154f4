//! Auth-session state for the current browser user.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AuthState` is provided as `RwSignal<AuthState>` context. Route guards,
//! the sidebar, and the metrics hook read it; only the loader in this module
//! writes it.
//!
//! LIFECYCLE
//! =========
//! `loading` starts true and is raised again only while a re-resolution
//! triggered by an auth-state change is in flight. `initialized` flips to true
//! on the first settle and never reverts.
//!
//! Reloads can overlap when auth events arrive back to back. Each reload takes
//! a request token and only the newest one settles, so an older lookup can
//! neither restore a signed-out user nor clear `loading` early.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::net::api;
use crate::net::backend::Backend;
use crate::net::types::{AuthRole, AuthUser, Session, SessionUser, UserProfile, UserRole};

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, PartialEq)]
pub struct AuthState {
    pub user: Option<AuthUser>,
    pub session: Option<Session>,
    pub loading: bool,
    pub initialized: bool,
}

impl Default for AuthState {
    fn default() -> Self {
        Self { user: None, session: None, loading: true, initialized: false }
    }
}

impl AuthState {
    /// Mark a re-resolution as in flight. Keeps the current user visible.
    pub fn begin_refresh(&mut self) {
        self.loading = true;
    }

    /// Record the outcome of a resolution.
    pub fn settle(&mut self, user: Option<AuthUser>, session: Option<Session>) {
        self.user = user;
        self.session = session;
        self.loading = false;
        self.initialized = true;
    }

    /// Profile id of the signed-in professor, if one is resolved.
    #[must_use]
    pub fn profile_id(&self) -> Option<String> {
        self.user
            .as_ref()
            .and_then(|user| user.profile.as_ref())
            .map(|profile| profile.id.clone())
            .filter(|id| !id.is_empty())
    }

    #[must_use]
    pub fn profile(&self) -> Option<&UserProfile> {
        self.user.as_ref().and_then(|user| user.profile.as_ref())
    }
}

/// Combine the session identity with the looked-up role and profile.
#[must_use]
pub fn build_auth_user(identity: &SessionUser, role: Option<UserRole>, profile: Option<UserProfile>) -> AuthUser {
    let role = match role {
        Some(UserRole::Admin) => AuthRole::Admin,
        Some(UserRole::Teacher) | None => AuthRole::Professor,
    };
    let email = identity
        .email
        .clone()
        .or_else(|| profile.as_ref().map(|p| p.email.clone()));
    AuthUser { id: identity.id.clone(), email, role, profile }
}

/// Resolve the current user from the backend.
///
/// Session, role, and profile failures are logged and degrade to `None`;
/// this never fails.
pub async fn load_auth_user(backend: &dyn Backend) -> (Option<AuthUser>, Option<Session>) {
    let session = match backend.get_session().await {
        Ok(Some(session)) => session,
        Ok(None) => return (None, None),
        Err(e) => {
            leptos::logging::error!("auth: session fetch failed: {e}");
            return (None, None);
        }
    };

    let user_id = session.user.id.as_str();
    let role = match api::fetch_user_role(backend, user_id).await {
        Ok(role) => Some(role),
        Err(e) => {
            leptos::logging::warn!("auth: role lookup failed for {user_id}: {e}");
            None
        }
    };
    let profile = match api::fetch_professor_profile(backend, user_id).await {
        Ok(profile) => Some(profile),
        Err(e) => {
            leptos::logging::warn!("auth: profile lookup failed for {user_id}: {e}");
            None
        }
    };

    let user = build_auth_user(&session.user, role, profile);
    (Some(user), Some(session))
}

/// Runs [`load_auth_user`] and hands the newest result to a settle callback.
pub struct AuthLoader {
    backend: Rc<dyn Backend>,
    latest: Cell<u64>,
    on_settle: Box<dyn Fn(Option<AuthUser>, Option<Session>)>,
}

impl AuthLoader {
    pub fn new(backend: Rc<dyn Backend>, on_settle: impl Fn(Option<AuthUser>, Option<Session>) + 'static) -> Self {
        Self { backend, latest: Cell::new(0), on_settle: Box::new(on_settle) }
    }

    /// Resolve the current user. Dropped if a newer reload started meanwhile.
    pub async fn reload(&self) {
        let token = self.latest.get() + 1;
        self.latest.set(token);

        let (user, session) = load_auth_user(self.backend.as_ref()).await;

        if self.latest.get() != token {
            leptos::logging::debug_warn!("auth: discarding stale reload ({token})");
            return;
        }
        (self.on_settle)(user, session);
    }
}

/// Provide `RwSignal<AuthState>` and keep it in sync with the backend.
///
/// In the browser this resolves once on mount and again on every auth-state
/// change; the subscription is released when the owning scope is cleaned up.
pub fn provide_auth_context() -> leptos::prelude::RwSignal<AuthState> {
    use leptos::prelude::*;

    let auth = RwSignal::new(AuthState::default());
    provide_context(auth);

    #[cfg(feature = "hydrate")]
    {
        use crate::net::backend::{AuthChangeEvent, AuthListener};
        use crate::state::backend::BackendContext;

        let Some(backend) = use_context::<BackendContext>().and_then(|ctx| ctx.try_get_value()) else {
            leptos::logging::error!("auth: backend context missing");
            auth.update(|a| a.settle(None, None));
            return auth;
        };

        let loader = Rc::new(AuthLoader::new(backend.clone(), move |user, session| {
            let _ = auth.try_update(|a| a.settle(user, session));
        }));
        let reload = move || {
            let loader = loader.clone();
            leptos::task::spawn_local(async move { loader.reload().await });
        };

        reload();

        let listener: AuthListener = Rc::new(move |event: AuthChangeEvent, _session: Option<Session>| {
            leptos::logging::log!("auth: {event:?}");
            let _ = auth.try_update(AuthState::begin_refresh);
            reload();
        });
        let subscription = StoredValue::new_local(Some(backend.on_auth_state_change(listener)));
        on_cleanup(move || {
            let _ = subscription.try_update_value(Option::take);
        });
    }

    auth
}
