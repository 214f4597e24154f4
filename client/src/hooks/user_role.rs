//! Role resolution for the signed-in account.
//!
//! LIFECYCLE
//! =========
//! A resolution cycle runs on mount and again on every auth-state change:
//! fetch the session, then the `user_roles` row for its user. Any failure
//! is logged and resolves to no role. `loading` is raised at the start of a
//! cycle and cleared when it commits.
//!
//! Cycles can overlap when notifications arrive quickly. Each cycle takes a
//! request token and only the newest token may commit. After `teardown` no
//! cycle commits and late notifications are ignored.

#[cfg(test)]
#[path = "user_role_test.rs"]
mod user_role_test;

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

use leptos::prelude::*;

use crate::net::api;
use crate::net::backend::{AuthChangeEvent, AuthListener, AuthSubscription, Backend};
use crate::net::types::{Session, UserRole};

/// Boxed local future handed to the caller-supplied spawner.
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Snapshot of the hook's observable state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoleState {
    pub user_role: Option<UserRole>,
    pub loading: bool,
}

impl Default for RoleState {
    fn default() -> Self {
        Self { user_role: None, loading: true }
    }
}

impl RoleState {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.user_role == Some(UserRole::Admin)
    }

    #[must_use]
    pub fn is_teacher(&self) -> bool {
        self.user_role == Some(UserRole::Teacher)
    }
}

/// Resolves and tracks the role of the current session's user.
pub struct RoleResolver {
    backend: Rc<dyn Backend>,
    state: RefCell<RoleState>,
    latest: Cell<u64>,
    active: Cell<bool>,
    on_change: Box<dyn Fn(RoleState)>,
    subscription: RefCell<Option<AuthSubscription>>,
}

impl RoleResolver {
    /// Create a resolver in the initial loading state. `on_change` receives
    /// every committed state.
    pub fn new(backend: Rc<dyn Backend>, on_change: impl Fn(RoleState) + 'static) -> Rc<Self> {
        Rc::new(Self {
            backend,
            state: RefCell::new(RoleState::default()),
            latest: Cell::new(0),
            active: Cell::new(true),
            on_change: Box::new(on_change),
            subscription: RefCell::new(None),
        })
    }

    #[must_use]
    pub fn state(&self) -> RoleState {
        *self.state.borrow()
    }

    /// Run one resolution cycle.
    pub async fn resolve(&self) {
        if !self.active.get() {
            return;
        }
        let token = self.latest.get() + 1;
        self.latest.set(token);
        let previous = self.state();
        self.commit(RoleState { loading: true, ..previous });

        let role = self.lookup().await;

        if !self.active.get() {
            return;
        }
        if self.latest.get() != token {
            leptos::logging::debug_warn!("user role: discarding stale result (cycle {token})");
            return;
        }
        self.commit(RoleState { user_role: role, loading: false });
    }

    async fn lookup(&self) -> Option<UserRole> {
        let session = match self.backend.get_session().await {
            Ok(Some(session)) => session,
            Ok(None) => return None,
            Err(e) => {
                leptos::logging::error!("user role: session fetch failed: {e}");
                return None;
            }
        };
        match api::fetch_user_role(self.backend.as_ref(), &session.user.id).await {
            Ok(role) => Some(role),
            Err(e) => {
                leptos::logging::error!("user role: lookup failed for {}: {e}", session.user.id);
                None
            }
        }
    }

    /// Re-resolve on every auth-state change, running each cycle via `spawn`.
    pub fn subscribe(self: &Rc<Self>, spawn: impl Fn(LocalTask) + 'static) {
        let weak = Rc::downgrade(self);
        let listener: AuthListener = Rc::new(move |event: AuthChangeEvent, _session: Option<Session>| {
            let Some(resolver) = weak.upgrade() else {
                return;
            };
            if !resolver.active.get() {
                return;
            }
            leptos::logging::log!("user role: re-resolving after {event:?}");
            spawn(Box::pin(async move { resolver.resolve().await }));
        });
        let subscription = self.backend.on_auth_state_change(listener);
        *self.subscription.borrow_mut() = Some(subscription);
    }

    /// Stop committing and release the auth subscription.
    pub fn teardown(&self) {
        self.active.set(false);
        let subscription = self.subscription.borrow_mut().take();
        drop(subscription);
    }

    fn commit(&self, next: RoleState) {
        *self.state.borrow_mut() = next;
        (self.on_change)(next);
    }
}

/// Reactive view returned by [`use_user_role`].
#[derive(Clone, Copy)]
pub struct UserRoleHandle {
    pub user_role: Signal<Option<UserRole>>,
    pub loading: Signal<bool>,
    pub is_admin: Signal<bool>,
    pub is_teacher: Signal<bool>,
}

/// Resolve the current user's role and keep it in sync with the session.
pub fn use_user_role() -> UserRoleHandle {
    let state = RwSignal::new(RoleState::default());

    #[cfg(feature = "hydrate")]
    {
        use crate::state::backend::BackendContext;

        match use_context::<BackendContext>().and_then(|ctx| ctx.try_get_value()) {
            Some(backend) => {
                let resolver = RoleResolver::new(backend, move |next| {
                    let _ = state.try_set(next);
                });
                resolver.subscribe(|task| leptos::task::spawn_local(task));
                let first = resolver.clone();
                leptos::task::spawn_local(async move { first.resolve().await });

                let stored = StoredValue::new_local(resolver);
                on_cleanup(move || {
                    if let Some(resolver) = stored.try_get_value() {
                        resolver.teardown();
                    }
                });
            }
            None => {
                leptos::logging::error!("user role: backend context missing");
                state.set(RoleState { user_role: None, loading: false });
            }
        }
    }

    UserRoleHandle {
        user_role: Signal::derive(move || state.get().user_role),
        loading: Signal::derive(move || state.get().loading),
        is_admin: Signal::derive(move || state.get().is_admin()),
        is_teacher: Signal::derive(move || state.get().is_teacher()),
    }
}
