//! Collaborator seam for the hosted auth + row-storage backend.
//!
//! DESIGN
//! ======
//! Hooks and the auth context only ever talk to `dyn Backend`. The browser
//! build plugs in `SupabaseClient`; tests plug in a mock. The trait is
//! `?Send` because everything runs on the single-threaded browser event loop.

#[cfg(test)]
#[path = "backend_test.rs"]
mod backend_test;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use async_trait::async_trait;

use super::types::Session;

/// Errors surfaced by backend calls.
///
/// Callers in this crate log these and fall back to safe defaults; only the
/// login form shows them to the user.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BackendError {
    /// Backend URL or key missing or malformed.
    #[error("backend not configured: {0}")]
    NotConfigured(String),

    /// The HTTP request could not be sent or completed.
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("response error: status {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body did not match the expected shape.
    #[error("response parse failed: {0}")]
    Parse(String),

    /// The operation requires a signed-in session.
    #[error("no active session")]
    NoSession,

    /// Browser-only operation invoked outside the browser.
    #[error("not available on server")]
    Unavailable,
}

/// Auth-state notifications delivered to subscribers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthChangeEvent {
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

/// Equality filter selecting a single row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    #[must_use]
    pub fn eq(column: &str, value: &str) -> Self {
        Self { column: column.to_owned(), value: value.to_owned() }
    }

    /// Query-string value in PostgREST operator syntax (`eq.<value>`).
    #[must_use]
    pub fn query_value(&self) -> String {
        format!("eq.{}", self.value)
    }
}

/// Callback invoked on every auth-state change.
pub type AuthListener = Rc<dyn Fn(AuthChangeEvent, Option<Session>)>;

/// Hosted auth + storage operations used by this application.
#[async_trait(?Send)]
pub trait Backend {
    /// Return the current session, or `None` when signed out.
    async fn get_session(&self) -> Result<Option<Session>, BackendError>;

    /// Register `listener` for auth-state changes until the returned handle is dropped.
    fn on_auth_state_change(&self, listener: AuthListener) -> AuthSubscription;

    /// Append `row` to `table`.
    async fn insert(&self, table: &str, row: serde_json::Value) -> Result<(), BackendError>;

    /// Select exactly one row of `table` matching `filter`, projecting `columns`.
    async fn select_single(
        &self,
        table: &str,
        columns: &str,
        filter: &Filter,
    ) -> Result<serde_json::Value, BackendError>;

    /// Exchange email + password for a session.
    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, BackendError>;

    /// End the current session.
    async fn sign_out(&self) -> Result<(), BackendError>;
}

// =============================================================================
// LISTENER REGISTRY
// =============================================================================

#[derive(Default)]
struct ListenerTable {
    next_id: u64,
    entries: Vec<(u64, AuthListener)>,
}

/// Registry of auth-state listeners shared by backend implementations.
#[derive(Clone, Default)]
pub struct AuthListeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl AuthListeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `listener`; it stays registered until the subscription is released.
    pub fn subscribe(&self, listener: AuthListener) -> AuthSubscription {
        let id = {
            let mut table = self.table.borrow_mut();
            let id = table.next_id;
            table.next_id += 1;
            table.entries.push((id, listener));
            id
        };
        let table: Weak<RefCell<ListenerTable>> = Rc::downgrade(&self.table);
        AuthSubscription::new(move || {
            if let Some(table) = table.upgrade() {
                table.borrow_mut().entries.retain(|(entry_id, _)| *entry_id != id);
            }
        })
    }

    /// Notify every registered listener.
    ///
    /// Listeners are snapshotted first so a callback may unsubscribe itself.
    pub fn emit(&self, event: AuthChangeEvent, session: Option<&Session>) {
        let listeners: Vec<AuthListener> = self
            .table
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(event, session.cloned());
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.table.borrow().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Handle for an auth-state subscription. Dropping it unsubscribes.
#[must_use = "dropping the subscription unsubscribes immediately"]
pub struct AuthSubscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl AuthSubscription {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    /// A subscription that was never registered anywhere.
    pub fn detached() -> Self {
        Self { release: None }
    }

    /// Release the subscription now.
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for AuthSubscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for AuthSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSubscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

// =============================================================================
// OFFLINE BACKEND
// =============================================================================

/// Backend used when no hosted backend is configured.
///
/// Always signed out; writes fail with [`BackendError::NotConfigured`].
#[derive(Clone, Debug)]
pub struct OfflineBackend {
    reason: String,
}

impl OfflineBackend {
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self { reason: reason.into() }
    }

    fn not_configured(&self) -> BackendError {
        BackendError::NotConfigured(self.reason.clone())
    }
}

#[async_trait(?Send)]
impl Backend for OfflineBackend {
    async fn get_session(&self) -> Result<Option<Session>, BackendError> {
        Ok(None)
    }

    fn on_auth_state_change(&self, _listener: AuthListener) -> AuthSubscription {
        AuthSubscription::detached()
    }

    async fn insert(&self, _table: &str, _row: serde_json::Value) -> Result<(), BackendError> {
        Err(self.not_configured())
    }

    async fn select_single(
        &self,
        _table: &str,
        _columns: &str,
        _filter: &Filter,
    ) -> Result<serde_json::Value, BackendError> {
        Err(self.not_configured())
    }

    async fn sign_in_with_password(&self, _email: &str, _password: &str) -> Result<Session, BackendError> {
        Err(self.not_configured())
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        Ok(())
    }
}
