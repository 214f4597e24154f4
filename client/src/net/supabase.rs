//! Supabase implementation of [`Backend`].
//!
//! Client-side (hydrate): GoTrue token/logout endpoints and PostgREST row
//! endpoints over `gloo-net`, with the session persisted in `localStorage`.
//! Server-side (SSR): always signed out; network operations return
//! [`BackendError::Unavailable`].
//!
//! SESSION LIFECYCLE
//! =================
//! `get_session` refreshes a session that expires within
//! `REFRESH_MARGIN_SECS`. Refresh is single-flight: callers that find a
//! refresh in progress await the same exchange instead of spending the
//! refresh token again. A refresh emits `TokenRefreshed`; a refresh the
//! server rejects clears the session and emits `SignedOut`, unless the stored
//! session was replaced meanwhile. Transport errors leave the stored session
//! untouched.
//!
//! Row inserts require a signed-in session; reads fall back to the anon key.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};

use super::backend::{AuthChangeEvent, AuthListener, AuthListeners, AuthSubscription, Backend, BackendError, Filter};
use super::config::SupabaseConfig;
use super::grant::TokenGrant;
use super::types::Session;
use crate::util::storage;

/// `localStorage` key holding the serialized session.
pub const SESSION_STORAGE_KEY: &str = "tutordesk.auth.session";

/// Refresh sessions expiring within this many seconds.
pub const REFRESH_MARGIN_SECS: i64 = 60;

#[cfg(feature = "hydrate")]
const PGRST_SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

type PendingRefresh = Shared<LocalBoxFuture<'static, Result<Session, BackendError>>>;

/// Session state shared with the refresh future, which settles even if the
/// caller that started it is dropped.
#[derive(Default)]
struct SessionStore {
    session: RefCell<Option<Session>>,
    listeners: AuthListeners,
    refreshing: RefCell<Option<PendingRefresh>>,
}

impl SessionStore {
    fn current(&self) -> Option<Session> {
        self.session.borrow().clone()
    }

    fn holds_refresh_token(&self, refresh_token: &str) -> bool {
        self.session
            .borrow()
            .as_ref()
            .is_some_and(|s| s.refresh_token == refresh_token)
    }

    fn store(&self, session: Option<Session>) {
        match &session {
            Some(s) => storage::write_json(SESSION_STORAGE_KEY, s),
            None => storage::forget(SESSION_STORAGE_KEY),
        }
        *self.session.borrow_mut() = session;
    }
}

/// Backend client for a Supabase project.
pub struct SupabaseClient {
    config: SupabaseConfig,
    grant: Rc<dyn TokenGrant>,
    clock: fn() -> i64,
    store: Rc<SessionStore>,
}

impl SupabaseClient {
    /// Create a client, restoring any session persisted by a previous visit.
    #[must_use]
    pub fn new(config: SupabaseConfig) -> Self {
        #[cfg(feature = "hydrate")]
        let grant: Rc<dyn TokenGrant> = Rc::new(super::grant::HttpTokenGrant::new(config.clone()));
        #[cfg(not(feature = "hydrate"))]
        let grant: Rc<dyn TokenGrant> = Rc::new(super::grant::UnavailableGrant);
        Self::with_grant(config, grant, now_secs)
    }

    /// Create a client over an explicit token grant and clock.
    #[must_use]
    pub fn with_grant(config: SupabaseConfig, grant: Rc<dyn TokenGrant>, clock: fn() -> i64) -> Self {
        let store = SessionStore {
            session: RefCell::new(storage::read_json(SESSION_STORAGE_KEY)),
            ..SessionStore::default()
        };
        Self { config, grant, clock, store: Rc::new(store) }
    }

    #[must_use]
    pub fn config(&self) -> &SupabaseConfig {
        &self.config
    }

    fn store_session(&self, session: Option<Session>) {
        self.store.store(session);
    }

    #[cfg(feature = "hydrate")]
    fn authorization(&self) -> String {
        authorization_header(self.store.session.borrow().as_ref(), &self.config.anon_key)
    }

    /// Join the in-flight refresh, or start one for `stale`.
    async fn refresh(&self, stale: Session) -> Result<Session, BackendError> {
        let pending = self.store.refreshing.borrow().clone();
        let pending = match pending {
            Some(pending) => pending,
            None => {
                let pending = refresh_task(self.grant.clone(), self.store.clone(), self.clock, stale).shared();
                *self.store.refreshing.borrow_mut() = Some(pending.clone());
                pending
            }
        };
        pending.await
    }
}

/// Exchange `stale.refresh_token` and apply the outcome to `store`.
fn refresh_task(
    grant: Rc<dyn TokenGrant>,
    store: Rc<SessionStore>,
    clock: fn() -> i64,
    stale: Session,
) -> LocalBoxFuture<'static, Result<Session, BackendError>> {
    async move {
        let body = serde_json::json!({ "refresh_token": stale.refresh_token });
        let outcome = grant
            .post_token("refresh_token", body)
            .await
            .map(|fresh| fresh.with_expiry_from(clock()));
        store.refreshing.borrow_mut().take();

        if !store.holds_refresh_token(&stale.refresh_token) {
            leptos::logging::debug_warn!("session replaced during refresh; discarding refresh outcome");
            return store.current().ok_or(BackendError::NoSession);
        }
        match outcome {
            Ok(fresh) => {
                store.store(Some(fresh.clone()));
                store
                    .listeners
                    .emit(AuthChangeEvent::TokenRefreshed, Some(&fresh));
                Ok(fresh)
            }
            Err(e @ BackendError::Status { .. }) => {
                leptos::logging::warn!("session refresh rejected: {e}");
                store.store(None);
                store.listeners.emit(AuthChangeEvent::SignedOut, None);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
    .boxed_local()
}

#[async_trait(?Send)]
impl Backend for SupabaseClient {
    async fn get_session(&self) -> Result<Option<Session>, BackendError> {
        let Some(session) = self.store.current() else {
            return Ok(None);
        };
        if session.expires_within((self.clock)(), REFRESH_MARGIN_SECS) {
            return self.refresh(session).await.map(Some);
        }
        Ok(Some(session))
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> AuthSubscription {
        self.store.listeners.subscribe(listener)
    }

    async fn insert(&self, table: &str, row: serde_json::Value) -> Result<(), BackendError> {
        #[cfg(feature = "hydrate")]
        {
            if self.store.session.borrow().is_none() {
                return Err(BackendError::NoSession);
            }
            let url = self.config.rest_url(table);
            let resp = gloo_net::http::Request::post(&url)
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &self.authorization())
                .header("Prefer", "return=minimal")
                .json(&row)
                .map_err(request_error)?
                .send()
                .await
                .map_err(request_error)?;
            ensure_ok(resp).await?;
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (table, row);
            Err(BackendError::Unavailable)
        }
    }

    async fn select_single(
        &self,
        table: &str,
        columns: &str,
        filter: &Filter,
    ) -> Result<serde_json::Value, BackendError> {
        #[cfg(feature = "hydrate")]
        {
            let url = self.config.rest_url(table);
            let filter_value = filter.query_value();
            let resp = gloo_net::http::Request::get(&url)
                .query([("select", columns), (filter.column.as_str(), filter_value.as_str())])
                .header("apikey", &self.config.anon_key)
                .header("Authorization", &self.authorization())
                .header("Accept", PGRST_SINGLE_OBJECT)
                .send()
                .await
                .map_err(request_error)?;
            let resp = ensure_ok(resp).await?;
            resp.json::<serde_json::Value>().await.map_err(parse_error)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = (table, columns, filter);
            Err(BackendError::Unavailable)
        }
    }

    async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, BackendError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let session = self
            .grant
            .post_token("password", body)
            .await?
            .with_expiry_from((self.clock)());
        self.store_session(Some(session.clone()));
        self.store
            .listeners
            .emit(AuthChangeEvent::SignedIn, Some(&session));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let had_session = self.store.session.borrow().is_some();
        #[cfg(feature = "hydrate")]
        {
            if had_session {
                let sent = gloo_net::http::Request::post(&self.config.auth_url("logout"))
                    .header("apikey", &self.config.anon_key)
                    .header("Authorization", &self.authorization())
                    .send()
                    .await;
                if let Err(e) = sent {
                    leptos::logging::warn!("sign-out request failed: {e}");
                }
            }
        }
        self.store_session(None);
        if had_session {
            self.store.listeners.emit(AuthChangeEvent::SignedOut, None);
        }
        Ok(())
    }
}

/// `Authorization` header value: the user's access token when signed in,
/// otherwise the anon key.
#[cfg(any(test, feature = "hydrate"))]
fn authorization_header(session: Option<&Session>, anon_key: &str) -> String {
    let token = session.map_or(anon_key, |s| s.access_token.as_str());
    format!("Bearer {token}")
}

#[cfg(feature = "hydrate")]
#[allow(clippy::cast_possible_truncation)]
fn now_secs() -> i64 {
    (js_sys::Date::now() / 1000.0) as i64
}

#[cfg(not(feature = "hydrate"))]
fn now_secs() -> i64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX))
}

#[cfg(feature = "hydrate")]
async fn ensure_ok(resp: gloo_net::http::Response) -> Result<gloo_net::http::Response, BackendError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let body = resp.text().await.unwrap_or_default();
    Err(BackendError::Status { status, body })
}

#[cfg(feature = "hydrate")]
fn request_error(e: gloo_net::Error) -> BackendError {
    BackendError::Request(e.to_string())
}

#[cfg(feature = "hydrate")]
fn parse_error(e: gloo_net::Error) -> BackendError {
    BackendError::Parse(e.to_string())
}
