//! In-memory [`Backend`] for unit tests.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::backend::{AuthChangeEvent, AuthListener, AuthListeners, AuthSubscription, Backend, BackendError, Filter};
use super::types::{Session, SessionUser};

/// Build a session for `user_id` with fixed tokens.
pub(crate) fn session_for(user_id: &str) -> Session {
    Session {
        access_token: format!("at-{user_id}"),
        refresh_token: format!("rt-{user_id}"),
        token_type: "bearer".to_owned(),
        expires_in: Some(3600),
        expires_at: None,
        user: SessionUser {
            id: user_id.to_owned(),
            email: Some(format!("{user_id}@example.com")),
            last_sign_in_at: None,
        },
    }
}

pub(crate) struct MockBackend {
    session: RefCell<Result<Option<Session>, BackendError>>,
    rows: RefCell<HashMap<(String, String), Result<serde_json::Value, BackendError>>>,
    selects: RefCell<Vec<(String, String, Filter)>>,
    inserts: RefCell<Vec<(String, serde_json::Value)>>,
    insert_error: RefCell<Option<BackendError>>,
    select_gates: RefCell<VecDeque<oneshot::Receiver<()>>>,
    listeners: AuthListeners,
}

impl MockBackend {
    pub(crate) fn new() -> Self {
        Self {
            session: RefCell::new(Ok(None)),
            rows: RefCell::new(HashMap::new()),
            selects: RefCell::new(Vec::new()),
            inserts: RefCell::new(Vec::new()),
            insert_error: RefCell::new(None),
            select_gates: RefCell::new(VecDeque::new()),
            listeners: AuthListeners::new(),
        }
    }

    pub(crate) fn set_session(&self, session: Option<Session>) {
        *self.session.borrow_mut() = Ok(session);
    }

    pub(crate) fn fail_session(&self, err: BackendError) {
        *self.session.borrow_mut() = Err(err);
    }

    /// Answer selects on `table` whose filter value is `key`.
    pub(crate) fn set_row(&self, table: &str, key: &str, row: Result<serde_json::Value, BackendError>) {
        self.rows
            .borrow_mut()
            .insert((table.to_owned(), key.to_owned()), row);
    }

    pub(crate) fn fail_inserts(&self, err: BackendError) {
        *self.insert_error.borrow_mut() = Some(err);
    }

    /// Hold the next select open until the returned sender fires.
    ///
    /// The answer is captured when the select starts, not when it resumes.
    pub(crate) fn gate_next_select(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.select_gates.borrow_mut().push_back(rx);
        tx
    }

    pub(crate) fn emit(&self, event: AuthChangeEvent) {
        let session = self.session.borrow().clone().ok().flatten();
        self.listeners.emit(event, session.as_ref());
    }

    pub(crate) fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub(crate) fn selects(&self) -> Vec<(String, String, Filter)> {
        self.selects.borrow().clone()
    }

    pub(crate) fn inserts(&self) -> Vec<(String, serde_json::Value)> {
        self.inserts.borrow().clone()
    }
}

#[async_trait(?Send)]
impl Backend for MockBackend {
    async fn get_session(&self) -> Result<Option<Session>, BackendError> {
        self.session.borrow().clone()
    }

    fn on_auth_state_change(&self, listener: AuthListener) -> AuthSubscription {
        self.listeners.subscribe(listener)
    }

    async fn insert(&self, table: &str, row: serde_json::Value) -> Result<(), BackendError> {
        if let Some(err) = self.insert_error.borrow().clone() {
            return Err(err);
        }
        self.inserts.borrow_mut().push((table.to_owned(), row));
        Ok(())
    }

    async fn select_single(
        &self,
        table: &str,
        columns: &str,
        filter: &Filter,
    ) -> Result<serde_json::Value, BackendError> {
        self.selects
            .borrow_mut()
            .push((table.to_owned(), columns.to_owned(), filter.clone()));
        let answer = self
            .rows
            .borrow()
            .get(&(table.to_owned(), filter.value.clone()))
            .cloned()
            .unwrap_or_else(|| Err(BackendError::Status { status: 406, body: "0 rows".to_owned() }));
        let gate = self.select_gates.borrow_mut().pop_front();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        answer
    }

    async fn sign_in_with_password(&self, email: &str, _password: &str) -> Result<Session, BackendError> {
        let session = session_for(email);
        self.set_session(Some(session.clone()));
        self.listeners
            .emit(AuthChangeEvent::SignedIn, Some(&session));
        Ok(session)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        self.set_session(None);
        self.listeners.emit(AuthChangeEvent::SignedOut, None);
        Ok(())
    }
}
