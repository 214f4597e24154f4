//! Backend handle shared through Leptos context.
//!
//! DESIGN
//! ======
//! `Rc<dyn Backend>` is neither `Send` nor `Sync`, so it is kept in a
//! local-storage `StoredValue` whose handle is `Copy` and can live in context.
//! Only the browser build provides it; SSR renders without a backend.

use std::rc::Rc;

use leptos::prelude::*;

use crate::net::backend::{Backend, OfflineBackend};
use crate::net::config::SupabaseConfig;
use crate::net::supabase::SupabaseClient;

/// Context type carrying the active backend.
pub type BackendContext = StoredValue<Rc<dyn Backend>, LocalStorage>;

/// Build the backend from build-time configuration.
///
/// Falls back to [`OfflineBackend`] when configuration is missing, so the UI
/// still renders in a signed-out state.
pub fn build_backend() -> Rc<dyn Backend> {
    match SupabaseConfig::from_build_env() {
        Ok(config) => Rc::new(SupabaseClient::new(config)),
        Err(e) => {
            leptos::logging::warn!("backend not configured, running offline: {e}");
            Rc::new(OfflineBackend::new(e.to_string()))
        }
    }
}

/// Provide `backend` as [`BackendContext`] and return the handle.
pub fn provide_backend(backend: Rc<dyn Backend>) -> BackendContext {
    let ctx: BackendContext = StoredValue::new_local(backend);
    provide_context(ctx);
    ctx
}
