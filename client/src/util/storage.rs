//! Persistence of small JSON values in the browser's `localStorage`.
//!
//! Holds the backend session and the sidebar preference. Without a browser
//! there is no store: reads come back empty and writes are dropped, so SSR
//! renders the same page for every visitor. An entry that no longer parses
//! is deleted on read.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use serde::Serialize;
use serde::de::DeserializeOwned;

#[cfg(feature = "hydrate")]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok().flatten()
}

/// Result of decoding a stored entry.
#[derive(Debug, PartialEq, Eq)]
enum Entry<T> {
    Missing,
    Corrupt,
    Value(T),
}

fn decode<T: DeserializeOwned>(raw: Option<&str>) -> Entry<T> {
    match raw {
        None => Entry::Missing,
        Some(raw) => serde_json::from_str(raw).map_or(Entry::Corrupt, Entry::Value),
    }
}

/// Read the value stored under `key`.
pub fn read_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    #[cfg(feature = "hydrate")]
    let raw = local_storage().and_then(|store| store.get_item(key).ok().flatten());
    #[cfg(not(feature = "hydrate"))]
    let raw: Option<String> = None;

    match decode(raw.as_deref()) {
        Entry::Value(value) => Some(value),
        Entry::Missing => None,
        Entry::Corrupt => {
            leptos::logging::warn!("storage: dropping unreadable entry {key}");
            forget(key);
            None
        }
    }
}

/// Store `value` under `key`, replacing any previous entry.
pub fn write_json<T: Serialize>(key: &str, value: &T) {
    let raw = match serde_json::to_string(value) {
        Ok(raw) => raw,
        Err(e) => {
            leptos::logging::error!("storage: cannot encode {key}: {e}");
            return;
        }
    };
    #[cfg(feature = "hydrate")]
    {
        if let Some(store) = local_storage() {
            let _ = store.set_item(key, &raw);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = (key, raw);
    }
}

/// Delete the entry under `key`.
pub fn forget(key: &str) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(store) = local_storage() {
            let _ = store.remove_item(key);
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = key;
    }
}
