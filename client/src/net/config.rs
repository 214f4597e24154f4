//! Hosted backend configuration baked in at build time.
//!
//! The WASM bundle has no process environment, so `SUPABASE_URL` and
//! `SUPABASE_ANON_KEY` are captured with `option_env!` when the client is
//! compiled.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use super::backend::BackendError;

/// Project URL and public (anon) API key for the hosted backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Build from the values captured at compile time.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotConfigured`] if either value is missing or invalid.
    pub fn from_build_env() -> Result<Self, BackendError> {
        Self::from_values(option_env!("SUPABASE_URL"), option_env!("SUPABASE_ANON_KEY"))
    }

    /// Validate raw values. The URL must be `http(s)://` and loses any trailing `/`.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError::NotConfigured`] naming the offending variable.
    pub fn from_values(url: Option<&str>, anon_key: Option<&str>) -> Result<Self, BackendError> {
        let url = url
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| BackendError::NotConfigured("SUPABASE_URL not set".into()))?;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(BackendError::NotConfigured(format!("SUPABASE_URL is not an http(s) URL: {url}")));
        }
        let anon_key = anon_key
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| BackendError::NotConfigured("SUPABASE_ANON_KEY not set".into()))?;

        Ok(Self { url: url.trim_end_matches('/').to_owned(), anon_key: anon_key.to_owned() })
    }

    /// Auth (GoTrue) endpoint for `path`, e.g. `token?grant_type=password`.
    #[must_use]
    pub fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.url)
    }

    /// Row (PostgREST) endpoint for `table`.
    #[must_use]
    pub fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.url)
    }
}
