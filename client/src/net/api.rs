//! Typed queries against the backend collections.
//!
//! ERROR HANDLING
//! ==============
//! These helpers return `Result` so each caller chooses its own fallback;
//! the hooks log and degrade to `None`, the login form shows the message.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use super::backend::{Backend, BackendError, Filter};
use super::types::{ConversionMetric, RoleRecord, UserProfile, UserRole};

/// Role rows keyed by `user_id`.
pub const USER_ROLES_TABLE: &str = "user_roles";
/// Append-only conversion event log.
pub const CONVERSION_METRICS_TABLE: &str = "conversion_metrics";
/// Professor profile rows keyed by `user_id`.
pub const PROFESSORS_TABLE: &str = "professors";

const PROFILE_COLUMNS: &str =
    "id,user_id,name,email,phone,bio,avatar_url,plan,status,max_students,modules,created_at,updated_at";

/// Look up the role recorded for `user_id`.
///
/// # Errors
///
/// Returns the backend error, or [`BackendError::Parse`] for an unknown role value.
pub async fn fetch_user_role(backend: &dyn Backend, user_id: &str) -> Result<UserRole, BackendError> {
    let row = backend
        .select_single(USER_ROLES_TABLE, "role", &Filter::eq("user_id", user_id))
        .await?;
    let record: RoleRecord = serde_json::from_value(row).map_err(|e| BackendError::Parse(e.to_string()))?;
    Ok(record.role)
}

/// Fetch the professor profile linked to `user_id`.
///
/// # Errors
///
/// Returns the backend error, or [`BackendError::Parse`] for a malformed row.
pub async fn fetch_professor_profile(backend: &dyn Backend, user_id: &str) -> Result<UserProfile, BackendError> {
    let row = backend
        .select_single(PROFESSORS_TABLE, PROFILE_COLUMNS, &Filter::eq("user_id", user_id))
        .await?;
    serde_json::from_value(row).map_err(|e| BackendError::Parse(e.to_string()))
}

/// Append one conversion event row.
///
/// # Errors
///
/// Returns the backend error unchanged.
pub async fn insert_conversion_metric(backend: &dyn Backend, metric: &ConversionMetric) -> Result<(), BackendError> {
    let row = serde_json::to_value(metric).map_err(|e| BackendError::Parse(e.to_string()))?;
    backend.insert(CONVERSION_METRICS_TABLE, row).await
}
