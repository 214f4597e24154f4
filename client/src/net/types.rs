//! Domain DTOs for the auth, profile, and metrics collections.
//!
//! DESIGN
//! ======
//! These types mirror the rows and token payloads returned by the hosted
//! backend so serde round-trips stay lossless. Enum wire values are the
//! lowercase/snake_case strings stored in the backend tables.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Open key/value payload attached to a conversion event.
pub type EventData = serde_json::Map<String, serde_json::Value>;

/// Account status of a professor profile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileStatus {
    #[default]
    Active,
    Inactive,
    Suspended,
}

impl ProfileStatus {
    /// Display label used on the dashboard.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::Inactive => "Inativo",
            Self::Suspended => "Suspenso",
        }
    }
}

/// Professor profile row from the `professors` collection.
///
/// Provisioned by the backend on signup; read-only from the client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Profile identifier (UUID string). Used as `professor_id` in metrics.
    pub id: String,
    /// Linked auth account identifier (UUID string).
    pub user_id: String,
    /// Display name.
    pub name: String,
    /// Contact email.
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Plan identifier (e.g. `"free"`, `"pro"`).
    pub plan: String,
    #[serde(default)]
    pub status: ProfileStatus,
    /// Maximum number of students this professor may manage.
    pub max_students: u32,
    /// Feature-module name to enabled flag.
    #[serde(default)]
    pub modules: BTreeMap<String, bool>,
    /// ISO 8601 creation timestamp, if returned.
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl UserProfile {
    /// Whether a feature module is enabled. Modules absent from the map are enabled.
    #[must_use]
    pub fn module_enabled(&self, module: &str) -> bool {
        self.modules.get(module).copied().unwrap_or(true)
    }
}

/// Coarse role attached to an authenticated account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthRole {
    Admin,
    #[default]
    Professor,
}

/// The authenticated user as exposed through the auth context.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    pub email: Option<String>,
    pub role: AuthRole,
    pub profile: Option<UserProfile>,
}

/// Role value stored in the `user_roles` collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Teacher,
}

impl UserRole {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Admin => "Administrador",
            Self::Teacher => "Professor",
        }
    }
}

/// A single `user_roles` row as selected by the role lookup.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub role: UserRole,
}

/// Identity embedded in a session token response.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    /// ISO 8601 timestamp of the previous sign-in, if reported.
    #[serde(default)]
    pub last_sign_in_at: Option<String>,
}

/// An authenticated session as returned by the token endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    /// Lifetime in seconds relative to issue time.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Absolute expiry in unix seconds.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: SessionUser,
}

fn default_token_type() -> String {
    "bearer".to_owned()
}

impl Session {
    /// Fill `expires_at` from `expires_in` when the server omitted it.
    #[must_use]
    pub fn with_expiry_from(mut self, now_secs: i64) -> Self {
        if self.expires_at.is_none() {
            self.expires_at = self.expires_in.map(|secs| now_secs.saturating_add(secs));
        }
        self
    }

    /// True when the session expires within `margin_secs` of `now_secs`.
    ///
    /// Sessions without a known expiry are treated as live.
    #[must_use]
    pub fn expires_within(&self, now_secs: i64, margin_secs: i64) -> bool {
        self.expires_at
            .is_some_and(|expires_at| expires_at.saturating_sub(margin_secs) <= now_secs)
    }
}

/// Named conversion events recorded for product analytics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionEventType {
    Signup,
    FirstLogin,
    FirstStudent,
    LimitReached,
    UpgradeClick,
}

/// Row appended to the `conversion_metrics` collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversionMetric {
    pub professor_id: String,
    pub event_type: ConversionEventType,
    pub event_data: EventData,
}
