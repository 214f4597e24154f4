use super::*;

// =============================================================
// Helpers
// =============================================================

fn profile_json() -> serde_json::Value {
    serde_json::json!({
        "id": "p-1",
        "user_id": "u-1",
        "name": "Ana Souza",
        "email": "ana@example.com",
        "phone": null,
        "plan": "free",
        "status": "suspended",
        "max_students": 5,
        "modules": { "finance": false, "schedule": true },
        "created_at": "2024-03-05T14:30:00Z"
    })
}

fn make_session(expires_at: Option<i64>, expires_in: Option<i64>) -> Session {
    Session {
        access_token: "at".to_owned(),
        refresh_token: "rt".to_owned(),
        token_type: "bearer".to_owned(),
        expires_in,
        expires_at,
        user: SessionUser { id: "u-1".to_owned(), email: None, last_sign_in_at: None },
    }
}

// =============================================================
// Enum wire values
// =============================================================

#[test]
fn user_role_uses_lowercase_wire_values() {
    assert_eq!(serde_json::to_string(&UserRole::Admin).unwrap(), "\"admin\"");
    assert_eq!(serde_json::to_string(&UserRole::Teacher).unwrap(), "\"teacher\"");
}

#[test]
fn user_role_rejects_unknown_value() {
    assert!(serde_json::from_str::<UserRole>("\"owner\"").is_err());
}

#[test]
fn conversion_event_type_uses_snake_case() {
    assert_eq!(serde_json::to_string(&ConversionEventType::Signup).unwrap(), "\"signup\"");
    assert_eq!(serde_json::to_string(&ConversionEventType::FirstLogin).unwrap(), "\"first_login\"");
    assert_eq!(serde_json::to_string(&ConversionEventType::FirstStudent).unwrap(), "\"first_student\"");
    assert_eq!(serde_json::to_string(&ConversionEventType::LimitReached).unwrap(), "\"limit_reached\"");
    assert_eq!(serde_json::to_string(&ConversionEventType::UpgradeClick).unwrap(), "\"upgrade_click\"");
}

#[test]
fn profile_status_defaults_to_active() {
    assert_eq!(ProfileStatus::default(), ProfileStatus::Active);
}

// =============================================================
// UserProfile
// =============================================================

#[test]
fn user_profile_deserializes_backend_row() {
    let profile: UserProfile = serde_json::from_value(profile_json()).unwrap();
    assert_eq!(profile.id, "p-1");
    assert_eq!(profile.user_id, "u-1");
    assert_eq!(profile.status, ProfileStatus::Suspended);
    assert_eq!(profile.max_students, 5);
    assert_eq!(profile.phone, None);
    assert_eq!(profile.bio, None);
    assert_eq!(profile.updated_at, None);
}

#[test]
fn user_profile_missing_status_and_modules_use_defaults() {
    let mut row = profile_json();
    let obj = row.as_object_mut().unwrap();
    obj.remove("status");
    obj.remove("modules");
    let profile: UserProfile = serde_json::from_value(row).unwrap();
    assert_eq!(profile.status, ProfileStatus::Active);
    assert!(profile.modules.is_empty());
}

#[test]
fn module_enabled_defaults_to_true_for_unknown_modules() {
    let profile: UserProfile = serde_json::from_value(profile_json()).unwrap();
    assert!(!profile.module_enabled("finance"));
    assert!(profile.module_enabled("schedule"));
    assert!(profile.module_enabled("reports"));
}

// =============================================================
// Session
// =============================================================

#[test]
fn session_deserializes_token_response() {
    let session: Session = serde_json::from_value(serde_json::json!({
        "access_token": "at",
        "refresh_token": "rt",
        "expires_in": 3600,
        "user": { "id": "u-1", "email": "ana@example.com" }
    }))
    .unwrap();
    assert_eq!(session.token_type, "bearer");
    assert_eq!(session.expires_at, None);
    assert_eq!(session.user.email.as_deref(), Some("ana@example.com"));
}

#[test]
fn with_expiry_from_fills_missing_expires_at() {
    let session = make_session(None, Some(3600)).with_expiry_from(1_000);
    assert_eq!(session.expires_at, Some(4_600));
}

#[test]
fn with_expiry_from_keeps_server_expiry() {
    let session = make_session(Some(2_000), Some(3600)).with_expiry_from(1_000);
    assert_eq!(session.expires_at, Some(2_000));
}

#[test]
fn with_expiry_from_saturates_huge_lifetime() {
    let session = make_session(None, Some(i64::MAX)).with_expiry_from(1_700_000_000);
    assert_eq!(session.expires_at, Some(i64::MAX));
    assert!(!session.expires_within(1_700_000_000, 60));
}

#[test]
fn expires_within_handles_extreme_expiry() {
    assert!(make_session(Some(i64::MIN), None).expires_within(0, 60));
}

#[test]
fn expires_within_respects_margin() {
    let session = make_session(Some(1_000), None);
    assert!(!session.expires_within(900, 60));
    assert!(session.expires_within(940, 60));
    assert!(session.expires_within(1_500, 60));
}

#[test]
fn expires_within_is_false_without_expiry() {
    assert!(!make_session(None, None).expires_within(i64::MAX - 100, 60));
}

#[test]
fn conversion_metric_serializes_row_shape() {
    let mut data = EventData::new();
    data.insert("plan".to_owned(), serde_json::json!("free"));
    let metric = ConversionMetric {
        professor_id: "p-1".to_owned(),
        event_type: ConversionEventType::UpgradeClick,
        event_data: data,
    };
    assert_eq!(
        serde_json::to_value(&metric).unwrap(),
        serde_json::json!({
            "professor_id": "p-1",
            "event_type": "upgrade_click",
            "event_data": { "plan": "free" }
        })
    );
}
