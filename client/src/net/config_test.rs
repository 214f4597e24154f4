use super::*;

#[test]
fn from_values_trims_trailing_slash() {
    let cfg = SupabaseConfig::from_values(Some("https://abc.supabase.co/"), Some("anon")).unwrap();
    assert_eq!(cfg.url, "https://abc.supabase.co");
    assert_eq!(cfg.anon_key, "anon");
}

#[test]
fn from_values_missing_url_errors() {
    let err = SupabaseConfig::from_values(None, Some("anon")).unwrap_err();
    assert_eq!(err, BackendError::NotConfigured("SUPABASE_URL not set".to_owned()));
}

#[test]
fn from_values_blank_key_errors() {
    let err = SupabaseConfig::from_values(Some("https://abc.supabase.co"), Some("   ")).unwrap_err();
    assert_eq!(err, BackendError::NotConfigured("SUPABASE_ANON_KEY not set".to_owned()));
}

#[test]
fn from_values_rejects_non_http_url() {
    let err = SupabaseConfig::from_values(Some("abc.supabase.co"), Some("anon"))
        .unwrap_err()
        .to_string();
    assert!(err.contains("not an http(s) URL"));
}

#[test]
fn from_values_accepts_local_http() {
    let cfg = SupabaseConfig::from_values(Some("http://localhost:54321"), Some("anon")).unwrap();
    assert_eq!(cfg.url, "http://localhost:54321");
}

#[test]
fn endpoint_builders_join_paths() {
    let cfg = SupabaseConfig::from_values(Some("https://abc.supabase.co"), Some("anon")).unwrap();
    assert_eq!(cfg.auth_url("logout"), "https://abc.supabase.co/auth/v1/logout");
    assert_eq!(cfg.rest_url("user_roles"), "https://abc.supabase.co/rest/v1/user_roles");
}
