use super::*;

#[test]
fn from_values_defaults() {
    let cfg = ServerConfig::from_values(None, None).unwrap();
    assert_eq!(cfg, ServerConfig { host: DEFAULT_HOST.to_owned(), port: DEFAULT_PORT });
}

#[test]
fn from_values_blank_uses_defaults() {
    let cfg = ServerConfig::from_values(Some("  "), Some("")).unwrap();
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert_eq!(cfg.host, DEFAULT_HOST);
}

#[test]
fn from_values_keeps_hostname() {
    let cfg = ServerConfig::from_values(Some(" localhost "), Some(" 8080 ")).unwrap();
    assert_eq!(cfg.host, "localhost");
    assert_eq!(cfg.port, 8080);
}

#[test]
fn from_values_rejects_bad_port() {
    let err = ServerConfig::from_values(None, Some("http")).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidPort { ref value, .. } if value == "http"));
    assert!(err.to_string().starts_with("invalid PORT \"http\""));

    assert!(ServerConfig::from_values(None, Some("70000")).is_err());
}

#[tokio::test]
async fn resolve_default_host() {
    let cfg = ServerConfig::from_values(None, None).unwrap();
    assert_eq!(cfg.resolve().await.unwrap().to_string(), "0.0.0.0:3000");
}

#[tokio::test]
async fn resolve_ip_literals() {
    let v4 = ServerConfig::from_values(Some("127.0.0.1"), Some("8080")).unwrap();
    assert_eq!(v4.resolve().await.unwrap().to_string(), "127.0.0.1:8080");

    let v6 = ServerConfig::from_values(Some("::1"), Some("9000")).unwrap();
    assert_eq!(v6.resolve().await.unwrap().to_string(), "[::1]:9000");
}

#[tokio::test]
async fn resolve_localhost_to_loopback() {
    let cfg = ServerConfig::from_values(Some("localhost"), Some("4100")).unwrap();
    let addr = cfg.resolve().await.unwrap();
    assert!(addr.ip().is_loopback());
    assert_eq!(addr.port(), 4100);
}

#[tokio::test]
async fn resolve_reports_unknown_host() {
    let cfg = ServerConfig::from_values(Some("no-such-host.invalid"), None).unwrap();
    let err = cfg.resolve().await.unwrap_err();
    assert!(matches!(err, ConfigError::Resolve { ref host, .. } if host == "no-such-host.invalid"));
}

#[test]
fn from_env_reads_port_and_host() {
    unsafe {
        std::env::set_var("PORT", "4100");
        std::env::set_var("HOST", "localhost");
    }

    let cfg = ServerConfig::from_env().unwrap();
    assert_eq!(cfg, ServerConfig { host: "localhost".to_owned(), port: 4100 });

    unsafe {
        std::env::remove_var("PORT");
        std::env::remove_var("HOST");
    }
}
