// tests/logging_tests.rs

use portal_client::{config::Config, logging};

#[test]
fn init_installs_subscriber_once() {
    let log_dir = std::env::temp_dir().join(format!("portal-client-logs-{}", std::process::id()));
    let config = Config::from_lookup(|key| match key {
        "API_BASE_URL" => Some("http://localhost:8080/api".to_string()),
        "LOG_DIR" => Some(log_dir.to_string_lossy().into_owned()),
        "RUST_LOG" => Some("debug".to_string()),
        _ => None,
    })
    .unwrap();

    let guard = logging::init(&config).expect("first init succeeds");
    tracing::info!("logging initialised for test");

    assert!(logging::init(&config).is_err());

    drop(guard);
    assert!(log_dir.exists());
}
