use std::sync::Once;
use std::time::Duration;

use growthbook_api::{BackoffPolicy, ClientConfig, GrowthBookRestClient};
use wiremock::MockServer;

pub const API_KEY: &str = "secret_integration_key";

static TRACING: Once = Once::new();

/// Route client logs to the test writer; filter with `RUST_LOG`.
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Millisecond backoff so retry tests stay fast.
pub fn fast_backoff(max_retries: u32) -> BackoffPolicy {
    BackoffPolicy::default()
        .with_max_retries(max_retries)
        .with_initial_interval(Duration::from_millis(2))
        .with_max_interval(Duration::from_millis(10))
}

pub fn config(server: &MockServer, backoff: BackoffPolicy) -> ClientConfig {
    ClientConfig::builder()
        .with_base_url(format!("{}/api/v1", server.uri()))
        .with_api_key(API_KEY)
        .with_backoff(backoff)
        .build()
        .expect("valid test config")
}

/// Start a mock server and a client pointed at its `/api/v1`.
pub async fn setup(max_retries: u32) -> (MockServer, GrowthBookRestClient) {
    init_tracing();
    let server = MockServer::start().await;
    let client = GrowthBookRestClient::with_config(config(&server, fast_backoff(max_retries)))
        .expect("client should build");
    (server, client)
}
