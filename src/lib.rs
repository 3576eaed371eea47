//! Shared helpers for the Abicart client integration tests

use std::sync::{Arc, Once};

use abicart_client::{Client, ClientConfig, Logger, TracingLogger};

static TRACING: Once = Once::new();

/// Install a test-friendly `tracing` subscriber once per test binary
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .with_target(true)
            .try_init();
    });
}

/// Base URI for a mock server, shaped like the vendor's `/v2/` root
pub fn base_uri(server_uri: &str) -> String {
    format!("{}/v2/", server_uri.trim_end_matches('/'))
}

/// Client pointed at a mock server, logging through `tracing`
pub fn client_for(server_uri: &str, parse_result: bool) -> Client {
    init_tracing();
    let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
    let config = ClientConfig::new()
        .with_base_uri(base_uri(server_uri))
        .with_parse_result(parse_result)
        .with_logger(logger);

    Client::new(config).expect("mock server URI is a valid base URI")
}
