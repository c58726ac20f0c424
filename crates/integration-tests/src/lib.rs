//! Integration tests for Lifeline.
//!
//! # Running Tests
//!
//! These tests drive a running server over HTTP, end to end, including its
//! real store. They are skipped unless `LIFELINE_BASE_URL` points at one:
//!
//! ```bash
//! # Start the server (against a disposable database)
//! cargo run -p lifeline-server
//!
//! # Run integration tests against it
//! LIFELINE_BASE_URL=http://localhost:8080 cargo test -p lifeline-integration-tests
//! ```
//!
//! Alert tests will dispatch real SMS unless the deployment under test is
//! configured with Twilio test credentials, so point them at a staging
//! environment.

/// Base URL of the server under test, when one is configured.
///
/// Tests return early (skip) when this is `None` so that `cargo test` stays
/// green in environments without a running server.
#[must_use]
pub fn base_url() -> Option<String> {
    std::env::var("LIFELINE_BASE_URL")
        .ok()
        .map(|url| url.trim_end_matches('/').to_string())
}

/// A user id unique to this test run, so runs never see each other's state.
#[must_use]
pub fn unique_user(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4())
}
