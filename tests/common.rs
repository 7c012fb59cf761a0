// tests/common.rs
//! Shared test utilities: test-friendly logging setup

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Route tracing output through the test harness
/// Call at the start of any test that wants logs (idempotent)
#[allow(dead_code)]
pub fn setup() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env()) // respects RUST_LOG=
        .try_init()
        .ok();
}
