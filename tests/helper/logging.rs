//! Tracing setup for tests

use tracing_subscriber::EnvFilter;

/// Install a test subscriber so `RUST_LOG=repo_index=debug cargo test` shows crate logs
///
/// Safe to call from every test; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
