//! Common test utilities
//!
//! This module is shared across all integration tests

pub mod fixtures;

#[allow(unused_imports)]
pub use fixtures::*;

/// Route `log` output through the test harness when `RUST_LOG` is set.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = pretty_env_logger::try_init();
}
