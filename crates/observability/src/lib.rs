//! Tracing/logging setup shared by stockroom binaries.
//!
//! Library crates only emit `tracing` events; installing a subscriber is the
//! caller's choice, which keeps logging injectable in tests.

pub mod tracing;

pub use self::tracing::{LogFormat, LOG_FORMAT_ENV};

/// Initialize process-wide tracing using `RUST_LOG` and `STOCKROOM_LOG_FORMAT`.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(LogFormat::from_env());
}
