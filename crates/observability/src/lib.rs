//! Process-wide logging setup.

/// Tracing subscriber configuration.
pub mod tracing;

/// Initialize structured logging with the `info` default.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init() {
    tracing::init_with_default("info");
}
