//! Tracing/logging setup shared by the binaries.

/// Logging configuration (filters, output format).
pub mod logging;

pub use logging::{LogFormat, init};
