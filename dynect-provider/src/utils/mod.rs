//! Utility modules.

/// Log sanitization utilities to keep credentials and large bodies out of logs.
pub mod log_sanitizer;
