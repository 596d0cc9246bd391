//! Error metadata
//!
//! Library crates define their own `thiserror` enums. Errors that reach a
//! caller-facing boundary implement [`ErrorMetadata`] so the transport layer
//! can build a response without knowing the pipeline internals.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "UNSUPPORTED_TYPE")
    fn error_code(&self) -> &'static str;

    /// Whether this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;

    /// Whether the caller is at fault (4xx)
    fn is_client_error(&self) -> bool {
        (400..500).contains(&self.http_status_code())
    }
}

/// Emit a tracing event for an error at the level it declares.
pub fn log_error<E>(err: &E)
where
    E: ErrorMetadata + std::fmt::Display,
{
    match err.log_level() {
        LogLevel::Debug => {
            tracing::debug!(code = err.error_code(), error = %err, "Request rejected")
        }
        LogLevel::Warn => {
            tracing::warn!(code = err.error_code(), error = %err, "Request degraded")
        }
        LogLevel::Error => {
            tracing::error!(code = err.error_code(), error = %err, "Request failed")
        }
    }
}
