//! Error types for the trace system

use thiserror::Error;

/// Trace system errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    /// No interface is registered under the requested version tag
    #[error("Unknown trace interface version: {0}")]
    InterfaceNotFound(String),

    /// The negotiated interface revision does not carry this operation
    #[error("Operation '{operation}' is not available on interface {tag}")]
    UnsupportedOperation {
        tag: &'static str,
        operation: &'static str,
    },
}

/// Result type for trace operations
pub type Result<T> = std::result::Result<T, TraceError>;
