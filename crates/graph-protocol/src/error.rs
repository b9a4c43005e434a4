//! Error types for payload encoding and consistency lookup.

/// Errors raised while building graph payload values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    /// A consistency code has no registered name. Fatal for the call.
    #[error("unknown consistency level: {code}")]
    UnknownConsistencyLevel { code: u16 },

    /// A request-timeout value was not exactly 8 bytes.
    #[error("request-timeout value must be 8 bytes, got {len}")]
    InvalidTimeoutEncoding { len: usize },
}

/// Result alias for protocol operations.
pub type Result<T> = std::result::Result<T, ProtocolError>;
