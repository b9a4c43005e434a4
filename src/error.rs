//! Error types for option resolution.

use graph_protocol::ProtocolError;

/// Errors raised while resolving graph query options.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphOptionsError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Result alias for option resolution.
pub type Result<T> = std::result::Result<T, GraphOptionsError>;
