//! Error types for the core library.

use thiserror::Error;

/// Result type alias for the core library.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the core library.
///
/// Ring mutations never fail; these cover lookups that find no owner and
/// the parsing done at the edges (node specs, partitioner names).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No virtual node is reachable for the key.
    #[error("no node available on the ring")]
    NotFound,
    /// Invalid node specification
    #[error("invalid node: {0}")]
    InvalidNode(String),
    /// Partitioner name with no matching implementation
    #[error("unknown partitioner: {0}")]
    UnknownPartitioner(String),
}
