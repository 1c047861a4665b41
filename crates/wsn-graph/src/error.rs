//! Graph-subsystem error type.

use thiserror::Error;

use wsn_core::NodeId;

/// Errors produced by `wsn-graph`.
///
/// `InvalidInput`, `NodeNotFound`, and `Unreachable` are contract violations:
/// the offending call fails immediately and must not be retried.
/// `GenerationFailure` is expected at sweep level: the caller skips that
/// radius and moves on (see [`GraphError::is_recoverable`]).
#[derive(Debug, Error)]
pub enum GraphError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("node {0} not found in graph")]
    NodeNotFound(NodeId),

    #[error("no path from {node} to sink {sink}")]
    Unreachable { node: NodeId, sink: NodeId },

    #[error("no connected graph with {node_count} nodes at rc={rc:.4} after {attempts} attempts")]
    GenerationFailure {
        node_count: usize,
        rc:         f64,
        attempts:   u32,
    },
}

impl GraphError {
    /// `true` for errors a sweep should log and skip rather than abort on.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GraphError::GenerationFailure { .. })
    }
}

pub type GraphResult<T> = Result<T, GraphError>;
