use thiserror::Error;

use wsn_graph::GraphError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid simulation input: {0}")]
    InvalidInput(String),

    #[error("{what} covers {got} nodes but the graph has {expected}")]
    NodeCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type SimResult<T> = Result<T, SimError>;
