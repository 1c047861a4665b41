//! Connected-graph retry controller.
//!
//! Near the connectivity threshold a random geometric graph is often split
//! into several components.  The controller resamples until one draw is
//! connected or the attempt budget runs out; exhaustion is reported as
//! [`GraphError::GenerationFailure`], which sweeps treat as "skip this rc".

use log::{debug, warn};

use wsn_core::SimRng;

use crate::{Graph, GraphError, GraphResult, PositionMap, build_graph, is_connected};

/// Attempt budget used when none is configured.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 100;

/// How many graphs to sample before giving up on a radius.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RetryPolicy {
    pub max_attempts: u32,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self { max_attempts: DEFAULT_MAX_ATTEMPTS }
    }
}

/// A connected graph together with its layout.
#[derive(Clone, Debug)]
pub struct ConnectedGraph {
    pub graph:     Graph,
    pub positions: PositionMap,
    /// 1-based index of the attempt that succeeded.
    pub attempts:  u32,
}

/// Sample graphs with [`build_graph`] until one passes [`is_connected`].
///
/// Invalid `n`/`rc` fail immediately with [`GraphError::InvalidInput`]
/// rather than burning the budget, as does a zero attempt budget.
pub fn build_connected_graph(
    n:      usize,
    rc:     f64,
    policy: RetryPolicy,
    rng:    &mut SimRng,
) -> GraphResult<ConnectedGraph> {
    if policy.max_attempts == 0 {
        return Err(GraphError::InvalidInput("retry budget must be at least 1".into()));
    }

    for attempt in 1..=policy.max_attempts {
        let (graph, positions) = build_graph(n, rc, rng)?;
        if is_connected(&graph) {
            debug!(
                "rc={rc:.4}: connected graph on attempt {attempt} ({} edges)",
                graph.edge_count()
            );
            return Ok(ConnectedGraph { graph, positions, attempts: attempt });
        }
        debug!("rc={rc:.4}: attempt {attempt} disconnected, resampling");
    }

    warn!(
        "rc={rc:.4}: no connected graph with {n} nodes after {} attempts",
        policy.max_attempts
    );
    Err(GraphError::GenerationFailure {
        node_count: n,
        rc,
        attempts: policy.max_attempts,
    })
}
