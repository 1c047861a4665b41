//! Sink selection.
//!
//! The sink is the node with the most neighbours.  Ties are broken uniformly
//! at random.

use wsn_core::{NodeId, SimRng};

use crate::{Graph, GraphError, GraphResult};

/// Pick a maximum-degree node, uniformly among all nodes sharing that degree.
///
/// The same graph and `rng` state always give the same sink.  Fails with
/// [`GraphError::InvalidInput`] on an empty graph.
pub fn pick_sink(graph: &Graph, rng: &mut SimRng) -> GraphResult<NodeId> {
    let max_degree = graph
        .max_degree()
        .ok_or_else(|| GraphError::InvalidInput("cannot pick a sink from an empty graph".into()))?;

    let candidates: Vec<NodeId> = graph
        .nodes()
        .filter(|&n| graph.degree(n) == max_degree)
        .collect();

    rng.choose(&candidates)
        .copied()
        .ok_or_else(|| GraphError::InvalidInput("no maximum-degree candidate".into()))
}
