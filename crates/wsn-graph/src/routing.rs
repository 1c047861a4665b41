//! Routing trait and default breadth-first implementation.
//!
//! # Pluggability
//!
//! The simulator only reads a [`RoutingTable`]; how it was produced is behind
//! the [`Router`] trait, so alternative strategies (geographic forwarding,
//! energy-aware trees) can be swapped in without touching `wsn-sim`.  The
//! default [`BfsRouter`] builds a minimum-hop tree rooted at the sink.
//!
//! # Cost units
//!
//! Every link costs one hop.  With unit weights a single BFS from the sink
//! yields both the hop count and a shortest-path next hop for every node, so
//! no Dijkstra heap is needed.

use std::collections::VecDeque;

use wsn_core::NodeId;

use crate::{Graph, GraphError, GraphResult};

/// `hops` entry for nodes the traversal never reached.
const UNREACHED: u32 = u32::MAX;

// ── RoutingTable ──────────────────────────────────────────────────────────────

/// Next hop and hop count toward a fixed sink, for every node.
///
/// Following `next_hop` from any node reaches the sink in exactly
/// `hop_count(node)` steps.  The sink has hop count 0 and no next hop.
/// Built once per `(graph, sink)` pair and shared read-only by every
/// simulation run on that network.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RoutingTable {
    sink:     NodeId,
    /// Indexed by `NodeId`; `NodeId::INVALID` for the sink.
    next_hop: Vec<NodeId>,
    /// Indexed by `NodeId`.
    hops:     Vec<u32>,
}

impl RoutingTable {
    pub fn sink(&self) -> NodeId {
        self.sink
    }

    pub fn node_count(&self) -> usize {
        self.hops.len()
    }

    /// Neighbour to forward to from `node`.  `None` for the sink itself and
    /// for ids outside the table.
    #[inline]
    pub fn next_hop(&self, node: NodeId) -> Option<NodeId> {
        self.next_hop
            .get(node.index())
            .copied()
            .filter(|n| n.is_valid())
    }

    /// Minimum number of links between `node` and the sink.
    #[inline]
    pub fn hop_count(&self, node: NodeId) -> Option<u32> {
        self.hops.get(node.index()).copied()
    }

    /// Hop count of every node, indexed by `NodeId`.
    pub fn hop_counts(&self) -> &[u32] {
        &self.hops
    }

    /// Nodes visited by a packet originating at `node`, from `node` to the
    /// sink inclusive.
    pub fn path(&self, node: NodeId) -> Option<Vec<NodeId>> {
        let hops = self.hop_count(node)?;
        let mut path = Vec::with_capacity(hops as usize + 1);
        let mut cur = node;
        path.push(cur);
        while let Some(next) = self.next_hop(cur) {
            path.push(next);
            cur = next;
        }
        Some(path)
    }

    /// Hop count of the node farthest from the sink (the tree depth).
    pub fn max_hops(&self) -> u32 {
        self.hops.iter().copied().max().unwrap_or(0)
    }

    /// Mean hop count over the non-sink nodes; `0.0` if the sink is alone.
    pub fn mean_hops(&self) -> f64 {
        let sources = self.hops.len().saturating_sub(1);
        if sources == 0 {
            return 0.0;
        }
        let total: u64 = self.hops.iter().map(|&h| h as u64).sum();
        total as f64 / sources as f64
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing-table construction.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync` so one router can serve sweep cells
/// running on different threads.
pub trait Router: Send + Sync {
    /// Build next hops toward `sink` for every node of `graph`.
    ///
    /// Fails with [`GraphError::NodeNotFound`] if `sink` is not in the graph
    /// and [`GraphError::Unreachable`] if any node has no path to it.
    fn routing_table(&self, graph: &Graph, sink: NodeId) -> GraphResult<RoutingTable>;
}

// ── BfsRouter ─────────────────────────────────────────────────────────────────

/// Minimum-hop routing by one breadth-first walk from the sink.
///
/// Nodes are discovered in increasing distance order and each node's next hop
/// is the node that discovered it.  Neighbour rows are sorted, so among
/// equal-length paths the lowest-numbered parent wins and the table is
/// stable for a given graph.
pub struct BfsRouter;

impl Router for BfsRouter {
    fn routing_table(&self, graph: &Graph, sink: NodeId) -> GraphResult<RoutingTable> {
        bfs_tree(graph, sink)
    }
}

/// Build a routing table with [`BfsRouter`].
pub fn build_routing_table(graph: &Graph, sink: NodeId) -> GraphResult<RoutingTable> {
    BfsRouter.routing_table(graph, sink)
}

fn bfs_tree(graph: &Graph, sink: NodeId) -> GraphResult<RoutingTable> {
    if !graph.contains(sink) {
        return Err(GraphError::NodeNotFound(sink));
    }

    let n = graph.node_count();
    let mut hops     = vec![UNREACHED; n];
    let mut next_hop = vec![NodeId::INVALID; n];
    let mut queue    = VecDeque::with_capacity(n);

    hops[sink.index()] = 0;
    queue.push_back(sink);

    while let Some(node) = queue.pop_front() {
        let d = hops[node.index()];
        for &neighbor in graph.neighbors(node) {
            if hops[neighbor.index()] == UNREACHED {
                hops[neighbor.index()] = d + 1;
                next_hop[neighbor.index()] = node;
                queue.push_back(neighbor);
            }
        }
    }

    if let Some(i) = hops.iter().position(|&h| h == UNREACHED) {
        return Err(GraphError::Unreachable { node: NodeId(i as u32), sink });
    }

    Ok(RoutingTable { sink, next_hop, hops })
}
