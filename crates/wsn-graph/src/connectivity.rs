//! Connectivity check by breadth-first traversal.

use std::collections::VecDeque;

use wsn_core::NodeId;

use crate::Graph;

/// `true` if every node can reach every other node.
///
/// Graphs with zero or one node are trivially connected.  Otherwise this is a
/// single BFS from node 0 whose visited count is compared with `node_count`.
pub fn is_connected(graph: &Graph) -> bool {
    let n = graph.node_count();
    if n <= 1 {
        return true;
    }
    // A spanning component needs at least n - 1 edges.
    if graph.edge_count() < n - 1 {
        return false;
    }
    component_of(graph, NodeId(0)).len() == n
}

/// Nodes reachable from `start`, in BFS discovery order (`start` first).
///
/// Returns an empty vec if `start` is not in the graph.
pub fn component_of(graph: &Graph, start: NodeId) -> Vec<NodeId> {
    if !graph.contains(start) {
        return Vec::new();
    }

    let mut visited = vec![false; graph.node_count()];
    let mut order = Vec::new();
    let mut queue = VecDeque::new();

    visited[start.index()] = true;
    queue.push_back(start);
    while let Some(node) = queue.pop_front() {
        order.push(node);
        for &next in graph.neighbors(node) {
            if !visited[next.index()] {
                visited[next.index()] = true;
                queue.push_back(next);
            }
        }
    }
    order
}
