//! Undirected graph representation and builder.
//!
//! # Data layout
//!
//! Each undirected edge is stored once in `edges` as a normalised pair
//! `(low, high)`, sorted and free of duplicates.  For traversal the graph also
//! keeps a **Compressed Sparse Row (CSR)** adjacency in which every edge
//! appears in both endpoints' rows.  Given a `NodeId n`, its neighbours occupy
//! the slice:
//!
//! ```text
//! adj[ adj_start[n] .. adj_start[n+1] ]
//! ```
//!
//! Rows are sorted ascending, so BFS visits neighbours in a fixed order and
//! `has_edge` is a binary search.

use wsn_core::NodeId;

use crate::{GraphError, GraphResult};

// ── Graph ─────────────────────────────────────────────────────────────────────

/// Static undirected graph over the nodes `0..node_count`.
///
/// Immutable once built: topology does not change during a simulation run,
/// so a `Graph` can be shared by reference across runs and threads.
/// Construct via [`GraphBuilder`].
#[derive(Clone, Debug)]
pub struct Graph {
    /// Normalised `(low, high)` edge pairs, sorted, no duplicates.
    edges: Vec<(NodeId, NodeId)>,

    /// CSR row pointer.  Length = `node_count + 1`.
    adj_start: Vec<u32>,

    /// Concatenated neighbour rows.  Length = `2 * edge_count`.
    adj: Vec<NodeId>,
}

impl Graph {
    /// A graph with no nodes and no edges.
    pub fn empty() -> Self {
        GraphBuilder::new(0).build()
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.adj_start.len() - 1
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count() == 0
    }

    /// `true` if `node` is one of `0..node_count`.
    #[inline]
    pub fn contains(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// All node ids, ascending.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + Clone {
        NodeId::range(self.node_count())
    }

    /// Every undirected edge once, as sorted `(low, high)` pairs.
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    // ── Adjacency ─────────────────────────────────────────────────────────

    /// Neighbours of `node`, ascending.
    ///
    /// # Panics
    /// Panics if `node` is not in the graph.
    #[inline]
    pub fn neighbors(&self, node: NodeId) -> &[NodeId] {
        let start = self.adj_start[node.index()] as usize;
        let end   = self.adj_start[node.index() + 1] as usize;
        &self.adj[start..end]
    }

    /// Number of incident edges.
    ///
    /// # Panics
    /// Panics if `node` is not in the graph.
    #[inline]
    pub fn degree(&self, node: NodeId) -> usize {
        (self.adj_start[node.index() + 1] - self.adj_start[node.index()]) as usize
    }

    /// Degree of every node, indexed by `NodeId`.
    pub fn degrees(&self) -> Vec<usize> {
        self.adj_start.windows(2).map(|w| (w[1] - w[0]) as usize).collect()
    }

    /// Largest degree in the graph, or `None` for an empty graph.
    pub fn max_degree(&self) -> Option<usize> {
        self.adj_start.windows(2).map(|w| (w[1] - w[0]) as usize).max()
    }

    /// `true` if `a` and `b` are adjacent.  `false` for ids outside the graph.
    pub fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.contains(a) && self.contains(b) && self.neighbors(a).binary_search(&b).is_ok()
    }
}

// ── GraphBuilder ──────────────────────────────────────────────────────────────

/// Construct a [`Graph`] incrementally, then call [`build`](Self::build).
///
/// The node set is fixed up front; edges may be added in any order and in
/// either orientation.  Duplicate edges are collapsed by `build()`.
///
/// # Example
///
/// ```
/// use wsn_core::NodeId;
/// use wsn_graph::GraphBuilder;
///
/// let mut b = GraphBuilder::new(3);
/// b.add_edge(NodeId(0), NodeId(1)).unwrap();
/// b.add_edge(NodeId(2), NodeId(1)).unwrap();
/// b.add_edge(NodeId(1), NodeId(0)).unwrap(); // duplicate, ignored
/// let g = b.build();
/// assert_eq!(g.edge_count(), 2);
/// assert_eq!(g.degree(NodeId(1)), 2);
/// ```
pub struct GraphBuilder {
    node_count: usize,
    edges:      Vec<(NodeId, NodeId)>,
}

impl GraphBuilder {
    /// Start a graph over the nodes `0..node_count`.
    pub fn new(node_count: usize) -> Self {
        Self { node_count, edges: Vec::new() }
    }

    /// Pre-allocate for the expected number of edges.
    pub fn with_capacity(node_count: usize, edges: usize) -> Self {
        Self { node_count, edges: Vec::with_capacity(edges) }
    }

    pub fn node_count(&self) -> usize { self.node_count }

    /// Add the undirected edge `a — b`.
    ///
    /// Fails on self-loops and on ids outside `0..node_count`.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> GraphResult<()> {
        for n in [a, b] {
            if n.index() >= self.node_count {
                return Err(GraphError::NodeNotFound(n));
            }
        }
        if a == b {
            return Err(GraphError::InvalidInput(format!("self-loop on {a}")));
        }
        self.edges.push((a.min(b), a.max(b)));
        Ok(())
    }

    /// Consume the builder and produce a [`Graph`].
    ///
    /// Time complexity: O(E log E) for the edge sort and the per-row sorts.
    pub fn build(self) -> Graph {
        let node_count = self.node_count;

        let mut edges = self.edges;
        edges.sort_unstable();
        edges.dedup();

        // CSR row pointer: each edge contributes to both endpoints' rows.
        let mut adj_start = vec![0u32; node_count + 1];
        for &(a, b) in &edges {
            adj_start[a.index() + 1] += 1;
            adj_start[b.index() + 1] += 1;
        }
        for i in 1..=node_count {
            adj_start[i] += adj_start[i - 1];
        }
        debug_assert_eq!(adj_start[node_count] as usize, 2 * edges.len());

        // Scatter neighbours into their rows.
        let mut cursor: Vec<u32> = adj_start[..node_count].to_vec();
        let mut adj = vec![NodeId::INVALID; 2 * edges.len()];
        for &(a, b) in &edges {
            adj[cursor[a.index()] as usize] = b;
            cursor[a.index()] += 1;
            adj[cursor[b.index()] as usize] = a;
            cursor[b.index()] += 1;
        }
        for w in adj_start.windows(2) {
            adj[w[0] as usize..w[1] as usize].sort_unstable();
        }

        Graph { edges, adj_start, adj }
    }
}
