//! Random geometric graph construction.
//!
//! `build_graph(n, rc)` scatters `n` points uniformly over the unit square and
//! joins every pair whose Euclidean distance is at most `rc`.  Connectivity is
//! *not* guaranteed here; see [`crate::build_connected_graph`].
//!
//! # Spatial index
//!
//! Candidate pairs come from an R-tree (via `rstar`) bulk-loaded with all
//! positions.  Each node issues one `locate_within_distance(rc²)` query and
//! keeps only higher-numbered hits, so every pair is tested once and the cost
//! is proportional to the edges found rather than to `n²`.

use rstar::{AABB, PointDistance, RTree, RTreeObject};

use wsn_core::{NodeId, Point, SimRng};

use crate::{Graph, GraphBuilder, GraphError, GraphResult};

// ── PositionMap ───────────────────────────────────────────────────────────────

/// Position of every node, indexed by `NodeId`.
///
/// Created once at graph-build time and never mutated.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionMap(Vec<Point>);

impl PositionMap {
    /// Wrap explicit positions; node `i` sits at `points[i]`.
    pub fn new(points: Vec<Point>) -> Self {
        Self(points)
    }

    /// Sample `n` independent uniform positions, node 0 first.
    pub fn random(n: usize, rng: &mut SimRng) -> Self {
        Self((0..n).map(|_| Point::random_in_unit_square(rng)).collect())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Position of `node`, or `None` if it is out of range.
    #[inline]
    pub fn get(&self, node: NodeId) -> Option<Point> {
        self.0.get(node.index()).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, Point)> + '_ {
        self.0.iter().enumerate().map(|(i, &p)| (NodeId(i as u32), p))
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.0
    }
}

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct NodeEntry {
    point: [f64; 2],
    id:    NodeId,
}

impl RTreeObject for NodeEntry {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for NodeEntry {
    /// Squared Euclidean distance, computed exactly as `Point::distance_sq`
    /// so the index and the edge rule agree at the `rc` boundary.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── Construction ──────────────────────────────────────────────────────────────

/// Sample a random geometric graph over `n` nodes with connectivity radius
/// `rc`.
///
/// Consumes `2n` draws from `rng`; the same seed yields the same graph.
/// Fails with [`GraphError::InvalidInput`] if `n == 0`, `n` exceeds the
/// `NodeId` range, or `rc` is not a positive finite number.
pub fn build_graph(n: usize, rc: f64, rng: &mut SimRng) -> GraphResult<(Graph, PositionMap)> {
    check_node_count(n)?;
    check_radius(rc)?;

    let positions = PositionMap::random(n, rng);
    let graph = connect_within_radius(&positions, rc)?;
    Ok((graph, positions))
}

/// Join every pair of `positions` at distance `≤ rc`.
///
/// Deterministic; used by [`build_graph`] and for hand-placed layouts.
pub fn connect_within_radius(positions: &PositionMap, rc: f64) -> GraphResult<Graph> {
    check_node_count(positions.len())?;
    check_radius(rc)?;

    let entries: Vec<NodeEntry> = positions
        .iter()
        .map(|(id, p)| NodeEntry { point: p.to_array(), id })
        .collect();
    let index = RTree::bulk_load(entries);

    let radius_sq = rc * rc;
    let mut builder = GraphBuilder::new(positions.len());
    for (id, p) in positions.iter() {
        for hit in index.locate_within_distance(p.to_array(), radius_sq) {
            if hit.id > id {
                builder.add_edge(id, hit.id)?;
            }
        }
    }
    Ok(builder.build())
}

fn check_node_count(n: usize) -> GraphResult<()> {
    if n == 0 {
        return Err(GraphError::InvalidInput("node count must be positive".into()));
    }
    if u32::try_from(n).is_err() {
        return Err(GraphError::InvalidInput(format!("node count {n} exceeds NodeId range")));
    }
    Ok(())
}

fn check_radius(rc: f64) -> GraphResult<()> {
    if !rc.is_finite() || rc <= 0.0 {
        return Err(GraphError::InvalidInput(format!(
            "connectivity radius {rc} must be positive and finite"
        )));
    }
    Ok(())
}
