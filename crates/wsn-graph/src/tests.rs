//! Unit tests for wsn-graph.
//!
//! Deterministic topologies are hand-built; random ones use a fixed-seed
//! `SimRng` so every run sees the same graphs.

#[cfg(test)]
mod helpers {
    use wsn_core::{NodeId, Point};
    use crate::{Graph, GraphBuilder, PositionMap};

    /// Build a graph from an edge list over `n` nodes.
    pub fn graph(n: usize, edges: &[(u32, u32)]) -> Graph {
        let mut b = GraphBuilder::new(n);
        for &(a, c) in edges {
            b.add_edge(NodeId(a), NodeId(c)).unwrap();
        }
        b.build()
    }

    /// Path 0 — 1 — … — (n-1).
    pub fn path(n: usize) -> Graph {
        let edges: Vec<(u32, u32)> = (1..n as u32).map(|i| (i - 1, i)).collect();
        graph(n, &edges)
    }

    /// Four nodes on a horizontal line, 0.2 apart.  With rc = 0.25 only
    /// consecutive nodes are linked: the path 0 — 1 — 2 — 3.
    pub fn path_layout() -> PositionMap {
        PositionMap::new(vec![
            Point::new(0.0, 0.5),
            Point::new(0.2, 0.5),
            Point::new(0.4, 0.5),
            Point::new(0.6, 0.5),
        ])
    }

    /// Copy of `g` with the edge `a — c` removed.
    pub fn without_edge(g: &Graph, a: NodeId, c: NodeId) -> Graph {
        let drop = (a.min(c), a.max(c));
        let mut b = GraphBuilder::new(g.node_count());
        for &e in g.edges().iter().filter(|&&e| e != drop) {
            b.add_edge(e.0, e.1).unwrap();
        }
        b.build()
    }
}

// ── Graph & builder ───────────────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use wsn_core::NodeId;
    use crate::{Graph, GraphBuilder, GraphError};

    #[test]
    fn empty_build() {
        let g = Graph::empty();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
        assert_eq!(g.max_degree(), None);
    }

    #[test]
    fn isolated_nodes() {
        let g = GraphBuilder::new(3).build();
        assert_eq!(g.node_count(), 3);
        assert_eq!(g.degrees(), vec![0, 0, 0]);
        assert_eq!(g.max_degree(), Some(0));
    }

    #[test]
    fn self_loop_rejected() {
        let mut b = GraphBuilder::new(2);
        let err = b.add_edge(NodeId(1), NodeId(1)).unwrap_err();
        assert!(matches!(err, GraphError::InvalidInput(_)));
    }

    #[test]
    fn out_of_range_rejected() {
        let mut b = GraphBuilder::new(2);
        let err = b.add_edge(NodeId(0), NodeId(2)).unwrap_err();
        assert!(matches!(err, GraphError::NodeNotFound(NodeId(2))));
    }

    #[test]
    fn duplicates_collapse_in_either_orientation() {
        let g = super::helpers::graph(3, &[(0, 1), (1, 0), (0, 1), (2, 1)]);
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.edges(), &[(NodeId(0), NodeId(1)), (NodeId(1), NodeId(2))]);
        assert_eq!(g.degree(NodeId(1)), 2);
    }

    #[test]
    fn csr_rows_sorted_and_symmetric() {
        let g = super::helpers::graph(5, &[(4, 0), (2, 0), (0, 1), (3, 2)]);
        assert_eq!(g.neighbors(NodeId(0)), &[NodeId(1), NodeId(2), NodeId(4)]);
        for &(a, c) in g.edges() {
            assert!(g.has_edge(a, c));
            assert!(g.has_edge(c, a));
        }
        assert!(!g.has_edge(NodeId(1), NodeId(4)));
        assert!(!g.has_edge(NodeId(0), NodeId(99)));
        assert_eq!(g.degrees().iter().sum::<usize>(), 2 * g.edge_count());
    }
}

// ── Random geometric graphs ───────────────────────────────────────────────────

#[cfg(test)]
mod geometric {
    use wsn_core::{NodeId, SimRng};
    use crate::{GraphError, build_graph, connect_within_radius, is_connected};

    #[test]
    fn large_radius_gives_complete_graph() {
        let mut rng = SimRng::new(1);
        for n in 1..=12usize {
            let (g, pos) = build_graph(n, std::f64::consts::SQRT_2, &mut rng).unwrap();
            assert_eq!(pos.len(), n);
            assert_eq!(g.edge_count(), n * (n - 1) / 2, "n = {n}");
            assert!(is_connected(&g));
        }
    }

    #[test]
    fn edges_match_brute_force_distance_rule() {
        let mut rng = SimRng::new(2024);
        let rc = 0.2;
        let (g, pos) = build_graph(80, rc, &mut rng).unwrap();
        for (a, pa) in pos.iter() {
            for (c, pc) in pos.iter() {
                if a < c {
                    assert_eq!(
                        g.has_edge(a, c),
                        pa.distance(pc) <= rc,
                        "{a} — {c} at distance {}",
                        pa.distance(pc)
                    );
                }
            }
        }
    }

    #[test]
    fn positions_inside_unit_square() {
        let mut rng = SimRng::new(3);
        let (_, pos) = build_graph(200, 0.1, &mut rng).unwrap();
        assert!(pos.iter().all(|(_, p)| p.in_unit_square()));
    }

    #[test]
    fn same_seed_same_graph() {
        let (g1, p1) = build_graph(60, 0.18, &mut SimRng::new(77)).unwrap();
        let (g2, p2) = build_graph(60, 0.18, &mut SimRng::new(77)).unwrap();
        assert_eq!(p1, p2);
        assert_eq!(g1.edges(), g2.edges());
    }

    #[test]
    fn hand_placed_path_layout() {
        let pos = super::helpers::path_layout();
        let g = connect_within_radius(&pos, 0.25).unwrap();
        assert_eq!(
            g.edges(),
            &[(NodeId(0), NodeId(1)), (NodeId(1), NodeId(2)), (NodeId(2), NodeId(3))]
        );
    }

    #[test]
    fn boundary_distance_is_inclusive() {
        use wsn_core::Point;
        use crate::PositionMap;

        let pos = PositionMap::new(vec![Point::new(0.0, 0.0), Point::new(0.5, 0.0)]);
        assert_eq!(connect_within_radius(&pos, 0.5).unwrap().edge_count(), 1);
    }

    #[test]
    fn invalid_inputs_rejected() {
        let mut rng = SimRng::new(0);
        assert!(matches!(build_graph(0, 0.2, &mut rng), Err(GraphError::InvalidInput(_))));
        for rc in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(
                matches!(build_graph(10, rc, &mut rng), Err(GraphError::InvalidInput(_))),
                "rc = {rc}"
            );
        }
    }
}

// ── Connectivity ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod connectivity {
    use wsn_core::NodeId;
    use crate::{Graph, GraphBuilder, component_of, is_connected};

    #[test]
    fn degenerate_graphs_are_connected() {
        assert!(is_connected(&Graph::empty()));
        assert!(is_connected(&GraphBuilder::new(1).build()));
    }

    #[test]
    fn two_isolated_nodes_are_not() {
        assert!(!is_connected(&GraphBuilder::new(2).build()));
    }

    #[test]
    fn path_is_connected_and_every_edge_is_a_bridge() {
        let g = super::helpers::path(6);
        assert!(is_connected(&g));
        for &(a, c) in g.edges() {
            let cut = super::helpers::without_edge(&g, a, c);
            assert!(!is_connected(&cut), "removing {a} — {c} should disconnect");
        }
    }

    #[test]
    fn cycle_survives_one_removal() {
        let g = super::helpers::graph(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let cut = super::helpers::without_edge(&g, NodeId(3), NodeId(0));
        assert!(is_connected(&cut));
    }

    #[test]
    fn two_components() {
        let g = super::helpers::graph(5, &[(0, 1), (1, 2), (3, 4)]);
        assert!(!is_connected(&g));
        assert_eq!(component_of(&g, NodeId(0)), vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert_eq!(component_of(&g, NodeId(4)), vec![NodeId(4), NodeId(3)]);
        assert!(component_of(&g, NodeId(9)).is_empty());
    }
}

// ── Sink selection ────────────────────────────────────────────────────────────

#[cfg(test)]
mod sink {
    use std::collections::BTreeSet;

    use wsn_core::{NodeId, SimRng};
    use crate::{Graph, GraphError, build_graph, pick_sink};

    #[test]
    fn star_center_wins() {
        let g = super::helpers::graph(5, &[(2, 0), (2, 1), (2, 3), (2, 4)]);
        let mut rng = SimRng::new(0);
        for _ in 0..20 {
            assert_eq!(pick_sink(&g, &mut rng).unwrap(), NodeId(2));
        }
    }

    #[test]
    fn ties_are_broken_randomly() {
        let g = super::helpers::path(4); // degrees 1, 2, 2, 1
        let mut rng = SimRng::new(8);
        let seen: BTreeSet<NodeId> = (0..200).map(|_| pick_sink(&g, &mut rng).unwrap()).collect();
        assert_eq!(seen, BTreeSet::from([NodeId(1), NodeId(2)]));
    }

    #[test]
    fn sink_has_max_degree_on_random_graphs() {
        let mut rng = SimRng::new(31);
        for _ in 0..20 {
            let (g, _) = build_graph(50, 0.2, &mut rng).unwrap();
            let sink = pick_sink(&g, &mut rng).unwrap();
            assert_eq!(Some(g.degree(sink)), g.max_degree());
        }
    }

    #[test]
    fn same_seed_same_sink() {
        let g = super::helpers::graph(6, &[(0, 1), (2, 3), (4, 5)]);
        let a = pick_sink(&g, &mut SimRng::new(5)).unwrap();
        let b = pick_sink(&g, &mut SimRng::new(5)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn empty_graph_errors() {
        let err = pick_sink(&Graph::empty(), &mut SimRng::new(0)).unwrap_err();
        assert!(matches!(err, GraphError::InvalidInput(_)));
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use wsn_core::{NodeId, SimRng};
    use crate::{
        BfsRouter, GraphBuilder, GraphError, RetryPolicy, Router, build_connected_graph,
        build_routing_table, pick_sink,
    };

    #[test]
    fn path_from_node_one() {
        let g = super::helpers::path(4);
        let table = build_routing_table(&g, NodeId(1)).unwrap();

        assert_eq!(table.sink(), NodeId(1));
        assert_eq!(table.hop_counts(), &[1, 0, 1, 2]);
        assert_eq!(table.next_hop(NodeId(0)), Some(NodeId(1)));
        assert_eq!(table.next_hop(NodeId(2)), Some(NodeId(1)));
        assert_eq!(table.next_hop(NodeId(3)), Some(NodeId(2)));
        assert_eq!(table.next_hop(NodeId(1)), None);
        assert_eq!(table.max_hops(), 2);
        assert!((table.mean_hops() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn path_reconstruction() {
        let g = super::helpers::path(4);
        let table = build_routing_table(&g, NodeId(1)).unwrap();
        assert_eq!(table.path(NodeId(3)).unwrap(), vec![NodeId(3), NodeId(2), NodeId(1)]);
        assert_eq!(table.path(NodeId(1)).unwrap(), vec![NodeId(1)]);
        assert!(table.path(NodeId(9)).is_none());
    }

    #[test]
    fn equal_length_paths_prefer_lowest_parent() {
        // 4-cycle: node 2 is two hops from 0 via either 1 or 3.
        let g = super::helpers::graph(4, &[(0, 1), (1, 2), (2, 3), (3, 0)]);
        let table = BfsRouter.routing_table(&g, NodeId(0)).unwrap();
        assert_eq!(table.hop_count(NodeId(2)), Some(2));
        assert_eq!(table.next_hop(NodeId(2)), Some(NodeId(1)));
    }

    #[test]
    fn next_hops_reach_sink_in_hop_count_steps() {
        let mut rng = SimRng::new(404);
        for rc in [0.2, 0.3, 0.45] {
            let net = build_connected_graph(60, rc, RetryPolicy::default(), &mut rng).unwrap();
            let sink = pick_sink(&net.graph, &mut rng).unwrap();
            let table = build_routing_table(&net.graph, sink).unwrap();

            assert_eq!(table.hop_count(sink), Some(0));
            for node in net.graph.nodes() {
                let mut cur = node;
                let mut steps = 0;
                while let Some(next) = table.next_hop(cur) {
                    assert!(net.graph.has_edge(cur, next), "next hop must be a neighbour");
                    cur = next;
                    steps += 1;
                }
                assert_eq!(cur, sink);
                assert_eq!(Some(steps), table.hop_count(node));
            }
        }
    }

    #[test]
    fn unreachable_node_errors() {
        let g = super::helpers::graph(4, &[(0, 1), (1, 2)]);
        let err = build_routing_table(&g, NodeId(0)).unwrap_err();
        assert!(matches!(err, GraphError::Unreachable { node: NodeId(3), sink: NodeId(0) }));
    }

    #[test]
    fn sink_outside_graph_errors() {
        let g = super::helpers::path(3);
        assert!(matches!(
            build_routing_table(&g, NodeId(3)),
            Err(GraphError::NodeNotFound(NodeId(3)))
        ));
    }

    #[test]
    fn lone_sink() {
        let g = GraphBuilder::new(1).build();
        let table = build_routing_table(&g, NodeId(0)).unwrap();
        assert_eq!(table.hop_counts(), &[0]);
        assert_eq!(table.mean_hops(), 0.0);
    }
}

// ── Retry controller ──────────────────────────────────────────────────────────

#[cfg(test)]
mod retry {
    use wsn_core::SimRng;
    use crate::{DEFAULT_MAX_ATTEMPTS, GraphError, RetryPolicy, build_connected_graph, is_connected};

    #[test]
    fn default_budget() {
        assert_eq!(RetryPolicy::default().max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(DEFAULT_MAX_ATTEMPTS, 100);
    }

    #[test]
    fn full_radius_connects_first_try() {
        let mut rng = SimRng::new(9);
        let net = build_connected_graph(30, 1.5, RetryPolicy::new(1), &mut rng).unwrap();
        assert_eq!(net.attempts, 1);
        assert!(is_connected(&net.graph));
        assert_eq!(net.positions.len(), 30);
    }

    #[test]
    fn moderate_radius_eventually_connects() {
        let mut rng = SimRng::new(12);
        let net = build_connected_graph(100, 0.25, RetryPolicy::default(), &mut rng).unwrap();
        assert!(is_connected(&net.graph));
        assert!(net.attempts >= 1 && net.attempts <= DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn tiny_radius_exhausts_budget() {
        let mut rng = SimRng::new(0);
        let err = build_connected_graph(50, 1e-3, RetryPolicy::new(3), &mut rng).unwrap_err();
        assert!(err.is_recoverable());
        match err {
            GraphError::GenerationFailure { node_count, attempts, .. } => {
                assert_eq!(node_count, 50);
                assert_eq!(attempts, 3);
            }
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn invalid_input_is_not_retried() {
        let mut rng = SimRng::new(0);
        let err = build_connected_graph(0, 0.3, RetryPolicy::default(), &mut rng).unwrap_err();
        assert!(matches!(err, GraphError::InvalidInput(_)));
        assert!(!err.is_recoverable());

        let err = build_connected_graph(10, 0.3, RetryPolicy::new(0), &mut rng).unwrap_err();
        assert!(matches!(err, GraphError::InvalidInput(_)));
    }

    #[test]
    fn same_seed_same_network() {
        let a = build_connected_graph(40, 0.3, RetryPolicy::default(), &mut SimRng::new(6)).unwrap();
        let b = build_connected_graph(40, 0.3, RetryPolicy::default(), &mut SimRng::new(6)).unwrap();
        assert_eq!(a.attempts, b.attempts);
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.graph.edges(), b.graph.edges());
    }
}
