//! Fluent builder for constructing a [`PacketSim`].

use wsn_core::NodeRng;
use wsn_graph::{Graph, PositionMap, RoutingTable};

use crate::sim::NodeSource;
use crate::{DeliveryModel, Lossless, PacketSim, SimError, SimResult, SimulationResult};

/// Fluent builder for [`PacketSim<D>`].
///
/// # Required inputs
///
/// - [`Graph`] + [`PositionMap`] — the network instance
/// - [`RoutingTable`] — built once per `(graph, sink)`; its sink is the run's
///   sink
/// - `lambda` — per-node, per-step generation probability in `[0, 1]`
/// - `steps` — number of steps to simulate (0 is allowed)
///
/// # Optional inputs (have defaults)
///
/// | Method                 | Default                          |
/// |------------------------|----------------------------------|
/// | `.seed(s)`             | `0`                              |
/// | `.keep_records(b)`     | `true`                           |
/// | `.delivery(model)`     | [`Lossless`]                     |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(&graph, &positions, &table, 0.5, 1_000)
///     .seed(7)
///     .keep_records(false)
///     .build()?;
/// let outcome = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<'a, D: DeliveryModel = Lossless> {
    graph:        &'a Graph,
    positions:    &'a PositionMap,
    routing:      &'a RoutingTable,
    lambda:       f64,
    steps:        u64,
    seed:         u64,
    keep_records: bool,
    delivery:     D,
}

impl<'a> SimBuilder<'a, Lossless> {
    /// Create a builder with all required inputs.
    pub fn new(
        graph:     &'a Graph,
        positions: &'a PositionMap,
        routing:   &'a RoutingTable,
        lambda:    f64,
        steps:     u64,
    ) -> Self {
        Self {
            graph,
            positions,
            routing,
            lambda,
            steps,
            seed:         0,
            keep_records: true,
            delivery:     Lossless,
        }
    }
}

impl<'a, D: DeliveryModel> SimBuilder<'a, D> {
    /// Run seed for the per-node RNG streams.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Keep every [`PacketRecord`](crate::PacketRecord).  Turn off for long
    /// runs that only need the counters.
    pub fn keep_records(mut self, keep: bool) -> Self {
        self.keep_records = keep;
        self
    }

    /// Replace the delivery model.
    pub fn delivery<M: DeliveryModel>(self, delivery: M) -> SimBuilder<'a, M> {
        SimBuilder {
            graph:        self.graph,
            positions:    self.positions,
            routing:      self.routing,
            lambda:       self.lambda,
            steps:        self.steps,
            seed:         self.seed,
            keep_records: self.keep_records,
            delivery,
        }
    }

    /// Validate inputs, seed the per-node streams, and return a ready-to-run
    /// [`PacketSim`].
    pub fn build(self) -> SimResult<PacketSim<D>> {
        let node_count = self.graph.node_count();

        // ── Validate ──────────────────────────────────────────────────────
        if !(0.0..=1.0).contains(&self.lambda) {
            return Err(SimError::InvalidInput(format!(
                "generation probability {} outside [0, 1]",
                self.lambda
            )));
        }
        if self.positions.len() != node_count {
            return Err(SimError::NodeCountMismatch {
                expected: node_count,
                got:      self.positions.len(),
                what:     "position map",
            });
        }
        if self.routing.node_count() != node_count {
            return Err(SimError::NodeCountMismatch {
                expected: node_count,
                got:      self.routing.node_count(),
                what:     "routing table",
            });
        }
        let sink = self.routing.sink();

        // ── One RNG stream per non-sink node, ascending NodeId ────────────
        let sources: Vec<NodeSource> = self
            .graph
            .nodes()
            .filter(|&n| n != sink)
            .map(|node| NodeSource {
                node,
                hops:      self.routing.hop_count(node).unwrap_or_default(),
                rng:       NodeRng::new(self.seed, node),
                generated: 0,
                delivered: 0,
            })
            .collect();

        let expected_records = if self.keep_records {
            expected_packets(self.lambda, self.steps, sources.len())
        } else {
            0
        };

        Ok(PacketSim {
            sink,
            lambda:         self.lambda,
            steps:          self.steps,
            keep_records:   self.keep_records,
            delivery:       self.delivery,
            sources,
            records:        Vec::with_capacity(expected_records),
            result:         SimulationResult::empty(self.routing, self.lambda, self.steps),
            total_received: 0,
        })
    }
}

/// Mean packet count for the record buffer's initial capacity, capped so a
/// huge run does not reserve gigabytes up front.
fn expected_packets(lambda: f64, steps: u64, sources: usize) -> usize {
    const MAX_RESERVE: f64 = 1_048_576.0;
    (lambda * steps as f64 * sources as f64).min(MAX_RESERVE) as usize
}
