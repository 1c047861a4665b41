//! The `PacketSim` struct and its step loop.

use log::debug;

use wsn_core::{NodeId, NodeRng, SimRng, Tick};
use wsn_graph::{Graph, PositionMap, build_routing_table};

use crate::{
    DeliveryModel, NoopObserver, PacketRecord, SimBuilder, SimObserver, SimResult,
    SimulationOutcome, SimulationResult,
};

// ── Per-node generation state ─────────────────────────────────────────────────

/// Everything one non-sink node needs during the generation phase.
///
/// Each source owns its RNG and counters, so the phase touches no shared
/// mutable state and can run on Rayon without locks.
pub(crate) struct NodeSource {
    pub(crate) node:      NodeId,
    pub(crate) hops:      u32,
    pub(crate) rng:       NodeRng,
    pub(crate) generated: u64,
    pub(crate) delivered: u64,
}

impl NodeSource {
    /// One Bernoulli(lambda) trial; on success the packet is created and its
    /// delivery decided immediately.
    #[inline]
    fn draw<D: DeliveryModel>(&mut self, now: Tick, lambda: f64, delivery: &D) -> Option<PacketRecord> {
        if !self.rng.gen_bool(lambda) {
            return None;
        }
        let delivered = delivery.delivered(self.hops, &mut self.rng);
        self.generated += 1;
        if delivered {
            self.delivered += 1;
        }
        Some(PacketRecord {
            origin:       self.node,
            generated_at: now,
            hops:         self.hops,
            delivered,
        })
    }
}

/// Ticks drawn per Rayon fan-out on the parallel path.
#[cfg(feature = "parallel")]
pub(crate) const STEP_BLOCK: u64 = 1024;

// ── PacketSim ─────────────────────────────────────────────────────────────────

/// One simulation run over a fixed `(graph, sink, lambda)`.
///
/// Each step every non-sink node independently generates a packet with
/// probability `lambda`.  A packet follows the routing table's shortest path
/// and its fate is decided by the [`DeliveryModel`].  Under the default
/// [`Lossless`](crate::Lossless) model every packet arrives, so
/// `total_received == total_generated`.
///
/// Create via [`SimBuilder`].
pub struct PacketSim<D: DeliveryModel> {
    pub(crate) sink:           NodeId,
    pub(crate) lambda:         f64,
    pub(crate) steps:          u64,
    pub(crate) keep_records:   bool,
    pub(crate) delivery:       D,
    /// Non-sink nodes in ascending `NodeId` order.
    pub(crate) sources:        Vec<NodeSource>,
    pub(crate) records:        Vec<PacketRecord>,
    /// Zeroed counters with hop counts; filled in by `finish`.
    pub(crate) result:         SimulationResult,
    pub(crate) total_received: u64,
}

impl<D: DeliveryModel> PacketSim<D> {
    pub fn sink(&self) -> NodeId {
        self.sink
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Number of packet-generating nodes (every node but the sink).
    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Run all steps and return the records and counters.
    ///
    /// Records are ordered by generation tick, then by origin `NodeId`, on
    /// both the sequential and the parallel path.
    pub fn run<O: SimObserver>(mut self, observer: &mut O) -> SimulationOutcome {
        debug!(
            "simulating {} steps, lambda={:.3}, sink={}, {} sources",
            self.steps,
            self.lambda,
            self.sink,
            self.sources.len()
        );
        observer.on_sim_start(self.steps, self.sources.len());
        self.run_steps(observer);

        let outcome = self.finish();
        observer.on_sim_end(Tick(outcome.result.steps), &outcome.result);
        debug!(
            "simulation done: {} generated, {} received",
            outcome.result.total_generated, outcome.result.total_received
        );
        outcome
    }

    #[cfg(not(feature = "parallel"))]
    fn run_steps<O: SimObserver>(&mut self, observer: &mut O) {
        for now in Tick::until(self.steps) {
            observer.on_step_start(now);
            let (generated, delivered) = self.step(now);
            self.total_received += delivered as u64;
            observer.on_step_end(now, generated, delivered);
        }
    }

    /// Generate and deliver one step's packets.  Returns `(generated, delivered)`.
    #[cfg(not(feature = "parallel"))]
    fn step(&mut self, now: Tick) -> (usize, usize) {
        let mut generated = 0;
        let mut delivered = 0;
        for source in &mut self.sources {
            if let Some(packet) = source.draw(now, self.lambda, &self.delivery) {
                generated += 1;
                delivered += packet.delivered as usize;
                if self.keep_records {
                    self.records.push(packet);
                }
            }
        }
        (generated, delivered)
    }

    /// Run the steps in blocks of [`STEP_BLOCK`] ticks on Rayon's pool.
    ///
    /// Each source draws a whole block from its own stream on one worker.
    /// The block's packets are then stably sorted by tick, which keeps origin
    /// order within a tick, and replayed to the observer one step at a time.
    /// Records and counters match the sequential path exactly.
    #[cfg(feature = "parallel")]
    fn run_steps<O: SimObserver>(&mut self, observer: &mut O) {
        use rayon::prelude::*;

        let lambda = self.lambda;
        let delivery = &self.delivery;
        let mut start = 0;
        while start < self.steps {
            let end = self.steps.min(start.saturating_add(STEP_BLOCK));

            let mut block: Vec<PacketRecord> = self
                .sources
                .par_iter_mut()
                .flat_map_iter(|source| {
                    (start..end).filter_map(move |t| source.draw(Tick(t), lambda, delivery))
                })
                .collect();
            block.sort_by_key(|p| p.generated_at);

            let mut rest = block.as_slice();
            for now in (start..end).map(Tick) {
                observer.on_step_start(now);
                let generated = rest.iter().take_while(|p| p.generated_at == now).count();
                let (packets, tail) = rest.split_at(generated);
                let delivered = packets.iter().filter(|p| p.delivered).count();
                self.total_received += delivered as u64;
                observer.on_step_end(now, generated, delivered);
                rest = tail;
            }

            if self.keep_records {
                self.records.extend(block);
            }
            start = end;
        }
    }

    /// Fold the per-source counters into the result.
    fn finish(self) -> SimulationOutcome {
        let mut result = self.result;
        for source in &self.sources {
            let stats = &mut result.per_node[source.node.index()];
            stats.generated = source.generated;
            stats.delivered = source.delivered;
            result.total_generated += source.generated;
        }
        result.total_received = self.total_received;
        debug_assert_eq!(
            result.total_received,
            result.per_node.iter().map(|s| s.delivered).sum::<u64>()
        );

        SimulationOutcome { records: self.records, result }
    }
}

// ── One-shot entry point ──────────────────────────────────────────────────────

/// Simulate `steps` steps of generation at probability `lambda` toward `sink`
/// with lossless delivery, keeping every packet record.
///
/// Builds the routing table with BFS and draws the run seed from `rng`.
/// Sweeps that reuse one network across many `lambda` values should build
/// the table once and drive [`SimBuilder`] directly instead.
///
/// Fails with [`SimError::InvalidInput`](crate::SimError::InvalidInput) for
/// `lambda` outside `[0, 1]`, and with a wrapped
/// [`GraphError`](wsn_graph::GraphError) if `sink` is not in the graph or a
/// node cannot reach it.
pub fn simulate(
    graph:     &Graph,
    positions: &PositionMap,
    sink:      NodeId,
    lambda:    f64,
    steps:     u64,
    rng:       &mut SimRng,
) -> SimResult<SimulationOutcome> {
    let table = build_routing_table(graph, sink)?;
    let seed: u64 = rng.random();
    let sim = SimBuilder::new(graph, positions, &table, lambda, steps)
        .seed(seed)
        .build()?;
    Ok(sim.run(&mut NoopObserver))
}
