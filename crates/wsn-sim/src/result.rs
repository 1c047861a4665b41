//! Aggregated simulation output.

use wsn_core::NodeId;
use wsn_graph::RoutingTable;

use crate::PacketRecord;

/// Per-node packet counters.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeStats {
    pub generated: u64,
    pub delivered: u64,
    /// Distance to the sink; 0 for the sink itself.
    pub hops:      u32,
}

/// Counters for one `(graph, sink, lambda)` run.
///
/// `per_node` is indexed by `NodeId`; the sink's entry is always zero
/// because the sink never generates.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationResult {
    pub sink:            NodeId,
    pub lambda:          f64,
    pub steps:           u64,
    pub per_node:        Vec<NodeStats>,
    pub total_generated: u64,
    pub total_received:  u64,
}

impl SimulationResult {
    /// Zeroed counters with hop counts filled from `routing`.
    pub fn empty(routing: &RoutingTable, lambda: f64, steps: u64) -> Self {
        Self {
            sink: routing.sink(),
            lambda,
            steps,
            per_node: routing
                .hop_counts()
                .iter()
                .map(|&hops| NodeStats { hops, ..NodeStats::default() })
                .collect(),
            total_generated: 0,
            total_received:  0,
        }
    }

    /// Rebuild the aggregate from a full record set.
    ///
    /// Yields exactly the counters the simulator accumulated during the run
    /// that produced `records`.
    pub fn from_records(
        routing: &RoutingTable,
        lambda:  f64,
        steps:   u64,
        records: &[PacketRecord],
    ) -> Self {
        let mut result = Self::empty(routing, lambda, steps);
        for r in records {
            if let Some(stats) = result.per_node.get_mut(r.origin.index()) {
                stats.generated += 1;
                result.total_generated += 1;
                if r.delivered {
                    stats.delivered += 1;
                    result.total_received += 1;
                }
            }
        }
        result
    }

    pub fn node(&self, node: NodeId) -> Option<&NodeStats> {
        self.per_node.get(node.index())
    }

    /// Fraction of generated packets that reached the sink; `None` if none
    /// were generated.
    pub fn delivery_ratio(&self) -> Option<f64> {
        (self.total_generated > 0).then(|| self.total_received as f64 / self.total_generated as f64)
    }

    /// Packets received at the sink per step; `0.0` for a zero-step run.
    pub fn throughput_per_step(&self) -> f64 {
        if self.steps == 0 {
            return 0.0;
        }
        self.total_received as f64 / self.steps as f64
    }

    /// Mean path length of delivered packets; `None` if none were delivered.
    pub fn mean_hops_delivered(&self) -> Option<f64> {
        if self.total_received == 0 {
            return None;
        }
        let hop_sum: u64 = self.per_node.iter().map(|s| s.delivered * s.hops as u64).sum();
        Some(hop_sum as f64 / self.total_received as f64)
    }
}

/// Everything a run returns: the packet records (empty when record keeping
/// is off) and the aggregate counters.
#[derive(Clone, Debug)]
pub struct SimulationOutcome {
    pub records: Vec<PacketRecord>,
    pub result:  SimulationResult,
}

impl SimulationOutcome {
    pub fn total_received(&self) -> u64 {
        self.result.total_received
    }

    /// Split into `(records, total_received)`.
    pub fn into_parts(self) -> (Vec<PacketRecord>, u64) {
        let total = self.result.total_received;
        (self.records, total)
    }
}
