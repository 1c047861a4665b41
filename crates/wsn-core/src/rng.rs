//! Deterministic simulation-level and per-node RNG wrappers.
//!
//! # Ownership
//!
//! There is no process-wide RNG.  A driver constructs one [`SimRng`] from a
//! seed and passes it by `&mut` into every randomized operation in turn:
//! point placement, sink tie-breaking, and the run seed of each simulation.
//! Replaying the same calls with the same seed replays the same network.
//!
//! # Per-node streams
//!
//! Inside a simulation run each node draws from its own `SmallRng`:
//!
//!   seed = run_seed XOR (node_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive node IDs uniformly across the seed space.
//! A node's Bernoulli stream therefore does not depend on the order in which
//! nodes are visited, so the sequential and Rayon paths of the simulator
//! produce identical packets.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::NodeId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── NodeRng ───────────────────────────────────────────────────────────────────

/// Per-node deterministic RNG used for packet generation.
///
/// Each node owns exactly one stream, so draws never depend on which Rayon
/// worker runs the node.
pub struct NodeRng(SmallRng);

impl NodeRng {
    /// Seed deterministically from a run seed and a node ID.
    pub fn new(run_seed: u64, node: NodeId) -> Self {
        let seed = run_seed ^ (node.0 as u64).wrapping_mul(MIXING_CONSTANT);
        NodeRng(SmallRng::seed_from_u64(seed))
    }

    /// `true` with probability `p`.
    ///
    /// `p` must already be validated to lie in `[0, 1]`; `gen_bool` panics
    /// otherwise.  `p == 0.0` never succeeds and `p == 1.0` always does.
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p)
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for graph construction, sink selection, and run
/// seeding.
///
/// Used only in single-threaded contexts.  To run independent sweep cells in
/// parallel, give each worker its own child via [`SimRng::child`].
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Derive a child `SimRng` with a different seed offset.
    pub fn child(&mut self, offset: u64) -> SimRng {
        let child_seed: u64 = self.0.r#gen::<u64>() ^ offset.wrapping_mul(MIXING_CONSTANT);
        SimRng(SmallRng::seed_from_u64(child_seed))
    }

    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a uniformly random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
