//! Parameter-sweep configuration.
//!
//! A sweep covers every `(rc, lambda)` pair: one connected network per
//! connectivity radius, then one simulation run per traffic intensity on that
//! network.  The defaults reproduce the reference study: 100 nodes, ten radii
//! from just above the connectivity threshold, ten intensities, 10⁶ steps.

/// Top-level sweep configuration.
///
/// Typically built with `SweepConfig::default()` or loaded from JSON by the
/// driver binary (requires the `serde` feature).  Missing JSON fields fall
/// back to their defaults.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SweepConfig {
    /// Nodes per network.
    pub node_count: usize,

    /// Connectivity radii, one network per value.  0.16 is roughly the
    /// connectivity threshold for 100 nodes in the unit square.
    pub rc_values: Vec<f64>,

    /// Per-node, per-step packet generation probabilities.
    pub lambda_values: Vec<f64>,

    /// Steps simulated per `(rc, lambda)` cell.
    pub steps: u64,

    /// Graph-generation attempts per radius before the radius is skipped.
    pub max_attempts: u32,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Retain every `PacketRecord`.  At 10⁶ steps this is tens of millions of
    /// records per cell, so sweeps normally keep aggregates only.
    pub keep_records: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            node_count:    100,
            rc_values:     linspace(0.16, 0.40, 10),
            lambda_values: linspace(0.1, 1.0, 10),
            steps:         1_000_000,
            max_attempts:  100,
            seed:          42,
            num_threads:   None,
            keep_records:  false,
        }
    }
}

impl SweepConfig {
    /// Total number of `(rc, lambda)` cells.
    pub fn cell_count(&self) -> usize {
        self.rc_values.len() * self.lambda_values.len()
    }

    /// Reject configurations the graph and simulation layers would refuse
    /// anyway, before any work is done.
    pub fn validate(&self) -> crate::CoreResult<()> {
        use crate::CoreError::Config;

        if self.node_count == 0 {
            return Err(Config("node_count must be positive".into()));
        }
        if u32::try_from(self.node_count).is_err() {
            return Err(Config(format!("node_count {} exceeds u32 range", self.node_count)));
        }
        if self.rc_values.is_empty() {
            return Err(Config("rc_values is empty".into()));
        }
        if let Some(rc) = self.rc_values.iter().find(|rc| !rc.is_finite() || **rc <= 0.0) {
            return Err(Config(format!("connectivity radius {rc} must be positive and finite")));
        }
        if self.lambda_values.is_empty() {
            return Err(Config("lambda_values is empty".into()));
        }
        if let Some(l) = self.lambda_values.iter().find(|l| !(0.0..=1.0).contains(*l)) {
            return Err(Config(format!("generation probability {l} outside [0, 1]")));
        }
        if self.max_attempts == 0 {
            return Err(Config("max_attempts must be at least 1".into()));
        }
        if self.num_threads == Some(0) {
            return Err(Config("num_threads must be at least 1 when set".into()));
        }
        Ok(())
    }
}

/// `count` evenly spaced values from `start` to `end`, both inclusive.
///
/// `count == 1` yields `[start]`; `count == 0` yields an empty vec.  The last
/// element is exactly `end` (no accumulated rounding).
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| if i == count - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}
