//! Delivery models: whether a generated packet reaches the sink.
//!
//! The default model is [`Lossless`]: every packet forwarded along the
//! shortest path arrives, so `total_received` equals the number of packets
//! generated.  Lossy models are opted into with
//! [`SimBuilder::delivery`](crate::SimBuilder::delivery).

use wsn_core::NodeRng;

use crate::{SimError, SimResult};

/// Decides the fate of one packet that must cross `hops` links.
///
/// Called once per generated packet with the origin node's RNG, so any draws
/// stay inside that node's deterministic stream.
///
/// # Thread safety
///
/// Implementations must be `Send + Sync`: with the `parallel` feature the
/// same model is shared by every Rayon worker.
pub trait DeliveryModel: Send + Sync {
    fn delivered(&self, hops: u32, rng: &mut NodeRng) -> bool;
}

/// Every packet is delivered.  Draws nothing from the RNG.
#[derive(Copy, Clone, Debug, Default)]
pub struct Lossless;

impl DeliveryModel for Lossless {
    #[inline]
    fn delivered(&self, _hops: u32, _rng: &mut NodeRng) -> bool {
        true
    }
}

/// Each link is crossed successfully with probability `success`,
/// independently, so a packet survives `h` hops with probability
/// `success^h`.  Costs one draw per packet.
#[derive(Copy, Clone, Debug)]
pub struct PerHopLoss {
    success: f64,
}

impl PerHopLoss {
    /// Fails with [`SimError::InvalidInput`] unless `success` is in `[0, 1]`.
    pub fn new(success: f64) -> SimResult<Self> {
        if !(0.0..=1.0).contains(&success) {
            return Err(SimError::InvalidInput(format!(
                "per-hop success probability {success} outside [0, 1]"
            )));
        }
        Ok(Self { success })
    }

    pub fn success(&self) -> f64 {
        self.success
    }

    /// End-to-end delivery probability over `hops` links.
    pub fn delivery_probability(&self, hops: u32) -> f64 {
        self.success.powi(hops.min(i32::MAX as u32) as i32)
    }
}

impl DeliveryModel for PerHopLoss {
    #[inline]
    fn delivered(&self, hops: u32, rng: &mut NodeRng) -> bool {
        rng.gen_bool(self.delivery_probability(hops))
    }
}
