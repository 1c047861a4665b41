//! Packet record type.

use wsn_core::{NodeId, Tick};

/// One generated packet.
///
/// Created by the step loop and never modified afterwards.  `hops` is the
/// origin's distance to the sink at generation time, which for a static
/// topology is also the number of links the packet traverses.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PacketRecord {
    pub origin:       NodeId,
    pub generated_at: Tick,
    pub hops:         u32,
    pub delivered:    bool,
}
