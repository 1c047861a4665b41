//! `wsn-core` — foundational types for the `rust_wsn` sensor-network simulator.
//!
//! This crate is a dependency of every other `wsn-*` crate.  It intentionally
//! has no `wsn-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`                                              |
//! | [`point`]       | `Point` (unit-square coordinate), Euclidean distance  |
//! | [`time`]        | `Tick`                                                |
//! | [`rng`]         | `NodeRng` (per-node), `SimRng` (global)               |
//! | [`config`]      | `SweepConfig`, `linspace`                             |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | `Serialize`/`Deserialize` on all public types (JSON config) |

pub mod config;
pub mod error;
pub mod ids;
pub mod point;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{SweepConfig, linspace};
pub use error::{CoreError, CoreResult};
pub use ids::NodeId;
pub use point::Point;
pub use rng::{NodeRng, SimRng};
pub use time::Tick;
