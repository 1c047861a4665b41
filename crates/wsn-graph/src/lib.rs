//! `wsn-graph` — network topology, connectivity, sink selection, and routing.
//!
//! # Crate layout
//!
//! | Module           | Contents                                                  |
//! |------------------|-----------------------------------------------------------|
//! | [`graph`]        | `Graph` (edge list + CSR adjacency), `GraphBuilder`       |
//! | [`geometric`]    | `PositionMap`, `build_graph`, `connect_within_radius`     |
//! | [`connectivity`] | `is_connected`, `component_of`                            |
//! | [`sink`]         | `pick_sink` (max degree, random tie-break)                |
//! | [`routing`]      | `Router` trait, `RoutingTable`, `BfsRouter`               |
//! | [`retry`]        | `RetryPolicy`, `ConnectedGraph`, `build_connected_graph`  |
//! | [`error`]        | `GraphError`, `GraphResult<T>`                            |
//!
//! # Pipeline
//!
//! ```text
//! build_connected_graph(n, rc)   ─┬─ build_graph ⟲ until is_connected
//!                                 │
//! pick_sink(graph)                ─┤  once per network
//! build_routing_table(graph,sink) ─┘  once per network, reused per lambda
//! ```
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod connectivity;
pub mod error;
pub mod geometric;
pub mod graph;
pub mod retry;
pub mod routing;
pub mod sink;

#[cfg(test)]
mod tests;

pub use connectivity::{component_of, is_connected};
pub use error::{GraphError, GraphResult};
pub use geometric::{PositionMap, build_graph, connect_within_radius};
pub use graph::{Graph, GraphBuilder};
pub use retry::{ConnectedGraph, DEFAULT_MAX_ATTEMPTS, RetryPolicy, build_connected_graph};
pub use routing::{BfsRouter, Router, RoutingTable, build_routing_table};
pub use sink::pick_sink;
