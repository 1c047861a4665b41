//! `wsn-sim` — discrete-step packet simulator for the rust_wsn framework.
//!
//! # Step loop
//!
//! ```text
//! for tick in 0..steps:
//!   ① Generate — every non-sink node draws Bernoulli(lambda) from its own
//!                RNG stream (parallel with the `parallel` feature).
//!   ② Deliver  — each new packet travels the precomputed shortest path;
//!                the DeliveryModel decides whether it reaches the sink
//!                (`Lossless` by default: always).
//!   ③ Count    — per-node generated/delivered counters and the running
//!                total received are updated; records are kept on request.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Draws blocks of steps per node on Rayon's thread pool. |
//! | `serde`    | Derives `Serialize`/`Deserialize` on records/results.  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use wsn_core::SimRng;
//! use wsn_graph::{RetryPolicy, build_connected_graph, build_routing_table, pick_sink};
//! use wsn_sim::{NoopObserver, SimBuilder};
//!
//! let mut rng = SimRng::new(42);
//! let net = build_connected_graph(100, 0.2, RetryPolicy::default(), &mut rng)?;
//! let sink = pick_sink(&net.graph, &mut rng)?;
//! let table = build_routing_table(&net.graph, sink)?;
//! let outcome = SimBuilder::new(&net.graph, &net.positions, &table, 0.3, 10_000)
//!     .seed(rng.random())
//!     .build()?
//!     .run(&mut NoopObserver);
//! println!("received {}", outcome.total_received());
//! ```

pub mod builder;
pub mod delivery;
pub mod error;
pub mod observer;
pub mod packet;
pub mod result;
pub mod sim;


pub use builder::SimBuilder;
pub use delivery::{DeliveryModel, Lossless, PerHopLoss};
pub use error::{SimError, SimResult};
pub use observer::{LogProgress, NoopObserver, SimObserver};
pub use packet::PacketRecord;
pub use result::{NodeStats, SimulationOutcome, SimulationResult};
pub use sim::{PacketSim, simulate};
