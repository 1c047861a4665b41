//! sweep — connectivity-radius × traffic-intensity sweep for rust_wsn.
//!
//! For every radius: sample a connected random geometric graph (skipping the
//! radius if the retry budget runs out), pick the sink, route once, then run
//! one simulation per generation probability on that same network.
//!
//! ```text
//! cargo run --profile fast -p sweep                  # reference sweep, 10⁶ steps/cell
//! cargo run --profile fast -p sweep -F parallel      # same, cells drawn on Rayon
//! WSN_STEPS=10000 cargo run --release -p sweep       # quick look
//! cargo run --release -p sweep -- sweep.json         # custom SweepConfig
//! RUST_LOG=debug cargo run --release -p sweep        # per-attempt retry log
//! ```

use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{info, warn};

use wsn_core::{NodeId, SimRng, SweepConfig};
use wsn_graph::{RetryPolicy, build_connected_graph, build_routing_table, pick_sink};
use wsn_sim::{LogProgress, SimBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Overrides `SweepConfig::steps` when set.
const STEPS_ENV:         &str = "WSN_STEPS";
/// Steps between progress lines inside one cell.
const PROGRESS_INTERVAL: u64  = 250_000;

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config() -> Result<SweepConfig> {
    let mut config = match std::env::args().nth(1) {
        Some(path) => {
            let file = File::open(&path).with_context(|| format!("opening config {path}"))?;
            serde_json::from_reader(BufReader::new(file))
                .with_context(|| format!("parsing config {path}"))?
        }
        None => SweepConfig::default(),
    };

    if let Ok(raw) = std::env::var(STEPS_ENV) {
        config.steps = raw
            .parse()
            .with_context(|| format!("{STEPS_ENV}={raw} is not a step count"))?;
    }

    config.validate()?;
    Ok(config)
}

// ── Results ───────────────────────────────────────────────────────────────────

/// One row of the closing summary table.
struct Cell {
    network:   usize,
    rc:        f64,
    sink:      NodeId,
    lambda:    f64,
    generated: u64,
    received:  u64,
    mean_hops: Option<f64>,
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    if let Some(threads) = config.num_threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("configuring the Rayon thread pool")?;
    }

    info!("--- Starting simulation ---");
    info!("Nodes: {}, Steps: {}, Seed: {}", config.node_count, config.steps, config.seed);
    info!(
        "Configurations: {} networks x {} lambdas",
        config.rc_values.len(),
        config.lambda_values.len()
    );

    let mut rng = SimRng::new(config.seed);
    let policy = RetryPolicy::new(config.max_attempts);
    let mut cells: Vec<Cell> = Vec::with_capacity(config.cell_count());
    let mut skipped = 0usize;

    let t0 = Instant::now();

    // ── Outer loop: one network per connectivity radius ──────────────────
    for (rc_idx, &rc) in config.rc_values.iter().enumerate() {
        let network = rc_idx + 1;
        info!("[Network {network}/{}] generating graph with rc={rc:.4}", config.rc_values.len());

        let net = match build_connected_graph(config.node_count, rc, policy, &mut rng) {
            Ok(net) => net,
            Err(e) if e.is_recoverable() => {
                warn!("  {e}; skipping");
                skipped += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let sink = pick_sink(&net.graph, &mut rng)?;
        let table = build_routing_table(&net.graph, sink)?;
        info!(
            "  connected after {} attempt(s): {} edges, sink {sink} (degree {}), depth {} hops",
            net.attempts,
            net.graph.edge_count(),
            net.graph.degree(sink),
            table.max_hops()
        );

        // ── Inner loop: traffic intensities on the same network ──────────
        for &lambda in &config.lambda_values {
            let seed: u64 = rng.random();
            let outcome = SimBuilder::new(&net.graph, &net.positions, &table, lambda, config.steps)
                .seed(seed)
                .keep_records(config.keep_records)
                .build()?
                .run(&mut LogProgress::new(PROGRESS_INTERVAL));

            let r = &outcome.result;
            info!(
                "  lambda={lambda:.2}: {} generated, {} received ({:.1} per step), ratio {}, mean hops {}",
                r.total_generated,
                r.total_received,
                r.throughput_per_step(),
                r.delivery_ratio().map_or_else(|| "-".to_string(), |d| format!("{d:.3}")),
                r.mean_hops_delivered().map_or_else(|| "-".to_string(), |h| format!("{h:.2}")),
            );

            cells.push(Cell {
                network,
                rc,
                sink,
                lambda,
                generated: r.total_generated,
                received:  r.total_received,
                mean_hops: r.mean_hops_delivered(),
            });
        }
    }

    let elapsed = t0.elapsed();
    info!("Simulation completed in {:.2} s", elapsed.as_secs_f64());
    if skipped > 0 {
        warn!("{skipped} network configuration(s) skipped: no connected graph");
    }

    // ── Summary ───────────────────────────────────────────────────────────
    println!();
    println!(
        "{:<4} {:>7} {:>6} {:>7} {:>14} {:>14} {:>9}",
        "Net", "rc", "Sink", "lambda", "Generated", "Received", "MeanHops"
    );
    println!("{}", "-".repeat(67));
    for c in &cells {
        println!(
            "{:<4} {:>7.4} {:>6} {:>7.2} {:>14} {:>14} {:>9}",
            c.network,
            c.rc,
            c.sink.0,
            c.lambda,
            c.generated,
            c.received,
            c.mean_hops.map_or_else(|| "-".to_string(), |h| format!("{h:.2}")),
        );
    }

    Ok(())
}
