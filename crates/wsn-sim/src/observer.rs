//! Simulation observer trait for progress reporting and data collection.

use log::info;

use wsn_core::Tick;

use crate::SimulationResult;

/// Callbacks invoked by [`PacketSim::run`][crate::PacketSim::run] at key
/// points in the step loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// With the `parallel` feature a block of steps is drawn before its step
/// hooks fire.  Hook order and the counts they see are unchanged.
pub trait SimObserver {
    /// Called once before the first step.
    fn on_sim_start(&mut self, _steps: u64, _sources: usize) {}

    /// Called at the start of each step, before its counts are reported.
    fn on_step_start(&mut self, _tick: Tick) {}

    /// Called at the end of each step with the number of packets generated
    /// and delivered during it.
    fn on_step_end(&mut self, _tick: Tick, _generated: usize, _delivered: usize) {}

    /// Called once after the final step with the finished counters.
    fn on_sim_end(&mut self, _final_tick: Tick, _result: &SimulationResult) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Logs the running packet count at `info` level every `interval` steps.
///
/// Meant for long runs (10⁶ steps) where a silent console looks hung.
pub struct LogProgress {
    interval:  u64,
    steps:     u64,
    generated: u64,
}

impl LogProgress {
    /// `interval == 0` disables the periodic lines; the final summary is
    /// still logged.
    pub fn new(interval: u64) -> Self {
        Self { interval, steps: 0, generated: 0 }
    }
}

impl SimObserver for LogProgress {
    fn on_sim_start(&mut self, steps: u64, _sources: usize) {
        self.steps = steps;
        self.generated = 0;
    }

    fn on_step_end(&mut self, tick: Tick, generated: usize, _delivered: usize) {
        self.generated += generated as u64;
        let done = tick.0 + 1;
        if self.interval > 0 && done % self.interval == 0 && done < self.steps {
            info!("  step {done}/{}: {} packets generated", self.steps, self.generated);
        }
    }

    fn on_sim_end(&mut self, final_tick: Tick, result: &SimulationResult) {
        info!(
            "  finished at {final_tick}: {} generated, {} received",
            result.total_generated, result.total_received
        );
    }
}
