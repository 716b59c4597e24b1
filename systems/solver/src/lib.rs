#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Fixed-sweep synchronous value iteration for the Maze Forager planner.

use maze_forager_core::{CellMask, ConfigError, Direction, PlannerConfig, ValueGrid};
use maze_forager_system_transition::expected_utility;

/// Runs a fixed number of synchronous Bellman sweeps over a value grid.
///
/// Termination is by iteration count, never by a convergence threshold, so
/// the per-tick latency bound is known up front. The sweep count must be
/// chosen large enough relative to the board diameter that values near the
/// agent have stabilized in practice.
#[derive(Clone, Debug)]
pub struct BellmanSolver {
    sweep_count: u32,
    discount: f64,
    base_reward: f64,
}

impl BellmanSolver {
    /// Creates a solver from the provided configuration.
    ///
    /// # Errors
    ///
    /// Fails with the configuration's validation error before any sweep can
    /// run; in particular a discount outside `[0, 1)` is rejected here.
    pub fn new(config: &PlannerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            sweep_count: config.sweep_count,
            discount: config.discount,
            base_reward: config.base_reward,
        })
    }

    /// Number of sweeps this solver performs per call to
    /// [`BellmanSolver::solve`].
    #[must_use]
    pub const fn sweep_count(&self) -> u32 {
        self.sweep_count
    }

    /// Converges the grid toward a fixed point with exactly the configured
    /// number of sweeps.
    ///
    /// Each sweep reads only a snapshot of the previous sweep's values, so
    /// the result is independent of the order in which cells are visited
    /// within a sweep. Frozen cells keep the value assigned by the reward
    /// model and hazard shaper for the whole tick.
    pub fn solve(&self, values: &mut ValueGrid, frozen: &CellMask) {
        for _ in 0..self.sweep_count {
            let snapshot = values.clone();
            for cell in snapshot.open_cells() {
                if frozen.contains(cell) {
                    continue;
                }

                let best = Direction::ALL
                    .iter()
                    .map(|&direction| expected_utility(cell, direction, &snapshot))
                    .fold(f64::NEG_INFINITY, f64::max);
                values.set(cell, self.base_reward + self.discount * best);
            }
        }
    }
}
