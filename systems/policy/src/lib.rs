#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Greedy policy extraction for the Maze Forager planner.

use maze_forager_core::{Cell, Direction, ValueGrid};
use maze_forager_system_transition::expected_utility;

/// Selects the best direction from a converged value grid.
#[derive(Debug, Default)]
pub struct PolicyExtractor;

impl PolicyExtractor {
    /// Returns the host-legal direction with maximal expected utility.
    ///
    /// Directions are evaluated in the fixed [`Direction::ALL`] order and a
    /// later direction replaces the running best only on a strictly higher
    /// utility, so ties always resolve to the earliest direction. Only
    /// directions in `legal` are considered at all; `None` means the host
    /// offered no cardinal move and the agent must stay put.
    #[must_use]
    pub fn choose(&self, agent: Cell, values: &ValueGrid, legal: &[Direction]) -> Option<Direction> {
        let mut best: Option<(Direction, f64)> = None;

        for direction in Direction::ALL {
            if !legal.contains(&direction) {
                continue;
            }

            let utility = expected_utility(agent, direction, values);
            best = match best {
                Some((_, best_utility)) if utility <= best_utility => best,
                _ => Some((direction, utility)),
            };
        }

        best.map(|(direction, _)| direction)
    }
}
