#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tick reward construction for the Maze Forager planner.

use std::collections::HashSet;

use maze_forager_core::{
    Cell, CellMask, GridTopology, Observation, PlannerConfig, ValueGrid, VisitedCellPolicy,
};

/// Builds the tick's base value grid and keeps the session reward history.
///
/// The only state that survives a tick is the set of cells the agent has
/// occupied and the sets of reward-bearing cells ever observed; everything
/// else is rebuilt from the observation on every call to
/// [`RewardModel::build`].
#[derive(Debug, Default)]
pub struct RewardModel {
    visited: HashSet<Cell>,
    seen_collectibles: HashSet<Cell>,
    seen_power_items: HashSet<Cell>,
}

impl RewardModel {
    /// Creates a reward model with empty session history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Constructs the tick's base value grid from the observation.
    ///
    /// Every traversable cell receives exactly one value: the empty-cell
    /// reward, overlaid in order by collectible, power-item, hazard, and
    /// finally agent-occupancy values. Cells that keep a reward or hazard
    /// value are marked in `frozen` so the solver leaves them fixed for the
    /// tick. The observation's agent and item cells are also folded into
    /// the session history sets.
    pub fn build(
        &mut self,
        observation: &Observation,
        topology: &GridTopology,
        config: &PlannerConfig,
        frozen: &mut CellMask,
    ) -> ValueGrid {
        let _ = self.visited.insert(observation.agent);
        for collectible in &observation.collectibles {
            let _ = self.seen_collectibles.insert(*collectible);
        }
        for power_item in &observation.power_items {
            let _ = self.seen_power_items.insert(*power_item);
        }

        let mut values = ValueGrid::new(topology, config.empty_cell_reward);

        let collectible_reward = match config.collectible_budget {
            Some(budget) if !observation.collectibles.is_empty() => {
                budget / observation.collectibles.len() as f64
            }
            _ => config.collectible_reward,
        };
        for cell in &self.seen_collectibles {
            if self.reverts_to_empty(*cell, config) {
                continue;
            }
            values.set(*cell, collectible_reward);
            frozen.mark(*cell);
        }

        for cell in &self.seen_power_items {
            if self.reverts_to_empty(*cell, config) {
                continue;
            }
            values.set(*cell, config.power_item_reward);
            frozen.mark(*cell);
        }

        for hazard in &observation.hazards {
            let reward = if hazard.neutralized {
                config.neutralized_hazard_reward
            } else {
                config.hazard_penalty
            };
            values.set(hazard.cell, reward);
            frozen.mark(hazard.cell);
        }

        values.set(observation.agent, config.occupancy_penalty);

        values
    }

    /// Discards the session history so the next session starts clean.
    pub fn reset(&mut self) {
        self.visited.clear();
        self.seen_collectibles.clear();
        self.seen_power_items.clear();
    }

    fn reverts_to_empty(&self, cell: Cell, config: &PlannerConfig) -> bool {
        config.visited_collectibles == VisitedCellPolicy::RevertToEmpty
            && self.visited.contains(&cell)
    }
}
