use std::collections::BTreeSet;

use maze_forager_core::{
    Cell, ConfigError, Direction, GridTopology, HazardRecord, Move, Observation,
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::scenario::Scenario;

/// Number of ticks every hazard stays neutralized after a power item is
/// collected.
const NEUTRALIZED_TICKS: u32 = 12;

/// Result of advancing the simulation by one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TickOutcome {
    /// The episode continues.
    Continue,
    /// Every collectible has been picked up.
    Cleared,
    /// An active hazard reached the agent's cell.
    Caught,
}

/// Scripted simulation standing in for the planner's host environment.
///
/// The host owns the authoritative world state, hands the planner one
/// observation per tick, applies the returned move, and walks hazards with
/// a seeded random walk so runs stay reproducible.
pub(crate) struct Host {
    topology: GridTopology,
    agent: Cell,
    collectibles: BTreeSet<Cell>,
    power_items: BTreeSet<Cell>,
    hazards: Vec<Cell>,
    neutralized_remaining: u32,
    rng: ChaCha8Rng,
}

impl Host {
    /// Creates a host simulating the provided scenario.
    pub(crate) fn new(scenario: &Scenario, seed: u64) -> Result<Self, ConfigError> {
        let topology = GridTopology::from_layout(&scenario.layout())?;
        Ok(Self {
            topology,
            agent: scenario.agent,
            collectibles: scenario.collectibles.iter().copied().collect(),
            power_items: scenario.power_items.iter().copied().collect(),
            hazards: scenario.hazards.clone(),
            neutralized_remaining: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
        })
    }

    /// Snapshot of the world handed to the planner this tick.
    pub(crate) fn observation(&self) -> Observation {
        Observation {
            agent: self.agent,
            collectibles: self.collectibles.iter().copied().collect(),
            power_items: self.power_items.iter().copied().collect(),
            hazards: self
                .hazards
                .iter()
                .map(|&cell| HazardRecord::new(cell, self.neutralized_remaining > 0))
                .collect(),
            legal_moves: self.legal_moves_from(self.agent),
        }
    }

    /// Number of collectibles still on the board.
    pub(crate) fn collectibles_remaining(&self) -> usize {
        self.collectibles.len()
    }

    /// Applies the planner's move, advances hazards, and reports the
    /// episode state.
    pub(crate) fn apply(&mut self, decision: Move) -> TickOutcome {
        if let Move::Step(direction) = decision {
            if let Some(next) = self.passable_neighbor(self.agent, direction) {
                self.agent = next;
            }
        }

        let _ = self.collectibles.remove(&self.agent);
        if self.power_items.remove(&self.agent) {
            self.neutralized_remaining = NEUTRALIZED_TICKS;
        }

        if self.agent_is_caught() {
            return TickOutcome::Caught;
        }

        self.walk_hazards();

        if self.agent_is_caught() {
            return TickOutcome::Caught;
        }

        self.neutralized_remaining = self.neutralized_remaining.saturating_sub(1);

        if self.collectibles.is_empty() {
            TickOutcome::Cleared
        } else {
            TickOutcome::Continue
        }
    }

    fn agent_is_caught(&self) -> bool {
        self.neutralized_remaining == 0 && self.hazards.iter().any(|&hazard| hazard == self.agent)
    }

    fn walk_hazards(&mut self) {
        for index in 0..self.hazards.len() {
            let options: Vec<Cell> = Direction::ALL
                .iter()
                .filter_map(|&direction| self.passable_neighbor(self.hazards[index], direction))
                .collect();
            if options.is_empty() {
                continue;
            }

            let pick = self.rng.gen_range(0..options.len());
            self.hazards[index] = options[pick];
        }
    }

    fn legal_moves_from(&self, cell: Cell) -> Vec<Direction> {
        Direction::ALL
            .iter()
            .copied()
            .filter(|&direction| self.passable_neighbor(cell, direction).is_some())
            .collect()
    }

    fn passable_neighbor(&self, cell: Cell, direction: Direction) -> Option<Cell> {
        let next = cell.step(direction)?;
        (!self.topology.is_obstacle(next)).then_some(next)
    }
}
