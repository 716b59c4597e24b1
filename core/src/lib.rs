#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Maze Forager planner.
//!
//! This crate defines the vocabulary that connects the host boundary, the
//! pure planning systems, and the orchestrating planner. The host supplies a
//! [`BoardLayout`] once per session and an [`Observation`] once per decision
//! tick; the planner answers with a [`Move`]. All planning state flows
//! through the dense grid types ([`GridTopology`], [`ValueGrid`],
//! [`CellMask`]) defined in this crate so that every system reads and writes
//! the same representation.

mod grid;

pub use grid::{CellMask, CellProbe, GridTopology, ValueGrid};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Location of a single board cell expressed as x and y coordinates.
///
/// The origin sits in the south-west corner: `x` grows eastward and `y`
/// grows northward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    x: u32,
    y: u32,
}

impl Cell {
    /// Creates a new board cell coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn x(&self) -> u32 {
        self.x
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn y(&self) -> u32 {
        self.y
    }

    /// Computes the Manhattan distance between two cells.
    #[must_use]
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Returns the neighboring cell one step in the provided direction.
    ///
    /// `None` signals that the step would leave the coordinate space below
    /// zero. Steps beyond the upper board edge stay representable here and
    /// are rejected by grid probes instead.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<Cell> {
        match direction {
            Direction::North => Some(Self::new(self.x, self.y.checked_add(1)?)),
            Direction::South => Some(Self::new(self.x, self.y.checked_sub(1)?)),
            Direction::East => Some(Self::new(self.x.checked_add(1)?, self.y)),
            Direction::West => Some(Self::new(self.x.checked_sub(1)?, self.y)),
        }
    }
}

/// Cardinal movement directions available to the agent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward increasing row indices.
    North,
    /// Movement toward decreasing row indices.
    South,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Fixed enumeration order used wherever ties must break
    /// deterministically.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// The two directions orthogonal to this one.
    ///
    /// An attempted move can slip sideways into either of these; it never
    /// reverses.
    #[must_use]
    pub const fn laterals(self) -> [Direction; 2] {
        match self {
            Self::North | Self::South => [Self::East, Self::West],
            Self::East | Self::West => [Self::North, Self::South],
        }
    }
}

/// Decision handed back to the host at the end of a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Step one cell in the contained direction.
    Step(Direction),
    /// Remain on the current cell. Chosen only when no direction is legal.
    Stay,
}

/// Per-tick snapshot of a single hazard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HazardRecord {
    /// Cell the hazard currently occupies.
    pub cell: Cell,
    /// Whether the hazard is temporarily harmless this tick.
    pub neutralized: bool,
}

impl HazardRecord {
    /// Creates a hazard record for the provided cell and state.
    #[must_use]
    pub const fn new(cell: Cell, neutralized: bool) -> Self {
        Self { cell, neutralized }
    }
}

/// Static board geometry supplied by the host once per session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BoardLayout {
    /// Boundary corner cells; the maxima determine the board dimensions.
    pub corners: Vec<Cell>,
    /// Cells that can never be traversed.
    pub obstacles: Vec<Cell>,
}

/// Dynamic board state supplied by the host once per decision tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Observation {
    /// Cell the agent currently occupies.
    pub agent: Cell,
    /// Collectible items still present on the board.
    pub collectibles: Vec<Cell>,
    /// Power items still present on the board.
    pub power_items: Vec<Cell>,
    /// Hazards with their per-tick neutralization state.
    pub hazards: Vec<HazardRecord>,
    /// Directions the host currently accepts from the agent's cell.
    pub legal_moves: Vec<Direction>,
}

/// Policy applied to collectible cells the agent has already occupied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VisitedCellPolicy {
    /// Visited collectible cells keep the collectible reward.
    Retain,
    /// Visited collectible cells fall back to the empty-cell reward.
    #[default]
    RevertToEmpty,
}

/// Aggregated tuning knobs controlling every adjustable aspect of the
/// planner.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Reward assigned to every traversable cell before any overlay.
    pub empty_cell_reward: f64,
    /// Flat reward for a collectible cell when no budget is configured.
    pub collectible_reward: f64,
    /// Optional decay budget; when set, each collectible is worth the
    /// budget divided by the remaining collectible count, so the last few
    /// items grow maximally attractive.
    pub collectible_budget: Option<f64>,
    /// Reward for a power-item cell.
    pub power_item_reward: f64,
    /// Penalty written onto an active hazard's own cell; also the numerator
    /// of every graded ring value.
    pub hazard_penalty: f64,
    /// Reward written onto a neutralized hazard's cell so the agent
    /// approaches it freely.
    pub neutralized_hazard_reward: f64,
    /// Penalty for the agent's own cell, discouraging standing still.
    pub occupancy_penalty: f64,
    /// Immediate reward term of the Bellman backup.
    pub base_reward: f64,
    /// Discount factor of the Bellman backup; must lie in `[0, 1)`.
    pub discount: f64,
    /// Number of synchronous sweeps performed per tick.
    pub sweep_count: u32,
    /// A board is "large" when either dimension reaches this threshold;
    /// large boards use the wide hazard neighborhood.
    pub large_board_threshold: u32,
    /// Divisors applied to the hazard penalty at Manhattan distances
    /// 1, 2, ... from an active hazard. Cells beyond the table receive no
    /// hazard-derived adjustment.
    pub hazard_falloff: Vec<f64>,
    /// Treatment of collectible cells the agent has already occupied.
    pub visited_collectibles: VisitedCellPolicy,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            empty_cell_reward: -0.5,
            collectible_reward: 10.0,
            collectible_budget: Some(10_000.0),
            power_item_reward: 100.0,
            hazard_penalty: -1_000.0,
            neutralized_hazard_reward: 10.0,
            occupancy_penalty: -5.0,
            base_reward: -0.5,
            discount: 0.9,
            sweep_count: 100,
            large_board_threshold: 8,
            hazard_falloff: vec![2.0, 4.0, 8.0],
            visited_collectibles: VisitedCellPolicy::RevertToEmpty,
        }
    }
}

impl PlannerConfig {
    /// Checks the configuration for values that make a session unviable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DiscountOutOfRange`] when the discount factor
    /// lies outside `[0, 1)` and [`ConfigError::EmptyHazardFalloff`] when
    /// the falloff table contains no divisors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..1.0).contains(&self.discount) {
            return Err(ConfigError::DiscountOutOfRange {
                discount: self.discount,
            });
        }

        if self.hazard_falloff.is_empty() {
            return Err(ConfigError::EmptyHazardFalloff);
        }

        Ok(())
    }
}

/// Fatal session-start configuration failures.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The discount factor does not lie in `[0, 1)`.
    #[error("discount factor {discount} lies outside [0, 1)")]
    DiscountOutOfRange {
        /// The rejected discount value.
        discount: f64,
    },
    /// The corner observation was empty, so no board dimensions exist.
    #[error("corner data is empty, the board would be zero-sized")]
    DegenerateBoard,
    /// The hazard falloff table contains no divisors.
    #[error("hazard falloff table is empty")]
    EmptyHazardFalloff,
}

/// Lifecycle contract between the host environment and a planning agent.
///
/// The host calls [`Agent::on_session_start`] exactly once before the first
/// tick, [`Agent::decide`] once per tick, and [`Agent::on_session_end`] when
/// the episode finishes.
pub trait Agent {
    /// Consumes the static board geometry and prepares session state.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the configuration or the layout make
    /// the session unviable; the host must abort setup.
    fn on_session_start(&mut self, layout: &BoardLayout) -> Result<(), ConfigError>;

    /// Produces the move for the current tick.
    fn decide(&mut self, observation: &Observation) -> Move;

    /// Discards per-session state so the next session starts clean.
    fn on_session_end(&mut self);
}
