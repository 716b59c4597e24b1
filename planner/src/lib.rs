#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-tick orchestration of the Maze Forager planning pipeline.
//!
//! The [`Planner`] owns the session-scoped state (board topology, reward
//! history, validated solver) and wires the pure systems together: the
//! reward model builds the tick's value grid, the hazard shaper overlays
//! danger gradients, the solver converges the grid, and the policy
//! extractor picks the move handed back to the host.

use maze_forager_core::{
    Agent, BoardLayout, CellMask, ConfigError, GridTopology, Move, Observation, PlannerConfig,
    ValueGrid,
};
use maze_forager_system_hazard::HazardShaper;
use maze_forager_system_policy::PolicyExtractor;
use maze_forager_system_reward::RewardModel;
use maze_forager_system_solver::BellmanSolver;

/// Outcome of one planning tick.
#[derive(Debug)]
pub struct Plan {
    /// Move to hand back to the host.
    pub decision: Move,
    /// The converged value grid, exposed for diagnostics and rendering.
    pub values: ValueGrid,
}

/// Value-iteration planning agent for a partially dynamic grid world.
#[derive(Debug)]
pub struct Planner {
    config: PlannerConfig,
    topology: Option<GridTopology>,
    solver: Option<BellmanSolver>,
    reward_model: RewardModel,
    shaper: HazardShaper,
    policy: PolicyExtractor,
}

impl Planner {
    /// Creates a planner with the provided tuning configuration.
    ///
    /// The configuration is validated when the session starts, not here,
    /// so construction itself never fails.
    #[must_use]
    pub fn new(config: PlannerConfig) -> Self {
        Self {
            config,
            topology: None,
            solver: None,
            reward_model: RewardModel::new(),
            shaper: HazardShaper::default(),
            policy: PolicyExtractor::default(),
        }
    }

    /// Board topology established at session start, if any.
    #[must_use]
    pub fn topology(&self) -> Option<&GridTopology> {
        self.topology.as_ref()
    }

    /// Runs the full pipeline for one tick and returns both the decision
    /// and the converged value grid.
    ///
    /// # Panics
    ///
    /// Panics when called before a successful
    /// [`Agent::on_session_start`]; deciding without a topology is a host
    /// protocol violation, and a loud failure beats a silently wrong move.
    pub fn plan(&mut self, observation: &Observation) -> Plan {
        let Some(topology) = self.topology.as_ref() else {
            panic!("plan requested before session start");
        };
        let Some(solver) = self.solver.as_ref() else {
            panic!("plan requested before session start");
        };

        let mut frozen = CellMask::new(topology.width(), topology.height());
        let mut values = self
            .reward_model
            .build(observation, topology, &self.config, &mut frozen);
        self.shaper
            .apply(&observation.hazards, topology, &self.config, &mut values, &mut frozen);
        solver.solve(&mut values, &frozen);

        let decision = self
            .policy
            .choose(observation.agent, &values, &observation.legal_moves)
            .map_or(Move::Stay, Move::Step);

        Plan { decision, values }
    }
}

impl Agent for Planner {
    fn on_session_start(&mut self, layout: &BoardLayout) -> Result<(), ConfigError> {
        self.solver = Some(BellmanSolver::new(&self.config)?);
        self.topology = Some(GridTopology::from_layout(layout)?);
        Ok(())
    }

    fn decide(&mut self, observation: &Observation) -> Move {
        self.plan(observation).decision
    }

    fn on_session_end(&mut self) {
        self.reward_model.reset();
    }
}
