use maze_forager_core::{
    Agent, BoardLayout, Cell, CellProbe, Direction, HazardRecord, Move, Observation,
    PlannerConfig,
};
use maze_forager_planner::Planner;

fn open_layout(width: u32, height: u32) -> BoardLayout {
    BoardLayout {
        corners: vec![
            Cell::new(0, 0),
            Cell::new(width - 1, 0),
            Cell::new(0, height - 1),
            Cell::new(width - 1, height - 1),
        ],
        obstacles: Vec::new(),
    }
}

fn observation_with(agent: Cell, collectibles: Vec<Cell>, legal_moves: Vec<Direction>) -> Observation {
    Observation {
        agent,
        collectibles,
        power_items: Vec::new(),
        hazards: Vec::new(),
        legal_moves,
    }
}

#[test]
fn values_rise_along_a_shortest_path_toward_the_last_collectible() {
    let config = PlannerConfig {
        empty_cell_reward: -0.04,
        collectible_reward: 10.0,
        collectible_budget: None,
        occupancy_penalty: -0.04,
        base_reward: 0.0,
        discount: 0.9,
        sweep_count: 100,
        ..PlannerConfig::default()
    };
    let mut planner = Planner::new(config);
    planner
        .on_session_start(&open_layout(5, 5))
        .expect("session start");

    let observation = observation_with(
        Cell::new(0, 0),
        vec![Cell::new(4, 4)],
        vec![Direction::North, Direction::East],
    );
    let plan = planner.plan(&observation);

    // Two distinct shortest Manhattan paths from the agent to the goal.
    let along_the_edge = [
        Cell::new(0, 0),
        Cell::new(1, 0),
        Cell::new(2, 0),
        Cell::new(3, 0),
        Cell::new(4, 0),
        Cell::new(4, 1),
        Cell::new(4, 2),
        Cell::new(4, 3),
        Cell::new(4, 4),
    ];
    let staircase = [
        Cell::new(0, 0),
        Cell::new(1, 0),
        Cell::new(1, 1),
        Cell::new(2, 1),
        Cell::new(2, 2),
        Cell::new(3, 2),
        Cell::new(3, 3),
        Cell::new(4, 3),
        Cell::new(4, 4),
    ];
    for path in [along_the_edge, staircase] {
        let mut previous = f64::NEG_INFINITY;
        for cell in path {
            let value = plan.values.value(cell);
            assert!(
                value >= previous,
                "value dipped at ({}, {}): {value} < {previous}",
                cell.x(),
                cell.y()
            );
            previous = value;
        }
    }

    // The chosen move makes progress toward the collectible.
    assert!(matches!(
        plan.decision,
        Move::Step(Direction::North) | Move::Step(Direction::East)
    ));
}

#[test]
fn converged_grid_covers_exactly_the_traversable_cells() {
    let layout = BoardLayout {
        corners: vec![Cell::new(6, 6)],
        obstacles: vec![Cell::new(2, 2), Cell::new(2, 3), Cell::new(4, 1)],
    };
    let mut planner = Planner::new(PlannerConfig::default());
    planner.on_session_start(&layout).expect("session start");

    let observation = observation_with(
        Cell::new(0, 0),
        vec![Cell::new(6, 6)],
        vec![Direction::North, Direction::East],
    );
    let plan = planner.plan(&observation);

    let topology = planner.topology().expect("topology");
    assert_eq!(plan.values.open_cells().count(), topology.open_cells().count());
    for cell in topology.open_cells() {
        assert!(matches!(plan.values.probe(cell), CellProbe::Open(_)));
    }
    for obstacle in [Cell::new(2, 2), Cell::new(2, 3), Cell::new(4, 1)] {
        assert_eq!(plan.values.probe(obstacle), CellProbe::Blocked);
    }
}

#[test]
fn hazard_gradient_survives_the_solve() {
    let config = PlannerConfig {
        hazard_penalty: -1_000.0,
        hazard_falloff: vec![2.0, 4.0, 8.0],
        sweep_count: 50,
        ..PlannerConfig::default()
    };
    let mut planner = Planner::new(config);
    planner
        .on_session_start(&open_layout(10, 10))
        .expect("session start");

    let observation = Observation {
        agent: Cell::new(0, 0),
        collectibles: vec![Cell::new(9, 9)],
        power_items: Vec::new(),
        hazards: vec![HazardRecord::new(Cell::new(3, 3), false)],
        legal_moves: vec![Direction::North, Direction::East],
    };
    let plan = planner.plan(&observation);

    // Graded cells are frozen, so the sweeps never soften them.
    assert_eq!(plan.values.probe(Cell::new(3, 3)), CellProbe::Open(-1_000.0));
    assert_eq!(plan.values.probe(Cell::new(2, 3)), CellProbe::Open(-500.0));
    assert_eq!(plan.values.probe(Cell::new(3, 4)), CellProbe::Open(-500.0));
    assert_eq!(plan.values.probe(Cell::new(4, 4)), CellProbe::Open(-250.0));
}

#[test]
fn planner_prefers_the_collectible_side_over_the_hazard_side() {
    let config = PlannerConfig {
        collectible_budget: None,
        sweep_count: 100,
        ..PlannerConfig::default()
    };
    let mut planner = Planner::new(config);
    planner
        .on_session_start(&open_layout(9, 9))
        .expect("session start");

    // Hazard far to the west, collectible two steps east: the westward
    // approach is poisoned by the gradient while the eastward one pays off.
    let observation = Observation {
        agent: Cell::new(4, 4),
        collectibles: vec![Cell::new(6, 4)],
        power_items: Vec::new(),
        hazards: vec![HazardRecord::new(Cell::new(0, 4), false)],
        legal_moves: Direction::ALL.to_vec(),
    };

    assert_eq!(planner.decide(&observation), Move::Step(Direction::East));
}

#[test]
fn session_end_forgets_collectible_history() {
    let config = PlannerConfig {
        collectible_budget: None,
        sweep_count: 10,
        ..PlannerConfig::default()
    };
    let mut planner = Planner::new(config.clone());
    planner
        .on_session_start(&open_layout(5, 5))
        .expect("session start");

    // The collectible at (2, 2) enters the seen set, then the session ends.
    let first = observation_with(
        Cell::new(0, 0),
        vec![Cell::new(2, 2)],
        vec![Direction::North, Direction::East],
    );
    let _ = planner.plan(&first);
    planner.on_session_end();
    planner
        .on_session_start(&open_layout(5, 5))
        .expect("session restart");

    // Without history the forgotten collectible carries no reward.
    let second = observation_with(
        Cell::new(0, 0),
        Vec::new(),
        vec![Direction::North, Direction::East],
    );
    let plan = planner.plan(&second);
    let value = plan.values.value(Cell::new(2, 2));
    assert!(
        value < config.collectible_reward,
        "stale collectible reward survived the session end: {value}"
    );
}
