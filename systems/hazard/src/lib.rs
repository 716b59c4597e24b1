#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Hazard-proximity shaping for the Maze Forager planner.

use maze_forager_core::{
    Cell, CellMask, CellProbe, GridTopology, HazardRecord, PlannerConfig, ValueGrid,
};

/// Spreads graded danger values around active hazards.
///
/// Grading pushes the agent away from a threat before it is adjacent, not
/// merely when co-located. Every hazard cell and every graded cell is
/// frozen for the tick: their values are fixed inputs to the solver, never
/// derived from neighbor utilities.
#[derive(Debug, Default)]
pub struct HazardShaper;

impl HazardShaper {
    /// Overlays hazard gradients onto the tick's value grid.
    ///
    /// On large boards (either dimension at the configured threshold or
    /// above) each active hazard grades the cells of its 7×7 neighborhood
    /// whose Manhattan distance falls within the falloff table, dividing
    /// the hazard penalty by the distance's divisor. Small boards grade
    /// only the eight surrounding cells, all with the first divisor. A cell
    /// graded by several hazards keeps the most negative candidate, so a
    /// later pass never weakens an earlier, more severe warning. A
    /// neutralized hazard marks only its own cell with the approach reward
    /// and spreads no gradient.
    pub fn apply(
        &self,
        hazards: &[HazardRecord],
        topology: &GridTopology,
        config: &PlannerConfig,
        values: &mut ValueGrid,
        frozen: &mut CellMask,
    ) {
        let large = topology.width() >= config.large_board_threshold
            || topology.height() >= config.large_board_threshold;
        let radius: i64 = if large { 3 } else { 1 };

        let mut graded = CellMask::new(topology.width(), topology.height());

        for hazard in hazards {
            if hazard.neutralized {
                values.set(hazard.cell, config.neutralized_hazard_reward);
                frozen.mark(hazard.cell);
                continue;
            }

            values.set(hazard.cell, config.hazard_penalty);
            frozen.mark(hazard.cell);

            for dx in -radius..=radius {
                for dy in -radius..=radius {
                    if dx == 0 && dy == 0 {
                        continue;
                    }

                    let rung = if large {
                        let distance = dx.unsigned_abs() + dy.unsigned_abs();
                        let distance = usize::try_from(distance).unwrap_or(usize::MAX);
                        if distance > config.hazard_falloff.len() {
                            continue;
                        }
                        distance - 1
                    } else {
                        0
                    };

                    let Some(target) = offset_cell(hazard.cell, dx, dy) else {
                        continue;
                    };
                    if matches!(values.probe(target), CellProbe::Blocked) {
                        continue;
                    }
                    if hazards.iter().any(|other| other.cell == target) {
                        continue;
                    }

                    let candidate = config.hazard_penalty / config.hazard_falloff[rung];
                    if graded.contains(target) {
                        let existing = values.value(target);
                        values.set(target, existing.min(candidate));
                    } else {
                        values.set(target, candidate);
                        graded.mark(target);
                        frozen.mark(target);
                    }
                }
            }
        }
    }
}

fn offset_cell(cell: Cell, dx: i64, dy: i64) -> Option<Cell> {
    let x = i64::from(cell.x()).checked_add(dx)?;
    let y = i64::from(cell.y()).checked_add(dy)?;
    let x = u32::try_from(x).ok()?;
    let y = u32::try_from(y).ok()?;
    Some(Cell::new(x, y))
}
