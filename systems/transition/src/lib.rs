#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Stochastic transition evaluation for the Maze Forager planner.
//!
//! An attempted move succeeds with probability 0.8 and slips into each of
//! the two orthogonal directions with probability 0.1; it never reverses.
//! The single [`expected_utility`] function below is the core of every
//! Bellman backup *and* of the terminal policy comparison, so both always
//! agree on what a move is worth.

use maze_forager_core::{Cell, CellProbe, Direction, ValueGrid};

/// Probability that an attempted move lands on the intended neighbor.
pub const INTENDED_PROBABILITY: f64 = 0.8;

/// Probability of slipping into each orthogonal neighbor instead.
pub const LATERAL_PROBABILITY: f64 = 0.1;

/// Computes the probability-weighted utility of attempting to move from
/// `cell` in the intended direction, against the provided value snapshot.
///
/// A neighbor that is blocked or lies outside the board contributes the
/// value of `cell` itself: bouncing off a wall forfeits the move and the
/// agent stays put for that share of the probability mass.
///
/// # Panics
///
/// Panics when `cell` itself is blocked; evaluating a move from inside a
/// wall is a caller bug.
#[must_use]
pub fn expected_utility(cell: Cell, intended: Direction, values: &ValueGrid) -> f64 {
    let origin = match values.probe(cell) {
        CellProbe::Open(value) => value,
        CellProbe::Blocked => {
            panic!("expected utility queried from blocked cell ({}, {})", cell.x(), cell.y())
        }
    };

    let mut utility = INTENDED_PROBABILITY * neighbor_value(cell, intended, values, origin);
    for lateral in intended.laterals() {
        utility += LATERAL_PROBABILITY * neighbor_value(cell, lateral, values, origin);
    }
    utility
}

fn neighbor_value(cell: Cell, direction: Direction, values: &ValueGrid, origin: f64) -> f64 {
    let Some(neighbor) = cell.step(direction) else {
        return origin;
    };

    match values.probe(neighbor) {
        CellProbe::Open(value) => value,
        CellProbe::Blocked => origin,
    }
}
