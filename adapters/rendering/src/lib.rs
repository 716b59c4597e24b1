#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Text presentation of Maze Forager value grids.
//!
//! Purely diagnostic: the rendered grid lets a human inspect what the
//! planner converged to and has no effect on planning.

use maze_forager_core::{Cell, CellProbe, ValueGrid};

/// Marker printed for cells that cannot be traversed.
pub const BLOCKED_MARKER: &str = "####";

/// Renders the grid as text, one board row per line.
///
/// Rows are printed top-down, so the line order matches how the board
/// looks: the highest `y` comes first. Open cells show their current value
/// to two decimal places; blocked cells show [`BLOCKED_MARKER`].
#[must_use]
pub fn render_value_grid(values: &ValueGrid) -> String {
    let mut output = String::new();

    for y in (0..values.height()).rev() {
        for x in 0..values.width() {
            let rendered = match values.probe(Cell::new(x, y)) {
                CellProbe::Open(value) => format!("{value:>9.2}"),
                CellProbe::Blocked => format!("{BLOCKED_MARKER:>9}"),
            };
            output.push_str(&rendered);
        }
        output.push('\n');
    }

    output
}
