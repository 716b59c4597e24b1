//! Dense board representations shared by every planning system.

use crate::{BoardLayout, Cell, ConfigError};

/// Immutable record of the board dimensions and non-traversable cells.
///
/// Built once per session from the host's corner and obstacle observations
/// and never mutated afterward. The obstacle set is stored as a dense
/// row-major bitmap so probes stay allocation-free; cells outside the board
/// count as obstacles, which lets direction evaluation treat the board edge
/// and interior walls identically.
#[derive(Clone, Debug)]
pub struct GridTopology {
    width: u32,
    height: u32,
    blocked: Vec<bool>,
}

impl GridTopology {
    /// Derives the topology from the session-start layout.
    ///
    /// Board dimensions are the corner maxima plus one in each axis.
    /// Obstacles outside the derived bounds are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::DegenerateBoard`] when the corner data is
    /// empty, since a zero-sized board cannot host a session.
    pub fn from_layout(layout: &BoardLayout) -> Result<Self, ConfigError> {
        if layout.corners.is_empty() {
            return Err(ConfigError::DegenerateBoard);
        }

        let width = layout
            .corners
            .iter()
            .map(Cell::x)
            .max()
            .unwrap_or(0)
            .saturating_add(1);
        let height = layout
            .corners
            .iter()
            .map(Cell::y)
            .max()
            .unwrap_or(0)
            .saturating_add(1);

        let cell_count = cell_count(width, height);
        let mut blocked = vec![false; cell_count];
        for obstacle in &layout.obstacles {
            if let Some(offset) = index(width, height, *obstacle) {
                blocked[offset] = true;
            }
        }

        Ok(Self {
            width,
            height,
            blocked,
        })
    }

    /// Number of columns in the board.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the board.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Reports whether the cell is non-traversable.
    ///
    /// Cells outside the board bounds count as obstacles.
    #[must_use]
    pub fn is_obstacle(&self, cell: Cell) -> bool {
        index(self.width, self.height, cell)
            .map_or(true, |offset| self.blocked.get(offset).copied().unwrap_or(true))
    }

    /// Iterator over all traversable cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width;
        (0..self.height)
            .flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
            .filter(move |cell| !self.is_obstacle(*cell))
    }
}

/// Result of probing a [`ValueGrid`] cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CellProbe {
    /// The cell is traversable and carries the contained value.
    Open(f64),
    /// The cell is an obstacle or lies outside the board.
    Blocked,
}

/// Dense per-tick value estimate for every traversable cell.
///
/// The grid mirrors the topology's dimensions and obstacle bitmap, so every
/// traversable cell carries exactly one value from construction onward.
/// Obstacle cells carry no value at all; probing one yields
/// [`CellProbe::Blocked`], the sentinel that direction evaluation
/// special-cases as "would hit a wall". Rebuilt from scratch every tick.
#[derive(Clone, Debug)]
pub struct ValueGrid {
    width: u32,
    height: u32,
    values: Vec<f64>,
    blocked: Vec<bool>,
}

impl ValueGrid {
    /// Creates a grid covering the topology with every traversable cell set
    /// to the initial value.
    #[must_use]
    pub fn new(topology: &GridTopology, initial: f64) -> Self {
        Self {
            width: topology.width,
            height: topology.height,
            values: vec![initial; topology.blocked.len()],
            blocked: topology.blocked.clone(),
        }
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Probes the cell, yielding its value or the blocked sentinel.
    #[must_use]
    pub fn probe(&self, cell: Cell) -> CellProbe {
        match index(self.width, self.height, cell) {
            Some(offset) if !self.blocked[offset] => CellProbe::Open(self.values[offset]),
            _ => CellProbe::Blocked,
        }
    }

    /// Reads the value of a traversable cell.
    ///
    /// # Panics
    ///
    /// Panics when the cell is blocked or out of bounds; such a read is a
    /// construction bug in the caller, never a recoverable condition.
    #[must_use]
    pub fn value(&self, cell: Cell) -> f64 {
        match self.probe(cell) {
            CellProbe::Open(value) => value,
            CellProbe::Blocked => panic!(
                "value read from blocked cell ({}, {})",
                cell.x(),
                cell.y()
            ),
        }
    }

    /// Writes the value of a traversable cell.
    ///
    /// # Panics
    ///
    /// Panics when the cell is blocked or out of bounds, for the same
    /// reason as [`ValueGrid::value`].
    pub fn set(&mut self, cell: Cell, value: f64) {
        match index(self.width, self.height, cell) {
            Some(offset) if !self.blocked[offset] => self.values[offset] = value,
            _ => panic!(
                "value written to blocked cell ({}, {})",
                cell.x(),
                cell.y()
            ),
        }
    }

    /// Iterator over all traversable cells in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width;
        (0..self.height)
            .flat_map(move |y| (0..width).map(move |x| Cell::new(x, y)))
            .filter(move |cell| matches!(self.probe(*cell), CellProbe::Open(_)))
    }
}

/// Dense per-tick bitmap marking cells for exclusion or bookkeeping.
#[derive(Clone, Debug)]
pub struct CellMask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl CellMask {
    /// Creates an empty mask covering a board of the provided dimensions.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            bits: vec![false; cell_count(width, height)],
        }
    }

    /// Marks the cell. Marks outside the board are ignored.
    pub fn mark(&mut self, cell: Cell) {
        if let Some(offset) = index(self.width, self.height, cell) {
            self.bits[offset] = true;
        }
    }

    /// Reports whether the cell is marked. Cells outside the board are not.
    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        index(self.width, self.height, cell)
            .map_or(false, |offset| self.bits.get(offset).copied().unwrap_or(false))
    }
}

fn cell_count(width: u32, height: u32) -> usize {
    let width = usize::try_from(width).unwrap_or(0);
    let height = usize::try_from(height).unwrap_or(0);
    width.checked_mul(height).unwrap_or(0)
}

fn index(width: u32, height: u32, cell: Cell) -> Option<usize> {
    if cell.x() >= width || cell.y() >= height {
        return None;
    }

    let x = usize::try_from(cell.x()).ok()?;
    let y = usize::try_from(cell.y()).ok()?;
    let width = usize::try_from(width).ok()?;
    y.checked_mul(width)?.checked_add(x)
}

#[cfg(test)]
mod tests {
    use super::{CellMask, CellProbe, GridTopology, ValueGrid};
    use crate::{BoardLayout, Cell, ConfigError};

    fn layout_5x4() -> BoardLayout {
        BoardLayout {
            corners: vec![
                Cell::new(0, 0),
                Cell::new(4, 0),
                Cell::new(0, 3),
                Cell::new(4, 3),
            ],
            obstacles: vec![Cell::new(2, 1), Cell::new(2, 2)],
        }
    }

    #[test]
    fn from_layout_derives_dimensions_from_corner_maxima() {
        let topology = GridTopology::from_layout(&layout_5x4()).expect("topology");
        assert_eq!(topology.width(), 5);
        assert_eq!(topology.height(), 4);
    }

    #[test]
    fn from_layout_rejects_empty_corner_data() {
        let layout = BoardLayout::default();
        assert!(matches!(
            GridTopology::from_layout(&layout),
            Err(ConfigError::DegenerateBoard)
        ));
    }

    #[test]
    fn obstacles_and_out_of_bounds_cells_probe_as_blocked() {
        let topology = GridTopology::from_layout(&layout_5x4()).expect("topology");
        assert!(topology.is_obstacle(Cell::new(2, 1)));
        assert!(!topology.is_obstacle(Cell::new(2, 0)));
        assert!(topology.is_obstacle(Cell::new(5, 0)));
        assert!(topology.is_obstacle(Cell::new(0, 4)));
    }

    #[test]
    fn open_cells_covers_exactly_the_traversable_set() {
        let topology = GridTopology::from_layout(&layout_5x4()).expect("topology");
        let open: Vec<_> = topology.open_cells().collect();
        assert_eq!(open.len(), 18);
        assert!(!open.contains(&Cell::new(2, 1)));
        assert!(!open.contains(&Cell::new(2, 2)));
        assert_eq!(open[0], Cell::new(0, 0));
    }

    #[test]
    fn value_grid_probe_distinguishes_open_and_blocked() {
        let topology = GridTopology::from_layout(&layout_5x4()).expect("topology");
        let mut grid = ValueGrid::new(&topology, -0.5);

        assert_eq!(grid.probe(Cell::new(1, 1)), CellProbe::Open(-0.5));
        assert_eq!(grid.probe(Cell::new(2, 1)), CellProbe::Blocked);
        assert_eq!(grid.probe(Cell::new(9, 9)), CellProbe::Blocked);

        grid.set(Cell::new(1, 1), 3.25);
        assert_eq!(grid.probe(Cell::new(1, 1)), CellProbe::Open(3.25));
        assert!((grid.value(Cell::new(1, 1)) - 3.25).abs() < f64::EPSILON);
    }

    #[test]
    #[should_panic(expected = "blocked cell (2, 1)")]
    fn value_grid_write_to_blocked_cell_panics() {
        let topology = GridTopology::from_layout(&layout_5x4()).expect("topology");
        let mut grid = ValueGrid::new(&topology, 0.0);
        grid.set(Cell::new(2, 1), 1.0);
    }

    #[test]
    fn cloned_grid_is_independent_of_the_original() {
        let topology = GridTopology::from_layout(&layout_5x4()).expect("topology");
        let mut grid = ValueGrid::new(&topology, 0.0);
        let snapshot = grid.clone();

        grid.set(Cell::new(0, 0), 7.0);

        assert_eq!(snapshot.probe(Cell::new(0, 0)), CellProbe::Open(0.0));
        assert_eq!(grid.probe(Cell::new(0, 0)), CellProbe::Open(7.0));
    }

    #[test]
    fn mask_marks_and_ignores_out_of_bounds() {
        let mut mask = CellMask::new(3, 3);
        assert!(!mask.contains(Cell::new(1, 1)));

        mask.mark(Cell::new(1, 1));
        mask.mark(Cell::new(8, 8));

        assert!(mask.contains(Cell::new(1, 1)));
        assert!(!mask.contains(Cell::new(8, 8)));
    }
}
